//! Fixed-step time integrators.

use crate::model::derivatives;
use crate::params::Parameters;
use crate::state::State;
use crate::tableau;

/// A method advancing a `State` by one fixed time increment.
pub trait Stepper {
    /// Short name used in logs and reports.
    fn label(&self) -> &'static str;

    /// Advance `state` by `dt` under `params`.
    fn step(&self, state: &State, dt: f64, params: &Parameters) -> State;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Stepper for Rk4 {
    fn label(&self) -> &'static str {
        "rk4"
    }

    fn step(&self, state: &State, dt: f64, params: &Parameters) -> State {
        let k1 = derivatives(state, params);
        let k2 = derivatives(&(state + 0.5 * dt * k1), params);
        let k3 = derivatives(&(state + 0.5 * dt * k2), params);
        let k4 = derivatives(&(state + dt * k3), params);

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        state + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }
}

/// Dormand-Prince 7-stage method run as a plain fixed-step 5th-order scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct DormandPrince;

impl Stepper for DormandPrince {
    fn label(&self) -> &'static str {
        "dopri5"
    }

    fn step(&self, state: &State, dt: f64, params: &Parameters) -> State {
        let mut k = [State::zeros(); tableau::STAGES];

        for i in 0..tableau::STAGES {
            let mut incr = State::zeros();
            for j in 0..i {
                incr += tableau::A[i][j] * k[j];
            }
            k[i] = derivatives(&(state + dt * incr), params);
        }

        let mut weighted = State::zeros();
        for (b, ki) in tableau::B.iter().zip(k.iter()) {
            weighted += *b * *ki;
        }
        state + dt * weighted
    }
}

/// Stepper selection for a simulation track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StepperKind {
    /// 4th-order Runge-Kutta (4 rhs calls per step).
    #[default]
    Rk4,
    /// Dormand-Prince 5th order, fixed step (7 rhs calls per step).
    DormandPrince,
}

impl Stepper for StepperKind {
    fn label(&self) -> &'static str {
        match self {
            StepperKind::Rk4 => Rk4.label(),
            StepperKind::DormandPrince => DormandPrince.label(),
        }
    }

    fn step(&self, state: &State, dt: f64, params: &Parameters) -> State {
        match self {
            StepperKind::Rk4 => Rk4.step(state, dt, params),
            StepperKind::DormandPrince => DormandPrince.step(state, dt, params),
        }
    }
}
