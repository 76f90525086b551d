//! Step-refinement study comparing RK4 against Dormand-Prince.
//!
//! Integrates the free-flight ODE (no ground handling) to a fixed end time at
//! a ladder of halving step sizes and reports the final position gap between
//! the two methods at each level. Levels are independent and run on rayon.

use rayon::prelude::*;

use df_core::ensure_positive;

use crate::divergence::position_gap;
use crate::error::{SimError, SimResult};
use crate::integrator::{Stepper, StepperKind};
use crate::params::{Launch, Parameters};
use crate::state::{State, position_of};

/// Result of one refinement level.
#[derive(Clone, Debug, PartialEq)]
pub struct RefinementLevel {
    pub time_step: f64,
    pub steps: u64,
    /// Final RK4 / Dormand-Prince position gap (m).
    pub final_gap: f64,
}

/// Advance `initial` by `steps` fixed steps without ground contact.
pub fn free_flight<S: Stepper + ?Sized>(
    stepper: &S,
    initial: State,
    dt: f64,
    steps: u64,
    params: &Parameters,
) -> State {
    let mut s = initial;
    for _ in 0..steps {
        s = stepper.step(&s, dt, params);
    }
    s
}

/// Deepest refinement level accepted; the step count doubles per level.
pub const MAX_LEVELS: usize = 20;

/// Run `levels` refinement levels starting at `params.time_step()`.
///
/// Level `i` uses `dt / 2^i` and `t_end / dt_i` steps, so every level covers
/// exactly `t_end`. `t_end` must be a whole multiple of `dt`.
pub fn refinement_study(
    params: &Parameters,
    launch: &Launch,
    t_end: f64,
    levels: usize,
) -> SimResult<Vec<RefinementLevel>> {
    let t_end = ensure_positive(t_end, "t_end")?;
    if levels == 0 {
        return Err(SimError::InvalidArg {
            what: "levels must be positive",
        });
    }
    if levels > MAX_LEVELS {
        return Err(SimError::InvalidArg {
            what: "levels must not exceed 20",
        });
    }
    let base_steps = whole_steps(t_end, params.time_step())?;
    let initial = launch.initial_state()?;

    (0..levels)
        .into_par_iter()
        .map(|i| -> SimResult<RefinementLevel> {
            let level = params.with_time_step(params.time_step() / 2f64.powi(i as i32))?;
            let steps = base_steps
                .checked_mul(1u64 << i)
                .ok_or(SimError::InvalidArg {
                    what: "t_end needs too many steps",
                })?;
            let a = free_flight(&StepperKind::Rk4, initial, level.time_step(), steps, &level);
            let b = free_flight(&StepperKind::DormandPrince, initial, level.time_step(), steps, &level);
            Ok(RefinementLevel {
                time_step: level.time_step(),
                steps,
                final_gap: position_gap(&position_of(&a), &position_of(&b)),
            })
        })
        .collect()
}

/// Number of `dt` steps in `t_end`, or an error unless it is a whole number.
fn whole_steps(t_end: f64, dt: f64) -> SimResult<u64> {
    let n = t_end / dt;
    let whole = n.round();
    if whole < 1.0 || (n - whole).abs() > 1e-9 * whole {
        return Err(SimError::InvalidArg {
            what: "t_end must be a whole multiple of the time step",
        });
    }
    Ok(whole as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::{deg, m, mps};

    #[test]
    fn rejects_bad_arguments() {
        let p = Parameters::builder().build().unwrap();
        let launch = Launch::new(m(0.0), m(1.0), mps(50.0), deg(45.0));
        assert!(refinement_study(&p, &launch, 0.0, 3).is_err());
        assert!(refinement_study(&p, &launch, 1.0, 0).is_err());
    }

    #[test]
    fn levels_halve_step_and_double_count() {
        let p = Parameters::builder().build().unwrap();
        let launch = Launch::new(m(0.0), m(1.0), mps(50.0), deg(45.0));
        let levels = refinement_study(&p, &launch, 1.0, 3).unwrap();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].steps, 100);
        assert_eq!(levels[1].steps, 200);
        assert_eq!(levels[2].steps, 400);
        assert!((levels[2].time_step - 0.0025).abs() < 1e-15);
    }

    #[test]
    fn every_level_covers_t_end() {
        let p = Parameters::builder().build().unwrap();
        let launch = Launch::new(m(0.0), m(1.0), mps(50.0), deg(45.0));
        let levels = refinement_study(&p, &launch, 0.37, 5).unwrap();
        for level in &levels {
            let covered = level.steps as f64 * level.time_step;
            assert!((covered - 0.37).abs() < 1e-12, "dt {} covers {covered}", level.time_step);
        }
    }

    #[test]
    fn rejects_t_end_off_the_step_grid() {
        let p = Parameters::builder().build().unwrap();
        let launch = Launch::new(m(0.0), m(1.0), mps(50.0), deg(45.0));
        let err = refinement_study(&p, &launch, 0.015, 3).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
        assert!(refinement_study(&p, &launch, 0.004, 3).is_err());
    }

    #[test]
    fn rejects_too_many_levels() {
        let p = Parameters::builder().build().unwrap();
        let launch = Launch::new(m(0.0), m(1.0), mps(50.0), deg(45.0));
        let err = refinement_study(&p, &launch, 1.0, MAX_LEVELS + 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }
}
