//! Scenario -> simulation inputs.

use df_core::units::{deg, kg, kgpm3, m, mps, mps2, s};
use df_sim::{ClockPolicy, Launch, Parameters, SimOptions, Simulation, StepperKind};

use crate::ProjectResult;
use crate::schema::{ClockDef, Scenario, StepperDef};
use crate::validate::validate_scenario;

/// Everything needed to start a run.
#[derive(Debug, Clone)]
pub struct CompiledScenario {
    pub params: Parameters,
    pub launch: Launch,
    pub options: SimOptions,
    pub frame_rate_hz: f64,
}

impl From<StepperDef> for StepperKind {
    fn from(def: StepperDef) -> Self {
        match def {
            StepperDef::Rk4 => StepperKind::Rk4,
            StepperDef::Dopri5 => StepperKind::DormandPrince,
        }
    }
}

impl From<ClockDef> for ClockPolicy {
    fn from(def: ClockDef) -> Self {
        match def {
            ClockDef::FreezeWhenSettled => ClockPolicy::FreezeWhenSettled,
            ClockDef::Continuous => ClockPolicy::Continuous,
        }
    }
}

pub fn compile(scenario: &Scenario) -> ProjectResult<CompiledScenario> {
    validate_scenario(scenario)?;

    let env = &scenario.environment;
    let params = Parameters::builder()
        .mass(kg(scenario.projectile.mass_kg))
        .diameter(m(scenario.projectile.diameter_m))
        .drag_coefficient(env.drag_coefficient)
        .air_density(kgpm3(env.air_density_kgpm3))
        .gravity(mps2(env.gravity_mps2))
        .wind_from(mps(env.wind.speed_mps), deg(env.wind.direction_deg))
        .restitution(scenario.bounce.restitution)
        .min_speed_threshold(mps(scenario.bounce.min_speed_mps))
        .time_step(s(scenario.run.time_step_s))
        .build()?;

    let launch = Launch::new(
        m(scenario.launch.x0_m),
        m(scenario.launch.y0_m),
        mps(scenario.launch.speed_mps),
        deg(scenario.launch.angle_deg),
    );

    let options = SimOptions {
        primary: scenario.run.primary.into(),
        secondary: scenario.run.secondary.into(),
        clock: scenario.run.clock.into(),
    };

    Ok(CompiledScenario {
        params,
        launch,
        options,
        frame_rate_hz: scenario.run.frame_rate_hz,
    })
}

pub fn build_simulation(scenario: &Scenario) -> ProjectResult<Simulation> {
    let compiled = compile(scenario)?;
    Ok(Simulation::new(
        compiled.params,
        &compiled.launch,
        compiled.options,
    )?)
}
