//! Scenario validation logic.

use crate::schema::{LATEST_VERSION, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Accepted render rates for paced runs (Hz).
pub const MIN_FRAME_RATE_HZ: f64 = 1.0;
pub const MAX_FRAME_RATE_HZ: f64 = 1000.0;

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite and > 0"))
    }
}

fn check_non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite and >= 0"))
    }
}

fn check_finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }

    let launch = &scenario.launch;
    check_finite("launch.x0_m", launch.x0_m)?;
    check_finite("launch.y0_m", launch.y0_m)?;
    check_non_negative("launch.speed_mps", launch.speed_mps)?;
    check_finite("launch.angle_deg", launch.angle_deg)?;

    check_positive("projectile.mass_kg", scenario.projectile.mass_kg)?;
    check_positive("projectile.diameter_m", scenario.projectile.diameter_m)?;

    let env = &scenario.environment;
    check_positive("environment.gravity_mps2", env.gravity_mps2)?;
    check_non_negative("environment.air_density_kgpm3", env.air_density_kgpm3)?;
    check_non_negative("environment.drag_coefficient", env.drag_coefficient)?;
    check_finite("environment.wind.speed_mps", env.wind.speed_mps)?;
    check_finite("environment.wind.direction_deg", env.wind.direction_deg)?;

    let e = scenario.bounce.restitution;
    if !(0.0..=1.0).contains(&e) {
        return Err(invalid("bounce.restitution", e, "must be in [0, 1]"));
    }
    check_non_negative("bounce.min_speed_mps", scenario.bounce.min_speed_mps)?;

    let run = &scenario.run;
    check_positive("run.time_step_s", run.time_step_s)?;
    if !(MIN_FRAME_RATE_HZ..=MAX_FRAME_RATE_HZ).contains(&run.frame_rate_hz) {
        return Err(invalid(
            "run.frame_rate_hz",
            run.frame_rate_hz,
            "must be in [1, 1000]",
        ));
    }
    if run.primary == run.secondary {
        return Err(invalid(
            "run.secondary",
            format!("{:?}", run.secondary),
            "must differ from run.primary",
        ));
    }

    Ok(())
}
