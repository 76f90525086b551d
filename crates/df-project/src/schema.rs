//! Scenario schema definitions.
//!
//! Every section and field is optional in YAML; omitted values fall back to
//! the reference launch (50 m/s at 45 degrees from 1 m, 3 kg sphere of 10 cm,
//! 20 m/s headwind).

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub launch: LaunchDef,
    #[serde(default)]
    pub projectile: ProjectileDef,
    #[serde(default)]
    pub environment: EnvironmentDef,
    #[serde(default)]
    pub bounce: BounceDef,
    #[serde(default)]
    pub run: RunDef,
}

fn default_version() -> u32 {
    LATEST_VERSION
}

fn default_name() -> String {
    "cannon".to_string()
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: default_name(),
            launch: LaunchDef::default(),
            projectile: ProjectileDef::default(),
            environment: EnvironmentDef::default(),
            bounce: BounceDef::default(),
            run: RunDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LaunchDef {
    pub x0_m: f64,
    pub y0_m: f64,
    pub speed_mps: f64,
    /// Elevation above the +x axis.
    pub angle_deg: f64,
}

impl Default for LaunchDef {
    fn default() -> Self {
        Self {
            x0_m: 0.0,
            y0_m: 1.0,
            speed_mps: 50.0,
            angle_deg: 45.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectileDef {
    pub mass_kg: f64,
    pub diameter_m: f64,
}

impl Default for ProjectileDef {
    fn default() -> Self {
        Self {
            mass_kg: 3.0,
            diameter_m: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentDef {
    pub gravity_mps2: f64,
    pub air_density_kgpm3: f64,
    pub drag_coefficient: f64,
    pub wind: WindDef,
}

impl Default for EnvironmentDef {
    fn default() -> Self {
        Self {
            gravity_mps2: df_core::constants::G_MPS2,
            air_density_kgpm3: df_core::constants::RHO_AIR_KGPM3,
            drag_coefficient: df_core::constants::CD_SPHERE,
            wind: WindDef::default(),
        }
    }
}

/// Wind as a signed speed along a direction (0 = +x, 90 = +y).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindDef {
    pub speed_mps: f64,
    pub direction_deg: f64,
}

impl Default for WindDef {
    fn default() -> Self {
        Self {
            speed_mps: -20.0,
            direction_deg: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BounceDef {
    pub restitution: f64,
    pub min_speed_mps: f64,
}

impl Default for BounceDef {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            min_speed_mps: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClockDef {
    #[default]
    FreezeWhenSettled,
    Continuous,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepperDef {
    Rk4,
    #[serde(alias = "dormand_prince")]
    Dopri5,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunDef {
    pub time_step_s: f64,
    pub clock: ClockDef,
    /// Render rate; one physics step per frame unless the renderer paces in real time.
    pub frame_rate_hz: f64,
    pub primary: StepperDef,
    pub secondary: StepperDef,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            time_step_s: 0.01,
            clock: ClockDef::default(),
            frame_rate_hz: 60.0,
            primary: StepperDef::Rk4,
            secondary: StepperDef::Dopri5,
        }
    }
}
