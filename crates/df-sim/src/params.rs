//! Physical and numerical parameters for a single run.
//!
//! `Parameters` is built once through `ParametersBuilder`, validated, and then
//! only ever borrowed. `Launch` describes where and how the projectile leaves
//! the cannon.

use df_core::units::{Accel, Angle, Density, Length, Mass, Time, Velocity, constants};
use df_core::{ensure_finite, ensure_non_negative, ensure_positive, ensure_unit_interval};
use nalgebra::Vector2;
use uom::si::acceleration::meter_per_second_squared;
use uom::si::angle::radian;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

use crate::error::SimResult;
use crate::state::{State, state};

/// Immutable run configuration, SI units throughout.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    mass: f64,
    radius: f64,
    drag_coefficient: f64,
    air_density: f64,
    gravity: f64,
    wind: Vector2<f64>,
    restitution: f64,
    min_speed_threshold: f64,
    time_step: f64,
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Projectile mass (kg).
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Projectile radius (m).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    /// Air density (kg/m^3).
    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    /// Gravitational acceleration magnitude (m/s^2), acting along -y.
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Wind velocity (m/s).
    pub fn wind(&self) -> Vector2<f64> {
        self.wind
    }

    /// Fraction of vertical speed kept after a ground bounce.
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Post-bounce vertical speed below which motion is settled (m/s).
    pub fn min_speed_threshold(&self) -> f64 {
        self.min_speed_threshold
    }

    /// Fixed integration step (s).
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Cross-sectional area pi * r^2 (m^2).
    pub fn cross_section_area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Quadratic drag scale k = 0.5 * Cd * rho * A (kg/m).
    pub fn drag_scale(&self) -> f64 {
        0.5 * self.drag_coefficient * self.air_density * self.cross_section_area()
    }

    /// Same configuration with a different step size.
    pub fn with_time_step(&self, time_step: f64) -> SimResult<Self> {
        let mut out = self.clone();
        out.time_step = ensure_positive(time_step, "time_step")?;
        Ok(out)
    }

    fn validate(&self) -> SimResult<()> {
        ensure_positive(self.mass, "mass")?;
        ensure_positive(self.radius, "radius")?;
        ensure_non_negative(self.drag_coefficient, "drag_coefficient")?;
        ensure_non_negative(self.air_density, "air_density")?;
        ensure_positive(self.gravity, "gravity")?;
        ensure_finite(self.wind.x, "wind.x")?;
        ensure_finite(self.wind.y, "wind.y")?;
        ensure_unit_interval(self.restitution, "restitution")?;
        ensure_non_negative(self.min_speed_threshold, "min_speed_threshold")?;
        ensure_positive(self.time_step, "time_step")?;
        Ok(())
    }
}

/// Typed builder for `Parameters`.
///
/// Defaults describe a 3 kg, 10 cm sphere in sea-level air with no wind,
/// bouncing with restitution 0.8 and settling under 0.5 m/s, stepped at 10 ms.
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self {
            params: Parameters {
                mass: 3.0,
                radius: 0.05,
                drag_coefficient: constants::CD_SPHERE,
                air_density: constants::RHO_AIR_KGPM3,
                gravity: constants::G_MPS2,
                wind: Vector2::zeros(),
                restitution: 0.8,
                min_speed_threshold: 0.5,
                time_step: 0.01,
            },
        }
    }
}

impl ParametersBuilder {
    pub fn mass(mut self, mass: Mass) -> Self {
        self.params.mass = mass.get::<kilogram>();
        self
    }

    pub fn radius(mut self, radius: Length) -> Self {
        self.params.radius = radius.get::<meter>();
        self
    }

    pub fn diameter(mut self, diameter: Length) -> Self {
        self.params.radius = 0.5 * diameter.get::<meter>();
        self
    }

    pub fn drag_coefficient(mut self, cd: f64) -> Self {
        self.params.drag_coefficient = cd;
        self
    }

    pub fn air_density(mut self, rho: Density) -> Self {
        self.params.air_density = rho.get::<kilogram_per_cubic_meter>();
        self
    }

    pub fn gravity(mut self, g: Accel) -> Self {
        self.params.gravity = g.get::<meter_per_second_squared>();
        self
    }

    /// Wind as explicit (x, y) components.
    pub fn wind(mut self, wx: Velocity, wy: Velocity) -> Self {
        self.params.wind = Vector2::new(wx.get::<meter_per_second>(), wy.get::<meter_per_second>());
        self
    }

    /// Wind as speed plus direction; 0 points along +x, a quarter turn along +y.
    pub fn wind_from(mut self, speed: Velocity, direction: Angle) -> Self {
        let v = speed.get::<meter_per_second>();
        let theta = direction.get::<radian>();
        self.params.wind = Vector2::new(v * theta.cos(), v * theta.sin());
        self
    }

    pub fn restitution(mut self, e: f64) -> Self {
        self.params.restitution = e;
        self
    }

    pub fn min_speed_threshold(mut self, v: Velocity) -> Self {
        self.params.min_speed_threshold = v.get::<meter_per_second>();
        self
    }

    pub fn time_step(mut self, dt: Time) -> Self {
        self.params.time_step = dt.get::<second>();
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> SimResult<Parameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Launch position, speed and elevation angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub x0: Length,
    pub y0: Length,
    pub speed: Velocity,
    pub angle: Angle,
}

impl Launch {
    pub fn new(x0: Length, y0: Length, speed: Velocity, angle: Angle) -> Self {
        Self {
            x0,
            y0,
            speed,
            angle,
        }
    }

    /// Initial state `(x0, y0, v0 cos(theta), v0 sin(theta))`.
    pub fn initial_state(&self) -> SimResult<State> {
        let x0 = ensure_finite(self.x0.get::<meter>(), "launch.x0")?;
        let y0 = ensure_finite(self.y0.get::<meter>(), "launch.y0")?;
        let v0 = ensure_non_negative(self.speed.get::<meter_per_second>(), "launch.speed")?;
        let theta = ensure_finite(self.angle.get::<radian>(), "launch.angle")?;
        Ok(state(x0, y0, v0 * theta.cos(), v0 * theta.sin()))
    }
}
