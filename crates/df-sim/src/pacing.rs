//! Fixed-timestep accumulator for real-time pacing.
//!
//! By default the driver takes exactly one physics step per rendered frame.
//! When simulated time should track wall-clock time instead, the renderer
//! feeds elapsed frame time here and runs as many whole steps as have built up.

use df_core::ensure_positive;

use crate::error::{SimError, SimResult};

#[derive(Clone, Debug)]
pub struct StepAccumulator {
    dt: f64,
    carry: f64,
    max_steps_per_tick: u32,
}

impl StepAccumulator {
    pub fn new(dt: f64, max_steps_per_tick: u32) -> SimResult<Self> {
        let dt = ensure_positive(dt, "dt")?;
        if max_steps_per_tick == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps_per_tick must be positive",
            });
        }
        Ok(Self {
            dt,
            carry: 0.0,
            max_steps_per_tick,
        })
    }

    /// Bank `elapsed` seconds and return how many steps to run now.
    ///
    /// Excess time beyond `max_steps_per_tick` steps is dropped so a stalled
    /// frame cannot trigger an unbounded catch-up.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.carry += elapsed;
        }
        let due = (self.carry / self.dt).floor();
        if due >= self.max_steps_per_tick as f64 {
            self.carry = 0.0;
            self.max_steps_per_tick
        } else {
            self.carry -= due * self.dt;
            due as u32
        }
    }

    /// Fraction of a step currently banked, in [0, 1).
    pub fn alpha(&self) -> f64 {
        (self.carry / self.dt).clamp(0.0, 1.0)
    }
}
