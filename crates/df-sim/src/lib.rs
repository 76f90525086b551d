//! Dual-integrator projectile flight engine.
//!
//! Provides:
//! - Quadratic-drag projectile dynamics with wind
//! - Fixed-step RK4 and Dormand-Prince (5th order) steppers
//! - Ground bounce handling with a one-way settle transition
//! - Cumulative RK4/Dormand-Prince position divergence
//! - Step driver emitting snapshots to an external renderer
//! - Fixed-timestep accumulator and step-refinement study

pub mod bounce;
pub mod divergence;
pub mod error;
pub mod integrator;
pub mod model;
pub mod pacing;
pub mod params;
pub mod render;
pub mod sim;
pub mod state;
pub mod study;
pub mod tableau;

// Re-exports for public API
pub use bounce::{Motion, resolve_ground_contact};
pub use divergence::{DivergenceAccumulator, position_gap};
pub use error::{SimError, SimResult};
pub use integrator::{DormandPrince, Rk4, Stepper, StepperKind};
pub use model::{derivatives, drag_acceleration};
pub use pacing::StepAccumulator;
pub use params::{Launch, Parameters, ParametersBuilder};
pub use render::Renderer;
pub use sim::{ClockPolicy, SimOptions, Simulation, Snapshot, Track, TrackView};
pub use state::{Position, State, position_of, state};
pub use study::{MAX_LEVELS, RefinementLevel, free_flight, refinement_study};
