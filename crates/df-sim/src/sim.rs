//! Simulation driver: two integrator tracks stepped side by side.

use tracing::{debug, trace};

use crate::bounce::{Motion, resolve_ground_contact};
use crate::divergence::DivergenceAccumulator;
use crate::error::SimResult;
use crate::integrator::{Stepper, StepperKind};
use crate::params::{Launch, Parameters};
use crate::render::Renderer;
use crate::state::{Position, State, position_of};

/// How the simulation clock behaves once tracks settle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockPolicy {
    /// Time advances only while at least one track is running.
    #[default]
    FreezeWhenSettled,
    /// Time advances every step, even after both tracks have settled.
    Continuous,
}

/// Options for a simulation run.
#[derive(Clone, Copy, Debug)]
pub struct SimOptions {
    /// Stepper for the first track (default: RK4)
    pub primary: StepperKind,
    /// Stepper for the second track (default: Dormand-Prince)
    pub secondary: StepperKind,
    pub clock: ClockPolicy,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            primary: StepperKind::Rk4,
            secondary: StepperKind::DormandPrince,
            clock: ClockPolicy::default(),
        }
    }
}

/// One integrator's state, motion and trajectory.
#[derive(Clone, Debug)]
pub struct Track {
    stepper: StepperKind,
    state: State,
    motion: Motion,
    trajectory: Vec<Position>,
}

impl Track {
    fn new(stepper: StepperKind, initial: State) -> Self {
        Self {
            stepper,
            state: initial,
            motion: Motion::Running,
            trajectory: Vec::new(),
        }
    }

    pub fn stepper(&self) -> StepperKind {
        self.stepper
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn position(&self) -> Position {
        position_of(&self.state)
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn trajectory(&self) -> &[Position] {
        &self.trajectory
    }

    /// Step, resolve ground contact and record the new position.
    /// A settled track is left untouched.
    fn advance(&mut self, params: &Parameters, t: f64) {
        if !self.motion.is_running() {
            return;
        }
        let next = self.stepper.step(&self.state, params.time_step(), params);
        let (next, motion) = resolve_ground_contact(next, params);
        self.state = next;
        self.trajectory.push(position_of(&next));
        if motion == Motion::Settled {
            debug!(
                stepper = self.stepper.label(),
                t,
                x = next[0],
                "track settled"
            );
            self.motion = Motion::Settled;
        }
    }

    fn view(&self) -> TrackView<'_> {
        TrackView {
            stepper: self.stepper,
            state: self.state,
            motion: self.motion,
            trajectory: &self.trajectory,
        }
    }
}

/// Read-only view of a track inside a snapshot.
#[derive(Clone, Copy, Debug)]
pub struct TrackView<'a> {
    pub stepper: StepperKind,
    pub state: State,
    pub motion: Motion,
    pub trajectory: &'a [Position],
}

impl TrackView<'_> {
    pub fn position(&self) -> Position {
        position_of(&self.state)
    }
}

/// Everything the renderer needs for one frame, in simulation units.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    /// Steps taken so far.
    pub step: u64,
    /// Simulation time (s).
    pub sim_time: f64,
    /// Cumulative position gap between the tracks (m).
    pub divergence_total: f64,
    pub primary: TrackView<'a>,
    pub secondary: TrackView<'a>,
}

impl<'a> Snapshot<'a> {
    /// View of the track driven by `kind`, primary first.
    pub fn track(&self, kind: StepperKind) -> Option<&TrackView<'a>> {
        [&self.primary, &self.secondary]
            .into_iter()
            .find(|t| t.stepper == kind)
    }

    pub fn all_settled(&self) -> bool {
        !self.primary.motion.is_running() && !self.secondary.motion.is_running()
    }
}

/// Dual-integrator simulation of one launch.
#[derive(Clone, Debug)]
pub struct Simulation {
    params: Parameters,
    clock: ClockPolicy,
    primary: Track,
    secondary: Track,
    time: f64,
    steps: u64,
    divergence: DivergenceAccumulator,
}

impl Simulation {
    /// Both tracks start from the launch state.
    pub fn new(params: Parameters, launch: &Launch, opts: SimOptions) -> SimResult<Self> {
        let initial = launch.initial_state()?;
        Ok(Self::from_state(params, initial, opts))
    }

    /// Start both tracks from an explicit state.
    pub fn from_state(params: Parameters, initial: State, opts: SimOptions) -> Self {
        Self {
            params,
            clock: opts.clock,
            primary: Track::new(opts.primary, initial),
            secondary: Track::new(opts.secondary, initial),
            time: 0.0,
            steps: 0,
            divergence: DivergenceAccumulator::new(),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn divergence_total(&self) -> f64 {
        self.divergence.total()
    }

    pub fn primary(&self) -> &Track {
        &self.primary
    }

    pub fn secondary(&self) -> &Track {
        &self.secondary
    }

    pub fn any_running(&self) -> bool {
        self.primary.motion.is_running() || self.secondary.motion.is_running()
    }

    pub fn all_settled(&self) -> bool {
        !self.any_running()
    }

    /// Advance one simulation step and return the resulting snapshot.
    pub fn step(&mut self) -> Snapshot<'_> {
        let running = self.any_running();
        if running {
            let t_next = self.time + self.params.time_step();
            self.primary.advance(&self.params, t_next);
            self.secondary.advance(&self.params, t_next);
        }

        if running || self.clock == ClockPolicy::Continuous {
            self.time += self.params.time_step();
        }

        let gap = self
            .divergence
            .record(&self.primary.position(), &self.secondary.position());
        self.steps += 1;
        trace!(
            step = self.steps,
            t = self.time,
            gap,
            total = self.divergence.total(),
            "step"
        );

        self.snapshot()
    }

    /// Run `n` steps back to back and return the final snapshot.
    /// With `n == 0` nothing advances.
    pub fn advance(&mut self, n: u32) -> Snapshot<'_> {
        for _ in 0..n {
            self.step();
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            step: self.steps,
            sim_time: self.time,
            divergence_total: self.divergence.total(),
            primary: self.primary.view(),
            secondary: self.secondary.view(),
        }
    }

    /// Step and present until the renderer asks to stop.
    ///
    /// Settling does not end the loop; frozen snapshots keep being presented.
    /// Returns the number of frames presented.
    pub fn run<R: Renderer>(&mut self, renderer: &mut R) -> Result<u64, R::Error> {
        let mut frames = 0;
        while !renderer.stop_requested() {
            let snapshot = self.step();
            renderer.present(&snapshot)?;
            frames += 1;
        }
        Ok(frames)
    }
}
