//! Ground contact and the per-track settle transition.

use crate::params::Parameters;
use crate::state::{State, VY, Y};

/// Motion state of one integrator track. `Running -> Settled` is one-way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Motion {
    #[default]
    Running,
    Settled,
}

impl Motion {
    pub fn is_running(self) -> bool {
        matches!(self, Motion::Running)
    }
}

/// Apply ground collision to a post-step state.
///
/// Below ground the projectile is put back on `y = 0`, a downward vertical
/// velocity is reflected and damped by the restitution, and the track settles
/// once the remaining vertical speed drops under the threshold. Above ground
/// the state passes through untouched.
pub fn resolve_ground_contact(mut s: State, params: &Parameters) -> (State, Motion) {
    if s[Y] >= 0.0 {
        return (s, Motion::Running);
    }

    s[Y] = 0.0;
    if s[VY] < 0.0 {
        s[VY] = -params.restitution() * s[VY];
    }

    let motion = if s[VY].abs() < params.min_speed_threshold() {
        Motion::Settled
    } else {
        Motion::Running
    };
    (s, motion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::state;
    use df_core::units::mps;

    fn params(e: f64, threshold: f64) -> Parameters {
        Parameters::builder()
            .restitution(e)
            .min_speed_threshold(mps(threshold))
            .build()
            .unwrap()
    }

    #[test]
    fn slow_impact_settles() {
        let p = params(0.8, 0.5);
        let (s, motion) = resolve_ground_contact(state(4.0, -0.01, 2.0, -0.3), &p);
        assert_eq!(s[Y], 0.0);
        assert!((s[VY] - 0.24).abs() < 1e-12);
        assert_eq!(s[0], 4.0);
        assert_eq!(s[2], 2.0);
        assert_eq!(motion, Motion::Settled);
    }

    #[test]
    fn fast_impact_bounces() {
        let p = params(0.8, 0.5);
        let (s, motion) = resolve_ground_contact(state(0.0, -0.2, 1.0, -10.0), &p);
        assert_eq!(s[Y], 0.0);
        assert!((s[VY] - 8.0).abs() < 1e-12);
        assert_eq!(motion, Motion::Running);
    }

    #[test]
    fn elastic_bounce_keeps_speed() {
        let p = params(1.0, 0.5);
        let (s, _) = resolve_ground_contact(state(0.0, -0.05, 0.0, -17.25), &p);
        assert!((s[VY] - 17.25).abs() < 1e-12);
    }

    #[test]
    fn above_ground_passes_through() {
        let p = params(0.8, 0.5);
        let s0 = state(1.0, 0.0, 3.0, -0.1);
        let (s, motion) = resolve_ground_contact(s0, &p);
        assert_eq!(s, s0);
        assert_eq!(motion, Motion::Running);
    }

    #[test]
    fn below_ground_moving_up_is_only_lifted() {
        let p = params(0.8, 0.5);
        let (s, motion) = resolve_ground_contact(state(1.0, -0.1, 0.0, 3.0), &p);
        assert_eq!(s[Y], 0.0);
        assert_eq!(s[VY], 3.0);
        assert_eq!(motion, Motion::Running);
    }

    #[test]
    fn zero_restitution_settles_immediately() {
        let p = params(0.0, 0.5);
        let (s, motion) = resolve_ground_contact(state(1.0, -0.1, 5.0, -30.0), &p);
        assert_eq!(s[VY], 0.0);
        assert_eq!(motion, Motion::Settled);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::state::state;
    use df_core::units::mps;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn contact_never_leaves_body_below_ground(
            y in -5.0_f64..5.0,
            vy in -100.0_f64..100.0,
            e in 0.0_f64..=1.0,
        ) {
            let p = Parameters::builder()
                .restitution(e)
                .min_speed_threshold(mps(0.5))
                .build()
                .unwrap();
            let (s, _) = resolve_ground_contact(state(0.0, y, 1.0, vy), &p);
            prop_assert!(s[Y] >= 0.0);
            if y < 0.0 {
                prop_assert!(s[VY].abs() <= vy.abs() + 1e-12);
            }
        }
    }
}
