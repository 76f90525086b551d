//! Projectile dynamics: gravity plus quadratic drag relative to the wind.

use nalgebra::Vector2;

use crate::params::Parameters;
use crate::state::{State, velocity_of};

/// Drag acceleration for a given ground-frame velocity.
///
/// Opposes the air-relative velocity with magnitude (k/m)|v_rel|^2. Zero when
/// the projectile moves with the wind.
pub fn drag_acceleration(velocity: &Vector2<f64>, params: &Parameters) -> Vector2<f64> {
    let v_rel = velocity - params.wind();
    let speed_rel = v_rel.norm();
    if speed_rel > 0.0 {
        -(params.drag_scale() / params.mass()) * speed_rel * v_rel
    } else {
        Vector2::zeros()
    }
}

/// Time derivative of `(x, y, vx, vy)`: `(vx, vy, ax, ay)`.
pub fn derivatives(s: &State, params: &Parameters) -> State {
    let v = velocity_of(s);
    let drag = drag_acceleration(&v, params);
    State::new(v.x, v.y, drag.x, drag.y - params.gravity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::state;
    use df_core::units::mps;

    fn calm(cd: f64) -> Parameters {
        Parameters::builder().drag_coefficient(cd).build().unwrap()
    }

    #[test]
    fn no_drag_is_pure_gravity() {
        let p = calm(0.0);
        let d = derivatives(&state(3.0, 4.0, 10.0, -2.0), &p);
        assert_eq!(d, State::new(10.0, -2.0, 0.0, -9.81));
    }

    #[test]
    fn drag_opposes_relative_velocity() {
        let p = calm(0.47);
        let a = drag_acceleration(&Vector2::new(30.0, 0.0), &p);
        let expected = -(p.drag_scale() / p.mass()) * 30.0 * 30.0;
        assert!((a.x - expected).abs() < 1e-12);
        assert_eq!(a.y, 0.0);
        assert!(a.x < 0.0);
    }

    #[test]
    fn moving_with_wind_has_no_drag() {
        let p = Parameters::builder()
            .wind(mps(-20.0), mps(0.0))
            .build()
            .unwrap();
        let a = drag_acceleration(&Vector2::new(-20.0, 0.0), &p);
        assert_eq!(a, Vector2::zeros());
        let d = derivatives(&state(0.0, 5.0, -20.0, 0.0), &p);
        assert!(d.iter().all(|c| c.is_finite()));
        assert_eq!(d[3], -p.gravity());
    }

    #[test]
    fn headwind_pushes_stationary_body() {
        let p = Parameters::builder()
            .wind(mps(-20.0), mps(0.0))
            .build()
            .unwrap();
        let a = drag_acceleration(&Vector2::zeros(), &p);
        assert!(a.x < 0.0);
    }
}
