//! Projectile state vectors.
//!
//! A `State` is `(x, y, vx, vy)` in meters and meters per second; `Position`
//! is the `(x, y)` part. Both are plain nalgebra vectors so steppers get
//! component-wise arithmetic for free.

use nalgebra::{Vector2, Vector4};

pub type State = Vector4<f64>;
pub type Position = Vector2<f64>;

pub const X: usize = 0;
pub const Y: usize = 1;
pub const VX: usize = 2;
pub const VY: usize = 3;

#[inline]
pub fn state(x: f64, y: f64, vx: f64, vy: f64) -> State {
    State::new(x, y, vx, vy)
}

#[inline]
pub fn position_of(s: &State) -> Position {
    Position::new(s[X], s[Y])
}

#[inline]
pub fn velocity_of(s: &State) -> Vector2<f64> {
    Vector2::new(s[VX], s[VY])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_split() {
        let s = state(1.0, 2.0, 3.0, 4.0);
        assert_eq!(position_of(&s), Position::new(1.0, 2.0));
        assert_eq!(velocity_of(&s), Vector2::new(3.0, 4.0));
    }
}
