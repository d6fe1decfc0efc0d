//! Horizontal scroll camera with inertia.
//!
//! Arrow keys push velocity, friction bleeds it off, and both the
//! velocity and the position are clamped. Motion is stepped once per
//! frame rather than scaled by delta time, matching the rest of the
//! per-frame movement in the simulation.

use crate::world::{WORLD_MAX_X, WORLD_MIN_X};

/// Velocity gained per frame while a scroll key is held.
const ACCEL_RATE: f32 = 0.85;
/// Multiplicative damping applied every frame.
const FRICTION: f32 = 0.95;
/// Scroll speed cap in pixels per frame.
const MAX_SPEED: f32 = 60.0;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub x: f32,
    pub velocity: f32,
    moving_left: bool,
    moving_right: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            velocity: 0.0,
            moving_left: false,
            moving_right: false,
        }
    }

    /// Record this frame's held scroll keys. Consumed by `advance`.
    pub fn apply_intent(&mut self, left: bool, right: bool) {
        self.moving_left = left;
        self.moving_right = right;
    }

    /// Integrate one frame of scroll motion. Holding both keys cancels out.
    pub fn advance(&mut self) {
        if self.moving_right {
            self.velocity += ACCEL_RATE;
        }
        if self.moving_left {
            self.velocity -= ACCEL_RATE;
        }
        self.velocity *= FRICTION;
        self.velocity = self.velocity.clamp(-MAX_SPEED, MAX_SPEED);
        self.x = (self.x + self.velocity).clamp(WORLD_MIN_X, WORLD_MAX_X);
        self.moving_left = false;
        self.moving_right = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_and_velocity_stay_bounded() {
        let mut cam = Camera::new();
        for _ in 0..2000 {
            cam.apply_intent(false, true);
            cam.advance();
            assert!(cam.velocity <= MAX_SPEED);
            assert!(cam.x <= WORLD_MAX_X);
        }
        assert_eq!(cam.x, WORLD_MAX_X);

        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..5000 {
            cam.apply_intent(rng.bool(), rng.bool());
            cam.advance();
            assert!(cam.velocity.abs() <= MAX_SPEED);
            assert!(cam.x >= WORLD_MIN_X && cam.x <= WORLD_MAX_X);
        }
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut cam = Camera::new();
        for _ in 0..100 {
            cam.apply_intent(true, true);
            cam.advance();
        }
        assert_eq!(cam.velocity, 0.0);
        assert_eq!(cam.x, 0.0);
    }

    #[test]
    fn friction_brings_scroll_to_rest() {
        let mut cam = Camera::new();
        for _ in 0..60 {
            cam.apply_intent(false, true);
            cam.advance();
        }
        assert!(cam.velocity > 0.0);
        for _ in 0..2000 {
            cam.advance();
        }
        assert!(cam.velocity.abs() < 1e-3);
    }

    #[test]
    fn intents_only_last_one_frame() {
        let mut cam = Camera::new();
        cam.apply_intent(false, true);
        cam.advance();
        let after_push = cam.velocity;
        cam.advance();
        assert!(cam.velocity < after_push);
    }
}
