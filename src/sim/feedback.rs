//! Screen shake and controller vibration accumulators
//!
//! Sources add a magnitude; once per frame (on the raw, untransformed dt) the
//! magnitudes decay linearly toward zero.

use glam::Vec2;

use super::rng::GameRng;
use crate::consts::{
    CONTROLLER_VIBRATION_ABLATION_PER_SECOND, MAX_SCREEN_SHAKE, SCREEN_SHAKE_ABLATION_PER_SECOND,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    shake: f32,
    vibration_left: f32,
    vibration_right: f32,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shake(&self) -> f32 {
        self.shake
    }

    pub fn vibration(&self) -> (f32, f32) {
        (self.vibration_left, self.vibration_right)
    }

    /// Add (or with a negative amount, remove) shake; result stays in [0, 1]
    pub fn add_screen_shake(&mut self, amount: f32) {
        self.shake = (self.shake + amount).clamp(0.0, 1.0);
    }

    /// Add to both motors; results stay in [0, 1]
    pub fn add_vibration(&mut self, left: f32, right: f32) {
        self.vibration_left = (self.vibration_left + left).clamp(0.0, 1.0);
        self.vibration_right = (self.vibration_right + right).clamp(0.0, 1.0);
    }

    /// Decay shake, returning this frame's camera offset. The offset scales
    /// with magnitude squared and is zero once the shake has run out.
    pub fn ablate_shake(&mut self, dt: f32, rng: &mut GameRng) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }

        let offset = Vec2::new(
            rng.float_in_range(-MAX_SCREEN_SHAKE, MAX_SCREEN_SHAKE),
            rng.float_in_range(-MAX_SCREEN_SHAKE, MAX_SCREEN_SHAKE),
        ) * self.shake
            * self.shake;
        self.shake = (self.shake - SCREEN_SHAKE_ABLATION_PER_SECOND * dt).max(0.0);
        offset
    }

    /// Decay vibration, returning the (left, right) strength to forward to
    /// the device this frame (the value before decay)
    pub fn ablate_vibration(&mut self, dt: f32) -> (f32, f32) {
        let current = self.vibration();
        let decay = CONTROLLER_VIBRATION_ABLATION_PER_SECOND * dt;
        self.vibration_left = (self.vibration_left - decay).max(0.0);
        self.vibration_right = (self.vibration_right - decay).max(0.0);
        current
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_clamped() {
        let mut feedback = Feedback::new();
        feedback.add_screen_shake(0.75);
        feedback.add_screen_shake(0.75);
        assert_eq!(feedback.shake(), 1.0);
        feedback.add_screen_shake(-5.0);
        assert_eq!(feedback.shake(), 0.0);
    }

    #[test]
    fn test_shake_offset_quadratic() {
        let mut rng = GameRng::new(4);
        let mut feedback = Feedback::new();
        feedback.add_screen_shake(0.5);
        let offset = feedback.ablate_shake(0.1, &mut rng);
        let bound = MAX_SCREEN_SHAKE * 0.25;
        assert!(offset.x.abs() <= bound && offset.y.abs() <= bound);
        assert!((feedback.shake() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_shake_runs_out() {
        let mut rng = GameRng::new(4);
        let mut feedback = Feedback::new();
        feedback.add_screen_shake(0.05);
        feedback.ablate_shake(0.1, &mut rng);
        assert_eq!(feedback.shake(), 0.0);
        assert_eq!(feedback.ablate_shake(0.1, &mut rng), Vec2::ZERO);
    }

    #[test]
    fn test_vibration_forwarded_then_decays() {
        let mut feedback = Feedback::new();
        feedback.add_vibration(0.75, 0.1);
        assert_eq!(feedback.ablate_vibration(0.1), (0.75, 0.1));
        let (left, right) = feedback.vibration();
        assert!((left - 0.7).abs() < 1e-6);
        assert!((right - 0.05).abs() < 1e-6);

        feedback.ablate_vibration(1.0);
        assert_eq!(feedback.vibration(), (0.0, 0.0));
    }
}
