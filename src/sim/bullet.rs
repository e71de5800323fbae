//! Player bullets

use glam::Vec3;

use super::entity::{Body, GameEvent};
use crate::consts::*;
use crate::palette::BULLET_HEAD_COLOR;
use crate::polar_degrees_xy;

/// Bullets carry no state beyond their body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bullet;

impl Bullet {
    /// Bullet travelling along `degrees` at full speed
    pub fn body(position: Vec3, degrees: f32) -> Body {
        let mut body = Body::new(position)
            .with_radii(
                BULLET_PHYSICS_RADIUS * BULLET_SCALE,
                BULLET_COSMETIC_RADIUS * BULLET_SCALE,
            )
            .with_color(BULLET_HEAD_COLOR);
        body.scale = BULLET_SCALE;
        body.angle_degrees = degrees;
        body.velocity = polar_degrees_xy(degrees, BULLET_SPEED);
        body
    }

    pub fn update(&mut self, body: &mut Body, dt: f32, wraps: bool) {
        if body.dead {
            body.garbage = true;
            return;
        }

        if body.is_offscreen() {
            if wraps {
                body.wrap();
            } else {
                body.garbage = true;
                return;
            }
        }

        body.integrate(dt);
    }

    pub fn die(body: &mut Body, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::DebrisBurst {
            position: body.position,
            color: BULLET_HEAD_COLOR,
            count: 3,
            lifespan: MAX_DEBRIS_LIFESPAN,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_flies_along_heading() {
        let mut body = Bullet::body(Vec3::new(100.0, 50.0, 0.0), 90.0);
        Bullet.update(&mut body, 0.1, false);
        assert!((body.position.y - (50.0 + BULLET_SPEED * 0.1)).abs() < 1e-3);
        assert!((body.position.x - 100.0).abs() < 1e-3);
        assert_eq!(body.physics_radius, 0.625);
    }

    #[test]
    fn test_bullet_leaving_world_is_garbage() {
        let mut body = Bullet::body(Vec3::new(-20.0, 50.0, 0.0), 180.0);
        Bullet.update(&mut body, 0.1, false);
        assert!(body.garbage);
        assert_eq!(body.position.x, -20.0);
    }

    #[test]
    fn test_wrapping_bullet_keeps_moving() {
        let mut body = Bullet::body(Vec3::new(-20.0, 50.0, 0.0), 180.0);
        Bullet.update(&mut body, 0.1, true);
        assert!(!body.garbage);
        let wrapped_x = WORLD_SIZE_X + MAX_SCREEN_SHAKE + BULLET_COSMETIC_RADIUS * BULLET_SCALE;
        assert!((body.position.x - (wrapped_x - BULLET_SPEED * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_die_bursts_three_pieces() {
        let mut body = Bullet::body(Vec3::ZERO, 0.0);
        let mut events = Vec::new();
        Bullet::die(&mut body, &mut events);
        assert!(matches!(events[0], GameEvent::DebrisBurst { count: 3, .. }));
    }
}
