//! Asteroids: irregular drifting rocks

use glam::{Vec2, Vec3};

use super::entity::{Body, GameEvent};
use super::rng::GameRng;
use crate::consts::*;
use crate::palette::ASTEROID_COLOR;
use crate::{polar_degrees, polar_degrees_xy};

/// Outline corners, generated once at create time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Asteroid {
    corners: Vec<Vec2>,
}

impl Asteroid {
    pub fn body(position: Vec3) -> Body {
        Body::new(position)
            .with_radii(ASTEROID_PHYSICS_RADIUS, ASTEROID_COSMETIC_RADIUS)
            .with_health(ASTEROID_HEALTH)
            .with_color(ASTEROID_COLOR)
    }

    /// Jagged outline between the physics and cosmetic radii, random heading
    /// and spin
    pub fn create(&mut self, body: &mut Body, rng: &mut GameRng) {
        let step = 360.0 / ASTEROID_CORNERS as f32;
        self.corners = (0..ASTEROID_CORNERS)
            .map(|i| {
                let length = rng.float_in_range(body.physics_radius, body.cosmetic_radius);
                polar_degrees(step * i as f32, length)
            })
            .collect();

        body.velocity = polar_degrees_xy(rng.float_in_range(0.0, 360.0), ASTEROID_SPEED);
        body.angular_velocity = rng.float_in_range(-ASTEROID_MAX_ROTATION, ASTEROID_MAX_ROTATION);
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
            }
            return;
        }

        body.color = body.flash_color(ASTEROID_COLOR);
        body.integrate(dt);
    }

    pub fn die(body: &mut Body, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::ScreenShake(0.25));
        events.push(GameEvent::Vibration {
            left: 0.35,
            right: 0.1,
        });
        events.push(GameEvent::DebrisBurst {
            position: body.position,
            color: ASTEROID_COLOR,
            count: 30,
            lifespan: MAX_DEBRIS_LIFESPAN,
        });
    }

    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }
}
