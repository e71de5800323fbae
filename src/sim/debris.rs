//! Short-lived cosmetic fragments

use glam::{Vec2, Vec3};

use super::entity::Body;
use super::rng::GameRng;
use crate::consts::*;
use crate::renderer::Vertex;
use crate::renderer::shapes;
use crate::{Rgba8, polar_degrees, polar_degrees_xy, range_map};

/// Debris fades out over its lifespan and is never collided
#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    base_color: Rgba8,
    lifespan: f32,
    /// Local-space triangle fan baked at create time
    local_visual: Vec<Vertex>,
}

impl Debris {
    pub fn new(base_color: Rgba8, lifespan: f32) -> Self {
        Self {
            base_color,
            lifespan,
            local_visual: Vec::new(),
        }
    }

    pub fn body(position: Vec3) -> Body {
        Body::new(position).with_radii(DEBRIS_COSMETIC_RADIUS * 0.5, DEBRIS_COSMETIC_RADIUS)
    }

    /// Random shard shape, spin and outward velocity
    pub fn create(&mut self, body: &mut Body, rng: &mut GameRng) {
        let step = 360.0 / DEBRIS_CORNERS as f32;
        let corners: Vec<Vec2> = (0..DEBRIS_CORNERS)
            .map(|i| {
                let length =
                    rng.float_in_range(body.cosmetic_radius * 0.25, body.cosmetic_radius);
                polar_degrees(step * i as f32, length)
            })
            .collect();

        body.angular_velocity = rng.float_in_range(-DEBRIS_MAX_SPIN, DEBRIS_MAX_SPIN);
        body.angle_degrees = rng.float_less_than(360.0);
        body.velocity = polar_degrees_xy(
            body.angle_degrees,
            rng.float_in_range(DEBRIS_MIN_SPEED, DEBRIS_MAX_SPEED),
        );
        body.color = self.current_color(0.0);

        self.local_visual = shapes::fan(&corners, body.color);
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        if body.age > self.lifespan {
            Self::die(body);
        }
        body.color = self.current_color(body.age);
        body.integrate(dt);
    }

    pub fn die(body: &mut Body) {
        body.dead = true;
        body.garbage = true;
    }

    /// Opacity (0-1) at `age`; linear from half opacity to transparent
    pub fn alpha(&self, age: f32) -> f32 {
        range_map(0.0, self.lifespan, DEBRIS_START_ALPHA, 0.0, age).clamp(0.0, 1.0)
    }

    fn current_color(&self, age: f32) -> Rgba8 {
        self.base_color.with_alpha_fraction(self.alpha(age))
    }

    pub fn local_visual(&self) -> &[Vertex] {
        &self.local_visual
    }
}
