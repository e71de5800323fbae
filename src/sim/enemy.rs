//! Homing enemies: Beetles and Wasps
//!
//! Both spawn just outside the world and home in on the living player. They
//! despawn (without dying) if they leave the world after having entered it.

use glam::Vec3;

use super::entity::{Body, GameEvent, PlayerHandle, UpdateContext};
use crate::consts::*;
use crate::palette::{BEETLE_COLOR, WASP_COLOR};
use crate::{atan2_degrees, clamp_length, polar_degrees_xy};

/// Keep the held target if it is still alive, otherwise re-acquire the
/// current living player. Returns the target's position.
fn acquire_target(target: &mut Option<PlayerHandle>, ctx: &UpdateContext<'_>) -> Option<Vec3> {
    if let Some(handle) = *target {
        if let Some(position) = ctx.resolve(handle) {
            return Some(position);
        }
    }
    *target = ctx.alive_player();
    if let Some(handle) = *target {
        log::trace!("Enemy acquired player slot {}", handle.slot());
    }
    target.and_then(|handle| ctx.resolve(handle))
}

/// Track world entry; returns true once an entered enemy has left again
fn left_world(entered: &mut bool, body: &Body) -> bool {
    let offscreen = body.is_offscreen();
    if !offscreen {
        *entered = true;
    }
    *entered && offscreen
}

/// Slow walker that heads straight for the player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beetle {
    target: Option<PlayerHandle>,
    entered: bool,
}

impl Beetle {
    pub fn body(position: Vec3) -> Body {
        Body::new(position)
            .with_radii(BEETLE_PHYSICS_RADIUS, BEETLE_COSMETIC_RADIUS)
            .with_health(BEETLE_HEALTH)
            .with_color(BEETLE_COLOR)
    }

    pub fn target(&self) -> Option<PlayerHandle> {
        self.target
    }

    pub fn update(&mut self, body: &mut Body, dt: f32, ctx: &mut UpdateContext<'_>) {
        if body.dead {
            body.garbage = true;
            return;
        }
        if left_world(&mut self.entered, body) {
            body.garbage = true;
            return;
        }

        body.color = body.flash_color(BEETLE_COLOR);

        let Some(target) = acquire_target(&mut self.target, ctx) else {
            body.age += dt;
            return;
        };

        let displacement = target - body.position;
        if displacement.length() > body.physics_radius * 0.5 {
            body.angle_degrees = atan2_degrees(displacement.y, displacement.x);
            body.velocity = polar_degrees_xy(body.angle_degrees, BEETLE_VELOCITY);
        } else {
            body.velocity = Vec3::ZERO;
        }

        body.integrate(dt);
    }

    pub fn die(body: &mut Body, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::ScreenShake(0.15));
        events.push(GameEvent::Vibration {
            left: 0.25,
            right: 0.1,
        });
        events.push(GameEvent::DebrisBurst {
            position: body.position,
            color: BEETLE_COLOR,
            count: 20,
            lifespan: MAX_DEBRIS_LIFESPAN,
        });
    }
}

/// Fast flyer that accelerates toward the player with a capped speed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wasp {
    target: Option<PlayerHandle>,
    entered: bool,
}

impl Wasp {
    pub fn body(position: Vec3) -> Body {
        Body::new(position)
            .with_radii(WASP_PHYSICS_RADIUS, WASP_COSMETIC_RADIUS)
            .with_health(WASP_HEALTH)
            .with_color(WASP_COLOR)
    }

    pub fn target(&self) -> Option<PlayerHandle> {
        self.target
    }

    pub fn update(&mut self, body: &mut Body, dt: f32, ctx: &mut UpdateContext<'_>) {
        if body.dead {
            body.garbage = true;
            return;
        }
        if left_world(&mut self.entered, body) {
            body.garbage = true;
            return;
        }

        body.color = body.flash_color(WASP_COLOR);

        let Some(target) = acquire_target(&mut self.target, ctx) else {
            body.age += dt;
            return;
        };

        let displacement = target - body.position;
        if displacement.length() > body.physics_radius * 0.5 {
            body.angle_degrees = atan2_degrees(displacement.y, displacement.x);
            body.acceleration =
                polar_degrees_xy(body.angle_degrees, WASP_ACCELERATION_PER_SECOND);
        } else {
            body.acceleration = Vec3::ZERO;
            body.velocity = Vec3::ZERO;
        }
        body.velocity = clamp_length(body.velocity, WASP_MAX_VELOCITY);

        body.integrate(dt);
    }

    /// Wasp impact feedback fires when the session removes it from its pool
    pub fn destroy(body: &Body, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::ScreenShake(0.1));
        events.push(GameEvent::Vibration {
            left: 0.1,
            right: 0.1,
        });
        events.push(GameEvent::DebrisBurst {
            position: body.position,
            color: WASP_COLOR,
            count: 14,
            lifespan: MAX_DEBRIS_LIFESPAN,
        });
    }
}
