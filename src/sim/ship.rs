//! The player ship

use glam::{Vec2, Vec3};

use super::entity::{Body, GameEvent, UpdateContext};
use crate::consts::*;
use crate::palette::PLAYER_SHIP_COLOR_1;
use crate::platform::{Button, InputSource, Key};
use crate::{polar_degrees_xy, range_map};

/// Player-only state. The ship lives in the session's fixed player slot and
/// is never pooled or garbage collected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerShip {
    /// Thrust held this frame
    pub thrusting: bool,
    /// Stick deflection (0-1) driving this frame's thrust, for exhaust length
    pub thrust_amount: f32,
    /// Random jitter applied to the exhaust tip while thrusting
    pub thrust_offset: Vec2,
}

impl PlayerShip {
    pub fn body(position: Vec3) -> Body {
        Body::new(position).with_radii(PLAYER_SHIP_PHYSICS_RADIUS, PLAYER_SHIP_COSMETIC_RADIUS)
    }

    pub fn update(&mut self, body: &mut Body, dt: f32, ctx: &mut UpdateContext<'_>) {
        if body.dead {
            return;
        }

        self.process_input(body, ctx.input, ctx.events);
        bounce_off_sides(body);

        let thrust = range_map(
            0.0,
            PLAYER_SHIP_ACCELERATION,
            0.0,
            1.0,
            body.acceleration.length(),
        );
        self.thrust_offset = Vec2::new(
            ctx.rng.float_in_range(-1.5, 0.5) * thrust,
            ctx.rng.float_in_range(-0.5, 0.5) * thrust,
        );

        body.integrate(dt);
    }

    fn process_input(
        &mut self,
        body: &mut Body,
        input: &dyn InputSource,
        events: &mut Vec<GameEvent>,
    ) {
        // Thrust
        self.thrusting = input.is_key_pressed(Key::W) || input.is_key_pressed(Key::Up);
        self.thrust_amount = if self.thrusting { 1.0 } else { 0.0 };
        body.acceleration = if self.thrusting {
            polar_degrees_xy(body.angle_degrees, PLAYER_SHIP_ACCELERATION)
        } else {
            Vec3::ZERO
        };

        // Turning; later keys override earlier ones, opposing pairs cancel
        let mut turn = 0.0;
        for (key, speed) in [
            (Key::A, PLAYER_SHIP_TURN_SPEED),
            (Key::D, -PLAYER_SHIP_TURN_SPEED),
            (Key::Left, PLAYER_SHIP_TURN_SPEED),
            (Key::Right, -PLAYER_SHIP_TURN_SPEED),
        ] {
            if input.is_key_pressed(key) {
                turn = speed;
            }
        }
        let wasd_cancel = input.is_key_pressed(Key::A) && input.is_key_pressed(Key::D);
        let arrow_cancel = input.is_key_pressed(Key::Left) && input.is_key_pressed(Key::Right);
        if wasd_cancel || arrow_cancel {
            turn = 0.0;
        }
        body.angular_velocity = turn;

        // Age guard keeps the key that respawned the ship from also firing
        if input.was_key_just_pressed(Key::Space) && body.age > 0.0 {
            fire(body, events);
        }

        let gamepad = input.gamepad(0);
        if !gamepad.connected {
            return;
        }

        let stick = gamepad.left_stick;
        if stick.magnitude > 0.0 {
            body.angle_degrees = stick.angle_degrees;
            body.acceleration =
                polar_degrees_xy(body.angle_degrees, PLAYER_SHIP_ACCELERATION * stick.magnitude);
            self.thrusting = true;
            self.thrust_amount = stick.magnitude;
        }

        if gamepad.is_button_just_pressed(Button::A) {
            fire(body, events);
        }
    }

    /// Bring a dead ship back at world center. Returns false (and changes
    /// nothing) when the ship is alive.
    pub fn respawn(&mut self, body: &mut Body) -> bool {
        if !body.dead {
            return false;
        }

        body.position = Vec3::new(WORLD_CENTER_X, WORLD_CENTER_Y, 0.0);
        body.velocity = Vec3::ZERO;
        body.acceleration = Vec3::ZERO;
        body.angle_degrees = 0.0;
        body.health = 1;
        body.dead = false;
        self.thrusting = false;
        self.thrust_amount = 0.0;
        true
    }

    pub fn die(body: &mut Body, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::ScreenShake(1.0));
        events.push(GameEvent::Vibration {
            left: 0.75,
            right: 0.45,
        });
        events.push(GameEvent::DebrisBurst {
            position: body.position,
            color: PLAYER_SHIP_COLOR_1,
            count: 45,
            lifespan: 3.5,
        });
    }

    /// Exhaust flame tip in local space
    pub fn exhaust_tip(&self) -> Vec2 {
        Vec2::new(-2.0 - 4.0 * self.thrust_amount, 0.0) + self.thrust_offset
    }
}

/// Bullets leave from just ahead of the nose
pub fn nose_position(body: &Body) -> Vec3 {
    body.position + polar_degrees_xy(body.angle_degrees, PLAYER_NOSE_OFFSET * body.scale)
}

fn fire(body: &Body, events: &mut Vec<GameEvent>) {
    if body.dead {
        return;
    }
    events.push(GameEvent::FireVolley {
        position: nose_position(body),
        degrees: body.angle_degrees,
    });
}

/// Clamp inside the world using the cosmetic radius, reflecting velocity
fn bounce_off_sides(body: &mut Body) {
    let r = body.cosmetic_radius;
    if body.position.x - r < 0.0 {
        body.position.x = r;
        body.velocity.x = -body.velocity.x;
    }
    if body.position.x + r > WORLD_SIZE_X {
        body.position.x = WORLD_SIZE_X - r;
        body.velocity.x = -body.velocity.x;
    }
    if body.position.y - r < 0.0 {
        body.position.y = r;
        body.velocity.y = -body.velocity.y;
    }
    if body.position.y + r > WORLD_SIZE_Y {
        body.position.y = WORLD_SIZE_Y - r;
        body.velocity.y = -body.velocity.y;
    }
}
