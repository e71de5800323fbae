//! Collision detection and response
//!
//! Every collider is a circle of its physics radius. Each overlapping pair
//! takes one point of damage on both sides and throws a small impact puff at
//! the target's position. Pairs are tested in a fixed order: every bullet
//! against asteroids, then beetles, then wasps; then the living player
//! against the same three pools.

use glam::Vec2;

use super::entity::{Entity, EntityKind, GameEvent};
use super::pool::Pool;
use crate::palette::{ASTEROID_COLOR, BEETLE_COLOR, WASP_COLOR};

/// Seconds an impact puff lasts
pub const IMPACT_DEBRIS_LIFESPAN: f32 = 0.5;

/// Circle-circle overlap; touching circles do not overlap
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Puff spawned where `target` was struck
pub fn impact_burst(target: &Entity) -> GameEvent {
    let (color, count) = match target.kind {
        EntityKind::Asteroid(_) => (ASTEROID_COLOR, 2),
        EntityKind::Beetle(_) => (BEETLE_COLOR, 4),
        EntityKind::Wasp(_) => (WASP_COLOR, 4),
        _ => (target.body.color, 4),
    };
    GameEvent::DebrisBurst {
        position: target.position(),
        color,
        count,
        lifespan: IMPACT_DEBRIS_LIFESPAN,
    }
}

/// Test `striker` against every occupied slot of `targets`
///
/// Dead entities stay collidable until the pool drops them, so a striker can
/// hit several targets in one frame.
fn strike(striker: &mut Entity, targets: &mut Pool<Entity>, events: &mut Vec<GameEvent>) -> usize {
    let mut contacts = 0;
    for (_, target) in targets.iter_mut() {
        if target.overlaps(striker) {
            target.damage(1, events);
            striker.damage(1, events);
            events.push(impact_burst(target));
            contacts += 1;
        }
    }
    contacts
}

/// Run one frame of collision response; returns the number of contacts
pub fn resolve_collisions(
    player: &mut Entity,
    asteroids: &mut Pool<Entity>,
    bullets: &mut Pool<Entity>,
    beetles: &mut Pool<Entity>,
    wasps: &mut Pool<Entity>,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut contacts = 0;

    for (_, bullet) in bullets.iter_mut() {
        contacts += strike(bullet, asteroids, events);
        contacts += strike(bullet, beetles, events);
        contacts += strike(bullet, wasps, events);
    }

    if !player.is_dead() {
        contacts += strike(player, asteroids, events);
        contacts += strike(player, beetles, events);
        contacts += strike(player, wasps, events);
    }

    contacts
}
