//! Frame render pass
//!
//! Read-only walk over the session: world camera first (title card or
//! entities, then debug overlays), UI camera second (lives, gamepad gizmos).

use glam::Vec2;

use super::{Renderer, Transform2, shapes};
use crate::Rgba8;
use crate::consts::*;
use crate::platform::GamepadState;
use crate::sim::entity::{Entity, EntityKind};
use crate::sim::state::GameState;

const LIVES_ORIGIN: Vec2 = Vec2::new(5.0, WORLD_SIZE_Y - 5.0);
const LIVES_SCALE: f32 = 0.5;
const TITLE_OFFSET_Y: f32 = 10.0;

const GIZMO_RADIUS: f32 = 20.0;
const GIZMO_LEFT: Vec2 = Vec2::new(25.0, 25.0);
const GIZMO_RIGHT: Vec2 = Vec2::new(WORLD_SIZE_X - 25.0, 25.0);

/// Draw one frame of `state`
pub fn render_game(state: &GameState, gamepad: &GamepadState, renderer: &mut dyn Renderer) {
    let world = &state.world_camera;
    if let Some(color) = world.clear_color {
        renderer.clear(color);
    }

    renderer.begin_camera(world);
    if state.is_attract() {
        render_title(state, renderer);
    } else {
        state.player.render(renderer);
        for pool in state.pools() {
            for (_, entity) in pool.iter() {
                entity.render(renderer);
            }
        }
    }
    if state.debug_draw {
        render_debug(state, renderer);
    }
    renderer.end_camera(world);

    let ui = &state.ui_camera;
    renderer.begin_camera(ui);
    render_lives(state, renderer);
    if state.debug_draw && gamepad.connected {
        render_gamepad(gamepad, renderer);
    }
    renderer.end_camera(ui);
}

fn render_title(state: &GameState, renderer: &mut dyn Renderer) {
    let title = &state.title;
    let transform = Transform2::new(
        Vec2::new(WORLD_CENTER_X, WORLD_CENTER_Y + TITLE_OFFSET_Y),
        title.rotation_degrees,
        title.scale,
    );
    renderer.draw_vertices(&mut shapes::title(title.color).into_iter(), &transform);
}

fn render_lives(state: &GameState, renderer: &mut dyn Renderer) {
    let spacing = Vec2::new(7.0 * LIVES_SCALE, 0.0);
    for i in 0..state.lives_remaining() {
        let transform = Transform2::new(LIVES_ORIGIN + spacing * i as f32, 90.0, LIVES_SCALE);
        renderer.draw_vertices(&mut shapes::ship_hull().into_iter(), &transform);
    }
}

/// Debris is skipped; there is too much of it to read
fn render_debug(state: &GameState, renderer: &mut dyn Renderer) {
    let ship = (!state.player.is_dead()).then(|| state.player.body.position_2d());
    if ship.is_some() {
        state.player.debug_render(renderer);
    }

    let hostiles = [&state.asteroids, &state.bullets, &state.beetles, &state.wasps];
    for (_, entity) in hostiles.into_iter().flat_map(|pool| pool.iter()) {
        entity.debug_render(renderer);
        if let Some(ship) = ship {
            tether(ship, entity, renderer);
        }
    }
}

fn tether(ship: Vec2, entity: &Entity, renderer: &mut dyn Renderer) {
    let width = match entity.kind {
        EntityKind::Bullet(_) => 0.1,
        _ => 0.05,
    };
    let verts = shapes::line(ship, entity.body.position_2d(), width, Rgba8::DARK_GRAY);
    renderer.draw_vertices(&mut verts.into_iter(), &Transform2::IDENTITY);
}

fn render_gamepad(gamepad: &GamepadState, renderer: &mut dyn Renderer) {
    let mut verts = Vec::new();
    for (center, stick) in [
        (GIZMO_LEFT, gamepad.left_stick),
        (GIZMO_RIGHT, gamepad.right_stick),
    ] {
        let tip = center + stick.position() * GIZMO_RADIUS;
        verts.extend(shapes::circle_outline(center, GIZMO_RADIUS, 0.1, Rgba8::WHITE));
        verts.extend(shapes::circle(tip, 1.0, Rgba8::GREEN, 12));
        verts.extend(shapes::line(center, tip, 0.1, Rgba8::GREEN));
    }

    let reach = GIZMO_RADIUS * 2.0;
    let left_start = GIZMO_LEFT + Vec2::new(25.0, -20.0);
    let right_start = GIZMO_RIGHT + Vec2::new(-25.0, -20.0);
    verts.extend(shapes::line(
        left_start,
        left_start + Vec2::Y * reach * gamepad.left_trigger,
        0.5,
        Rgba8::CYAN,
    ));
    verts.extend(shapes::line(
        right_start,
        right_start + Vec2::Y * reach * gamepad.right_trigger,
        0.5,
        Rgba8::MAGENTA,
    ));

    renderer.draw_vertices(&mut verts.into_iter(), &Transform2::IDENTITY);
}
