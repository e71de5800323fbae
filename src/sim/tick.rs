//! Per-frame session update
//!
//! Advances the whole session by one variable-length frame. Feedback decay
//! and the game clock use the raw dt; entities see the slowed, clamped (and
//! possibly paused) dt.

use glam::Vec2;

use super::state::{GameMode, GameState};
use super::wave;
use crate::platform::{Button, EventBus, InputSource, Key, QUIT_TOPIC};

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &mut dyn InputSource, bus: &mut EventBus, dt: f32) {
    state.game_time += dt as f64;
    state.world_camera.position = Vec2::ZERO;

    handle_user_input(state, &*input, bus);

    // Feedback runs on wall-clock time so it still settles while paused
    let offset = state.feedback.ablate_shake(dt, &mut state.rng);
    if state.settings.screen_shake {
        state.shake_camera(offset);
    }
    let (left, right) = state.feedback.ablate_vibration(dt);
    if state.settings.vibration {
        input.set_vibration(0, left, right);
    } else {
        input.set_vibration(0, 0.0, 0.0);
    }

    if input.gamepad(0).is_button_just_pressed(Button::Start) {
        state.mode = GameMode::Playing;
        if state.player.is_dead() {
            state.request_ship_respawn();
        }
    }

    if state.is_attract() {
        state.attract_mode(dt);
    } else if state.was_just_attract {
        state.post_attract_explosion();
        state.was_just_attract = false;
    }

    state.update_death_timer();

    let dt = state.effective_dt(dt);

    if state.spawn_next_wave {
        wave::spawn_wave(state);
    }

    state.update_player(dt, &*input);
    state.apply_events();

    state.update_pools(dt, &*input);
    state.resolve_collisions();
    state.apply_events();

    // Decided before garbage collection; dead hostiles still hold their slot
    state.spawn_next_wave = wave::check_wave_complete(state);

    state.collect_garbage();
    state.apply_events();
}

/// Keyboard shortcuts that act on the session rather than the ship
fn handle_user_input(state: &mut GameState, input: &dyn InputSource, bus: &mut EventBus) {
    if input.was_key_just_pressed(Key::F1) {
        state.debug_draw = !state.debug_draw;
        log::debug!("Debug drawing {}", if state.debug_draw { "on" } else { "off" });
    }

    if input.is_key_pressed(Key::Space) && state.is_attract() {
        state.mode = GameMode::Playing;
    }

    if input.was_key_just_pressed(Key::N) {
        if state.is_attract() {
            state.mode = GameMode::Playing;
        } else {
            state.request_ship_respawn();
        }
    }

    if input.was_key_just_pressed(Key::O) {
        if let Err(e) = state.request_spawn_asteroid() {
            log::debug!("{}", e);
        }
    }

    if input.was_key_just_pressed(Key::P) {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }

    if input.was_key_just_pressed(Key::T) {
        state.slow_mo = true;
    }
    if input.was_key_just_released(Key::T) {
        state.slow_mo = false;
    }

    if input.was_key_just_pressed(Key::Escape) {
        bus.publish(QUIT_TOPIC);
    }

    if input.was_key_just_pressed(Key::F8) {
        state.restart_requested = true;
    }
}
