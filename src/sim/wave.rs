//! Wave director
//!
//! A fixed table gives each wave's asteroid/beetle/wasp counts. A wave is
//! complete when those three pools are simultaneously empty.

use glam::{Vec2, Vec3};

use super::rng::GameRng;
use super::state::{GameMode, GameState};
use crate::consts::*;

/// How many of each hostile a wave asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveSpawn {
    pub asteroids: usize,
    pub beetles: usize,
    pub wasps: usize,
}

const WAVE_ASTEROIDS: [usize; MAX_NUMBER_OF_WAVES] = [4, 4, 4, 8, 16];
const WAVE_BEETLES: [usize; MAX_NUMBER_OF_WAVES] = [0, 2, 2, 4, 8];
const WAVE_WASPS: [usize; MAX_NUMBER_OF_WAVES] = [0, 0, 2, 4, 4];

/// Spawn counts for a 0-based wave index; `None` past the final wave
pub fn wave_spawn(index: usize) -> Option<WaveSpawn> {
    Some(WaveSpawn {
        asteroids: *WAVE_ASTEROIDS.get(index)?,
        beetles: *WAVE_BEETLES.get(index)?,
        wasps: *WAVE_WASPS.get(index)?,
    })
}

/// Uniform point inside the safe-zone inset, at least the minimum clearance
/// away from `avoid`
pub fn asteroid_spawn_point(rng: &mut GameRng, avoid: Vec3) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.float_in_range(SAFEZONE, WORLD_SIZE_X - SAFEZONE),
            rng.float_in_range(SAFEZONE, WORLD_SIZE_Y - SAFEZONE),
            0.0,
        );
        if candidate.distance(avoid) >= CLOSEST_ASTEROID_SPAWN_TO_SHIP {
            return candidate;
        }
    }
}

/// Point beyond the shake margin, up to `distance` further out, on a random
/// side of each axis
pub fn point_just_offscreen(rng: &mut GameRng, distance: f32) -> Vec2 {
    let x = if rng.fifty_fifty() {
        rng.float_in_range(-MAX_SCREEN_SHAKE - distance, -MAX_SCREEN_SHAKE)
    } else {
        rng.float_in_range(
            WORLD_SIZE_X + MAX_SCREEN_SHAKE,
            WORLD_SIZE_X + MAX_SCREEN_SHAKE + distance,
        )
    };
    let y = if rng.fifty_fifty() {
        rng.float_in_range(-MAX_SCREEN_SHAKE - distance, -MAX_SCREEN_SHAKE)
    } else {
        rng.float_in_range(
            WORLD_SIZE_Y + MAX_SCREEN_SHAKE,
            WORLD_SIZE_Y + MAX_SCREEN_SHAKE + distance,
        )
    };
    Vec2::new(x, y)
}

/// True when no asteroid, beetle or wasp slot is occupied
pub fn check_wave_complete(state: &GameState) -> bool {
    state.asteroids.is_empty() && state.beetles.is_empty() && state.wasps.is_empty()
}

/// Spawn the current wave and advance the wave index
///
/// Past the final wave the session drops back to attract mode with a clean
/// slate instead.
pub fn spawn_wave(state: &mut GameState) {
    state.spawn_next_wave = false;

    let Some(spawn) = wave_spawn(state.wave_index) else {
        log::info!("All {} waves cleared, returning to attract mode", MAX_NUMBER_OF_WAVES);
        state.mode = GameMode::Attract;
        state.wipe_entities();
        state.wave_index = 0;
        return;
    };

    log::info!(
        "Wave {}: {} asteroids, {} beetles, {} wasps",
        state.wave_index + 1,
        spawn.asteroids,
        spawn.beetles,
        spawn.wasps
    );

    // Full pools drop the request; the wave simply comes up short
    for _ in 0..spawn.asteroids {
        if let Err(e) = state.request_spawn_asteroid() {
            log::debug!("{}", e);
        }
    }
    for _ in 0..spawn.beetles {
        if let Err(e) = state.request_spawn_beetle() {
            log::debug!("{}", e);
        }
    }
    for _ in 0..spawn.wasps {
        if let Err(e) = state.request_spawn_wasp() {
            log::debug!("{}", e);
        }
    }

    state.wave_index += 1;
}
