//! Starship - gameplay simulation core of a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Entity simulation (pools, waves, collisions, session state machine)
//! - `renderer`: Render collaborator interface and local-space shape generation
//! - `platform`: Input snapshot and event bus collaborators
//! - `settings`: Runtime configuration
//! - `error`: Spawn and configuration errors

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SpawnError};
pub use settings::Settings;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// World dimensions (world camera spans 0..WORLD_SIZE on each axis)
    pub const WORLD_SIZE_X: f32 = 200.0;
    pub const WORLD_SIZE_Y: f32 = 100.0;
    pub const WORLD_CENTER_X: f32 = WORLD_SIZE_X / 2.0;
    pub const WORLD_CENTER_Y: f32 = WORLD_SIZE_Y / 2.0;
    /// Asteroids never spawn this close to the world edge
    pub const SAFEZONE: f32 = 10.0;
    /// Largest camera offset screen shake can produce; also the offscreen margin
    pub const MAX_SCREEN_SHAKE: f32 = 10.0;
    pub const SCREEN_SHAKE_ABLATION_PER_SECOND: f32 = 1.0;
    pub const CONTROLLER_VIBRATION_ABLATION_PER_SECOND: f32 = 0.5;

    /// Frame step clamp (simulation never advances more than 1/30 s per frame)
    pub const MAX_FRAME_SECONDS: f32 = 1.0 / 30.0;
    pub const SLOW_MO_FACTOR: f32 = 0.1;

    /// Pool capacities
    pub const MAX_ASTEROIDS: usize = 120;
    pub const MAX_BULLETS: usize = 20_000;
    pub const MAX_DEBRIS: usize = 500;
    pub const MAX_BEETLES: usize = 25;
    pub const MAX_WASPS: usize = 10;

    /// Game rules
    pub const CLOSEST_ASTEROID_SPAWN_TO_SHIP: f32 = 15.0;
    pub const MAX_NUMBER_OF_WAVES: usize = 5;
    pub const MAX_NUMBER_OF_LIVES: u32 = 4;
    pub const TIME_AFTER_DEATH_BEFORE_ATTRACT: f64 = 3.0;
    pub const OFFSCREEN_SPAWN_DISTANCE: f32 = 25.0;

    /// Attract title animation
    pub const STARTING_TITLE_SCALE: f32 = 4.0;
    pub const STARTING_TITLE_ROTATION: f32 = 0.0;
    pub const MAX_TITLE_ROTATION: f32 = 15.0;
    pub const MAX_TITLE_SCALE_INCREASE: f32 = 2.0;
    pub const TITLE_COLOR_CHANGE_TIME: f32 = 0.25;

    /// Seconds an entity flashes white after being hit
    pub const HIT_TIME: f32 = 0.2;

    /// Asteroid
    pub const ASTEROID_SPEED: f32 = 15.0;
    pub const ASTEROID_MAX_ROTATION: f32 = 200.0;
    pub const ASTEROID_PHYSICS_RADIUS: f32 = 2.0;
    pub const ASTEROID_COSMETIC_RADIUS: f32 = 3.0;
    pub const ASTEROID_HEALTH: i32 = 3;
    pub const ASTEROID_CORNERS: usize = 16;

    /// Bullet
    pub const BULLET_SPEED: f32 = 130.0;
    pub const BULLET_SCALE: f32 = 1.25;
    pub const BULLET_PHYSICS_RADIUS: f32 = 0.5;
    pub const BULLET_COSMETIC_RADIUS: f32 = 2.0;

    /// Player ship
    pub const PLAYER_SHIP_ACCELERATION: f32 = 30.0;
    pub const PLAYER_SHIP_TURN_SPEED: f32 = 300.0;
    pub const PLAYER_SHIP_PHYSICS_RADIUS: f32 = 2.0;
    pub const PLAYER_SHIP_COSMETIC_RADIUS: f32 = 2.5;
    pub const PLAYER_BULLETS_PER_SHOT: usize = 3;
    pub const PLAYER_NOSE_OFFSET: f32 = 2.75;
    pub const PLAYER_BULLET_SPREAD_DEGREES: f32 = 5.0;

    /// Beetle
    pub const BEETLE_VELOCITY: f32 = 20.0;
    pub const BEETLE_PHYSICS_RADIUS: f32 = 1.6;
    pub const BEETLE_COSMETIC_RADIUS: f32 = 2.0;
    pub const BEETLE_HEALTH: i32 = 3;

    /// Wasp
    pub const WASP_MAX_VELOCITY: f32 = 30.0;
    pub const WASP_ACCELERATION_PER_SECOND: f32 = 65.0;
    pub const WASP_PHYSICS_RADIUS: f32 = 1.8;
    pub const WASP_COSMETIC_RADIUS: f32 = 2.3;
    pub const WASP_HEALTH: i32 = 2;

    /// Debris
    pub const MAX_DEBRIS_LIFESPAN: f32 = 2.0;
    pub const DEBRIS_COSMETIC_RADIUS: f32 = 1.0;
    pub const DEBRIS_MIN_SPEED: f32 = 2.0;
    pub const DEBRIS_MAX_SPEED: f32 = 55.0;
    pub const DEBRIS_MAX_SPIN: f32 = 500.0;
    pub const DEBRIS_CORNERS: usize = 5;
    /// Alpha (as a fraction of full opacity) a fresh piece of debris starts at
    pub const DEBRIS_START_ALPHA: f32 = 0.5;
}

/// Unit-free 8-bit RGBA color, the way the render collaborator consumes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const DARK_GRAY: Self = Self::new(50, 50, 50);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Set alpha from a 0-1 fraction (clamped)
    pub fn with_alpha_fraction(self, fraction: f32) -> Self {
        let a = (fraction.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.with_alpha(a)
    }

    /// Normalized float color for vertex submission
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Palette shared by simulation (debris colors) and rendering
pub mod palette {
    use super::Rgba8;

    pub const PLAYER_SHIP_COLOR_1: Rgba8 = Rgba8::new(132, 156, 165);
    pub const PLAYER_SHIP_COLOR_2: Rgba8 = Rgba8::new(52, 76, 85);
    pub const PLAYER_SHIP_EXHAUST_1: Rgba8 = Rgba8::new(255, 0, 0);
    pub const PLAYER_SHIP_EXHAUST_2: Rgba8 = Rgba8::new(255, 255, 0);
    pub const ASTEROID_COLOR: Rgba8 = Rgba8::new(100, 100, 100);
    pub const BULLET_HEAD_COLOR: Rgba8 = Rgba8::new(255, 255, 0);
    pub const BULLET_TAIL_COLOR_START: Rgba8 = Rgba8::new(255, 0, 0);
    pub const BULLET_TAIL_COLOR_END: Rgba8 = Rgba8::new(255, 0, 0).with_alpha(0);
    pub const BEETLE_COLOR: Rgba8 = Rgba8::new(0, 125, 0);
    pub const WASP_COLOR: Rgba8 = Rgba8::new(200, 200, 0);

    pub const DEBUG_VELOCITY_COLOR: Rgba8 = Rgba8::new(255, 255, 0);
    pub const DEBUG_COSMETIC_CIRCLE: Rgba8 = Rgba8::new(255, 0, 255);
    pub const DEBUG_PHYSICS_CIRCLE: Rgba8 = Rgba8::new(0, 255, 255);
}

/// Unit vector (or `length`-long vector) pointing at `degrees` in the XY plane
#[inline]
pub fn polar_degrees(degrees: f32, length: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin()) * length
}

/// Same as [`polar_degrees`], lifted into the entity's 3D position space (z = 0)
#[inline]
pub fn polar_degrees_xy(degrees: f32, length: f32) -> Vec3 {
    polar_degrees(degrees, length).extend(0.0)
}

/// Angle of a displacement in degrees, 0 = east, counter-clockwise positive
#[inline]
pub fn atan2_degrees(y: f32, x: f32) -> f32 {
    y.atan2(x).to_degrees()
}

/// Clamp a vector's length to at most `max_length`
#[inline]
pub fn clamp_length(v: Vec3, max_length: f32) -> Vec3 {
    v.clamp_length_max(max_length)
}

/// Linear remap of `value` from [in_start, in_end] to [out_start, out_end] (unclamped)
#[inline]
pub fn range_map(in_start: f32, in_end: f32, out_start: f32, out_end: f32, value: f32) -> f32 {
    if in_end == in_start {
        return out_start;
    }
    let t = (value - in_start) / (in_end - in_start);
    out_start + t * (out_end - out_start)
}
