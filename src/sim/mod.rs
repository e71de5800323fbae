//! Gameplay simulation
//!
//! All gameplay logic lives here:
//! - Entities and their per-variant behavior
//! - Fixed-capacity pools owned by the session
//! - Wave director, collisions and feedback
//! - No GPU or windowing dependencies; drawing goes through [`crate::renderer::Renderer`]

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod debris;
pub mod enemy;
pub mod entity;
pub mod feedback;
pub mod pool;
pub mod rng;
pub mod ship;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{circles_overlap, resolve_collisions};
pub use entity::{Body, Entity, EntityKind, GameEvent, PlayerHandle, PlayerView, UpdateContext};
pub use feedback::Feedback;
pub use pool::Pool;
pub use rng::GameRng;
pub use state::{GameMode, GameState, TitleCard};
pub use tick::tick;
pub use wave::{WaveSpawn, check_wave_complete, spawn_wave, wave_spawn};
