//! Game session state
//!
//! The session owns every entity: the player in a fixed slot and everything
//! else in five fixed-capacity pools. Entities request side effects through
//! [`GameEvent`]s queued on the session; only the session assigns or clears
//! pool slots.

use glam::{Vec2, Vec3};

use super::entity::{Entity, EntityKind, GameEvent, PlayerHandle, PlayerView, UpdateContext};
use super::feedback::Feedback;
use super::pool::Pool;
use super::rng::GameRng;
use super::wave;
use crate::Rgba8;
use crate::consts::*;
use crate::error::{PoolKind, SpawnError};
use crate::platform::InputSource;
use crate::renderer::Camera;
use crate::settings::Settings;

/// Top-level mode. Pause and slow-mo are independent flags on top of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Title card over a self-running demo
    Attract,
    Playing,
}

/// Animated "STARSHIP" title shown in attract mode
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCard {
    pub time: f32,
    pub rotation_degrees: f32,
    pub scale: f32,
    pub color: Rgba8,
    last_color_change: f32,
}

impl Default for TitleCard {
    fn default() -> Self {
        Self {
            time: 0.0,
            rotation_degrees: STARTING_TITLE_ROTATION,
            scale: 3.0,
            color: Rgba8::RED,
            last_color_change: 0.0,
        }
    }
}

impl TitleCard {
    /// Sway and pulse with a touch of jitter; new random color every
    /// `TITLE_COLOR_CHANGE_TIME` seconds
    pub fn animate(&mut self, dt: f32, rng: &mut GameRng) {
        let noise = rng.float_in_range(-0.03, 0.03);
        let t = self.time + noise;
        self.rotation_degrees = STARTING_TITLE_ROTATION + MAX_TITLE_ROTATION * t.sin();
        self.scale = STARTING_TITLE_SCALE + MAX_TITLE_SCALE_INCREASE * (t * 2.0).sin();

        if self.last_color_change + TITLE_COLOR_CHANGE_TIME < self.time {
            self.last_color_change = self.time;
            self.color = Rgba8::new(
                rng.int_less_than(256) as u8,
                rng.int_less_than(256) as u8,
                rng.int_less_than(256) as u8,
            );
        }

        self.time += dt;
    }
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    pub rng: GameRng,

    /// The player ship; never pooled
    pub player: Entity,
    pub asteroids: Pool<Entity>,
    pub bullets: Pool<Entity>,
    pub debris: Pool<Entity>,
    pub beetles: Pool<Entity>,
    pub wasps: Pool<Entity>,

    pub world_camera: Camera,
    pub ui_camera: Camera,

    /// Seconds since the session started (raw dt)
    pub game_time: f64,
    pub mode: GameMode,
    /// Mode was Attract last frame; the drop to Playing triggers the explosion
    pub was_just_attract: bool,
    pub paused: bool,
    pub slow_mo: bool,
    pub debug_draw: bool,

    /// Next wave to spawn (0-based)
    pub wave_index: usize,
    pub spawn_next_wave: bool,
    /// Life currently in use, 1..=MAX_NUMBER_OF_LIVES
    pub current_life: u32,
    /// Game time the final life was lost
    pub player_destroyed_at: Option<f64>,

    pub feedback: Feedback,
    pub title: TitleCard,
    /// Host should rebuild the session
    pub restart_requested: bool,

    pending: Vec<GameEvent>,
    /// Bullet exhaustion is reported once until a volley succeeds again
    bullet_warning_armed: bool,
}

impl GameState {
    /// Create a session with default settings and a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings {
            seed: Some(seed),
            ..Default::default()
        })
    }

    pub fn with_settings(settings: Settings) -> Self {
        let rng = settings.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        log::info!("Starting session (seed {})", rng.seed());

        let world_size = Vec2::new(WORLD_SIZE_X, WORLD_SIZE_Y);
        Self {
            rng,
            player: Entity::player_ship(world_center()),
            asteroids: Pool::new(PoolKind::Asteroids, MAX_ASTEROIDS),
            bullets: Pool::new(PoolKind::Bullets, MAX_BULLETS),
            debris: Pool::new(PoolKind::Debris, MAX_DEBRIS),
            beetles: Pool::new(PoolKind::Beetles, MAX_BEETLES),
            wasps: Pool::new(PoolKind::Wasps, MAX_WASPS),
            world_camera: Camera::ortho(Vec2::ZERO, world_size).with_clear(Rgba8::BLACK),
            ui_camera: Camera::ortho(Vec2::ZERO, world_size),
            game_time: 0.0,
            mode: GameMode::Attract,
            was_just_attract: false,
            paused: false,
            slow_mo: false,
            debug_draw: settings.debug_draw,
            wave_index: 0,
            spawn_next_wave: true,
            current_life: 1,
            player_destroyed_at: None,
            feedback: Feedback::new(),
            title: TitleCard::default(),
            restart_requested: false,
            pending: Vec::new(),
            bullet_warning_armed: true,
            settings,
        }
    }

    /// Fresh session with the same settings
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.wipe_entities();
        *self = Self::with_settings(self.settings.clone());
    }

    /// Destroy every pooled entity; the session is unusable for play until
    /// the next wave spawns
    pub fn shutdown(&mut self) {
        self.wipe_entities();
        self.pending.clear();
    }

    pub fn is_attract(&self) -> bool {
        self.mode == GameMode::Attract
    }

    /// Pools in update (and render) order
    pub fn pools(&self) -> [&Pool<Entity>; 5] {
        [
            &self.asteroids,
            &self.bullets,
            &self.debris,
            &self.beetles,
            &self.wasps,
        ]
    }

    pub fn entity_count(&self) -> usize {
        self.pools().iter().map(|pool| pool.len()).sum()
    }

    pub fn lives_remaining(&self) -> u32 {
        MAX_NUMBER_OF_LIVES.saturating_sub(self.current_life)
    }

    pub fn alive_player(&self) -> Option<PlayerHandle> {
        (!self.player.is_dead()).then_some(PlayerHandle::PRIMARY)
    }

    fn player_view(&self) -> Option<PlayerView> {
        self.alive_player().map(|handle| PlayerView {
            handle,
            position: self.player.position(),
        })
    }

    /// Queue a side effect for the next `apply_events`
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.pending
    }

    // === Spawning ===

    pub fn request_spawn_asteroid(&mut self) -> Result<usize, SpawnError> {
        self.asteroids.vacancy()?;
        let position = wave::asteroid_spawn_point(&mut self.rng, self.player.position());
        let mut asteroid = Entity::asteroid(position);
        asteroid.create(&mut self.rng);
        self.asteroids.insert(asteroid)
    }

    pub fn request_spawn_beetle(&mut self) -> Result<usize, SpawnError> {
        self.beetles.vacancy()?;
        let position = wave::point_just_offscreen(&mut self.rng, OFFSCREEN_SPAWN_DISTANCE);
        let mut beetle = Entity::beetle(position.extend(0.0));
        beetle.create(&mut self.rng);
        self.beetles.insert(beetle)
    }

    pub fn request_spawn_wasp(&mut self) -> Result<usize, SpawnError> {
        self.wasps.vacancy()?;
        let position = wave::point_just_offscreen(&mut self.rng, OFFSCREEN_SPAWN_DISTANCE);
        let mut wasp = Entity::wasp(position.extend(0.0));
        wasp.create(&mut self.rng);
        self.wasps.insert(wasp)
    }

    /// Spawn a single bullet heading along `degrees`
    pub fn request_spawn_bullet(
        &mut self,
        position: Vec3,
        degrees: f32,
    ) -> Result<usize, SpawnError> {
        let mut bullet = Entity::bullet(position, degrees);
        bullet.create(&mut self.rng);
        let index = self.bullets.insert(bullet)?;
        self.feedback.add_vibration(0.0, 0.1);
        Ok(index)
    }

    /// Fire a volley of `PLAYER_BULLETS_PER_SHOT` bullets. Each successive
    /// bullet drifts further from the aim by a random spread. Returns how
    /// many were placed.
    pub fn fire_volley(&mut self, position: Vec3, degrees: f32) -> usize {
        let mut degrees = degrees;
        let mut fired = 0;
        for shot in 0..PLAYER_BULLETS_PER_SHOT {
            if self.bullets.is_full() {
                break;
            }
            let spread = PLAYER_BULLET_SPREAD_DEGREES;
            degrees += self.rng.float_in_range(-spread, spread) * shot as f32;
            if self.request_spawn_bullet(position, degrees).is_ok() {
                fired += 1;
            }
        }

        if fired > 0 {
            self.bullet_warning_armed = true;
            return fired;
        }

        // Recoverable: drop out of slow-mo and report once per episode
        self.slow_mo = false;
        if self.bullet_warning_armed {
            self.bullet_warning_armed = false;
            let err = SpawnError::PoolFull {
                pool: PoolKind::Bullets,
                capacity: self.bullets.capacity(),
            };
            log::warn!("{}", err);
        }
        0
    }

    /// Fill up to `count` empty debris slots with fragments at `position`.
    /// Returns how many were placed; a full pool cuts the burst short.
    pub fn spawn_debris_cluster(
        &mut self,
        position: Vec3,
        color: Rgba8,
        count: usize,
        lifespan: f32,
    ) -> usize {
        let mut spawned = 0;
        while spawned < count && self.debris.vacancy().is_ok() {
            let mut debris = Entity::debris(position, color, lifespan);
            debris.create(&mut self.rng);
            if self.debris.insert(debris).is_err() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Apply queued side effects in the order they were raised
    pub fn apply_events(&mut self) {
        let events = std::mem::take(&mut self.pending);
        for event in events {
            match event {
                GameEvent::ScreenShake(amount) => self.feedback.add_screen_shake(amount),
                GameEvent::Vibration { left, right } => self.feedback.add_vibration(left, right),
                GameEvent::DebrisBurst {
                    position,
                    color,
                    count,
                    lifespan,
                } => {
                    self.spawn_debris_cluster(position, color, count, lifespan);
                }
                GameEvent::FireVolley { position, degrees } => {
                    self.fire_volley(position, degrees);
                }
            }
        }
    }

    // === Player ===

    /// Bring the ship back if it is dead and a life is left
    pub fn request_ship_respawn(&mut self) -> bool {
        if !self.player.is_dead() {
            return false;
        }
        if self.current_life >= MAX_NUMBER_OF_LIVES {
            log::debug!("Respawn refused: no lives remaining");
            return false;
        }

        let EntityKind::PlayerShip(ship) = &mut self.player.kind else {
            return false;
        };
        if !ship.respawn(&mut self.player.body) {
            return false;
        }
        self.current_life += 1;
        log::info!("Ship respawned, {} lives left", self.lives_remaining());
        true
    }

    // === Per-frame phases ===

    pub fn update_player(&mut self, dt: f32, input: &dyn InputSource) {
        let mut ctx = UpdateContext {
            rng: &mut self.rng,
            input,
            settings: &self.settings,
            player: None,
            events: &mut self.pending,
        };
        self.player.update(dt, &mut ctx);
    }

    /// Update every pool in order: asteroids, bullets, debris, beetles, wasps
    pub fn update_pools(&mut self, dt: f32, input: &dyn InputSource) {
        let player = self.player_view();
        let Self {
            rng,
            settings,
            pending,
            asteroids,
            bullets,
            debris,
            beetles,
            wasps,
            ..
        } = self;
        let mut ctx = UpdateContext {
            rng,
            input,
            settings,
            player,
            events: pending,
        };
        for pool in [asteroids, bullets, debris, beetles, wasps] {
            for (_, entity) in pool.iter_mut() {
                entity.update(dt, &mut ctx);
            }
        }
    }

    pub fn resolve_collisions(&mut self) -> usize {
        super::collision::resolve_collisions(
            &mut self.player,
            &mut self.asteroids,
            &mut self.bullets,
            &mut self.beetles,
            &mut self.wasps,
            &mut self.pending,
        )
    }

    /// Destroy and remove every garbage entity; returns how many went
    pub fn collect_garbage(&mut self) -> usize {
        let mut removed = 0;
        let pending = &mut self.pending;
        for pool in [
            &mut self.asteroids,
            &mut self.bullets,
            &mut self.debris,
            &mut self.beetles,
            &mut self.wasps,
        ] {
            for entity in pool.extract_if(Entity::is_garbage) {
                entity.destroy(pending);
                removed += 1;
            }
        }
        removed
    }

    /// Destroy and remove every pooled entity. Feedback raised by the
    /// teardown itself is dropped so the wipe leaves nothing behind.
    pub fn wipe_entities(&mut self) {
        let mut discarded = Vec::new();
        let mut removed = 0;
        for pool in [
            &mut self.asteroids,
            &mut self.bullets,
            &mut self.debris,
            &mut self.beetles,
            &mut self.wasps,
        ] {
            for entity in pool.drain() {
                entity.destroy(&mut discarded);
                removed += 1;
            }
        }
        log::info!("Wiped {} entities", removed);
    }

    /// Simulation dt for this frame: slowed, clamped, then zeroed if paused
    pub fn effective_dt(&self, dt: f32) -> f32 {
        let mut dt = dt;
        if self.slow_mo {
            dt *= self.settings.slow_mo_factor;
        }
        dt = dt.min(self.settings.max_frame_seconds);
        if self.paused { 0.0 } else { dt }
    }

    // === Attract mode ===

    /// Hold the session in its pre-game state; runs every attract frame
    pub fn apply_attract_defaults(&mut self) {
        self.feedback.reset();

        let body = &mut self.player.body;
        body.angle_degrees = 0.0;
        body.position = world_center();
        body.velocity = Vec3::ZERO;
        body.dead = false;
        body.health = body.health.max(1);

        self.current_life = 1;
        self.wave_index = 0;
    }

    pub fn attract_mode(&mut self, dt: f32) {
        self.was_just_attract = true;
        self.apply_attract_defaults();
        self.title.animate(dt, &mut self.rng);
    }

    /// One-shot burst of title-colored debris when play begins
    pub fn post_attract_explosion(&mut self) {
        log::info!("Leaving attract mode");
        let clusters = self.rng.int_in_range(3, 7);
        for _ in 0..clusters {
            let offset = Vec3::new(
                self.rng.float_in_range(-40.0, 40.0),
                self.rng.float_in_range(-10.0, 10.0),
                0.0,
            );
            let count = self.rng.int_in_range(35, 100) as usize;
            let lifespan = self.rng.float_in_range(0.5, 3.0);
            let color = self.title.color;
            self.spawn_debris_cluster(world_center() + offset, color, count, lifespan);
        }
        self.feedback.add_vibration(0.4, 0.6);
        self.feedback.add_screen_shake(1.0);
    }

    /// After the last life is lost, fall back to attract mode once the delay
    /// has passed
    pub fn update_death_timer(&mut self) {
        if self.current_life < MAX_NUMBER_OF_LIVES || !self.player.is_dead() {
            return;
        }
        let destroyed_at = *self.player_destroyed_at.get_or_insert(self.game_time);
        if destroyed_at + TIME_AFTER_DEATH_BEFORE_ATTRACT < self.game_time {
            log::info!("Game over, returning to attract mode");
            self.mode = GameMode::Attract;
            self.player_destroyed_at = None;
            self.wipe_entities();
        }
    }

    /// World-space camera offset for screen shake
    pub fn shake_camera(&mut self, offset: Vec2) {
        self.world_camera.position = offset;
    }
}

fn world_center() -> Vec3 {
    Vec3::new(WORLD_CENTER_X, WORLD_CENTER_Y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ship::nose_position;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345);
        assert_eq!(state.mode, GameMode::Attract);
        assert!(state.spawn_next_wave);
        assert_eq!(state.current_life, 1);
        assert_eq!(state.lives_remaining(), 3);
        assert_eq!(state.entity_count(), 0);
        assert_eq!(state.rng.seed(), 12345);
        assert_eq!(state.alive_player(), Some(PlayerHandle::PRIMARY));
    }

    #[test]
    fn test_asteroid_spawn_fails_when_full() {
        let mut state = GameState::new(1);
        for _ in 0..MAX_ASTEROIDS {
            state.request_spawn_asteroid().unwrap();
        }
        let err = state.request_spawn_asteroid().unwrap_err();
        assert_eq!(
            err,
            SpawnError::PoolFull {
                pool: PoolKind::Asteroids,
                capacity: MAX_ASTEROIDS
            }
        );
    }

    #[test]
    fn test_fire_volley() {
        let mut state = GameState::new(2);
        let position = nose_position(&state.player.body);
        assert_eq!(state.fire_volley(position, 0.0), PLAYER_BULLETS_PER_SHOT);
        assert_eq!(state.bullets.len(), 3);
        // First bullet flies exactly along the aim
        let first = state.bullets.get(0).unwrap();
        assert_eq!(first.body.angle_degrees, 0.0);
        let (_, right) = state.feedback.vibration();
        assert!((right - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_fire_volley_exhausted_drops_slow_mo() {
        let mut state = GameState::new(3);
        state.slow_mo = true;
        state.bullets = Pool::new(PoolKind::Bullets, 2);
        assert_eq!(state.fire_volley(Vec3::ZERO, 0.0), 2);
        assert!(state.slow_mo);

        assert_eq!(state.fire_volley(Vec3::ZERO, 0.0), 0);
        assert!(!state.slow_mo);
        assert!(!state.bullet_warning_armed);
    }

    #[test]
    fn test_debris_cluster_stops_at_capacity() {
        let mut state = GameState::new(4);
        state.debris = Pool::new(PoolKind::Debris, 10);
        let spawned = state.spawn_debris_cluster(Vec3::ZERO, Rgba8::WHITE, 30, 2.0);
        assert_eq!(spawned, 10);
        assert!(state.debris.is_full());
    }

    #[test]
    fn test_respawn_consumes_a_life() {
        let mut state = GameState::new(5);
        assert!(!state.request_ship_respawn());

        state.player.body.dead = true;
        state.player.body.position = Vec3::new(3.0, 3.0, 0.0);
        assert!(state.request_ship_respawn());
        assert_eq!(state.current_life, 2);
        assert_eq!(state.player.position(), world_center());
        assert_eq!(state.player.health(), 1);
    }

    #[test]
    fn test_respawn_blocked_without_lives() {
        let mut state = GameState::new(6);
        state.current_life = MAX_NUMBER_OF_LIVES;
        state.player.body.dead = true;
        assert_eq!(state.lives_remaining(), 0);
        assert!(!state.request_ship_respawn());
        assert!(state.player.is_dead());
        assert_eq!(state.current_life, MAX_NUMBER_OF_LIVES);
    }

    #[test]
    fn test_effective_dt() {
        let mut state = GameState::new(7);
        assert!((state.effective_dt(0.01) - 0.01).abs() < 1e-7);
        assert!((state.effective_dt(1.0) - MAX_FRAME_SECONDS).abs() < 1e-7);

        state.slow_mo = true;
        assert!((state.effective_dt(1.0) - MAX_FRAME_SECONDS).abs() < 1e-7);
        assert!((state.effective_dt(0.1) - 0.01).abs() < 1e-7);

        state.paused = true;
        assert_eq!(state.effective_dt(0.1), 0.0);
    }

    #[test]
    fn test_garbage_collection_destroys_wasps() {
        let mut state = GameState::new(8);
        state.request_spawn_wasp().unwrap();
        state.request_spawn_beetle().unwrap();
        if let Some(wasp) = state.wasps.get_mut(0) {
            wasp.body.garbage = true;
        }

        assert_eq!(state.collect_garbage(), 1);
        assert!(state.wasps.is_empty());
        assert_eq!(state.beetles.len(), 1);
        assert!(state.pending_events().contains(&GameEvent::ScreenShake(0.1)));

        state.apply_events();
        assert_eq!(state.debris.len(), 14);
        assert!((state.feedback.shake() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_bullet_hit_leaves_debris_at_asteroid() {
        let mut state = GameState::new(13);
        let at = Vec3::new(30.0, 20.0, 0.0);
        state.asteroids.insert(Entity::asteroid(at)).unwrap();
        state
            .bullets
            .insert(Entity::bullet(at - Vec3::new(1.0, 0.0, 0.0), 0.0))
            .unwrap();

        assert_eq!(state.resolve_collisions(), 1);
        state.apply_events();

        let asteroid = state.asteroids.get(0).unwrap();
        assert_eq!(asteroid.health(), ASTEROID_HEALTH - 1);
        assert!(!asteroid.is_dead());
        let bullet = state.bullets.get(0).unwrap();
        assert_eq!(bullet.health(), 0);
        assert!(bullet.is_dead());
        assert!(state.debris.iter().any(|(_, d)| d.position() == at));
    }

    #[test]
    fn test_wipe_leaves_nothing() {
        let mut state = GameState::new(9);
        state.request_spawn_asteroid().unwrap();
        state.request_spawn_wasp().unwrap();
        state.spawn_debris_cluster(Vec3::ZERO, Rgba8::WHITE, 5, 1.0);
        state.wipe_entities();
        state.apply_events();
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_attract_defaults_hold_player() {
        let mut state = GameState::new(10);
        state.player.body.dead = true;
        state.player.body.position = Vec3::new(1.0, 1.0, 0.0);
        state.current_life = 3;
        state.wave_index = 2;
        state.feedback.add_screen_shake(0.5);

        state.apply_attract_defaults();
        assert!(!state.player.is_dead());
        assert_eq!(state.player.position(), world_center());
        assert_eq!(state.current_life, 1);
        assert_eq!(state.wave_index, 0);
        assert_eq!(state.feedback.shake(), 0.0);
    }

    #[test]
    fn test_post_attract_explosion() {
        let mut state = GameState::new(11);
        state.post_attract_explosion();
        // At least 3 clusters of at least 35
        assert!(state.debris.len() >= 105);
        assert_eq!(state.feedback.shake(), 1.0);
        assert_eq!(state.feedback.vibration(), (0.4, 0.6));
    }

    #[test]
    fn test_death_timer_returns_to_attract() {
        let mut state = GameState::new(12);
        state.mode = GameMode::Playing;
        state.current_life = MAX_NUMBER_OF_LIVES;
        state.player.body.dead = true;
        state.request_spawn_asteroid().unwrap();

        state.game_time = 10.0;
        state.update_death_timer();
        assert_eq!(state.player_destroyed_at, Some(10.0));
        assert_eq!(state.mode, GameMode::Playing);

        state.game_time = 13.5;
        state.update_death_timer();
        assert_eq!(state.mode, GameMode::Attract);
        assert_eq!(state.player_destroyed_at, None);
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_title_color_cycles() {
        let mut rng = GameRng::new(13);
        let mut title = TitleCard::default();
        let start = title.color;
        let mut changed = false;
        for _ in 0..60 {
            title.animate(1.0 / 60.0, &mut rng);
            changed |= title.color != start;
            assert!(title.rotation_degrees.abs() <= MAX_TITLE_ROTATION + 1e-3);
            assert!(title.scale >= STARTING_TITLE_SCALE - MAX_TITLE_SCALE_INCREASE - 1e-3);
        }
        assert!(changed);
    }
}
