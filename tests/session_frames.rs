//! Whole-frame scenarios driven through `tick` with scripted input

use glam::Vec3;

use starship::consts::*;
use starship::platform::{Button, EventBus, InputSource, InputState, Key, QUIT_TOPIC};
use starship::renderer::{RecordingRenderer, render_game};
use starship::sim::{Entity, GameMode, GameState, tick};

const DT: f32 = 1.0 / 60.0;

struct Session {
    state: GameState,
    input: InputState,
    bus: EventBus,
}

impl Session {
    fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: InputState::new(),
            bus: EventBus::new(),
        }
    }

    fn frame(&mut self) {
        self.frame_with(DT);
    }

    fn frame_with(&mut self, dt: f32) {
        tick(&mut self.state, &mut self.input, &mut self.bus, dt);
        self.input.end_frame();
    }

    fn tap(&mut self, key: Key) {
        self.input.press(key);
        self.frame();
        self.input.release(key);
    }

    /// Attract frame, then leave attract with N
    fn start_playing(&mut self) {
        self.frame();
        self.tap(Key::N);
        assert_eq!(self.state.mode, GameMode::Playing);
    }
}

#[test]
fn attract_to_play_keeps_first_wave() {
    let mut s = Session::new(100);
    s.frame();
    assert_eq!(s.state.mode, GameMode::Attract);
    assert_eq!(s.state.asteroids.len(), 4);

    s.input.press(Key::Space);
    s.frame();
    assert_eq!(s.state.mode, GameMode::Playing);
    assert_eq!(s.state.asteroids.len(), 4);
    assert!(s.state.debris.len() >= 105);
    assert_eq!(s.state.lives_remaining(), 3);
}

#[test]
fn killed_asteroid_is_collected_one_frame_later() {
    let mut s = Session::new(101);
    s.start_playing();
    s.state.wipe_entities();

    let target = Vec3::new(150.0, 80.0, 0.0);
    s.state.asteroids.insert(Entity::asteroid(target)).unwrap();
    for _ in 0..ASTEROID_HEALTH {
        let bullet = Entity::bullet(target - Vec3::X, 0.0);
        s.state.bullets.insert(bullet).unwrap();
    }

    s.frame();
    let asteroid = s.state.asteroids.get(0).unwrap();
    assert!(asteroid.is_dead());
    assert!(!asteroid.is_garbage());
    // Death burst plus three impact puffs
    assert!(s.state.debris.len() >= 30 + 3 * 2);
    assert!(s.state.feedback.shake() > 0.0);

    s.frame();
    assert!(s.state.asteroids.is_empty());
    assert!(s.state.bullets.is_empty());
    assert!(!s.state.spawn_next_wave);

    s.frame();
    assert!(s.state.spawn_next_wave);

    s.frame();
    assert_eq!(s.state.wave_index, 2);
    assert_eq!(s.state.asteroids.len(), 4);
    assert_eq!(s.state.beetles.len(), 2);
    assert!(s.state.wasps.is_empty());
}

#[test]
fn respawn_consumes_lives_until_none_left() {
    let mut s = Session::new(102);
    s.start_playing();

    for expected_life in 2..=MAX_NUMBER_OF_LIVES {
        s.state.player.body.dead = true;
        s.tap(Key::N);
        assert!(!s.state.player.is_dead());
        assert_eq!(s.state.current_life, expected_life);
    }

    s.state.player.body.dead = true;
    s.tap(Key::N);
    assert!(s.state.player.is_dead());
    assert_eq!(s.state.current_life, MAX_NUMBER_OF_LIVES);
    assert_eq!(s.state.lives_remaining(), 0);
}

#[test]
fn start_button_respawns_dead_ship() {
    let mut s = Session::new(103);
    s.start_playing();
    s.state.player.body.dead = true;

    s.input.press_button(Button::Start);
    s.frame();
    assert!(!s.state.player.is_dead());
    assert_eq!(s.state.current_life, 2);
}

#[test]
fn game_over_returns_to_attract_after_delay() {
    let mut s = Session::new(104);
    s.start_playing();
    s.state.current_life = MAX_NUMBER_OF_LIVES;
    s.state.player.body.dead = true;

    s.frame_with(1.0);
    assert_eq!(s.state.mode, GameMode::Playing);
    assert!(s.state.player_destroyed_at.is_some());

    s.frame_with(1.0);
    s.frame_with(1.0);
    assert_eq!(s.state.mode, GameMode::Playing);

    s.frame_with(1.5);
    assert_eq!(s.state.mode, GameMode::Attract);
    assert!(s.state.player_destroyed_at.is_none());
    assert!(s.state.debris.is_empty());

    // Attract defaults restore the ship on the following frame
    s.frame();
    assert!(!s.state.player.is_dead());
    assert_eq!(s.state.current_life, 1);
}

#[test]
fn enemies_hold_when_player_dies() {
    let mut s = Session::new(105);
    s.start_playing();
    s.state.wipe_entities();

    let start = Vec3::new(40.0, 20.0, 0.0);
    s.state.beetles.insert(Entity::beetle(start)).unwrap();
    s.frame();
    let moved = s.state.beetles.get(0).unwrap().position();
    assert_ne!(moved, start);

    s.state.player.body.dead = true;
    s.frame();
    assert_eq!(s.state.beetles.get(0).unwrap().position(), moved);
}

#[test]
fn escape_requests_quit() {
    let mut s = Session::new(106);
    let quit = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = quit.clone();
    s.bus.subscribe(QUIT_TOPIC, move |_| {
        flag.set(true);
        true
    });

    s.tap(Key::Escape);
    assert!(quit.get());

    // The record holds one frame's topics once the host drains it
    assert_eq!(s.bus.take_published(), vec![QUIT_TOPIC.to_string()]);
    s.tap(Key::Escape);
    assert_eq!(s.bus.take_published().len(), 1);
    s.frame();
    assert!(s.bus.take_published().is_empty());
}

#[test]
fn restart_rebuilds_session() {
    let mut s = Session::new(107);
    s.start_playing();
    s.tap(Key::F8);
    assert!(s.state.restart_requested);

    s.state.restart();
    assert!(!s.state.restart_requested);
    assert_eq!(s.state.mode, GameMode::Attract);
    assert_eq!(s.state.entity_count(), 0);
    assert_eq!(s.state.rng.seed(), 107);
}

#[test]
fn scripted_run_renders_every_frame() {
    let mut s = Session::new(108);
    let mut renderer = RecordingRenderer::new();

    s.frame();
    s.input.press(Key::Space);
    for frame in 0..600 {
        if frame % 10 == 0 {
            s.input.release(Key::Space);
            s.input.press(Key::Space);
        }
        s.input.press(Key::A);
        s.frame();

        renderer.reset();
        render_game(&s.state, s.input.gamepad(0), &mut renderer);
        assert_eq!(renderer.cameras.len(), 2);
        for pool in s.state.pools() {
            assert!(pool.len() <= pool.capacity());
        }
    }
    assert!(s.state.game_time > 9.9);
}
