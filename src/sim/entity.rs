//! Shared entity state and variant dispatch
//!
//! Every simulated object is an [`Entity`]: a [`Body`] (kinematics, health,
//! lifecycle flags) plus an [`EntityKind`] carrying the variant's own data.
//! Lifecycle: constructed with fixed defaults, `create` once with the session
//! RNG, `update` every frame, `destroy` when the session removes a garbage
//! entity from its pool.
//!
//! Entities never touch pools. Anything they want the session to do (shake,
//! vibration, debris, firing) is pushed as a [`GameEvent`].

use glam::{Vec2, Vec3};

use super::asteroid::Asteroid;
use super::bullet::Bullet;
use super::collision::circles_overlap;
use super::debris::Debris;
use super::enemy::{Beetle, Wasp};
use super::rng::GameRng;
use super::ship::PlayerShip;
use crate::Rgba8;
use crate::consts::*;
use crate::platform::InputSource;
use crate::polar_degrees_xy;
use crate::renderer::{Renderer, Transform2, shapes};
use crate::settings::Settings;

/// Side effect requested by an entity, applied by the session
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Add to the screen-shake accumulator
    ScreenShake(f32),
    /// Add to the controller vibration accumulators
    Vibration { left: f32, right: f32 },
    /// Spawn `count` pieces of debris at `position`
    DebrisBurst {
        position: Vec3,
        color: Rgba8,
        count: usize,
        lifespan: f32,
    },
    /// Player fired a volley from `position` toward `degrees`
    FireVolley { position: Vec3, degrees: f32 },
}

/// Handle to the session's single player slot
///
/// Enemies hold this instead of a reference; it resolves to a position only
/// while the player is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle {
    slot: usize,
}

impl PlayerHandle {
    pub const PRIMARY: Self = Self { slot: 0 };

    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Read-only view of the living player, taken after the player's update
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub handle: PlayerHandle,
    pub position: Vec3,
}

/// Everything an entity may read or request during `update`
pub struct UpdateContext<'a> {
    pub rng: &'a mut GameRng,
    pub input: &'a dyn InputSource,
    pub settings: &'a Settings,
    /// `None` when the player is dead
    pub player: Option<PlayerView>,
    pub events: &'a mut Vec<GameEvent>,
}

impl UpdateContext<'_> {
    /// Handle to the current living player, if any
    pub fn alive_player(&self) -> Option<PlayerHandle> {
        self.player.map(|p| p.handle)
    }

    /// Position of the player behind `handle`, or `None` if it is dead
    pub fn resolve(&self, handle: PlayerHandle) -> Option<Vec3> {
        self.player
            .filter(|p| p.handle == handle)
            .map(|p| p.position)
    }
}

/// Kinematic, health and lifecycle state shared by every variant
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub color: Rgba8,
    pub scale: f32,
    /// 0 = east, counter-clockwise positive
    pub angle_degrees: f32,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
    pub physics_radius: f32,
    /// Bounds visible geometry; always >= physics radius
    pub cosmetic_radius: f32,
    /// Seconds since spawn
    pub age: f32,
    pub health: i32,
    pub last_hit_time: f32,
    pub hit_duration: f32,
    pub dead: bool,
    /// Ready for pool removal
    pub garbage: bool,
}

impl Body {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            color: Rgba8::MAGENTA,
            scale: 1.0,
            angle_degrees: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            physics_radius: 1.0,
            cosmetic_radius: 1.0,
            age: 0.0,
            health: 1,
            last_hit_time: -HIT_TIME,
            hit_duration: HIT_TIME,
            dead: false,
            garbage: false,
        }
    }

    pub fn with_radii(mut self, physics: f32, cosmetic: f32) -> Self {
        debug_assert!(physics <= cosmetic);
        self.physics_radius = physics;
        self.cosmetic_radius = cosmetic;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    /// Explicit Euler step. Position and angle advance with the current
    /// velocities before the velocities themselves are advanced.
    pub fn integrate(&mut self, dt: f32) {
        self.age += dt;

        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;

        self.angle_degrees += self.angular_velocity * dt;
        self.angular_velocity += self.angular_acceleration * dt;
    }

    pub fn forward(&self) -> Vec3 {
        polar_degrees_xy(self.angle_degrees, 1.0)
    }

    pub fn position_2d(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Circle-circle test on physics radii
    pub fn overlaps(&self, other: &Body) -> bool {
        circles_overlap(
            self.position_2d(),
            self.physics_radius,
            other.position_2d(),
            other.physics_radius,
        )
    }

    /// True once the cosmetic disc is fully past the shake margin on any side
    pub fn is_offscreen(&self) -> bool {
        let margin = MAX_SCREEN_SHAKE + self.cosmetic_radius;
        self.position.x < -margin
            || self.position.x > WORLD_SIZE_X + margin
            || self.position.y < -margin
            || self.position.y > WORLD_SIZE_Y + margin
    }

    /// Teleport to the opposite edge on every axis that is out of bounds
    pub fn wrap(&mut self) {
        let margin = MAX_SCREEN_SHAKE + self.cosmetic_radius;
        if self.position.x < -margin {
            self.position.x = WORLD_SIZE_X + margin;
        } else if self.position.x > WORLD_SIZE_X + margin {
            self.position.x = -margin;
        }
        if self.position.y < -margin {
            self.position.y = WORLD_SIZE_Y + margin;
        } else if self.position.y > WORLD_SIZE_Y + margin {
            self.position.y = -margin;
        }
    }

    pub fn was_just_hit(&self) -> bool {
        self.last_hit_time + self.hit_duration > self.age
    }

    /// White while flashing, `base` otherwise
    pub fn flash_color(&self, base: Rgba8) -> Rgba8 {
        if self.was_just_hit() {
            Rgba8::WHITE
        } else {
            base
        }
    }

    pub fn transform(&self) -> Transform2 {
        Transform2 {
            position: self.position_2d(),
            rotation_degrees: self.angle_degrees,
            scale: self.scale,
        }
    }
}

/// Variant-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    PlayerShip(PlayerShip),
    Asteroid(Asteroid),
    Bullet(Bullet),
    Debris(Debris),
    Beetle(Beetle),
    Wasp(Wasp),
}

/// A simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn player_ship(position: Vec3) -> Self {
        Self {
            body: PlayerShip::body(position),
            kind: EntityKind::PlayerShip(PlayerShip::default()),
        }
    }

    pub fn asteroid(position: Vec3) -> Self {
        Self {
            body: Asteroid::body(position),
            kind: EntityKind::Asteroid(Asteroid::default()),
        }
    }

    pub fn bullet(position: Vec3, degrees: f32) -> Self {
        Self {
            body: Bullet::body(position, degrees),
            kind: EntityKind::Bullet(Bullet),
        }
    }

    pub fn debris(position: Vec3, color: Rgba8, lifespan: f32) -> Self {
        Self {
            body: Debris::body(position),
            kind: EntityKind::Debris(Debris::new(color, lifespan)),
        }
    }

    pub fn beetle(position: Vec3) -> Self {
        Self {
            body: Beetle::body(position),
            kind: EntityKind::Beetle(Beetle::default()),
        }
    }

    pub fn wasp(position: Vec3) -> Self {
        Self {
            body: Wasp::body(position),
            kind: EntityKind::Wasp(Wasp::default()),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.body.dead
    }

    pub fn is_garbage(&self) -> bool {
        self.body.garbage
    }

    pub fn health(&self) -> i32 {
        self.body.health
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Second construction phase: randomized geometry and motion
    pub fn create(&mut self, rng: &mut GameRng) {
        match &mut self.kind {
            EntityKind::Asteroid(asteroid) => asteroid.create(&mut self.body, rng),
            EntityKind::Debris(debris) => debris.create(&mut self.body, rng),
            EntityKind::PlayerShip(_)
            | EntityKind::Bullet(_)
            | EntityKind::Beetle(_)
            | EntityKind::Wasp(_) => {}
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>) {
        let body = &mut self.body;
        match &mut self.kind {
            EntityKind::PlayerShip(ship) => ship.update(body, dt, ctx),
            EntityKind::Asteroid(asteroid) => {
                asteroid.update(body, dt, ctx.settings.asteroids_wrap)
            }
            EntityKind::Bullet(bullet) => bullet.update(body, dt, ctx.settings.bullets_wrap),
            EntityKind::Debris(debris) => debris.update(body, dt),
            EntityKind::Beetle(beetle) => beetle.update(body, dt, ctx),
            EntityKind::Wasp(wasp) => wasp.update(body, dt, ctx),
        }
    }

    /// Subtract health and record the hit. Crossing to health <= 0 marks the
    /// entity dead and runs its death effect; later hits never re-run it.
    pub fn damage(&mut self, amount: i32, events: &mut Vec<GameEvent>) {
        self.body.health -= amount;
        self.body.last_hit_time = self.body.age;

        if self.body.health <= 0 && !self.body.dead {
            self.body.dead = true;
            self.die(events);
        }
    }

    /// Variant death effect
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        let body = &mut self.body;
        match &mut self.kind {
            EntityKind::PlayerShip(_) => PlayerShip::die(body, events),
            EntityKind::Asteroid(_) => Asteroid::die(body, events),
            EntityKind::Bullet(_) => Bullet::die(body, events),
            EntityKind::Debris(_) => Debris::die(body),
            // Wasp feedback fires on destroy
            EntityKind::Beetle(_) => Beetle::die(body, events),
            EntityKind::Wasp(_) => {}
        }
    }

    /// Final lifecycle step, run by the session when it empties the slot.
    /// Owned geometry buffers are released with `self`.
    pub fn destroy(self, events: &mut Vec<GameEvent>) {
        if let EntityKind::Wasp(_) = self.kind {
            Wasp::destroy(&self.body, events);
        }
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.body.overlaps(&other.body)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        let body = &self.body;
        let transform = body.transform();
        match &self.kind {
            EntityKind::PlayerShip(ship) => {
                if body.dead {
                    return;
                }
                let verts = shapes::player_ship(ship.exhaust_tip());
                renderer.draw_vertices(&mut verts.into_iter(), &transform);
            }
            EntityKind::Asteroid(asteroid) => {
                let verts = shapes::fan(asteroid.corners(), body.color);
                renderer.draw_vertices(&mut verts.into_iter(), &transform);
            }
            EntityKind::Bullet(_) => {
                renderer.draw_vertices(&mut shapes::bullet().into_iter(), &transform);
            }
            EntityKind::Debris(debris) => {
                let alpha = debris.alpha(body.age);
                let mut verts = debris.local_visual().iter().map(|v| v.with_alpha(alpha));
                renderer.draw_vertices(&mut verts, &transform);
            }
            EntityKind::Beetle(_) => {
                renderer.draw_vertices(&mut shapes::beetle(body.color).into_iter(), &transform);
            }
            EntityKind::Wasp(_) => {
                renderer.draw_vertices(&mut shapes::wasp(body.color).into_iter(), &transform);
            }
        }
    }

    /// Velocity line plus physics and cosmetic circles
    pub fn debug_render(&self, renderer: &mut dyn Renderer) {
        use crate::palette::{DEBUG_COSMETIC_CIRCLE, DEBUG_PHYSICS_CIRCLE, DEBUG_VELOCITY_COLOR};

        let center = self.body.position_2d();
        let velocity_tip = center + self.body.velocity.truncate();
        let mut verts = shapes::line(center, velocity_tip, 0.2, DEBUG_VELOCITY_COLOR);
        verts.extend(shapes::circle_outline(
            center,
            self.body.physics_radius,
            0.1,
            DEBUG_PHYSICS_CIRCLE,
        ));
        verts.extend(shapes::circle_outline(
            center,
            self.body.cosmetic_radius,
            0.1,
            DEBUG_COSMETIC_CIRCLE,
        ));
        renderer.draw_vertices(&mut verts.into_iter(), &Transform2::IDENTITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(events: &mut Vec<GameEvent>) -> Vec<GameEvent> {
        std::mem::take(events)
    }

    #[test]
    fn test_integrate_order() {
        let mut body = Body::new(Vec3::ZERO);
        body.velocity = Vec3::new(1.0, 0.0, 0.0);
        body.acceleration = Vec3::new(10.0, 0.0, 0.0);
        body.angular_velocity = 90.0;
        body.angular_acceleration = 10.0;

        body.integrate(0.5);

        // Position used the velocity from before this step
        assert_eq!(body.position.x, 0.5);
        assert_eq!(body.velocity.x, 6.0);
        assert_eq!(body.angle_degrees, 45.0);
        assert_eq!(body.angular_velocity, 95.0);
        assert_eq!(body.age, 0.5);
    }

    #[test]
    fn test_damage_fires_die_once() {
        let mut asteroid = Entity::asteroid(Vec3::new(50.0, 50.0, 0.0));
        let mut events = Vec::new();

        asteroid.damage(1, &mut events);
        assert!(!asteroid.is_dead());
        assert!(events.is_empty());
        assert!(asteroid.body.was_just_hit());

        asteroid.damage(5, &mut events);
        assert!(asteroid.is_dead());
        let first = drain(&mut events);
        assert!(first.iter().any(|e| matches!(e, GameEvent::DebrisBurst { count: 30, .. })));

        asteroid.damage(1, &mut events);
        assert!(events.is_empty());
        assert_eq!(asteroid.health(), -4);
    }

    fn every_kind() -> Vec<Entity> {
        let at = Vec3::new(60.0, 40.0, 0.0);
        vec![
            Entity::player_ship(at),
            Entity::asteroid(at),
            Entity::bullet(at, 0.0),
            Entity::debris(at, Rgba8::WHITE, 1.0),
            Entity::beetle(at),
            Entity::wasp(at),
        ]
    }

    fn update_once(entity: &mut Entity) -> Vec<GameEvent> {
        let mut rng = GameRng::new(7);
        let input = crate::platform::InputState::new();
        let settings = Settings::default();
        let mut events = Vec::new();
        let mut ctx = UpdateContext {
            rng: &mut rng,
            input: &input,
            settings: &settings,
            player: None,
            events: &mut events,
        };
        entity.update(1.0 / 60.0, &mut ctx);
        events
    }

    /// Lethal damage, more damage, one update
    fn kill_and_step(entity: &mut Entity, lethal: i32, extra: i32) {
        let mut events = Vec::new();
        entity.damage(lethal, &mut events);
        assert!(entity.is_dead(), "{:?}", entity.kind);
        let silent_death = matches!(entity.kind, EntityKind::Wasp(_) | EntityKind::Debris(_));
        assert_eq!(events.is_empty(), silent_death, "{:?}", entity.kind);

        drain(&mut events);
        entity.damage(extra, &mut events);
        assert!(events.is_empty(), "{:?} died twice", entity.kind);

        update_once(entity);
        let is_ship = matches!(entity.kind, EntityKind::PlayerShip(_));
        assert_eq!(entity.is_garbage(), !is_ship, "{:?}", entity.kind);
    }

    #[test]
    fn test_every_kind_dies_once_then_becomes_garbage() {
        for mut entity in every_kind() {
            let health = entity.health();
            kill_and_step(&mut entity, health, 1);
        }
    }

    proptest::proptest! {
        #[test]
        fn prop_death_fires_once_for_any_damage(extra in 0i32..20, overkill in 0i32..20) {
            for mut entity in every_kind() {
                let lethal = entity.health() + overkill;
                kill_and_step(&mut entity, lethal, extra);
            }
        }
    }

    #[test]
    fn test_wasp_die_is_silent_destroy_is_not() {
        let mut wasp = Entity::wasp(Vec3::new(10.0, 10.0, 0.0));
        let mut events = Vec::new();
        wasp.damage(2, &mut events);
        assert!(wasp.is_dead());
        assert!(events.is_empty());

        wasp.destroy(&mut events);
        assert!(events.contains(&GameEvent::ScreenShake(0.1)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::DebrisBurst { count: 14, .. })));
    }

    #[test]
    fn test_hit_flash_window() {
        let mut body = Body::new(Vec3::ZERO);
        assert!(!body.was_just_hit());
        body.last_hit_time = body.age;
        assert!(body.was_just_hit());
        body.integrate(HIT_TIME + 0.01);
        assert!(!body.was_just_hit());
        assert_eq!(body.flash_color(Rgba8::GREEN), Rgba8::GREEN);
    }

    #[test]
    fn test_offscreen_and_wrap() {
        let mut body = Body::new(Vec3::new(-20.0, 50.0, 0.0)).with_radii(2.0, 3.0);
        assert!(body.is_offscreen());
        body.wrap();
        assert_eq!(body.position.x, WORLD_SIZE_X + 13.0);
        assert_eq!(body.position.y, 50.0);

        let inside = Body::new(Vec3::new(-12.0, 50.0, 0.0)).with_radii(2.0, 3.0);
        assert!(!inside.is_offscreen());
    }

    #[test]
    fn test_overlap_uses_physics_radius() {
        let a = Body::new(Vec3::ZERO).with_radii(1.0, 10.0);
        let mut b = Body::new(Vec3::new(1.9, 0.0, 0.0)).with_radii(1.0, 10.0);
        assert!(a.overlaps(&b));
        b.position.x = 2.0;
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_resolve_requires_alive_player() {
        let mut rng = GameRng::new(1);
        let input = crate::platform::InputState::new();
        let settings = Settings::default();
        let mut events = Vec::new();
        let ctx = UpdateContext {
            rng: &mut rng,
            input: &input,
            settings: &settings,
            player: None,
            events: &mut events,
        };
        assert_eq!(ctx.alive_player(), None);
        assert_eq!(ctx.resolve(PlayerHandle::PRIMARY), None);
    }
}
