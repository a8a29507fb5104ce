//! Common entity state and the per-kind dispatch
//!
//! Every simulated object is an [`Entity`]: shared kinematic, health and
//! lifecycle fields plus an [`EntityKind`] carrying per-kind data. Behaviour
//! is dispatched with exhaustive matches over [`EntityType`].

use glam::Vec2;

use super::asteroid::AsteroidData;
use super::context::FrameContext;
use super::debris::DebrisData;
use super::ship::ShipData;
use super::star::StarData;
use super::{asteroid, debris, enemy, projectile, ship, star};
use crate::audio::SoundEffect;
use crate::consts::HIT_FLASH_SECONDS;
use crate::direction_from_degrees;
use crate::renderer::{Color, colors};

/// The closed set of entity kinds (also names the pool each lives in)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Ship,
    Projectile,
    Asteroid,
    Debris,
    Beetle,
    Wasp,
    Star,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::Ship,
        EntityType::Projectile,
        EntityType::Asteroid,
        EntityType::Debris,
        EntityType::Beetle,
        EntityType::Wasp,
        EntityType::Star,
    ];

    /// Kinds that shoot at, get pushed apart from, and collide with ships
    pub const ENEMIES: [EntityType; 3] = [EntityType::Asteroid, EntityType::Beetle, EntityType::Wasp];

    pub fn name(&self) -> &'static str {
        match self {
            EntityType::Ship => "ship",
            EntityType::Projectile => "projectile",
            EntityType::Asteroid => "asteroid",
            EntityType::Debris => "debris",
            EntityType::Beetle => "beetle",
            EntityType::Wasp => "wasp",
            EntityType::Star => "star",
        }
    }

    pub fn is_enemy(&self) -> bool {
        Self::ENEMIES.contains(self)
    }
}

/// Per-kind data
#[derive(Debug, Clone)]
pub enum EntityKind {
    Ship(ShipData),
    Projectile,
    Asteroid(AsteroidData),
    Debris(DebrisData),
    Beetle,
    Wasp,
    Star(StarData),
}

impl EntityKind {
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityKind::Ship(_) => EntityType::Ship,
            EntityKind::Projectile => EntityType::Projectile,
            EntityKind::Asteroid(_) => EntityType::Asteroid,
            EntityKind::Debris(_) => EntityType::Debris,
            EntityKind::Beetle => EntityType::Beetle,
            EntityKind::Wasp => EntityType::Wasp,
            EntityKind::Star(_) => EntityType::Star,
        }
    }
}

/// A simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub orientation_deg: f32,
    /// Degrees per second
    pub angular_vel: f32,
    pub age: f32,
    pub health: i32,
    physics_radius: f32,
    cosmetic_radius: f32,
    pub color: Color,
    pub original_color: Color,
    /// Seconds of hit flash remaining
    pub hit_flash: f32,
    alive: bool,
    garbage: bool,
    pub kind: EntityKind,
}

impl Entity {
    /// Create a live entity; the cosmetic radius is raised to the physics radius if smaller
    pub fn new(
        kind: EntityKind,
        pos: Vec2,
        orientation_deg: f32,
        color: Color,
        physics_radius: f32,
        cosmetic_radius: f32,
        health: i32,
    ) -> Self {
        let physics_radius = physics_radius.max(0.0);
        Self {
            pos,
            vel: Vec2::ZERO,
            orientation_deg,
            angular_vel: 0.0,
            age: 0.0,
            health,
            physics_radius,
            cosmetic_radius: cosmetic_radius.max(physics_radius),
            color,
            original_color: color,
            hit_flash: 0.0,
            alive: true,
            garbage: false,
            kind,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_garbage(&self) -> bool {
        self.garbage
    }

    pub fn physics_radius(&self) -> f32 {
        self.physics_radius
    }

    pub fn cosmetic_radius(&self) -> f32 {
        self.cosmetic_radius
    }

    pub fn forward(&self) -> Vec2 {
        direction_from_degrees(self.orientation_deg)
    }

    pub fn is_offscreen(&self, world: &super::context::WorldBounds) -> bool {
        world.is_offscreen(self.pos, self.cosmetic_radius)
    }

    /// Ship data, if this is a ship
    pub fn ship(&self) -> Option<&ShipData> {
        match &self.kind {
            EntityKind::Ship(data) => Some(data),
            _ => None,
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut ShipData> {
        match &mut self.kind {
            EntityKind::Ship(data) => Some(data),
            _ => None,
        }
    }

    /// Advance one frame (no-op for dead entities)
    pub fn update(&mut self, dt: f32, ctx: &mut FrameContext) {
        if !self.alive {
            return;
        }
        self.age += dt;
        self.tick_hit_flash(dt);

        match self.entity_type() {
            EntityType::Ship => ship::update(self, dt, ctx),
            EntityType::Projectile => projectile::update(self, dt, ctx),
            EntityType::Asteroid => asteroid::update(self, dt, ctx),
            EntityType::Debris => debris::update(self, dt, ctx),
            EntityType::Beetle => enemy::update_beetle(self, dt, ctx),
            EntityType::Wasp => enemy::update_wasp(self, dt, ctx),
            EntityType::Star => star::update(self, dt, ctx),
        }
    }

    /// Take one point of damage; the caller decides whether to call [`Entity::die`]
    pub fn be_hit(&mut self, ctx: &mut FrameContext) {
        self.health -= 1;
        self.hit_flash = HIT_FLASH_SECONDS;
        self.color = colors::HIT_FLASH;
        ctx.play(SoundEffect::Hit);
    }

    /// Kill the entity, running its death effects exactly once
    ///
    /// Returns false (and does nothing) if the entity was already dead or
    /// cannot die.
    pub fn die(&mut self, ctx: &mut FrameContext) -> bool {
        if !self.alive {
            return false;
        }
        match self.entity_type() {
            EntityType::Star => return false,
            EntityType::Ship => {
                // Ships stay in their slot and respawn in place
                self.alive = false;
                ship::on_death(self, ctx);
            }
            EntityType::Projectile => {
                self.mark_dead();
                projectile::on_death(self, ctx);
            }
            EntityType::Asteroid => {
                self.mark_dead();
                asteroid::on_death(self, ctx);
            }
            EntityType::Debris => self.mark_dead(),
            EntityType::Beetle | EntityType::Wasp => {
                self.mark_dead();
                enemy::on_death(self, ctx);
            }
        }
        true
    }

    /// Remove without death effects (left the world, expired); ships and stars stay
    pub fn expire(&mut self) {
        if !matches!(self.entity_type(), EntityType::Ship | EntityType::Star) {
            self.mark_dead();
        }
    }

    /// Bring a dead ship back; other kinds are never revived
    pub(crate) fn revive(&mut self) {
        if self.entity_type() == EntityType::Ship {
            self.alive = true;
            self.garbage = false;
        }
    }

    fn mark_dead(&mut self) {
        self.alive = false;
        self.garbage = true;
    }

    fn tick_hit_flash(&mut self, dt: f32) {
        if self.hit_flash > 0.0 {
            self.hit_flash -= dt;
            if self.hit_flash <= 0.0 {
                self.hit_flash = 0.0;
                self.color = self.original_color;
            }
        }
    }
}

/// Two entities overlap iff their physics discs overlap
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    super::collision::discs_overlap(a.pos, a.physics_radius, b.pos, b.physics_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::SeededRng;
    use crate::sim::context::WorldBounds;
    use proptest::prelude::*;

    fn ctx<'a>(audio: &'a mut RecordingAudio, rng: &'a mut SeededRng) -> FrameContext<'a> {
        FrameContext::new(audio, rng, Default::default(), WorldBounds::new(200.0, 100.0))
    }

    #[test]
    fn test_die_is_idempotent() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(3);
        let mut wasp = enemy::new_wasp(Vec2::new(10.0, 10.0), 0.0);
        {
            let mut ctx = ctx(&mut audio, &mut rng);
            assert!(wasp.die(&mut ctx));
            assert!(!wasp.die(&mut ctx));
            assert_eq!(ctx.effects.bursts(), 1);
        }
        assert!(!wasp.is_alive());
        assert!(wasp.is_garbage());
        assert_eq!(audio.count(SoundEffect::EnemyDie), 1);
    }

    #[test]
    fn test_be_hit_flashes_then_reverts() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(3);
        let mut ctx = ctx(&mut audio, &mut rng);
        let mut beetle = enemy::new_beetle(Vec2::new(50.0, 50.0), 0.0);
        let start_health = beetle.health;

        beetle.be_hit(&mut ctx);
        assert_eq!(beetle.health, start_health - 1);
        assert!(beetle.is_alive());
        assert_eq!(beetle.color, colors::HIT_FLASH);

        beetle.update(HIT_FLASH_SECONDS + 0.01, &mut ctx);
        assert_eq!(beetle.color, beetle.original_color);
    }

    #[test]
    fn test_stars_never_die() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(3);
        let mut ctx = ctx(&mut audio, &mut rng);
        let clock = crate::platform::GameClock::new();
        let mut s = star::new_star(Vec2::ZERO, 1.0, 0.5, clock.handle());
        assert!(!s.die(&mut ctx));
        s.expire();
        assert!(s.is_alive());
        assert!(!s.is_garbage());
    }

    #[test]
    fn test_expired_star_survives_sweep() {
        let clock = crate::platform::GameClock::new();
        let mut pools = crate::sim::Pools::new(&crate::settings::PoolCapacities::default());
        let handle = pools.insert(star::new_star(Vec2::ZERO, 1.0, 0.5, clock.handle())).unwrap();
        pools.get_mut(handle).unwrap().expire();
        assert_eq!(pools.sweep(), 0);
        assert!(pools.get(handle).is_some_and(|s| s.is_alive()));
    }

    #[test]
    fn test_dead_entities_do_not_update() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(3);
        let mut ctx = ctx(&mut audio, &mut rng);
        let mut bullet = projectile::new_projectile(Vec2::new(50.0, 50.0), 0.0, Vec2::new(10.0, 0.0));
        bullet.expire();
        bullet.update(1.0, &mut ctx);
        assert_eq!(bullet.pos, Vec2::new(50.0, 50.0));
        assert_eq!(bullet.age, 0.0);
    }

    proptest! {
        #[test]
        fn prop_physics_radius_within_cosmetic(physics in 0.0f32..50.0, cosmetic in 0.0f32..50.0) {
            let e = Entity::new(EntityKind::Wasp, Vec2::ZERO, 0.0, colors::WASP, physics, cosmetic, 1);
            prop_assert!(e.physics_radius() <= e.cosmetic_radius());
        }

        #[test]
        fn prop_debris_radii_ordered(radius in 0.0f32..10.0, seed in any::<u64>()) {
            let mut rng = SeededRng::new(seed);
            let d = debris::new_debris(Vec2::ZERO, Vec2::ZERO, radius, colors::ASTEROID, &mut rng);
            prop_assert!(d.physics_radius() <= d.cosmetic_radius());
        }
    }
}
