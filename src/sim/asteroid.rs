//! Asteroids: straight-line drifters that wrap at the world edges

use glam::Vec2;

use super::context::{FrameContext, SpawnRequest};
use super::entity::{Entity, EntityKind};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::direction_from_degrees;
use crate::platform::RandomSource;
use crate::renderer::colors;

const DEATH_DEBRIS: usize = 8;
const DEATH_DEBRIS_SPREAD: f32 = 5.0;
pub const ENEMY_DEATH_TRAUMA: f32 = 0.1;

/// Asteroid-only state
#[derive(Debug, Clone)]
pub struct AsteroidData {
    /// Outline radius per evenly spaced vertex, fixed at construction
    pub outline: Vec<f32>,
    /// Visual spin, independent of the drift heading
    pub spin_deg: f32,
}

/// Random convex-ish outline: `points` radii uniformly in `[min, max]`
pub fn random_outline(points: usize, min: f32, max: f32, rng: &mut dyn RandomSource) -> Vec<f32> {
    (0..points).map(|_| rng.random_float_in_range(min, max)).collect()
}

pub fn new_asteroid(pos: Vec2, orientation_deg: f32, rng: &mut dyn RandomSource) -> Entity {
    let data = AsteroidData {
        outline: random_outline(
            ASTEROID_OUTLINE_POINTS,
            ASTEROID_PHYSICS_RADIUS,
            ASTEROID_COSMETIC_RADIUS,
            rng,
        ),
        spin_deg: 0.0,
    };
    let mut e = Entity::new(
        EntityKind::Asteroid(data),
        pos,
        orientation_deg,
        colors::ASTEROID,
        ASTEROID_PHYSICS_RADIUS,
        ASTEROID_COSMETIC_RADIUS,
        ASTEROID_HEALTH,
    )
    .with_velocity(direction_from_degrees(orientation_deg) * ASTEROID_SPEED);
    e.angular_vel = rng.random_float_in_range(-ASTEROID_MAX_SPIN, ASTEROID_MAX_SPIN);
    e
}

pub(super) fn update(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    e.vel = e.forward() * ASTEROID_SPEED;
    e.pos += e.vel * dt;
    let spin = e.angular_vel * dt;
    if let EntityKind::Asteroid(data) = &mut e.kind {
        data.spin_deg += spin;
    }
    e.pos = ctx.world.wrap(e.pos, e.cosmetic_radius());
}

pub(super) fn on_death(e: &mut Entity, ctx: &mut FrameContext) {
    ctx.add_trauma_all(ENEMY_DEATH_TRAUMA);
    ctx.play(SoundEffect::EnemyDie);
    ctx.spawn(SpawnRequest::Burst {
        count: DEATH_DEBRIS,
        origin: e.pos,
        average_vel: e.vel,
        spread_speed: DEATH_DEBRIS_SPREAD,
        radius: e.physics_radius() * DEBRIS_SCALE,
        color: e.original_color,
    });
}
