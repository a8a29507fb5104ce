//! Beetles (ground) and wasps (flying)
//!
//! Beetles wander with a bounded random turn at constant speed. Wasps seek
//! the nearest live, uncloaked ship and accelerate toward it up to a cap.
//! Both wrap at the world edges.

use glam::Vec2;

use super::asteroid::ENEMY_DEATH_TRAUMA;
use super::context::{FrameContext, SpawnRequest};
use super::entity::{Entity, EntityKind};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::degrees_of;
use crate::renderer::colors;

const DEATH_DEBRIS: usize = 8;
const DEATH_DEBRIS_SPREAD: f32 = 10.0;

pub fn new_beetle(pos: Vec2, orientation_deg: f32) -> Entity {
    Entity::new(
        EntityKind::Beetle,
        pos,
        orientation_deg,
        colors::BEETLE,
        BEETLE_PHYSICS_RADIUS,
        BEETLE_COSMETIC_RADIUS,
        BEETLE_HEALTH,
    )
}

pub fn new_wasp(pos: Vec2, orientation_deg: f32) -> Entity {
    Entity::new(
        EntityKind::Wasp,
        pos,
        orientation_deg,
        colors::WASP,
        WASP_PHYSICS_RADIUS,
        WASP_COSMETIC_RADIUS,
        WASP_HEALTH,
    )
}

pub(super) fn update_beetle(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    let turn = ctx.rng.random_float_in_range(-BEETLE_WANDER_TURN, BEETLE_WANDER_TURN);
    e.orientation_deg += turn * dt;
    e.vel = e.forward() * BEETLE_SPEED;
    e.pos += e.vel * dt;
    e.pos = ctx.world.wrap(e.pos, e.cosmetic_radius());
}

/// Closest of `targets` to `from`, first one wins ties
pub fn nearest_target(from: Vec2, targets: &[Vec2]) -> Option<Vec2> {
    targets.iter().copied().fold(None, |best: Option<Vec2>, t| match best {
        Some(b) if from.distance_squared(b) <= from.distance_squared(t) => Some(b),
        _ => Some(t),
    })
}

pub(super) fn update_wasp(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    if let Some(target) = nearest_target(e.pos, &ctx.targets) {
        let to_target = target - e.pos;
        if to_target != Vec2::ZERO {
            e.orientation_deg = degrees_of(to_target);
        }
        e.vel = (e.vel + e.forward() * WASP_ACCELERATION * dt).clamp_length_max(WASP_MAX_SPEED);
    }
    e.pos += e.vel * dt;
    e.pos = ctx.world.wrap(e.pos, e.cosmetic_radius());
}

pub(super) fn on_death(e: &mut Entity, ctx: &mut FrameContext) {
    ctx.play(SoundEffect::EnemyDie);
    ctx.add_trauma_all(ENEMY_DEATH_TRAUMA);
    ctx.spawn(SpawnRequest::Burst {
        count: DEATH_DEBRIS,
        origin: e.pos,
        average_vel: e.vel,
        spread_speed: DEATH_DEBRIS_SPREAD,
        radius: e.physics_radius() * DEBRIS_SCALE,
        color: e.original_color,
    });
}
