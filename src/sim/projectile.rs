//! Projectiles: ballistic, gone on leaving the world or on first hit

use glam::Vec2;

use super::context::{FrameContext, SpawnRequest};
use super::entity::{Entity, EntityKind};
use crate::consts::*;
use crate::renderer::colors;

const DEATH_DEBRIS: usize = 3;
const DEATH_DEBRIS_SPREAD: f32 = 30.0;

pub fn new_projectile(pos: Vec2, orientation_deg: f32, vel: Vec2) -> Entity {
    Entity::new(
        EntityKind::Projectile,
        pos,
        orientation_deg,
        colors::PROJECTILE,
        PROJECTILE_PHYSICS_RADIUS,
        PROJECTILE_COSMETIC_RADIUS,
        1,
    )
    .with_velocity(vel)
}

pub(super) fn update(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    e.pos += e.vel * dt;
    if e.is_offscreen(&ctx.world) {
        e.expire();
    }
}

/// A small spray kicked back against the direction of travel
pub(super) fn on_death(e: &mut Entity, ctx: &mut FrameContext) {
    ctx.spawn(SpawnRequest::Burst {
        count: DEATH_DEBRIS,
        origin: e.pos,
        average_vel: -e.vel,
        spread_speed: DEATH_DEBRIS_SPREAD,
        radius: e.physics_radius() * DEBRIS_SCALE,
        color: e.original_color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::SeededRng;
    use crate::sim::context::WorldBounds;

    #[test]
    fn test_leaving_world_expires_quietly() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(1);
        let mut ctx = FrameContext::new(&mut audio, &mut rng, Default::default(), WorldBounds::new(100.0, 100.0));
        let mut p = new_projectile(Vec2::new(99.0, 50.0), 0.0, Vec2::new(70.0, 0.0));

        p.update(0.01, &mut ctx);
        assert!(p.is_alive());
        p.update(0.1, &mut ctx);
        assert!(!p.is_alive());
        assert!(p.is_garbage());
        assert!(ctx.effects.is_empty(), "no debris for leaving the world");
    }

    #[test]
    fn test_hit_death_sprays_backwards() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(1);
        let mut ctx = FrameContext::new(&mut audio, &mut rng, Default::default(), WorldBounds::new(100.0, 100.0));
        let mut p = new_projectile(Vec2::new(50.0, 50.0), 0.0, Vec2::new(70.0, 0.0));
        p.die(&mut ctx);
        match ctx.effects.spawns.as_slice() {
            [SpawnRequest::Burst { count, average_vel, .. }] => {
                assert_eq!(*count, DEATH_DEBRIS);
                assert_eq!(*average_vel, Vec2::new(-70.0, 0.0));
            }
            other => panic!("unexpected spawns {:?}", other),
        }
    }
}
