//! Debris: short-lived cosmetic fragments

use glam::Vec2;

use super::asteroid::random_outline;
use super::context::FrameContext;
use super::entity::{Entity, EntityKind};
use crate::consts::*;
use crate::platform::RandomSource;
use crate::range_map_clamped;
use crate::renderer::Color;

const SPIN: f32 = 200.0;
/// Alpha at spawn, out of 255
const START_ALPHA: f32 = 127.0;

#[derive(Debug, Clone)]
pub struct DebrisData {
    pub outline: Vec<f32>,
}

pub fn new_debris(pos: Vec2, vel: Vec2, radius: f32, color: Color, rng: &mut dyn RandomSource) -> Entity {
    let physics = radius * DEBRIS_PHYSICS_SCALE;
    let cosmetic = radius * DEBRIS_COSMETIC_SCALE;
    let orientation = rng.random_float_in_range(0.0, 360.0);
    let data = DebrisData {
        outline: random_outline(DEBRIS_OUTLINE_POINTS, physics, cosmetic, rng),
    };
    let mut e = Entity::new(EntityKind::Debris(data), pos, orientation, color, physics, cosmetic, 1)
        .with_velocity(vel);
    e.angular_vel = rng.random_float_in_range(-SPIN, SPIN);
    e
}

pub(super) fn update(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    e.pos += e.vel * dt;
    e.orientation_deg += e.angular_vel * dt;
    if e.is_offscreen(&ctx.world) || e.age > DEBRIS_LIFETIME_SECONDS {
        e.expire();
    }
}

/// Alpha (0..=1) fading linearly over the lifetime
pub fn fade_alpha(age: f32) -> f32 {
    range_map_clamped(age, 0.0, DEBRIS_LIFETIME_SECONDS, START_ALPHA, 0.0) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::SeededRng;
    use crate::renderer::colors;
    use crate::sim::context::WorldBounds;

    #[test]
    fn test_expires_after_lifetime() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(9);
        let mut d = new_debris(Vec2::new(50.0, 50.0), Vec2::ZERO, 1.0, colors::ASTEROID, &mut rng);
        let mut ctx = FrameContext::new(&mut audio, &mut rng, Default::default(), WorldBounds::new(100.0, 100.0));
        d.update(1.0, &mut ctx);
        assert!(d.is_alive());
        d.update(1.5, &mut ctx);
        assert!(d.is_garbage());
        assert!(ctx.effects.is_empty());
    }

    #[test]
    fn test_fade() {
        assert!((fade_alpha(0.0) - 127.0 / 255.0).abs() < 1e-6);
        assert_eq!(fade_alpha(DEBRIS_LIFETIME_SECONDS), 0.0);
        assert_eq!(fade_alpha(10.0), 0.0);
    }
}
