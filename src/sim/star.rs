//! Background stars: fixed, blinking, never collide or die

use glam::Vec2;

use super::context::FrameContext;
use super::entity::{Entity, EntityKind};
use crate::consts::{STAR_BLINK_PERIOD, STAR_COSMETIC_RADIUS};
use crate::platform::{BlinkTimer, ClockHandle};
use crate::range_map_clamped;
use crate::renderer::colors;

#[derive(Debug, Clone)]
pub struct StarData {
    pub scale: f32,
    /// Phase offset added to the shared blink, in periods
    pub blink_offset: f32,
    pub blink: BlinkTimer,
}

impl StarData {
    /// Alpha (0..=1) following a sine over the shared blink period
    pub fn alpha(&self) -> f32 {
        let t = (self.blink.elapsed_fraction() + self.blink_offset).rem_euclid(1.0);
        let s = (t * 360.0).to_radians().sin();
        range_map_clamped(s, -1.0, 1.0, 0.0, 1.0)
    }
}

pub fn new_star(pos: Vec2, scale: f32, blink_offset: f32, clock: ClockHandle) -> Entity {
    let data = StarData {
        scale,
        blink_offset,
        blink: BlinkTimer::new(clock, STAR_BLINK_PERIOD),
    };
    Entity::new(EntityKind::Star(data), pos, 0.0, colors::STAR, 0.0, STAR_COSMETIC_RADIUS * scale, 1)
}

pub(super) fn update(_e: &mut Entity, _dt: f32, _ctx: &mut FrameContext) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::GameClock;

    #[test]
    fn test_blink_follows_shared_clock() {
        let mut clock = GameClock::new();
        let star = new_star(Vec2::ZERO, 1.0, 0.0, clock.handle());
        let data = match &star.kind {
            EntityKind::Star(d) => d.clone(),
            _ => panic!("not a star"),
        };
        assert!((data.alpha() - 0.5).abs() < 1e-4);
        clock.advance(0.25);
        assert!((data.alpha() - 1.0).abs() < 1e-4);
        clock.advance(0.5);
        assert!(data.alpha() < 1e-4);
    }

    #[test]
    fn test_offset_shifts_phase() {
        let clock = GameClock::new();
        let star = new_star(Vec2::ZERO, 1.0, 0.75, clock.handle());
        let EntityKind::Star(data) = &star.kind else {
            panic!("not a star");
        };
        assert!(data.alpha() < 1e-4);
    }
}
