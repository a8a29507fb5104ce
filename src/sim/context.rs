//! Per-frame context handed to entity behaviour
//!
//! Entities never own a pointer back to the game. Anything they need from
//! outside themselves (sound, randomness, spawning children, camera shake)
//! goes through a [`FrameContext`] that lives for one simulation step.
//! Spawns and shake are queued in [`Effects`] and applied by the step after
//! the pass that produced them.

use glam::Vec2;

use super::ship::ShipCommand;
use crate::audio::{AudioMix, AudioSystem, PlaybackId, SoundEffect};
use crate::consts::MAX_SHIPS;
use crate::platform::{InputState, RandomSource};
use crate::renderer::Color;

/// Host capabilities for one call into the game
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioSystem,
    pub input: &'a dyn InputState,
    pub rng: &'a mut dyn RandomSource,
}

/// Playable area, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// True if a disc of `radius` at `pos` lies fully outside the world
    pub fn is_offscreen(&self, pos: Vec2, radius: f32) -> bool {
        pos.x < -radius || pos.x > self.width + radius || pos.y < -radius || pos.y > self.height + radius
    }

    /// Teleport to the opposite edge once a disc has fully left the world
    ///
    /// Only the axis that crossed is wrapped.
    pub fn wrap(&self, pos: Vec2, radius: f32) -> Vec2 {
        let mut wrapped = pos;
        if pos.x < -radius {
            wrapped.x = self.width;
        } else if pos.x > self.width + radius {
            wrapped.x = 0.0;
        }
        if pos.y < -radius {
            wrapped.y = self.height;
        } else if pos.y > self.height + radius {
            wrapped.y = 0.0;
        }
        wrapped
    }
}

/// A deferred spawn, applied by the spawner between passes
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    Projectile {
        pos: Vec2,
        orientation_deg: f32,
        vel: Vec2,
    },
    Fan {
        origin: Vec2,
        orientation_deg: f32,
        base_vel: Vec2,
        count: usize,
        spread_deg: f32,
    },
    Burst {
        count: usize,
        origin: Vec2,
        average_vel: Vec2,
        spread_speed: f32,
        radius: f32,
        color: Color,
    },
}

/// Side effects queued during a pass
#[derive(Debug, Default)]
pub struct Effects {
    pub spawns: Vec<SpawnRequest>,
    /// Camera trauma to add, per player view
    pub trauma: [f32; MAX_SHIPS],
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.trauma.iter().all(|t| *t == 0.0)
    }

    pub fn bursts(&self) -> usize {
        self.spawns
            .iter()
            .filter(|s| matches!(s, SpawnRequest::Burst { .. }))
            .count()
    }
}

/// Everything entity behaviour may touch besides the entity itself
pub struct FrameContext<'a> {
    pub audio: &'a mut dyn AudioSystem,
    pub rng: &'a mut dyn RandomSource,
    pub mix: AudioMix,
    pub world: WorldBounds,
    pub multiplayer: bool,
    /// Control intent per ship slot
    pub commands: [ShipCommand; MAX_SHIPS],
    /// Positions wasps may seek (live, uncloaked ships)
    pub targets: Vec<Vec2>,
    pub effects: Effects,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        audio: &'a mut dyn AudioSystem,
        rng: &'a mut dyn RandomSource,
        mix: AudioMix,
        world: WorldBounds,
    ) -> Self {
        Self {
            audio,
            rng,
            mix,
            world,
            multiplayer: false,
            commands: [ShipCommand::default(); MAX_SHIPS],
            targets: Vec::new(),
            effects: Effects::default(),
        }
    }

    pub fn play(&mut self, effect: SoundEffect) -> PlaybackId {
        self.mix.play(&mut *self.audio, effect)
    }

    pub fn spawn(&mut self, request: SpawnRequest) {
        self.effects.spawns.push(request);
    }

    pub fn add_trauma(&mut self, player: usize, amount: f32) {
        if let Some(t) = self.effects.trauma.get_mut(player) {
            *t += amount;
        }
    }

    pub fn add_trauma_all(&mut self, amount: f32) {
        for t in &mut self.effects.trauma {
            *t += amount;
        }
    }

    /// Take the queued effects, leaving an empty queue
    pub fn take_effects(&mut self) -> Effects {
        std::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offscreen_uses_radius() {
        let world = WorldBounds::new(100.0, 50.0);
        assert!(!world.is_offscreen(Vec2::new(-1.0, 10.0), 2.0));
        assert!(world.is_offscreen(Vec2::new(-3.0, 10.0), 2.0));
        assert!(world.is_offscreen(Vec2::new(50.0, 53.0), 2.0));
    }

    #[test]
    fn test_wrap_only_after_fully_leaving() {
        let world = WorldBounds::new(100.0, 50.0);
        assert_eq!(world.wrap(Vec2::new(-1.0, 10.0), 2.0), Vec2::new(-1.0, 10.0));
        assert_eq!(world.wrap(Vec2::new(-3.0, 10.0), 2.0), Vec2::new(100.0, 10.0));
        assert_eq!(world.wrap(Vec2::new(103.0, 53.0), 2.0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_wrap_keeps_the_axis_that_did_not_cross() {
        let world = WorldBounds::new(200.0, 100.0);
        assert_eq!(world.wrap(Vec2::new(-0.5, -3.0), 2.25), Vec2::new(-0.5, 100.0));
        assert_eq!(world.wrap(Vec2::new(201.0, 103.0), 2.25), Vec2::new(201.0, 0.0));
        assert_eq!(world.wrap(Vec2::new(-3.0, 99.0), 2.25), Vec2::new(200.0, 99.0));
    }
}
