//! Starswarm - simulation core of a two-player arcade space shooter
//!
//! Core modules:
//! - `sim`: Entity pools, per-frame update/collision/sweep pipeline, waves
//! - `renderer`: Renderer capability, vertex type, shape and scene builders
//! - `platform`: Input, randomness and clock capabilities
//! - `audio`: Sound tags and the audio capability
//! - `settings`: Data-driven world size, pool capacities and volumes

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{PoolCapacities, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World dimensions (world units)
    pub const WORLD_SIZE_X: f32 = 1000.0;
    pub const WORLD_SIZE_Y: f32 = 500.0;
    pub const WORLD_CENTER_X: f32 = WORLD_SIZE_X / 2.0;
    pub const WORLD_CENTER_Y: f32 = WORLD_SIZE_Y / 2.0;

    /// Pool capacities
    pub const MAX_SHIPS: usize = 2;
    pub const MAX_PROJECTILES: usize = 3000;
    pub const MAX_ASTEROIDS: usize = 400;
    pub const MAX_DEBRIS: usize = 300;
    pub const MAX_BEETLES: usize = 100;
    pub const MAX_WASPS: usize = 100;
    pub const MAX_STARS: usize = 100;

    /// Waves
    pub const MAX_WAVES: u32 = 5;
    pub const GAME_OVER_RESET_SECONDS: f32 = 3.0;

    /// Player ship
    pub const SHIP_ACCELERATION: f32 = 30.0;
    pub const SHIP_TURN_SPEED: f32 = 300.0; // degrees per second
    pub const SHIP_MAX_SPEED: f32 = 50.0;
    pub const SHIP_PHYSICS_RADIUS: f32 = 1.75;
    pub const SHIP_COSMETIC_RADIUS: f32 = 2.25;
    pub const SHIP_START_OFFSET_X: f32 = 50.0;
    pub const SHIP_EXTRA_LIVES: i32 = 3;
    pub const FIRE_COOLDOWN: f32 = 0.1;
    pub const SPECIAL_A_COOLDOWN: f32 = 1.0;
    pub const SPECIAL_A_COUNT: usize = 12;
    pub const SPECIAL_A_SPREAD: f32 = 60.0;
    pub const SPECIAL_B_COOLDOWN: f32 = 2.0;
    pub const SPECIAL_B_COUNT: usize = 36;
    pub const SPECIAL_B_SPREAD: f32 = 360.0;
    pub const CLOAK_COOLDOWN: f32 = 10.0;
    pub const CLOAK_DURATION: f32 = 3.0;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 70.0;
    pub const PROJECTILE_PHYSICS_RADIUS: f32 = 0.5;
    pub const PROJECTILE_COSMETIC_RADIUS: f32 = 2.0;

    /// Asteroids
    pub const ASTEROID_SPEED: f32 = 10.0;
    pub const ASTEROID_HEALTH: i32 = 4;
    pub const ASTEROID_PHYSICS_RADIUS: f32 = 1.6;
    pub const ASTEROID_COSMETIC_RADIUS: f32 = 2.0;
    pub const ASTEROID_MAX_SPIN: f32 = 200.0;
    pub const ASTEROID_OUTLINE_POINTS: usize = 16;

    /// Beetles (ground enemy)
    pub const BEETLE_SPEED: f32 = 15.0;
    pub const BEETLE_HEALTH: i32 = 3;
    pub const BEETLE_PHYSICS_RADIUS: f32 = 1.75;
    pub const BEETLE_COSMETIC_RADIUS: f32 = 2.25;
    pub const BEETLE_WANDER_TURN: f32 = 90.0; // max degrees per second

    /// Wasps (flying enemy)
    pub const WASP_ACCELERATION: f32 = 10.0;
    pub const WASP_MAX_SPEED: f32 = 40.0;
    pub const WASP_HEALTH: i32 = 2;
    pub const WASP_PHYSICS_RADIUS: f32 = 1.75;
    pub const WASP_COSMETIC_RADIUS: f32 = 2.25;

    /// Debris
    pub const DEBRIS_LIFETIME_SECONDS: f32 = 2.0;
    pub const DEBRIS_SCALE: f32 = 0.5;
    /// Debris radii as multiples of the requested size
    pub const DEBRIS_PHYSICS_SCALE: f32 = 0.5;
    pub const DEBRIS_COSMETIC_SCALE: f32 = 1.5;
    pub const DEBRIS_OUTLINE_POINTS: usize = 8;

    /// Stars
    pub const STAR_BLINK_PERIOD: f32 = 1.0;
    /// Cosmetic radius of a full-scale star
    pub const STAR_COSMETIC_RADIUS: f32 = 3.0;

    /// Hit flash
    pub const HIT_FLASH_SECONDS: f32 = 0.2;

    /// Camera shake
    pub const CAM_SHAKE_REDUCTION_PER_SECOND: f32 = 0.5;
    pub const CAM_SHAKE_MAX: f32 = 1.0;

    /// Slow-motion time scale
    pub const SLOW_TIME_SCALE: f32 = 0.1;

    pub const DEBUG_LINE_THICKNESS: f32 = 0.2;
}

/// Unit vector pointing along `degrees` (counter-clockwise from +X)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Heading of a vector in degrees
#[inline]
pub fn degrees_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Map `value` from `[in_start, in_end]` to `[out_start, out_end]`, clamped to the output range
pub fn range_map_clamped(value: f32, in_start: f32, in_end: f32, out_start: f32, out_end: f32) -> f32 {
    if in_start == in_end {
        return out_start;
    }
    let t = ((value - in_start) / (in_end - in_start)).clamp(0.0, 1.0);
    out_start + (out_end - out_start) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_degrees() {
        let right = direction_from_degrees(0.0);
        assert!((right - Vec2::X).length() < 1e-5);
        let up = direction_from_degrees(90.0);
        assert!((up - Vec2::Y).length() < 1e-5);
        assert!((degrees_of(up) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_range_map_clamped() {
        assert_eq!(range_map_clamped(0.5, 0.0, 1.0, 0.0, 10.0), 5.0);
        assert_eq!(range_map_clamped(2.0, 0.0, 1.0, 0.0, 10.0), 10.0);
        assert_eq!(range_map_clamped(-1.0, 0.0, 2.0, 127.0, 0.0), 127.0);
    }
}
