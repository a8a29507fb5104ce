//! Entity construction and placement
//!
//! The spawner builds entities and hands them to their pool. Pool
//! exhaustion is not an error here: the pool logs and the spawn is dropped.

use glam::Vec2;

use super::context::{SpawnRequest, WorldBounds};
use super::entity::{Entity, EntityType};
use super::pool::{EntityHandle, Pools};
use super::{asteroid, debris, enemy, projectile, ship, star};
use crate::consts::*;
use crate::direction_from_degrees;
use crate::platform::{ClockHandle, RandomSource};
use crate::renderer::{Color, colors};

const STAR_SCALE_MIN: f32 = 0.5;
const STAR_BLINK_OFFSET_MIN: f32 = 0.5;

/// Enemy and asteroid counts for one wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveCounts {
    pub beetles: usize,
    pub wasps: usize,
    pub asteroids: usize,
}

/// Counts scale linearly with the wave number and double in multiplayer
pub fn wave_counts(wave: u32, multiplayer: bool) -> WaveCounts {
    let wave = wave as usize;
    let factor = if multiplayer { 2 } else { 1 };
    WaveCounts {
        beetles: wave * 8 * factor,
        wasps: wave * 4 * factor,
        asteroids: (wave * 10 + 20) * factor,
    }
}

/// Cosmetic radius a kind spawns with (debris varies, stars have no edge spawns)
pub fn spawn_radius(kind: EntityType) -> f32 {
    match kind {
        EntityType::Ship => SHIP_COSMETIC_RADIUS,
        EntityType::Projectile => PROJECTILE_COSMETIC_RADIUS,
        EntityType::Asteroid => ASTEROID_COSMETIC_RADIUS,
        EntityType::Debris => DEBRIS_SCALE * DEBRIS_COSMETIC_SCALE,
        EntityType::Beetle => BEETLE_COSMETIC_RADIUS,
        EntityType::Wasp => WASP_COSMETIC_RADIUS,
        EntityType::Star => STAR_COSMETIC_RADIUS,
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    world: WorldBounds,
    clock: ClockHandle,
}

impl Spawner {
    pub fn new(world: WorldBounds, clock: ClockHandle) -> Self {
        Self { world, clock }
    }

    pub fn world(&self) -> WorldBounds {
        self.world
    }

    /// Build an entity of `kind` with its default attributes
    pub fn build(
        &self,
        kind: EntityType,
        pos: Vec2,
        orientation_deg: f32,
        player: usize,
        rng: &mut dyn RandomSource,
    ) -> Entity {
        match kind {
            EntityType::Ship => {
                let mut e = ship::new_ship(player, &self.world);
                e.pos = pos;
                e.orientation_deg = orientation_deg;
                if let Some(data) = e.ship_mut() {
                    data.start_pos = pos;
                    data.start_orientation_deg = orientation_deg;
                }
                e
            }
            EntityType::Projectile => projectile::new_projectile(
                pos,
                orientation_deg,
                direction_from_degrees(orientation_deg) * PROJECTILE_SPEED,
            ),
            EntityType::Asteroid => asteroid::new_asteroid(pos, orientation_deg, rng),
            EntityType::Debris => debris::new_debris(pos, Vec2::ZERO, DEBRIS_SCALE, colors::ASTEROID, rng),
            EntityType::Beetle => enemy::new_beetle(pos, orientation_deg),
            EntityType::Wasp => enemy::new_wasp(pos, orientation_deg),
            EntityType::Star => {
                let scale = rng.random_float_in_range(STAR_SCALE_MIN, 1.0);
                let offset = rng.random_float_in_range(STAR_BLINK_OFFSET_MIN, 1.0);
                star::new_star(pos, scale, offset, self.clock.clone())
            }
        }
    }

    /// Build and insert into the first free slot of the kind's pool
    ///
    /// `player` is the owning player slot; only ships use it.
    pub fn spawn_at(
        &self,
        pools: &mut Pools,
        kind: EntityType,
        pos: Vec2,
        orientation_deg: f32,
        player: usize,
        rng: &mut dyn RandomSource,
    ) -> Option<EntityHandle> {
        pools.insert(self.build(kind, pos, orientation_deg, player, rng))
    }

    /// Spawn just outside a uniformly chosen world edge, facing a uniform direction
    ///
    /// Ships spawned this way belong to player A.
    pub fn spawn_at_random_edge(
        &self,
        pools: &mut Pools,
        kind: EntityType,
        rng: &mut dyn RandomSource,
    ) -> Option<EntityHandle> {
        let pos = self.random_edge_position(spawn_radius(kind), rng);
        let orientation_deg = rng.random_float_in_range(0.0, 360.0);
        self.spawn_at(pools, kind, pos, orientation_deg, 0, rng)
    }

    fn random_edge_position(&self, radius: f32, rng: &mut dyn RandomSource) -> Vec2 {
        let (w, h) = (self.world.width, self.world.height);
        match rng.random_int_in_range(0, 3) {
            0 => Vec2::new(rng.random_float_in_range(0.0, w), h + radius),
            1 => Vec2::new(rng.random_float_in_range(0.0, w), -radius),
            2 => Vec2::new(-radius, rng.random_float_in_range(0.0, h)),
            _ => Vec2::new(w + radius, rng.random_float_in_range(0.0, h)),
        }
    }

    /// Debris spray: `average_vel` plus a random offset of magnitude in `[1, spread_speed]`
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_burst(
        &self,
        pools: &mut Pools,
        count: usize,
        origin: Vec2,
        average_vel: Vec2,
        spread_speed: f32,
        radius: f32,
        color: Color,
        rng: &mut dyn RandomSource,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let theta = rng.random_float_in_range(0.0, 360.0);
            let speed = rng.random_float_in_range(1.0, spread_speed.max(1.0));
            let vel = average_vel + direction_from_degrees(theta) * speed;
            if pools
                .insert(debris::new_debris(origin, vel, radius, color, rng))
                .is_some()
            {
                spawned += 1;
            }
        }
        spawned
    }

    /// Projectiles evenly spread over `[orientation - spread/2, orientation + spread/2]`
    ///
    /// A single projectile fires straight ahead.
    pub fn spawn_fan(
        &self,
        pools: &mut Pools,
        origin: Vec2,
        orientation_deg: f32,
        base_vel: Vec2,
        count: usize,
        spread_deg: f32,
    ) -> usize {
        let mut spawned = 0;
        for angle in fan_angles(orientation_deg, count, spread_deg) {
            let vel = base_vel + direction_from_degrees(angle) * PROJECTILE_SPEED;
            if pools.insert(projectile::new_projectile(origin, angle, vel)).is_some() {
                spawned += 1;
            }
        }
        spawned
    }

    /// Apply queued spawns in order
    pub fn apply(&self, pools: &mut Pools, requests: Vec<SpawnRequest>, rng: &mut dyn RandomSource) {
        for request in requests {
            match request {
                SpawnRequest::Projectile {
                    pos,
                    orientation_deg,
                    vel,
                } => {
                    pools.insert(projectile::new_projectile(pos, orientation_deg, vel));
                }
                SpawnRequest::Fan {
                    origin,
                    orientation_deg,
                    base_vel,
                    count,
                    spread_deg,
                } => {
                    self.spawn_fan(pools, origin, orientation_deg, base_vel, count, spread_deg);
                }
                SpawnRequest::Burst {
                    count,
                    origin,
                    average_vel,
                    spread_speed,
                    radius,
                    color,
                } => {
                    self.spawn_burst(pools, count, origin, average_vel, spread_speed, radius, color, rng);
                }
            }
        }
    }

    /// Spawn one wave's beetles, wasps and asteroids at random edges
    pub fn spawn_wave(
        &self,
        pools: &mut Pools,
        wave: u32,
        multiplayer: bool,
        rng: &mut dyn RandomSource,
    ) -> WaveCounts {
        let counts = wave_counts(wave, multiplayer);
        let batches = [
            (EntityType::Beetle, counts.beetles),
            (EntityType::Wasp, counts.wasps),
            (EntityType::Asteroid, counts.asteroids),
        ];
        for (kind, count) in batches {
            for _ in 0..count {
                self.spawn_at_random_edge(pools, kind, rng);
            }
        }
        counts
    }

    /// Fill the star pool with stars at random positions
    pub fn spawn_stars(&self, pools: &mut Pools, rng: &mut dyn RandomSource) {
        for _ in 0..pools.stars.capacity() {
            let pos = Vec2::new(
                rng.random_float_in_range(0.0, self.world.width),
                rng.random_float_in_range(0.0, self.world.height),
            );
            self.spawn_at(pools, EntityType::Star, pos, 0.0, 0, rng);
        }
    }

    /// Create the player ships at their start positions
    pub fn spawn_ships(&self, pools: &mut Pools, multiplayer: bool) {
        let players = if multiplayer { MAX_SHIPS } else { 1 };
        for player in 0..players {
            pools.ships.insert(ship::new_ship(player, &self.world));
        }
    }
}

/// Orientations of a fan of `count` shots
pub fn fan_angles(orientation_deg: f32, count: usize, spread_deg: f32) -> impl Iterator<Item = f32> {
    let (start, step) = if count <= 1 {
        (orientation_deg, 0.0)
    } else {
        (orientation_deg - spread_deg * 0.5, spread_deg / (count - 1) as f32)
    };
    (0..count).map(move |i| start + step * i as f32)
}
