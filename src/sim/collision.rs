//! Overlap detection and resolution
//!
//! Everything collides as a disc of its physics radius. There is no swept
//! test, so a fast projectile can pass through a thin target between frames.
//!
//! Resolution runs after every entity has moved, in four passes:
//! 1. enemies are pushed apart (no damage)
//! 2. projectiles hit enemies
//! 3. enemies hit ships
//! 4. ships bump each other (multiplayer)
//!
//! Within a pass, pools are walked in slot order and the first overlapping
//! candidate wins. Dead entities are never tested.

use glam::Vec2;

use super::context::FrameContext;
use super::entity::{Entity, EntityType, overlaps};
use super::pool::{Pool, Pools};
use super::ship;

/// Counts of what each pass resolved this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub separations: usize,
    pub projectile_hits: usize,
    pub ship_hits: usize,
    pub ship_bumps: usize,
}

/// Discs overlap when their centers are closer than the sum of the radii
#[inline]
pub fn discs_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance_squared(b_pos) < (a_radius + b_radius) * (a_radius + b_radius)
}

/// New centers after moving each disc half the penetration depth apart
///
/// Coincident centers separate along +X.
pub fn push_apart(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> (Vec2, Vec2) {
    let delta = b_pos - a_pos;
    let distance = delta.length();
    let depth = a_radius + b_radius - distance;
    if depth <= 0.0 {
        return (a_pos, b_pos);
    }
    let normal = if distance > f32::EPSILON { delta / distance } else { Vec2::X };
    let half = normal * (depth * 0.5);
    (a_pos - half, b_pos + half)
}

/// Run all passes in order
pub fn resolve(pools: &mut Pools, ctx: &mut FrameContext) -> CollisionReport {
    let report = CollisionReport {
        separations: separate_enemies(pools),
        projectile_hits: projectiles_vs_enemies(pools, ctx),
        ship_hits: enemies_vs_ships(pools, ctx),
        ship_bumps: if ctx.multiplayer { ships_vs_ships(&mut pools.ships, ctx) } else { 0 },
    };
    if report != CollisionReport::default() {
        log::debug!("Collisions: {:?}", report);
    }
    report
}

#[derive(Debug, Clone, Copy)]
struct Disc {
    kind: EntityType,
    index: usize,
    pos: Vec2,
    radius: f32,
}

/// Pass 1: each live enemy is pushed apart from the first other enemy it overlaps
pub fn separate_enemies(pools: &mut Pools) -> usize {
    let mut discs: Vec<Disc> = EntityType::ENEMIES
        .iter()
        .flat_map(|kind| {
            let pool = pools.pool(*kind);
            (0..pool.capacity()).filter_map(move |index| {
                let e = pool.at(index).filter(|e| e.is_alive())?;
                Some(Disc {
                    kind: *kind,
                    index,
                    pos: e.pos,
                    radius: e.physics_radius(),
                })
            })
        })
        .collect();

    let mut separations = 0;
    for i in 0..discs.len() {
        let a = discs[i];
        let other = (0..discs.len())
            .find(|&j| j != i && discs_overlap(a.pos, a.radius, discs[j].pos, discs[j].radius));
        if let Some(j) = other {
            let (a_pos, b_pos) = push_apart(a.pos, a.radius, discs[j].pos, discs[j].radius);
            discs[i].pos = a_pos;
            discs[j].pos = b_pos;
            separations += 1;
        }
    }

    if separations > 0 {
        for disc in &discs {
            if let Some(e) = pools.pool_mut(disc.kind).at_mut(disc.index) {
                e.pos = disc.pos;
            }
        }
    }
    separations
}

/// Apply one hit to `target`, killing it when its health runs out
fn hit(target: &mut Entity, ctx: &mut FrameContext) {
    target.be_hit(ctx);
    if target.health <= 0 {
        target.die(ctx);
    }
}

/// Pass 2: a projectile dies on the first live enemy it overlaps
pub fn projectiles_vs_enemies(pools: &mut Pools, ctx: &mut FrameContext) -> usize {
    let Pools {
        projectiles,
        asteroids,
        beetles,
        wasps,
        ..
    } = pools;

    let mut hits = 0;
    for projectile in projectiles.iter_mut() {
        if !projectile.is_alive() {
            continue;
        }
        'targets: for enemies in [&mut *asteroids, &mut *beetles, &mut *wasps] {
            for enemy in enemies.iter_mut() {
                if enemy.is_alive() && overlaps(projectile, enemy) {
                    projectile.die(ctx);
                    hit(enemy, ctx);
                    hits += 1;
                    break 'targets;
                }
            }
        }
    }
    hits
}

/// Pass 3: live enemies against live, uncloaked ships; contact kills the ship
pub fn enemies_vs_ships(pools: &mut Pools, ctx: &mut FrameContext) -> usize {
    let Pools {
        ships,
        asteroids,
        beetles,
        wasps,
        ..
    } = pools;

    let mut hits = 0;
    for enemies in [&mut *asteroids, &mut *beetles, &mut *wasps] {
        for enemy in enemies.iter_mut() {
            for ship in ships.iter_mut() {
                if !enemy.is_alive() {
                    break;
                }
                let cloaked = ship.ship().is_some_and(|s| s.cloaked);
                if !ship.is_alive() || cloaked {
                    continue;
                }
                if overlaps(enemy, ship) {
                    ship.die(ctx);
                    hit(enemy, ctx);
                    hits += 1;
                }
            }
        }
    }
    hits
}

/// Pass 4: two live overlapping ships both reverse
pub fn ships_vs_ships(ships: &mut Pool, ctx: &mut FrameContext) -> usize {
    let Some((a, b)) = ships.pair_mut(0, 1) else {
        return 0;
    };
    if a.is_alive() && b.is_alive() && overlaps(a, b) {
        ship::bounce_apart(a, b, ctx);
        1
    } else {
        0
    }
}
