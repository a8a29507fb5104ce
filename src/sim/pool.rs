//! Fixed-capacity entity pools
//!
//! One [`Pool`] per entity kind. A slot owns at most one entity; inserting
//! takes the first empty slot, sweeping empties every slot whose entity is
//! garbage. Slots carry a generation that is bumped when they are emptied,
//! so an [`EntityHandle`] taken before a sweep can never reach the
//! entity that later reuses its slot.

use super::entity::{Entity, EntityType};
use crate::settings::PoolCapacities;

/// Generation-checked reference to a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    pub kind: EntityType,
    index: u32,
    generation: u32,
}

impl EntityHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

#[derive(Debug, Clone)]
pub struct Pool {
    kind: EntityType,
    slots: Vec<Slot>,
}

impl Pool {
    pub fn new(kind: EntityType, capacity: usize) -> Self {
        Self {
            kind,
            slots: vec![Slot::default(); capacity],
        }
    }

    pub fn kind(&self) -> EntityType {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots (live or awaiting sweep)
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entity.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.entity.is_none())
    }

    pub fn live_count(&self) -> usize {
        self.iter().filter(|(_, e)| e.is_alive()).count()
    }

    /// Place an entity in the first empty slot
    ///
    /// A full pool drops the entity and logs a warning; the caller carries on.
    pub fn insert(&mut self, entity: Entity) -> Option<EntityHandle> {
        debug_assert_eq!(entity.entity_type(), self.kind, "entity inserted into the wrong pool");
        let Some(index) = self.slots.iter().position(|s| s.entity.is_none()) else {
            log::warn!(
                "Cannot spawn {}: all {} slots are full",
                self.kind.name(),
                self.slots.len()
            );
            return None;
        };
        let slot = &mut self.slots[index];
        slot.entity = Some(entity);
        Some(EntityHandle {
            kind: self.kind,
            index: index as u32,
            generation: slot.generation,
        })
    }

    fn slot_for(&self, handle: EntityHandle) -> Option<&Slot> {
        if handle.kind != self.kind {
            return None;
        }
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.slot_for(handle)?.entity.as_ref()
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        if handle.kind != self.kind {
            return None;
        }
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation)?
            .entity
            .as_mut()
    }

    /// Entity in slot `index`, if any
    pub fn at(&self, index: usize) -> Option<&Entity> {
        self.slots.get(index)?.entity.as_ref()
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.slots.get_mut(index)?.entity.as_mut()
    }

    /// Two distinct occupied slots borrowed at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Entity, &mut Entity)> {
        if a == b || a.max(b) >= self.slots.len() {
            return None;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = head[lo].entity.as_mut()?;
        let second = tail[0].entity.as_mut()?;
        if a < b {
            Some((first, second))
        } else {
            Some((second, first))
        }
    }

    /// Handle for the entity currently in slot `index`
    pub fn handle_at(&self, index: usize) -> Option<EntityHandle> {
        let slot = self.slots.get(index)?;
        slot.entity.as_ref()?;
        Some(EntityHandle {
            kind: self.kind,
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Occupied slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        let kind = self.kind;
        self.slots.iter().enumerate().filter_map(move |(i, s)| {
            s.entity.as_ref().map(|e| {
                (
                    EntityHandle {
                        kind,
                        index: i as u32,
                        generation: s.generation,
                    },
                    e,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter_map(|s| s.entity.as_mut())
    }

    /// Live entities in slot order
    pub fn alive(&self) -> impl Iterator<Item = &Entity> {
        self.iter().map(|(_, e)| e).filter(|e| e.is_alive())
    }

    /// Empty every slot holding garbage; returns how many were reclaimed
    pub fn sweep(&mut self) -> usize {
        let mut reclaimed = 0;
        for slot in &mut self.slots {
            if slot.entity.as_ref().is_some_and(|e| e.is_garbage()) {
                slot.entity = None;
                slot.generation = slot.generation.wrapping_add(1);
                reclaimed += 1;
            }
        }
        reclaimed
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.entity.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
    }
}

/// One pool per entity kind
#[derive(Debug, Clone)]
pub struct Pools {
    pub ships: Pool,
    pub projectiles: Pool,
    pub asteroids: Pool,
    pub debris: Pool,
    pub beetles: Pool,
    pub wasps: Pool,
    pub stars: Pool,
}

impl Pools {
    pub fn new(caps: &PoolCapacities) -> Self {
        Self {
            ships: Pool::new(EntityType::Ship, caps.ships),
            projectiles: Pool::new(EntityType::Projectile, caps.projectiles),
            asteroids: Pool::new(EntityType::Asteroid, caps.asteroids),
            debris: Pool::new(EntityType::Debris, caps.debris),
            beetles: Pool::new(EntityType::Beetle, caps.beetles),
            wasps: Pool::new(EntityType::Wasp, caps.wasps),
            stars: Pool::new(EntityType::Star, caps.stars),
        }
    }

    pub fn pool(&self, kind: EntityType) -> &Pool {
        match kind {
            EntityType::Ship => &self.ships,
            EntityType::Projectile => &self.projectiles,
            EntityType::Asteroid => &self.asteroids,
            EntityType::Debris => &self.debris,
            EntityType::Beetle => &self.beetles,
            EntityType::Wasp => &self.wasps,
            EntityType::Star => &self.stars,
        }
    }

    pub fn pool_mut(&mut self, kind: EntityType) -> &mut Pool {
        match kind {
            EntityType::Ship => &mut self.ships,
            EntityType::Projectile => &mut self.projectiles,
            EntityType::Asteroid => &mut self.asteroids,
            EntityType::Debris => &mut self.debris,
            EntityType::Beetle => &mut self.beetles,
            EntityType::Wasp => &mut self.wasps,
            EntityType::Star => &mut self.stars,
        }
    }

    /// Route an entity to its kind's pool
    pub fn insert(&mut self, entity: Entity) -> Option<EntityHandle> {
        self.pool_mut(entity.entity_type()).insert(entity)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.pool(handle.kind).get(handle)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.pool_mut(handle.kind).get_mut(handle)
    }

    /// Sweep every pool; ships are never garbage so their pool is untouched
    pub fn sweep(&mut self) -> usize {
        EntityType::ALL
            .iter()
            .map(|kind| self.pool_mut(*kind).sweep())
            .sum()
    }

    pub fn clear(&mut self) {
        for kind in EntityType::ALL {
            self.pool_mut(kind).clear();
        }
    }

    /// No beetles or wasps remain
    pub fn wave_enemies_cleared(&self) -> bool {
        self.beetles.is_empty() && self.wasps.is_empty()
    }

    pub fn any_garbage(&self) -> bool {
        EntityType::ALL
            .iter()
            .any(|kind| self.pool(*kind).iter().any(|(_, e)| e.is_garbage()))
    }
}
