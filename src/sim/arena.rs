//! Generational arena for the live body collection.
//!
//! Bodies live in a dense vec (stable iteration order, cache-friendly
//! per-frame sweeps) addressed through slotmap keys. Removal swap-removes the
//! dense slot and fixes up the moved body's mapping, so ids never shift and a
//! removed id is permanently invalid.

use slotmap::SlotMap;

use super::body::{Body, BodyId};

#[derive(Debug, Default)]
pub struct BodyArena {
    /// id -> dense slot
    slots: SlotMap<BodyId, usize>,
    /// dense slot -> id (parallel to `bodies`)
    handles: Vec<BodyId>,
    bodies: Vec<Body>,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a body, assigning and returning its id.
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let slot = self.bodies.len();
        let id = self.slots.insert(slot);
        body.id = id;
        self.handles.push(id);
        self.bodies.push(body);
        id
    }

    /// Remove by id. The last body backfills the freed slot.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let slot = self.slots.remove(id)?;
        let body = self.bodies.swap_remove(slot);
        self.handles.swap_remove(slot);
        if slot < self.bodies.len() {
            // Fix the moved body's slot mapping
            self.slots[self.handles[slot]] = slot;
        }
        Some(body)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(id).map(|&slot| &self.bodies[slot])
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let slot = *self.slots.get(id)?;
        Some(&mut self.bodies[slot])
    }

    /// Dense slot for a live id, `None` for stale ids.
    pub fn slot_of(&self, id: BodyId) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// Ids in dense order (parallel to `bodies`)
    pub fn handles(&self) -> &[BodyId] {
        &self.handles
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Mutable access to two distinct slots, `i < j`.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &mut Body) {
        debug_assert!(i < j);
        let (left, right) = self.bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    }
}
