use std::collections::HashMap;

use crate::api::types::EntityId;

/// Anything stored in a [`Pool`] must be able to say who it is.
pub trait Pooled {
    fn id(&self) -> EntityId;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("{kind} pool is full (capacity {capacity})")]
    Full { kind: &'static str, capacity: usize },
}

/// Fixed-capacity entity storage with swap-with-last removal.
///
/// Live entities always occupy slots `0..len`. Removing one moves the last
/// live entity into the hole and patches its lookup entry, so IDs stay valid
/// across removals but references into the pool do not: re-resolve by ID after
/// any `remove`.
pub struct Pool<T: Pooled> {
    kind: &'static str,
    slots: Vec<T>,
    lookup: HashMap<EntityId, usize>,
    capacity: usize,
}

impl<T: Pooled> Pool<T> {
    /// Create a pool. `kind` is only used in error and log messages.
    pub fn with_capacity(kind: &'static str, capacity: usize) -> Self {
        Self {
            kind,
            slots: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Store an entity in the next free slot.
    pub fn insert(&mut self, value: T) -> Result<&mut T, PoolError> {
        self.ensure_room()?;
        let id = value.id();
        debug_assert!(!self.lookup.contains_key(&id), "{:?} inserted twice", id);
        let index = self.slots.len();
        self.lookup.insert(id, index);
        self.slots.push(value);
        Ok(&mut self.slots[index])
    }

    /// Whether another entity would fit.
    pub fn has_room(&self) -> bool {
        self.slots.len() < self.capacity
    }

    /// Fail early, before anything gets built for an entity that won't fit.
    pub fn ensure_room(&self) -> Result<(), PoolError> {
        if self.has_room() {
            Ok(())
        } else {
            Err(PoolError::Full {
                kind: self.kind,
                capacity: self.capacity,
            })
        }
    }

    /// Remove an entity by ID. Removing an ID that is not live is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let index = self.lookup.remove(&id)?;
        let removed = self.slots.swap_remove(index);
        if let Some(moved) = self.slots.get(index) {
            self.lookup.insert(moved.id(), index);
        }
        Some(removed)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.lookup.get(&id).map(|&i| &self.slots[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        match self.lookup.get(&id) {
            Some(&i) => Some(&mut self.slots[i]),
            None => None,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Current slot of an entity. Changes when other entities are removed.
    pub fn slot_of(&self, id: EntityId) -> Option<usize> {
        self.lookup.get(&id).copied()
    }

    /// Iterate live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    /// Snapshot of live IDs, for loops that remove while walking.
    pub fn ids(&self) -> Vec<EntityId> {
        self.slots.iter().map(Pooled::id).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Drop every entity. Use [`drain`](Pool::drain) when they own something
    /// that must be released first.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.slots.clear();
    }

    /// Remove every entity, handing them back for cleanup.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.lookup.clear();
        self.slots.drain(..)
    }
}
