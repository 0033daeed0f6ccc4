/// Unique identifier for an entity. Never reused by the allocator that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Monotonic entity ID source.
///
/// Owned by the [`EngineContext`](crate::api::game::EngineContext) rather than
/// living in a global, so tests can start from a known value.
#[derive(Debug, Clone)]
pub struct EntityIdAllocator {
    next: u32,
}

impl EntityIdAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Hand out the next ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The ID the next call to `next_id` will return.
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Small integer tag deciding which collision handler a shape pair goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionType(pub u32);

/// Back-reference from a collider to the entity that owns it.
///
/// Stored packed in the collider's `user_data`, so collision callbacks can get
/// from a low-level shape back to game-level identity without pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeTag {
    pub kind: CollisionType,
    pub id: EntityId,
}

// Marker in the top 32 bits so an untouched (zero) user_data never decodes.
const TAG_MARKER: u128 = 0xFA11_0000;

impl ShapeTag {
    pub fn new(kind: CollisionType, id: EntityId) -> Self {
        Self { kind, id }
    }

    pub fn pack(self) -> u128 {
        (TAG_MARKER << 96) | ((self.kind.0 as u128) << 32) | self.id.0 as u128
    }

    pub fn unpack(user_data: u128) -> Option<Self> {
        if user_data >> 96 != TAG_MARKER {
            return None;
        }
        Some(Self {
            kind: CollisionType((user_data >> 32) as u32),
            id: EntityId(user_data as u32),
        })
    }
}
