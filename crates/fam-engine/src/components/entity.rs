use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::physics::{BoundingBox, PhysicsBody, PhysicsWorld};
use crate::core::pool::Pooled;

/// Base shared by every simulated entity: identity, its physics body, and the
/// position it had before the last tick (for interpolated drawing).
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Body and primary collider.
    pub body: PhysicsBody,
    /// Position at the start of the last tick. `None` right after spawning or
    /// a wrap-around teleport, so drawing snaps instead of sweeping across the screen.
    last_position: Option<Vec2>,
}

impl Entity {
    pub fn new(id: EntityId, body: PhysicsBody) -> Self {
        Self {
            id,
            body,
            last_position: None,
        }
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Vec2 {
        physics.body_position(self.body.body_handle).0
    }

    /// Rotation in radians.
    pub fn angle(&self, physics: &PhysicsWorld) -> f32 {
        physics.body_position(self.body.body_handle).1
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec2 {
        physics.velocity(self.body.body_handle)
    }

    pub fn bounds(&self, physics: &PhysicsWorld) -> Option<BoundingBox> {
        physics.collider_bounds(self.body.collider_handle)
    }

    /// Width and height of the entity's bounding box.
    pub fn size(&self, physics: &PhysicsWorld) -> Vec2 {
        self.bounds(physics).map(|b| b.size()).unwrap_or(Vec2::ZERO)
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    /// Record the pre-tick position, then wrap around the world edges.
    /// Call once per tick before stepping physics.
    pub fn begin_tick(&mut self, physics: &mut PhysicsWorld, world: Vec2) {
        self.last_position = Some(self.position(physics));
        self.wrap(physics, world);
    }

    /// If the entity's bounding box has fully left `[0, world]`, teleport it so
    /// the box sits just inside the opposite edge. Returns whether it moved.
    pub fn wrap(&mut self, physics: &mut PhysicsWorld, world: Vec2) -> bool {
        let Some(bounds) = self.bounds(physics) else {
            return false;
        };
        let Some(delta) = wrap_delta(&bounds, world) else {
            return false;
        };
        let pos = self.position(physics);
        physics.set_position(self.body.body_handle, pos + delta);
        self.last_position = None;
        true
    }

    /// Position to draw at, blended between the last two ticks.
    pub fn smooth_position(&self, physics: &PhysicsWorld, alpha: f32) -> Vec2 {
        let current = self.position(physics);
        match self.last_position {
            Some(last) => last.lerp(current, alpha),
            None => current,
        }
    }

    /// Remove the entity's body and colliders from the world.
    pub fn despawn(&self, physics: &mut PhysicsWorld) {
        physics.remove_body(&self.body);
    }
}

impl Pooled for Entity {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// How far to move a box that has fully left the world on some axis.
pub fn wrap_delta(bounds: &BoundingBox, world: Vec2) -> Option<Vec2> {
    let axis = |min: f32, max: f32, extent: f32| {
        if max < 0.0 {
            extent - max
        } else if min > extent {
            -min
        } else {
            0.0
        }
    };
    let delta = Vec2::new(
        axis(bounds.min.x, bounds.max.x, world.x),
        axis(bounds.min.y, bounds.max.y, world.y),
    );
    (delta != Vec2::ZERO).then_some(delta)
}
