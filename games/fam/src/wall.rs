use fam_engine::{
    ColliderDesc, ColliderHandle, ColliderMaterial, CollisionFilter, EngineContext, EntityId,
    PhysicsWorld, Pool, PoolError, Pooled, PrimitiveStyle, Renderer, ShapeTag,
};
use glam::Vec2;

use crate::config::WallConfig;
use crate::kinds::EntityKind;
use crate::level::{Level, WallRecord};

/// A fat segment hung on the world's static body. Walls have no body of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub id: EntityId,
    pub collider: ColliderHandle,
    pub a: Vec2,
    pub b: Vec2,
    pub radius: f32,
}

impl Pooled for Wall {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A wall being dragged out with the mouse. Not in the physics world until committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDraft {
    pub start: Vec2,
    pub end: Vec2,
}

impl WallDraft {
    pub fn new(start: Vec2) -> Self {
        Self { start, end: start }
    }
}

pub struct WallSystem {
    pool: Pool<Wall>,
    config: WallConfig,
    style: PrimitiveStyle,
}

impl WallSystem {
    pub fn new(config: &WallConfig) -> Self {
        Self {
            pool: Pool::with_capacity(EntityKind::Wall.name(), config.capacity),
            config: config.clone(),
            style: PrimitiveStyle::default(),
        }
    }

    pub fn add(&mut self, ctx: &mut EngineContext, a: Vec2, b: Vec2) -> Result<&mut Wall, PoolError> {
        self.pool.ensure_room()?;
        let id = ctx.next_id();
        let radius = self.config.radius;
        let material = ColliderMaterial {
            restitution: self.config.elasticity,
            friction: self.config.friction,
            ..ColliderMaterial::default()
        };
        let collider = ctx.physics.attach_static(
            ShapeTag::new(EntityKind::Wall.collision_type(), id),
            &ColliderDesc::Segment { a, b, radius },
            material,
            CollisionFilter::ALL,
        );
        self.pool.insert(Wall {
            id,
            collider,
            a,
            b,
            radius,
        })
    }

    pub fn get(&self, id: EntityId) -> Option<&Wall> {
        self.pool.get(id)
    }

    /// Only the shape goes; the static body is shared.
    pub fn remove(&mut self, physics: &mut PhysicsWorld, id: EntityId) -> bool {
        match self.pool.remove(id) {
            Some(wall) => {
                physics.remove_collider(wall.collider);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for wall in self.pool.drain() {
            physics.remove_collider(wall.collider);
        }
    }

    /// Build every wall of a level. Stops at the first wall that does not fit.
    pub fn load(&mut self, ctx: &mut EngineContext, level: &Level) -> Result<usize, PoolError> {
        for record in &level.walls {
            let (a, b) = record.endpoints();
            self.add(ctx, a, b)?;
        }
        Ok(level.walls.len())
    }

    /// Current walls as a level, in pool order.
    pub fn to_level(&self) -> Level {
        Level {
            walls: self.pool.iter().map(|w| WallRecord::new(w.a, w.b)).collect(),
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for wall in self.pool.iter() {
            renderer.draw_fat_segment(wall.a, wall.b, wall.radius, self.style);
        }
    }

    pub fn draw_draft(&self, draft: &WallDraft, renderer: &mut dyn Renderer) {
        renderer.draw_fat_segment(draft.start, draft.end, self.config.radius, self.style);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.pool.iter()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
