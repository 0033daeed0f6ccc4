use fam_engine::{
    moment_for_circle, BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId,
    PhysicsWorld, Pool, PoolError, Renderer, SpriteDraw, TextureId,
};
use glam::{Vec2, Vec3};

use crate::config::BananaConfig;
use crate::kinds::{EntityKind, PLAYER_FILTER};

pub const BANANA: TextureId = TextureId("banana");

pub struct BananaSystem {
    pool: Pool<Entity>,
    config: BananaConfig,
}

impl BananaSystem {
    pub fn new(config: &BananaConfig) -> Self {
        Self {
            pool: Pool::with_capacity(EntityKind::Banana.name(), config.capacity),
            config: config.clone(),
        }
    }

    pub fn add(&mut self, ctx: &mut EngineContext, position: Vec2, velocity: Vec2) -> Result<&mut Entity, PoolError> {
        self.pool.ensure_room()?;
        let cfg = &self.config;
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: cfg.radius })
            .with_position(position)
            .with_velocity(velocity)
            .with_mass(cfg.mass, moment_for_circle(cfg.mass, cfg.radius, cfg.radius, Vec2::ZERO))
            .with_filter(PLAYER_FILTER);
        let material = ColliderMaterial {
            restitution: cfg.elasticity,
            friction: cfg.friction,
            ..ColliderMaterial::default()
        };
        let entity = ctx.spawn_body(EntityKind::Banana.collision_type(), &desc, material);
        log::debug!("banana: {:?} spawned at {}", entity.id, position);
        self.pool.insert(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.pool.get(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.pool.contains(id)
    }

    /// Returns false if the banana was already gone.
    pub fn remove(&mut self, physics: &mut PhysicsWorld, id: EntityId) -> bool {
        match self.pool.remove(id) {
            Some(banana) => {
                banana.despawn(physics);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for banana in self.pool.drain() {
            banana.despawn(physics);
        }
    }

    pub fn update(&mut self, physics: &mut PhysicsWorld, world: Vec2) {
        for banana in self.pool.iter_mut() {
            banana.begin_tick(physics, world);
        }
    }

    pub fn draw(&self, physics: &PhysicsWorld, renderer: &mut dyn Renderer, alpha: f32) {
        for banana in self.pool.iter() {
            renderer.draw_sprite(SpriteDraw {
                texture: BANANA,
                position: banana.smooth_position(physics, alpha),
                size: banana.size(physics),
                rotation: banana.angle(physics),
                tint: Vec3::ONE,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.pool.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.pool.ids()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fam_engine::{CollisionHandlers, DrawList, GameConfig, ShapeTag};

    const WORLD: Vec2 = Vec2::new(1920.0, 1080.0);

    fn ctx() -> EngineContext {
        EngineContext::new(&GameConfig {
            world_width: 1920.0,
            world_height: 1080.0,
            ..GameConfig::default()
        })
    }

    #[test]
    fn add_and_remove() {
        let mut ctx = ctx();
        let mut bananas = BananaSystem::new(&BananaConfig::default());
        let entity = bananas.add(&mut ctx, Vec2::new(100.0, 100.0), Vec2::ZERO).unwrap().clone();

        assert_eq!(ctx.physics.body_mass(entity.body.body_handle), Some(10.0));
        assert_eq!(ctx.physics.circle_radius(entity.body.collider_handle), Some(20.0));
        let tag = ctx.physics.collider_tag(entity.body.collider_handle).unwrap();
        assert_eq!(tag, ShapeTag::new(EntityKind::Banana.collision_type(), entity.id));
        assert!(bananas.contains(tag.id));

        assert!(bananas.remove(&mut ctx.physics, entity.id));
        assert!(!ctx.physics.contains_collider(entity.body.collider_handle));
        assert!(!bananas.contains(tag.id));
        assert!(!bananas.remove(&mut ctx.physics, entity.id));
    }

    #[test]
    fn overflow_is_rejected_without_leaking() {
        let mut ctx = ctx();
        let mut bananas = BananaSystem::new(&BananaConfig {
            capacity: 2,
            ..BananaConfig::default()
        });
        bananas.add(&mut ctx, Vec2::ZERO, Vec2::ZERO).unwrap();
        bananas.add(&mut ctx, Vec2::ZERO, Vec2::ZERO).unwrap();
        let colliders = ctx.physics.collider_count();

        assert!(bananas.add(&mut ctx, Vec2::ZERO, Vec2::ZERO).is_err());
        assert_eq!(ctx.physics.collider_count(), colliders);
        assert_eq!(bananas.len(), 2);
    }

    #[test]
    fn removal_keeps_survivors_intact() {
        let mut ctx = ctx();
        let mut bananas = BananaSystem::new(&BananaConfig::default());
        let ids: Vec<EntityId> = (0..5)
            .map(|i| {
                bananas
                    .add(&mut ctx, Vec2::new(100.0 * i as f32, 100.0), Vec2::ZERO)
                    .unwrap()
                    .id
            })
            .collect();

        bananas.remove(&mut ctx.physics, ids[1]);
        for (i, &id) in ids.iter().enumerate().filter(|(i, _)| *i != 1) {
            let banana = bananas.get(id).unwrap();
            assert_eq!(banana.position(&ctx.physics), Vec2::new(100.0 * i as f32, 100.0));
            assert_eq!(ctx.physics.collider_tag(banana.body.collider_handle).map(|t| t.id), Some(id));
        }
    }

    #[test]
    fn wraps_and_snaps_drawing() {
        let mut ctx = ctx();
        let mut bananas = BananaSystem::new(&BananaConfig::default());
        let id = bananas.add(&mut ctx, Vec2::new(-30.0, 500.0), Vec2::ZERO).unwrap().id;

        bananas.update(&mut ctx.physics, WORLD);
        let banana = bananas.get(id).unwrap();
        assert_eq!(banana.position(&ctx.physics), Vec2::new(1900.0, 500.0));
        assert_eq!(banana.last_position(), None);

        let handlers: CollisionHandlers<()> = CollisionHandlers::new();
        let _ = ctx.step_physics(&handlers);
        bananas.update(&mut ctx.physics, WORLD);
        assert!(bananas.get(id).unwrap().last_position().is_some());
    }

    #[test]
    fn draws_at_bounding_box_size() {
        let mut ctx = ctx();
        let mut bananas = BananaSystem::new(&BananaConfig::default());
        bananas.add(&mut ctx, Vec2::new(300.0, 300.0), Vec2::ZERO).unwrap();

        let mut list = DrawList::new();
        bananas.draw(&ctx.physics, &mut list, 0.5);
        let sprites = list.instances_for(BANANA);
        assert_eq!(sprites.len(), 1);
        assert_eq!((sprites[0].width, sprites[0].height), (40.0, 40.0));
        assert_eq!((sprites[0].x, sprites[0].y), (300.0, 300.0));
    }
}
