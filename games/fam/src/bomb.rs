use fam_engine::{
    moment_for_circle, BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId,
    PhysicsWorld, Pool, PoolError, Pooled, Renderer, SpriteDraw, TextureId,
};
use glam::{Vec2, Vec3};

use crate::config::BombConfig;
use crate::kinds::{EntityKind, PLAYER_FILTER};
use crate::palette::GREY;

pub const BOMB: TextureId = TextureId("bomb");
pub const POW: TextureId = TextureId("pow");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombState {
    Ok,
    Boom,
    Gone,
}

#[derive(Debug, Clone)]
pub struct Bomb {
    pub entity: Entity,
    state: BombState,
    /// Seconds since spawning.
    time: f32,
    shrunk: bool,
}

impl Bomb {
    fn new(entity: Entity) -> Self {
        Self {
            entity,
            state: BombState::Ok,
            time: 0.0,
            shrunk: false,
        }
    }

    pub fn state(&self) -> BombState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Run the fuse forward by `dt`. Returns a factor to scale the blast
    /// circle by when the bomb goes off or the blast ends.
    pub fn advance(&mut self, dt: f32, config: &BombConfig) -> Option<f32> {
        self.time += dt;
        let mut scale = None;
        if self.time > config.fuse && self.state == BombState::Ok {
            self.state = BombState::Boom;
            scale = Some(config.blast_scale);
        }
        if self.time > config.blast_end && self.state == BombState::Boom && !self.shrunk {
            self.shrunk = true;
            scale = Some(scale.unwrap_or(1.0) / config.blast_scale);
        }
        if self.time > config.lifetime {
            self.state = BombState::Gone;
        }
        scale
    }

    fn sprite(&self, flash_rate: f32) -> Option<(TextureId, Vec3)> {
        match self.state {
            BombState::Ok => {
                let ticking = (self.time * flash_rate) as u32 % 2 != 0;
                Some((BOMB, if ticking { GREY } else { Vec3::ONE }))
            }
            BombState::Boom => Some((POW, Vec3::ONE)),
            BombState::Gone => None,
        }
    }
}

impl Pooled for Bomb {
    fn id(&self) -> EntityId {
        self.entity.id
    }
}

pub struct BombSystem {
    pool: Pool<Bomb>,
    config: BombConfig,
}

impl BombSystem {
    pub fn new(config: &BombConfig) -> Self {
        Self {
            pool: Pool::with_capacity(EntityKind::Bomb.name(), config.capacity),
            config: config.clone(),
        }
    }

    pub fn add(&mut self, ctx: &mut EngineContext, position: Vec2, velocity: Vec2) -> Result<&mut Bomb, PoolError> {
        self.pool.ensure_room()?;
        let cfg = &self.config;
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: cfg.radius })
            .with_position(position)
            .with_velocity(velocity)
            .with_collider_offset(cfg.offset)
            .with_mass(cfg.mass, moment_for_circle(cfg.mass, cfg.radius, cfg.radius, Vec2::ZERO))
            .with_filter(PLAYER_FILTER);
        let material = ColliderMaterial {
            restitution: cfg.elasticity,
            friction: cfg.friction,
            ..ColliderMaterial::default()
        };
        let entity = ctx.spawn_body(EntityKind::Bomb.collision_type(), &desc, material);
        log::debug!("bomb: {:?} lit at {}", entity.id, position);
        self.pool.insert(Bomb::new(entity))
    }

    pub fn get(&self, id: EntityId) -> Option<&Bomb> {
        self.pool.get(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.pool.contains(id)
    }

    pub fn remove(&mut self, physics: &mut PhysicsWorld, id: EntityId) -> bool {
        match self.pool.remove(id) {
            Some(bomb) => {
                bomb.entity.despawn(physics);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for bomb in self.pool.drain() {
            bomb.entity.despawn(physics);
        }
    }

    /// Tick every fuse, then remove the bombs that are done. Returns the
    /// removed IDs.
    pub fn update(&mut self, physics: &mut PhysicsWorld, world: Vec2, dt: f32) -> Vec<EntityId> {
        let mut gone = Vec::new();
        for bomb in self.pool.iter_mut() {
            bomb.entity.begin_tick(physics, world);
            let was = bomb.state;
            if let Some(scale) = bomb.advance(dt, &self.config) {
                let collider = bomb.entity.body.collider_handle;
                if let Some(radius) = physics.circle_radius(collider) {
                    physics.set_circle_radius(collider, radius * scale);
                }
            }
            if was == BombState::Ok && bomb.state != BombState::Ok {
                log::debug!("bomb: {:?} went off", bomb.entity.id);
            }
            if bomb.state == BombState::Gone {
                gone.push(bomb.entity.id);
            }
        }
        for &id in &gone {
            self.remove(physics, id);
        }
        gone
    }

    pub fn draw(&self, physics: &PhysicsWorld, renderer: &mut dyn Renderer, alpha: f32) {
        for bomb in self.pool.iter() {
            let Some((texture, tint)) = bomb.sprite(self.config.flash_rate) else {
                continue;
            };
            renderer.draw_sprite(SpriteDraw {
                texture,
                position: bomb.entity.smooth_position(physics, alpha),
                size: bomb.entity.size(physics) * 2.0,
                rotation: bomb.entity.angle(physics),
                tint,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bomb> {
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
