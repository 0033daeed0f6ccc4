use glam::Vec2;

use crate::api::types::{CollisionType, EntityIdAllocator, EntityId, ShapeTag};
use crate::components::entity::Entity;
use crate::core::collision::CollisionHandlers;
use crate::core::physics::{BodyDesc, ColliderMaterial, PhysicsWorld};
use crate::input::queue::InputQueue;
use crate::input::state::InputState;
use crate::renderer::traits::Renderer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Gravity vector for physics simulation. Default: zero (no gravity).
    /// Y points down, so positive Y pulls toward the bottom.
    pub gravity: Vec2,
    /// Upper bound on fixed ticks run for one rendered frame (default: 10).
    pub max_steps_per_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            gravity: Vec2::ZERO,
            max_steps_per_frame: 10,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and spawn entities.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), Self::Error>;

    /// One fixed tick. `input` holds the events that arrived since the last
    /// tick; held state is already folded into `ctx.input`.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only draw pass. `alpha` is how far we are into the next tick.
    fn draw(&self, _ctx: &EngineContext, _renderer: &mut dyn Renderer, _alpha: f32) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub physics: PhysicsWorld,
    pub ids: EntityIdAllocator,
    pub input: InputState,
    world_size: Vec2,
    fixed_dt: f32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            physics: new_world(config.gravity, config.fixed_dt),
            ids: EntityIdAllocator::new(),
            input: InputState::new(),
            world_size: Vec2::new(config.world_width, config.world_height),
            fixed_dt: config.fixed_dt,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Allocate an ID and create a tagged body for it.
    pub fn spawn_body(&mut self, kind: CollisionType, desc: &BodyDesc, material: ColliderMaterial) -> Entity {
        let id = self.next_id();
        let body = self
            .physics
            .create_body(ShapeTag::new(kind, id), desc, material);
        Entity::new(id, body)
    }

    /// Throw away every body, shape and joint. IDs keep counting up so stale
    /// handles from before the reset can never alias new entities.
    pub fn reset_physics(&mut self) {
        let gravity = self.physics.gravity();
        log::debug!(
            "physics: rebuilding world ({} bodies, {} joints dropped)",
            self.physics.body_count(),
            self.physics.joint_count()
        );
        self.physics = new_world(gravity, self.fixed_dt);
    }

    /// Step the physics simulation, returning the actions collision
    /// handlers queued during the step.
    #[must_use = "queued collision actions are lost if not applied"]
    pub fn step_physics<A: Send>(&mut self, handlers: &CollisionHandlers<A>) -> Vec<A> {
        self.physics.step(handlers)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

fn new_world(gravity: Vec2, dt: f32) -> PhysicsWorld {
    let mut physics = PhysicsWorld::new(gravity);
    physics.set_dt(dt);
    physics
}
