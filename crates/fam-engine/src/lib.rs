pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{CollisionType, EntityId, EntityIdAllocator, ShapeTag};
pub use components::entity::{wrap_delta, Entity};
pub use core::collision::{Arbiter, CollisionHandlers, ContactResponse, PostStep};
pub use core::pool::{Pool, PoolError, Pooled};
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue, JoystickId, MouseButton};
pub use input::state::InputState;
pub use renderer::{DrawList, Primitive, PrimitiveStyle, Renderer, SpriteDraw, SpriteInstance, TextureId};
pub use systems::debug::{debug_draw_collider, debug_draw_world};

pub use core::physics::{
    moment_for_circle, BodyDesc, BodyType, BoundingBox, ColliderDesc, ColliderMaterial,
    ColliderView, CollisionFilter, JointDesc, JointHandle, PhysicsBody, PhysicsWorld,
    PointQueryHit,
};

// Handle types games hold on to.
pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
