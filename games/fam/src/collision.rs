//! What happens when things touch.
//!
//! Handlers run mid-step and only record what should happen; the game applies
//! the recorded [`Action`]s once the step is over.

use fam_engine::{CollisionHandlers, ContactResponse, EntityId};
use glam::Vec2;

use crate::config::FamConfig;
use crate::kinds::EntityKind;

/// Screen-up in a Y-down world.
const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Deferred consequence of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BananaEaten { banana: EntityId, player: EntityId },
    BombHit { bomb: EntityId, player: EntityId },
}

pub fn register_handlers(config: &FamConfig) -> CollisionHandlers<Action> {
    let mut handlers = CollisionHandlers::new();

    let eat = ContactResponse::from(config.banana.contact);
    handlers.on_pre_solve(
        EntityKind::Banana.collision_type(),
        EntityKind::Player.collision_type(),
        move |arb, queue| {
            queue.push(Action::BananaEaten {
                banana: arb.a.id,
                player: arb.b.id,
            });
            eat
        },
    );

    let hit = ContactResponse::from(config.bomb.contact);
    handlers.on_pre_solve(
        EntityKind::Bomb.collision_type(),
        EntityKind::Player.collision_type(),
        move |arb, queue| {
            queue.push(Action::BombHit {
                bomb: arb.a.id,
                player: arb.b.id,
            });
            hit
        },
    );

    handlers.on_wildcard_pre_solve(EntityKind::Wall.collision_type(), |arb, _| one_way(arb.normal));

    handlers
}

/// Walls only block from above: anything pushing up through one passes,
/// and keeps passing until it is clear of the wall.
/// `normal` points from the wall toward the other shape.
pub fn one_way(normal: Vec2) -> ContactResponse {
    if normal.dot(UP) < 0.0 {
        ContactResponse::IgnoreUntilSeparated
    } else {
        ContactResponse::Accept
    }
}
