//! Debug rendering: opt-in collider outlines.
//!
//! Call `debug_draw_world()` from your `Game::draw()` to see hitboxes.

use glam::Vec2;

use crate::core::physics::{ColliderDesc, ColliderView, PhysicsWorld};
use crate::renderer::traits::{PrimitiveStyle, Renderer};

/// Draw every collider in the world as a primitive outline.
pub fn debug_draw_world(physics: &PhysicsWorld, renderer: &mut dyn Renderer, style: PrimitiveStyle) {
    for view in physics.colliders() {
        debug_draw_collider(&view, renderer, style);
    }
}

/// Draw one collider at its world pose.
pub fn debug_draw_collider(view: &ColliderView, renderer: &mut dyn Renderer, style: PrimitiveStyle) {
    let rotate = |local: Vec2| view.position + Vec2::from_angle(view.rotation).rotate(local);
    match view.shape {
        ColliderDesc::Ball { radius } => {
            renderer.draw_circle(view.position, view.rotation, radius, style);
        }
        ColliderDesc::Segment { a, b, radius } => {
            renderer.draw_fat_segment(rotate(a), rotate(b), radius, style);
        }
    }
}
