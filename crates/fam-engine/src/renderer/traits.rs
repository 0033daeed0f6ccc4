//! Drawing contract between games and whatever actually puts pixels on screen.
//!
//! Games only ever talk to `&mut dyn Renderer`. The crate ships one
//! implementation, [`DrawList`](super::draw_list::DrawList), which records
//! commands for a GPU front end (or a test) to consume.

use glam::{Vec2, Vec3, Vec4};

/// Named texture. Resolving the name to GPU memory is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub &'static str);

/// A textured quad centered on `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureId,
    pub position: Vec2,
    /// Full width and height in world units.
    pub size: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// RGB tint multiplied into the texture.
    pub tint: Vec3,
}

/// Outline and fill colors for debug primitives (RGBA, 0.0-1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveStyle {
    pub outline: Vec4,
    pub fill: Vec4,
}

impl PrimitiveStyle {
    pub const fn new(outline: Vec4, fill: Vec4) -> Self {
        Self { outline, fill }
    }
}

impl Default for PrimitiveStyle {
    fn default() -> Self {
        Self {
            outline: Vec4::new(0.8, 0.8, 0.8, 1.0),
            fill: Vec4::new(0.3, 0.3, 0.3, 0.5),
        }
    }
}

pub trait Renderer {
    fn draw_sprite(&mut self, sprite: SpriteDraw);

    /// A segment from `a` to `b` thickened by `radius`.
    fn draw_fat_segment(&mut self, a: Vec2, b: Vec2, radius: f32, style: PrimitiveStyle);

    /// `angle` orients the radius tick so rotation is visible.
    fn draw_circle(&mut self, center: Vec2, angle: f32, radius: f32, style: PrimitiveStyle);
}
