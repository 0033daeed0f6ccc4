use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::traits::{PrimitiveStyle, Renderer, SpriteDraw, TextureId};

/// Per-instance sprite data for a GPU upload.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&SpriteDraw> for SpriteInstance {
    fn from(sprite: &SpriteDraw) -> Self {
        Self {
            x: sprite.position.x,
            y: sprite.position.y,
            rotation: sprite.rotation,
            width: sprite.size.x,
            height: sprite.size.y,
            r: sprite.tint.x,
            g: sprite.tint.y,
            b: sprite.tint.z,
        }
    }
}

/// One recorded debug primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    FatSegment { a: Vec2, b: Vec2, radius: f32, style: PrimitiveStyle },
    Circle { center: Vec2, angle: f32, radius: f32, style: PrimitiveStyle },
}

/// Records a frame's draw calls in submission order.
pub struct DrawList {
    /// Sprites in draw order.
    pub sprites: Vec<SpriteDraw>,
    /// Debug primitives in draw order, drawn over the sprites.
    pub primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            sprites: Vec::with_capacity(512),
            primitives: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.primitives.clear();
    }

    /// Sprites of one texture, packed for upload.
    pub fn instances_for(&self, texture: TextureId) -> Vec<SpriteInstance> {
        self.sprites
            .iter()
            .filter(|s| s.texture == texture)
            .map(SpriteInstance::from)
            .collect()
    }

    pub fn sprite_count(&self, texture: TextureId) -> usize {
        self.sprites.iter().filter(|s| s.texture == texture).count()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawList {
    fn draw_sprite(&mut self, sprite: SpriteDraw) {
        self.sprites.push(sprite);
    }

    fn draw_fat_segment(&mut self, a: Vec2, b: Vec2, radius: f32, style: PrimitiveStyle) {
        self.primitives.push(Primitive::FatSegment { a, b, radius, style });
    }

    fn draw_circle(&mut self, center: Vec2, angle: f32, radius: f32, style: PrimitiveStyle) {
        self.primitives.push(Primitive::Circle { center, angle, radius, style });
    }
}
