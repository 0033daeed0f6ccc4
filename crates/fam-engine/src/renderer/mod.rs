pub mod draw_list;
pub mod traits;

// Re-export key types for convenient access
pub use draw_list::{DrawList, Primitive, SpriteInstance};
pub use traits::{PrimitiveStyle, Renderer, SpriteDraw, TextureId};
