pub mod banana;
pub mod bomb;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod kinds;
pub mod level;
pub mod mouse;
pub mod palette;
pub mod player;
pub mod wall;

pub use collision::{register_handlers, Action};
pub use config::{ContactPolicy, FamConfig};
pub use error::GameError;
pub use game::FamGame;
pub use kinds::EntityKind;
pub use level::{Level, LevelError};
