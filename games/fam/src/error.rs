use fam_engine::PoolError;

use crate::config::ConfigError;
use crate::level::LevelError;

/// Anything that can stop the game from starting.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}
