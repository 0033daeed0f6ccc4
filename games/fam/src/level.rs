//! Level files: a JSON array of wall segments.
//!
//! ```json
//! [{"A": {"X": 0, "Y": 1000}, "B": {"X": 1920, "Y": 1000}}]
//! ```

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to access level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(rename = "X", alias = "x")]
    pub x: f32,
    #[serde(rename = "Y", alias = "y")]
    pub y: f32,
}

impl From<Vec2> for PointRecord {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<PointRecord> for Vec2 {
    fn from(p: PointRecord) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// One wall, from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    #[serde(rename = "A", alias = "a")]
    pub a: PointRecord,
    #[serde(rename = "B", alias = "b")]
    pub b: PointRecord,
}

impl WallRecord {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a: a.into(), b: b.into() }
    }

    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.a.into(), self.b.into())
    }
}

/// The walls of a level, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub walls: Vec<WallRecord>,
}

impl Level {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `null` parses as an empty level.
    pub fn parse(json: &str) -> Result<Self, LevelError> {
        let walls: Option<Vec<WallRecord>> = serde_json::from_str(json)?;
        Ok(Self {
            walls: walls.unwrap_or_default(),
        })
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(&self.walls)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::parse(&json)?;
        log::info!("level: loaded {} walls from {}", level.walls.len(), path.display());
        Ok(level)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("level: saved {} walls to {}", self.walls.len(), path.display());
        Ok(())
    }
}
