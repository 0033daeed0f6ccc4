use std::path::{Path, PathBuf};

use fam_engine::{ContactResponse, GameConfig};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Whether a pickup contact should still push the two shapes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPolicy {
    Accept,
    Ignore,
}

impl From<ContactPolicy> for ContactResponse {
    fn from(policy: ContactPolicy) -> Self {
        match policy {
            ContactPolicy::Accept => ContactResponse::Accept,
            ContactPolicy::Ignore => ContactResponse::Ignore,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Every tuning knob of the playground. Missing keys fall back to the
/// defaults, so a config file only has to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub fixed_dt: f32,
    /// Downward pull, in units per second squared.
    pub gravity: f32,
    pub max_steps_per_frame: u32,
    pub player: PlayerConfig,
    pub banana: BananaConfig,
    pub bomb: BombConfig,
    pub wall: WallConfig,
    pub mouse: MouseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub capacity: usize,
    pub mass: f32,
    pub radius: f32,
    pub elasticity: f32,
    pub friction: f32,
    /// Top speed is `velocity * dt`.
    pub velocity: f32,
    /// Radius multiplier per banana eaten.
    pub growth: f32,
    /// Growth stops at this multiple of `radius`.
    pub max_growth: f32,
    pub pivot_max_force: f32,
    pub gear_max_force: f32,
    pub motor_stiffness: f32,
    /// Random spread around the world center for new players.
    pub spawn_jitter: f32,
    /// The face sprite is drawn this much larger than the hitbox.
    pub sprite_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BananaConfig {
    pub capacity: usize,
    pub mass: f32,
    pub radius: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub contact: ContactPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub capacity: usize,
    pub mass: f32,
    pub radius: f32,
    /// Circle center relative to the body; the sprite's wick sits off-center.
    pub offset: Vec2,
    pub elasticity: f32,
    pub friction: f32,
    /// Seconds until the bomb goes off.
    pub fuse: f32,
    /// Seconds until the blast radius shrinks back.
    pub blast_end: f32,
    /// Seconds until the bomb is removed.
    pub lifetime: f32,
    pub blast_scale: f32,
    /// Grey flashes per second while ticking, counting both halves.
    pub flash_rate: f32,
    pub contact: ContactPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub capacity: usize,
    pub radius: f32,
    pub elasticity: f32,
    pub friction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Fraction of the distance to the cursor covered each tick.
    pub follow: f32,
    pub click_radius: f32,
    pub grab_max_force: f32,
    pub grab_stiffness: f32,
    pub grab_damping: f32,
}

impl Default for FamConfig {
    fn default() -> Self {
        Self {
            world_width: 1920.0,
            world_height: 1080.0,
            fixed_dt: 1.0 / 60.0,
            gravity: 600.0,
            max_steps_per_frame: 10,
            player: PlayerConfig::default(),
            banana: BananaConfig::default(),
            bomb: BombConfig::default(),
            wall: WallConfig::default(),
            mouse: MouseConfig::default(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            mass: 1.0,
            radius: 25.0,
            elasticity: 0.0,
            friction: 1.0,
            velocity: 11250.0,
            growth: 1.1,
            max_growth: 5.0,
            pivot_max_force: 10000.0,
            gear_max_force: 50000.0,
            motor_stiffness: 1000.0,
            spawn_jitter: 10.0,
            sprite_scale: 1.1,
        }
    }
}

impl Default for BananaConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            mass: 10.0,
            radius: 20.0,
            elasticity: 0.0,
            friction: 10.0,
            contact: ContactPolicy::Ignore,
        }
    }
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            mass: 1.0,
            radius: 20.0,
            offset: Vec2::new(-20.0, 20.0),
            elasticity: 1.0,
            friction: 1.0,
            fuse: 5.0,
            blast_end: 5.2,
            lifetime: 6.0,
            blast_scale: 10.0,
            flash_rate: 3.0,
            contact: ContactPolicy::Accept,
        }
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            radius: 10.0,
            elasticity: 1.0,
            friction: 100.0,
        }
    }
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            follow: 0.25,
            click_radius: 5.0,
            grab_max_force: 50000.0,
            grab_stiffness: 2000.0,
            grab_damping: 100.0,
        }
    }
}

impl FamConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FamConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.fixed_dt > 0.0) {
            return invalid("fixed_dt must be positive");
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return invalid("world size must be positive");
        }
        if self.max_steps_per_frame == 0 {
            return invalid("max_steps_per_frame must be at least 1");
        }
        if self.player.capacity == 0
            || self.banana.capacity == 0
            || self.bomb.capacity == 0
            || self.wall.capacity == 0
        {
            return invalid("capacities must be at least 1");
        }
        if !(self.player.radius > 0.0
            && self.banana.radius > 0.0
            && self.bomb.radius > 0.0
            && self.wall.radius > 0.0)
        {
            return invalid("radii must be positive");
        }
        if !(self.player.mass > 0.0 && self.banana.mass > 0.0 && self.bomb.mass > 0.0) {
            return invalid("masses must be positive");
        }
        if self.player.growth < 1.0 || self.player.max_growth < 1.0 {
            return invalid("player growth factors must be at least 1");
        }
        let bomb = &self.bomb;
        if !(bomb.fuse < bomb.blast_end && bomb.blast_end < bomb.lifetime) {
            return invalid("bomb timings must satisfy fuse < blast_end < lifetime");
        }
        if bomb.blast_scale <= 0.0 {
            return invalid("bomb blast_scale must be positive");
        }
        if !(0.0..=1.0).contains(&self.mouse.follow) {
            return invalid("mouse follow must be within 0..=1");
        }
        Ok(())
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Engine settings derived from this config. Y points down, so gravity is +Y.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: self.fixed_dt,
            world_width: self.world_width,
            world_height: self.world_height,
            gravity: Vec2::new(0.0, self.gravity),
            max_steps_per_frame: self.max_steps_per_frame,
        }
    }
}
