use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::PlatBody;
use crate::types::{BodyTuning, WorldConfig};

/// Configuration failures. Raised while building worlds, bodies and layers,
/// never during a step.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be finite and positive, got {0}")]
    InvalidGrid(Vec2),

    #[error("corner tolerance must be non-negative, got {0}")]
    NegativeCornerTolerance(f32),

    #[error("coyote time must be non-negative, got {0}")]
    NegativeCoyoteTime(f32),

    #[error("min speed {min} exceeds max speed {max}")]
    InvalidSpeedBounds { min: Vec2, max: Vec2 },

    #[error("body extent must be finite and positive, got {0}")]
    InvalidExtent(Vec2),

    #[error("tile data has {actual} cells, expected {expected}")]
    LayerDataMismatch { expected: usize, actual: usize },

    #[error("unexpected character {0:?} in tile layout")]
    BadLayoutChar(char),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid physics config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Full physics configuration, loadable from TOML.
///
/// ```toml
/// [world]
/// grid = [16.0, 16.0]
/// coyote_time = 0.1
/// corner_tolerance = 4.0
///
/// [world.roles]
/// block = 1
/// dont_pass_up = 2
///
/// [body]
/// ground_speed = 6.0
/// extent = [12.0, 16.0]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub world: WorldConfig,
    pub body: BodyTuning,
}

impl PhysicsConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no physics config, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.body.validate()
    }

    /// New body using this configuration.
    pub fn build_body(&self) -> Result<PlatBody, ConfigError> {
        PlatBody::new(self.world, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileRoles;

    #[test]
    fn test_empty_document_gives_defaults() {
        let cfg = PhysicsConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PhysicsConfig::default());
        assert_eq!(cfg.world.coyote_time, 0.1);
        assert_eq!(cfg.world.corner_tolerance, 4.0);
        assert_eq!(cfg.world.roles, TileRoles::default());
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let cfg = PhysicsConfig::from_toml_str(
            r#"
            [world]
            grid = [8.0, 8.0]
            corner_tolerance = 2.0

            [world.roles]
            block = 9

            [body]
            jump_speed = 15.0
            extent = [6.0, 8.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.world.grid, Vec2::splat(8.0));
        assert_eq!(cfg.world.corner_tolerance, 2.0);
        assert_eq!(cfg.world.coyote_time, 0.1);
        assert_eq!(cfg.world.roles.block, 9);
        assert_eq!(cfg.world.roles.dont_pass_up, 2);
        assert_eq!(cfg.body.jump_speed, 15.0);
        assert_eq!(cfg.body.extent, Some(Vec2::new(6.0, 8.0)));
        assert_eq!(cfg.body.ground_speed, 6.0);

        let body = cfg.build_body().unwrap();
        assert_eq!(body.grid(), Vec2::splat(8.0));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = PhysicsConfig::from_toml_str("[world]\ncorner_tolerance = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::NegativeCornerTolerance(_)));
        let err = PhysicsConfig::from_toml_str("[world]\ngrid = [0.0, 16.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGrid(_)));
        let err = PhysicsConfig::from_toml_str("[world]\ncoyote_time = \"soon\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("platbody-missing-config.toml");
        assert!(matches!(PhysicsConfig::load(&path), Err(ConfigError::Io { .. })));
        assert_eq!(PhysicsConfig::load_or_default(&path), PhysicsConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("platbody-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[world]\ncoyote_time = 0.25\n").unwrap();
        let cfg = PhysicsConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.world.coyote_time, 0.25);
    }
}
