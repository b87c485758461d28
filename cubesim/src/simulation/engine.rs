//! High-level runtime engine settings
//!
//! Selects the frame driver tick and whether the pairwise collision pass runs

use crate::configuration::config::{CollisionConfig, EngineConfig};
use crate::configuration::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Engine {
    pub tick_ms: f64, // fixed tick for headless runs
    pub collisions: CollisionConfig, // elastic = cube scene, disabled = sponsor scene
}

impl Default for Engine {
    fn default() -> Self {
        let cfg = EngineConfig::default();
        Self {
            tick_ms: cfg.tick_ms,
            collisions: cfg.collisions,
        }
    }
}

impl Engine {
    pub fn from_config(cfg: &EngineConfig) -> Result<Self, ConfigError> {
        if !(cfg.tick_ms > 0.0) || !cfg.tick_ms.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "tick_ms",
                value: cfg.tick_ms,
                reason: "must be positive",
            });
        }
        Ok(Self {
            tick_ms: cfg.tick_ms,
            collisions: cfg.collisions,
        })
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions == CollisionConfig::Elastic
    }
}
