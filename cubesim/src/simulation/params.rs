//! Physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravity strength `G` (attractors pull with +G, repulsors push with -G),
//! - the per-axis soft speed cap and the damping applied above it,
//! - the collision push-apart margin,
//! - the random seed used for randomised bodies

use crate::configuration::config::{
    ParametersConfig, DEFAULT_COLLISION_MARGIN, DEFAULT_DAMPING, DEFAULT_GRAVITY,
    DEFAULT_SPEED_CAP,
};
use crate::configuration::error::ConfigError;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational strength
    pub speed_cap: f64, // only positive excess above this is damped
    pub damping: f64, // multiplier for an axis above the cap
    pub collision_margin: f64, // 1.0 separates exactly to touching
    pub seed: Option<u64>, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: DEFAULT_GRAVITY,
            speed_cap: DEFAULT_SPEED_CAP,
            damping: DEFAULT_DAMPING,
            collision_margin: DEFAULT_COLLISION_MARGIN,
            seed: None,
        }
    }
}

impl Parameters {
    /// Validate a [`ParametersConfig`] and map it to runtime parameters
    pub fn from_config(cfg: &ParametersConfig) -> Result<Self, ConfigError> {
        if !cfg.G.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "G",
                value: cfg.G,
                reason: "must be finite",
            });
        }
        if !(cfg.speed_cap > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "speed_cap",
                value: cfg.speed_cap,
                reason: "must be positive",
            });
        }
        if !(cfg.damping > 0.0 && cfg.damping <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "damping",
                value: cfg.damping,
                reason: "must lie in (0, 1]",
            });
        }
        if !(cfg.collision_margin >= 1.0) || !cfg.collision_margin.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "collision_margin",
                value: cfg.collision_margin,
                reason: "must be at least 1.0",
            });
        }

        Ok(Self {
            G: cfg.G,
            speed_cap: cfg.speed_cap,
            damping: cfg.damping,
            collision_margin: cfg.collision_margin,
            seed: cfg.seed,
        })
    }
}
