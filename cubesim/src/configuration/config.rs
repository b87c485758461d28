//! Configuration types for loading cube scenes from YAML.
//!
//! A scene consists of:
//!
//! - [`EngineConfig`]     – frame driver options (tick length, collision pass)
//! - [`ParametersConfig`] – gravity strength, soft speed cap, damping, collision margin, seed
//! - [`BoundsConfig`]     – reflective box; `bounds: null` disables reflection
//! - [`BodyConfig`]       – one cube, kinematic fields optional (randomised when absent)
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   tick_ms: 15.0
//!   collisions: "elastic"   # or "none"
//!
//! parameters:
//!   G: 10.0
//!   speed_cap: 2.0
//!   damping: 0.5
//!   collision_margin: 1.1
//!   seed: 42                # omit for a different scene every run
//!
//! bounds:
//!   min: [ -3.0, -2.5, -15.0 ]
//!   max: [  3.0,  2.5,  -5.0 ]
//!
//! bodies:
//!   - name: cube
//!     size: 1.0
//!     texture: ucc_logo
//!     position: [ 0.0, 0.0, -10.0 ]
//!     min_rotation_speed: 30.0
//!   - name: guild
//!     size: 0.5
//!     texture: guild
//!     attractors: [ cube ]
//! ```
//!
//! Every section except `bodies` may be left out; the defaults reproduce the
//! classic UCC cube scene.

use serde::Deserialize;

use crate::simulation::states::Texture;

pub const DEFAULT_TICK_MS: f64 = 15.0;
pub const DEFAULT_GRAVITY: f64 = 10.0;
pub const DEFAULT_SPEED_CAP: f64 = 2.0;
pub const DEFAULT_DAMPING: f64 = 0.5;
pub const DEFAULT_COLLISION_MARGIN: f64 = 1.1;

pub const SCENE_MIN: [f64; 3] = [-3.0, -2.5, -15.0];
pub const SCENE_MAX: [f64; 3] = [3.0, 2.5, -5.0];

/// Whether the pairwise collision pass runs after integration
/// `collisions: "elastic"` (cube scene) or `collisions: "none"` (sponsor scene)
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionConfig {
    #[default]
    #[serde(rename = "elastic")] // sphere-vs-sphere push apart + bounce
    Elastic,

    #[serde(rename = "none")] // bodies pass through each other
    Disabled,
}

/// Frame driver settings
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f64, // fixed tick for headless runs and the viewer
    #[serde(default)]
    pub collisions: CollisionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            collisions: CollisionConfig::Elastic,
        }
    }
}

/// Physical constants and tunables
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_gravity")]
    pub G: f64, // attractor strength, repulsors use -G
    #[serde(default = "default_speed_cap")]
    pub speed_cap: f64, // per-axis soft cap on positive velocity
    #[serde(default = "default_damping")]
    pub damping: f64, // factor applied to an axis above the cap
    #[serde(default = "default_collision_margin")]
    pub collision_margin: f64, // overlap push-apart scale
    #[serde(default)]
    pub seed: Option<u64>, // deterministic seed for randomised fields
}

impl Default for ParametersConfig {
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

/// Reflective axis-aligned box
#[derive(Deserialize, Debug, Clone)]
pub struct BoundsConfig {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min: SCENE_MIN.to_vec(),
            max: SCENE_MAX.to_vec(),
        }
    }
}

/// Configuration for a single cube
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // used for attractor/repulsor wiring
    pub size: f64,    // half edge length; collision radius is sqrt(2 * size)
    #[serde(default)]
    pub texture: Texture,
    #[serde(default)]
    pub position: Option<Vec<f64>>,
    #[serde(default)]
    pub velocity: Option<Vec<f64>>,
    #[serde(default)]
    pub rotation_axis: Option<Vec<f64>>,
    #[serde(default)]
    pub rotation_speed: Option<f64>, // degrees per second
    #[serde(default)]
    pub min_rotation_speed: Option<f64>, // floor applied after randomisation
    #[serde(default)]
    pub attractors: Vec<String>,
    #[serde(default)]
    pub repulsors: Vec<String>,
}

impl BodyConfig {
    /// A body with every kinematic field left to the randomiser
    pub fn random(name: &str, size: f64, texture: Texture) -> Self {
        Self {
            name: name.to_string(),
            size,
            texture,
            position: None,
            velocity: None,
            rotation_axis: None,
            rotation_speed: None,
            min_rotation_speed: None,
            attractors: Vec::new(),
            repulsors: Vec::new(),
        }
    }
}

/// Top-level scene configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default = "default_bounds")]
    pub bounds: Option<BoundsConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl Default for ScenarioConfig {
    /// The cube scene: the UCC cube pinned at the centre plus two random cubes
    fn default() -> Self {
        let mut cube = BodyConfig::random("cube", 1.0, Texture::UccLogo);
        cube.position = Some(vec![0.0, 0.0, -10.0]);
        cube.min_rotation_speed = Some(30.0);

        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            bounds: default_bounds(),
            bodies: vec![
                cube,
                BodyConfig::random("under_construction", 1.0, Texture::UnderConstruction),
                BodyConfig::random("html5", 1.0, Texture::Html5),
            ],
        }
    }
}

fn default_tick_ms() -> f64 {
    DEFAULT_TICK_MS
}

fn default_gravity() -> f64 {
    DEFAULT_GRAVITY
}

fn default_speed_cap() -> f64 {
    DEFAULT_SPEED_CAP
}

fn default_damping() -> f64 {
    DEFAULT_DAMPING
}

fn default_collision_margin() -> f64 {
    DEFAULT_COLLISION_MARGIN
}

fn default_bounds() -> Option<BoundsConfig> {
    Some(BoundsConfig::default())
}
