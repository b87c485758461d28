pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use simulation::states::{Body, BodyId, Bounds, NVec3, Phase, Pose, SimulationState, Texture};
pub use simulation::forces::{Acceleration, AccelSet, InverseSquare, Sources};
pub use simulation::collision::{bounce, collides, handle_collision, reflect_bounds};
pub use simulation::integrator::{step, step_all, StepReport, TickReport};
pub use simulation::scenario::Scenario;
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;

pub use configuration::config::{CollisionConfig, EngineConfig, ParametersConfig, BoundsConfig, BodyConfig, ScenarioConfig};
pub use configuration::error::ConfigError;

pub use visualization::cubesim_vis3d::run_3d;
