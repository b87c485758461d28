//! Errors raised while turning a [`ScenarioConfig`](super::config::ScenarioConfig)
//! into a runnable scenario, or while rewiring attractors at runtime.
//!
//! The integrator itself never fails: degenerate geometry is guarded in place.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An attractor/repulsor list names a body that does not exist
    #[error("body `{body}` references unknown body `{target}`")]
    UnknownBody { body: String, target: String },

    /// A body lists itself as attractor or repulsor
    #[error("body `{body}` cannot attract or repel itself")]
    SelfReference { body: String },

    /// A runtime id does not index into the simulation state
    #[error("body id {id} is out of range ({len} bodies)")]
    BodyOutOfRange { id: usize, len: usize },

    /// Two bodies share the same name, so name-based wiring would be ambiguous
    #[error("duplicate body name `{name}`")]
    DuplicateName { name: String },

    #[error("body `{body}` has non-positive size {size}")]
    NonPositiveSize { body: String, size: f64 },

    /// Vectors in the YAML are plain lists and must hold x, y, z
    #[error("`{field}` of `{owner}` must have 3 components, got {got}")]
    VectorLength {
        owner: String,
        field: &'static str,
        got: usize,
    },

    #[error("bounds are inverted on axis {axis}: min {min} > max {max}")]
    InvertedBounds { axis: usize, min: f64, max: f64 },

    #[error("parameter `{name}` = {value} is out of range: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}
