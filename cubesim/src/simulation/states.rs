//! Core state types for the cube simulation.
//!
//! - `Body`            one cube, approximated by a sphere of `radius` for collisions
//! - `Bounds`          reflective axis-aligned box
//! - `SimulationState` owns every body; passed by reference into the integrator
//!
//! Bodies reference each other (attractors/repulsors) by [`BodyId`], an index
//! into `SimulationState::bodies`. Bodies are never removed, so ids stay valid.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use serde::Deserialize;

use crate::configuration::error::ConfigError;

pub type NVec3 = Vector3<f64>;

/// Index of a body inside [`SimulationState::bodies`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Which image the renderer wraps around the cube
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Texture {
    #[default]
    UccLogo,
    UnderConstruction,
    Html5,
    Steamroller,
    Uwa,
    Guild,
    Netapp,
}

/// A body is `Uninitialized` until its first step, which only records the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Active,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: Option<String>,
    pub texture: Texture,
    pub size: f64,   // half edge length of the drawn cube
    pub radius: f64, // collision sphere, sqrt(2 * size)
    pub x: NVec3,    // position
    pub v: NVec3,    // velocity
    pub a: NVec3,    // acceleration, recomputed every step
    pub rotation: f64,       // degrees
    pub rotation_axis: NVec3,
    pub rotation_speed: f64, // degrees per second
    pub attractors: Vec<BodyId>,
    pub repulsors: Vec<BodyId>,
    pub last_update_ms: Option<f64>,
}

impl Body {
    /// A body at rest at the origin, spinning about +y
    pub fn new(size: f64, texture: Texture) -> Self {
        Self {
            name: None,
            texture,
            size,
            radius: Self::radius_for_size(size),
            x: NVec3::zeros(),
            v: NVec3::zeros(),
            a: NVec3::zeros(),
            rotation: 0.0,
            rotation_axis: NVec3::y(),
            rotation_speed: 0.0,
            attractors: Vec::new(),
            repulsors: Vec::new(),
            last_update_ms: None,
        }
    }

    pub fn radius_for_size(size: f64) -> f64 {
        (2.0 * size).sqrt()
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn at(mut self, x: NVec3) -> Self {
        self.x = x;
        self
    }

    pub fn moving(mut self, v: NVec3) -> Self {
        self.v = v;
        self
    }

    /// Override the collision radius (keeps `size` untouched)
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn phase(&self) -> Phase {
        match self.last_update_ms {
            None => Phase::Uninitialized,
            Some(_) => Phase::Active,
        }
    }

    /// Name for log lines and error messages
    pub fn label(&self, id: BodyId) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", id.0),
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            translation: self.x,
            angle_deg: self.rotation,
            axis: self.rotation_axis,
        }
    }
}

/// What the renderer needs to build a model transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: NVec3,
    pub angle_deg: f64,
    pub axis: NVec3,
}

impl Pose {
    /// Axis-angle rotation; a degenerate (zero) axis gives the identity
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        match Unit::try_new(self.axis, 1.0e-12) {
            Some(axis) => UnitQuaternion::from_axis_angle(&axis, self.angle_deg.to_radians()),
            None => UnitQuaternion::identity(),
        }
    }
}

/// Axis-aligned reflective box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: NVec3,
    pub max: NVec3,
}

impl Bounds {
    pub fn new(min: NVec3, max: NVec3) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, x: &NVec3) -> bool {
        (0..3).all(|i| x[i] >= self.min[i] && x[i] <= self.max[i])
    }
}

/// Every body in the scene plus the optional reflective bounds
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub bodies: Vec<Body>,
    pub bounds: Option<Bounds>,
    pub ticks: u64, // completed `step_all` calls
}

impl SimulationState {
    pub fn new(bounds: Option<Bounds>) -> Self {
        Self {
            bodies: Vec::new(),
            bounds,
            ticks: 0,
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name.as_deref() == Some(name))
            .map(BodyId)
    }

    /// Replace the attractor list of `id`
    pub fn set_attractors(&mut self, id: BodyId, targets: &[BodyId]) -> Result<(), ConfigError> {
        self.check_targets(id, targets)?;
        self.bodies[id.0].attractors = targets.to_vec();
        Ok(())
    }

    /// Replace the repulsor list of `id`
    pub fn set_repulsors(&mut self, id: BodyId, targets: &[BodyId]) -> Result<(), ConfigError> {
        self.check_targets(id, targets)?;
        self.bodies[id.0].repulsors = targets.to_vec();
        Ok(())
    }

    fn check_targets(&self, id: BodyId, targets: &[BodyId]) -> Result<(), ConfigError> {
        let len = self.bodies.len();
        let body = self.body(id).ok_or(ConfigError::BodyOutOfRange { id: id.0, len })?;
        for &target in targets {
            if target.0 >= len {
                return Err(ConfigError::BodyOutOfRange { id: target.0, len });
            }
            if target == id {
                return Err(ConfigError::SelfReference { body: body.label(id) });
            }
        }
        Ok(())
    }
}
