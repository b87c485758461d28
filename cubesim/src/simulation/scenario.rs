//! Build a fully-initialized cube scene from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - simulation state (`SimulationState` with every body and the bounds)
//! - active force set (`AccelSet`)
//! - the random source used for randomised fields and click spawning
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! physics and rendering systems, or driven headless with [`Scenario::run_fixed`]

use std::collections::HashMap;

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::configuration::config::{BodyConfig, BoundsConfig, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::{step_all, TickReport};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyId, Bounds, NVec3, SimulationState, Texture};

/// Size of cubes spawned by a mouse click
pub const CLICK_SPAWN_SIZE: f64 = 0.5;

/// Bevy resource representing a running cube scene
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub state: SimulationState,
    pub forces: AccelSet,
    pub rng: StdRng,
    pub clock_ms: f64, // next timestamp handed out by `run_fixed`
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let engine = Engine::from_config(&cfg.engine)?;
        let parameters = Parameters::from_config(&cfg.parameters)?;
        let bounds = cfg.bounds.as_ref().map(build_bounds).transpose()?;

        let mut rng = match parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // Bodies first, wiring second: names may point forward in the list
        let mut state = SimulationState::new(bounds);
        let mut names: HashMap<&str, BodyId> = HashMap::new();
        for bc in &cfg.bodies {
            let body = build_body(bc, &mut rng)?;
            let id = state.add_body(body);
            if names.insert(bc.name.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateName { name: bc.name.clone() });
            }
        }

        for (i, bc) in cfg.bodies.iter().enumerate() {
            let id = BodyId(i);
            let attractors = resolve_names(&bc.name, &bc.attractors, &names)?;
            let repulsors = resolve_names(&bc.name, &bc.repulsors, &names)?;
            state.set_attractors(id, &attractors)?;
            state.set_repulsors(id, &repulsors)?;
        }

        let forces = AccelSet::gravity(parameters.G);

        info!(
            bodies = state.len(),
            bounded = state.bounds.is_some(),
            collisions = engine.collisions_enabled(),
            G = parameters.G,
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            state,
            forces,
            rng,
            clock_ms: 0.0,
        })
    }

    /// Step every body to wall-clock time `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> TickReport {
        let Scenario {
            state,
            parameters,
            forces,
            engine,
            ..
        } = self;
        step_all(state, now_ms, forces, parameters, engine)
    }

    /// Drive `ticks` frames on a fixed clock of `engine.tick_ms`
    /// The first frame a body sees only bootstraps it
    pub fn run_fixed(&mut self, ticks: u64) -> TickReport {
        let mut total = TickReport::default();
        for _ in 0..ticks {
            let tick = self.advance(self.clock_ms);
            total.bootstrapped += tick.bootstrapped;
            total.reflections += tick.reflections;
            total.collisions += tick.collisions;
            self.clock_ms += self.engine.tick_ms;
        }
        total
    }

    /// Spawn a small cube where the canvas was clicked
    /// `cx`, `cy` are cursor coordinates normalised to the window (0..1, y down)
    pub fn spawn_at_cursor(&mut self, cx: f64, cy: f64) -> BodyId {
        let texture = click_texture(&mut self.rng);
        let mut body = random_body(&mut self.rng, CLICK_SPAWN_SIZE, texture);
        body.x[0] = cx;
        body.x[1] = 1.0 - cy;

        let id = self.state.add_body(body);
        debug!(id = id.0, ?texture, x = cx, y = 1.0 - cy, "spawned cube at cursor");
        id
    }
}

/// A body with every kinematic field drawn the way the cube scene does
pub fn random_body<R: Rng>(rng: &mut R, size: f64, texture: Texture) -> Body {
    let mut body = Body::new(size, texture);
    body.x = NVec3::new(
        2.0 * (rng.gen::<f64>() - 0.5),
        2.0 * (rng.gen::<f64>() - 0.5),
        -15.0 + 10.0 * rng.gen::<f64>(),
    );
    body.v = NVec3::new(
        rng.gen::<f64>() - 0.5,
        rng.gen::<f64>() - 0.5,
        rng.gen::<f64>() - 0.5,
    );
    body.rotation_axis = NVec3::new(rng.gen(), rng.gen(), rng.gen());
    body.rotation_speed = random_rotation_speed(rng);
    body
}

/// 30 +- 10 degrees per second, either direction
pub fn random_rotation_speed<R: Rng>(rng: &mut R) -> f64 {
    let speed = 30.0 + 20.0 * (rng.gen::<f64>() - 0.5);
    if rng.gen_bool(0.5) {
        speed
    } else {
        -speed
    }
}

/// One third UCC logo, the rest split between the other two scene textures
pub fn click_texture<R: Rng>(rng: &mut R) -> Texture {
    if rng.gen::<f64>() > 1.0 / 3.0 {
        if rng.gen_bool(0.5) {
            Texture::UnderConstruction
        } else {
            Texture::Html5
        }
    } else {
        Texture::UccLogo
    }
}

fn build_body(bc: &BodyConfig, rng: &mut StdRng) -> Result<Body, ConfigError> {
    if !(bc.size > 0.0) || !bc.size.is_finite() {
        return Err(ConfigError::NonPositiveSize {
            body: bc.name.clone(),
            size: bc.size,
        });
    }

    // Randomise everything first so a seed gives the same scene whatever is overridden
    let mut body = random_body(rng, bc.size, bc.texture).named(&bc.name);

    if let Some(x) = &bc.position {
        body.x = vec3(&bc.name, "position", x)?;
    }
    if let Some(v) = &bc.velocity {
        body.v = vec3(&bc.name, "velocity", v)?;
    }
    if let Some(axis) = &bc.rotation_axis {
        body.rotation_axis = vec3(&bc.name, "rotation_axis", axis)?;
    }
    if let Some(speed) = bc.rotation_speed {
        body.rotation_speed = speed;
    }
    if let Some(floor) = bc.min_rotation_speed {
        body.rotation_speed = body.rotation_speed.max(floor);
    }

    Ok(body)
}

fn build_bounds(cfg: &BoundsConfig) -> Result<Bounds, ConfigError> {
    let min = vec3("bounds", "min", &cfg.min)?;
    let max = vec3("bounds", "max", &cfg.max)?;
    for axis in 0..3 {
        if min[axis] > max[axis] {
            return Err(ConfigError::InvertedBounds {
                axis,
                min: min[axis],
                max: max[axis],
            });
        }
    }
    Ok(Bounds::new(min, max))
}

fn resolve_names(
    body: &str,
    targets: &[String],
    names: &HashMap<&str, BodyId>,
) -> Result<Vec<BodyId>, ConfigError> {
    targets
        .iter()
        .map(|t| {
            if t == body {
                return Err(ConfigError::SelfReference { body: body.to_string() });
            }
            names.get(t.as_str()).copied().ok_or_else(|| ConfigError::UnknownBody {
                body: body.to_string(),
                target: t.clone(),
            })
        })
        .collect()
}

fn vec3(owner: &str, field: &'static str, xs: &[f64]) -> Result<NVec3, ConfigError> {
    match xs {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(ConfigError::VectorLength {
            owner: owner.to_string(),
            field,
            got: xs.len(),
        }),
    }
}
