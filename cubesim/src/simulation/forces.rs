//! Acceleration contributors for the cube integrator
//!
//! Each body carries its own attractor and repulsor lists, so unlike an
//! all-pairs n-body sum the terms here are evaluated for one body at a time

use tracing::warn;

use crate::simulation::states::{BodyId, NVec3, SimulationState};

/// Squared separations below this are treated as coincident
pub const MIN_SEPARATION2: f64 = 1.0e-12;

/// Collection of acceleration terms (attraction, repulsion, ...)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector for the stepped body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Attractors pull with `+G`, repulsors push with `-G`
    #[allow(non_snake_case)]
    pub fn gravity(G: f64) -> Self {
        Self::new()
            .with(InverseSquare { G, sources: Sources::Attractors })
            .with(InverseSquare { G: -G, sources: Sources::Repulsors })
    }

    /// Total acceleration on body `id`, starting from zero
    pub fn accumulate_accel(&self, id: BodyId, sys: &SimulationState) -> NVec3 {
        let mut out = NVec3::zeros();
        for term in &self.terms {
            term.acceleration(id, sys, &mut out);
        }
        out
    }
}

/// Trait for acceleration sources acting on a single body of a [`SimulationState`]
/// Implementations add their contribution into `out`
pub trait Acceleration {
    fn acceleration(&self, id: BodyId, sys: &SimulationState, out: &mut NVec3);
}

/// Which of the body's reference lists a term reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sources {
    Attractors,
    Repulsors,
}

/// Unsoftened inverse-square law against the bodies in one reference list
/// Positive `G` pulls toward the source, negative `G` pushes away
#[allow(non_snake_case)]
pub struct InverseSquare {
    pub G: f64,
    pub sources: Sources,
}

impl Acceleration for InverseSquare {
    fn acceleration(&self, id: BodyId, sys: &SimulationState, out: &mut NVec3) {
        let Some(body) = sys.body(id) else {
            return;
        };
        let list = match self.sources {
            Sources::Attractors => &body.attractors,
            Sources::Repulsors => &body.repulsors,
        };

        for &other in list {
            if other == id {
                continue;
            }
            let Some(source) = sys.body(other) else {
                continue;
            };
            match inverse_square(&body.x, &source.x, self.G) {
                Some(a) => *out += a,
                None => warn!(
                    body = %body.label(id),
                    source = %source.label(other),
                    "coincident positions, skipping gravity contribution"
                ),
            }
        }
    }
}

/// Acceleration on a body at `xa` due to a source at `xb`:
///   a = G * (xb - xa) / |xb - xa|^3
/// Returns `None` when the two positions coincide
#[allow(non_snake_case)]
pub fn inverse_square(xa: &NVec3, xb: &NVec3, G: f64) -> Option<NVec3> {
    // r points from a to b, so positive G accelerates a toward b
    let r = xb - xa;
    let r2 = r.dot(&r);
    if !(r2 > MIN_SEPARATION2) {
        return None;
    }

    // G / |r|^3
    let coef = G / (r2 * r2.sqrt());
    Some(coef * r)
}
