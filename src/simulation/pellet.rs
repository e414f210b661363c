//! Food pellets that fish eat to extend their lifetime.
//!
//! Pellets are placed at the start of a run, spawned at random during it, or
//! dropped by the user. They never expire; a pellet disappears only when eaten.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::wrap_coordinate;
use super::locatable::Locatable;
use super::params::Params;

/// A food point in the simulation box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pellet {
    /// Position in 2D space.
    pub pos: Array1<f32>,
}

impl Pellet {
    /// Creates a pellet at the given coordinates, wrapped into the box.
    pub fn new(x: f32, y: f32, params: &Params) -> Self {
        Self {
            pos: Array1::from_vec(vec![
                wrap_coordinate(x, params.box_width),
                wrap_coordinate(y, params.box_height),
            ]),
        }
    }

    /// Creates a pellet at a uniformly random position.
    pub fn new_random<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        Self {
            pos: Array1::from_vec(vec![
                rng.random_range(0.0..params.box_width),
                rng.random_range(0.0..params.box_height),
            ]),
        }
    }
}

impl Locatable for Pellet {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}
