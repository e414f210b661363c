use serde::{Deserialize, Serialize};

use super::fish::Fish;

/// Minimum, mean and maximum of one fish trait over the population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitSummary {
    /// Smallest value.
    pub min: f32,
    /// Arithmetic mean.
    pub avg: f32,
    /// Largest value.
    pub max: f32,
}

impl TraitSummary {
    /// Summarizes a non-empty sequence of values, `None` when empty.
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v as f64;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            min,
            avg: (sum / count as f64) as f32,
            max,
        })
    }
}

/// Aggregate statistics emitted after every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Number of living fish.
    pub count: usize,
    /// Speed distribution.
    pub speed: TraitSummary,
    /// Detection range distribution.
    pub detection_range: TraitSummary,
}

impl PopulationStats {
    /// Computes the statistics of a population; `None` if nobody is left.
    pub fn from_fish(fish: &[Fish]) -> Option<Self> {
        Some(Self {
            count: fish.len(),
            speed: TraitSummary::from_values(fish.iter().map(|f| f.speed))?,
            detection_range: TraitSummary::from_values(fish.iter().map(|f| f.detection_range))?,
        })
    }
}

/// Running totals since the start of the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counters {
    /// Offspring produced.
    pub births: u64,
    /// Fish removed after their lifetime ran out.
    pub deaths: u64,
    /// Pellets eaten (a pellet shared by two fish counts twice).
    pub meals: u64,
    /// Pellets spawned at random or placed by the user.
    pub pellets_spawned: u64,
    /// Frames simulated.
    pub frames: u64,
}
