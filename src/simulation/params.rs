use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::SimError;

/// Rule deciding when a fish is temporarily able to breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreedingPolicy {
    /// No breeding cooldown pending and a meal within the last `breeding_window` seconds.
    CooldownAndRecentMeal,
    /// Lifetime within `breeding_window` of `max_lifetime` (freshly spawned or well fed).
    LifetimeWindow,
}

/// How offspring traits are drawn from the parents' mutation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationDistribution {
    /// Uniform over the whole window.
    Uniform,
    /// Normal around the window's midpoint with a quarter of its width as std-dev.
    Gaussian,
    /// Normal around the parents' average, std-dev proportional to it by `mutation_range`.
    ParentMean,
}

/// Simulation parameters that control ecosystem behavior.
///
/// All values are read-only for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Simulation area width.
    pub box_width: f32,
    /// Simulation area height.
    pub box_height: f32,
    /// Initial fish population.
    pub n_fish: usize,
    /// Fish body length, also the breeding proximity threshold.
    pub fish_length: f32,
    /// Lifetime a fish starts with (seconds).
    pub max_lifetime: f32,
    /// Lifetime gained per pellet eaten (seconds).
    pub lifetime_increase: f32,
    /// Global breeding toggle.
    pub enable_breeding: bool,
    /// Probability per touching eligible pair per frame to produce offspring.
    pub breeding_chance: f32,
    /// Relative widening of the parents' trait range when sampling offspring traits.
    pub mutation_range: f32,
    /// Eligibility window in seconds, meaning depends on [`BreedingPolicy`].
    pub breeding_window: f32,
    /// Cooldown applied to both parents after breeding (seconds).
    pub breeding_cooldown: f32,
    /// Which eligibility rule is in effect.
    pub breeding_policy: BreedingPolicy,
    /// Sampling distribution for offspring traits.
    pub mutation_distribution: MutationDistribution,
    /// Lower speed bound.
    pub min_speed: f32,
    /// Upper speed bound.
    pub max_speed: f32,
    /// Lower detection range bound.
    pub min_detection_range: f32,
    /// Upper detection range bound.
    pub max_detection_range: f32,
    /// Maximum heading change per frame (radians).
    pub max_turn_rate: f32,
    /// Maximum pellet count (hard cap).
    pub max_pellets: usize,
    /// Probability per frame of spawning one pellet.
    pub pellet_spawn_rate: f32,
    /// Drawn pellet radius.
    pub pellet_size: f32,
    /// Distance under which a fish eats a pellet.
    pub pellet_eat_distance: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            box_width: 800.0,
            box_height: 600.0,
            n_fish: 100,
            fish_length: 20.0,
            max_lifetime: 20.0,
            lifetime_increase: 2.0,
            enable_breeding: true,
            breeding_chance: 0.01,
            mutation_range: 0.5,
            breeding_window: 5.0,
            breeding_cooldown: 5.0,
            breeding_policy: BreedingPolicy::CooldownAndRecentMeal,
            mutation_distribution: MutationDistribution::Uniform,
            min_speed: 2.0,
            max_speed: 4.0,
            min_detection_range: 50.0,
            max_detection_range: 100.0,
            max_turn_rate: 0.1,
            max_pellets: 200,
            pellet_spawn_rate: 0.4,
            pellet_size: 2.0,
            pellet_eat_distance: 5.0,
        }
    }
}

impl Params {
    /// Loads parameters from a JSON file and validates them.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves the parameters as pretty JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Checks that bounds are ordered, sizes positive and probabilities in `[0, 1]`.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.box_width > 0.0 && self.box_height > 0.0) {
            return Err(SimError::InvalidParams(format!(
                "box size must be positive, got {}x{}",
                self.box_width, self.box_height
            )));
        }
        if !(self.min_speed > 0.0 && self.min_speed <= self.max_speed) {
            return Err(SimError::InvalidParams(format!(
                "speed bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_speed, self.max_speed
            )));
        }
        if !(self.min_detection_range > 0.0
            && self.min_detection_range <= self.max_detection_range)
        {
            return Err(SimError::InvalidParams(format!(
                "detection range bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_detection_range, self.max_detection_range
            )));
        }
        for (name, p) in [
            ("breeding_chance", self.breeding_chance),
            ("pellet_spawn_rate", self.pellet_spawn_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidParams(format!(
                    "{name} must be a probability, got {p}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.mutation_range) {
            return Err(SimError::InvalidParams(format!(
                "mutation_range must lie in [0, 1], got {}",
                self.mutation_range
            )));
        }
        for (name, v) in [
            ("max_turn_rate", self.max_turn_rate),
            ("fish_length", self.fish_length),
            ("pellet_eat_distance", self.pellet_eat_distance),
            ("lifetime_increase", self.lifetime_increase),
            ("breeding_window", self.breeding_window),
            ("breeding_cooldown", self.breeding_cooldown),
        ] {
            if v.is_nan() || v < 0.0 {
                return Err(SimError::InvalidParams(format!(
                    "{name} must not be negative, got {v}"
                )));
            }
        }
        // a fish longer than the box would wrap onto itself when drawn
        if self.fish_length >= self.box_width.min(self.box_height) {
            return Err(SimError::InvalidParams(format!(
                "fish_length must be shorter than the box, got {}",
                self.fish_length
            )));
        }
        if self.max_lifetime <= 0.0 {
            return Err(SimError::InvalidParams(format!(
                "max_lifetime must be positive, got {}",
                self.max_lifetime
            )));
        }
        Ok(())
    }
}
