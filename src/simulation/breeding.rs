//! Trait inheritance for fish offspring.
//!
//! A child's speed and detection range are drawn from a window spanning both
//! parents' values, widened by the mutation range, then clamped to the global
//! bounds. With [`MutationDistribution::ParentMean`] the value is instead
//! scattered around the parents' average.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::fish::Fish;
use super::params::{MutationDistribution, Params};

/// Widens the interval spanned by two parent values by the mutation range.
///
/// # Arguments
///
/// * `a` - First parent value
/// * `b` - Second parent value
/// * `mutation_range` - Relative widening on each side
///
/// # Returns
///
/// `(min(a, b) * (1 - mutation_range), max(a, b) * (1 + mutation_range))`
pub fn mutation_window(a: f32, b: f32, mutation_range: f32) -> (f32, f32) {
    (
        a.min(b) * (1.0 - mutation_range),
        a.max(b) * (1.0 + mutation_range),
    )
}

/// Draws a value from `[low, high]` with the configured distribution.
///
/// The Gaussian variant can land outside the window; callers clamp.
/// `ParentMean` has no window of its own and is treated as Gaussian here.
pub fn sample_in_window<R: Rng + ?Sized>(
    low: f32,
    high: f32,
    distribution: MutationDistribution,
    rng: &mut R,
) -> f32 {
    if high <= low {
        return low;
    }
    match distribution {
        MutationDistribution::Uniform => rng.random_range(low..=high),
        MutationDistribution::Gaussian | MutationDistribution::ParentMean => {
            sample_normal((low + high) / 2.0, (high - low) / 4.0, rng)
        }
    }
}

/// Normal sample, or the mean itself when the std-dev is not usable.
fn sample_normal<R: Rng + ?Sized>(mean: f32, std_dev: f32, rng: &mut R) -> f32 {
    match Normal::new(mean, std_dev) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}

/// Derives a child's trait from two parent values.
///
/// # Arguments
///
/// * `a`, `b` - Parent values
/// * `min`, `max` - Global bounds the result is clamped to
/// * `bound_window` - Also clamp the sampling window itself to the bounds
/// * `params` - Simulation parameters
/// * `rng` - Random source
pub fn inherit_trait<R: Rng + ?Sized>(
    a: f32,
    b: f32,
    (min, max): (f32, f32),
    bound_window: bool,
    params: &Params,
    rng: &mut R,
) -> f32 {
    if params.mutation_distribution == MutationDistribution::ParentMean {
        let mean = (a + b) / 2.0;
        return sample_normal(mean, mean * params.mutation_range, rng).clamp(min, max);
    }

    let (mut low, mut high) = mutation_window(a, b, params.mutation_range);
    if bound_window {
        low = low.max(min);
        high = high.min(max);
    }
    sample_in_window(low, high, params.mutation_distribution, rng).clamp(min, max)
}

/// Produces a child of two fish and starts both parents' breeding cooldown.
///
/// The child gets a fresh lifetime, random position, heading and color.
pub fn breed<R: Rng + ?Sized>(
    parent_1: &mut Fish,
    parent_2: &mut Fish,
    id: usize,
    params: &Params,
    rng: &mut R,
) -> Fish {
    let speed = inherit_trait(
        parent_1.speed,
        parent_2.speed,
        (params.min_speed, params.max_speed),
        false,
        params,
        rng,
    );
    // the detection window is bounded before sampling, speed only after
    let detection_range = inherit_trait(
        parent_1.detection_range,
        parent_2.detection_range,
        (params.min_detection_range, params.max_detection_range),
        true,
        params,
        rng,
    );
    let generation = parent_1.generation.max(parent_2.generation) + 1;

    parent_1.reset_breeding_cooldown(params);
    parent_2.reset_breeding_cooldown(params);

    Fish::with_traits(id, speed, detection_range, generation, params, rng)
}
