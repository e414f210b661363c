//! Fish behavior, state, and lifecycle management.
//!
//! A fish swims straight at constant speed, turning a little each frame
//! towards the nearest pellet it can see. Eating extends its lifetime; when the
//! lifetime runs out the ecosystem removes it.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::geometric_utils::{normalize_angle, wrap_heading};
use super::locatable::Locatable;
use super::params::{BreedingPolicy, Params};
use super::pellet::Pellet;

/// A simulated fish.
///
/// Fish can:
/// - See pellets within their detection range in a forward cone of ±90°
/// - Steer towards the nearest visible pellet at a bounded turn rate
/// - Eat pellets to extend their lifetime
/// - Breed with nearby eligible fish
/// - Die when their lifetime reaches zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    /// Unique identifier for this fish.
    pub id: usize,
    /// Zero for founders, one more than the older parent for offspring.
    pub generation: u32,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Heading in radians, kept in `[0, 2π)`.
    pub rot: f32,
    /// Distance travelled per frame.
    pub speed: f32,
    /// Maximum distance at which pellets are noticed.
    pub detection_range: f32,
    /// Remaining lifetime in seconds (dies when <= 0).
    pub lifetime: f32,
    /// Time alive in simulation seconds.
    pub age: f32,
    /// Display color (RGBA), fixed at creation.
    pub color: [u8; 4],
    /// Simulation time of the most recent meal.
    pub last_meal_time: f32,
    /// Seconds until this fish may breed again.
    pub breeding_cooldown: f32,
    /// Number of pellets eaten.
    pub meals: u32,
    /// Number of offspring produced.
    pub children: u32,
}

impl Fish {
    /// Creates a founder fish with random traits, position, heading and color.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `params` - Simulation parameters (trait bounds and box size)
    /// * `rng` - Random source
    pub fn new_random<R: Rng + ?Sized>(id: usize, params: &Params, rng: &mut R) -> Self {
        let speed = rng.random_range(params.min_speed..=params.max_speed);
        let detection_range =
            rng.random_range(params.min_detection_range..=params.max_detection_range);
        Self::with_traits(id, speed, detection_range, 0, params, rng)
    }

    /// Creates a fish with the given traits at a random position and heading.
    ///
    /// Traits are clamped to the configured bounds.
    pub fn with_traits<R: Rng + ?Sized>(
        id: usize,
        speed: f32,
        detection_range: f32,
        generation: u32,
        params: &Params,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            generation,
            pos: Array1::from_vec(vec![
                rng.random_range(0.0..params.box_width),
                rng.random_range(0.0..params.box_height),
            ]),
            rot: rng.random_range(0.0..TAU),
            speed: speed.clamp(params.min_speed, params.max_speed),
            detection_range: detection_range
                .clamp(params.min_detection_range, params.max_detection_range),
            lifetime: params.max_lifetime,
            age: 0.0,
            color: [
                rng.random_range(50..=255),
                rng.random_range(50..=255),
                rng.random_range(50..=255),
                255,
            ],
            last_meal_time: 0.0,
            breeding_cooldown: 0.0,
            meals: 0,
            children: 0,
        }
    }

    /// Checks if the fish is alive.
    ///
    /// # Returns
    ///
    /// `true` if lifetime > 0, `false` otherwise.
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Finds the closest pellet inside the detection range and the forward cone.
    ///
    /// A pellet qualifies when its wrap-around distance is strictly below the
    /// detection range and its bearing deviates less than 90° from the heading.
    /// On equal distances the pellet seen first wins.
    pub fn find_nearest_pellet<'a>(
        &self,
        pellets: &'a [Pellet],
        params: &Params,
    ) -> Option<&'a Pellet> {
        let mut nearest = None;
        let mut min_distance = f32::INFINITY;

        for pellet in pellets {
            let d = self.offset_to(pellet, params.box_width, params.box_height);
            let distance = d.dot(&d).sqrt();
            let bearing = d[1].atan2(d[0]);
            let deviation = normalize_angle(bearing - self.rot).abs();

            if distance < self.detection_range
                && distance < min_distance
                && deviation < FRAC_PI_2
            {
                nearest = Some(pellet);
                min_distance = distance;
            }
        }

        nearest
    }

    /// Turns towards `target` by at most `max_turn_rate` radians.
    ///
    /// A target sitting exactly on the fish gives no direction, the heading is
    /// left unchanged.
    pub fn steer_towards(&mut self, target: &dyn Locatable, params: &Params) {
        let d = self.offset_to(target, params.box_width, params.box_height);
        if d[0] == 0.0 && d[1] == 0.0 {
            return;
        }

        let bearing = d[1].atan2(d[0]);
        let turn = normalize_angle(bearing - self.rot)
            .clamp(-params.max_turn_rate, params.max_turn_rate);
        self.rot = wrap_heading(self.rot + turn);
    }

    /// Moves one frame along the heading and wraps around the box edges.
    pub fn advance(&mut self, params: &Params) {
        self.pos[0] += self.speed * self.rot.cos();
        self.pos[1] += self.speed * self.rot.sin();
        self.wrap(params.box_width, params.box_height);
    }

    /// Spends `dt` seconds of lifetime and breeding cooldown.
    ///
    /// # Arguments
    ///
    /// * `dt` - Time delta in seconds
    pub fn age_by(&mut self, dt: f32) {
        self.lifetime -= dt;
        self.age += dt;
        if self.breeding_cooldown > 0.0 {
            self.breeding_cooldown -= dt;
        }
    }

    /// Runs one frame of behavior: perceive, steer, move, then age.
    pub fn swim(&mut self, pellets: &[Pellet], params: &Params, dt: f32) {
        if let Some(target) = self.find_nearest_pellet(pellets, params) {
            self.steer_towards(target, params);
        }
        self.advance(params);
        self.age_by(dt);
    }

    /// Eats a pellet, extending the lifetime and recording the meal time.
    ///
    /// # Arguments
    ///
    /// * `time` - Current simulation time
    /// * `params` - Simulation parameters
    pub fn eat(&mut self, time: f32, params: &Params) {
        self.lifetime += params.lifetime_increase;
        self.last_meal_time = time;
        self.meals += 1;
    }

    /// Checks whether the fish is currently eligible to breed.
    pub fn can_breed(&self, time: f32, params: &Params) -> bool {
        match params.breeding_policy {
            BreedingPolicy::CooldownAndRecentMeal => {
                self.breeding_cooldown <= 0.0
                    && time - self.last_meal_time < params.breeding_window
            }
            BreedingPolicy::LifetimeWindow => {
                self.lifetime >= params.max_lifetime - params.breeding_window
            }
        }
    }

    /// Starts the breeding cooldown after producing offspring.
    pub fn reset_breeding_cooldown(&mut self, params: &Params) {
        self.breeding_cooldown = params.breeding_cooldown;
        self.children += 1;
    }

    /// Tip of the fish body, one body length ahead along the heading.
    ///
    /// May lie outside the box; see
    /// [`wrapped_segments`](super::geometric_utils::wrapped_segments).
    pub fn head(&self, params: &Params) -> Array1<f32> {
        Array1::from_vec(vec![
            self.pos[0] + params.fish_length * self.rot.cos(),
            self.pos[1] + params.fish_length * self.rot.sin(),
        ])
    }
}

impl Locatable for Fish {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}
