//! Main ecosystem simulation: the per-frame fish and pellet loop.
//!
//! The ecosystem owns all fish and pellets. Each call to [`Ecosystem::step`]
//! runs one frame:
//! - an optional user-placed pellet is added
//! - every fish perceives, steers, moves and ages (in parallel, fish only read pellets)
//! - fish eat at most one pellet each, eaten pellets are removed
//! - a random pellet may spawn
//! - touching eligible pairs may breed, offspring are buffered
//! - dead fish are removed and offspring appended

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::breeding;
use super::error::SimError;
use super::event_log::{EventKind, EventLog};
use super::fish::Fish;
use super::locatable::Locatable;
use super::params::Params;
use super::pellet::Pellet;
use super::stats::{Counters, PopulationStats};

/// The main ecosystem containing all simulation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecosystem {
    /// All living fish, in creation order.
    pub fish: Vec<Fish>,
    /// Live pellets.
    pub pellets: Vec<Pellet>,
    /// Total simulation time elapsed.
    pub time: f32,
    /// Identifier handed to the next fish created.
    pub next_id: usize,
    /// Running totals.
    pub counters: Counters,
    /// Recent births and deaths for display.
    pub event_log: EventLog,
}

impl Default for Ecosystem {
    fn default() -> Self {
        Self::empty()
    }
}

impl Ecosystem {
    /// Creates an ecosystem with no fish and no pellets.
    pub fn empty() -> Self {
        Self {
            fish: Vec::new(),
            pellets: Vec::new(),
            time: 0.0,
            next_id: 0,
            counters: Counters::default(),
            event_log: EventLog::default(),
        }
    }

    /// Creates a new ecosystem with `n_fish` random fish and half the pellet cap filled.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        let mut ecosystem = Self::empty();

        for _ in 0..params.n_fish {
            ecosystem.spawn_fish(params, rng);
        }

        ecosystem.pellets = (0..params.max_pellets / 2)
            .map(|_| Pellet::new_random(params, rng))
            .collect();

        info!(
            fish = ecosystem.fish.len(),
            pellets = ecosystem.pellets.len(),
            "ecosystem created"
        );

        ecosystem
    }

    /// Adds a random founder fish and returns it for further adjustment.
    pub fn spawn_fish<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) -> &mut Fish {
        let fish = Fish::new_random(self.next_id, params, rng);
        self.next_id += 1;
        self.fish.push(fish);
        let last = self.fish.len() - 1;
        &mut self.fish[last]
    }

    /// Places a pellet at the given coordinates if the pellet cap allows it.
    ///
    /// # Returns
    ///
    /// `true` if the pellet was added.
    pub fn place_pellet(&mut self, x: f32, y: f32, params: &Params) -> bool {
        if self.pellets.len() >= params.max_pellets {
            return false;
        }
        self.pellets.push(Pellet::new(x, y, params));
        self.counters.pellets_spawned += 1;
        true
    }

    /// Advances the simulation by one frame.
    ///
    /// # Arguments
    ///
    /// * `params` - Simulation parameters
    /// * `dt` - Elapsed time for this frame in seconds
    /// * `placement` - Coordinates of a user-placed pellet, if any
    /// * `rng` - Random source for spawning and breeding
    ///
    /// # Returns
    ///
    /// Statistics of the population at the end of the frame, `None` if no fish remain.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        params: &Params,
        dt: f32,
        placement: Option<(f32, f32)>,
        rng: &mut R,
    ) -> Option<PopulationStats> {
        if let Some((x, y)) = placement {
            self.place_pellet(x, y, params);
        }

        self.time += dt;
        self.counters.frames += 1;

        let pellets = &self.pellets;
        self.fish
            .par_iter_mut()
            .for_each(|fish| fish.swim(pellets, params, dt));

        self.feed(params);
        self.spawn_pellet(params, rng);

        let offspring = self.breed_pairs(params, rng);
        self.cull_and_append(offspring);

        self.stats()
    }

    /// Lets every fish eat the first pellet within reach, then removes eaten pellets.
    ///
    /// A pellet eaten earlier in the frame still feeds later fish; it is only
    /// removed once all fish have been checked.
    fn feed(&mut self, params: &Params) {
        let mut eaten = vec![false; self.pellets.len()];

        for fish in &mut self.fish {
            let reach = self.pellets.iter().position(|pellet| {
                fish.distance_to(pellet, params.box_width, params.box_height)
                    < params.pellet_eat_distance
            });
            if let Some(idx) = reach {
                eaten[idx] = true;
                fish.eat(self.time, params);
                self.counters.meals += 1;
            }
        }

        let mut eaten = eaten.into_iter();
        self.pellets.retain(|_| !eaten.next().unwrap_or(false));
    }

    /// Spawns one random pellet with probability `pellet_spawn_rate` while below the cap.
    fn spawn_pellet<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) {
        if self.pellets.len() < params.max_pellets
            && rng.random_bool(f64::from(params.pellet_spawn_rate))
        {
            self.pellets.push(Pellet::new_random(params, rng));
            self.counters.pellets_spawned += 1;
        }
    }

    /// Checks every unordered pair of fish for breeding and collects the offspring.
    ///
    /// Eligibility is evaluated per pair, so a parent that just started its
    /// cooldown cannot breed again in the same frame.
    fn breed_pairs<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) -> Vec<Fish> {
        let mut offspring = Vec::new();
        if !params.enable_breeding {
            return offspring;
        }

        let n = self.fish.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.fish.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                if a.distance_to(&*b, params.box_width, params.box_height) < params.fish_length
                    && a.can_breed(self.time, params)
                    && b.can_breed(self.time, params)
                    && rng.random_bool(f64::from(params.breeding_chance))
                {
                    let child = breeding::breed(a, b, self.next_id, params, rng);
                    self.next_id += 1;

                    debug!(
                        child = child.id,
                        parent_1 = a.id,
                        parent_2 = b.id,
                        speed = child.speed,
                        detection_range = child.detection_range,
                        "fish born"
                    );
                    self.event_log.log(
                        self.time,
                        format!("#{} born to #{} and #{}", child.id, a.id, b.id),
                        EventKind::Birth,
                    );
                    offspring.push(child);
                }
            }
        }

        offspring
    }

    /// Removes fish whose lifetime ran out, then appends this frame's offspring.
    fn cull_and_append(&mut self, offspring: Vec<Fish>) {
        let before = self.fish.len();

        for dead in self.fish.iter().filter(|f| !f.is_alive()) {
            debug!(id = dead.id, age = dead.age, meals = dead.meals, "fish died");
            self.event_log.log(
                self.time,
                format!("#{} died at age {:.1}s", dead.id, dead.age),
                EventKind::Death,
            );
        }
        self.fish.retain(Fish::is_alive);

        self.counters.deaths += (before - self.fish.len()) as u64;
        self.counters.births += offspring.len() as u64;
        self.fish.extend(offspring);

        if before > 0 && self.fish.is_empty() {
            info!(time = self.time, "no fish remaining");
            self.event_log
                .log(self.time, "no fish remaining", EventKind::Extinction);
        }
    }

    /// Aggregate statistics of the current population, `None` if it is empty.
    pub fn stats(&self) -> Option<PopulationStats> {
        PopulationStats::from_fish(&self.fish)
    }

    /// Saves the ecosystem state to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads an ecosystem state from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        let ecosystem = serde_json::from_str(&json)?;
        Ok(ecosystem)
    }
}
