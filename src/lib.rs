//! # Shoal - Fish and Pellets Foraging Simulation
//!
//! A population of fish roams a wrap-around tank looking for food pellets.
//! Fish that eat live longer, and well-fed fish that bump into each other breed,
//! passing on a blend of their speed and detection range. Over time the
//! population drifts towards whatever traits keep fish fed.
//!
//! ## Features
//!
//! - Toroidal world: every distance takes the shortest way around the edges
//! - Forward-facing perception cone with bounded turn rate
//! - Lifetime-based survival extended by eating
//! - Two-parent breeding with mutation and trait clamping
//! - Pluggable breeding eligibility rules and mutation distributions
//! - Seeded randomness for reproducible runs
//! - Save/load simulation state as JSON
//! - A separate bouncing-balls demo
//!
//! ## Core Modules
//!
//! - [`simulation::fish`] - Fish behavior and state
//! - [`simulation::ecosystem`] - Main per-frame simulation loop
//! - [`simulation::breeding`] - Offspring trait inheritance
//! - [`simulation::geometric_utils`] - Wrap-around distances and segment splitting
//! - [`simulation::balls`] - Elastic collision demo

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bouncing balls with elastic collisions.
    pub mod balls;
    /// Offspring trait inheritance.
    pub mod breeding;
    /// Fish population and pellet field with the per-frame loop.
    pub mod ecosystem;
    /// Errors raised when loading or saving state and parameters.
    pub mod error;
    /// Bounded log of recent births and deaths.
    pub mod event_log;
    /// Fish behavior, state, and lifecycle.
    pub mod fish;
    /// Geometric utility functions for the wrap-around world.
    pub mod geometric_utils;
    /// Trait for entities with a position on the torus.
    ///
    /// The [`locatable::Locatable`] trait is implemented by [`fish::Fish`] and
    /// [`pellet::Pellet`] and provides wrap-around distances between them.
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// Food pellets.
    pub mod pellet;
    /// Population statistics and running counters.
    pub mod stats;
}
