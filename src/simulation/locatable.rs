//! Trait for entities that have a position in the toroidal world.
//!
//! Fish and pellets both implement it, so the eating and breeding checks can
//! measure wrap-around distances between any two of them the same way.

use ndarray::Array1;

use super::geometric_utils::{toroidal_displacement, wrap_around_mut};

/// Trait for entities with a position on the torus.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;

    /// Shortest signed displacement from this entity to `other`.
    fn offset_to(&self, other: &dyn Locatable, box_width: f32, box_height: f32) -> Array1<f32> {
        toroidal_displacement(self.pos(), other.pos(), box_width, box_height)
    }

    /// Shortest wrap-around distance from this entity to `other`.
    fn distance_to(&self, other: &dyn Locatable, box_width: f32, box_height: f32) -> f32 {
        let d = self.offset_to(other, box_width, box_height);
        d.dot(&d).sqrt()
    }

    /// Wraps the entity's position back into the box.
    fn wrap(&mut self, box_width: f32, box_height: f32) {
        wrap_around_mut(self.pos_mut(), box_width, box_height);
    }
}
