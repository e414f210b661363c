//! Geometric utility functions for the toroidal (wrap-around) world.
//!
//! Every distance in the simulation goes through [`toroidal_displacement`], so
//! perception, eating and breeding all agree on what "close" means near the
//! edges of the box.

use geo::{Coord, Line};
use ndarray::Array1;
use std::f32::consts::{PI, TAU};

/// Shortest signed offset from `from` to `to` along a single wrapping axis.
///
/// A tie at exactly half the extent keeps the direct offset, which makes the
/// result antisymmetric in its arguments.
fn shortest_axis_offset(from: f32, to: f32, extent: f32) -> f32 {
    let direct = (to - from) % extent;
    let wrapped = extent - direct.abs();
    if direct.abs() <= wrapped {
        direct
    } else if direct > 0.0 {
        -wrapped
    } else {
        wrapped
    }
}

/// Calculates the shortest signed displacement between two points on the torus.
///
/// # Arguments
///
/// * `from` - Starting position
/// * `to` - Target position
/// * `box_width` - Width of the simulation box
/// * `box_height` - Height of the simulation box
///
/// # Returns
///
/// A 2D vector pointing from `from` towards `to` along the shortest path. Each
/// component has magnitude at most half the box extent on that axis.
pub fn toroidal_displacement(
    from: &Array1<f32>,
    to: &Array1<f32>,
    box_width: f32,
    box_height: f32,
) -> Array1<f32> {
    Array1::from_vec(vec![
        shortest_axis_offset(from[0], to[0], box_width),
        shortest_axis_offset(from[1], to[1], box_height),
    ])
}

/// Euclidean length of the shortest displacement between two points on the torus.
pub fn toroidal_distance(
    from: &Array1<f32>,
    to: &Array1<f32>,
    box_width: f32,
    box_height: f32,
) -> f32 {
    let d = toroidal_displacement(from, to, box_width, box_height);
    d.dot(&d).sqrt()
}

/// Wraps a single coordinate into `[0, extent)`.
///
/// `rem_euclid` can round up to `extent` for tiny negative inputs, that case
/// maps to zero.
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Wraps a position vector around the simulation box boundaries (toroidal topology).
///
/// # Arguments
///
/// * `v` - Mutable position vector to wrap
/// * `box_width` - Width of the simulation box
/// * `box_height` - Height of the simulation box
pub fn wrap_around_mut(v: &mut Array1<f32>, box_width: f32, box_height: f32) {
    v[0] = wrap_coordinate(v[0], box_width);
    v[1] = wrap_coordinate(v[1], box_height);
}

/// Normalizes an angle to the half-open interval `(-π, π]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Wraps a heading to `[0, 2π)`.
pub fn wrap_heading(angle: f32) -> f32 {
    wrap_coordinate(angle, TAU)
}

/// Finds where a segment leaving the box first crosses an edge.
///
/// Returns the segment parameter of the crossing and the shift that carries
/// the remainder of the segment back in through the opposite edge.
fn edge_crossing(
    from: Coord<f32>,
    to: Coord<f32>,
    box_width: f32,
    box_height: f32,
) -> Option<(f32, Coord<f32>)> {
    let mut crossing: Option<(f32, Coord<f32>)> = None;

    // a corner exit is resolved one axis at a time by the caller's loop
    let mut consider = |t: f32, shift: Coord<f32>| match crossing {
        Some((best, _)) if best <= t => {}
        _ => crossing = Some((t, shift)),
    };

    if to.x != from.x {
        if to.x < 0.0 {
            consider(-from.x / (to.x - from.x), Coord { x: box_width, y: 0.0 });
        } else if to.x >= box_width {
            consider((box_width - from.x) / (to.x - from.x), Coord { x: -box_width, y: 0.0 });
        }
    }
    if to.y != from.y {
        if to.y < 0.0 {
            consider(-from.y / (to.y - from.y), Coord { x: 0.0, y: box_height });
        } else if to.y >= box_height {
            consider((box_height - from.y) / (to.y - from.y), Coord { x: 0.0, y: -box_height });
        }
    }

    crossing
}

/// Splits a segment that starts inside the box into pieces that each lie inside it.
///
/// A fish near an edge is drawn partly on the opposite side of the screen; this
/// returns the in-box piece up to the crossed edge followed by the piece that
/// re-enters from the other side. A segment that stays inside yields itself.
///
/// # Arguments
///
/// * `start` - Segment start, inside the box
/// * `end` - Segment end, possibly outside the box
/// * `box_width` - Width of the simulation box
/// * `box_height` - Height of the simulation box
pub fn wrapped_segments(
    start: &Array1<f32>,
    end: &Array1<f32>,
    box_width: f32,
    box_height: f32,
) -> Vec<Line<f32>> {
    let mut from = Coord { x: start[0], y: start[1] };
    let mut to = Coord { x: end[0], y: end[1] };
    let mut lines = Vec::with_capacity(2);

    // segments shorter than the box cross at most one edge per axis
    for _ in 0..3 {
        match edge_crossing(from, to, box_width, box_height) {
            None => {
                lines.push(Line::new(from, to));
                return lines;
            }
            Some((t, shift)) => {
                let exit = from + (to - from) * t;
                lines.push(Line::new(from, exit));
                from = exit + shift;
                to = to + shift;
            }
        }
    }

    lines
}
