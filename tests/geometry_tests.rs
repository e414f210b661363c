#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use shoal::simulation::geometric_utils::{
    normalize_angle, toroidal_displacement, toroidal_distance, wrap_around_mut, wrap_coordinate,
    wrap_heading, wrapped_segments,
};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const W: f32 = 800.0;
const H: f32 = 600.0;

fn point(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

#[test]
fn test_direct_displacement() {
    let d = toroidal_displacement(&point(10.0, 10.0), &point(30.0, 5.0), W, H);
    assert_eq!(d[0], 20.0);
    assert_eq!(d[1], -5.0);
}

#[test]
fn test_displacement_wraps_around_edges() {
    // 790 -> 10 is 20 units to the right through the edge
    let d = toroidal_displacement(&point(790.0, 590.0), &point(10.0, 5.0), W, H);
    assert_eq!(d[0], 20.0);
    assert_eq!(d[1], 15.0);

    let back = toroidal_displacement(&point(10.0, 5.0), &point(790.0, 590.0), W, H);
    assert_eq!(back[0], -20.0);
    assert_eq!(back[1], -15.0);

    let distance = toroidal_distance(&point(790.0, 590.0), &point(10.0, 5.0), W, H);
    assert!((distance - 25.0).abs() < 1e-4);
}

#[test]
fn test_half_extent_tie_keeps_direct_direction() {
    let d = toroidal_displacement(&point(0.0, 100.0), &point(400.0, 400.0), W, H);
    assert_eq!(d[0], 400.0);
    assert_eq!(d[1], 300.0);

    let back = toroidal_displacement(&point(400.0, 400.0), &point(0.0, 100.0), W, H);
    assert_eq!(back[0], -400.0);
    assert_eq!(back[1], -300.0);
}

#[test]
fn test_displacement_antisymmetric_and_bounded() {
    let mut rng = SmallRng::seed_from_u64(42);
    let half_diagonal = (W * W + H * H).sqrt() / 2.0;

    for _ in 0..5000 {
        let a = point(rng.random_range(0.0..W), rng.random_range(0.0..H));
        let b = point(rng.random_range(0.0..W), rng.random_range(0.0..H));

        let ab = toroidal_displacement(&a, &b, W, H);
        let ba = toroidal_displacement(&b, &a, W, H);

        assert_eq!(ab[0], -ba[0]);
        assert_eq!(ab[1], -ba[1]);
        assert!(ab[0].abs() <= W / 2.0);
        assert!(ab[1].abs() <= H / 2.0);
        assert!(toroidal_distance(&a, &b, W, H) <= half_diagonal + 1e-3);
    }
}

#[test]
fn test_wrap_coordinate_stays_below_extent() {
    assert_eq!(wrap_coordinate(800.0, W), 0.0);
    assert_eq!(wrap_coordinate(-1.0, W), 799.0);
    assert_eq!(wrap_coordinate(1601.0, W), 1.0);

    let tiny = wrap_coordinate(-1e-9, W);
    assert!((0.0..W).contains(&tiny));

    let mut v = point(-0.5, 600.25);
    wrap_around_mut(&mut v, W, H);
    assert_eq!(v[0], 799.5);
    assert_eq!(v[1], 0.25);
}

#[test]
fn test_normalize_angle_range() {
    assert_eq!(normalize_angle(PI), PI);
    assert_eq!(normalize_angle(-PI), PI);
    assert!((normalize_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
    assert!((normalize_angle(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-5);
    assert!(normalize_angle(0.05).abs() - 0.05 < 1e-6);

    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..1000 {
        let a = normalize_angle(rng.random_range(-50.0..50.0));
        assert!(a > -PI && a <= PI);
    }
}

#[test]
fn test_wrap_heading() {
    assert_eq!(wrap_heading(TAU), 0.0);
    assert!((wrap_heading(-0.1) - (TAU - 0.1)).abs() < 1e-5);
}

#[test]
fn test_segment_inside_is_unchanged() {
    let lines = wrapped_segments(&point(100.0, 100.0), &point(120.0, 100.0), W, H);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].start.x, 100.0);
    assert_eq!(lines[0].end.x, 120.0);
}

#[test]
fn test_segment_crossing_right_edge() {
    let lines = wrapped_segments(&point(795.0, 100.0), &point(815.0, 100.0), W, H);
    assert_eq!(lines.len(), 2);

    assert!((lines[0].start.x - 795.0).abs() < 1e-4);
    assert!((lines[0].end.x - 800.0).abs() < 1e-4);
    assert!((lines[1].start.x - 0.0).abs() < 1e-4);
    assert!((lines[1].end.x - 15.0).abs() < 1e-4);
    for line in &lines {
        assert!((line.start.y - 100.0).abs() < 1e-4);
        assert!((line.end.y - 100.0).abs() < 1e-4);
    }
}

#[test]
fn test_segment_crossing_top_edge() {
    let lines = wrapped_segments(&point(100.0, 3.0), &point(100.0, -7.0), W, H);
    assert_eq!(lines.len(), 2);

    assert!((lines[0].end.y - 0.0).abs() < 1e-4);
    assert!((lines[1].start.y - 600.0).abs() < 1e-4);
    assert!((lines[1].end.y - 593.0).abs() < 1e-4);
}

#[test]
fn test_segment_through_corner_stays_in_box() {
    let lines = wrapped_segments(&point(798.0, 598.0), &point(812.0, 612.0), W, H);
    assert!(lines.len() >= 2);

    let last = lines.last().unwrap();
    assert!((last.end.x - 12.0).abs() < 1e-3);
    assert!((last.end.y - 12.0).abs() < 1e-3);
    for line in &lines {
        for c in [line.start, line.end] {
            assert!(c.x >= -1e-3 && c.x <= W + 1e-3);
            assert!(c.y >= -1e-3 && c.y <= H + 1e-3);
        }
    }
}
