#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shoal::simulation::ecosystem::Ecosystem;
use shoal::simulation::event_log::EventKind;
use shoal::simulation::params::Params;
use std::collections::HashSet;

const DT: f32 = 1.0 / 60.0;

fn create_test_params() -> Params {
    Params {
        n_fish: 20,
        max_pellets: 50,
        pellet_spawn_rate: 0.0,
        ..Params::default()
    }
}

/// An ecosystem holding `count` fish stacked on one spot, facing right at minimum speed.
fn stacked_fish(count: usize, params: &Params, rng: &mut SmallRng) -> Ecosystem {
    let mut ecosystem = Ecosystem::empty();
    for _ in 0..count {
        let fish = ecosystem.spawn_fish(params, rng);
        fish.pos = Array1::from_vec(vec![400.0, 300.0]);
        fish.rot = 0.0;
        fish.speed = params.min_speed;
    }
    ecosystem
}

#[test]
fn test_ecosystem_creation() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(42);
    let ecosystem = Ecosystem::new(&params, &mut rng);

    assert_eq!(ecosystem.fish.len(), params.n_fish);
    assert_eq!(ecosystem.pellets.len(), params.max_pellets / 2);
    assert_eq!(ecosystem.next_id, params.n_fish);
    assert_eq!(ecosystem.time, 0.0);

    let ids: HashSet<usize> = ecosystem.fish.iter().map(|f| f.id).collect();
    assert_eq!(ids.len(), params.n_fish);
}

#[test]
fn test_step_advances_time() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut ecosystem = Ecosystem::new(&params, &mut rng);

    for _ in 0..10 {
        ecosystem.step(&params, 0.1, None, &mut rng);
    }

    assert!((ecosystem.time - 1.0).abs() < 1e-5);
    assert_eq!(ecosystem.counters.frames, 10);
}

#[test]
fn test_pellet_at_fish_position_eaten_same_frame() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut ecosystem = stacked_fish(1, &params, &mut rng);
    assert!(ecosystem.place_pellet(400.0, 300.0, &params));

    let before = ecosystem.fish[0].lifetime;
    ecosystem.step(&params, DT, None, &mut rng);

    let fish = &ecosystem.fish[0];
    assert!(ecosystem.pellets.is_empty());
    assert!((fish.lifetime - (before - DT + params.lifetime_increase)).abs() < 1e-5);
    assert_eq!(fish.last_meal_time, ecosystem.time);
    assert_eq!(fish.meals, 1);
    assert_eq!(ecosystem.counters.meals, 1);
}

#[test]
fn test_placed_pellet_eaten_in_same_step() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut ecosystem = stacked_fish(1, &params, &mut rng);

    ecosystem.step(&params, DT, Some((403.0, 300.0)), &mut rng);

    assert!(ecosystem.pellets.is_empty());
    assert_eq!(ecosystem.fish[0].meals, 1);
}

#[test]
fn test_pellet_shared_by_two_fish() {
    let params = Params {
        enable_breeding: false,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(5);
    let mut ecosystem = stacked_fish(2, &params, &mut rng);
    ecosystem.place_pellet(402.0, 300.0, &params);

    ecosystem.step(&params, DT, None, &mut rng);

    assert!(ecosystem.pellets.is_empty());
    assert!(ecosystem.fish.iter().all(|f| f.meals == 1));
    assert_eq!(ecosystem.counters.meals, 2);
}

#[test]
fn test_fish_eats_at_most_one_pellet() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(6);
    let mut ecosystem = stacked_fish(1, &params, &mut rng);
    ecosystem.place_pellet(402.0, 300.0, &params);
    ecosystem.place_pellet(402.0, 301.0, &params);

    ecosystem.step(&params, DT, None, &mut rng);

    assert_eq!(ecosystem.pellets.len(), 1);
    assert_eq!(ecosystem.fish[0].meals, 1);
}

#[test]
fn test_placed_pellet_wraps_into_box() {
    let params = create_test_params();
    let mut ecosystem = Ecosystem::empty();

    ecosystem.place_pellet(-5.0, 605.0, &params);

    let pos = &ecosystem.pellets[0].pos;
    assert_eq!(pos[0], 795.0);
    assert_eq!(pos[1], 5.0);
}

#[test]
fn test_pellet_cap_never_exceeded() {
    let params = Params {
        max_pellets: 10,
        pellet_spawn_rate: 1.0,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(8);
    let mut ecosystem = Ecosystem::empty();

    for i in 0..100 {
        ecosystem.step(&params, DT, Some((i as f32, 10.0)), &mut rng);
        assert!(ecosystem.pellets.len() <= params.max_pellets);
    }
    assert_eq!(ecosystem.pellets.len(), params.max_pellets);
    assert!(!ecosystem.place_pellet(1.0, 1.0, &params));
}

#[test]
fn test_colocated_pair_breeds_once() {
    let params = Params {
        breeding_chance: 1.0,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(10);
    let mut ecosystem = stacked_fish(2, &params, &mut rng);

    ecosystem.step(&params, DT, None, &mut rng);

    assert_eq!(ecosystem.fish.len(), 3);
    assert_eq!(ecosystem.counters.births, 1);
    for parent in &ecosystem.fish[..2] {
        assert_eq!(parent.breeding_cooldown, params.breeding_cooldown);
        assert_eq!(parent.children, 1);
    }

    let child = &ecosystem.fish[2];
    assert_eq!(child.id, 2);
    assert_eq!(child.generation, 1);
    assert_eq!(child.lifetime, params.max_lifetime);
    assert_eq!(ecosystem.event_log.events()[0].kind, EventKind::Birth);

    // both parents are on cooldown now
    ecosystem.step(&params, DT, None, &mut rng);
    assert_eq!(ecosystem.counters.births, 1);
}

#[test]
fn test_parent_breeds_once_per_frame() {
    let params = Params {
        breeding_chance: 1.0,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(11);
    let mut ecosystem = stacked_fish(3, &params, &mut rng);

    ecosystem.step(&params, DT, None, &mut rng);

    // the first pair breeds; both its members are then on cooldown
    assert_eq!(ecosystem.fish.len(), 4);
    assert_eq!(ecosystem.fish[2].children, 0);
}

#[test]
fn test_no_breeding_when_disabled() {
    let params = Params {
        breeding_chance: 1.0,
        enable_breeding: false,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(12);
    let mut ecosystem = stacked_fish(2, &params, &mut rng);

    ecosystem.step(&params, DT, None, &mut rng);

    assert_eq!(ecosystem.fish.len(), 2);
}

#[test]
fn test_no_breeding_without_recent_meal() {
    let params = Params {
        breeding_chance: 1.0,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(13);
    let mut ecosystem = stacked_fish(2, &params, &mut rng);
    ecosystem.time = params.breeding_window + 1.0;

    ecosystem.step(&params, DT, None, &mut rng);

    assert_eq!(ecosystem.fish.len(), 2);
}

#[test]
fn test_dead_fish_removed_on_expiry_frame() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(14);
    let mut ecosystem = stacked_fish(1, &params, &mut rng);
    ecosystem.fish[0].lifetime = 0.05;

    ecosystem.step(&params, 0.02, None, &mut rng);
    assert_eq!(ecosystem.fish.len(), 1);
    ecosystem.step(&params, 0.02, None, &mut rng);
    assert_eq!(ecosystem.fish.len(), 1);

    let stats = ecosystem.step(&params, 0.02, None, &mut rng);
    assert!(ecosystem.fish.is_empty());
    assert!(stats.is_none());
    assert_eq!(ecosystem.counters.deaths, 1);
}

#[test]
fn test_extinction_logged() {
    let params = Params {
        enable_breeding: false,
        ..create_test_params()
    };
    let mut rng = SmallRng::seed_from_u64(15);
    let mut ecosystem = stacked_fish(2, &params, &mut rng);
    for fish in &mut ecosystem.fish {
        fish.lifetime = 0.01;
    }

    assert!(ecosystem.step(&params, DT, None, &mut rng).is_none());

    let events = ecosystem.event_log.events();
    assert_eq!(events[0].kind, EventKind::Extinction);
    assert_eq!(events.iter().filter(|e| e.kind == EventKind::Death).count(), 2);

    // an empty tank keeps running
    assert!(ecosystem.step(&params, DT, None, &mut rng).is_none());
    assert_eq!(ecosystem.counters.frames, 2);
}

#[test]
fn test_stats_match_population() {
    let params = create_test_params();
    let mut rng = SmallRng::seed_from_u64(16);
    let mut ecosystem = Ecosystem::new(&params, &mut rng);

    let stats = ecosystem.step(&params, DT, None, &mut rng).unwrap();

    assert_eq!(stats.count, ecosystem.fish.len());
    assert!(stats.speed.min <= stats.speed.avg && stats.speed.avg <= stats.speed.max);
    assert!(
        stats.detection_range.min <= stats.detection_range.avg
            && stats.detection_range.avg <= stats.detection_range.max
    );
    let fastest = ecosystem.fish.iter().map(|f| f.speed).fold(0.0, f32::max);
    assert_eq!(stats.speed.max, fastest);
}

#[test]
fn test_long_run_invariants() {
    let params = Params {
        n_fish: 40,
        breeding_chance: 0.5,
        pellet_spawn_rate: 0.8,
        ..Params::default()
    };
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut ecosystem = Ecosystem::new(&params, &mut rng);
    let mut seen_ids = HashSet::new();

    for _ in 0..600 {
        ecosystem.step(&params, DT, None, &mut rng);

        assert!(ecosystem.pellets.len() <= params.max_pellets);
        for fish in &ecosystem.fish {
            assert!(fish.is_alive());
            assert!(fish.pos[0] >= 0.0 && fish.pos[0] < params.box_width);
            assert!(fish.pos[1] >= 0.0 && fish.pos[1] < params.box_height);
            assert!(fish.speed >= params.min_speed && fish.speed <= params.max_speed);
            assert!(
                fish.detection_range >= params.min_detection_range
                    && fish.detection_range <= params.max_detection_range
            );
            seen_ids.insert(fish.id);
        }
    }

    assert!(seen_ids.iter().all(|&id| id < ecosystem.next_id));
    assert_eq!(
        ecosystem.counters.births as usize + params.n_fish,
        ecosystem.next_id
    );
    assert_eq!(
        ecosystem.fish.len() as u64,
        params.n_fish as u64 + ecosystem.counters.births - ecosystem.counters.deaths
    );
}

#[test]
fn test_same_seed_same_run() {
    let params = create_test_params();

    let run = |seed: u64| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ecosystem = Ecosystem::new(&params, &mut rng);
        for _ in 0..120 {
            ecosystem.step(&params, DT, None, &mut rng);
        }
        ecosystem
    };

    let a = run(99);
    let b = run(99);
    assert_eq!(a.fish.len(), b.fish.len());
    assert_eq!(a.pellets.len(), b.pellets.len());
    for (fa, fb) in a.fish.iter().zip(&b.fish) {
        assert_eq!(fa.id, fb.id);
        assert_eq!(fa.pos, fb.pos);
        assert_eq!(fa.rot, fb.rot);
    }
}
