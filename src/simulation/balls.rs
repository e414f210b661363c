//! Bouncing balls demo.
//!
//! Balls move at constant velocity inside a walled box. They bounce off the
//! walls and, when two overlap, are pushed apart and swap velocities, which
//! is an elastic collision for equal masses.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A circle with constant velocity between collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position.
    pub pos: Array1<f32>,
    /// Displacement per frame.
    pub vel: Array1<f32>,
    /// Radius.
    pub radius: f32,
}

impl Ball {
    /// Creates a ball from its position, velocity and radius.
    pub fn new(pos: [f32; 2], vel: [f32; 2], radius: f32) -> Self {
        Self {
            pos: Array1::from_vec(pos.to_vec()),
            vel: Array1::from_vec(vel.to_vec()),
            radius,
        }
    }

    /// Creates a ball anywhere in the box with integer-valued position,
    /// velocity components in `[-10, 10]` and radius in `[10, 20]`.
    pub fn new_random<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        Self::new(
            [
                rng.random_range(0..=width as i32) as f32,
                rng.random_range(0..=height as i32) as f32,
            ],
            [
                rng.random_range(-10..=10) as f32,
                rng.random_range(-10..=10) as f32,
            ],
            rng.random_range(10..=20) as f32,
        )
    }

    /// Moves the ball by its velocity.
    pub fn advance(&mut self) {
        self.pos += &self.vel;
    }

    /// Reflects the velocity off any wall the ball touches and pushes it back inside.
    pub fn bounce(&mut self, width: f32, height: f32) {
        for (axis, extent) in [(0, width), (1, height)] {
            if self.pos[axis] - self.radius <= 0.0 || self.pos[axis] + self.radius >= extent {
                self.vel[axis] = -self.vel[axis];
                // max after min: a ball wider than the box ends up at `radius`
                self.pos[axis] = self.pos[axis].min(extent - self.radius).max(self.radius);
            }
        }
    }

    /// Checks whether two balls overlap.
    pub fn overlaps(&self, other: &Ball) -> bool {
        let d = &self.pos - &other.pos;
        d.dot(&d).sqrt() < self.radius + other.radius
    }
}

/// Separates two overlapping balls and swaps their velocities.
///
/// Each ball is moved by the full overlap along the line between centers.
/// Coincident centers give no separation direction; only the velocities swap.
pub fn collide(a: &mut Ball, b: &mut Ball) {
    let d = &a.pos - &b.pos;
    let distance = d.dot(&d).sqrt();
    let overlap = a.radius + b.radius - distance;
    if overlap <= 0.0 {
        return;
    }

    if distance > 0.0 {
        let push = d * (overlap / distance);
        a.pos += &push;
        b.pos -= &push;
    }
    std::mem::swap(&mut a.vel, &mut b.vel);
}

/// Resolves collisions between every unordered pair of balls, in index order.
pub fn check_collisions(balls: &mut [Ball]) {
    let n = balls.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = balls.split_at_mut(j);
            collide(&mut head[i], &mut tail[0]);
        }
    }
}

/// A walled box full of balls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallPit {
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
    /// All balls.
    pub balls: Vec<Ball>,
}

impl BallPit {
    /// Creates a box with `count` random balls.
    pub fn new_random<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        count: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            width,
            height,
            balls: (0..count)
                .map(|_| Ball::new_random(width, height, rng))
                .collect(),
        }
    }

    /// Runs one frame: resolve collisions, then move and bounce every ball.
    pub fn step(&mut self) {
        check_collisions(&mut self.balls);
        for ball in &mut self.balls {
            ball.advance();
            ball.bounce(self.width, self.height);
        }
    }
}
