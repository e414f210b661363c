// macroquad's prelude exports its own `rand` module
use ::rand::rngs::SmallRng;
use ::rand::{Rng, SeedableRng};
use clap::Parser;
use macroquad::prelude::*;
use shoal::simulation::balls::BallPit;
use tracing::info;

const WIDTH: i32 = 800;
const HEIGHT: i32 = 600;

/// Bouncing balls with elastic collisions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of balls (random between 30 and 40 if omitted)
    #[arg(long)]
    balls: Option<usize>,
    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Balls".to_owned(),
        window_width: WIDTH,
        window_height: HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(::rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);
    let count = args.balls.unwrap_or_else(|| rng.random_range(30..=40));

    let mut pit = BallPit::new_random(WIDTH as f32, HEIGHT as f32, count, &mut rng);
    info!(seed, balls = count, "starting ball simulation");

    while !is_key_pressed(KeyCode::Escape) {
        pit.step();

        clear_background(BLACK);
        for ball in &pit.balls {
            draw_circle(ball.pos[0], ball.pos[1], ball.radius, WHITE);
        }

        next_frame().await;
    }
}
