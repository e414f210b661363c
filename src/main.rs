use anyhow::{Context, Result};
use ::rand::SeedableRng;
use ::rand::rngs::SmallRng;
use clap::Parser;
use macroquad::prelude::*;
use shoal::simulation::ecosystem::Ecosystem;
use shoal::simulation::params::Params;
use std::path::PathBuf;
use tracing::{error, info, warn};

mod graphics;
mod ui;

/// Fish and pellets foraging simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with simulation parameters (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
    /// Snapshot to resume from
    #[arg(long)]
    load: Option<PathBuf>,
    /// Write the effective parameters to this file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Fish".to_owned(),
        window_width: 800,
        window_height: 600,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        error!("{e:#}");
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let params = match &args.config {
        Some(path) => Params::load_from_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => Params::default(),
    };

    if let Some(path) = &args.dump_config {
        params
            .save_to_file(path)
            .with_context(|| format!("writing parameters to {}", path.display()))?;
        info!(path = %path.display(), "parameters written");
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(::rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);
    info!(seed, "starting fish simulation");

    let mut ecosystem = match &args.load {
        Some(path) => Ecosystem::load_from_file(path)
            .with_context(|| format!("loading snapshot from {}", path.display()))?,
        None => Ecosystem::new(&params, &mut rng),
    };

    request_new_screen_size(params.box_width, params.box_height);

    let mut ui_state = ui::UIState::new();
    let mut paused = false;
    let mut stats = ecosystem.stats();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }
        if is_key_pressed(KeyCode::S) {
            let path = format!("shoal_{}.json", chrono::Local::now().format("%Y%m%d_%H%M%S"));
            match ecosystem.save_to_file(&path) {
                Ok(()) => {
                    info!(%path, "snapshot saved");
                    ui_state.status_message = Some(format!("Saved {path}"));
                }
                Err(e) => {
                    warn!(%path, "snapshot failed: {e}");
                    ui_state.status_message = Some(format!("Save failed: {e}"));
                }
            }
        }

        let placement = if is_mouse_button_pressed(MouseButton::Left) && !ui_state.pointer_over_ui
        {
            let (x, y) = mouse_position();
            Some(graphics::screen_to_world(x, y, &params))
        } else {
            None
        };

        if !paused {
            stats = ecosystem.step(&params, get_frame_time(), placement, &mut rng);
            ui_state.update_history(&ecosystem, stats.as_ref());
        } else if let Some((x, y)) = placement {
            ecosystem.place_pellet(x, y, &params);
        }

        clear_background(BLACK);
        graphics::draw_pellets(&ecosystem, &params);
        graphics::draw_fish(&ecosystem, &params);
        graphics::draw_stats_text(stats.as_ref(), paused);

        ui::draw_ui(&mut ui_state, &ecosystem, &params);
        ui::process_egui();

        next_frame().await;
    }

    info!(
        time = ecosystem.time,
        births = ecosystem.counters.births,
        deaths = ecosystem.counters.deaths,
        "simulation finished"
    );
    Ok(())
}
