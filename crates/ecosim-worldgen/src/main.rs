//! Command-line world generator.
//!
//! Loads `config.ron`, applies CLI overrides, generates a biome world, logs
//! its statistics and boundary overlay size, and optionally exports debug PNGs.
//!
//! Run with: `cargo run -p ecosim-worldgen -- --seed 42 --output ./worldgen`

mod error;
mod export;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use ecosim_config::{CliArgs, Config, default_config_dir};
use ecosim_terrain::{BiomeGenerator, BiomeLabel, extract_boundaries};
use tracing::{error, info};

use crate::error::WorldgenError;

fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), WorldgenError> {
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .ok_or(WorldgenError::NoConfigDir)?;
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config, config_dir))
}

fn run(config: &Config) -> Result<(), WorldgenError> {
    let params = settings::world_params(config);
    info!(
        seed = params.seed,
        world_width = params.world_width,
        world_height = params.world_height,
        cell_size = params.cell_size,
        "Generating world"
    );

    let start = Instant::now();
    let world = BiomeGenerator::from_params(&params)?;
    let (width, height) = world.grid_dimensions();
    info!(
        "Generated {width}x{height} grid in {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let stats = world.stats();
    for label in BiomeLabel::ALL {
        info!(
            biome = %label,
            cells = stats.count(label),
            share = stats.count(label) as f64 / stats.total.max(1) as f64,
            "Biome coverage"
        );
    }
    info!(
        "Traversable: {:.1}% | dominant land biome: {}",
        stats.traversable_fraction() * 100.0,
        stats
            .dominant_land_biome()
            .map_or("none", BiomeLabel::name)
    );

    let boundaries = extract_boundaries(world.grid(), &settings::boundary_config(config));
    info!("Boundary overlay: {} rectangles", boundaries.len());

    if let Some(dir) = &config.debug.export_dir {
        let written =
            export::export_debug_images(dir, &world, &boundaries, config.debug.pixels_per_cell)?;
        for path in written {
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    let (config, config_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("ecosim-worldgen: {e}");
            std::process::exit(2);
        }
    };

    let log_dir = config_dir.join("logs");
    ecosim_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}
