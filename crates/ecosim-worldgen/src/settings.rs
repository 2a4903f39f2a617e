//! Mapping from the persisted config onto terrain parameters.

use ecosim_config::Config;
use ecosim_terrain::{BoundaryConfig, ClassifierParams, MergeTolerance, WorldParams};

pub fn world_params(config: &Config) -> WorldParams {
    let world = &config.world;
    let generation = &config.generation;
    WorldParams {
        seed: world.seed,
        world_width: world.world_width,
        world_height: world.world_height,
        cell_size: world.cell_size,
        classifier: ClassifierParams {
            octaves: generation.octaves,
            elevation_frequency: generation.elevation_frequency,
            elevation_offset: generation.elevation_offset,
            moisture_frequency: generation.moisture_frequency,
            moisture_offset: generation.moisture_offset,
            temperature_frequency: generation.temperature_frequency,
            temperature_offset: generation.temperature_offset,
            island_frequency: generation.island_frequency,
        },
    }
}

pub fn boundary_config(config: &Config) -> BoundaryConfig {
    BoundaryConfig {
        thickness: config.boundary.thickness,
        tolerance: MergeTolerance {
            alignment: config.boundary.alignment_tolerance,
            gap: config.boundary.gap_tolerance,
        },
    }
}
