//! Biome system: the closed label set, its static attribute table, and the
//! noise-driven classifier that assigns a label to every grid cell.

mod classifier;
mod label;

pub use classifier::{
    BiomeClassifier, ClassifierParams, ClimateSample, classify_cell, classify_climate,
};
pub use label::{BIOME_TABLE, BiomeAttributes, BiomeLabel};
