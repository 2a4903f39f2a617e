//! Procedural world generation for the ecosystem simulation: seeded value
//! noise, biome classification, derived traversability/food maps, region
//! boundary extraction, and the lookups movement code runs against them.

mod async_generation;
mod collision;
mod error;
mod generator;
mod grid;
mod maps;
mod noise_field;
mod stats;

pub mod biome;
pub mod boundary;
pub mod debug_viz;

pub use async_generation::{AsyncWorldGenerator, GeneratedWorld, WorldRequest};
pub use biome::{
    BIOME_TABLE, BiomeAttributes, BiomeClassifier, BiomeLabel, ClassifierParams, ClimateSample,
    classify_cell, classify_climate,
};
pub use boundary::{
    BoundaryConfig, BoundarySegment, DEFAULT_BOUNDARY_THICKNESS, MergeTolerance, MergedRectangle,
    Orientation, extract_boundaries, extract_segments, merge_rectangles,
};
pub use collision::CollisionMap;
pub use error::TerrainError;
pub use generator::BiomeGenerator;
pub use grid::{BiomeGrid, DEFAULT_CELL_SIZE, MAX_CELLS, WorldParams};
pub use maps::DerivedMaps;
pub use noise_field::{DEFAULT_OCTAVES, FbmField, NoiseField, lattice_hash};
pub use stats::GridStats;
