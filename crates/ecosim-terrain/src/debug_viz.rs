//! Terrain debug visualization: 2D raster images of generated worlds.
//!
//! Provides [`DebugImage`] and renderers for the biome map, the
//! traversability map and the merged boundary overlay. The world generator
//! binary writes these out as PNGs for visual diagnosis.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    BLOCKED_COLOR, BOUNDARY_COLOR, OPEN_COLOR, biome_color, render_biome_map,
    render_boundary_overlay, render_traversability,
};
