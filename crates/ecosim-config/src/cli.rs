//! Command-line arguments for the world generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Generate a biome world and report on it.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "ecosim-worldgen", about = "Procedural biome world generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// World width in world units.
    #[arg(long)]
    pub world_width: Option<f64>,

    /// World height in world units.
    #[arg(long)]
    pub world_height: Option<f64>,

    /// Grid cell edge length in world units.
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Boundary segment thickness in world units.
    #[arg(long)]
    pub boundary_thickness: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to write debug PNGs into.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Pixels per grid cell in exported images.
    #[arg(long)]
    pub pixels_per_cell: Option<u32>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(w) = args.world_width {
            self.world.world_width = w;
        }
        if let Some(h) = args.world_height {
            self.world.world_height = h;
        }
        if let Some(cs) = args.cell_size {
            self.world.cell_size = cs;
        }
        if let Some(t) = args.boundary_thickness {
            self.boundary.thickness = t;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.output {
            self.debug.export_dir = Some(dir.clone());
        }
        if let Some(ppc) = args.pixels_per_cell {
            self.debug.pixels_per_cell = ppc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(42),
            world_height: Some(900.0),
            output: Some(PathBuf::from("/tmp/worldgen")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.world_height, 900.0);
        assert_eq!(config.debug.export_dir, Some(PathBuf::from("/tmp/worldgen")));
        // Non-overridden fields retain defaults
        assert_eq!(config.world.world_width, 2000.0);
        assert_eq!(config.boundary.thickness, 8.0);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "ecosim-worldgen",
            "--seed",
            "7",
            "--cell-size",
            "25",
            "--boundary-thickness",
            "4.5",
            "--log-level",
            "debug",
            "--pixels-per-cell",
            "2",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.cell_size, Some(25.0));
        assert_eq!(args.boundary_thickness, Some(4.5));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.pixels_per_cell, Some(2));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(CliArgs::try_parse_from(["ecosim-worldgen", "--seed", "-3"]).is_err());
    }
}
