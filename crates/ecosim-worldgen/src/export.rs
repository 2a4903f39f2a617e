//! PNG export of the debug images.

use std::path::{Path, PathBuf};

use ecosim_terrain::debug_viz::{
    DebugImage, render_biome_map, render_boundary_overlay, render_traversability,
};
use ecosim_terrain::{BiomeGenerator, MergedRectangle};

use crate::error::WorldgenError;

/// Encode `image` as an 8-bit RGBA PNG.
pub fn encode_png(image: &DebugImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut png_buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(
            std::io::Cursor::new(&mut png_buf),
            image.width,
            image.height,
        );
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.pixels)?;
        writer.finish()?;
    }
    Ok(png_buf)
}

fn write_png(path: PathBuf, image: &DebugImage) -> Result<PathBuf, WorldgenError> {
    let bytes = encode_png(image).map_err(|source| WorldgenError::Png {
        path: path.clone(),
        source,
    })?;
    match std::fs::write(&path, bytes) {
        Ok(()) => Ok(path),
        Err(source) => Err(WorldgenError::Io { path, source }),
    }
}

/// Write `biomes.png`, `traversability.png` and `boundaries.png` into `dir`.
///
/// Returns the written paths in that order.
pub fn export_debug_images(
    dir: &Path,
    world: &BiomeGenerator,
    boundaries: &[MergedRectangle],
    pixels_per_cell: u32,
) -> Result<Vec<PathBuf>, WorldgenError> {
    std::fs::create_dir_all(dir).map_err(|source| WorldgenError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let images = [
        ("biomes.png", render_biome_map(world.grid(), pixels_per_cell)?),
        (
            "traversability.png",
            render_traversability(world, pixels_per_cell)?,
        ),
        (
            "boundaries.png",
            render_boundary_overlay(world.grid(), boundaries, pixels_per_cell)?,
        ),
    ];

    let mut written = Vec::with_capacity(images.len());
    for (name, image) in &images {
        let path = write_png(dir.join(name), image)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "wrote debug image"
        );
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_terrain::{BoundaryConfig, TerrainError, extract_boundaries};

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_encode_preserves_pixels() {
        let mut image = DebugImage::new(3, 2);
        image.set_pixel(2, 1, 10, 20, 30, 255);
        let (info, pixels) = decode(&encode_png(&image).unwrap());
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(pixels, image.pixels);
    }

    #[test]
    fn test_export_writes_three_images() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("debug");
        let world = BiomeGenerator::new(1234, 2000.0, 1200.0).unwrap();
        let rects = extract_boundaries(world.grid(), &BoundaryConfig::default());

        let written = export_debug_images(&out, &world, &rects, 2).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["biomes.png", "traversability.png", "boundaries.png"]);

        for path in &written {
            let (info, _) = decode(&std::fs::read(path).unwrap());
            assert_eq!((info.width, info.height), (80, 48));
        }
    }

    #[test]
    fn test_export_rejects_oversized_images() {
        let dir = tempfile::tempdir().unwrap();
        let world = BiomeGenerator::new(1234, 2000.0, 1200.0).unwrap();

        let err = export_debug_images(dir.path(), &world, &[], u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            WorldgenError::Terrain(TerrainError::ImageTooLarge { .. })
        ));
        assert!(!dir.path().join("biomes.png").exists());
    }
}
