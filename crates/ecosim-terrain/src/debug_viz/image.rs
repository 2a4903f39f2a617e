//! A 2D debug image stored as a flat array of RGBA pixels.

use hashbrown::HashSet;

/// Row-major RGBA8 raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    pub width: u32,
    pub height: u32,
    /// Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Set a single pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
    }

    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = self.offset(x, y);
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Fill the pixel rectangle starting at `(x, y)`, clipped to the image.
    ///
    /// Negative origins and sizes reaching past the edge are allowed; the
    /// part outside the image is dropped.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, rgba: (u8, u8, u8, u8)) {
        let x0 = x.clamp(0, self.width as i64) as u32;
        let y0 = y.clamp(0, self.height as i64) as u32;
        let x1 = x.saturating_add(width).clamp(0, self.width as i64) as u32;
        let y1 = y.saturating_add(height).clamp(0, self.height as i64) as u32;
        let (r, g, b, a) = rgba;
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, r, g, b, a);
            }
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Number of distinct RGB colors, ignoring alpha.
    pub fn unique_color_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|p| (p[0], p[1], p[2]))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_buffer_length() {
        let image = DebugImage::new(256, 128);
        assert_eq!(image.dimensions(), (256, 128));
        assert_eq!(image.pixel_count(), 256 * 128);
        assert_eq!(image.pixels.len(), 256 * 128 * 4);
    }

    #[test]
    fn test_set_pixel_layout() {
        let mut image = DebugImage::new(10, 10);
        image.set_pixel(3, 5, 255, 128, 64, 255);
        let idx = (5 * 10 + 3) * 4;
        assert_eq!(&image.pixels[idx..idx + 4], &[255, 128, 64, 255]);
        assert_eq!(image.get_pixel(3, 5), (255, 128, 64, 255));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut image = DebugImage::new(4, 4);
        image.fill_rect(-2, 2, 4, 10, (9, 9, 9, 255));
        // Only columns 0..2 of rows 2..4 are inside.
        assert_eq!(image.get_pixel(0, 2), (9, 9, 9, 255));
        assert_eq!(image.get_pixel(1, 3), (9, 9, 9, 255));
        assert_eq!(image.get_pixel(2, 2), (0, 0, 0, 0));
        assert_eq!(image.get_pixel(0, 1), (0, 0, 0, 0));

        let before = image.clone();
        image.fill_rect(10, 10, 5, 5, (1, 2, 3, 4));
        image.fill_rect(1, 1, 0, 3, (1, 2, 3, 4));
        assert_eq!(image, before);
    }

    #[test]
    fn test_unique_color_count() {
        let mut image = DebugImage::new(4, 1);
        image.set_pixel(0, 0, 255, 0, 0, 255);
        image.set_pixel(1, 0, 0, 255, 0, 255);
        image.set_pixel(2, 0, 255, 0, 0, 10);
        image.set_pixel(3, 0, 0, 0, 255, 255);
        assert_eq!(image.unique_color_count(), 3);
    }
}
