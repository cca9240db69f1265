//! Color output and the z-buffered frame.

use image::{Rgba, RgbaImage};
use prism_core::Color;

use crate::{DepthBuffer, RenderError, RenderResult};

/// Row-major color raster with its origin at the top-left corner.
#[derive(Debug, Clone)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ColorBuffer {
    /// Create a buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> RenderResult<Color> {
        let index = self.index(x, y)?;
        Ok(self.pixels[index])
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> RenderResult<()> {
        let index = self.index(x, y)?;
        self.pixels[index] = color;
        Ok(())
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }

    /// Copy into an `image` crate buffer.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixels[y as usize * self.width as usize + x as usize];
            Rgba(color.to_rgba())
        })
    }

    fn index(&self, x: u32, y: u32) -> RenderResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(RenderError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

/// Paired color and depth buffers implementing the z-buffer write rule.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color: ColorBuffer,
    depth: DepthBuffer,
    background: Color,
}

impl FrameBuffer {
    /// Create a cleared frame.
    pub fn new(width: u32, height: u32, background: Color, far_depth: f64) -> Self {
        Self {
            color: ColorBuffer::new(width, height, background),
            depth: DepthBuffer::new(width, height, far_depth),
            background,
        }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn color(&self) -> &ColorBuffer {
        &self.color
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Reset color to the background and depth to the far sentinel.
    pub fn clear(&mut self) {
        self.color.clear(self.background);
        self.depth.clear();
    }

    /// Write `color` at `(x, y)` iff `z` is strictly nearer than the stored
    /// depth, updating the stored depth on success. Returns whether the
    /// fragment was written.
    pub fn set_element(&mut self, x: u32, y: u32, z: f64, color: Color) -> RenderResult<bool> {
        if !self.depth.test_and_set(x, y, z)? {
            return Ok(false);
        }
        self.color.set(x, y, color)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearer_wins_in_either_order() {
        let mut frame = FrameBuffer::new(10, 10, Color::BLACK, 1.0);
        frame.set_element(3, 3, 0.2, Color::RED).unwrap();
        frame.set_element(3, 3, 0.6, Color::BLUE).unwrap();
        assert_eq!(frame.color().get(3, 3).unwrap(), Color::RED);

        frame.clear();
        frame.set_element(3, 3, 0.6, Color::BLUE).unwrap();
        frame.set_element(3, 3, 0.2, Color::RED).unwrap();
        assert_eq!(frame.color().get(3, 3).unwrap(), Color::RED);
    }

    #[test]
    fn test_depth_updated_on_write() {
        // Three overlapping writes: the middle one must not win over the first
        let mut frame = FrameBuffer::new(1, 1, Color::BLACK, 1.0);
        assert!(frame.set_element(0, 0, 0.5, Color::RED).unwrap());
        assert!(!frame.set_element(0, 0, 0.7, Color::GREEN).unwrap());
        assert!(frame.set_element(0, 0, 0.3, Color::BLUE).unwrap());
        assert!(!frame.set_element(0, 0, 0.4, Color::WHITE).unwrap());

        assert_eq!(frame.color().get(0, 0).unwrap(), Color::BLUE);
        assert_eq!(frame.depth().get(0, 0).unwrap(), 0.3);
    }

    #[test]
    fn test_out_of_bounds_write() {
        let mut frame = FrameBuffer::new(10, 5, Color::BLACK, 1.0);
        let err = frame.set_element(2, 5, 0.1, Color::RED).unwrap_err();
        assert!(matches!(
            err,
            RenderError::OutOfBounds { x: 2, y: 5, width: 10, height: 5 }
        ));
        assert_eq!(err.to_string(), "Pixel (2, 5) is outside the 10x5 buffer");
    }

    #[test]
    fn test_clear_restores_background() {
        let mut frame = FrameBuffer::new(2, 2, Color::WHITE, 1.0);
        frame.set_element(1, 0, 0.5, Color::RED).unwrap();
        frame.clear();

        assert_eq!(frame.color().get(1, 0).unwrap(), Color::WHITE);
        assert_eq!(frame.depth().get(1, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_rgba_export() {
        let mut buffer = ColorBuffer::new(2, 1, Color::BLACK);
        buffer.set(1, 0, Color::new(1, 2, 3)).unwrap();

        assert_eq!(buffer.to_rgba(), vec![0, 0, 0, 255, 1, 2, 3, 255]);

        let image = buffer.to_image();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [1, 2, 3, 255]);
    }
}
