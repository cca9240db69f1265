//! Per-pixel depth storage.

use crate::{RenderError, RenderResult};

/// Depth a cleared buffer holds: the far end of the `[0, 1]` device depth range.
pub const DEFAULT_FAR_DEPTH: f64 = 1.0;

/// Double-precision depth buffer. Smaller values are nearer.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    far: f64,
    depths: Vec<f64>,
}

impl DepthBuffer {
    /// Create a buffer cleared to `far`.
    pub fn new(width: u32, height: u32, far: f64) -> Self {
        Self {
            width,
            height,
            far,
            depths: vec![far; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The clear value.
    pub fn far(&self) -> f64 {
        self.far
    }

    /// Reset every pixel to the far sentinel.
    pub fn clear(&mut self) {
        self.depths.fill(self.far);
    }

    /// Stored depth at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> RenderResult<f64> {
        let index = self.index(x, y)?;
        Ok(self.depths[index])
    }

    /// Store `z` at `(x, y)` if it is strictly nearer than the current value.
    /// Returns whether the depth was replaced.
    pub fn test_and_set(&mut self, x: u32, y: u32, z: f64) -> RenderResult<bool> {
        let index = self.index(x, y)?;
        if z < self.depths[index] {
            self.depths[index] = z;
            Ok(true)
        } else {
            Ok(false)
        }
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
