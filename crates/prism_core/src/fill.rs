//! Primitive fills.
//!
//! A fill answers one question: which color does pixel `(x, y)` get?
//! Constant colors and pattern providers both go through `PixelProvider`.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_rgb(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    pub const fn to_rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Convert to opaque RGBA bytes.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Anything that can color a pixel.
pub trait PixelProvider: fmt::Debug + Send + Sync {
    /// Color of the pixel at raster coordinates `(x, y)`.
    fn color_at(&self, x: u32, y: u32) -> Color;
}

impl PixelProvider for Color {
    fn color_at(&self, _x: u32, _y: u32) -> Color {
        *self
    }
}

/// Screen-space checkerboard of two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkerboard {
    pub even: Color,
    pub odd: Color,
    cell_size: u32,
}

impl Checkerboard {
    /// Create a checkerboard with square cells of `cell_size` pixels.
    /// A zero cell size is treated as one pixel.
    pub fn new(even: Color, odd: Color, cell_size: u32) -> Self {
        Self {
            even,
            odd,
            cell_size: cell_size.max(1),
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
}

impl PixelProvider for Checkerboard {
    fn color_at(&self, x: u32, y: u32) -> Color {
        if ((x / self.cell_size) + (y / self.cell_size)) % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

/// How a primitive is colored.
#[derive(Debug, Clone)]
pub enum Fill {
    /// One color everywhere.
    Solid(Color),
    /// Per-pixel color from a provider.
    Pattern(Arc<dyn PixelProvider>),
}

impl Fill {
    /// Constant-color fill.
    pub fn solid(color: Color) -> Self {
        Fill::Solid(color)
    }

    /// Checkerboard fill.
    pub fn checkerboard(even: Color, odd: Color, cell_size: u32) -> Self {
        Fill::Pattern(Arc::new(Checkerboard::new(even, odd, cell_size)))
    }

    /// Wrap any provider.
    pub fn pattern(provider: impl PixelProvider + 'static) -> Self {
        Fill::Pattern(Arc::new(provider))
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Solid(Color::WHITE)
    }
}

impl PixelProvider for Fill {
    fn color_at(&self, x: u32, y: u32) -> Color {
        match self {
            Fill::Solid(color) => *color,
            Fill::Pattern(provider) => provider.color_at(x, y),
        }
    }
}
