//! Presentation of finished frames.

use std::path::Path;

use image::RgbaImage;

use crate::{ColorBuffer, RenderError, RenderResult};

/// Receives each completed frame.
///
/// Window hosts copy the pixels to their surface here; offline hosts keep or
/// write out the image.
pub trait Display {
    fn present(&mut self, frame: &ColorBuffer) -> RenderResult<()>;
}

/// Keeps the most recent frame as an RGBA image.
#[derive(Debug, Default)]
pub struct ImageDisplay {
    image: Option<RgbaImage>,
    frames: usize,
}

impl ImageDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last presented frame, if any.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Write the last presented frame to `path`; the format follows the
    /// file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let image = self.image.as_ref().ok_or(RenderError::NoFrame)?;
        image.save(path.as_ref())?;
        log::info!(
            "Saved {}x{} frame to {}",
            image.width(),
            image.height(),
            path.as_ref().display()
        );
        Ok(())
    }
}

impl Display for ImageDisplay {
    fn present(&mut self, frame: &ColorBuffer) -> RenderResult<()> {
        self.image = Some(frame.to_image());
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Color;

    #[test]
    fn test_present_keeps_latest_frame() {
        let mut display = ImageDisplay::new();
        assert!(display.image().is_none());

        let mut frame = ColorBuffer::new(3, 2, Color::BLACK);
        frame.set(2, 1, Color::RED).unwrap();
        display.present(&frame).unwrap();

        let image = display.image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(display.frames(), 1);
    }

    #[test]
    fn test_save_without_frame_fails() {
        let display = ImageDisplay::new();
        let result = display.save(std::env::temp_dir().join("prism_never_written.png"));
        assert!(matches!(result, Err(RenderError::NoFrame)));
    }
}
