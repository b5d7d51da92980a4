//! Canvas that records calls instead of drawing

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::{Canvas, Color, Flip, Rect, RenderError, Texture, font};

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    Present,
    Image {
        texture: String,
        src: Option<Rect>,
        dest: Rect,
        flip: Flip,
    },
}

/// Headless canvas for tests and dry runs
///
/// Textures are placeholders named after their path; nothing touches disk.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
    missing: HashSet<PathBuf>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `load_texture` fail for `path` as if the file did not exist
    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls since the most recent `Clear` (the frame being built or last shown)
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn presents(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Present).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }

    fn draw_image(&mut self, texture: &Texture, src: Option<Rect>, dest: Rect, flip: Flip) {
        self.calls.push(DrawCall::Image {
            texture: texture.name().to_string(),
            src,
            dest,
            flip,
        });
    }

    fn load_texture(&mut self, path: &Path) -> Result<Texture, RenderError> {
        if self.missing.contains(path) {
            return Err(RenderError::Asset {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(io::Error::from(io::ErrorKind::NotFound)),
            });
        }
        Ok(Texture::from_image(
            path.display().to_string(),
            RgbaImage::new(1, 1),
        ))
    }

    fn render_text(&mut self, text: &str, color: Color) -> Result<Texture, RenderError> {
        Ok(Texture::from_image(
            format!("text:{}", text),
            font::rasterize(text, color),
        ))
    }
}
