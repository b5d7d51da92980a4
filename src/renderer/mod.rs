//! Presentation adapter
//!
//! The scene draws through the [`Canvas`] trait using playfield coordinates.
//! `TerminalCanvas` rasterizes into a half-block pixel buffer; `RecordingCanvas`
//! keeps a log of calls for tests.

pub mod font;
pub mod recording;
pub mod terminal;
pub mod texture;

use std::fmt;
use std::path::{Path, PathBuf};

use glam::IVec2;

pub use recording::{DrawCall, RecordingCanvas};
pub use terminal::{TerminalCanvas, TerminalGuard};
pub use texture::Texture;

/// Axis-aligned rectangle in playfield (or texture) pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Mirroring applied when drawing a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Vertical,
}

/// Errors surfaced by a canvas
#[derive(Debug)]
pub enum RenderError {
    /// Writing the frame out failed
    Io(std::io::Error),
    /// A texture could not be loaded or decoded
    Asset {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "frame output failed: {}", e),
            RenderError::Asset { path, source } => {
                write!(f, "could not load {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::Asset { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

/// Drawing surface used by the scene
pub trait Canvas {
    /// Start a new frame
    fn clear(&mut self);

    /// Flush the frame to its output
    fn present(&mut self) -> Result<(), RenderError>;

    /// Draw `src` of `texture` (whole texture if `None`) scaled into `dest`
    fn draw_image(&mut self, texture: &Texture, src: Option<Rect>, dest: Rect, flip: Flip);

    fn load_texture(&mut self, path: &Path) -> Result<Texture, RenderError>;

    /// Rasterize a line of text into a texture
    fn render_text(&mut self, text: &str, color: Color) -> Result<Texture, RenderError>;
}
