//! Decoded sprite images

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use super::{Color, RenderError};

/// An RGBA image shared between draws
#[derive(Debug, Clone)]
pub struct Texture {
    name: String,
    image: Arc<RgbaImage>,
}

impl Texture {
    pub fn from_image(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
        }
    }

    /// Decode a PNG (or any format the `image` crate was built with)
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let image = image::open(path)
            .map_err(|source| RenderError::Asset {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(path.display().to_string(), image))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    /// Pixel at (x, y), `None` outside the image
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x as u32, y as u32).0;
        Some(Color { r, g, b, a })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_bounds() {
        let mut image = RgbaImage::new(2, 3);
        image.put_pixel(1, 2, image::Rgba([10, 20, 30, 255]));
        let tex = Texture::from_image("t", image);

        assert_eq!((tex.width(), tex.height()), (2, 3));
        assert_eq!(tex.pixel(1, 2), Some(Color::rgb(10, 20, 30)));
        assert_eq!(tex.pixel(2, 0), None);
        assert_eq!(tex.pixel(0, -1), None);
    }

    #[test]
    fn test_missing_file_is_asset_error() {
        let err = Texture::load(Path::new("no/such/sprite.png")).unwrap_err();
        assert!(matches!(err, RenderError::Asset { .. }));
        assert!(err.to_string().contains("sprite.png"));
    }
}
