//! Image previews for card tiles and overlays.
//!
//! Assets are decoded once into a small RGB thumbnail that the components
//! paint with half-block cells. A path that cannot be read or decoded is
//! shown as the "Imagen no disponible" placeholder instead.

use std::io;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const IMAGE_UNAVAILABLE: &str = "Imagen no disponible";

/// Longest side of a decoded preview, in pixels
pub const PREVIEW_MAX_SIDE: u32 = 64;

/// Background transparent pixels are blended onto (#252525).
const BACKDROP: [u8; 3] = [0x25, 0x25, 0x25];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB
    pub pixels: Vec<[u8; 3]>,
}

impl ImagePreview {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(BACKDROP)
    }

    /// Nearest-neighbour sample for a `cols` × `rows` pixel grid
    pub fn sample(&self, col: u32, row: u32, cols: u32, rows: u32) -> [u8; 3] {
        let x = col * self.width / cols.max(1);
        let y = row * self.height / rows.max(1);
        self.pixel(x, y)
    }

    /// Largest (cols, pixel rows) grid that fits `max_cols` × `max_rows`
    /// terminal cells while keeping the aspect ratio. One cell holds two
    /// pixel rows.
    pub fn fit(&self, max_cols: u16, max_rows: u16) -> (u16, u16) {
        if self.width == 0 || self.height == 0 || max_cols == 0 || max_rows == 0 {
            return (0, 0);
        }
        let max_px_rows = u32::from(max_rows) * 2;
        let by_width_rows = u32::from(max_cols) * self.height / self.width;
        if by_width_rows <= max_px_rows {
            (max_cols, by_width_rows.max(1) as u16)
        } else {
            let cols = max_px_rows * self.width / self.height;
            (cols.clamp(1, u32::from(max_cols)) as u16, max_px_rows as u16)
        }
    }
}

/// Load state of one image asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ImageStatus {
    Loading,
    Ready(ImagePreview),
    Unavailable(String),
}

#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("preview task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Decode image bytes into a thumbnail no larger than [`PREVIEW_MAX_SIDE`].
pub fn decode_preview(bytes: &[u8]) -> Result<ImagePreview, PreviewError> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    let thumb = if width > PREVIEW_MAX_SIDE || height > PREVIEW_MAX_SIDE {
        image.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE)
    } else {
        image
    };
    let rgba = thumb.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            [
                blend(r, BACKDROP[0], a),
                blend(g, BACKDROP[1], a),
                blend(b, BACKDROP[2], a),
            ]
        })
        .collect();
    Ok(ImagePreview {
        width,
        height,
        pixels,
    })
}

fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let alpha = u16::from(alpha);
    ((u16::from(fg) * alpha + u16::from(bg) * (255 - alpha)) / 255) as u8
}

/// Read an asset from disk and decode it off the async runtime.
pub async fn load_preview(path: &Path) -> Result<ImagePreview, PreviewError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| PreviewError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let preview = tokio::task::spawn_blocking(move || decode_preview(&bytes)).await??;
    tracing::debug!(
        path = %path.display(),
        width = preview.width,
        height = preview.height,
        "image preview decoded"
    );
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba(color));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_small_image_keeps_size() {
        let preview = decode_preview(&png(4, 2, [255, 0, 0, 255])).unwrap();
        assert_eq!((preview.width, preview.height), (4, 2));
        assert_eq!(preview.pixels.len(), 8);
        assert_eq!(preview.pixel(3, 1), [255, 0, 0]);
    }

    #[test]
    fn test_decode_large_image_is_downsampled() {
        let preview = decode_preview(&png(256, 128, [0, 0, 255, 255])).unwrap();
        assert_eq!(preview.width, PREVIEW_MAX_SIDE);
        assert!(preview.height <= PREVIEW_MAX_SIDE / 2 + 1);
    }

    #[test]
    fn test_transparent_pixels_use_backdrop() {
        let preview = decode_preview(&png(1, 1, [255, 255, 255, 0])).unwrap();
        assert_eq!(preview.pixel(0, 0), BACKDROP);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode_preview(b"not an image").unwrap_err();
        assert!(matches!(err, PreviewError::Decode(_)));
    }

    #[test]
    fn test_fit_keeps_aspect() {
        let preview = ImagePreview {
            width: 20,
            height: 40,
            pixels: vec![[0, 0, 0]; 800],
        };
        // 10 cols wide → 20 pixel rows = 10 cells, fits in 12.
        assert_eq!(preview.fit(10, 12), (10, 20));
        // Only 5 cells (10 pixel rows) available → 5 cols.
        assert_eq!(preview.fit(10, 5), (5, 10));
        assert_eq!(preview.fit(0, 5), (0, 0));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = load_preview(Path::new("no/such/image.png")).await.unwrap_err();
        assert!(matches!(err, PreviewError::Read { .. }));
    }
}
