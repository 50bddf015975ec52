//! Sprite loading
//!
//! Images are fetched once at startup. A failed fetch or decode aborts
//! startup; there is no retry and no fallback image.

use glam::Vec2;

use crate::error::{GameError, Result};

/// Player sprite served by the static server
pub const PLAYER_SPRITE: &str = "/disk/assets/bunny.png";

/// Decoded RGBA image
#[derive(Debug, Clone)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, top row first
    pub pixels: Vec<[u8; 4]>,
}

impl SpriteImage {
    /// Decode PNG bytes. `path` is only used for error reporting.
    pub fn decode(path: &str, bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|source| GameError::Decode {
                path: path.to_string(),
                source,
            })?
            .to_rgba8();

        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        log::debug!("Decoded {} ({}x{})", path, width, height);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Fetch raw bytes over HTTP
#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let asset_error = |reason: String| GameError::Asset {
        path: url.to_string(),
        reason,
    };

    let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| asset_error(format!("{:?}", e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| asset_error("not a Response".into()))?;

    if !response.ok() {
        return Err(asset_error(format!("HTTP {}", response.status())));
    }

    let buffer = response
        .array_buffer()
        .map_err(|e| asset_error(format!("{:?}", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| asset_error(format!("{:?}", e)))?;

    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch and decode a sprite
#[cfg(target_arch = "wasm32")]
pub async fn load_sprite(url: &str) -> Result<SpriteImage> {
    let bytes = fetch_bytes(url).await?;
    SpriteImage::decode(url, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bundled_bunny() {
        let bytes = include_bytes!("../media/assets/bunny.png");
        let sprite = SpriteImage::decode(PLAYER_SPRITE, bytes).unwrap();
        assert_eq!((sprite.width, sprite.height), (26, 37));
        assert_eq!(sprite.pixels.len(), 26 * 37);
        assert_eq!(sprite.size(), Vec2::new(26.0, 37.0));
        // Corners are transparent
        assert_eq!(sprite.pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_decode_round_trip() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let sprite = SpriteImage::decode("mem.png", &bytes).unwrap();
        assert_eq!(sprite.pixel(2, 1), [10, 20, 30, 255]);
        assert_eq!(sprite.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = SpriteImage::decode("bad.png", b"not an image").unwrap_err();
        assert!(matches!(err, GameError::Decode { .. }));
        assert!(err.to_string().contains("bad.png"));
    }
}
