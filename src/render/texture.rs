use std::path::Path;

use anyhow::Context;

use crate::foundation::error::BorealisResult;

/// A small straight-alpha RGBA8 billboard texture.
#[derive(Clone, Debug)]
pub struct SpriteTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl SpriteTexture {
    /// Procedural soft disc: white, alpha 1.0 at the center easing through
    /// 0.8 at half radius down to 0 at the rim.
    pub fn radial_falloff(size: u32) -> Self {
        let size = size.max(2);
        let mut data = vec![0u8; (size as usize) * (size as usize) * 4];
        let center = (f64::from(size) - 1.0) * 0.5;
        let radius = f64::from(size) * 0.5;

        for y in 0..size {
            for x in 0..size {
                let dx = f64::from(x) - center;
                let dy = f64::from(y) - center;
                let r = (dx * dx + dy * dy).sqrt() / radius;
                let alpha = if r >= 1.0 {
                    0.0
                } else if r <= 0.5 {
                    1.0 - 0.2 * (r / 0.5)
                } else {
                    0.8 * (1.0 - (r - 0.5) / 0.5)
                };
                let i = ((y as usize) * (size as usize) + (x as usize)) * 4;
                data[i] = 255;
                data[i + 1] = 255;
                data[i + 2] = 255;
                data[i + 3] = (alpha * 255.0).round() as u8;
            }
        }

        Self {
            width: size,
            height: size,
            data,
        }
    }

    /// Decode a texture from an image file on disk.
    pub fn from_path(path: &Path) -> BorealisResult<Self> {
        let dyn_img = image::open(path)
            .with_context(|| format!("decode sprite texture '{}'", path.display()))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    /// Nearest sample at normalized `(u, v)`, clamped to the edge.
    pub fn sample_nearest(&self, u: f64, v: f64) -> [u8; 4] {
        let x = ((u * f64::from(self.width)) as i64).clamp(0, i64::from(self.width) - 1) as usize;
        let y = ((v * f64::from(self.height)) as i64).clamp(0, i64::from(self.height) - 1) as usize;
        let i = (y * (self.width as usize) + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}
