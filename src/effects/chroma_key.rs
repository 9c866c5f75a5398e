use rayon::prelude::*;

use crate::foundation::error::{BorealisError, BorealisResult};

/// Green-screen classification thresholds.
///
/// These are footage-specific tuning, not law: the defaults match the stock
/// green-screen clip the backdrop ships with (green channel above 100 and at
/// least 1.5x both other channels).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChromaKeyParams {
    /// Minimum green channel value (exclusive) for a background pixel.
    #[serde(default = "default_min_green")]
    pub min_green: u8,
    /// How strongly green must dominate red and blue.
    #[serde(default = "default_dominance")]
    pub dominance: f32,
}

fn default_min_green() -> u8 {
    100
}

fn default_dominance() -> f32 {
    1.5
}

impl Default for ChromaKeyParams {
    fn default() -> Self {
        Self {
            min_green: default_min_green(),
            dominance: default_dominance(),
        }
    }
}

impl ChromaKeyParams {
    /// Validate threshold values.
    pub fn validate(&self) -> BorealisResult<()> {
        if !self.dominance.is_finite() || self.dominance <= 0.0 {
            return Err(BorealisError::validation(
                "chroma key dominance must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Whether an `(r, g, b)` sample reads as green-screen background.
pub fn is_background(r: u8, g: u8, b: u8, params: ChromaKeyParams) -> bool {
    let gf = f32::from(g);
    g > params.min_green
        && gf > params.dominance * f32::from(r)
        && gf > params.dominance * f32::from(b)
}

/// Zero the alpha of every background-classified pixel, in place.
///
/// The key is a hard cutoff: no temporal smoothing and no edge
/// anti-aliasing, so keyed footage can fringe around the subject. Foreground
/// pixels are left untouched, alpha included. Classification depends only on
/// `(r, g, b)`, which makes the transform idempotent per pixel.
pub fn key_out_in_place(rgba: &mut [u8], params: ChromaKeyParams) -> BorealisResult<()> {
    if !rgba.len().is_multiple_of(4) {
        return Err(BorealisError::validation(
            "key_out_in_place expects a tightly packed rgba8 buffer",
        ));
    }
    rgba.par_chunks_exact_mut(4).for_each(|px| {
        if is_background(px[0], px[1], px[2], params) {
            px[3] = 0;
        }
    });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chroma_key.rs"]
mod tests;
