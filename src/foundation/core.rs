use crate::foundation::error::{BorealisError, BorealisResult};

pub use kurbo::{Point, Rect, Vec2};

/// A position or direction in the scene's 3D space.
///
/// The camera looks down -z; kurbo stays the 2D workhorse everywhere a
/// screen-space or sprite-local quantity is involved.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    /// Depth component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> BorealisResult<Self> {
        if width == 0 || height == 0 {
            return Err(BorealisError::validation(
                "Viewport dimensions must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}
