use std::path::PathBuf;

use kurbo::Vec2;

use crate::{
    effects::chroma_key::ChromaKeyParams,
    foundation::core::Vec3,
    foundation::error::{BorealisError, BorealisResult},
};

/// A complete backdrop configuration.
///
/// A pure data model: build it programmatically, or load it from JSON via
/// [`BackdropConfig::from_json_str`]. Every field has a default matching the
/// stock scene, so `BackdropConfig::default()` is a valid, full backdrop.
/// Validation happens once, before the scene is built.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BackdropConfig {
    /// Number of static starfield points.
    #[serde(default = "default_star_count")]
    pub star_count: u32,
    /// Number of falling snow sprites.
    #[serde(default = "default_snow_count")]
    pub snow_count: u32,
    /// Perspective camera parameters.
    #[serde(default)]
    pub camera: CameraConfig,
    /// Frame clear color (straight RGBA8). Transparent by default so the
    /// host can layer the backdrop over its own page background.
    #[serde(default = "default_clear_rgba")]
    pub clear_rgba: [u8; 4],
    /// Looping video sprite; `None` disables the sprite entirely.
    #[serde(default)]
    pub video: Option<VideoConfig>,
    /// Optional image file decoded as the snow billboard texture. When
    /// absent a procedural radial-falloff disc is used.
    #[serde(default)]
    pub snow_texture: Option<PathBuf>,
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov_y_deg")]
    pub fov_y_deg: f64,
    /// Camera position in world space (looks down -z).
    #[serde(default = "default_camera_position")]
    pub position: Vec3,
    /// Near clip plane.
    #[serde(default = "default_near")]
    pub near: f64,
    /// Far clip plane.
    #[serde(default = "default_far")]
    pub far: f64,
}

/// The chroma-keyed looping video sprite.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VideoConfig {
    /// Path to the video file, probed and decoded through the system
    /// `ffprobe`/`ffmpeg` binaries (`media-ffmpeg` feature).
    pub path: PathBuf,
    /// Billboard size in world units.
    #[serde(default = "default_sprite_scale")]
    pub sprite_scale: Vec2,
    /// Starting position, off-screen right.
    #[serde(default = "default_sprite_position")]
    pub start_position: Vec3,
    /// Green-screen thresholds for this footage.
    #[serde(default)]
    pub chroma: ChromaKeyParams,
}

fn default_star_count() -> u32 {
    500
}

fn default_snow_count() -> u32 {
    200
}

fn default_clear_rgba() -> [u8; 4] {
    [0, 0, 0, 0]
}

fn default_fov_y_deg() -> f64 {
    75.0
}

fn default_camera_position() -> Vec3 {
    Vec3::new(0.0, 5.0, 20.0)
}

fn default_near() -> f64 {
    0.1
}

fn default_far() -> f64 {
    1000.0
}

fn default_sprite_scale() -> Vec2 {
    Vec2::new(10.0, 8.0)
}

fn default_sprite_position() -> Vec3 {
    Vec3::new(50.0, 16.0, 0.0)
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: default_fov_y_deg(),
            position: default_camera_position(),
            near: default_near(),
            far: default_far(),
        }
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            star_count: default_star_count(),
            snow_count: default_snow_count(),
            camera: CameraConfig::default(),
            clear_rgba: default_clear_rgba(),
            video: None,
            snow_texture: None,
        }
    }
}

impl VideoConfig {
    /// Build a video config for `path` with the stock sprite transform and
    /// chroma thresholds.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sprite_scale: default_sprite_scale(),
            start_position: default_sprite_position(),
            chroma: ChromaKeyParams::default(),
        }
    }
}

impl BackdropConfig {
    /// Deserialize a configuration from JSON.
    pub fn from_json_str(json: &str) -> BorealisResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BorealisError::serde(format!("config parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration as a whole.
    pub fn validate(&self) -> BorealisResult<()> {
        if self.star_count == 0 {
            return Err(BorealisError::validation("star_count must be > 0"));
        }
        if self.snow_count == 0 {
            return Err(BorealisError::validation("snow_count must be > 0"));
        }
        if !(self.camera.fov_y_deg > 0.0 && self.camera.fov_y_deg < 180.0) {
            return Err(BorealisError::validation(
                "camera fov_y_deg must be in (0, 180)",
            ));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(BorealisError::validation(
                "camera planes must satisfy 0 < near < far",
            ));
        }
        if let Some(video) = &self.video {
            if video.sprite_scale.x <= 0.0 || video.sprite_scale.y <= 0.0 {
                return Err(BorealisError::validation(
                    "video sprite_scale must be positive",
                ));
            }
            video.chroma.validate()?;
        }
        Ok(())
    }
}
