use kurbo::Vec2;

use crate::{
    composition::config::{BackdropConfig, CameraConfig},
    effects::aurora::AuroraShader,
    foundation::core::{Vec3, Viewport},
    foundation::error::BorealisResult,
    foundation::math::Rng64,
};

/// Perspective projection state.
///
/// The camera is axis-aligned and looks down -z; aspect is the only field
/// mutated after construction (viewport resizes).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    /// Width over height of the output surface.
    pub aspect: f64,
    /// Near clip plane.
    pub near: f64,
    /// Far clip plane.
    pub far: f64,
    /// Position in world space.
    pub position: Vec3,
}

/// Screen-space result of projecting a world point.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
    /// Horizontal pixel coordinate (0 at the left edge).
    pub x: f64,
    /// Vertical pixel coordinate (0 at the top edge).
    pub y: f64,
    /// Pixels covered by one world unit at the point's depth.
    pub px_per_unit: f64,
}

impl Camera {
    /// Build a camera from config for an output surface.
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            fov_y_deg: config.fov_y_deg,
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            position: config.position,
        }
    }

    /// Recompute the projection aspect ratio (viewport resize).
    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    /// Project a world point onto the output surface.
    ///
    /// Returns `None` when the point falls outside the near/far planes.
    /// Points projecting outside the surface bounds are still returned;
    /// rasterization clips.
    pub fn project(&self, p: Vec3, viewport: Viewport) -> Option<Projected> {
        let dx = p.x - self.position.x;
        let dy = p.y - self.position.y;
        let depth = self.position.z - p.z;
        if depth < self.near || depth > self.far {
            return None;
        }

        let f = 1.0 / (self.fov_y_deg.to_radians() * 0.5).tan();
        let ndc_x = (dx * f / self.aspect) / depth;
        let ndc_y = (dy * f) / depth;

        let w = f64::from(viewport.width);
        let h = f64::from(viewport.height);
        Some(Projected {
            x: (ndc_x * 0.5 + 0.5) * w,
            y: (1.0 - (ndc_y * 0.5 + 0.5)) * h,
            px_per_unit: f * h * 0.5 / depth,
        })
    }
}

/// Static point cloud behind everything else.
#[derive(Clone, Debug)]
pub struct Starfield {
    /// Star positions, fixed for the session.
    pub positions: Vec<Vec3>,
}

const STAR_SPREAD: f64 = 50.0;

impl Starfield {
    /// Scatter `count` stars uniformly through the scene volume.
    pub fn generate(count: u32, rng: &mut Rng64) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.next_range(-STAR_SPREAD, STAR_SPREAD),
                    rng.next_range(-STAR_SPREAD, STAR_SPREAD),
                    rng.next_range(-STAR_SPREAD, STAR_SPREAD),
                )
            })
            .collect();
        Self { positions }
    }
}

// Snow volume bounds. A flake that falls below `SNOW_KILL_Y` wraps back to
// `SNOW_RESPAWN_Y` with a fresh horizontal position.
const SNOW_KILL_Y: f64 = -10.0;
const SNOW_RESPAWN_Y: f64 = 20.0;
const SNOW_X_MIN: f64 = -30.0;
const SNOW_X_MAX: f64 = 30.0;
const SNOW_Z_MIN: f64 = -10.0;
const SNOW_Z_MAX: f64 = 10.0;
const SNOW_SPAWN_Y_MIN: f64 = 10.0;
const SNOW_SPAWN_Y_MAX: f64 = 30.0;

/// One falling billboard sprite.
///
/// Fall and drift speeds are drawn once at construction and never change;
/// only the position is animated.
#[derive(Clone, Copy, Debug)]
pub struct Snowflake {
    /// Current position.
    pub position: Vec3,
    /// Billboard size in world units.
    pub scale: f64,
    /// Billboard opacity in `[0, 1]`.
    pub opacity: f32,
    fall_speed: f64,
    drift_speed: f64,
}

impl Snowflake {
    fn spawn(rng: &mut Rng64) -> Self {
        Self {
            position: Vec3::new(
                rng.next_range(SNOW_X_MIN, SNOW_X_MAX),
                rng.next_range(SNOW_SPAWN_Y_MIN, SNOW_SPAWN_Y_MAX),
                rng.next_range(SNOW_Z_MIN, SNOW_Z_MAX),
            ),
            scale: rng.next_range(0.2, 0.8),
            opacity: rng.next_range(0.4, 1.0) as f32,
            fall_speed: rng.next_range(0.08, 0.15),
            drift_speed: rng.next_range(-0.02, 0.02),
        }
    }

    /// Vertical units lost per tick.
    pub fn fall_speed(&self) -> f64 {
        self.fall_speed
    }

    /// Horizontal units gained per tick.
    pub fn drift_speed(&self) -> f64 {
        self.drift_speed
    }
}

/// The animated snow group.
#[derive(Clone, Debug)]
pub struct SnowField {
    /// Live flakes; count is fixed, members wrap forever.
    pub flakes: Vec<Snowflake>,
    rng: Rng64,
}

impl SnowField {
    /// Spawn `count` flakes throughout the volume.
    pub fn generate(count: u32, rng: &mut Rng64) -> Self {
        let flakes = (0..count).map(|_| Snowflake::spawn(rng)).collect();
        // Respawn x-resampling draws from a stream forked off the scene seed
        // so the simulation stays deterministic.
        let rng = Rng64::new(rng.next_u64());
        Self { flakes, rng }
    }

    /// Advance every flake one tick.
    ///
    /// Per flake: y falls by its fall speed, x drifts by its drift speed.
    /// A flake below `y = -10` wraps to `y = 20` with x resampled uniformly
    /// from `[-30, 30]`. Flakes share no state; after any number of ticks
    /// every y stays within `(-10, 30]`.
    pub fn advance(&mut self) {
        for flake in &mut self.flakes {
            flake.position.y -= flake.fall_speed;
            flake.position.x += flake.drift_speed;

            if flake.position.y < SNOW_KILL_Y {
                flake.position.y = SNOW_RESPAWN_Y;
                flake.position.x = self.rng.next_range(SNOW_X_MIN, SNOW_X_MAX);
            }
        }
    }
}

/// The aurora band surface and its single time uniform.
#[derive(Clone, Copy, Debug)]
pub struct AuroraBand {
    /// Band center in world space.
    pub center: Vec3,
    /// Half of the band's world-space width.
    pub half_width: f64,
    /// Band height in world units.
    pub height: f64,
    /// Fragment program parameters.
    pub shader: AuroraShader,
    /// Elapsed seconds pushed in by the render loop each tick.
    pub time_secs: f64,
}

impl AuroraBand {
    /// Place the band across the upper sky.
    pub fn new(seed: u64) -> Self {
        Self {
            center: Vec3::new(0.0, 12.0, -10.0),
            half_width: 20.0,
            height: 15.0,
            shader: AuroraShader {
                seed,
                ..AuroraShader::default()
            },
            time_secs: 0.0,
        }
    }

    /// Update the time uniform.
    pub fn set_time(&mut self, secs: f64) {
        self.time_secs = secs;
    }
}

/// The chroma-keyed video billboard.
///
/// Its texture lives in the video compositor; the sprite itself is only a
/// transform, driven by scroll state rather than physics.
#[derive(Clone, Copy, Debug)]
pub struct VideoSprite {
    /// Current position.
    pub position: Vec3,
    base_scale: Vec2,
    mirrored: bool,
}

impl VideoSprite {
    /// Build a sprite at its starting transform.
    pub fn new(position: Vec3, base_scale: Vec2) -> Self {
        Self {
            position,
            base_scale,
            mirrored: false,
        }
    }

    /// Signed horizontal scale; negative while mirrored.
    pub fn scale_x(&self) -> f64 {
        if self.mirrored {
            -self.base_scale.x
        } else {
            self.base_scale.x
        }
    }

    /// Vertical scale.
    pub fn scale_y(&self) -> f64 {
        self.base_scale.y
    }

    /// Set the horizontal mirror state.
    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    /// Whether the sprite is currently mirrored.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }
}

/// Root container owning the camera and every visible object.
///
/// Built once per session from a validated [`BackdropConfig`] and a seed;
/// `video_sprite` stays `None` until the compositor reports the video
/// playable (it may never, and that is fine).
#[derive(Clone, Debug)]
pub struct Scene {
    /// Perspective camera.
    pub camera: Camera,
    /// Static star point cloud.
    pub starfield: Starfield,
    /// Shader-driven aurora band.
    pub aurora: AuroraBand,
    /// Falling snow group.
    pub snow: SnowField,
    /// Video billboard, created on first compositor readiness.
    pub video_sprite: Option<VideoSprite>,
}

impl Scene {
    /// Build the full scene graph.
    pub fn build(config: &BackdropConfig, seed: u64, viewport: Viewport) -> BorealisResult<Self> {
        config.validate()?;
        let mut rng = Rng64::new(seed);
        Ok(Self {
            camera: Camera::new(&config.camera, viewport),
            starfield: Starfield::generate(config.star_count, &mut rng),
            aurora: AuroraBand::new(rng.next_u64()),
            snow: SnowField::generate(config.snow_count, &mut rng),
            video_sprite: None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
