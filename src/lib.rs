//! Borealis composes and renders a decorative animated backdrop scene.
//!
//! The scene is a fixed cast — a static starfield, a value-noise aurora
//! band, a couple hundred falling snow sprites, and a chroma-keyed looping
//! video billboard — advanced by host-driven frame ticks and rendered on
//! the CPU into premultiplied RGBA8 frames.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: [`BackdropConfig`] (pure serde data, JSON-loadable)
//! 2. **Build**: `BackdropSession::new` constructs the [`Scene`] once
//! 3. **Run**: `start(now)`, then one [`BackdropSession::tick`] per display
//!    refresh -> [`FrameRgba`]
//! 4. **Steer**: forward host scroll / resize / element-visibility events
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: a seed reproduces the whole backdrop;
//!   the host supplies the clock.
//! - **No IO in the renderer**: media decoding happens at the compositor
//!   boundary, and only when the `media-ffmpeg` feature is enabled.
//! - **Best-effort media**: a video that never becomes playable is logged
//!   and skipped, never an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composition;
mod effects;
mod foundation;
mod input;
mod media;
mod render;
mod scene;
mod session;

pub use composition::config::{BackdropConfig, CameraConfig, VideoConfig};
pub use effects::aurora::AuroraShader;
pub use effects::chroma_key::{ChromaKeyParams, is_background, key_out_in_place};
pub use foundation::core::{Point, Rect, Vec2, Vec3, Viewport};
pub use foundation::error::{BorealisError, BorealisResult};
pub use foundation::math::{Rng64, mix, smoothstep, value_noise3};
pub use input::scroll::ScrollMapper;
pub use input::visibility::{RevealObserver, RevealTarget};
pub use media::compositor::{CompositorState, CropInsets, VideoCompositor, VideoTexture};
pub use media::video::{
    VideoSourceInfo, decode_video_frame_rgba8, looped_source_time, probe_video,
};
pub use render::cpu::{CpuRenderer, RenderSettings};
pub use render::frame::FrameRgba;
pub use render::texture::SpriteTexture;
pub use scene::model::{
    AuroraBand, Camera, Projected, Scene, SnowField, Snowflake, Starfield, VideoSprite,
};
pub use session::backdrop::{BackdropSession, SessionState};
