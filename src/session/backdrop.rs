use kurbo::Rect;

use crate::{
    composition::config::BackdropConfig,
    foundation::core::Viewport,
    foundation::error::{BorealisError, BorealisResult},
    input::scroll::ScrollMapper,
    input::visibility::RevealObserver,
    media::compositor::{CropInsets, VideoCompositor},
    render::cpu::{CpuRenderer, RenderSettings},
    render::frame::FrameRgba,
    render::texture::SpriteTexture,
    scene::model::{Scene, VideoSprite},
};

/// Lifecycle of a backdrop session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Scene built, loop not yet started.
    Uninitialized,
    /// Ticking. There is no pause or resume; the loop ends with the host.
    Running,
}

/// The whole backdrop under one owner: scene, renderer, video compositor,
/// and input mappers.
///
/// The host drives it with a monotonic clock — `start(now)` once, then
/// `tick(now)` on every display refresh — and forwards its scroll, resize
/// and element-visibility events. Each tick advances the aurora time
/// uniform, the snow field and the video compositor, then renders one full
/// pass into a premultiplied RGBA8 frame for the host to present.
pub struct BackdropSession {
    config: BackdropConfig,
    scene: Scene,
    renderer: CpuRenderer,
    compositor: Option<VideoCompositor>,
    scroll: ScrollMapper,
    reveal: RevealObserver,
    viewport: Viewport,
    state: SessionState,
    started_at_secs: f64,
}

impl BackdropSession {
    /// Build the scene graph and all per-session state. Does not start the
    /// loop and performs no media IO.
    pub fn new(config: BackdropConfig, seed: u64, viewport: Viewport) -> BorealisResult<Self> {
        config.validate()?;

        let scene = Scene::build(&config, seed, viewport)?;
        let snow_texture = match &config.snow_texture {
            Some(path) => SpriteTexture::from_path(path)?,
            None => SpriteTexture::radial_falloff(32),
        };
        let renderer = CpuRenderer::new(
            RenderSettings {
                clear_rgba: config.clear_rgba,
            },
            snow_texture,
        );
        let compositor = config
            .video
            .as_ref()
            .map(|v| VideoCompositor::new(&v.path, v.chroma, CropInsets::default()));

        Ok(Self {
            config,
            scene,
            renderer,
            compositor,
            scroll: ScrollMapper::new(),
            reveal: RevealObserver::new(),
            viewport,
            state: SessionState::Uninitialized,
            started_at_secs: 0.0,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The live scene graph.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The element-visibility observer.
    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    /// Register a host element for one-shot reveal marking.
    pub fn observe_reveal(&mut self, id: impl Into<String>, bounds: Rect) {
        self.reveal.observe(id, bounds);
    }

    /// Intersect observed elements against the current host viewport rect;
    /// returns ids newly shown.
    pub fn update_reveals(&mut self, viewport_rect: Rect) -> Vec<String> {
        self.reveal.update(viewport_rect)
    }

    /// Transition `Uninitialized -> Running`. Happens exactly once.
    pub fn start(&mut self, now_secs: f64) -> BorealisResult<()> {
        if self.state == SessionState::Running {
            return Err(BorealisError::validation("session is already running"));
        }
        self.started_at_secs = now_secs;
        self.state = SessionState::Running;
        tracing::debug!(now_secs, "backdrop session started");
        Ok(())
    }

    /// Advance one frame and render it.
    ///
    /// Pushes elapsed time into the aurora uniform, advances every
    /// snowflake, runs one video-compositor cycle (creating the video
    /// sprite on its first ready cycle), then issues one render pass.
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self, now_secs: f64) -> BorealisResult<FrameRgba> {
        if self.state != SessionState::Running {
            return Err(BorealisError::validation(
                "session must be started before ticking",
            ));
        }
        let elapsed = (now_secs - self.started_at_secs).max(0.0);

        self.scene.aurora.set_time(elapsed);
        self.scene.snow.advance();

        if let Some(compositor) = self.compositor.as_mut() {
            compositor.tick(elapsed);
            if compositor.is_ready()
                && self.scene.video_sprite.is_none()
                && let Some(video) = self.config.video.as_ref()
            {
                self.scene.video_sprite =
                    Some(VideoSprite::new(video.start_position, video.sprite_scale));
            }
        }

        let video_texture = self
            .compositor
            .as_ref()
            .filter(|c| c.is_ready())
            .map(|c| c.texture());
        Ok(self.renderer.render(&self.scene, self.viewport, video_texture))
    }

    /// Host scroll event: drive the video sprite from the page position.
    pub fn on_scroll(&mut self, offset: f64, scrollable_height: f64) {
        self.scroll
            .on_scroll(&mut self.scene, offset, scrollable_height);
    }

    /// Host viewport resize: recompute projection aspect and frame size.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scene.camera.set_aspect(viewport.aspect());
    }

    /// Host teardown: cancel the compositor's repeat-until-cancelled task.
    /// Rendering state is dropped with the session itself.
    pub fn stop(&mut self) {
        if let Some(compositor) = self.compositor.as_mut() {
            compositor.cancel();
        }
    }
}
