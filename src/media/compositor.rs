use std::path::PathBuf;

use crate::{
    effects::chroma_key::{ChromaKeyParams, key_out_in_place},
    foundation::error::{BorealisError, BorealisResult},
    media::video::{VideoSourceInfo, decode_video_frame_rgba8, looped_source_time, probe_video},
};

/// Fractional insets trimmed from each decoded frame before rescaling,
/// cutting the encoding artifacts that ring the footage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropInsets {
    /// Fraction trimmed from the left and right edges.
    pub x: f64,
    /// Fraction trimmed from the top and bottom edges.
    pub y: f64,
}

impl Default for CropInsets {
    fn default() -> Self {
        Self { x: 0.01, y: 0.05 }
    }
}

/// CPU pixel buffer republished to the scene as a texture.
///
/// `version` increments whenever `data` is rewritten; a consumer that
/// uploads to a GPU (or diffs frames) re-uploads when the version moves.
#[derive(Clone, Debug)]
pub struct VideoTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8, keyed (background alpha zeroed).
    pub data: Vec<u8>,
    /// Bumped on every republish.
    pub version: u64,
}

/// Lifecycle of the compositor's cooperative task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositorState {
    /// The source has not been probed successfully yet.
    AwaitingMedia,
    /// Frames are decoding; the texture is live.
    Ready,
    /// The source never became playable. Terminal; the sprite is never
    /// created and nothing retries.
    Failed,
    /// The task was cancelled by session teardown. Terminal.
    Cancelled,
}

/// Turns an opaque looping video into a transparent-background texture.
///
/// One cooperative cycle per render tick: decode the current looped frame,
/// inset-crop and rescale it into the texture buffer, key out the green
/// screen, bump the texture version. The cycle is an explicit
/// repeat-until-cancelled task — the cancel flag is checked at the cycle
/// boundary — and the whole thing is best-effort: media failures degrade the
/// compositor instead of propagating.
#[derive(Clone, Debug)]
pub struct VideoCompositor {
    source_path: PathBuf,
    chroma: ChromaKeyParams,
    insets: CropInsets,
    source: Option<VideoSourceInfo>,
    texture: VideoTexture,
    state: CompositorState,
}

impl VideoCompositor {
    /// Build a compositor for a source path. No IO happens until the first
    /// [`VideoCompositor::tick`].
    pub fn new(
        source_path: impl Into<PathBuf>,
        chroma: ChromaKeyParams,
        insets: CropInsets,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            chroma,
            insets,
            source: None,
            texture: VideoTexture {
                width: 0,
                height: 0,
                data: Vec::new(),
                version: 0,
            },
            state: CompositorState::AwaitingMedia,
        }
    }

    /// Current task state.
    pub fn state(&self) -> CompositorState {
        self.state
    }

    /// Whether the texture is live and the sprite may exist.
    pub fn is_ready(&self) -> bool {
        self.state == CompositorState::Ready
    }

    /// The shared texture. Empty (0x0) until the first ready cycle.
    pub fn texture(&self) -> &VideoTexture {
        &self.texture
    }

    /// Cancel the task; every subsequent tick is a no-op.
    pub fn cancel(&mut self) {
        self.state = CompositorState::Cancelled;
    }

    /// Run one cooperative cycle at the given session clock.
    ///
    /// Never fails: probe errors mark the compositor [`CompositorState::Failed`]
    /// (logged once); a transient decode error keeps the previous texture.
    pub fn tick(&mut self, clock_secs: f64) {
        match self.state {
            CompositorState::Cancelled | CompositorState::Failed => return,
            CompositorState::AwaitingMedia => self.try_open(),
            CompositorState::Ready => {}
        }
        if self.state != CompositorState::Ready {
            return;
        }
        if let Err(err) = self.refresh(clock_secs) {
            tracing::warn!(error = %err, "video frame refresh failed; keeping last texture");
        }
    }

    fn try_open(&mut self) {
        match probe_video(&self.source_path) {
            Ok(info) => {
                self.texture.width = info.width;
                self.texture.height = info.height;
                self.texture.data = vec![0; (info.width as usize) * (info.height as usize) * 4];
                self.source = Some(info);
                self.state = CompositorState::Ready;
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.source_path.display(),
                    "video never became playable; sprite will not be created"
                );
                self.state = CompositorState::Failed;
            }
        }
    }

    fn refresh(&mut self, clock_secs: f64) -> BorealisResult<()> {
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };
        let t = looped_source_time(clock_secs, source.duration_secs);
        let frame = decode_video_frame_rgba8(source, t)?;
        crop_scale_rgba8(
            &frame,
            source.width,
            source.height,
            self.insets,
            &mut self.texture.data,
            self.texture.width,
            self.texture.height,
        )?;
        key_out_in_place(&mut self.texture.data, self.chroma)?;
        self.texture.version += 1;
        Ok(())
    }
}

/// Resample `src` into `dst`, skipping the fractional inset bands and
/// stretching the remainder to fill the destination. Nearest sampling.
pub(crate) fn crop_scale_rgba8(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    insets: CropInsets,
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
) -> BorealisResult<()> {
    let src_len = (src_w as usize) * (src_h as usize) * 4;
    let dst_len = (dst_w as usize) * (dst_h as usize) * 4;
    if src.len() != src_len || dst.len() != dst_len || src_len == 0 || dst_len == 0 {
        return Err(BorealisError::validation(
            "crop_scale_rgba8 expects buffers matching width*height*4",
        ));
    }
    if !(0.0..0.5).contains(&insets.x) || !(0.0..0.5).contains(&insets.y) {
        return Err(BorealisError::validation(
            "crop insets must be in [0, 0.5) per axis",
        ));
    }

    let crop_left = f64::from(src_w) * insets.x;
    let crop_top = f64::from(src_h) * insets.y;
    let cropped_w = f64::from(src_w) - 2.0 * crop_left;
    let cropped_h = f64::from(src_h) - 2.0 * crop_top;

    for y in 0..dst_h {
        let sy = crop_top + (f64::from(y) + 0.5) / f64::from(dst_h) * cropped_h;
        let sy = (sy as u32).min(src_h - 1);
        for x in 0..dst_w {
            let sx = crop_left + (f64::from(x) + 0.5) / f64::from(dst_w) * cropped_w;
            let sx = (sx as u32).min(src_w - 1);
            let si = ((sy as usize) * (src_w as usize) + (sx as usize)) * 4;
            let di = ((y as usize) * (dst_w as usize) + (x as usize)) * 4;
            dst[di..di + 4].copy_from_slice(&src[si..si + 4]);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/media/compositor.rs"]
mod tests;
