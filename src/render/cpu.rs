use crate::{
    foundation::core::{Vec3, Viewport},
    media::compositor::VideoTexture,
    render::composite::{add, over, premul_from_straight, premul_from_straight_f64},
    render::frame::FrameRgba,
    render::texture::SpriteTexture,
    scene::model::{Scene, VideoSprite},
};

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Straight RGBA8 color the frame is cleared to before drawing;
    /// transparent black by default.
    pub clear_rgba: [u8; 4],
}

/// CPU rasterizer for the backdrop scene.
///
/// One render pass per tick: clear, stars (additive points), aurora band
/// (additive per-pixel shader over its projected rect, never occluding),
/// snow billboards (source-over), video sprite (source-over, straight-alpha
/// texture premultiplied during the blit). Pure pixel pushing; all IO was
/// front-loaded elsewhere.
pub struct CpuRenderer {
    settings: RenderSettings,
    snow_texture: SpriteTexture,
}

impl CpuRenderer {
    /// Build a renderer.
    pub fn new(settings: RenderSettings, snow_texture: SpriteTexture) -> Self {
        Self {
            settings,
            snow_texture,
        }
    }

    /// Render one full pass of `scene` into a premultiplied RGBA8 frame.
    pub fn render(
        &self,
        scene: &Scene,
        viewport: Viewport,
        video_texture: Option<&VideoTexture>,
    ) -> FrameRgba {
        let clear = premul_from_straight(self.settings.clear_rgba);
        let mut frame = FrameRgba::new_filled(viewport.width, viewport.height, clear);

        self.draw_stars(&mut frame, scene, viewport);
        self.draw_aurora(&mut frame, scene, viewport);
        self.draw_snow(&mut frame, scene, viewport);
        if let (Some(sprite), Some(texture)) = (&scene.video_sprite, video_texture) {
            self.draw_video_sprite(&mut frame, scene, viewport, sprite, texture);
        }

        frame
    }

    fn draw_stars(&self, frame: &mut FrameRgba, scene: &Scene, viewport: Viewport) {
        for &star in &scene.starfield.positions {
            let Some(projected) = scene.camera.project(star, viewport) else {
                continue;
            };
            let x = projected.x.floor();
            let y = projected.y.floor();
            if x < 0.0 || y < 0.0 || x >= f64::from(frame.width) || y >= f64::from(frame.height) {
                continue;
            }
            blend_px(frame, x as u32, y as u32, |dst| {
                add(dst, [255, 255, 255, 255])
            });
        }
    }

    fn draw_aurora(&self, frame: &mut FrameRgba, scene: &Scene, viewport: Viewport) {
        let band = &scene.aurora;
        let top_left = Vec3::new(
            band.center.x - band.half_width,
            band.center.y + band.height * 0.5,
            band.center.z,
        );
        let bottom_right = Vec3::new(
            band.center.x + band.half_width,
            band.center.y - band.height * 0.5,
            band.center.z,
        );
        let (Some(tl), Some(br)) = (
            scene.camera.project(top_left, viewport),
            scene.camera.project(bottom_right, viewport),
        ) else {
            return;
        };
        let (x0, x1) = (tl.x, br.x);
        let (y0, y1) = (tl.y, br.y);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let px0 = x0.floor().max(0.0) as u32;
        let px1 = (x1.ceil().min(f64::from(frame.width))).max(0.0) as u32;
        let py0 = y0.floor().max(0.0) as u32;
        let py1 = (y1.ceil().min(f64::from(frame.height))).max(0.0) as u32;

        for py in py0..py1 {
            // v runs bottom-up over the band surface.
            let v = 1.0 - (f64::from(py) + 0.5 - y0) / (y1 - y0);
            if !(0.0..=1.0).contains(&v) {
                continue;
            }
            for px in px0..px1 {
                let u = (f64::from(px) + 0.5 - x0) / (x1 - x0);
                if !(0.0..=1.0).contains(&u) {
                    continue;
                }
                let src = premul_from_straight_f64(band.shader.shade(band.time_secs, u, v));
                if src[3] == 0 {
                    continue;
                }
                blend_px(frame, px, py, |dst| add(dst, src));
            }
        }
    }

    fn draw_snow(&self, frame: &mut FrameRgba, scene: &Scene, viewport: Viewport) {
        for flake in &scene.snow.flakes {
            let Some(projected) = scene.camera.project(flake.position, viewport) else {
                continue;
            };
            let size = flake.scale * projected.px_per_unit;
            let opacity = flake.opacity;
            blit_billboard(
                frame,
                projected.x,
                projected.y,
                size,
                size,
                false,
                opacity,
                |u, v| self.snow_texture.sample_nearest(u, v),
            );
        }
    }

    fn draw_video_sprite(
        &self,
        frame: &mut FrameRgba,
        scene: &Scene,
        viewport: Viewport,
        sprite: &VideoSprite,
        texture: &VideoTexture,
    ) {
        if texture.width == 0 || texture.height == 0 {
            return;
        }
        let Some(projected) = scene.camera.project(sprite.position, viewport) else {
            return;
        };
        let w = sprite.scale_x().abs() * projected.px_per_unit;
        let h = sprite.scale_y() * projected.px_per_unit;
        let tw = texture.width;
        let th = texture.height;
        blit_billboard(
            frame,
            projected.x,
            projected.y,
            w,
            h,
            sprite.is_mirrored(),
            1.0,
            |u, v| {
                let x = ((u * f64::from(tw)) as i64).clamp(0, i64::from(tw) - 1) as usize;
                let y = ((v * f64::from(th)) as i64).clamp(0, i64::from(th) - 1) as usize;
                let i = (y * (tw as usize) + x) * 4;
                [
                    texture.data[i],
                    texture.data[i + 1],
                    texture.data[i + 2],
                    texture.data[i + 3],
                ]
            },
        );
    }
}

fn blend_px(frame: &mut FrameRgba, x: u32, y: u32, f: impl FnOnce([u8; 4]) -> [u8; 4]) {
    let i = ((y as usize) * (frame.width as usize) + (x as usize)) * 4;
    let dst = [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ];
    let out = f(dst);
    frame.data[i..i + 4].copy_from_slice(&out);
}

/// Source-over blit of a straight-alpha sampler onto a billboard rect
/// centered at `(cx, cy)`, `w_px` by `h_px` pixels, optionally mirrored
/// horizontally.
fn blit_billboard(
    frame: &mut FrameRgba,
    cx: f64,
    cy: f64,
    w_px: f64,
    h_px: f64,
    mirror_x: bool,
    opacity: f32,
    sample: impl Fn(f64, f64) -> [u8; 4],
) {
    if w_px < 1.0 || h_px < 1.0 {
        return;
    }
    let x0 = cx - w_px * 0.5;
    let y0 = cy - h_px * 0.5;
    let px0 = x0.floor().max(0.0) as u32;
    let px1 = ((x0 + w_px).ceil().min(f64::from(frame.width))).max(0.0) as u32;
    let py0 = y0.floor().max(0.0) as u32;
    let py1 = ((y0 + h_px).ceil().min(f64::from(frame.height))).max(0.0) as u32;

    for py in py0..py1 {
        let v = (f64::from(py) + 0.5 - y0) / h_px;
        if !(0.0..1.0).contains(&v) {
            continue;
        }
        for px in px0..px1 {
            let mut u = (f64::from(px) + 0.5 - x0) / w_px;
            if !(0.0..1.0).contains(&u) {
                continue;
            }
            if mirror_x {
                u = 1.0 - u;
            }
            let src = premul_from_straight(sample(u, v));
            if src[3] == 0 {
                continue;
            }
            blend_px(frame, px, py, |dst| over(dst, src, opacity));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
