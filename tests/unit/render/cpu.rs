use kurbo::Vec2;

use super::*;
use crate::composition::config::BackdropConfig;
use crate::foundation::math::Rng64;
use crate::scene::model::SnowField;

fn square_viewport() -> Viewport {
    Viewport::new(100, 100).unwrap()
}

/// A scene with no stars, no snow, and the aurora parked (time 0) — a blank
/// slate the tests mutate.
fn bare_scene(viewport: Viewport) -> Scene {
    let config = BackdropConfig::default();
    let mut scene = Scene::build(&config, 1, viewport).unwrap();
    scene.starfield.positions.clear();
    scene.snow.flakes.clear();
    scene
}

fn renderer_with_clear(clear_rgba: [u8; 4]) -> CpuRenderer {
    CpuRenderer::new(
        RenderSettings { clear_rgba },
        SpriteTexture::radial_falloff(32),
    )
}

#[test]
fn frame_matches_viewport_and_clear_color() {
    let viewport = square_viewport();
    let mut scene = bare_scene(viewport);
    // Park the aurora behind the far plane so nothing draws.
    scene.aurora.center.z = -2000.0;

    let frame = renderer_with_clear([5, 6, 7, 255]).render(&scene, viewport, None);
    assert_eq!((frame.width, frame.height), (100, 100));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 99), Some([5, 6, 7, 255]));
    assert_eq!(frame.pixel(50, 50), Some([5, 6, 7, 255]));
}

#[test]
fn stars_plot_additive_white_points() {
    let viewport = square_viewport();
    let mut scene = bare_scene(viewport);
    scene.aurora.center.z = -2000.0;
    // Directly in front of the camera at (0, 5, 20).
    scene.starfield.positions.push(Vec3::new(0.0, 5.0, 0.0));

    let frame = renderer_with_clear([0, 0, 0, 0]).render(&scene, viewport, None);
    assert_eq!(frame.pixel(50, 50), Some([255, 255, 255, 255]));
}

#[test]
fn aurora_only_ever_adds_light() {
    let viewport = square_viewport();
    let mut scene = bare_scene(viewport);
    scene.aurora.set_time(2.5);

    let clear = [10, 10, 10, 255];
    let frame = renderer_with_clear(clear).render(&scene, viewport, None);
    let mut brightened = 0usize;
    for px in frame.data.chunks_exact(4) {
        for c in 0..4 {
            assert!(px[c] >= clear[c], "additive band must never darken");
        }
        if px[0] > clear[0] || px[1] > clear[1] || px[2] > clear[2] {
            brightened += 1;
        }
    }
    assert!(brightened > 0, "the band should light up some pixels");
}

#[test]
fn snow_draws_a_soft_billboard_at_the_projected_position() {
    let viewport = square_viewport();
    let mut scene = bare_scene(viewport);
    scene.aurora.center.z = -2000.0;
    let mut rng = Rng64::new(5);
    scene.snow = SnowField::generate(1, &mut rng);
    scene.snow.flakes[0].position = Vec3::new(0.0, 5.0, 0.0);
    scene.snow.flakes[0].scale = 2.0;
    scene.snow.flakes[0].opacity = 1.0;

    let frame = renderer_with_clear([0, 0, 0, 0]).render(&scene, viewport, None);
    let center = frame.pixel(50, 50).unwrap();
    assert!(center[3] > 200, "flake center should be nearly opaque");
    assert_eq!(center[0], center[1]);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn video_sprite_blit_honors_mirroring() {
    let viewport = square_viewport();
    let mut scene = bare_scene(viewport);
    scene.aurora.center.z = -2000.0;

    // Left half red, right half blue.
    let texture = VideoTexture {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 255, 255],
        version: 1,
    };
    let renderer = renderer_with_clear([0, 0, 0, 0]);

    scene.video_sprite = Some(VideoSprite::new(
        Vec3::new(0.0, 5.0, 0.0),
        Vec2::new(10.0, 8.0),
    ));
    let frame = renderer.render(&scene, viewport, Some(&texture));
    assert_eq!(frame.pixel(40, 50), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(60, 50), Some([0, 0, 255, 255]));

    scene
        .video_sprite
        .as_mut()
        .unwrap()
        .set_mirrored(true);
    let frame = renderer.render(&scene, viewport, Some(&texture));
    assert_eq!(frame.pixel(40, 50), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(60, 50), Some([255, 0, 0, 255]));
}

#[test]
fn keyed_out_texels_leave_the_frame_untouched() {
    let viewport = square_viewport();
    let mut scene = bare_scene(viewport);
    scene.aurora.center.z = -2000.0;

    let texture = VideoTexture {
        width: 1,
        height: 1,
        data: vec![50, 200, 40, 0], // keyed: alpha already zeroed
        version: 1,
    };
    scene.video_sprite = Some(VideoSprite::new(
        Vec3::new(0.0, 5.0, 0.0),
        Vec2::new(10.0, 8.0),
    ));

    let frame = renderer_with_clear([0, 0, 0, 0]).render(&scene, viewport, Some(&texture));
    assert_eq!(frame.pixel(50, 50), Some([0, 0, 0, 0]));
}
