use super::*;

fn field_of_one(flake: Snowflake) -> SnowField {
    SnowField {
        flakes: vec![flake],
        rng: Rng64::new(99),
    }
}

#[test]
fn flake_near_the_floor_wraps_and_resamples_x() {
    let mut field = field_of_one(Snowflake {
        position: Vec3::new(5.0, -10.05, 0.0),
        scale: 0.5,
        opacity: 1.0,
        fall_speed: 0.1,
        drift_speed: 0.0,
    });

    field.advance();

    let flake = &field.flakes[0];
    assert_eq!(flake.position.y, 20.0);
    assert!((-30.0..30.0).contains(&flake.position.x));
}

#[test]
fn flake_above_the_floor_just_falls_and_drifts() {
    let mut field = field_of_one(Snowflake {
        position: Vec3::new(1.0, 0.0, 0.0),
        scale: 0.5,
        opacity: 1.0,
        fall_speed: 0.1,
        drift_speed: 0.02,
    });

    field.advance();

    let flake = &field.flakes[0];
    assert!((flake.position.y - -0.1).abs() < 1e-12);
    assert!((flake.position.x - 1.02).abs() < 1e-12);
}

#[test]
fn snow_y_never_escapes_the_wrap_band() {
    let mut rng = Rng64::new(7);
    let mut field = SnowField::generate(200, &mut rng);
    for _ in 0..2_000 {
        field.advance();
        for flake in &field.flakes {
            assert!(
                flake.position.y > -10.0 && flake.position.y <= 30.0,
                "flake y {} escaped the wrap band",
                flake.position.y
            );
        }
    }
}

#[test]
fn per_instance_speeds_are_fixed_after_construction() {
    let mut rng = Rng64::new(3);
    let mut field = SnowField::generate(16, &mut rng);
    let speeds: Vec<(f64, f64)> = field
        .flakes
        .iter()
        .map(|f| (f.fall_speed(), f.drift_speed()))
        .collect();
    for _ in 0..500 {
        field.advance();
    }
    let after: Vec<(f64, f64)> = field
        .flakes
        .iter()
        .map(|f| (f.fall_speed(), f.drift_speed()))
        .collect();
    assert_eq!(speeds, after);
}

#[test]
fn scene_build_is_deterministic_per_seed() {
    let config = crate::composition::config::BackdropConfig::default();
    let viewport = Viewport::new(640, 360).unwrap();
    let a = Scene::build(&config, 11, viewport).unwrap();
    let b = Scene::build(&config, 11, viewport).unwrap();
    assert_eq!(a.starfield.positions.len(), 500);
    assert_eq!(a.starfield.positions[0], b.starfield.positions[0]);
    assert_eq!(a.snow.flakes.len(), 200);
    assert_eq!(a.snow.flakes[7].position, b.snow.flakes[7].position);
    assert!(a.video_sprite.is_none());
}

#[test]
fn camera_projects_center_point_to_screen_center() {
    let config = crate::composition::config::CameraConfig {
        position: Vec3::new(0.0, 0.0, 20.0),
        ..Default::default()
    };
    let viewport = Viewport::new(800, 600).unwrap();
    let camera = Camera::new(&config, viewport);
    let projected = camera.project(Vec3::ZERO, viewport).unwrap();
    assert!((projected.x - 400.0).abs() < 1e-9);
    assert!((projected.y - 300.0).abs() < 1e-9);
    assert!(projected.px_per_unit > 0.0);
}

#[test]
fn camera_culls_outside_depth_planes() {
    let config = crate::composition::config::CameraConfig::default();
    let viewport = Viewport::new(800, 600).unwrap();
    let camera = Camera::new(&config, viewport);
    // Behind the camera.
    assert!(camera.project(Vec3::new(0.0, 5.0, 25.0), viewport).is_none());
    // Past the far plane.
    assert!(
        camera
            .project(Vec3::new(0.0, 5.0, -2000.0), viewport)
            .is_none()
    );
}

#[test]
fn camera_resize_updates_horizontal_projection() {
    let config = crate::composition::config::CameraConfig {
        position: Vec3::new(0.0, 0.0, 20.0),
        ..Default::default()
    };
    let viewport = Viewport::new(800, 600).unwrap();
    let mut camera = Camera::new(&config, viewport);
    let before = camera.project(Vec3::new(5.0, 0.0, 0.0), viewport).unwrap();
    camera.set_aspect(2.0);
    let after = camera.project(Vec3::new(5.0, 0.0, 0.0), viewport).unwrap();
    assert!(after.x < before.x, "wider aspect compresses x toward center");
}

#[test]
fn video_sprite_mirror_flips_scale_sign_only() {
    let mut sprite = VideoSprite::new(Vec3::new(50.0, 16.0, 0.0), Vec2::new(10.0, 8.0));
    assert_eq!(sprite.scale_x(), 10.0);
    sprite.set_mirrored(true);
    assert_eq!(sprite.scale_x(), -10.0);
    assert_eq!(sprite.scale_y(), 8.0);
    sprite.set_mirrored(false);
    assert_eq!(sprite.scale_x(), 10.0);
}
