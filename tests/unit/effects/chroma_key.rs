use super::*;

#[test]
fn green_dominant_pixel_is_background() {
    assert!(is_background(50, 200, 40, ChromaKeyParams::default()));
}

#[test]
fn near_grey_pixel_is_kept() {
    // Green not dominant enough over red/blue.
    assert!(!is_background(200, 180, 190, ChromaKeyParams::default()));
}

#[test]
fn min_green_threshold_is_exclusive() {
    let params = ChromaKeyParams::default();
    assert!(!is_background(0, 100, 0, params));
    assert!(is_background(0, 101, 0, params));
}

#[test]
fn key_out_zeroes_only_background_alpha() {
    let mut buf = vec![
        50, 200, 40, 255, // background
        200, 180, 190, 255, // foreground
        0, 0, 0, 7, // foreground (black, alpha preserved)
    ];
    key_out_in_place(&mut buf, ChromaKeyParams::default()).unwrap();
    assert_eq!(buf[3], 0);
    assert_eq!(buf[7], 255);
    assert_eq!(buf[11], 7);
    // Color channels are untouched either way.
    assert_eq!(&buf[0..3], &[50, 200, 40]);
    assert_eq!(&buf[4..7], &[200, 180, 190]);
}

#[test]
fn key_out_is_idempotent() {
    let mut once = vec![
        50, 200, 40, 255, 10, 240, 10, 128, 200, 180, 190, 255, 0, 0, 0, 0,
    ];
    let mut twice = once.clone();
    key_out_in_place(&mut once, ChromaKeyParams::default()).unwrap();
    key_out_in_place(&mut twice, ChromaKeyParams::default()).unwrap();
    key_out_in_place(&mut twice, ChromaKeyParams::default()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn key_out_rejects_ragged_buffers() {
    let mut buf = vec![0u8; 7];
    assert!(key_out_in_place(&mut buf, ChromaKeyParams::default()).is_err());
}

#[test]
fn dominance_must_be_positive_and_finite() {
    let zero = ChromaKeyParams {
        dominance: 0.0,
        ..ChromaKeyParams::default()
    };
    assert!(zero.validate().is_err());

    let nan = ChromaKeyParams {
        dominance: f32::NAN,
        ..ChromaKeyParams::default()
    };
    assert!(nan.validate().is_err());

    assert!(ChromaKeyParams::default().validate().is_ok());
}
