use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BorealisError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BorealisError::media("x").to_string().contains("media error:"));
    assert!(
        BorealisError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BorealisError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
