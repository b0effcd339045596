use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StampError::geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert!(
        StampError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StampError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn frame_mismatch_names_both_sizes() {
    let err = StampError::FrameMismatch {
        index: 3,
        expected: (240, 240),
        found: (320, 270),
    };
    let msg = err.to_string();
    assert!(msg.contains("frame 3"));
    assert!(msg.contains("(320, 270)"));
    assert!(msg.contains("(240, 240)"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StampError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
