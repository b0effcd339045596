use super::*;

#[test]
fn defaults_match_sticker_constants() {
    let cfg = StickerConfig::default();
    assert_eq!(cfg.total_ms, 3000);
    assert_eq!(cfg.font_path, PathBuf::from("font/GenEiPOPle-Bk.ttf"));
    assert_eq!(cfg.base_font_size, 24.0);
    assert_eq!(cfg.min_font_size, 10.0);
    assert_eq!(cfg.blur_sigma, 2.0);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: StickerConfig = serde_json::from_str(r#"{ "total_ms": 1200 }"#).unwrap();
    assert_eq!(cfg.total_ms, 1200);
    assert_eq!(cfg.base_font_size, 24.0);
}

#[test]
fn validate_rejects_bad_sizes() {
    let cfg = StickerConfig {
        blur_sigma: 0.0,
        ..StickerConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = StickerConfig {
        base_font_size: f32::NAN,
        ..StickerConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = StickerConfig {
        total_ms: 0,
        ..StickerConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(StampError::Validation(_))));
}

#[test]
fn font_size_scales_and_floors() {
    let cfg = StickerConfig::default();
    assert_eq!(cfg.font_size_for_scale(1.0), 24.0);
    assert_eq!(cfg.font_size_for_scale(1.1), 26.0);
    assert_eq!(cfg.font_size_for_scale(0.5), 12.0);
    assert_eq!(cfg.font_size_for_scale(0.3), 10.0);
}

#[test]
fn from_json_file_reports_missing_path() {
    let err = StickerConfig::from_json_file(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}
