use super::*;

use crate::compositor::canvas::{CLEAR, transparent};

fn ink_columns(img: &RgbaImage) -> Vec<u32> {
    (0..img.width())
        .filter(|&x| (0..img.height()).any(|y| img.get_pixel(x, y)[3] != 0))
        .collect()
}

#[test]
fn missing_font_degrades_to_builtin() {
    let font = CaptionFont::load_or_builtin(Path::new("no/such/font.ttf"));
    assert!(font.is_builtin());
}

#[test]
fn load_reports_read_and_parse_failures() {
    assert!(matches!(
        CaptionFont::load(Path::new("no/such/font.ttf")),
        Err(FontError::Read { .. })
    ));

    let bogus = std::env::temp_dir().join("stampfx-not-a-font.ttf");
    std::fs::write(&bogus, b"definitely not a font").unwrap();
    let res = CaptionFont::load(&bogus);
    let _ = std::fs::remove_file(&bogus);
    assert!(matches!(res, Err(FontError::Parse { .. })));
}

#[test]
fn builtin_measure_scales_by_whole_cells() {
    let font = CaptionFont::builtin();
    assert_eq!(font.measure("abc", 24.0), TextExtent { width: 72, height: 24 });
    assert_eq!(font.measure("abc", 10.0), TextExtent { width: 24, height: 8 });
    assert_eq!(font.measure("", 24.0), TextExtent { width: 0, height: 0 });
}

#[test]
fn centered_caption_is_horizontally_balanced() {
    let font = CaptionFont::builtin();
    let out = draw_text_centered(transparent(100, 40), &font, "HI", 16.0, 0, 4, [0, 0, 0, 255]);
    let cols = ink_columns(&out);
    assert!(!cols.is_empty());
    let (first, last) = (cols[0], *cols.last().unwrap());
    // "HI" occupies cells 34..66; glyph ink sits inside its cells.
    assert!(first >= 34 && last < 66, "{first}..{last}");
    assert!(out.pixels().any(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn caption_shift_and_opacity_apply() {
    let font = CaptionFont::builtin();
    let base = draw_text_centered(transparent(100, 40), &font, "HI", 16.0, 0, 4, [0, 0, 0, 255]);
    let shifted = draw_text_centered(transparent(100, 40), &font, "HI", 16.0, 6, 4, [0, 0, 0, 128]);
    assert_eq!(ink_columns(&shifted)[0], ink_columns(&base)[0] + 6);
    assert!(shifted.pixels().all(|p| p[3] == 0 || p[3] == 128));
}

#[test]
fn negative_top_is_clamped_and_empty_text_is_noop() {
    let font = CaptionFont::builtin();
    let clamped = draw_text_centered(transparent(64, 20), &font, "T", 8.0, 0, -30, [0, 0, 0, 255]);
    assert!((0..64).any(|x| clamped.get_pixel(x, 0)[3] != 0));

    let untouched = draw_text_centered(transparent(8, 8), &font, "", 8.0, 0, 0, [0, 0, 0, 255]);
    assert!(untouched.pixels().all(|p| p.0 == CLEAR));
}
