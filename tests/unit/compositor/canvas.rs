use super::*;

use image::Rgba;

#[test]
fn fit_size_landscape_takes_full_width() {
    assert_eq!(fit_size(400, 200, 240, 200), (240, 120));
    assert_eq!(fit_size(1000, 10, 240, 200), (240, 2));
}

#[test]
fn fit_size_portrait_and_square_take_content_height() {
    assert_eq!(fit_size(100, 200, 240, 200), (100, 200));
    assert_eq!(fit_size(300, 300, 320, 230), (230, 230));
    assert_eq!(fit_size(1, 1000, 240, 200), (1, 200));
}

#[test]
fn scaled_size_truncates_and_keeps_one_pixel() {
    assert_eq!(scaled_size(240, 200, 0.7), (168, 140));
    assert_eq!(scaled_size(240, 200, 1.1), (264, 220));
    assert_eq!(scaled_size(3, 3, 0.1), (1, 1));
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_keeps_src_colour() {
    let src = [100, 110, 120, 200];
    assert_eq!(over(CLEAR, src, 1.0), src);
}

#[test]
fn over_half_alpha_blends_with_opaque_dst() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 128], 1.0);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

#[test]
fn paste_over_clips_negative_offsets() {
    let canvas = transparent(4, 4);
    let src = RgbaImage::from_pixel(3, 3, Rgba([9, 8, 7, 255]));
    let out = paste_over(canvas, &src, -2, -2);
    assert_eq!(out.get_pixel(0, 0).0, [9, 8, 7, 255]);
    assert_eq!(out.get_pixel(1, 1).0, CLEAR);
    assert_eq!(out.get_pixel(0, 1).0, CLEAR);
}

#[test]
fn paste_over_fully_outside_is_noop() {
    let canvas = transparent(4, 4);
    let src = RgbaImage::from_pixel(2, 2, Rgba([1, 1, 1, 255]));
    let out = paste_over(canvas.clone(), &src, 10, 0);
    assert_eq!(out, canvas);
}

#[test]
fn brightness_scales_colour_and_keeps_alpha() {
    let img = RgbaImage::from_pixel(1, 1, Rgba([100, 200, 50, 77]));
    assert_eq!(adjust_brightness(img.clone(), 0.3).get_pixel(0, 0).0, [30, 60, 15, 77]);
    assert_eq!(adjust_brightness(img, 2.0).get_pixel(0, 0).0, [200, 255, 100, 77]);
}

#[test]
fn resize_same_size_is_identity_and_opaque_constant_stays_constant() {
    let img = RgbaImage::from_pixel(8, 6, Rgba([40, 80, 120, 255]));
    assert_eq!(resize(&img, 8, 6), img);
    let out = resize(&img, 4, 3);
    assert_eq!(out.dimensions(), (4, 3));
    for p in out.pixels() {
        assert!(p.0[3] >= 254);
        assert!((i32::from(p.0[1]) - 80).abs() <= 1);
    }
}

#[test]
fn premultiply_round_trip_is_close() {
    let mut px = vec![100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![50, 25, 100, 128]);
    unpremultiply_rgba8_in_place(&mut px);
    assert!((i32::from(px[0]) - 100).abs() <= 1);
    assert!((i32::from(px[2]) - 200).abs() <= 1);
}
