use image::RgbaImage;
use kurbo::{Affine, Point, Rect};

use crate::compositor::canvas::{premultiplied, unpremultiply_rgba8_in_place};

/// Rotate `src` counter-clockwise by `degrees` about its centre.
///
/// The output grows to the rotated bounding box so no corner is clipped; uncovered
/// pixels are transparent. Whole turns return an unchanged copy.
pub fn rotate_expand(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let degrees = degrees.rem_euclid(360.0);
    if degrees == 0.0 {
        return src.clone();
    }

    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));
    // Image space is y-down, so a visual counter-clockwise turn is a negative angle.
    let forward = Affine::rotate(-degrees.to_radians());
    let bbox = forward.transform_rect_bbox(Rect::new(-sw / 2.0, -sh / 2.0, sw / 2.0, sh / 2.0));
    let out_w = snapped_span(bbox.x0, bbox.x1);
    let out_h = snapped_span(bbox.y0, bbox.y1);

    let inverse = forward.inverse();
    let premul = premultiplied(src);
    let (ocx, ocy) = (f64::from(out_w) / 2.0, f64::from(out_h) / 2.0);

    let mut out = RgbaImage::new(out_w, out_h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let p = inverse * Point::new(f64::from(x) + 0.5 - ocx, f64::from(y) + 0.5 - ocy);
        px.0 = sample_bilinear(&premul, p.x + sw / 2.0 - 0.5, p.y + sh / 2.0 - 0.5);
    }
    unpremultiply_rgba8_in_place(&mut out);
    out
}

/// Whole-pixel extent of `[lo, hi]`, ignoring float noise from the trig functions.
fn snapped_span(lo: f64, hi: f64) -> u32 {
    const EPS: f64 = 1e-9;
    (hi - lo - EPS).ceil().max(1.0) as u32
}

/// Bilinear sample of a premultiplied image at pixel-centre coordinates.
/// Samples outside the image read as transparent.
fn sample_bilinear(img: &RgbaImage, fx: f64, fy: f64) -> [u8; 4] {
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f64; 4];
    for (dx, dy, w) in [
        (0, 0, (1.0 - tx) * (1.0 - ty)),
        (1, 0, tx * (1.0 - ty)),
        (0, 1, (1.0 - tx) * ty),
        (1, 1, tx * ty),
    ] {
        if w == 0.0 {
            continue;
        }
        if let Some(px) = texel(img, x0 + dx, y0 + dy) {
            for c in 0..4 {
                acc[c] += w * f64::from(px[c]);
            }
        }
    }

    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = acc[c].round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn texel(img: &RgbaImage, x: i64, y: i64) -> Option<[u8; 4]> {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return None;
    }
    Some(img.get_pixel(x as u32, y as u32).0)
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/rotate.rs"]
mod tests;
