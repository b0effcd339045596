//! Pixel-level primitives shared by the frame renderer.
//!
//! Rasters are straight-alpha RGBA8 ([`image::RgbaImage`]). Operations that filter
//! neighbouring pixels (resampling, blur, rotation) run on a premultiplied copy so
//! transparent pixels never bleed their colour into visible ones.

use image::{RgbaImage, imageops::FilterType};

/// Colour of an untouched canvas: fully transparent white.
pub const CLEAR: [u8; 4] = [255, 255, 255, 0];

/// A fresh, fully transparent canvas.
pub fn transparent(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba(CLEAR))
}

/// Size that fits a `src_w`×`src_h` image into the content band, keeping its aspect ratio.
///
/// Landscape sources take the full canvas width; portrait and square sources take the
/// full content height. Sizes never collapse below one pixel.
pub fn fit_size(src_w: u32, src_h: u32, canvas_w: u32, content_h: u32) -> (u32, u32) {
    let aspect = f64::from(src_w) / f64::from(src_h);
    let (w, h) = if src_w > src_h {
        (canvas_w, (f64::from(canvas_w) / aspect) as u32)
    } else {
        ((f64::from(content_h) * aspect) as u32, content_h)
    };
    (w.max(1), h.max(1))
}

/// Scale by `factor`, truncating each side and keeping at least one pixel.
pub fn scaled_size(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let w = (f64::from(width) * factor) as u32;
    let h = (f64::from(height) * factor) as u32;
    (w.max(1), h.max(1))
}

/// Lanczos3 resample to exactly `width`×`height`.
pub fn resize(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    let premul = premultiplied(src);
    let mut out = image::imageops::resize(&premul, width, height, FilterType::Lanczos3);
    unpremultiply_rgba8_in_place(&mut out);
    out
}

/// Alpha-composite `src` over `canvas` with its top-left corner at (`x`, `y`).
///
/// Offsets may be negative or push `src` past the canvas edge; the overlap is clipped.
pub fn paste_over(mut canvas: RgbaImage, src: &RgbaImage, x: i64, y: i64) -> RgbaImage {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(cw);
    let y1 = (y + sh).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return canvas;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = canvas.get_pixel_mut(dx as u32, dy as u32);
            d.0 = over(d.0, s, 1.0);
        }
    }
    canvas
}

/// Multiply the colour channels by `factor`, saturating at 255. Alpha is kept.
pub fn adjust_brightness(mut img: RgbaImage, factor: f64) -> RgbaImage {
    let factor = factor.max(0.0);
    for px in img.pixels_mut() {
        for c in &mut px.0[..3] {
            *c = (f64::from(*c) * factor).round().min(255.0) as u8;
        }
    }
    img
}

/// Straight-alpha Porter-Duff "over" of `src` onto `dst`, with `src` alpha scaled by `opacity`.
pub fn over(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u32;
    let sa = mul_div255(u32::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255 - sa;
    let da = mul_div255(u32::from(dst[3]), inv);
    let out_a = sa + da;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa + u32::from(dst[i]) * da;
        out[i] = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

/// Copy of `src` with premultiplied colour channels.
pub fn premultiplied(src: &RgbaImage) -> RgbaImage {
    let mut out = src.clone();
    premultiply_rgba8_in_place(&mut out);
    out
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/canvas.rs"]
mod tests;
