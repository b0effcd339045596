use image::{Rgba, RgbaImage};

use crate::{
    compositor::canvas::{premultiplied, unpremultiply_rgba8_in_place},
    foundation::error::{StampError, StampResult},
};

/// Gaussian blur of a straight-alpha frame with standard deviation `sigma`.
///
/// The kernel reaches `ceil(3 * sigma)` pixels each way and edges are clamped.
/// Filtering runs on a premultiplied copy so transparent pixels do not bleed colour.
pub fn gaussian_blur(src: &RgbaImage, sigma: f32) -> StampResult<RgbaImage> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StampError::validation(format!(
            "blur sigma must be finite and > 0, got {sigma}"
        )));
    }
    let weights = kernel(sigma);
    let rows = convolve(&premultiplied(src), &weights, Axis::Rows);
    let mut out = convolve(&rows, &weights, Axis::Columns);
    unpremultiply_rgba8_in_place(&mut out);
    Ok(out)
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

/// Normalised taps for offsets `-r..=r`.
fn kernel(sigma: f32) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil() as i32;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let taps: Vec<f32> = (-radius..=radius)
        .map(|d| (-((d * d) as f32) / two_sigma_sq).exp())
        .collect();
    let total: f32 = taps.iter().sum();
    taps.into_iter().map(|t| t / total).collect()
}

fn convolve(src: &RgbaImage, weights: &[f32], axis: Axis) -> RgbaImage {
    let (w, h) = src.dimensions();
    let radius = (weights.len() / 2) as i64;
    RgbaImage::from_fn(w, h, |x, y| {
        let mut acc = [0.0f32; 4];
        for (k, weight) in weights.iter().enumerate() {
            let d = k as i64 - radius;
            let (sx, sy) = match axis {
                Axis::Rows => ((i64::from(x) + d).clamp(0, i64::from(w) - 1) as u32, y),
                Axis::Columns => (x, (i64::from(y) + d).clamp(0, i64::from(h) - 1) as u32),
            };
            for (a, &c) in acc.iter_mut().zip(src.get_pixel(sx, sy).0.iter()) {
                *a += weight * f32::from(c);
            }
        }
        Rgba(acc.map(|v| v.round().clamp(0.0, 255.0) as u8))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/blur.rs"]
mod tests;
