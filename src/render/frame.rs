use image::RgbaImage;

use crate::{
    compositor::{
        blur::gaussian_blur,
        canvas::{adjust_brightness, fit_size, paste_over, resize, scaled_size, transparent},
        rotate::rotate_expand,
        text::{CaptionFont, draw_text_centered},
    },
    effects::schedule::{EffectSchedule, FrameTransform},
    foundation::{
        config::StickerConfig,
        error::{StampError, StampResult},
        geometry::StampGeometry,
    },
};

/// Largest per-frame scale factor accepted by [`FrameRenderer::render`].
pub const MAX_FRAME_SCALE: f64 = 8.0;

/// One finished RGBA frame of exactly `canvas_width × canvas_height`.
pub type Frame = RgbaImage;

/// Renders frames of one sticker.
///
/// The foreground is fitted into the content band once, in [`FrameRenderer::new`];
/// each call to [`FrameRenderer::render`] only applies the per-frame transform.
#[derive(Debug)]
pub struct FrameRenderer<'a> {
    geometry: StampGeometry,
    base: RgbaImage,
    text: &'a str,
    font: &'a CaptionFont,
    config: &'a StickerConfig,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(
        foreground: &RgbaImage,
        text: &'a str,
        geometry: StampGeometry,
        font: &'a CaptionFont,
        config: &'a StickerConfig,
    ) -> StampResult<Self> {
        geometry.validate()?;
        let base = fit_foreground(foreground, &geometry)?;
        Ok(Self {
            geometry,
            base,
            text,
            font,
            config,
        })
    }

    pub fn geometry(&self) -> StampGeometry {
        self.geometry
    }

    /// The fitted foreground, `canvas_width × content_height`.
    pub fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub fn render(&self, t: &FrameTransform) -> StampResult<Frame> {
        check_transform(t)?;
        let g = &self.geometry;
        let (w, h) = (i64::from(g.canvas_width), i64::from(g.canvas_height));
        let (shift_x, shift_y) = (i64::from(t.shift_x), i64::from(t.shift_y));

        let (sw, sh) = scaled_size(self.base.width(), self.base.height(), t.scale);
        let mut subject = resize(&self.base, sw, sh);
        if t.rotation_deg.rem_euclid(360.0) != 0.0 {
            subject = rotate_expand(&subject, t.rotation_deg);
        }

        let x = (w - i64::from(subject.width())).div_euclid(2) + shift_x;
        let y = (h - i64::from(subject.height())).div_euclid(2) + shift_y;
        let mut frame = paste_over(transparent(g.canvas_width, g.canvas_height), &subject, x, y);

        let font_px = self.config.font_size_for_scale(t.scale);
        frame = draw_text_centered(
            frame,
            self.font,
            self.text,
            font_px,
            shift_x,
            i64::from(g.margin_top) + shift_y,
            [0, 0, 0, t.text_opacity],
        );

        if t.blur {
            frame = gaussian_blur(&frame, self.config.blur_sigma)?;
        }
        if t.brightness != 1.0 {
            frame = adjust_brightness(frame, t.brightness);
        }
        Ok(frame)
    }
}

fn check_transform(t: &FrameTransform) -> StampResult<()> {
    if !t.scale.is_finite() || t.scale <= 0.0 || t.scale > MAX_FRAME_SCALE {
        return Err(StampError::validation(format!(
            "frame scale {} outside (0, {MAX_FRAME_SCALE}]",
            t.scale
        )));
    }
    if !t.rotation_deg.is_finite() {
        return Err(StampError::validation("frame rotation must be finite"));
    }
    if !t.brightness.is_finite() || t.brightness < 0.0 {
        return Err(StampError::validation("frame brightness must be finite and >= 0"));
    }
    Ok(())
}

/// Fit `foreground` into the content band and centre it on a transparent
/// `canvas_width × content_height` layer.
pub fn fit_foreground(foreground: &RgbaImage, geometry: &StampGeometry) -> StampResult<RgbaImage> {
    let (fw, fh) = foreground.dimensions();
    if fw == 0 || fh == 0 {
        return Err(StampError::validation("foreground image is empty"));
    }
    let content_h = geometry.content_height();
    let (nw, nh) = fit_size(fw, fh, geometry.canvas_width, content_h);
    let fitted = resize(foreground, nw, nh);

    let x = (i64::from(geometry.canvas_width) - i64::from(nw)).div_euclid(2);
    let y = (i64::from(content_h) - i64::from(nh)).div_euclid(2);
    Ok(paste_over(
        transparent(geometry.canvas_width, content_h),
        &fitted,
        x,
        y,
    ))
}

/// Render every frame of `schedule`, in order.
#[tracing::instrument(skip_all, fields(effect = %schedule.effect, frames = schedule.len()))]
pub fn render_frames(
    renderer: &FrameRenderer<'_>,
    schedule: &EffectSchedule,
) -> StampResult<Vec<Frame>> {
    let frames = schedule
        .iter()
        .map(|t| renderer.render(t))
        .collect::<StampResult<Vec<_>>>()?;
    tracing::debug!(count = frames.len(), "rendered frames");
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
