use image::RgbaImage;

use anyhow::Context as _;

use crate::{
    compositor::text::CaptionFont,
    effects::schedule::{EffectKind, build_schedule},
    encode::apng::{encode_apng, frame_delay},
    foundation::{
        config::StickerConfig,
        error::{StampError, StampResult},
        geometry::Variant,
    },
    render::frame::{FrameRenderer, render_frames},
    timing::durations::{DurationPlan, allocate_durations},
};

/// MIME type to serve stickers with; animation-unaware clients show frame 0.
pub const STICKER_MIME: &str = "image/png";

/// Everything needed to build one sticker.
#[derive(Clone, Copy, Debug)]
pub struct AnimationRequest<'a> {
    /// Background-removed subject.
    pub foreground: &'a RgbaImage,
    /// Caption; may be empty.
    pub text: &'a str,
    pub effect: EffectKind,
    pub variant: Variant,
}

/// An encoded animated sticker.
#[derive(Clone, Debug)]
pub struct Sticker {
    /// APNG stream.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub variant: Variant,
    pub effect: EffectKind,
    pub durations: DurationPlan,
}

impl Sticker {
    pub fn frame_count(&self) -> usize {
        self.durations.len()
    }

    /// Download name for this sticker, e.g. `cat_anim_stamp_320x270.png`.
    pub fn file_name(&self, basename: &str) -> String {
        suggested_file_name(basename, self.variant, self.width, self.height)
    }
}

pub fn suggested_file_name(basename: &str, variant: Variant, width: u32, height: u32) -> String {
    format!("{basename}_anim_{variant}_{width}x{height}.png")
}

/// Render and encode one sticker.
#[tracing::instrument(skip_all, fields(effect = %req.effect, variant = %req.variant))]
pub fn create_sticker(
    req: &AnimationRequest<'_>,
    font: &CaptionFont,
    config: &StickerConfig,
) -> StampResult<Sticker> {
    config.validate()?;
    let geometry = req.variant.geometry();
    geometry.validate()?;

    let schedule = build_schedule(req.effect);
    tracing::debug!(
        frames = schedule.len(),
        width = geometry.canvas_width,
        height = geometry.canvas_height,
        "built schedule"
    );

    let durations = allocate_durations(config.total_ms, schedule.len().max(2))?;
    for &ms in durations.as_slice() {
        frame_delay(ms)?;
    }
    tracing::debug!(durations = ?durations.as_slice(), "allocated durations");

    let renderer = FrameRenderer::new(req.foreground, req.text, geometry, font, config)?;
    let frames = render_frames(&renderer, &schedule)?;

    let bytes = encode_apng(&frames, durations.as_slice(), schedule.repeat)?;
    Ok(Sticker {
        bytes,
        width: geometry.canvas_width,
        height: geometry.canvas_height,
        variant: req.variant,
        effect: req.effect,
        durations,
    })
}

/// Decode a PNG-compatible stream into RGBA8.
pub fn decode_foreground(bytes: &[u8]) -> StampResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .context("decode foreground image")?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(StampError::validation("foreground image is empty"));
    }
    Ok(img)
}

/// Background removal collaborator: raw upload bytes in, RGBA PNG bytes out.
///
/// Construct it once at startup and pass it by reference; implementations must be
/// safe to call from concurrent requests.
pub trait Segmenter: Send + Sync {
    fn remove_background(&self, upload: &[u8]) -> StampResult<Vec<u8>>;
}

/// For uploads that already have a transparent background.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughSegmenter;

impl Segmenter for PassthroughSegmenter {
    fn remove_background(&self, upload: &[u8]) -> StampResult<Vec<u8>> {
        Ok(upload.to_vec())
    }
}

/// Segment, decode and render an uploaded photo in one call.
pub fn create_sticker_from_upload(
    segmenter: &dyn Segmenter,
    upload: &[u8],
    text: &str,
    effect: EffectKind,
    variant: Variant,
    font: &CaptionFont,
    config: &StickerConfig,
) -> StampResult<Sticker> {
    let cutout = segmenter.remove_background(upload)?;
    let foreground = decode_foreground(&cutout)?;
    create_sticker(
        &AnimationRequest {
            foreground: &foreground,
            text,
            effect,
            variant,
        },
        font,
        config,
    )
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
