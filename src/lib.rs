//! stampfx turns a cut-out foreground image and a short caption into a looping
//! animated sticker.
//!
//! # Pipeline overview
//!
//! 1. **Schedule**: `EffectKind -> EffectSchedule` (one `FrameTransform` per frame)
//! 2. **Render**: `foreground + caption + StampGeometry + FrameTransform -> Frame`
//! 3. **Time**: `total_ms + frame count -> DurationPlan` (sums exactly to `total_ms`)
//! 4. **Encode**: `frames + DurationPlan + Repeat -> APNG bytes`
//!
//! Every request is a pure, synchronous run of these steps: nothing is cached or shared
//! between requests except the caller-owned [`CaptionFont`] and [`Segmenter`] handles,
//! which are read-only.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce byte-identical output.
//! - **Straight-alpha RGBA8** at the API boundary; filters run premultiplied internally.
#![forbid(unsafe_code)]

mod compositor;
mod effects;
mod encode;
mod foundation;
mod pipeline;
mod render;
mod timing;

pub use compositor::blur::gaussian_blur;
pub use compositor::canvas::{
    CLEAR, adjust_brightness, fit_size, over, paste_over, resize, scaled_size, transparent,
};
pub use compositor::rotate::rotate_expand;
pub use compositor::text::{CaptionFont, FontError, TextExtent, draw_text_centered};
pub use effects::schedule::{
    EffectKind, EffectSchedule, FrameTransform, bounce_shift, build_schedule,
};
pub use encode::apng::{Repeat, encode_apng, frame_delay};
pub use foundation::config::{DEFAULT_FONT_PATH, DEFAULT_TOTAL_MS, StickerConfig};
pub use foundation::error::{StampError, StampResult};
pub use foundation::geometry::{StampGeometry, Variant};
pub use pipeline::{
    AnimationRequest, PassthroughSegmenter, STICKER_MIME, Segmenter, Sticker,
    create_sticker, create_sticker_from_upload, decode_foreground, suggested_file_name,
};
pub use render::frame::{Frame, FrameRenderer, MAX_FRAME_SCALE, fit_foreground, render_frames};
pub use timing::durations::{DurationPlan, allocate_durations};
