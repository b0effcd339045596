use image::RgbaImage;

use crate::foundation::error::{StampError, StampResult};

/// How many times a player should run the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Loop forever.
    #[default]
    Infinite,
    /// Play this many times, then stop on the last frame.
    Times(u32),
}

impl Repeat {
    /// APNG `num_plays` value; `0` means forever.
    pub fn num_plays(self) -> u32 {
        match self {
            Self::Infinite => 0,
            Self::Times(n) => n.max(1),
        }
    }
}

/// Encode `frames` as an animated PNG.
///
/// Frame `k` is shown for `durations[k]` milliseconds and cleared to transparent
/// before the next frame is drawn. Frame 0 doubles as the static image for viewers
/// without animation support. Every precondition is checked before a byte is written,
/// so a failure never yields a truncated stream.
#[tracing::instrument(skip_all, fields(frames = frames.len(), repeat = ?repeat))]
pub fn encode_apng(frames: &[RgbaImage], durations: &[u32], repeat: Repeat) -> StampResult<Vec<u8>> {
    let (width, height) = check_frames(frames, durations)?;
    let delays = durations
        .iter()
        .map(|&ms| frame_delay(ms))
        .collect::<StampResult<Vec<_>>>()?;

    let num_frames = u32::try_from(frames.len())
        .map_err(|_| StampError::validation("too many frames for APNG"))?;

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_animated(num_frames, repeat.num_plays())?;

        let mut writer = encoder.write_header()?;
        for (frame, (num, den)) in frames.iter().zip(delays) {
            writer.set_frame_delay(num, den)?;
            writer.set_dispose_op(png::DisposeOp::Background)?;
            writer.write_image_data(frame.as_raw())?;
        }
        writer.finish()?;
    }

    tracing::debug!(bytes = out.len(), width, height, "encoded apng");
    Ok(out)
}

/// APNG `delay_num / delay_den` pair for a frame shown for `ms` milliseconds.
///
/// The fraction `ms/1000` is reduced, so whole seconds up to 65535 s still fit the
/// 16-bit fields. Durations that cannot be stored exactly are rejected.
pub fn frame_delay(ms: u32) -> StampResult<(u16, u16)> {
    let divisor = gcd(ms, 1000);
    let num = u16::try_from(ms / divisor).map_err(|_| {
        StampError::validation(format!(
            "frame duration {ms}ms cannot be stored as an APNG delay"
        ))
    })?;
    let den = (1000 / divisor) as u16;
    Ok((num, den))
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn check_frames(frames: &[RgbaImage], durations: &[u32]) -> StampResult<(u32, u32)> {
    if frames.len() < 2 {
        return Err(StampError::validation(format!(
            "animation needs at least 2 frames, got {}",
            frames.len()
        )));
    }
    if frames.len() != durations.len() {
        return Err(StampError::validation(format!(
            "{} frames but {} durations",
            frames.len(),
            durations.len()
        )));
    }

    let expected = frames[0].dimensions();
    if expected.0 == 0 || expected.1 == 0 {
        return Err(StampError::validation("frames must be non-empty"));
    }
    for (index, frame) in frames.iter().enumerate().skip(1) {
        let found = frame.dimensions();
        if found != expected {
            return Err(StampError::FrameMismatch {
                index,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/apng.rs"]
mod tests;
