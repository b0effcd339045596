use std::{fmt, str::FromStr};

use crate::{
    encode::apng::Repeat,
    foundation::error::{StampError, StampResult},
};

/// Hand-authored horizontal jitter used by [`EffectKind::Pulsing`].
const PULSE_SHIFTS_X: [i32; 20] = [
    0, 4, -3, 3, -4, 4, -3, 3, -4, 4, -3, 3, -4, 4, -3, 3, -4, 4, -3, 3,
];

const BOUNCE_AMPLITUDE: f64 = 25.0;
const BLUR_CYCLE: [bool; 4] = [false, true, true, true];
const POPUP_SCALES: [f64; 8] = [0.5, 0.7, 0.9, 1.1, 1.0, 0.9, 0.7, 0.5];
const ROTATE_STEP_DEG: f64 = 72.0;

/// Named motion effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Horizontal jitter.
    Pulsing,
    /// Steady drift to the right.
    SlideIn,
    /// Vertical sine bounce.
    Bounce,
    /// Alternating sharp and blurred frames.
    Blur,
    /// One full counter-clockwise turn.
    Rotate,
    /// Grow-and-shrink pop.
    Popup,
    /// Alternating dark and bright frames.
    Flash,
    /// Two identical frames; the fallback for unrecognized names.
    #[default]
    Still,
}

impl EffectKind {
    /// All named effects, in menu order.
    pub const ALL: [EffectKind; 8] = [
        Self::Pulsing,
        Self::SlideIn,
        Self::Bounce,
        Self::Blur,
        Self::Rotate,
        Self::Popup,
        Self::Flash,
        Self::Still,
    ];

    /// Lenient lookup: unknown names resolve to [`EffectKind::Still`] instead of failing.
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(_) => {
                tracing::warn!(effect = name, "unknown effect, using the two-frame default");
                Self::Still
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pulsing => "pulsing",
            Self::SlideIn => "slidein",
            Self::Bounce => "bounce",
            Self::Blur => "blur",
            Self::Rotate => "rotate",
            Self::Popup => "popup",
            Self::Flash => "flash",
            Self::Still => "still",
        }
    }
}

impl FromStr for EffectKind {
    type Err = StampError;

    /// Strict lookup for callers that want unknown names rejected.
    fn from_str(s: &str) -> StampResult<Self> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| StampError::validation(format!("unknown effect '{s}'")))
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-frame transform parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameTransform {
    /// Uniform scale applied to the base composite (> 0).
    pub scale: f64,
    /// Horizontal offset in pixels, applied to image and caption.
    pub shift_x: i32,
    /// Vertical offset in pixels, applied to image and caption.
    pub shift_y: i32,
    /// Counter-clockwise rotation in degrees. 360 renders like 0.
    pub rotation_deg: f64,
    /// Blur the finished frame.
    pub blur: bool,
    /// Brightness factor (> 0); 1.0 leaves the frame untouched.
    pub brightness: f64,
    /// Caption alpha.
    pub text_opacity: u8,
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shift_x: 0,
            shift_y: 0,
            rotation_deg: 0.0,
            blur: false,
            brightness: 1.0,
            text_opacity: 255,
        }
    }
}

/// Ordered per-frame transforms for one effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectSchedule {
    pub effect: EffectKind,
    pub transforms: Vec<FrameTransform>,
    /// Loop policy handed to the encoder.
    pub repeat: Repeat,
}

impl EffectSchedule {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameTransform> {
        self.transforms.iter()
    }
}

/// Build the frame-by-frame schedule for `effect`.
pub fn build_schedule(effect: EffectKind) -> EffectSchedule {
    let transforms = match effect {
        EffectKind::Pulsing => frames(PULSE_SHIFTS_X.len(), |i| FrameTransform {
            shift_x: PULSE_SHIFTS_X[i],
            ..FrameTransform::default()
        }),
        EffectKind::SlideIn => frames(20, |i| FrameTransform {
            shift_x: 2 * i as i32,
            ..FrameTransform::default()
        }),
        EffectKind::Bounce => frames(20, |i| FrameTransform {
            shift_y: bounce_shift(i, 20),
            ..FrameTransform::default()
        }),
        EffectKind::Blur => frames(40, |i| FrameTransform {
            blur: BLUR_CYCLE[i % BLUR_CYCLE.len()],
            ..FrameTransform::default()
        }),
        EffectKind::Rotate => frames(6, |i| FrameTransform {
            rotation_deg: ROTATE_STEP_DEG * i as f64,
            ..FrameTransform::default()
        }),
        EffectKind::Popup => frames(20, |i| FrameTransform {
            scale: POPUP_SCALES[i % POPUP_SCALES.len()],
            ..FrameTransform::default()
        }),
        EffectKind::Flash => frames(20, |i| FrameTransform {
            brightness: if i % 2 == 0 { 0.3 } else { 2.0 },
            ..FrameTransform::default()
        }),
        EffectKind::Still => frames(2, |_| FrameTransform::default()),
    };

    EffectSchedule {
        effect,
        transforms,
        repeat: Repeat::Infinite,
    }
}

/// Vertical offset of frame `i` in a bounce of `period` frames.
pub fn bounce_shift(i: usize, period: usize) -> i32 {
    let phase = i as f64 / period as f64 * std::f64::consts::TAU;
    (BOUNCE_AMPLITUDE * phase.sin()).round() as i32
}

fn frames(count: usize, f: impl Fn(usize) -> FrameTransform) -> Vec<FrameTransform> {
    (0..count).map(f).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/schedule.rs"]
mod tests;
