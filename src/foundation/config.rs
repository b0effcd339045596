use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{StampError, StampResult};

/// Default total playback time of one sticker loop, in milliseconds.
pub const DEFAULT_TOTAL_MS: u32 = 3000;

/// Default location of the caption font.
pub const DEFAULT_FONT_PATH: &str = "font/GenEiPOPle-Bk.ttf";

/// Tunables for sticker rendering.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StickerConfig {
    /// Total playback time distributed across all frames.
    pub total_ms: u32,
    /// Caption font resource; a missing file falls back to the built-in bitmap font.
    pub font_path: PathBuf,
    /// Caption size at `scale == 1.0`, in pixels.
    pub base_font_size: f32,
    /// Lower bound on the caption size when the frame is scaled down.
    pub min_font_size: f32,
    /// Gaussian standard deviation used by blurred frames.
    pub blur_sigma: f32,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            total_ms: DEFAULT_TOTAL_MS,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            base_font_size: 24.0,
            min_font_size: 10.0,
            blur_sigma: 2.0,
        }
    }
}

impl StickerConfig {
    /// Load and validate a config from a JSON file.
    pub fn from_json_file(path: &Path) -> StampResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> StampResult<()> {
        if self.total_ms == 0 {
            return Err(StampError::validation("total_ms must be > 0"));
        }
        if !self.base_font_size.is_finite() || self.base_font_size <= 0.0 {
            return Err(StampError::validation(
                "base_font_size must be finite and > 0",
            ));
        }
        if !self.min_font_size.is_finite() || self.min_font_size <= 0.0 {
            return Err(StampError::validation(
                "min_font_size must be finite and > 0",
            ));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(StampError::validation("blur_sigma must be finite and > 0"));
        }
        Ok(())
    }

    /// Caption pixel size for a frame drawn at `scale`.
    pub fn font_size_for_scale(&self, scale: f64) -> f32 {
        ((f64::from(self.base_font_size) * scale).floor() as f32).max(self.min_font_size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
