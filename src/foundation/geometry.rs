use std::fmt;

use crate::foundation::error::{StampError, StampResult};

/// Output size preset selected by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Square-ish 240×240 sticker.
    #[default]
    Main,
    /// Wider 320×270 stamp.
    Stamp,
}

impl Variant {
    /// Resolve a variant tag. Only the exact tag `"stamp"` selects [`Variant::Stamp`];
    /// anything else, including `"Stamp"`, is `main`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "stamp" => Self::Stamp,
            _ => Self::Main,
        }
    }

    /// Tag used in file names and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Stamp => "stamp",
        }
    }

    /// Canvas preset for this variant.
    pub fn geometry(self) -> StampGeometry {
        match self {
            Self::Main => StampGeometry {
                canvas_width: 240,
                canvas_height: 240,
                margin_top: 40,
            },
            Self::Stamp => StampGeometry {
                canvas_width: 320,
                canvas_height: 270,
                margin_top: 40,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas size and caption band of one sticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StampGeometry {
    /// Output frame width in pixels.
    pub canvas_width: u32,
    /// Output frame height in pixels.
    pub canvas_height: u32,
    /// Height of the caption band above the foreground content.
    pub margin_top: u32,
}

impl StampGeometry {
    /// Build a validated geometry.
    pub fn new(canvas_width: u32, canvas_height: u32, margin_top: u32) -> StampResult<Self> {
        let g = Self {
            canvas_width,
            canvas_height,
            margin_top,
        };
        g.validate()?;
        Ok(g)
    }

    /// Reject zero-sized canvases and margins that leave no content area.
    pub fn validate(&self) -> StampResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(StampError::geometry(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.margin_top >= self.canvas_height {
            return Err(StampError::geometry(format!(
                "margin_top {} must be < canvas_height {}",
                self.margin_top, self.canvas_height
            )));
        }
        Ok(())
    }

    /// Height available to the foreground below the caption band.
    pub fn content_height(&self) -> u32 {
        self.canvas_height.saturating_sub(self.margin_top)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
