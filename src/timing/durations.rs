use crate::foundation::error::{StampError, StampResult};

/// Per-frame display times in milliseconds, summing exactly to the requested total.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DurationPlan(Vec<u32>);

impl DurationPlan {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_ms(&self) -> u64 {
        self.0.iter().map(|&d| u64::from(d)).sum()
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }
}

/// Split `total_ms` across `frame_count` frames.
///
/// Every frame gets `total_ms / frame_count`; the remainder goes to the last frame.
/// Callers with fewer than two frames must clamp up to two first.
pub fn allocate_durations(total_ms: u32, frame_count: usize) -> StampResult<DurationPlan> {
    if frame_count < 2 {
        return Err(StampError::validation(format!(
            "duration plan needs at least 2 frames, got {frame_count}"
        )));
    }
    let count = u32::try_from(frame_count)
        .map_err(|_| StampError::validation("frame count does not fit in u32"))?;

    let base = total_ms / count;
    let remainder = total_ms - base * count;
    let mut durations = vec![base; frame_count];
    if let Some(last) = durations.last_mut() {
        *last += remainder;
    }
    Ok(DurationPlan(durations))
}

#[cfg(test)]
#[path = "../../tests/unit/timing/durations.rs"]
mod tests;
