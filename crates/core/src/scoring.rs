//! Scoring module - line clear points, levels and the drop speed curve
//!
//! Points for a single lock are `LINE_SCORES[lines] * level`, with the level
//! taken before the clear is counted. The level is derived from total cleared
//! lines and never goes down. The drop interval shrinks geometrically with the
//! number of locked pieces and is clamped at a floor.

use serde::{Deserialize, Serialize};

use crate::types::{
    CLASSIC_BASE_DROP_MS, CLASSIC_DROP_DECAY, CLASSIC_DROP_FLOOR_MS, CLASSIC_DROP_STEP,
    BASE_DROP_MS, DROP_DECAY, DROP_FLOOR_MS, DROP_STEP, LINES_PER_LEVEL, LINE_SCORES,
    START_LEVEL,
};

/// Calculate line clear score
/// lines: number of lines cleared by one lock (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 || lines as usize >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines as usize].saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Level after a clear: raised when the computed level exceeds the current one
pub fn next_level(current: u32, total_lines: u32) -> u32 {
    current.max(calculate_level(total_lines))
}

/// Drop speed curve: `max(floor_ms, base_ms * decay ^ (lines_stacked / step))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    pub base_ms: u32,
    pub floor_ms: u32,
    pub decay: f64,
    /// Locked pieces per decay step
    pub step: u32,
}

impl SpeedCurve {
    /// Slow-start curve: 2000ms, -10% every 8 pieces, 400ms floor
    pub const STANDARD: SpeedCurve = SpeedCurve {
        base_ms: BASE_DROP_MS,
        floor_ms: DROP_FLOOR_MS,
        decay: DROP_DECAY,
        step: DROP_STEP,
    };

    /// Classic curve: 1000ms, -5% every piece, 200ms floor
    pub const CLASSIC: SpeedCurve = SpeedCurve {
        base_ms: CLASSIC_BASE_DROP_MS,
        floor_ms: CLASSIC_DROP_FLOOR_MS,
        decay: CLASSIC_DROP_DECAY,
        step: CLASSIC_DROP_STEP,
    };

    /// Drop interval after `lines_stacked` locked pieces, rounded to whole ms
    pub fn interval_ms(&self, lines_stacked: u32) -> u32 {
        let steps = (lines_stacked / self.step.max(1)).min(i32::MAX as u32) as i32;
        let raw = self.base_ms as f64 * self.decay.powi(steps);
        raw.max(self.floor_ms as f64).round() as u32
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}
