//! Session configuration and its validation
//!
//! A [`SessionConfig`] deserializes with a default for every missing field, so
//! `{}` is the standard 20x10 game. Validation happens once, when a session is
//! created; a session never sees an invalid configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::get_shape;
use crate::scoring::SpeedCurve;
use crate::types::{ShapeKind, DEFAULT_COLS, DEFAULT_QUEUE_LEN, DEFAULT_ROWS, MAX_QUEUE_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub rows: u16,
    pub cols: u16,
    /// Length of the upcoming queue
    pub queue_len: usize,
    /// Drop interval before the first speed-up
    pub initial_drop_interval_ms: u32,
    pub speed: SpeedCurve,
    /// Kinds the generator draws from
    pub shape_pool: Vec<ShapeKind>,
    /// RNG seed; a random seed is chosen when absent
    pub seed: Option<u32>,
}

impl SessionConfig {
    /// Single-preview game on the classic speed curve
    pub fn classic() -> Self {
        Self {
            queue_len: 1,
            initial_drop_interval_ms: SpeedCurve::CLASSIC.base_ms,
            speed: SpeedCurve::CLASSIC,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, rows: u16, cols: u16) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_queue_len(mut self, queue_len: usize) -> Self {
        self.queue_len = queue_len;
        self
    }

    pub fn with_shape_pool(mut self, pool: &[ShapeKind]) -> Self {
        self.shape_pool = pool.to_vec();
        self
    }

    /// Check every field; the first problem found is reported
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.cols == 0 {
            return Err(ConfigError::ZeroCols);
        }
        if self.shape_pool.is_empty() {
            return Err(ConfigError::EmptyShapePool);
        }
        // Every kind has to fit the empty board at its spawn position
        let fits = self.shape_pool.iter().all(|&kind| {
            let shape = get_shape(kind);
            shape.cols() <= self.cols as usize && shape.rows() <= self.rows as usize
        });
        if !fits {
            return Err(ConfigError::BoardTooSmall);
        }
        if self.queue_len == 0 || self.queue_len > MAX_QUEUE_LEN {
            return Err(ConfigError::QueueLength);
        }
        if self.initial_drop_interval_ms == 0 || self.speed.base_ms == 0 || self.speed.floor_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        if self.speed.floor_ms > self.speed.base_ms {
            return Err(ConfigError::FloorAboveBase);
        }
        if !(self.speed.decay > 0.0 && self.speed.decay <= 1.0) {
            return Err(ConfigError::DecayOutOfRange);
        }
        if self.speed.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            queue_len: DEFAULT_QUEUE_LEN,
            initial_drop_interval_ms: SpeedCurve::STANDARD.base_ms,
            speed: SpeedCurve::STANDARD,
            shape_pool: ShapeKind::ALL.to_vec(),
            seed: None,
        }
    }
}

/// Construction-time configuration failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRows,
    ZeroCols,
    BoardTooSmall,
    EmptyShapePool,
    QueueLength,
    ZeroInterval,
    FloorAboveBase,
    DecayOutOfRange,
    ZeroStep,
    BoardSizeMismatch,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroRows | ConfigError::ZeroCols | ConfigError::BoardTooSmall => {
                "invalid_board_size"
            }
            ConfigError::EmptyShapePool => "empty_shape_pool",
            ConfigError::QueueLength => "invalid_queue_len",
            ConfigError::ZeroInterval
            | ConfigError::FloorAboveBase
            | ConfigError::DecayOutOfRange
            | ConfigError::ZeroStep => "invalid_speed_curve",
            ConfigError::BoardSizeMismatch => "board_size_mismatch",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroRows => "board must have at least one row",
            ConfigError::ZeroCols => "board must have at least one column",
            ConfigError::BoardTooSmall => "a shape in the pool does not fit on the board",
            ConfigError::EmptyShapePool => "shape pool is empty",
            ConfigError::QueueLength => "queue length must be between 1 and 8",
            ConfigError::ZeroInterval => "drop intervals must be positive",
            ConfigError::FloorAboveBase => "drop interval floor is above the base interval",
            ConfigError::DecayOutOfRange => "decay must be in (0, 1]",
            ConfigError::ZeroStep => "speed step must be positive",
            ConfigError::BoardSizeMismatch => "board dimensions differ from the session",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}
