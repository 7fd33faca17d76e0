//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data used throughout the workspace. Everything here
//! is free of game logic so it can be shared by the engine, by renderers and by any
//! automation that drives a session.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable per session):
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn position**: horizontally centered on row 0
//!
//! # Speed Curve
//!
//! The drop interval after every lock is
//! `max(floor, base * decay ^ (lines_stacked / step))`:
//!
//! | Constant | Default | Classic |
//! |----------|---------|---------|
//! | base | 2000ms | 1000ms |
//! | floor | 400ms | 200ms |
//! | decay | 0.9 | 0.95 |
//! | step | 8 | 1 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, ShapeKind, Status, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! assert_eq!(ShapeKind::I.color_id(), 1);
//! assert_eq!(ShapeKind::from_str("o"), Some(ShapeKind::O));
//! assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
//! assert!(Status::Running.is_running());
//! assert_eq!((DEFAULT_ROWS, DEFAULT_COLS), (20, 10));
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_ROWS: u16 = 20;

/// Default board width in columns
pub const DEFAULT_COLS: u16 = 10;

/// Default number of upcoming pieces kept in the preview queue
pub const DEFAULT_QUEUE_LEN: usize = 4;

/// Largest supported preview queue
pub const MAX_QUEUE_LEN: usize = 8;

/// Shapes fit in a 4x4 matrix in every orientation
pub const MAX_SHAPE_SIZE: usize = 4;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a session starts at
pub const START_LEVEL: u32 = 1;

/// Line clear points at level 1, indexed by lines cleared in a single lock.
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Initial drop interval of the default speed curve
pub const BASE_DROP_MS: u32 = 2000;

/// Fastest drop interval of the default speed curve
pub const DROP_FLOOR_MS: u32 = 400;

/// Per-step decay factor of the default speed curve
pub const DROP_DECAY: f64 = 0.9;

/// Locked pieces per speed step of the default speed curve
pub const DROP_STEP: u32 = 8;

/// Initial drop interval of the classic speed curve
pub const CLASSIC_BASE_DROP_MS: u32 = 1000;

/// Fastest drop interval of the classic speed curve
pub const CLASSIC_DROP_FLOOR_MS: u32 = 200;

/// Per-step decay factor of the classic speed curve
pub const CLASSIC_DROP_DECAY: f64 = 0.95;

/// Locked pieces per speed step of the classic speed curve
pub const CLASSIC_DROP_STEP: u32 = 1;

/// The seven tetromino shape kinds, in canonical index order.
///
/// The color id of a kind is its index plus one, so a board cell value of `0`
/// always means empty:
/// - **I** (1): 4-wide bar
/// - **T** (2)
/// - **L** (3)
/// - **J** (4)
/// - **O** (5): 2x2 square
/// - **S** (6)
/// - **Z** (7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    T,
    L,
    J,
    O,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds in canonical index order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Canonical index (0-6)
    pub fn index(self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::T => 1,
            ShapeKind::L => 2,
            ShapeKind::J => 3,
            ShapeKind::O => 4,
            ShapeKind::S => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Kind at a canonical index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Value written into board cells for this kind (1-7)
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.color_id(), 1);
    /// assert_eq!(ShapeKind::Z.color_id(), 7);
    /// ```
    pub fn color_id(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Kind for a board cell value, `None` for empty or unknown values
    pub fn from_color_id(color_id: u8) -> Option<Self> {
        match color_id {
            0 => None,
            id => Self::from_index(id as usize - 1),
        }
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("T"), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(ShapeKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<ShapeKind>;

/// Session lifecycle state
///
/// `Running` and `Paused` toggle freely. `GameOver` is terminal until the
/// session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl Status {
    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    pub fn is_game_over(self) -> bool {
        self == Status::GameOver
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Paused => "paused",
            Status::GameOver => "game_over",
        }
    }
}

/// Game actions that input collaborators can apply to a session
///
/// Each action maps onto one engine operation; key or touch bindings live
/// outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a fresh playthrough
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}

/// Outcome of locking the active piece.
///
/// Also kept by the session as its last event until an observer takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockResult {
    /// A piece was actually written to the board
    pub locked: bool,
    pub lines_cleared: u32,
    /// Points awarded for the line clear
    pub points: u32,
    /// The drop interval decreased; external timers should reschedule
    pub interval_changed: bool,
    pub game_over: bool,
}

/// Outcome of one automatic downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickResult {
    /// The piece fell one row
    pub moved: bool,
    /// The piece could not fall and was locked
    pub locked: bool,
    pub game_over: bool,
    /// Set when `locked`
    pub lock: Option<LockResult>,
}
