//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and session state. It has no
//! dependencies on rendering, input or timers, making it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: the same session runs in a terminal, a GUI or headless
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with the collision test and line clearing
//! - [`pieces`]: the seven shape templates and matrix rotation
//! - [`rng`]: seeded LCG, uniform piece draws and the upcoming queue
//! - [`scoring`]: line clear points, levels and the drop speed curve
//! - [`config`]: session configuration and validation
//! - [`session`]: the state machine and every gameplay operation
//! - [`snapshot`]: owned, serializable copies of session state
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is an independent draw (no 7-bag)
//! - **Plain rotation**: 90° clockwise in place; no wall kicks
//! - **No lock delay**: a piece locks on the first tick it cannot fall
//! - **Block out / lock out**: a blocked spawn, or a lock with cells above the
//!   board, ends the game
//! - **Scoring**: 100/300/500/800 times the level for 1-4 lines; one level per
//!   10 lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Session, SessionConfig};
//! use blockfall_core::types::GameAction;
//!
//! let mut session = Session::new(SessionConfig::default().with_seed(12345)).unwrap();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! while session.move_by(0, 1) {}
//!
//! let result = session.lock();
//! assert!(result.locked);
//! assert_eq!(session.lines_stacked(), 1);
//! ```
//!
//! # Timing
//!
//! Sessions never read a clock. Call [`Session::tick`](session::Session::tick)
//! every [`drop_interval_ms`](session::Session::drop_interval_ms) and re-read
//! the interval after each tick; it shrinks as pieces are locked.

pub mod board;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, SessionConfig};
pub use pieces::{get_shape, Shape};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, SpeedCurve};
pub use session::{ActivePiece, Session};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
