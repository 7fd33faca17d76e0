//! Engine crate - drives sessions from outside the rules
//!
//! The core crate only knows discrete steps. This crate adds the pieces a host
//! needs around it:
//!
//! - [`clock`]: turns elapsed wall time into ticks and follows the shrinking
//!   drop interval
//! - [`place`]: one-shot placement (rotate, shift, drop, lock) for bots and
//!   scripted play
//! - [`config`]: session configuration from JSON text or files
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{apply_place, GameClock};
//! use blockfall_engine::core::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default().with_seed(7)).unwrap();
//! let mut clock = GameClock::for_session(&session);
//!
//! let report = clock.advance(&mut session, 2000);
//! assert_eq!(report.ticks, 1);
//!
//! let result = apply_place(&mut session, 0, 0).unwrap();
//! assert!(result.locked);
//! ```

pub mod clock;
pub mod config;
pub mod place;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::{ClockReport, GameClock};
pub use config::{load_config, load_config_file, session_from_json};
pub use place::{apply_place, PlaceError};
