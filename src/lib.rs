//! Blockfall (workspace facade crate).
//!
//! Re-exports the rules, the engine helpers and the shared types under one
//! name: `blockfall::{core,engine,types}`. The implementation lives in the
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
