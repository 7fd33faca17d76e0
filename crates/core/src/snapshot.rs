//! Snapshot module - plain copies of session state for renderers and observers
//!
//! A snapshot owns all of its data, serializes with serde and can be refilled
//! in place with `Session::snapshot_into` to reuse its buffers between frames.

use serde::{Deserialize, Serialize};

use crate::session::ActivePiece;
use crate::types::{ShapeKind, Status, START_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color_id: u8,
    pub x: i32,
    pub y: i32,
    /// Current orientation as rows of 0/1
    pub shape: Vec<Vec<u8>>,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            color_id: value.color_id(),
            x: value.x,
            y: value.y,
            shape: value.shape.to_rows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Color ids, row-major, 0 = empty
    pub board: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub upcoming: Vec<ShapeKind>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub lines_stacked: u32,
    pub drop_interval_ms: u32,
    pub status: Status,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.board.clear();
        self.active = None;
        self.ghost_y = None;
        self.upcoming.clear();
        self.score = 0;
        self.level = START_LEVEL;
        self.lines_cleared = 0;
        self.lines_stacked = 0;
        self.drop_interval_ms = 0;
        self.status = Status::Running;
        self.episode_id = 0;
        self.piece_id = 0;
    }

    pub fn playable(&self) -> bool {
        self.status.is_running()
    }

    /// Color id at (x, y), 0 when empty or out of bounds
    pub fn color_at(&self, x: usize, y: usize) -> u8 {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            upcoming: Vec::new(),
            score: 0,
            level: START_LEVEL,
            lines_cleared: 0,
            lines_stacked: 0,
            drop_interval_ms: 0,
            status: Status::Running,
            episode_id: 0,
            piece_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_snapshot_reflects_session() {
        let session = Session::with_seed(7);
        let snap = session.snapshot();

        assert_eq!((snap.rows, snap.cols), (20, 10));
        assert_eq!(snap.board.len(), 20);
        assert!(snap.board.iter().all(|row| row.len() == 10));
        assert_eq!(snap.upcoming, session.upcoming());
        let active = snap.active.as_ref().unwrap();
        assert_eq!(active.color_id, active.kind.color_id());
        assert!(snap.playable());
    }

    #[test]
    fn test_snapshot_into_reuses_and_overwrites() {
        let mut session = Session::with_seed(7);
        let mut snap = GameSnapshot::default();
        session.snapshot_into(&mut snap);
        session.pause();
        session.snapshot_into(&mut snap);
        assert_eq!(snap.status, Status::Paused);
        assert!(!snap.playable());
        assert_eq!(snap, session.snapshot());

        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let session = Session::with_seed(7);
        let value = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(value["status"], "running");
        assert_eq!(value["level"], 1);
        assert_eq!(value["upcoming"].as_array().unwrap().len(), 4);
    }
}
