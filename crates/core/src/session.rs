//! Session module - one playthrough of the game
//!
//! This module ties together all core components: board, shapes, generator and
//! scoring. It owns the lifecycle state machine (Running, Paused, GameOver) and
//! every mutating operation. Operations called while the session is not
//! running are ignored and report that nothing happened, so input handlers can
//! call them without checking state first.
//!
//! Nothing here knows about time. The automatic fall is a [`Session::tick`]
//! called by an external clock every [`Session::drop_interval_ms`].

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, SessionConfig};
use crate::pieces::{get_shape, spawn_x, Shape, SPAWN_Y};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_line_score, next_level};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockResult, ShapeKind, Status, TickResult, START_LEVEL};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    /// Current orientation of the kind's template
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Create a piece at the spawn position of a board `board_cols` wide
    pub fn spawn(kind: ShapeKind, board_cols: u16) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            x: spawn_x(board_cols, &shape),
            y: SPAWN_Y,
            shape,
        }
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    generator: PieceGenerator,
    /// Monotonic playthrough id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockResult>,
    score: u32,
    level: u32,
    lines_cleared: u32,
    lines_stacked: u32,
    drop_interval_ms: u32,
    status: Status,
}

impl Session {
    /// Validate `config` and start a session with its first piece spawned
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Standard session with a fixed seed
    pub fn with_seed(seed: u32) -> Self {
        Self::from_valid_config(SessionConfig::default().with_seed(seed))
    }

    fn from_valid_config(config: SessionConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut generator = PieceGenerator::new(seed, &config.shape_pool, config.queue_len);
        generator.initialize();

        let mut session = Self {
            board: Board::new(config.rows, config.cols),
            active: None,
            generator,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            score: 0,
            level: START_LEVEL,
            lines_cleared: 0,
            lines_stacked: 0,
            drop_interval_ms: config.initial_drop_interval_ms,
            status: Status::Running,
            config,
        };
        debug!(
            seed,
            rows = session.config.rows,
            cols = session.config.cols,
            "session created"
        );
        session.spawn();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn paused(&self) -> bool {
        self.status == Status::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn lines_stacked(&self) -> u32 {
        self.lines_stacked
    }

    /// Period the external clock should tick at
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Upcoming kinds, next first
    pub fn upcoming(&self) -> &[ShapeKind] {
        self.generator.upcoming()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board, e.g. with a prepared puzzle layout.
    ///
    /// The active piece is left where it is.
    pub fn load_board(&mut self, board: Board) -> Result<(), ConfigError> {
        if board.height() != self.config.rows || board.width() != self.config.cols {
            return Err(ConfigError::BoardSizeMismatch);
        }
        self.board = board;
        Ok(())
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockResult> {
        self.last_event.take()
    }

    /// Row the active piece would land on if dropped straight down
    pub fn ghost_y(&self) -> Option<i32> {
        let active = self.active?;
        let mut y = active.y;
        while !self.board.collides(&active.shape, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Spawn the next piece from the upcoming queue.
    ///
    /// Returns false when not running, or when the spawn position is blocked;
    /// the latter ends the game (block out) without touching the board.
    pub fn spawn(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let kind = self.generator.dequeue();
        self.place_new_piece(kind)
    }

    /// Spawn a specific kind without consuming the upcoming queue
    pub fn spawn_shape(&mut self, kind: ShapeKind) -> bool {
        if !self.is_running() {
            return false;
        }
        self.place_new_piece(kind)
    }

    fn place_new_piece(&mut self, kind: ShapeKind) -> bool {
        let piece = ActivePiece::spawn(kind, self.board.width());
        if piece.collides(&self.board) {
            self.active = None;
            self.status = Status::GameOver;
            info!(kind = kind.as_str(), score = self.score, "block out, game over");
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        debug!(kind = kind.as_str(), x = piece.x, piece_id = self.piece_id, "spawned");
        true
    }

    /// Try to move the active piece by (dx, dy)
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let (Some(x), Some(y)) = (active.x.checked_add(dx), active.y.checked_add(dy)) else {
            return false;
        };
        if self.board.collides(&active.shape, x, y) {
            return false;
        }

        self.active = Some(ActivePiece { x, y, ..active });
        true
    }

    /// Try to rotate the active piece 90° clockwise in place (no wall kicks)
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.shape.rotate_cw();
        if self.board.collides(&rotated, active.x, active.y) {
            return false;
        }

        self.active = Some(ActivePiece {
            shape: rotated,
            ..active
        });
        true
    }

    /// One automatic step: fall one row, or lock if the piece cannot fall
    pub fn tick(&mut self) -> TickResult {
        if !self.is_running() {
            return TickResult {
                game_over: self.game_over(),
                ..TickResult::default()
            };
        }

        if self.move_by(0, 1) {
            return TickResult {
                moved: true,
                ..TickResult::default()
            };
        }

        let lock = self.lock();
        TickResult {
            moved: false,
            locked: lock.locked,
            game_over: lock.game_over,
            lock: Some(lock),
        }
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock(&mut self) -> LockResult {
        if !self.is_running() {
            return LockResult {
                game_over: self.game_over(),
                ..LockResult::default()
            };
        }
        let Some(active) = self.active.take() else {
            return LockResult::default();
        };

        let fully_visible = self
            .board
            .lock_piece(&active.shape, active.x, active.y, active.kind);

        if !fully_visible {
            self.status = Status::GameOver;
            info!(
                kind = active.kind.as_str(),
                y = active.y,
                score = self.score,
                "lock out, game over"
            );
            let result = LockResult {
                locked: true,
                game_over: true,
                ..LockResult::default()
            };
            self.last_event = Some(result);
            return result;
        }

        self.lines_stacked = self.lines_stacked.saturating_add(1);
        let interval_changed = self.update_drop_interval();

        let lines_cleared = self.board.clear_full_rows() as u32;
        let points = self.apply_line_clear(lines_cleared);
        debug!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            lines_cleared,
            "locked"
        );

        let spawned = self.spawn();
        let result = LockResult {
            locked: true,
            lines_cleared,
            points,
            interval_changed,
            game_over: !spawned,
        };
        self.last_event = Some(result);
        result
    }

    /// Recompute the drop interval; it only ever shrinks
    fn update_drop_interval(&mut self) -> bool {
        let interval = self.config.speed.interval_ms(self.lines_stacked);
        if interval >= self.drop_interval_ms {
            return false;
        }
        debug!(
            from = self.drop_interval_ms,
            to = interval,
            lines_stacked = self.lines_stacked,
            "drop interval lowered"
        );
        self.drop_interval_ms = interval;
        true
    }

    /// Award points for `lines` cleared by one lock and update the level
    fn apply_line_clear(&mut self, lines: u32) -> u32 {
        if lines == 0 {
            return 0;
        }

        let points = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self.lines_cleared.saturating_add(lines);

        let level = next_level(self.level, self.lines_cleared);
        info!(lines, points, score = self.score, "lines cleared");
        if level > self.level {
            info!(from = self.level, to = level, "level up");
            self.level = level;
        }
        points
    }

    /// Pause a running session
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.status = Status::Paused;
        debug!(status = self.status.as_str(), "paused");
        true
    }

    /// Resume a paused session
    pub fn resume(&mut self) -> bool {
        if self.status != Status::Paused {
            return false;
        }
        self.status = Status::Running;
        debug!(status = self.status.as_str(), "resumed");
        true
    }

    /// Pause when running, resume when paused; ignored after game over
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            Status::GameOver => false,
        }
    }

    /// Start a fresh playthrough with the same configuration.
    ///
    /// The generator keeps its RNG stream, so consecutive playthroughs see
    /// different piece sequences.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.rows, self.config.cols);
        self.active = None;
        self.generator.initialize();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.last_event = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines_cleared = 0;
        self.lines_stacked = 0;
        self.drop_interval_ms = self.config.initial_drop_interval_ms;
        self.status = Status::Running;
        info!(episode_id = self.episode_id, "session reset");
        self.spawn();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_by(-1, 0),
            GameAction::MoveRight => self.move_by(1, 0),
            GameAction::SoftDrop => self.move_by(0, 1),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Check if the active piece could move by (dx, dy) without moving it
    pub fn can_move(&self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match (active.x.checked_add(dx), active.y.checked_add(dy)) {
            (Some(x), Some(y)) => !self.board.collides(&active.shape, x, y),
            _ => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.rows = self.config.rows;
        out.cols = self.config.cols;
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.upcoming.clear();
        out.upcoming.extend_from_slice(self.generator.upcoming());
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.lines_stacked = self.lines_stacked;
        out.drop_interval_ms = self.drop_interval_ms;
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
