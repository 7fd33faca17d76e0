//! Game clock - drives the automatic fall from elapsed wall time
//!
//! The clock owns no timer. The host calls [`GameClock::advance`] with the time
//! that passed since the previous call (one frame, one timer callback, ...) and
//! the clock runs one [`Session::tick`] per full period.
//!
//! Rescheduling follows the session: after every tick the clock re-reads the
//! drop interval and, when it shrank, restarts its period at the new length
//! from the instant of that tick. Time left over in the same `advance` call
//! counts toward the new period.
//!
//! Changes made to the session between calls are picked up at the start of
//! the next `advance`: a new episode (the session was reset) re-arms the clock
//! at the fresh interval, and an interval lowered by a lock outside the clock
//! becomes the new period.

use tracing::{debug, trace};

use crate::core::Session;
use crate::types::Status;

/// Summary of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReport {
    /// Automatic steps run
    pub ticks: u32,
    /// Pieces locked by those steps
    pub locks: u32,
    pub lines_cleared: u32,
    /// The period was shortened during this call
    pub rescheduled: bool,
    pub game_over: bool,
}

/// Elapsed-time driver for a session's automatic fall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    period_ms: u32,
    elapsed_ms: u32,
    armed: bool,
    /// Episode and drop interval of the session as last seen
    episode_id: Option<u32>,
    seen_interval_ms: Option<u32>,
}

impl GameClock {
    /// Armed clock with the given period
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            armed: true,
            episode_id: None,
            seen_interval_ms: None,
        }
    }

    /// Armed clock at the session's current drop interval
    pub fn for_session(session: &Session) -> Self {
        let mut clock = Self::new(session.drop_interval_ms());
        clock.observe(session);
        clock
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Time accumulated toward the next tick
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Time left until the next tick
    pub fn remaining_ms(&self) -> u32 {
        self.period_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Drop the pending period and stop ticking
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
    }

    /// Start a fresh period of `period_ms`
    pub fn restart(&mut self, period_ms: u32) {
        self.period_ms = period_ms.max(1);
        self.elapsed_ms = 0;
        self.armed = true;
    }

    /// Cancel the pending period, reset the session and re-arm at its
    /// initial interval
    pub fn reset(&mut self, session: &mut Session) {
        self.cancel();
        session.reset();
        self.restart(session.drop_interval_ms());
        self.observe(session);
        debug!(period_ms = self.period_ms, "clock restarted after reset");
    }

    fn observe(&mut self, session: &Session) {
        self.episode_id = Some(session.episode_id());
        self.seen_interval_ms = Some(session.drop_interval_ms());
    }

    /// Catch up with changes made to the session since the last call.
    ///
    /// Returns true when the period was changed.
    fn sync(&mut self, session: &Session) -> bool {
        let episode_id = session.episode_id();
        let interval = session.drop_interval_ms();

        let Some(seen_episode) = self.episode_id else {
            // First sight of this session: keep the configured period
            self.observe(session);
            return false;
        };

        if seen_episode != episode_id {
            debug!(episode_id, period_ms = interval, "clock re-armed for new episode");
            self.restart(interval);
            self.observe(session);
            return true;
        }

        if self.seen_interval_ms != Some(interval) {
            debug!(from = self.period_ms, to = interval, "clock follows session interval");
            self.period_ms = interval.max(1);
            self.seen_interval_ms = Some(interval);
            return true;
        }
        false
    }

    /// Feed `elapsed_ms` of wall time and run every tick that fell due.
    ///
    /// Paused sessions discard the time; a finished session disarms the clock.
    pub fn advance(&mut self, session: &mut Session, elapsed_ms: u32) -> ClockReport {
        let mut report = ClockReport {
            rescheduled: self.sync(session),
            ..ClockReport::default()
        };

        if !self.armed {
            report.game_over = session.game_over();
            return report;
        }

        match session.status() {
            Status::Paused => {
                self.elapsed_ms = 0;
                return report;
            }
            Status::GameOver => {
                self.cancel();
                report.game_over = true;
                return report;
            }
            Status::Running => {}
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;

            let tick = session.tick();
            report.ticks += 1;
            trace!(moved = tick.moved, locked = tick.locked, "clock tick");

            if let Some(lock) = tick.lock {
                report.locks += lock.locked as u32;
                report.lines_cleared += lock.lines_cleared;
            }

            if tick.game_over {
                self.cancel();
                report.game_over = true;
                break;
            }

            let interval = session.drop_interval_ms();
            if self.seen_interval_ms != Some(interval) {
                debug!(from = self.period_ms, to = interval, "clock rescheduled");
                self.period_ms = interval.max(1);
                self.seen_interval_ms = Some(interval);
                report.rescheduled = true;
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;
    use crate::types::ShapeKind;

    fn o_session() -> Session {
        Session::new(
            SessionConfig::default()
                .with_seed(3)
                .with_shape_pool(&[ShapeKind::O]),
        )
        .unwrap()
    }

    #[test]
    fn test_ticks_once_per_period() {
        let mut session = o_session();
        let mut clock = GameClock::for_session(&session);
        assert_eq!(clock.period_ms(), 2000);

        assert_eq!(clock.advance(&mut session, 1999).ticks, 0);
        assert_eq!(session.active().unwrap().y, 0);
        assert_eq!(clock.advance(&mut session, 1).ticks, 1);
        assert_eq!(session.active().unwrap().y, 1);

        let report = clock.advance(&mut session, 4500);
        assert_eq!(report.ticks, 2);
        assert_eq!(clock.elapsed_ms(), 500);
        assert_eq!(session.active().unwrap().y, 3);
    }

    #[test]
    fn test_paused_time_is_discarded() {
        let mut session = o_session();
        let mut clock = GameClock::for_session(&session);
        clock.advance(&mut session, 1500);
        session.pause();

        assert_eq!(clock.advance(&mut session, 10_000).ticks, 0);
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(session.active().unwrap().y, 0);

        session.resume();
        assert_eq!(clock.advance(&mut session, 1999).ticks, 0);
        assert_eq!(clock.advance(&mut session, 1).ticks, 1);
    }

    #[test]
    fn test_cancelled_clock_does_nothing() {
        let mut session = o_session();
        let mut clock = GameClock::for_session(&session);
        clock.cancel();
        assert!(!clock.is_armed());
        assert_eq!(clock.advance(&mut session, 100_000).ticks, 0);
        assert_eq!(session.active().unwrap().y, 0);
    }

    #[test]
    fn test_remaining_ms() {
        let mut session = o_session();
        let mut clock = GameClock::new(1000);
        clock.advance(&mut session, 300);
        assert_eq!(clock.remaining_ms(), 700);
    }
}
