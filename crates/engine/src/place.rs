use crate::core::Session;
use crate::types::LockResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Rotate the active piece `rotations` quarter turns clockwise, shift it to
/// column `target_x`, drop it and lock it.
///
/// Uses only the session's own moves, so it succeeds exactly when a player
/// could reach the placement by rotating first, then shifting, then dropping.
/// On failure the session is left as it was.
pub fn apply_place(
    session: &mut Session,
    target_x: i32,
    rotations: u8,
) -> Result<LockResult, PlaceError> {
    if !session.is_running() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(active) = session.active() else {
        return Err(PlaceError::NoActive);
    };

    let snapshot = session.clone();

    for _ in 0..rotations % 4 {
        if !session.rotate() {
            *session = snapshot;
            return Err(PlaceError::RotationBlocked);
        }
    }

    // Bounds are judged on the rotated piece
    let width = session.active().map_or(active.shape.cols(), |p| p.shape.cols());
    let right = target_x.checked_add(width as i32);
    if target_x < 0 || right.map_or(true, |r| r > session.board().width() as i32) {
        *session = snapshot;
        return Err(PlaceError::XOutOfBounds);
    }

    while let Some(current) = session.active() {
        let dx = (target_x - current.x).signum();
        if dx == 0 {
            break;
        }
        if !session.move_by(dx, 0) {
            *session = snapshot;
            return Err(PlaceError::XBlocked);
        }
    }

    while session.move_by(0, 1) {}
    Ok(session.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;
    use crate::types::ShapeKind;

    fn session_with(kind: ShapeKind) -> Session {
        Session::new(
            SessionConfig::default()
                .with_seed(9)
                .with_shape_pool(&[kind]),
        )
        .unwrap()
    }

    #[test]
    fn test_place_vertical_i_at_left_wall() {
        let mut session = session_with(ShapeKind::I);
        let result = apply_place(&mut session, 0, 1).unwrap();
        assert!(result.locked);
        for y in 16..20 {
            assert!(session.board().is_occupied(0, y));
        }
    }

    #[test]
    fn test_place_out_of_bounds_restores_session() {
        let mut session = session_with(ShapeKind::I);
        let before = session.snapshot();
        assert_eq!(apply_place(&mut session, 7, 0), Err(PlaceError::XOutOfBounds));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_place_rejected_when_paused() {
        let mut session = session_with(ShapeKind::O);
        session.pause();
        assert_eq!(apply_place(&mut session, 0, 0), Err(PlaceError::NotPlayable));
    }
}
