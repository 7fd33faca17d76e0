//! Loading session configuration from JSON

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::{Session, SessionConfig};

/// Parse and validate a JSON session configuration.
///
/// Missing fields take their defaults, so `{}` yields the standard game.
pub fn load_config(json: &str) -> Result<SessionConfig> {
    let config: SessionConfig =
        serde_json::from_str(json).context("failed to parse session config")?;
    config.validate().context("invalid session config")?;
    debug!(
        rows = config.rows,
        cols = config.cols,
        queue_len = config.queue_len,
        "session config loaded"
    );
    Ok(config)
}

/// Read a JSON session configuration from `path`
pub fn load_config_file(path: impl AsRef<Path>) -> Result<SessionConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    load_config(&text).with_context(|| format!("in config file {}", path.display()))
}

/// Build a session straight from JSON
pub fn session_from_json(json: &str) -> Result<Session> {
    let config = load_config(json)?;
    Ok(Session::new(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SpeedCurve;
    use crate::types::ShapeKind;

    #[test]
    fn test_empty_object_is_standard_game() {
        let config = load_config("{}").unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 10);
        assert_eq!(config.queue_len, 4);
        assert_eq!(config.speed, SpeedCurve::STANDARD);
    }

    #[test]
    fn test_partial_config() {
        let config =
            load_config(r#"{"rows": 12, "cols": 6, "shape_pool": ["o"], "seed": 4}"#).unwrap();
        assert_eq!((config.rows, config.cols), (12, 6));
        assert_eq!(config.shape_pool, vec![ShapeKind::O]);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_invalid_config_reports_cause() {
        let err = load_config(r#"{"queue_len": 0}"#).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("invalid session config"), "{}", chain);
        assert!(chain.contains("invalid_queue_len"), "{}", chain);
    }

    #[test]
    fn test_malformed_json() {
        let err = load_config("{rows: 3").unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse session config"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_file("/nonexistent/blockfall.json").unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_session_from_json() {
        let session = session_from_json(r#"{"seed": 11, "queue_len": 2}"#).unwrap();
        assert_eq!(session.upcoming().len(), 2);
        assert!(session.active().is_some());
    }
}
