//! Session configuration.

use crate::camera::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
use serde::{Deserialize, Serialize};

/// Tunables for a [`SessionContext`](crate::session::SessionContext).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Smallest zoom factor a pinch can reach.
    pub min_scale: f64,
    /// Largest zoom factor a pinch can reach.
    pub max_scale: f64,
    /// Whether a single pointer lays down ink.
    pub draw_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            draw_enabled: true,
        }
    }
}

impl SessionConfig {
    /// Parse a config from JSON and normalise it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Replace unusable scale bounds with the defaults and order them.
    pub fn normalized(mut self) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(self.min_scale) {
            log::warn!("invalid min_scale {}, using {}", self.min_scale, DEFAULT_MIN_SCALE);
            self.min_scale = DEFAULT_MIN_SCALE;
        }
        if !usable(self.max_scale) {
            log::warn!("invalid max_scale {}, using {}", self.max_scale, DEFAULT_MAX_SCALE);
            self.max_scale = DEFAULT_MAX_SCALE;
        }
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{"max_scale": 4.0}"#).unwrap();
        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.max_scale, 4.0);
        assert!(config.draw_enabled);
    }

    #[test]
    fn test_invalid_bounds_normalized() {
        let config = SessionConfig::from_json(r#"{"min_scale": -1.0, "max_scale": 0.05}"#).unwrap();
        assert_eq!(config.min_scale, 0.05);
        assert_eq!(config.max_scale, DEFAULT_MIN_SCALE);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SessionConfig::from_json("{not json").is_err());
    }
}
