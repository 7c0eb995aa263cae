//! Session tuning knobs.
//!
//! Every field has a default, so a partial JSON document only overrides what it names.

use desktop_app_contract::AppId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WindowPosition, WindowSize, INITIAL_Z_INDEX};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid session config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cascade wrap counts must be non-zero")]
    ZeroCascadeWrap,
    #[error("fallback window size must be positive")]
    InvalidFallbackSize,
}

/// Default placement for windows opened without an explicit position.
///
/// Each new window is shifted by `step` from the previous one; the horizontal and vertical
/// offsets wrap independently after `wrap_x` and `wrap_y` windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub origin: WindowPosition,
    pub step: i32,
    pub wrap_x: u32,
    pub wrap_y: u32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            origin: WindowPosition { x: 50, y: 50 },
            step: 25,
            wrap_x: 7,
            wrap_y: 5,
        }
    }
}

impl CascadeConfig {
    pub fn position_for(&self, window_count: usize) -> WindowPosition {
        let count = u64::try_from(window_count).unwrap_or(u64::MAX);
        let slot_x = count % u64::from(self.wrap_x.max(1));
        let slot_y = count % u64::from(self.wrap_y.max(1));
        // Slots are bounded by the u32 wrap counts.
        let dx = i32::try_from(slot_x).unwrap_or(i32::MAX).saturating_mul(self.step);
        let dy = i32::try_from(slot_y).unwrap_or(i32::MAX).saturating_mul(self.step);
        self.origin.offset(dx, dy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// First z-index handed out by a fresh session.
    pub initial_z_index: u64,
    pub cascade: CascadeConfig,
    /// Size used when neither the request nor the app descriptor provides one.
    pub fallback_size: WindowSize,
    /// Identity shown in the menu bar while no window is focused.
    pub shell_app: AppId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_z_index: INITIAL_Z_INDEX,
            cascade: CascadeConfig::default(),
            fallback_size: WindowSize::default(),
            shell_app: AppId::Finder,
        }
    }
}

impl SessionConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cascade.wrap_x == 0 || self.cascade.wrap_y == 0 {
            return Err(ConfigError::ZeroCascadeWrap);
        }
        if !self.fallback_size.is_positive() {
            return Err(ConfigError::InvalidFallbackSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cascade_offsets_wrap_independently() {
        let cascade = CascadeConfig::default();
        assert_eq!(cascade.position_for(0), WindowPosition { x: 50, y: 50 });
        assert_eq!(cascade.position_for(1), WindowPosition { x: 75, y: 75 });
        assert_eq!(cascade.position_for(5), WindowPosition { x: 175, y: 50 });
        assert_eq!(cascade.position_for(7), WindowPosition { x: 50, y: 100 });
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let raw = r#"{ "initial_z_index": 100, "shell_app": "terminal" }"#;
        let config = SessionConfig::from_json(raw).expect("parse config");
        assert_eq!(config.initial_z_index, 100);
        assert_eq!(config.shell_app, AppId::Terminal);
        assert_eq!(config.cascade, CascadeConfig::default());
        assert_eq!(config.fallback_size, WindowSize::default());
    }

    #[test]
    fn zero_wrap_is_rejected() {
        let err = SessionConfig::from_json(r#"{ "cascade": { "wrap_x": 0 } }"#)
            .expect_err("zero wrap");
        assert!(matches!(err, ConfigError::ZeroCascadeWrap));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SessionConfig::from_json("{ not json").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
