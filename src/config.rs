//! Configuration loader and validator
//!
//! Loads bridge settings from TOML files in the configs/ directory.

use crate::controller::TriggerThresholds;
use crate::sdk::SessionConfig;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bridge settings
    #[serde(default)]
    pub settings: Settings,

    /// Parameters handed to the vendor session on start
    #[serde(default)]
    pub session: SessionSettings,

    /// Deferred placement settings
    #[serde(default)]
    pub placement: PlacementSettings,
}

/// Bridge settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Trigger value that must be exceeded to raise select down
    #[serde(default = "default_press_threshold")]
    pub trigger_press_threshold: f32,

    /// Trigger value that must be undercut to raise select up
    #[serde(default = "default_release_threshold")]
    pub trigger_release_threshold: f32,

    /// Pointers requested per controller (used by the in-crate sinks)
    #[serde(default = "default_pointers")]
    pub pointers_per_controller: usize,

    /// Capacity of the event channel of the channel sink
    #[serde(default = "default_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Pause between replayed ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trigger_press_threshold: default_press_threshold(),
            trigger_release_threshold: default_release_threshold(),
            pointers_per_controller: default_pointers(),
            event_channel_capacity: default_channel_capacity(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

fn default_press_threshold() -> f32 { crate::controller::trigger::DEFAULT_PRESS_THRESHOLD }
fn default_release_threshold() -> f32 { crate::controller::trigger::DEFAULT_RELEASE_THRESHOLD }
fn default_pointers() -> usize { 2 }
fn default_channel_capacity() -> usize { 256 }
fn default_tick_interval() -> u64 { 16 }

/// Vendor session start parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_sdk_down")]
    pub trigger_down_threshold: f32,

    #[serde(default = "default_sdk_up")]
    pub trigger_up_threshold: f32,

    #[serde(default = "default_true")]
    pub request_cfuid: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            trigger_down_threshold: default_sdk_down(),
            trigger_up_threshold: default_sdk_up(),
            request_cfuid: true,
        }
    }
}

fn default_sdk_down() -> f32 { SessionConfig::default().trigger_down_threshold }
fn default_sdk_up() -> f32 { SessionConfig::default().trigger_up_threshold }
fn default_true() -> bool { true }

/// Deferred placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSettings {
    /// Delay before the camera pose is trusted
    #[serde(default = "default_placement_delay")]
    pub delay_ms: u64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self { delay_ms: default_placement_delay() }
    }
}

fn default_placement_delay() -> u64 { 300 }

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        info!("Loading configuration from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        let config = Self::parse(&content)?;

        info!("✓ Config parsed successfully");
        debug!(
            "  - Trigger thresholds: press {} / release {}",
            config.settings.trigger_press_threshold, config.settings.trigger_release_threshold
        );
        debug!("  - Pointers per controller: {}", config.settings.pointers_per_controller);

        Ok(config)
    }

    /// Load default configuration from configs/default.toml
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("configs/default.toml")
    }

    /// Parse and validate configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let press = self.settings.trigger_press_threshold;
        let release = self.settings.trigger_release_threshold;

        if !(0.0..=1.0).contains(&press) {
            return Err(ConfigError::Invalid(
                "trigger_press_threshold must be between 0.0 and 1.0".into(),
            ));
        }

        if !(0.0..=1.0).contains(&release) {
            return Err(ConfigError::Invalid(
                "trigger_release_threshold must be between 0.0 and 1.0".into(),
            ));
        }

        if release >= press {
            return Err(ConfigError::Invalid(format!(
                "trigger_release_threshold ({}) must be below trigger_press_threshold ({})",
                release, press
            )));
        }

        if self.settings.event_channel_capacity == 0 {
            return Err(ConfigError::Invalid("event_channel_capacity must be positive".into()));
        }

        let sdk = &self.session;
        if !(0.0..=1.0).contains(&sdk.trigger_down_threshold) || !(0.0..=1.0).contains(&sdk.trigger_up_threshold) {
            return Err(ConfigError::Invalid(
                "session trigger thresholds must be between 0.0 and 1.0".into(),
            ));
        }

        Ok(())
    }

    pub fn trigger_thresholds(&self) -> TriggerThresholds {
        TriggerThresholds {
            press: self.settings.trigger_press_threshold,
            release: self.settings.trigger_release_threshold,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            trigger_down_threshold: self.session.trigger_down_threshold,
            trigger_up_threshold: self.session.trigger_up_threshold,
            request_cfuid: self.session.request_cfuid,
        }
    }

    pub fn placement_delay(&self) -> Duration {
        Duration::from_millis(self.placement.delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.settings.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = Config::default();
        assert_eq!(config.settings.trigger_press_threshold, 0.2);
        assert_eq!(config.settings.trigger_release_threshold, 0.15);
        assert_eq!(config.settings.pointers_per_controller, 2);
        assert!(config.session.request_cfuid);
        assert_eq!(config.placement_delay(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [settings]
            trigger_press_threshold = 0.5
            trigger_release_threshold = 0.3

            [placement]
            delay_ms = 0
            "#,
        )
        .unwrap();

        let thresholds = config.trigger_thresholds();
        assert_eq!(thresholds.press, 0.5);
        assert_eq!(thresholds.release, 0.3);
        assert_eq!(config.placement_delay(), Duration::ZERO);
        assert_eq!(config.settings.event_channel_capacity, 256);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.settings.trigger_release_threshold = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.settings.trigger_release_threshold = 0.25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let mut config = Config::default();
        config.settings.trigger_press_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.trigger_up_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_config() {
        assert!(matches!(Config::parse("settings = 3"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_session_config_mapping() {
        let mut config = Config::default();
        config.session.request_cfuid = false;
        let session = config.session_config();
        assert!(!session.request_cfuid);
        assert_eq!(session.trigger_down_threshold, SessionConfig::default().trigger_down_threshold);
    }
}
