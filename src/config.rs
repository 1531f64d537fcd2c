//! Persistent user preferences
//!
//! Saved to a small JSON file; missing or malformed files fall back to
//! defaults so the trainer always starts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::recording::RecordingPolicy;

/// Default location of the config file
pub const CONFIG_FILE: &str = "config/opener_trainer.json";

/// User preferences that survive between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub version: u32,
    /// Preview the upcoming opener action while recording
    pub ability_ants: bool,
    /// Seconds of countdown before the UI starts a recording
    pub countdown_time: u32,
    pub is_countdown_enabled: bool,
    /// Skip True North uses that are not part of the opener
    pub ignore_true_north: bool,
    /// Abort the recording on the first mismatching action
    pub stop_at_first_mistake: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ability_ants: true,
            countdown_time: 7,
            is_countdown_enabled: false,
            ignore_true_north: true,
            stop_at_first_mistake: false,
        }
    }
}

impl TrainerConfig {
    /// Load config from file, or return defaults if it is missing or broken
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Recording policy derived from the current preferences
    pub fn policy(&self) -> RecordingPolicy {
        RecordingPolicy {
            stop_at_first_mistake: self.stop_at_first_mistake,
            ignore_true_north: self.ignore_true_north,
            preview_upcoming: self.ability_ants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainerConfig::default();
        assert!(config.ability_ants);
        assert!(config.ignore_true_north);
        assert!(!config.stop_at_first_mistake);
        assert_eq!(config.countdown_time, 7);
    }

    #[test]
    fn test_policy_mapping() {
        let config = TrainerConfig {
            stop_at_first_mistake: true,
            ability_ants: false,
            ..TrainerConfig::default()
        };
        let policy = config.policy();
        assert!(policy.stop_at_first_mistake);
        assert!(policy.ignore_true_north);
        assert!(!policy.preview_upcoming);
    }

    #[test]
    fn test_roundtrip_and_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = TrainerConfig {
            stop_at_first_mistake: true,
            ..TrainerConfig::default()
        };
        config.save(&path).unwrap();
        assert!(TrainerConfig::load(&path).stop_at_first_mistake);

        fs::write(&path, "{broken").unwrap();
        assert!(!TrainerConfig::load(&path).stop_at_first_mistake);
        assert!(!TrainerConfig::load(&dir.path().join("missing.json")).stop_at_first_mistake);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"stop_at_first_mistake":true}"#).unwrap();

        let config = TrainerConfig::load(&path);
        assert!(config.stop_at_first_mistake);
        assert!(config.ability_ants, "unspecified fields keep defaults");
    }
}
