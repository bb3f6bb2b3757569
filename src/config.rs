//! Driver configuration, read once at startup from TOML.
//!
//! ```toml
//! stick_deadzone = 16000
//! trigger_threshold = 128
//! menu_cooldown_ticks = 60
//!
//! [buttons]
//! a = "A"
//! b = "B"
//! ```
//!
//! A missing file is not an error: the driver falls back to defaults so it
//! can always start.

use crate::error::DriverError;
use crate::hotkey::machine::{
    HotkeyThresholds, DEFAULT_MENU_COOLDOWN_TICKS, DEFAULT_STICK_DEADZONE,
    DEFAULT_TRIGGER_THRESHOLD,
};
use crate::mapping::ButtonMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    pub stick_deadzone: i16,
    pub trigger_threshold: u8,
    pub menu_cooldown_ticks: u32,
    /// Logical button name → physical button name
    pub buttons: BTreeMap<String, String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            stick_deadzone: DEFAULT_STICK_DEADZONE,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            menu_cooldown_ticks: DEFAULT_MENU_COOLDOWN_TICKS,
            buttons: BTreeMap::new(),
        }
    }
}

impl DriverConfig {
    /// `<config dir>/padshim/input.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padshim").join("input.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, DriverError> {
        if !path.exists() {
            warn!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| DriverError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded input config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, DriverError> {
        let config: DriverConfig = toml::from_str(content)?;
        config.validate()?;
        debug!("Parsed config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DriverError> {
        if self.stick_deadzone <= 0 {
            return Err(DriverError::InvalidConfig(format!(
                "stick_deadzone must be positive, got {}",
                self.stick_deadzone
            )));
        }
        if self.menu_cooldown_ticks == 0 {
            return Err(DriverError::InvalidConfig(
                "menu_cooldown_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> HotkeyThresholds {
        HotkeyThresholds {
            stick_deadzone: self.stick_deadzone,
            trigger_threshold: self.trigger_threshold,
            menu_cooldown_ticks: self.menu_cooldown_ticks,
        }
    }

    pub fn button_map(&self) -> Result<ButtonMap, DriverError> {
        ButtonMap::with_overrides(&self.buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PadButtons;
    use crate::mapping::LogicalButton;
    use std::io::Write;

    #[test]
    fn test_empty_toml_is_default() {
        let config = DriverConfig::from_toml("").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.thresholds(), HotkeyThresholds::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = DriverConfig::from_toml(
            r#"
            menu_cooldown_ticks = 30

            [buttons]
            a = "A"
            "#,
        )
        .unwrap();
        assert_eq!(config.menu_cooldown_ticks, 30);
        assert_eq!(config.stick_deadzone, DEFAULT_STICK_DEADZONE);
        let map = config.button_map().unwrap();
        assert_eq!(map.physical(LogicalButton::A), PadButtons::A);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DriverConfig::from_toml("stick_deadzone = 0"),
            Err(DriverError::InvalidConfig(_))
        ));
        assert!(matches!(
            DriverConfig::from_toml("menu_cooldown_ticks = 0"),
            Err(DriverError::InvalidConfig(_))
        ));
        assert!(matches!(
            DriverConfig::from_toml("stick_deadzone = \"wide\""),
            Err(DriverError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = DriverConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trigger_threshold = 64").unwrap();
        let config = DriverConfig::load(file.path()).unwrap();
        assert_eq!(config.trigger_threshold, 64);
    }

    #[test]
    fn test_toml_round_trip_keeps_bindings() {
        let mut config = DriverConfig::default();
        config.buttons.insert("select".to_string(), "LeftThumb".to_string());
        let text = toml::to_string(&config).unwrap();
        assert_eq!(DriverConfig::from_toml(&text).unwrap(), config);
    }
}
