//! Configuration file support
//!
//! Loads settings from ~/.uemacs-flash.toml (or %USERPROFILE%\.uemacs-flash.toml
//! on Windows)
//!
//! Example:
//! ```toml
//! enabled = true
//! default-duration = 1.0
//! default-face = "hl-line"
//!
//! [[trigger]]
//! command = "forward-paragraph"
//! thing = "line"
//! width = 20
//! duration = 0.5
//! face = "highlight"
//! ```
//!
//! When no `[[trigger]]` is declared and `use-default-triggers` is left on,
//! a stock set of motion and mark commands is watched.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{FlashError, Result};
use crate::face::{Face, HL_LINE};
use crate::flash::DEFAULT_DURATION;
use crate::thing::ThingKind;
use crate::trigger::{duration_from_secs, TriggerConfig};

const CONFIG_FILE: &str = ".uemacs-flash.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Whether highlighting starts enabled
    pub enabled: bool,
    /// Seconds a highlight stays up when the trigger names no duration
    pub default_duration: f64,
    /// Face used when the trigger names none
    pub default_face: String,
    /// Watch the stock commands when no trigger is declared
    pub use_default_triggers: bool,
    #[serde(rename = "trigger")]
    pub triggers: Vec<TriggerEntry>,
}

/// One `[[trigger]]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TriggerEntry {
    pub command: String,
    #[serde(default = "default_thing")]
    pub thing: String,
    pub width: Option<usize>,
    pub duration: Option<f64>,
    pub face: Option<String>,
}

fn default_thing() -> String {
    ThingKind::Line.name().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_duration: DEFAULT_DURATION.as_secs_f64(),
            default_face: HL_LINE.to_string(),
            use_default_triggers: true,
            triggers: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load settings from the default location, falling back to defaults
    /// when there is no file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading settings");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn default_duration(&self) -> Result<Duration> {
        duration_from_secs(self.default_duration)
    }

    pub fn default_face(&self) -> Face {
        Face::new(self.default_face.as_str())
    }

    /// Validated trigger configs, or the stock table when none are declared
    pub fn trigger_configs(&self) -> Result<Vec<(String, TriggerConfig)>> {
        if self.triggers.is_empty() && self.use_default_triggers {
            return Ok(default_triggers());
        }

        self.triggers
            .iter()
            .map(|entry| Ok((entry.command.clone(), entry.to_config()?)))
            .collect()
    }
}

impl TriggerEntry {
    /// Build a validated config
    pub fn to_config(&self) -> Result<TriggerConfig> {
        let kind = ThingKind::from_name(&self.thing)
            .ok_or_else(|| FlashError::UnknownThing(self.thing.clone()))?;

        let mut config = TriggerConfig::new(kind);
        if let Some(width) = self.width {
            config = config.with_width(width)?;
        }
        if let Some(secs) = self.duration {
            config = config.with_duration(secs)?;
        }
        if let Some(face) = &self.face {
            config = config.with_face(face.as_str());
        }
        Ok(config)
    }
}

/// Stock triggers for the built-in motion and mark commands
pub fn default_triggers() -> Vec<(String, TriggerConfig)> {
    let table = [
        ("forward-paragraph", ThingKind::Line),
        ("backward-paragraph", ThingKind::Line),
        ("beginning-of-buffer", ThingKind::Line),
        ("end-of-buffer", ThingKind::Line),
        ("goto-line", ThingKind::Line),
        ("scroll-up", ThingKind::Window),
        ("scroll-down", ThingKind::Window),
        ("recenter", ThingKind::Window),
        ("mark-whole-buffer", ThingKind::Region),
        ("exchange-point-and-mark", ThingKind::Region),
        ("mark-word", ThingKind::Word),
    ];

    table
        .into_iter()
        .map(|(command, kind)| (command.to_string(), TriggerConfig::new(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_duration().unwrap(), DEFAULT_DURATION);
        assert_eq!(settings.default_face(), Face::default());

        let triggers = settings.trigger_configs().unwrap();
        assert_eq!(triggers.len(), default_triggers().len());
        assert!(triggers.iter().any(|(command, _)| command == "recenter"));
    }

    #[test]
    fn test_parse_triggers() {
        let settings = Settings::parse(
            r#"
            enabled = false
            default-duration = 0.25
            default-face = "highlight"

            [[trigger]]
            command = "next-line"
            width = 20
            duration = 0.5
            face = "success"

            [[trigger]]
            command = "mark-word"
            thing = "word"
            "#,
        )
        .unwrap();

        assert!(!settings.enabled);
        assert_eq!(settings.default_duration().unwrap(), Duration::from_millis(250));

        let triggers = settings.trigger_configs().unwrap();
        assert_eq!(triggers.len(), 2);

        let (command, config) = &triggers[0];
        assert_eq!(command, "next-line");
        assert_eq!(config.thing().kind(), Some(ThingKind::Line));
        assert_eq!(config.width().map(|w| w.get()), Some(20));
        assert_eq!(config.duration(), Some(Duration::from_millis(500)));
        assert_eq!(config.face(), Some(&Face::new("success")));

        assert_eq!(triggers[1].1.thing().kind(), Some(ThingKind::Word));
        assert_eq!(triggers[1].1.face(), None);
    }

    #[test]
    fn test_default_triggers_can_be_turned_off() {
        let settings = Settings::parse("use-default-triggers = false").unwrap();
        assert!(settings.trigger_configs().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_values() {
        let unknown = Settings::parse("[[trigger]]\ncommand = \"x\"\nthing = \"paragraph\"").unwrap();
        assert!(matches!(unknown.trigger_configs(), Err(FlashError::UnknownThing(_))));

        let zero_width = Settings::parse("[[trigger]]\ncommand = \"x\"\nwidth = 0").unwrap();
        assert!(matches!(zero_width.trigger_configs(), Err(FlashError::InvalidWidth(0))));

        let negative = Settings::parse("default-duration = -2.0").unwrap();
        assert!(matches!(negative.default_duration(), Err(FlashError::InvalidDuration(_))));

        assert!(matches!(Settings::parse("enabled = \"yes\""), Err(FlashError::Toml(_))));
        assert!(matches!(Settings::parse("colour = 1"), Err(FlashError::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        std::fs::write(&path, "default-duration = 3\n").unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.default_duration().unwrap(), Duration::from_secs(3));

        std::fs::write(&path, "default-duration = [").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(FlashError::Toml(_))));
    }
}
