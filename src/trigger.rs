//! Trigger configuration and the trigger registry

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::{FlashError, Result};
use crate::face::Face;
use crate::thing::{Thing, ThingKind};

/// Convert seconds to a duration, rejecting negative or non-finite values
pub fn duration_from_secs(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| FlashError::InvalidDuration(secs))
}

/// What to highlight when a watched command runs, and how
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    thing: Thing,
    width: Option<NonZeroUsize>,
    duration: Option<Duration>,
    face: Option<Face>,
}

impl TriggerConfig {
    /// Create a config for `thing` using the default duration and face
    pub fn new(thing: impl Into<Thing>) -> Self {
        Self {
            thing: thing.into(),
            width: None,
            duration: None,
            face: None,
        }
    }

    /// Builder: limit a line highlight to `width` characters
    pub fn with_width(mut self, width: usize) -> Result<Self> {
        let width = NonZeroUsize::new(width).ok_or(FlashError::InvalidWidth(width))?;
        if self.thing.kind() != Some(ThingKind::Line) {
            tracing::warn!(thing = ?self.thing, "width only applies to line highlights, ignoring");
        }
        self.width = Some(width);
        Ok(self)
    }

    /// Builder: highlight duration in seconds
    pub fn with_duration(mut self, secs: f64) -> Result<Self> {
        self.duration = Some(duration_from_secs(secs)?);
        Ok(self)
    }

    /// Builder: face to highlight with
    pub fn with_face(mut self, face: impl Into<Face>) -> Self {
        self.face = Some(face.into());
        self
    }

    pub fn thing(&self) -> &Thing {
        &self.thing
    }

    /// Width limit, only ever set together with a line thing
    pub fn width(&self) -> Option<NonZeroUsize> {
        match self.thing.kind() {
            Some(ThingKind::Line) => self.width,
            _ => None,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn face(&self) -> Option<&Face> {
        self.face.as_ref()
    }
}

/// Mapping from command name to trigger configuration
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: HashMap<String, TriggerConfig>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a config, replacing any previous one for the command
    pub fn insert(&mut self, command: impl Into<String>, config: TriggerConfig) -> Option<TriggerConfig> {
        self.triggers.insert(command.into(), config)
    }

    pub fn remove(&mut self, command: &str) -> Option<TriggerConfig> {
        self.triggers.remove(command)
    }

    pub fn get(&self, command: &str) -> Option<&TriggerConfig> {
        self.triggers.get(command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.triggers.contains_key(command)
    }

    /// Get all registered command names (sorted)
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.triggers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
