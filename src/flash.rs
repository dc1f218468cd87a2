//! Trigger registration and global enable/disable
//!
//! [`Flash`] is the public face of the engine. It owns the trigger registry
//! and the active highlight (shared with the hooks it installs) plus the
//! interception handle table, and it is the only way to mutate any of them.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Duration;

use crate::config::Settings;
use crate::error::Result;
use crate::face::Face;
use crate::highlight::{ActiveHighlight, Highlighter};
use crate::host::{Host, OverlayId, TimerCallback};
use crate::intercept::Interceptor;
use crate::thing;
use crate::trigger::{duration_from_secs, TriggerConfig, TriggerRegistry};

/// Default highlight duration
pub const DEFAULT_DURATION: Duration = Duration::from_secs(1);

/// State reachable from installed hooks and removal timers
#[derive(Debug)]
pub(crate) struct FlashState {
    pub registry: TriggerRegistry,
    pub highlighter: Highlighter,
    pub default_duration: Duration,
    pub default_face: Face,
}

pub(crate) type SharedState = Rc<RefCell<FlashState>>;

/// Transient highlighting driven by command execution
pub struct Flash {
    state: SharedState,
    interceptor: Interceptor,
    enabled: bool,
}

impl Flash {
    /// Create an enabled engine with no triggers and the stock defaults
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_DURATION, Face::default())
    }

    pub fn with_defaults(default_duration: Duration, default_face: Face) -> Self {
        Self {
            state: Rc::new(RefCell::new(FlashState {
                registry: TriggerRegistry::new(),
                highlighter: Highlighter::new(),
                default_duration,
                default_face,
            })),
            interceptor: Interceptor::new(),
            enabled: true,
        }
    }

    /// Build an engine from loaded settings, registering their triggers
    pub fn from_settings(host: &mut dyn Host, settings: &Settings) -> Result<Self> {
        let mut flash = Self::with_defaults(settings.default_duration()?, settings.default_face());
        flash.enabled = settings.enabled;
        flash.register_many(host, settings.trigger_configs()?);
        Ok(flash)
    }

    pub fn default_duration(&self) -> Duration {
        self.state.borrow().default_duration
    }

    /// Set the duration used by triggers that don't name one
    pub fn set_default_duration(&mut self, secs: f64) -> Result<()> {
        let duration = duration_from_secs(secs)?;
        self.state.borrow_mut().default_duration = duration;
        Ok(())
    }

    pub fn default_face(&self) -> Face {
        self.state.borrow().default_face.clone()
    }

    /// Set the face used by triggers that don't name one
    pub fn set_default_face(&mut self, face: impl Into<Face>) {
        self.state.borrow_mut().default_face = face.into();
    }

    /// Watch `command`, replacing any earlier config for it
    pub fn register(&mut self, host: &mut dyn Host, command: impl Into<String>, config: TriggerConfig) {
        let command = command.into();
        self.sweep_stale_handles(host);
        self.state.borrow_mut().registry.insert(command.clone(), config);
        tracing::debug!(%command, "trigger registered");

        if self.enabled {
            self.interceptor.install(&command, &self.state, host);
        }
    }

    /// Register every pair, then (re-)enable watching for all triggers
    pub fn register_many<I, S>(&mut self, host: &mut dyn Host, triggers: I)
    where
        I: IntoIterator<Item = (S, TriggerConfig)>,
        S: Into<String>,
    {
        for (command, config) in triggers {
            self.register(host, command, config);
        }
        self.enable_all(host);
    }

    /// Stop watching `command`; no-op if it was never registered
    pub fn unregister(&mut self, host: &mut dyn Host, command: &str) {
        if self.state.borrow_mut().registry.remove(command).is_some() {
            tracing::debug!(%command, "trigger removed");
        }
        self.interceptor.remove(command, host);
    }

    pub fn unregister_many<I, S>(&mut self, host: &mut dyn Host, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for command in commands {
            self.unregister(host, command.as_ref());
        }
    }

    /// Config registered for `command`
    pub fn lookup(&self, command: &str) -> Option<TriggerConfig> {
        self.state.borrow().registry.get(command).cloned()
    }

    /// All registered command names (sorted)
    pub fn commands(&self) -> Vec<String> {
        self.state.borrow().registry.command_names()
    }

    /// Install handles for every registered command that is currently
    /// callable. Commands that aren't callable yet are picked up by a later
    /// call. Does nothing while disabled.
    pub fn enable_all(&mut self, host: &mut dyn Host) {
        if !self.enabled {
            return;
        }
        let commands = self.commands();
        self.interceptor.enable_all(&commands, &self.state, host);
    }

    /// Global toggle: enabling watches every registered command, disabling
    /// removes every handle and any active highlight
    pub fn set_enabled(&mut self, host: &mut dyn Host, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            tracing::debug!("highlighting enabled");
            self.enable_all(host);
        } else {
            tracing::debug!("highlighting disabled");
            self.interceptor.remove_all(host);
            self.state.borrow_mut().highlighter.clear(host);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a handle is installed for `command`
    pub fn is_watching(&self, command: &str) -> bool {
        self.interceptor.is_watching(command)
    }

    pub fn watched_commands(&self) -> Vec<String> {
        self.interceptor.watched()
    }

    pub fn active_highlight(&self) -> Option<ActiveHighlight> {
        self.state.borrow().highlighter.active().cloned()
    }

    /// Highlight per `config` right now, as if a watched command had run.
    /// Returns whether a highlight was shown.
    pub fn flash(&mut self, host: &mut dyn Host, config: &TriggerConfig) -> bool {
        highlight_guarded(&self.state, config, host)
    }

    fn sweep_stale_handles(&mut self, host: &mut dyn Host) {
        let state = self.state.borrow();
        self.interceptor.sweep_stale(&state.registry, host);
    }
}

impl Default for Flash {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point of installed hooks: highlight for `command` if it is still
/// registered. Never panics or fails outward.
pub(crate) fn fire(state: &SharedState, command: &str, host: &mut dyn Host) {
    let config = match state.try_borrow() {
        Ok(inner) => inner.registry.get(command).cloned(),
        Err(_) => {
            tracing::warn!(%command, "highlight state busy, skipping trigger");
            return;
        }
    };

    match config {
        Some(config) => {
            tracing::trace!(%command, "trigger fired");
            highlight_guarded(state, &config, host);
        }
        None => tracing::trace!(%command, "trigger fired for unregistered command"),
    }
}

fn highlight_guarded(state: &SharedState, config: &TriggerConfig, host: &mut dyn Host) -> bool {
    let mut inner = match state.try_borrow_mut() {
        Ok(inner) => inner,
        Err(_) => {
            tracing::warn!("highlight state busy, skipping highlight");
            return false;
        }
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| highlight(state, &mut inner, config, host)));
    match outcome {
        Ok(shown) => shown,
        Err(_) => {
            tracing::warn!(thing = ?config.thing(), "region resolution failed, no highlight");
            false
        }
    }
}

fn highlight(state: &SharedState, inner: &mut FlashState, config: &TriggerConfig, host: &mut dyn Host) -> bool {
    let region = match thing::resolve(config.thing(), config.width(), &*host) {
        Some(region) => region,
        None => {
            tracing::trace!(thing = ?config.thing(), "no region");
            return false;
        }
    };

    let face = config
        .face()
        .cloned()
        .unwrap_or_else(|| inner.default_face.clone());
    let duration = config.duration().unwrap_or(inner.default_duration);

    let weak = Rc::downgrade(state);
    let shown: Rc<Cell<Option<OverlayId>>> = Rc::new(Cell::new(None));
    let overlay = Rc::clone(&shown);
    let on_expire: TimerCallback = Box::new(move |host: &mut dyn Host| match weak.upgrade() {
        Some(state) => match state.try_borrow_mut() {
            Ok(mut inner) => inner.highlighter.expire(host),
            Err(_) => tracing::warn!("highlight state busy, removal skipped"),
        },
        // Engine dropped; the timer is the overlay's last owner
        None => {
            if let Some(id) = overlay.get() {
                host.remove_overlay(id);
                tracing::debug!("orphaned highlight removed");
            }
        }
    });

    shown.set(Some(inner.highlighter.show(host, region, face, duration, on_expire)));
    true
}
