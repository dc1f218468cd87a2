//! Interception handles
//!
//! Bridges the trigger registry and the host's after-hook mechanism. At most
//! one hook is ever installed per command; every install and removal goes
//! through [`Interceptor`].

use std::collections::HashMap;
use std::rc::Rc;

use crate::flash::{self, SharedState};
use crate::host::{AfterHook, HookId, Host};
use crate::trigger::TriggerRegistry;

/// Table of installed hooks, keyed by command name
#[derive(Debug, Default)]
pub struct Interceptor {
    handles: HashMap<String, HookId>,
}

impl Interceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a hook is installed for every command that is callable now
    pub(crate) fn enable_all(&mut self, commands: &[String], state: &SharedState, host: &mut dyn Host) {
        for command in commands {
            self.install(command, state, host);
        }
    }

    /// Install the hook for `command`.
    ///
    /// Returns whether a hook is in place afterwards. Already watched
    /// commands are left alone; commands the host can't run yet are skipped
    /// until the next attempt.
    pub(crate) fn install(&mut self, command: &str, state: &SharedState, host: &mut dyn Host) -> bool {
        if self.handles.contains_key(command) {
            return true;
        }
        if !host.is_callable(command) {
            tracing::debug!(%command, "not callable yet, deferring");
            return false;
        }

        let weak = Rc::downgrade(state);
        let name = command.to_string();
        let hook: AfterHook = Rc::new(move |host: &mut dyn Host| {
            if let Some(state) = weak.upgrade() {
                flash::fire(&state, &name, host);
            }
        });

        let id = host.add_after_hook(command, hook);
        self.handles.insert(command.to_string(), id);
        tracing::debug!(%command, hook = id.0, "hook installed");
        true
    }

    /// Uninstall the hook for `command`, if any
    pub fn remove(&mut self, command: &str, host: &mut dyn Host) {
        if let Some(id) = self.handles.remove(command) {
            host.remove_after_hook(command, id);
            tracing::debug!(%command, hook = id.0, "hook removed");
        }
    }

    /// Uninstall every hook
    pub fn remove_all(&mut self, host: &mut dyn Host) {
        for (command, id) in self.handles.drain() {
            host.remove_after_hook(&command, id);
        }
    }

    /// Uninstall hooks whose command is no longer registered
    pub fn sweep_stale(&mut self, registry: &TriggerRegistry, host: &mut dyn Host) {
        let stale: Vec<String> = self
            .handles
            .keys()
            .filter(|command| !registry.contains(command))
            .cloned()
            .collect();

        for command in stale {
            tracing::debug!(%command, "sweeping stale hook");
            self.remove(&command, host);
        }
    }

    pub fn is_watching(&self, command: &str) -> bool {
        self.handles.contains_key(command)
    }

    /// Get all watched command names (sorted)
    pub fn watched(&self) -> Vec<String> {
        let mut names: Vec<_> = self.handles.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    use crate::editor::Editor;
    use crate::face::Face;
    use crate::flash::FlashState;
    use crate::highlight::Highlighter;
    use crate::thing::ThingKind;
    use crate::trigger::TriggerConfig;

    fn state_with(commands: &[&str]) -> SharedState {
        let mut registry = TriggerRegistry::new();
        for command in commands {
            registry.insert(*command, TriggerConfig::new(ThingKind::Line));
        }
        Rc::new(RefCell::new(FlashState {
            registry,
            highlighter: Highlighter::new(),
            default_duration: Duration::from_secs(1),
            default_face: Face::default(),
        }))
    }

    #[test]
    fn test_install_is_idempotent() {
        let mut editor = Editor::from_text("text");
        let state = state_with(&["next-line"]);
        let mut interceptor = Interceptor::new();

        assert!(interceptor.install("next-line", &state, &mut editor));
        assert!(interceptor.install("next-line", &state, &mut editor));

        assert_eq!(interceptor.len(), 1);
        assert_eq!(editor.hook_count("next-line"), 1);
    }

    #[test]
    fn test_install_skips_unknown_command() {
        let mut editor = Editor::from_text("text");
        let state = state_with(&["no-such-command"]);
        let mut interceptor = Interceptor::new();

        assert!(!interceptor.install("no-such-command", &state, &mut editor));
        assert!(interceptor.is_empty());
    }

    #[test]
    fn test_remove_and_remove_all() {
        let mut editor = Editor::from_text("text");
        let state = state_with(&["next-line", "previous-line", "forward-word"]);
        let mut interceptor = Interceptor::new();
        let commands = state.borrow().registry.command_names();
        interceptor.enable_all(&commands, &state, &mut editor);
        assert_eq!(interceptor.len(), 3);

        interceptor.remove("next-line", &mut editor);
        interceptor.remove("next-line", &mut editor);
        assert_eq!(editor.hook_count("next-line"), 0);
        assert_eq!(interceptor.watched(), vec!["forward-word", "previous-line"]);

        interceptor.remove_all(&mut editor);
        assert!(interceptor.is_empty());
        assert_eq!(editor.hook_count("previous-line"), 0);
        assert_eq!(editor.hook_count("forward-word"), 0);
    }

    #[test]
    fn test_sweep_removes_unregistered() {
        let mut editor = Editor::from_text("text");
        let state = state_with(&["next-line", "previous-line"]);
        let mut interceptor = Interceptor::new();
        let commands = state.borrow().registry.command_names();
        interceptor.enable_all(&commands, &state, &mut editor);

        state.borrow_mut().registry.remove("previous-line");
        interceptor.sweep_stale(&state.borrow().registry, &mut editor);

        assert_eq!(interceptor.watched(), vec!["next-line"]);
        assert_eq!(editor.hook_count("previous-line"), 0);
        assert_eq!(editor.hook_count("next-line"), 1);
    }

    #[test]
    fn test_handles_match_registry_after_mixed_operations() {
        let mut editor = Editor::from_text("one\ntwo\nthree");
        let state = state_with(&[]);
        let mut interceptor = Interceptor::new();
        let ops: [(&str, bool); 7] = [
            ("next-line", true),
            ("forward-word", true),
            ("not-a-command", true),
            ("next-line", false),
            ("previous-line", true),
            ("forward-word", true),
            ("previous-line", false),
        ];

        for (command, add) in ops {
            if add {
                state
                    .borrow_mut()
                    .registry
                    .insert(command, TriggerConfig::new(ThingKind::Line));
            } else {
                state.borrow_mut().registry.remove(command);
            }
            interceptor.sweep_stale(&state.borrow().registry, &mut editor);
            let commands = state.borrow().registry.command_names();
            interceptor.enable_all(&commands, &state, &mut editor);

            for name in ["next-line", "previous-line", "forward-word", "not-a-command"] {
                let expected = state.borrow().registry.contains(name) && editor.has_command(name);
                assert_eq!(interceptor.is_watching(name), expected, "{}", name);
                assert_eq!(editor.hook_count(name), usize::from(expected), "{}", name);
            }
        }
    }
}
