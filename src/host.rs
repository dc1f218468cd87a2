//! Host editor capabilities
//!
//! The highlight engine never touches a buffer, a terminal or an event loop
//! directly. Everything it needs from the editor is expressed as one of the
//! traits below, and [`Host`] bundles them for the callbacks the engine hands
//! back to the editor.

use std::rc::Rc;
use std::time::Duration;

use crate::face::Face;
use crate::region::Region;
use crate::thing::ThingKind;

/// Identity of an installed after-hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(pub u64);

/// Identity of a displayed overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Identity of a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Callback run after a watched command completes successfully
pub type AfterHook = Rc<dyn Fn(&mut dyn Host)>;

/// One-shot callback run when a timer fires
pub type TimerCallback = Box<dyn FnOnce(&mut dyn Host)>;

/// Cursor, selection and viewport queries
pub trait EditorContext {
    /// Bounds of the active selection, if any
    fn selection(&self) -> Option<Region>;

    /// Visible range of the current window
    fn visible_range(&self) -> Region;

    /// Index and text of the line holding the cursor
    fn current_line(&self) -> (usize, &str);

    /// Bounds of the syntactic unit of `kind` at the cursor
    fn bounds_of_thing_at_point(&self, kind: ThingKind) -> Option<Region>;
}

/// Styled-region display
pub trait OverlayHost {
    fn add_overlay(&mut self, region: Region, face: &Face) -> OverlayId;

    /// Removing an unknown overlay is a no-op
    fn remove_overlay(&mut self, id: OverlayId);
}

/// Cancellable one-shot delayed callbacks
pub trait TimerHost {
    fn schedule(&mut self, after: Duration, callback: TimerCallback) -> TimerId;

    /// Cancelling a fired or unknown timer is a no-op
    fn cancel(&mut self, id: TimerId);
}

/// Post-execution interception of named commands
pub trait InterceptionHost {
    /// Whether `name` currently resolves to something that can run
    fn is_callable(&self, name: &str) -> bool;

    fn add_after_hook(&mut self, name: &str, hook: AfterHook) -> HookId;

    /// Removing an unknown hook is a no-op
    fn remove_after_hook(&mut self, name: &str, id: HookId);
}

/// Everything the engine consumes from the editor
pub trait Host: EditorContext + OverlayHost + TimerHost + InterceptionHost {}

impl<T: EditorContext + OverlayHost + TimerHost + InterceptionHost> Host for T {}
