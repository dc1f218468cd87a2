//! Highlight lifecycle
//!
//! At most one highlight is ever displayed. Showing a new one first tears
//! down the previous one, cancelling its removal timer so a stale timer can
//! never delete the newer overlay.

use std::time::Duration;

use crate::face::Face;
use crate::host::{Host, OverlayId, TimerCallback, TimerId};
use crate::region::Region;

/// The single highlight currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveHighlight {
    pub region: Region,
    pub face: Face,
    pub overlay: OverlayId,
    pub timer: TimerId,
}

/// Owner of the active highlight (Idle when `active` is None)
#[derive(Debug, Default)]
pub struct Highlighter {
    active: Option<ActiveHighlight>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveHighlight> {
        self.active.as_ref()
    }

    pub fn is_highlighting(&self) -> bool {
        self.active.is_some()
    }

    /// Replace whatever is displayed with `region`, removed after `duration`
    /// by running `on_expire`. Returns the new overlay.
    ///
    /// The timer is scheduled before the overlay exists, so a host that
    /// fails while scheduling leaves nothing on screen.
    pub fn show(
        &mut self,
        host: &mut dyn Host,
        region: Region,
        face: Face,
        duration: Duration,
        on_expire: TimerCallback,
    ) -> OverlayId {
        self.clear(host);

        let timer = host.schedule(duration, on_expire);
        let overlay = host.add_overlay(region, &face);
        tracing::debug!(%region, %face, ?duration, "highlight shown");

        self.active = Some(ActiveHighlight {
            region,
            face,
            overlay,
            timer,
        });
        overlay
    }

    /// The removal timer fired: drop the overlay without touching timers
    pub fn expire(&mut self, host: &mut dyn Host) {
        if let Some(active) = self.active.take() {
            host.remove_overlay(active.overlay);
            tracing::debug!(region = %active.region, "highlight expired");
        }
    }

    /// Cancel the pending timer and remove the overlay, if any
    pub fn clear(&mut self, host: &mut dyn Host) {
        if let Some(active) = self.active.take() {
            host.cancel(active.timer);
            host.remove_overlay(active.overlay);
            tracing::debug!(region = %active.region, "highlight cleared");
        }
    }
}
