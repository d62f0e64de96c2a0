//! Pending host signals, coalesced per background

use crate::event::SurfaceEvent;
use crate::scheduler::BackgroundId;

/// Signals received since the last frame.
///
/// A resize replaces an earlier pending resize of the same background as long
/// as nothing else for that background was queued after it, so a drag that
/// fires dozens of resizes between two frames re-seeds once at the final size.
/// Per-background order is preserved: a resize queued after an unmount stays
/// behind it.
#[derive(Debug, Default)]
pub struct SignalQueue {
    pending: Vec<SurfaceEvent>,
    coalesced: usize,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SurfaceEvent) {
        if let SurfaceEvent::Resized { id, size } = event {
            if let Some(SurfaceEvent::Resized { size: pending, .. }) = self.last_for_mut(id) {
                *pending = size;
                self.coalesced += 1;
                return;
            }
        }
        self.pending.push(event);
    }

    fn last_for_mut(&mut self, id: BackgroundId) -> Option<&mut SurfaceEvent> {
        self.pending.iter_mut().rev().find(|e| e.target() == id)
    }

    /// Take every pending signal in arrival order
    pub fn drain(&mut self) -> Vec<SurfaceEvent> {
        if self.coalesced > 0 {
            tracing::trace!("coalesced {} resize(s)", self.coalesced);
            self.coalesced = 0;
        }
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
