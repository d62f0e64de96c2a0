//! Host signals for mounted backgrounds

use crate::scheduler::BackgroundId;
use plexus_core::SurfaceSize;

/// A host signal targeting one background. Mounting is a direct call because
/// it hands over the surface; the remaining signals are queued and applied
/// between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface dimensions changed
    Resized { id: BackgroundId, size: SurfaceSize },
    /// The owning view is being removed
    Unmounted { id: BackgroundId },
}

impl SurfaceEvent {
    pub fn target(&self) -> BackgroundId {
        match self {
            SurfaceEvent::Resized { id, .. } | SurfaceEvent::Unmounted { id } => *id,
        }
    }
}
