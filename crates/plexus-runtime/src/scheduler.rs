//! Cooperative "run on next frame" scheduling

use std::fmt;

/// Identifies one mounted background within a host
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackgroundId(pub u32);

impl fmt::Display for BackgroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bg#{}", self.0)
    }
}

/// Token for one pending frame request. Not `Clone`: whoever holds it is the
/// only party able to cancel the request.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    request: u64,
    owner: BackgroundId,
}

impl AnimationHandle {
    /// For scheduler implementations; hosts hand these out from `request_frame`
    pub fn new(request: u64, owner: BackgroundId) -> Self {
        Self { request, owner }
    }

    pub fn request(&self) -> u64 {
        self.request
    }

    pub fn owner(&self) -> BackgroundId {
        self.owner
    }
}

/// The host's frame primitive (a browser's animation-frame callback, a window
/// redraw request, or [`FrameQueue`] for headless use)
pub trait FrameScheduler {
    /// Ask for `owner` to be ticked on the next frame
    fn request_frame(&mut self, owner: BackgroundId) -> AnimationHandle;

    /// Withdraw a request. A cancelled request is never delivered.
    fn cancel_frame(&mut self, handle: AnimationHandle);
}

/// In-process frame scheduler: requests made during frame N are delivered on
/// frame N + 1, in the order they were made.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<(u64, BackgroundId)>,
    next_request: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every owner due this frame
    pub fn take_due(&mut self) -> Vec<BackgroundId> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(_, owner)| owner)
            .collect()
    }

    pub fn is_scheduled(&self, owner: BackgroundId) -> bool {
        self.pending.iter().any(|&(_, o)| o == owner)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, owner: BackgroundId) -> AnimationHandle {
        let request = self.next_request;
        self.next_request += 1;
        self.pending.push((request, owner));
        AnimationHandle::new(request, owner)
    }

    fn cancel_frame(&mut self, handle: AnimationHandle) {
        self.pending.retain(|&(request, _)| request != handle.request());
    }
}
