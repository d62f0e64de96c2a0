//! Hosts several independent backgrounds on one frame queue

use crate::controller::{LifecycleState, ParticleBackground};
use crate::event::SurfaceEvent;
use crate::signals::SignalQueue;
use crate::scheduler::{BackgroundId, FrameQueue};
use plexus_core::SurfaceSize;
use plexus_field::FieldConfig;
use plexus_render::DrawSurface;

/// A page worth of animated backgrounds.
///
/// Each call to [`Stage::frame`] first applies queued host signals, then runs
/// every tick that was requested during the previous frame. Resizes therefore
/// never land in the middle of a tick.
pub struct Stage<S: DrawSurface> {
    backgrounds: Vec<ParticleBackground<S>>,
    queue: FrameQueue,
    events: SignalQueue,
    next_id: u32,
}

impl<S: DrawSurface> Default for Stage<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawSurface> Stage<S> {
    pub fn new() -> Self {
        Self {
            backgrounds: Vec::new(),
            queue: FrameQueue::new(),
            events: SignalQueue::new(),
            next_id: 1,
        }
    }

    /// Mount a new background. `None` stands for a host without a usable
    /// drawing context; the background then runs blank.
    pub fn mount(&mut self, config: FieldConfig, surface: Option<S>) -> BackgroundId {
        let id = BackgroundId(self.next_id);
        self.next_id += 1;

        let mut background = ParticleBackground::new(id, config);
        background.mount(surface, &mut self.queue);
        self.backgrounds.push(background);
        id
    }

    /// Queue a host signal for the next frame
    pub fn push_event(&mut self, event: SurfaceEvent) {
        self.events.push(event);
    }

    /// Queue a resize for the next frame
    pub fn resize(&mut self, id: BackgroundId, size: SurfaceSize) {
        self.push_event(SurfaceEvent::Resized { id, size });
    }

    /// Unmount immediately and hand the surface back
    pub fn unmount(&mut self, id: BackgroundId) -> Option<S> {
        let index = self.backgrounds.iter().position(|b| b.id() == id)?;
        let mut background = self.backgrounds.remove(index);
        background.unmount(&mut self.queue)
    }

    /// Apply pending signals, then run every due tick. Returns the number of
    /// ticks executed.
    pub fn frame(&mut self) -> usize {
        for event in self.events.drain() {
            match event {
                SurfaceEvent::Resized { id, size } => match self.get_mut(id) {
                    Some(background) => background.resize(size),
                    None => tracing::debug!("resize for unknown background {id}"),
                },
                SurfaceEvent::Unmounted { id } => {
                    if self.unmount(id).is_none() {
                        tracing::debug!("{id}: unmount released no surface");
                    }
                }
            }
        }

        let mut ticks = 0;
        for id in self.queue.take_due() {
            let queue = &mut self.queue;
            if let Some(background) = self.backgrounds.iter_mut().find(|b| b.id() == id) {
                if background.on_frame(queue) {
                    ticks += 1;
                }
            }
        }
        ticks
    }

    /// Unmount everything, returning the released surfaces in mount order
    pub fn shutdown(&mut self) -> Vec<(BackgroundId, S)> {
        let ids: Vec<BackgroundId> = self.ids().collect();
        ids.into_iter()
            .filter_map(|id| self.unmount(id).map(|s| (id, s)))
            .collect()
    }

    pub fn get(&self, id: BackgroundId) -> Option<&ParticleBackground<S>> {
        self.backgrounds.iter().find(|b| b.id() == id)
    }

    fn get_mut(&mut self, id: BackgroundId) -> Option<&mut ParticleBackground<S>> {
        self.backgrounds.iter_mut().find(|b| b.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = BackgroundId> + '_ {
        self.backgrounds.iter().map(|b| b.id())
    }

    /// Backgrounds currently animating
    pub fn running(&self) -> usize {
        self.backgrounds
            .iter()
            .filter(|b| b.state() == LifecycleState::Running)
            .count()
    }

    pub fn len(&self) -> usize {
        self.backgrounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backgrounds.is_empty()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
