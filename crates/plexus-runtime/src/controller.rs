//! Lifecycle controller for one animated particle background

use crate::scheduler::{AnimationHandle, BackgroundId, FrameScheduler};
use plexus_core::SurfaceSize;
use plexus_field::{advance, build_edges, FieldConfig, ParticleRng, ParticleSet};
use plexus_render::{render, render_blank, DrawSurface, FrameStats, RenderStyle};

/// Where a background is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Running,
    /// Final; no further ticks execute
    Terminated,
}

/// One mounted particle background.
///
/// Owns its surface, particle set, random source and at most one pending
/// frame request. Nothing here is shared between backgrounds, so any number
/// of them can run side by side on the same scheduler.
///
/// None of the operations fail: a missing or zero-sized surface degrades to a
/// blank, still-running background.
pub struct ParticleBackground<S: DrawSurface> {
    id: BackgroundId,
    config: FieldConfig,
    style: RenderStyle,
    state: LifecycleState,
    surface: Option<S>,
    particles: ParticleSet,
    rng: ParticleRng,
    handle: Option<AnimationHandle>,
    frames_rendered: u64,
    last_stats: FrameStats,
    warned_unavailable: bool,
}

impl<S: DrawSurface> ParticleBackground<S> {
    pub fn new(id: BackgroundId, config: FieldConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_time(),
        };
        Self {
            id,
            style: RenderStyle::from_config(&config),
            config,
            state: LifecycleState::Uninitialized,
            surface: None,
            particles: ParticleSet::empty(),
            rng,
            handle: None,
            frames_rendered: 0,
            last_stats: FrameStats::default(),
            warned_unavailable: false,
        }
    }

    /// Take ownership of the surface, seed particles for its size and
    /// schedule the first tick. Only valid from `Uninitialized`.
    pub fn mount(&mut self, surface: Option<S>, scheduler: &mut dyn FrameScheduler) {
        if self.state != LifecycleState::Uninitialized {
            tracing::warn!("{}: mount ignored in state {:?}", self.id, self.state);
            return;
        }
        self.surface = surface;
        self.reseed();
        self.state = LifecycleState::Running;
        self.handle = Some(scheduler.request_frame(self.id));
        tracing::info!(
            "{}: mounted {} with {} particle(s)",
            self.id,
            self.surface_size(),
            self.particles.len()
        );
    }

    /// Resize the surface and regenerate the whole particle set. Repeated
    /// calls simply re-seed again.
    pub fn resize(&mut self, size: SurfaceSize) {
        if self.state != LifecycleState::Running {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }
        self.reseed();
        tracing::debug!("{}: resized to {size}, {} particle(s)", self.id, self.particles.len());
    }

    /// Run one tick (simulate, build edges, render) and reschedule.
    ///
    /// Returns false without drawing when the background is not running or
    /// has no outstanding frame request, e.g. a request that fired after
    /// teardown on a scheduler that ignores cancellation.
    pub fn on_frame(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.state != LifecycleState::Running || self.handle.take().is_none() {
            return false;
        }

        if let Some(surface) = self.surface.as_mut() {
            if surface.size().is_empty() {
                render_blank(surface, &self.style);
                self.last_stats = FrameStats::default();
            } else {
                advance(&mut self.particles, self.config.boundary);
                let edges = build_edges(&self.particles, self.config.connection_threshold);
                self.last_stats = render(surface, &self.particles, edges, &self.style);
            }
            self.frames_rendered += 1;
        }

        self.handle = Some(scheduler.request_frame(self.id));
        true
    }

    /// Cancel the pending tick and release the surface. Terminal.
    pub fn unmount(&mut self, scheduler: &mut dyn FrameScheduler) -> Option<S> {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel_frame(handle);
        }
        if self.state == LifecycleState::Terminated {
            return None;
        }
        self.state = LifecycleState::Terminated;
        self.particles = ParticleSet::empty();
        tracing::info!("{}: unmounted after {} frame(s)", self.id, self.frames_rendered);
        self.surface.take()
    }

    fn reseed(&mut self) {
        let size = self.surface_size();
        if size.is_empty() {
            if !self.warned_unavailable {
                tracing::warn!(
                    "{}: drawing surface unavailable ({}), running blank",
                    self.id,
                    if self.surface.is_some() { "zero size" } else { "no context" }
                );
                self.warned_unavailable = true;
            }
            self.particles = ParticleSet::empty();
            return;
        }
        self.warned_unavailable = false;
        self.particles = ParticleSet::initialize(size, &self.config, &mut self.rng);
    }

    fn surface_size(&self) -> SurfaceSize {
        self.surface.as_ref().map(|s| s.size()).unwrap_or_default()
    }

    pub fn id(&self) -> BackgroundId {
        self.id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Whether a frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FrameQueue;
    use plexus_render::DisplayList;

    fn seeded_config() -> FieldConfig {
        FieldConfig {
            area_per_particle: 10_000.0,
            seed: Some(42),
            ..FieldConfig::default()
        }
    }

    fn mounted(size: SurfaceSize) -> (ParticleBackground<DisplayList>, FrameQueue) {
        let mut queue = FrameQueue::new();
        let mut bg = ParticleBackground::new(BackgroundId(1), seeded_config());
        bg.mount(Some(DisplayList::new(size)), &mut queue);
        (bg, queue)
    }

    fn run_frame(bg: &mut ParticleBackground<DisplayList>, queue: &mut FrameQueue) -> usize {
        let mut ticked = 0;
        for id in queue.take_due() {
            assert_eq!(id, bg.id());
            if bg.on_frame(queue) {
                ticked += 1;
            }
        }
        ticked
    }

    #[test]
    fn mount_seeds_and_schedules() {
        let (bg, queue) = mounted(SurfaceSize::new(800, 600));
        assert_eq!(bg.state(), LifecycleState::Running);
        assert_eq!(bg.particles().len(), 48);
        assert!(bg.is_scheduled());
        assert!(queue.is_scheduled(BackgroundId(1)));
    }

    #[test]
    fn each_frame_renders_once_and_reschedules() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(800, 600));
        for frame in 1..=5 {
            assert_eq!(run_frame(&mut bg, &mut queue), 1);
            assert_eq!(bg.frames_rendered(), frame);
            assert_eq!(queue.len(), 1);
        }
        let list = bg.surface().unwrap();
        assert_eq!(list.circle_count(), 48);
        assert_eq!(list.line_count(), bg.last_stats().edges);
        assert_eq!(list.frames(), 5);
    }

    #[test]
    fn resize_regenerates_the_set() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(800, 600));
        run_frame(&mut bg, &mut queue);

        bg.resize(SurfaceSize::new(400, 300));
        assert_eq!(bg.particles().len(), 12);
        assert_eq!(bg.particles().bounds(), SurfaceSize::new(400, 300));
        assert_eq!(bg.surface().unwrap().size(), SurfaceSize::new(400, 300));

        // A resize storm only re-seeds
        for w in 500..520 {
            bg.resize(SurfaceSize::new(w, 400));
        }
        assert_eq!(bg.particles().len(), 20);
        assert_eq!(bg.state(), LifecycleState::Running);
        assert_eq!(run_frame(&mut bg, &mut queue), 1);
    }

    #[test]
    fn unmount_mid_loop_stops_ticks() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(800, 600));
        run_frame(&mut bg, &mut queue);
        run_frame(&mut bg, &mut queue);
        assert!(queue.is_scheduled(bg.id()));

        let surface = bg.unmount(&mut queue);
        assert!(surface.is_some());
        assert_eq!(bg.state(), LifecycleState::Terminated);
        assert!(queue.is_empty());

        for _ in 0..3 {
            assert_eq!(run_frame(&mut bg, &mut queue), 0);
        }
        assert_eq!(bg.frames_rendered(), 2);
    }

    #[test]
    fn stale_delivery_after_unmount_is_ignored() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(800, 600));
        bg.unmount(&mut queue);

        // A scheduler that never honoured the cancel still cannot tick us
        assert!(!bg.on_frame(&mut queue));
        assert_eq!(bg.frames_rendered(), 0);
        assert!(queue.is_empty());
        assert!(bg.unmount(&mut queue).is_none());
    }

    #[test]
    fn missing_surface_runs_blank() {
        let mut queue = FrameQueue::new();
        let mut bg: ParticleBackground<DisplayList> =
            ParticleBackground::new(BackgroundId(9), seeded_config());
        bg.mount(None, &mut queue);
        assert_eq!(bg.state(), LifecycleState::Running);
        assert!(bg.particles().is_empty());

        assert_eq!(run_frame(&mut bg, &mut queue), 1);
        assert_eq!(bg.frames_rendered(), 0);
        bg.resize(SurfaceSize::new(800, 600));
        assert!(bg.particles().is_empty());
        assert!(bg.unmount(&mut queue).is_none());
    }

    #[test]
    fn zero_sized_surface_recovers_on_resize() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(0, 0));
        assert!(bg.particles().is_empty());
        run_frame(&mut bg, &mut queue);
        assert_eq!(bg.last_stats(), FrameStats::default());

        bg.resize(SurfaceSize::new(800, 600));
        assert_eq!(bg.particles().len(), 48);
        run_frame(&mut bg, &mut queue);
        assert_eq!(bg.last_stats().particles, 48);
    }

    #[test]
    fn unavailable_warning_fires_once_until_a_usable_seed() {
        let mut queue = FrameQueue::new();
        let mut bg: ParticleBackground<DisplayList> =
            ParticleBackground::new(BackgroundId(4), seeded_config());
        assert!(!bg.warned_unavailable);
        bg.mount(None, &mut queue);
        assert!(bg.warned_unavailable);
        bg.resize(SurfaceSize::new(640, 480));
        bg.resize(SurfaceSize::new(320, 240));
        assert!(bg.warned_unavailable);

        let (mut bg, _queue) = mounted(SurfaceSize::new(0, 0));
        assert!(bg.warned_unavailable);
        bg.resize(SurfaceSize::new(0, 10));
        assert!(bg.warned_unavailable);
        bg.resize(SurfaceSize::new(800, 600));
        assert!(!bg.warned_unavailable);
        bg.resize(SurfaceSize::new(0, 0));
        assert!(bg.warned_unavailable);
    }

    #[test]
    fn mount_twice_is_ignored() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(800, 600));
        bg.mount(Some(DisplayList::new(SurfaceSize::new(10, 10))), &mut queue);
        assert_eq!(queue.len(), 1);
        assert_eq!(bg.surface().unwrap().size(), SurfaceSize::new(800, 600));
    }

    #[test]
    fn particles_stay_near_bounds_while_running() {
        let (mut bg, mut queue) = mounted(SurfaceSize::new(300, 200));
        let eps = bg.config().speed_max + 1e-3;
        for _ in 0..2_000 {
            run_frame(&mut bg, &mut queue);
            for p in bg.particles() {
                assert!(p.position.x >= -eps && p.position.x <= 300.0 + eps);
                assert!(p.position.y >= -eps && p.position.y <= 200.0 + eps);
            }
        }
    }
}
