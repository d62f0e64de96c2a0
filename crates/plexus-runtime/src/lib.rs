//! Plexus Runtime - frame loop infrastructure for particle backgrounds
//!
//! Provides the pieces that bind a particle field to a host:
//! - `FrameScheduler` / `FrameQueue`: the "run on next frame" primitive and `AnimationHandle`
//! - `ParticleBackground`: mount / resize / tick / unmount lifecycle for one surface
//! - `Stage`: several independent backgrounds sharing one frame queue
//! - `SurfaceEvent` / `SignalQueue`: host signals coalesced and applied between ticks
//! - `FrameClock`: wall-clock pacing at a target frame rate

mod clock;
mod controller;
mod event;
mod scheduler;
mod signals;
mod stage;

pub use clock::FrameClock;
pub use controller::{LifecycleState, ParticleBackground};
pub use event::SurfaceEvent;
pub use scheduler::{AnimationHandle, BackgroundId, FrameQueue, FrameScheduler};
pub use signals::SignalQueue;
pub use stage::Stage;
