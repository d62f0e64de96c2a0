//! Plexus Core - Foundational types for the Plexus particle field engine
//!
//! This crate provides the core types that all other Plexus crates depend on:
//! - `Vec2` - 2D points and velocities
//! - `Color` - RGBA colors with hex parsing
//! - `SurfaceSize` - Drawing surface dimensions
//! - Error types and Result alias

mod error;
mod types;

pub use error::{PlexusError, Result};
pub use types::{Color, SurfaceSize, Vec2};
