//! # mcsim
//!
//! Incremental random-sampling simulation engine: pi estimation by unit
//! square sampling, Buffon's needle, and a PageRank random-surfer walk,
//! all driven by one strategy-pluggable engine.
//!
//! The engine accumulates samples in batches per tick, derives a running
//! estimate after every batch, and exposes total start/pause/reset
//! control. It owns no timer and no renderer: a driver maps wall time to
//! ticks (see [`engine::TickClock`]) and an observer callback receives
//! immutable state snapshots.
//!
//! ## Example
//!
//! ```rust
//! use mcsim::prelude::*;
//!
//! let config = SimConfig::builder().seed(42).batch_size(10).build();
//! let mut engine = SimEngine::new(Box::new(PointStrategy::new()), &config);
//!
//! engine.start();
//! engine.tick_n(100);
//! let pi = engine.estimate().pi().unwrap_or(0.0);
//! assert!((0.0..=4.0).contains(&pi));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn, // Many functions can't be const in stable Rust
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod graph;
pub mod sample;
pub mod strategy;
pub mod walker;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{NeedleGeometry, SimConfig, SimConfigBuilder};
    pub use crate::engine::{RunState, ScriptedSource, SimEngine, SimRng, SimState, TickClock, UniformSource};
    pub use crate::error::{SimError, SimResult};
    pub use crate::estimate::Estimate;
    pub use crate::graph::{Edge, Graph, NodeId};
    pub use crate::sample::Sample;
    pub use crate::strategy::{NeedleStrategy, PointStrategy, Strategy, WalkStrategy};
    pub use crate::walker::{PageRankWalker, Transition};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
