//! WASM bindings for web front ends.
//!
//! One wrapper per strategy, exporting the control API, count accessors,
//! and JSON state snapshots. The host drives ticks from its own timer
//! (e.g. a 50ms interval) and redraws from the snapshot after each call.

use wasm_bindgen::prelude::*;

use crate::config::{NeedleGeometry, SimConfig};
use crate::engine::SimEngine;
use crate::estimate::Estimate;
use crate::graph::Graph;
use crate::strategy::{NeedleStrategy, PointStrategy, WalkStrategy};

fn state_json(engine: &SimEngine) -> String {
    serde_json::to_string(engine.state()).unwrap_or_default()
}

/// Pi estimation by unit-square sampling.
#[wasm_bindgen]
pub struct WasmPiSim {
    inner: SimEngine,
}

#[wasm_bindgen]
impl WasmPiSim {
    /// Create a seeded simulation.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(seed: u64, batch_size: u32) -> Self {
        let config = SimConfig::builder().seed(seed).batch_size(batch_size).build();
        Self {
            inner: SimEngine::new(Box::new(PointStrategy::new()), &config),
        }
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn tick(&mut self) -> bool {
        self.inner.tick()
    }

    pub fn set_batch_size(&mut self, batch_size: u32) {
        self.inner.set_batch_size(batch_size);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.inner.state().total_steps()
    }

    #[must_use]
    pub fn inside_count(&self) -> u64 {
        self.inner.state().inside_count()
    }

    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.inner.estimate().pi().unwrap_or(0.0)
    }

    #[must_use]
    pub fn state_json(&self) -> String {
        state_json(&self.inner)
    }
}

/// Buffon's needle experiment.
#[wasm_bindgen]
pub struct WasmNeedleSim {
    inner: SimEngine,
}

#[wasm_bindgen]
impl WasmNeedleSim {
    /// Create a seeded simulation over the given geometry.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(
        seed: u64,
        batch_size: u32,
        length: f64,
        spacing: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let geometry = NeedleGeometry {
            length,
            spacing,
            width,
            height,
        };
        let config = SimConfig::builder()
            .seed(seed)
            .batch_size(batch_size)
            .needle(geometry)
            .build();
        Self {
            inner: SimEngine::new(Box::new(NeedleStrategy::new(geometry)), &config),
        }
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn tick(&mut self) -> bool {
        self.inner.tick()
    }

    pub fn set_batch_size(&mut self, batch_size: u32) {
        self.inner.set_batch_size(batch_size);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.inner.state().total_steps()
    }

    #[must_use]
    pub fn crossing_count(&self) -> u64 {
        self.inner.state().crossing_count()
    }

    /// Whether a pi estimate is defined yet (at least one crossing).
    #[must_use]
    pub fn has_estimate(&self) -> bool {
        matches!(self.inner.estimate(), Estimate::Pi { .. })
    }

    /// The pi estimate; 0 while undefined (check `has_estimate`).
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.inner.estimate().pi().unwrap_or(0.0)
    }

    #[must_use]
    pub fn state_json(&self) -> String {
        state_json(&self.inner)
    }
}

/// PageRank random-surfer walk.
#[wasm_bindgen]
pub struct WasmWalkSim {
    inner: SimEngine,
}

#[wasm_bindgen]
impl WasmWalkSim {
    /// Create a seeded walk over the built-in four-page demo graph.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(seed: u64, batch_size: u32) -> Self {
        let config = SimConfig::builder().seed(seed).batch_size(batch_size).build();
        Self {
            inner: SimEngine::new(Box::new(WalkStrategy::new(Graph::sample())), &config),
        }
    }

    /// Create a seeded walk over a YAML-encoded graph.
    ///
    /// # Errors
    ///
    /// Returns a JS error string if the graph fails to parse or validate.
    pub fn with_graph(seed: u64, batch_size: u32, graph_yaml: &str) -> Result<WasmWalkSim, JsValue> {
        let graph = Graph::from_yaml(graph_yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = SimConfig::builder().seed(seed).batch_size(batch_size).build();
        Ok(Self {
            inner: SimEngine::new(Box::new(WalkStrategy::new(graph)), &config),
        })
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn tick(&mut self) -> bool {
        self.inner.tick()
    }

    pub fn set_batch_size(&mut self, batch_size: u32) {
        self.inner.set_batch_size(batch_size);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[must_use]
    pub fn total_steps(&self) -> u64 {
        self.inner.state().total_steps()
    }

    /// Per-node visit shares as a JSON object.
    #[must_use]
    pub fn importance_json(&self) -> String {
        match self.inner.estimate() {
            Estimate::Importance { shares } => {
                serde_json::to_string(&shares).unwrap_or_default()
            }
            _ => String::new(),
        }
    }

    #[must_use]
    pub fn state_json(&self) -> String {
        state_json(&self.inner)
    }
}
