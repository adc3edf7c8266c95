//! Core incremental sampling engine.
//!
//! Owns the run/pause/reset state machine, the accumulating sample buffer,
//! and the batched tick. The engine schedules nothing itself: a driver
//! calls [`SimEngine::tick`] on whatever cadence it likes (see
//! [`clock::TickClock`]), and a tick is a no-op unless the engine is
//! Running. Generation and estimate derivation within a tick are
//! synchronous and atomic with respect to observers.

pub mod clock;
pub mod rng;
pub mod state;

use serde::{Deserialize, Serialize};

pub use clock::TickClock;
pub use rng::{ScriptedSource, SimRng, UniformSource};
pub use state::SimState;

use crate::config::{SimConfig, MAX_BATCH_SIZE, MIN_BATCH_SIZE};
use crate::estimate::Estimate;
use crate::strategy::Strategy;

/// Run-state machine: `Idle -> Running <-> Paused`, with reset back to
/// `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Created or reset; no samples accumulated since.
    #[default]
    Idle,
    /// Ticks commit batches.
    Running,
    /// Ticks are ignored until resumed.
    Paused,
}

/// State-changed callback fired after every tick, start, pause, and reset.
pub type Observer = Box<dyn FnMut(&SimState)>;

/// Incremental random-sampling simulation engine.
///
/// One engine per simulation; instances share nothing. The buffer and run
/// state are owned exclusively by the engine — observers receive immutable
/// snapshots and mutate only through the control API, all of whose
/// operations are total (invalid transitions are no-ops, never errors).
pub struct SimEngine {
    /// Accumulated samples and counters.
    state: SimState,
    /// Current position in the run-state machine.
    run_state: RunState,
    /// Samples generated per tick, clamped to `[1, 50]`.
    batch_size: u32,
    /// Active sampling strategy.
    strategy: Box<dyn Strategy>,
    /// Uniform random source feeding the strategy.
    source: Box<dyn UniformSource>,
    /// State-changed callback.
    observer: Option<Observer>,
}

impl SimEngine {
    /// Create an engine with the given strategy and configuration.
    ///
    /// The RNG is seeded from `config.seed`, or from OS entropy when the
    /// seed is absent (the source system's behavior).
    #[must_use]
    pub fn new(strategy: Box<dyn Strategy>, config: &SimConfig) -> Self {
        let source: Box<dyn UniformSource> = match config.seed {
            Some(seed) => Box::new(SimRng::new(seed)),
            None => Box::new(SimRng::from_entropy()),
        };
        Self::with_source(strategy, config, source)
    }

    /// Create an engine with an explicit random source.
    ///
    /// Tests use this with [`ScriptedSource`] to drive exact draw
    /// sequences.
    #[must_use]
    pub fn with_source(
        strategy: Box<dyn Strategy>,
        config: &SimConfig,
        source: Box<dyn UniformSource>,
    ) -> Self {
        let batch_size = config.batch_size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE);
        let mut state = SimState::default();
        state.set_batch_size(batch_size);
        Self {
            state,
            run_state: RunState::Idle,
            batch_size,
            strategy,
            source,
            observer: None,
        }
    }

    /// Current accumulated state.
    #[must_use]
    pub const fn state(&self) -> &SimState {
        &self.state
    }

    /// Current position in the run-state machine.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Whether ticks currently commit.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Samples generated per tick.
    #[must_use]
    pub const fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Name of the active strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Install the state-changed observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(&SimState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the state-changed observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Begin or resume the run. No-op when already Running.
    pub fn start(&mut self) {
        if self.run_state == RunState::Running {
            return;
        }
        self.run_state = RunState::Running;
        self.state.set_running(true);
        self.notify();
    }

    /// Pause the run. No-op unless Running; idempotent.
    pub fn pause(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.run_state = RunState::Paused;
        self.state.set_running(false);
        self.notify();
    }

    /// Return to Idle with an empty buffer, from any state.
    ///
    /// The run flag drops before the buffer clears, so a tick computed
    /// before the reset can never commit into the cleared buffer.
    pub fn reset(&mut self) {
        self.run_state = RunState::Idle;
        self.state.set_running(false);
        self.strategy.reset();
        self.state.clear();
        self.notify();
    }

    /// Set the per-tick batch size, clamped to `[1, 50]`. Callable in any
    /// state.
    pub fn set_batch_size(&mut self, batch_size: u32) {
        self.batch_size = batch_size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE);
        self.state.set_batch_size(self.batch_size);
    }

    /// Generate and commit one batch.
    ///
    /// No-op unless Running. Returns whether a batch was committed. The
    /// observer fires once per committed batch; no partial-batch state is
    /// ever observable.
    pub fn tick(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        for _ in 0..self.batch_size {
            let sample = self.strategy.draw(self.source.as_mut());
            self.state.push(sample);
        }
        self.notify();
        true
    }

    /// Run `n` consecutive ticks (headless convenience).
    ///
    /// Returns the number of ticks that committed.
    pub fn tick_n(&mut self, n: u64) -> u64 {
        let mut committed = 0;
        for _ in 0..n {
            if self.tick() {
                committed += 1;
            }
        }
        committed
    }

    /// The running estimate for the active strategy over current state.
    #[must_use]
    pub fn estimate(&self) -> Estimate {
        self.strategy.estimate(&self.state)
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::graph::{Graph, NodeId};
    use crate::strategy::{NeedleStrategy, PointStrategy, WalkStrategy};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn point_engine(seed: u64) -> SimEngine {
        let config = SimConfig::builder().seed(seed).batch_size(10).build();
        SimEngine::new(Box::new(PointStrategy::new()), &config)
    }

    #[test]
    fn test_initial_state_is_idle_and_empty() {
        let engine = point_engine(42);
        assert_eq!(engine.run_state(), RunState::Idle);
        assert!(engine.state().is_empty());
        assert_eq!(engine.batch_size(), 10);
        assert_eq!(engine.strategy_name(), "point");
    }

    #[test]
    fn test_tick_noop_while_idle() {
        let mut engine = point_engine(42);
        assert!(!engine.tick());
        assert!(engine.state().is_empty());
    }

    #[test]
    fn test_tick_commits_one_batch() {
        let mut engine = point_engine(42);
        engine.start();
        assert!(engine.tick());
        assert_eq!(engine.state().len(), 10);
        assert_eq!(engine.state().total_steps(), 10);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut engine = point_engine(42);
        engine.start();
        engine.start();
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut engine = point_engine(42);
        engine.start();
        engine.tick();

        engine.pause();
        let after_once = engine.state().len();
        let state_once = engine.run_state();

        engine.pause();
        assert_eq!(engine.state().len(), after_once);
        assert_eq!(engine.run_state(), state_once);
    }

    #[test]
    fn test_pause_without_start_is_noop() {
        let mut engine = point_engine(42);
        engine.pause();
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut engine = point_engine(42);
        engine.start();
        engine.tick();
        engine.pause();

        assert!(!engine.tick());
        assert_eq!(engine.state().len(), 10);
    }

    #[test]
    fn test_resume_after_pause() {
        let mut engine = point_engine(42);
        engine.start();
        engine.tick();
        engine.pause();
        engine.start();
        assert!(engine.tick());
        assert_eq!(engine.state().len(), 20);
    }

    #[test]
    fn test_reset_clears_fully_from_any_state() {
        let preparations: [fn(&mut SimEngine); 3] = [
            |_| {},
            |e| {
                e.start();
                e.tick();
            },
            |e| {
                e.start();
                e.tick();
                e.pause();
            },
        ];
        for prepare in preparations {
            let mut engine = point_engine(42);
            prepare(&mut engine);

            engine.reset();
            assert_eq!(engine.run_state(), RunState::Idle);
            assert!(engine.state().is_empty());
            assert_eq!(engine.state().total_steps(), 0);
            assert!(!engine.state().is_running());
        }
    }

    #[test]
    fn test_reset_returns_walker_to_start() {
        let config = SimConfig::builder().seed(42).batch_size(5).build();
        let mut engine = SimEngine::new(
            Box::new(WalkStrategy::new(Graph::sample())),
            &config,
        );
        engine.start();
        engine.tick_n(10);
        engine.reset();

        // First step after reset must leave from amy, whose only edge
        // points at ben.
        engine.start();
        engine.tick();
        match engine.state().samples().first() {
            Some(crate::sample::Sample::Walk { from, to }) => {
                assert_eq!(from, &NodeId::from("amy"));
                assert_eq!(to, &NodeId::from("ben"));
            }
            other => panic!("expected walk sample, got {other:?}"),
        }
    }

    #[test]
    fn test_set_batch_size_clamps() {
        let mut engine = point_engine(42);
        engine.set_batch_size(0);
        assert_eq!(engine.batch_size(), 1);
        engine.set_batch_size(100);
        assert_eq!(engine.batch_size(), 50);
        engine.set_batch_size(25);
        assert_eq!(engine.batch_size(), 25);
        assert_eq!(engine.state().batch_size(), 25);
    }

    #[test]
    fn test_batch_size_takes_effect_next_tick() {
        let mut engine = point_engine(42);
        engine.start();
        engine.tick();
        engine.set_batch_size(3);
        engine.tick();
        assert_eq!(engine.state().len(), 13);
    }

    #[test]
    fn test_observer_fires_on_every_transition() {
        let mut engine = point_engine(42);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&calls);
        engine.set_observer(move |state| {
            log.borrow_mut().push((state.is_running(), state.len()));
        });

        engine.start(); // (true, 0)
        engine.tick(); // (true, 10)
        engine.pause(); // (false, 10)
        engine.reset(); // (false, 0)

        assert_eq!(
            *calls.borrow(),
            vec![(true, 0), (true, 10), (false, 10), (false, 0)]
        );
    }

    #[test]
    fn test_observer_never_sees_partial_batch() {
        let mut engine = point_engine(42);
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&sizes);
        engine.set_observer(move |state| {
            log.borrow_mut().push(state.len());
        });

        engine.start();
        engine.tick_n(5);

        // Snapshot lengths are exact multiples of the batch size.
        assert_eq!(*sizes.borrow(), vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_clear_observer() {
        let mut engine = point_engine(42);
        let calls = Rc::new(RefCell::new(0u32));
        let count = Rc::clone(&calls);
        engine.set_observer(move |_| *count.borrow_mut() += 1);
        engine.start();
        engine.clear_observer();
        engine.tick();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_engines_are_independent() {
        let mut a = point_engine(1);
        let mut b = point_engine(2);
        a.start();
        a.tick();
        assert!(b.state().is_empty());
        assert_eq!(b.run_state(), RunState::Idle);
        b.start();
        b.tick();
        assert_eq!(a.state().len(), b.state().len());
        assert_ne!(a.state().samples(), b.state().samples());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = point_engine(42);
        let mut b = point_engine(42);
        a.start();
        b.start();
        a.tick_n(20);
        b.tick_n(20);
        assert_eq!(a.state().samples(), b.state().samples());
        assert_eq!(a.estimate(), b.estimate());
    }

    #[test]
    fn test_counters_survive_audit_after_long_run() {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(PointStrategy::new()),
            Box::new(NeedleStrategy::default()),
            Box::new(WalkStrategy::new(Graph::sample())),
        ];
        for strategy in strategies {
            let config = SimConfig::builder().seed(42).batch_size(50).build();
            let mut engine = SimEngine::new(strategy, &config);
            engine.start();
            engine.tick_n(100);
            engine.state().audit().expect("counters consistent");
        }
    }

    #[test]
    fn test_tick_n_counts_commits() {
        let mut engine = point_engine(42);
        assert_eq!(engine.tick_n(5), 0);
        engine.start();
        assert_eq!(engine.tick_n(5), 5);
    }

    #[test]
    fn test_scripted_alternating_convergence() {
        // [0.5, 0.5] is the center (inside); [0.0, 0.0] is a corner
        // (outside). 1000 samples alternate exactly, giving 500 inside and
        // an estimate of 4 * 500/1000 = 2.0.
        let config = SimConfig::builder().batch_size(50).build();
        let source = ScriptedSource::new(vec![0.5, 0.5, 0.0, 0.0]);
        let mut engine = SimEngine::with_source(
            Box::new(PointStrategy::new()),
            &config,
            Box::new(source),
        );

        engine.start();
        engine.tick_n(20); // 20 * 50 = 1000 samples

        assert_eq!(engine.state().total_steps(), 1000);
        assert_eq!(engine.state().inside_count(), 500);
        assert_eq!(engine.estimate().pi(), Some(2.0));
    }
}
