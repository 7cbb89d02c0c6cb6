//! Simulated progress for a generation run.
//!
//! Composition is near-instant, so the value reported here is cosmetic: a
//! worker thread adds a bounded random step every tick, never passing the
//! configured ceiling, until the caller finalizes the run at exactly 100.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──start──▶ Running ──finish──▶ Done
//!                    │
//!                    └──cancel / start again──▶ Cancelled
//! ```
//!
//! At most one run is live per emitter. Starting a new run cancels the old
//! one first, so the last invocation always wins.
//!
//! ## Delivery guarantees
//!
//! Every update is delivered while the state lock is held, and only if the
//! run it belongs to is still live. Once `cancel`, `finish` or a newer
//! `start` returns, the old run's sink has been dropped and its worker
//! joined: no stale update can arrive afterwards.
//!
//! Sinks run on the emitter's threads under that lock and must not call
//! back into the emitter.

use std::{
    fmt,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use rand::Rng;
use serde::Serialize;

use crate::{application::ApplicationError, error::KilnResult};

/// The value a finished run always ends on.
pub const COMPLETE: f64 = 100.0;

// ── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressConfig {
    pub tick_interval: Duration,
    pub min_step: f64,
    pub max_step: f64,
    /// Ticks never report more than this. Only `finish` reaches 100.
    pub ceiling: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            min_step: 0.5,
            max_step: 10.0,
            ceiling: 99.0,
        }
    }
}

impl ProgressConfig {
    fn step(&self, steps: &dyn StepSource) -> f64 {
        steps
            .next_step(self.min_step, self.max_step)
            .clamp(self.min_step, self.max_step)
    }
}

// ── Step sources and sinks ───────────────────────────────────────────────────

/// Supplies the size of each progress increment.
pub trait StepSource: Send + Sync {
    /// A step in `[min, max]`. Values outside are clamped by the emitter.
    fn next_step(&self, min: f64, max: f64) -> f64;
}

/// Uniformly random steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSteps;

impl StepSource for RandomSteps {
    fn next_step(&self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// The same step every time. Makes runs reproducible in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSteps(pub f64);

impl StepSource for FixedSteps {
    fn next_step(&self, _min: f64, _max: f64) -> f64 {
        self.0
    }
}

/// Receives progress values in `(0, 100]`.
pub trait ProgressSink: Send {
    fn report(&mut self, value: f64);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64) + Send,
{
    fn report(&mut self, value: f64) {
        self(value);
    }
}

// ── Run identity and phase ───────────────────────────────────────────────────

/// Identifies one `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPhase {
    Idle,
    Running,
    Done,
    Cancelled,
}

// ── Shared state ─────────────────────────────────────────────────────────────

struct State {
    run: u64,
    value: f64,
    phase: ProgressPhase,
    sink: Option<Box<dyn ProgressSink>>,
    worker: Option<JoinHandle<()>>,
}

impl State {
    fn is_live(&self, run: u64) -> bool {
        self.run == run && self.phase == ProgressPhase::Running
    }

    fn set(&mut self, value: f64) {
        self.value = value;
        if let Some(sink) = self.sink.as_mut() {
            sink.report(value);
        }
    }

    /// End the current run as `phase`, releasing its sink. Returns the
    /// worker handle for the caller to join once the lock is released.
    fn end(&mut self, phase: ProgressPhase) -> Option<JoinHandle<()>> {
        if self.phase == ProgressPhase::Running {
            self.phase = phase;
        }
        self.sink = None;
        self.worker.take()
    }
}

struct Shared {
    state: Mutex<State>,
    wake: Condvar,
    config: ProgressConfig,
    steps: Box<dyn StepSource>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel(&self) -> bool {
        let (was_running, worker) = {
            let mut state = self.lock();
            let was_running = state.phase == ProgressPhase::Running;
            (was_running, state.end(ProgressPhase::Cancelled))
        };
        self.wake.notify_all();
        join(worker);
        was_running
    }
}

fn join(worker: Option<JoinHandle<()>>) {
    let Some(handle) = worker else { return };
    if handle.thread().id() != thread::current().id() {
        // A panicking sink already poisoned the lock; nothing more to report.
        let _ = handle.join();
    }
}

fn tick_loop(shared: Arc<Shared>, run: u64) {
    let interval = shared.config.tick_interval;
    let mut state = shared.lock();
    loop {
        state = shared
            .wake
            .wait_timeout_while(state, interval, |s| s.is_live(run))
            .unwrap_or_else(PoisonError::into_inner)
            .0;
        if !state.is_live(run) {
            return;
        }
        let next = (state.value + shared.config.step(shared.steps.as_ref()))
            .min(shared.config.ceiling);
        if next > state.value {
            state.set(next);
        }
    }
}

// ── Public handles ───────────────────────────────────────────────────────────

/// Cancellable progress emitter.
///
/// Clones share the same run. Dropping the last clone cancels it.
#[derive(Clone)]
pub struct ProgressEmitter {
    handle: Arc<Handle>,
}

struct Handle {
    shared: Arc<Shared>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

impl fmt::Debug for ProgressEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressEmitter")
            .field("phase", &self.phase())
            .field("value", &self.current())
            .field("config", &self.handle.shared.config)
            .finish()
    }
}

impl Default for ProgressEmitter {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}

impl ProgressEmitter {
    /// Emitter with random steps.
    pub fn new(config: ProgressConfig) -> Self {
        Self::with_steps(config, RandomSteps)
    }

    pub fn with_steps(config: ProgressConfig, steps: impl StepSource + 'static) -> Self {
        let shared = Shared {
            state: Mutex::new(State {
                run: 0,
                value: 0.0,
                phase: ProgressPhase::Idle,
                sink: None,
                worker: None,
            }),
            wake: Condvar::new(),
            config,
            steps: Box::new(steps),
        };
        Self {
            handle: Arc::new(Handle {
                shared: Arc::new(shared),
            }),
        }
    }

    fn shared(&self) -> &Arc<Shared> {
        &self.handle.shared
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.shared().config
    }

    /// Begin a fresh run, cancelling any run still in flight.
    ///
    /// The first value is reported to `sink` before this returns, so a
    /// started run has always reported something above zero.
    pub fn start(&self, sink: impl ProgressSink + 'static) -> KilnResult<RunId> {
        let shared = self.shared();
        let (run, previous) = {
            let mut state = shared.lock();
            let previous = state.end(ProgressPhase::Cancelled);
            state.run += 1;
            state.phase = ProgressPhase::Running;
            state.sink = Some(Box::new(sink));
            state.value = 0.0;
            let first = shared.config.step(shared.steps.as_ref()).min(shared.config.ceiling);
            state.set(first);
            (state.run, previous)
        };
        shared.wake.notify_all();
        join(previous);

        let worker = {
            let shared = Arc::clone(shared);
            thread::Builder::new()
                .name(format!("kiln-progress-{run}"))
                .spawn(move || tick_loop(shared, run))
        };

        let mut state = shared.lock();
        match worker {
            Ok(handle) if state.run == run => state.worker = Some(handle),
            // Superseded before we got here; the worker exits on its own.
            Ok(_) => {}
            Err(e) => {
                state.end(ProgressPhase::Cancelled);
                return Err(ApplicationError::WorkerSpawn {
                    reason: e.to_string(),
                }
                .into());
            }
        }
        Ok(RunId(run))
    }

    /// Wait up to `duration` while `run` stays live.
    ///
    /// Returns early if the run is cancelled or superseded. Returns whether
    /// the run is still live.
    pub fn hold(&self, run: RunId, duration: Duration) -> bool {
        let shared = self.shared();
        let state = shared.lock();
        let (state, _) = shared
            .wake
            .wait_timeout_while(state, duration, |s| s.is_live(run.0))
            .unwrap_or_else(PoisonError::into_inner);
        state.is_live(run.0)
    }

    /// Report exactly 100 and stop ticking.
    ///
    /// Only the current, still-running run can be finished; anything else
    /// is a no-op returning `false`.
    pub fn finish(&self, run: RunId) -> bool {
        let shared = self.shared();
        let worker = {
            let mut state = shared.lock();
            if !state.is_live(run.0) {
                return false;
            }
            state.set(COMPLETE);
            state.end(ProgressPhase::Done)
        };
        shared.wake.notify_all();
        join(worker);
        true
    }

    /// Stop the current run, if any. Returns whether a run was cancelled.
    pub fn cancel(&self) -> bool {
        self.shared().cancel()
    }

    /// A handle that can only cancel, for another thread to hold.
    pub fn canceller(&self) -> ProgressCanceller {
        ProgressCanceller {
            shared: Arc::clone(self.shared()),
        }
    }

    pub fn current(&self) -> f64 {
        self.shared().lock().value
    }

    pub fn phase(&self) -> ProgressPhase {
        self.shared().lock().phase
    }
}

/// Cancels whatever run its emitter has in flight.
#[derive(Clone)]
pub struct ProgressCanceller {
    shared: Arc<Shared>,
}

impl ProgressCanceller {
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }
}

impl fmt::Debug for ProgressCanceller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressCanceller").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(step: f64) -> ProgressEmitter {
        ProgressEmitter::with_steps(
            ProgressConfig {
                tick_interval: Duration::from_millis(1),
                ..ProgressConfig::default()
            },
            FixedSteps(step),
        )
    }

    fn recorder() -> (Arc<Mutex<Vec<f64>>>, impl FnMut(f64) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |v| seen.lock().unwrap().push(v)
        };
        (seen, sink)
    }

    #[test]
    fn first_value_arrives_on_start() {
        let emitter = fast(5.0);
        let (seen, sink) = recorder();
        let run = emitter.start(sink).unwrap();
        assert_eq!(seen.lock().unwrap().first(), Some(&5.0));
        assert!(emitter.finish(run));
    }

    #[test]
    fn ticks_climb_to_ceiling_then_finish_reports_one_hundred() {
        let emitter = fast(30.0);
        let (seen, sink) = recorder();
        let run = emitter.start(sink).unwrap();

        assert!(emitter.hold(run, Duration::from_millis(50)));
        assert!(emitter.finish(run));

        let values = seen.lock().unwrap().clone();
        // FixedSteps(30) is clamped to max_step (10).
        assert_eq!(values.first(), Some(&10.0));
        assert_eq!(values.last(), Some(&COMPLETE));
        assert_eq!(values.iter().filter(|v| **v >= COMPLETE).count(), 1);
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{values:?}");
        assert!(values.iter().all(|v| *v > 0.0 && *v <= COMPLETE));
        assert_eq!(emitter.phase(), ProgressPhase::Done);
    }

    #[test]
    fn finish_is_once_only() {
        let emitter = fast(1.0);
        let (seen, sink) = recorder();
        let run = emitter.start(sink).unwrap();
        assert!(emitter.finish(run));
        assert!(!emitter.finish(run));
        let hundreds = seen.lock().unwrap().iter().filter(|v| **v == COMPLETE).count();
        assert_eq!(hundreds, 1);
    }

    #[test]
    fn cancel_stops_all_updates() {
        let emitter = fast(1.0);
        let (seen, sink) = recorder();
        let run = emitter.start(sink).unwrap();
        assert!(emitter.cancel());
        let frozen = seen.lock().unwrap().len();

        thread::sleep(Duration::from_millis(20));
        assert_eq!(seen.lock().unwrap().len(), frozen);
        assert!(!emitter.finish(run));
        assert!(!emitter.hold(run, Duration::from_millis(5)));
        assert_eq!(emitter.phase(), ProgressPhase::Cancelled);
    }

    #[test]
    fn restart_begins_a_fresh_sequence() {
        let emitter = fast(10.0);
        let (first_seen, first_sink) = recorder();
        let first = emitter.start(first_sink).unwrap();
        emitter.hold(first, Duration::from_millis(20));

        let (second_seen, second_sink) = recorder();
        let second = emitter.start(second_sink).unwrap();
        let stale = first_seen.lock().unwrap().len();

        assert_ne!(first, second);
        assert!(!emitter.finish(first));
        assert_eq!(second_seen.lock().unwrap().first(), Some(&10.0));
        assert!(emitter.finish(second));

        thread::sleep(Duration::from_millis(10));
        assert_eq!(first_seen.lock().unwrap().len(), stale);
        assert!(!first_seen.lock().unwrap().contains(&COMPLETE));
    }

    #[test]
    fn canceller_wakes_a_holding_caller() {
        let emitter = ProgressEmitter::default();
        let run = emitter.start(|_: f64| {}).unwrap();
        let canceller = emitter.canceller();

        let waiter = thread::spawn(move || canceller.cancel());
        let live = emitter.hold(run, Duration::from_secs(30));
        assert!(waiter.join().unwrap());
        assert!(!live);
    }

    #[test]
    fn dropping_the_emitter_cancels_its_run() {
        let (seen, sink) = recorder();
        {
            let emitter = fast(1.0);
            emitter.start(sink).unwrap();
        }
        let frozen = seen.lock().unwrap().len();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(seen.lock().unwrap().len(), frozen);
    }

    #[test]
    fn random_steps_stay_in_bounds() {
        for _ in 0..200 {
            let step = RandomSteps.next_step(0.5, 10.0);
            assert!((0.5..=10.0).contains(&step));
        }
        assert_eq!(RandomSteps.next_step(3.0, 3.0), 3.0);
    }
}
