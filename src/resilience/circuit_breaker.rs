//! Circuit breaker for upstream protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: upstream assumed down, calls fail fast
//! - Half-Open: testing if upstream recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure rate >= threshold over a full sliding window
//! Open → Half-Open: after cool-down elapses
//! Half-Open → Closed: probe call succeeds (window cleared)
//! Half-Open → Open: probe call fails (cool-down restarts)
//! ```
//!
//! # Design Decisions
//! - Sliding window is a fixed-capacity ring buffer of recent outcomes
//! - Single probe in Half-Open (prevents hammering a recovering upstream)
//! - All state behind one mutex; breakers are instantiable per upstream

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tuning knobs for a [`CircuitBreaker`].
#[derive(Debug, Clone)]
pub struct BreakerSettings {
    /// Sliding window capacity (outcomes tracked).
    pub window_size: usize,
    /// Minimum outcomes in the window before the failure rate is evaluated.
    pub min_calls: usize,
    /// Failure rate (0.0..=1.0) at or above which the circuit opens.
    pub failure_rate_threshold: f64,
    /// How long the circuit stays open before permitting a probe.
    pub cooldown: Duration,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            window_size: 10,
            min_calls: 10,
            failure_rate_threshold: 0.5,
            cooldown: Duration::from_secs(30),
        }
    }
}

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct Inner {
    state: CircuitState,
    /// Ring buffer of recent outcomes; `true` = success.
    window: VecDeque<bool>,
    opened_at: Option<Instant>,
    probe_in_flight: bool,
}

/// Fail-fast gate in front of a consistently failing upstream.
pub struct CircuitBreaker {
    name: &'static str,
    settings: BreakerSettings,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(name: &'static str, settings: BreakerSettings) -> Self {
        let capacity = settings_capacity(&settings);
        Self {
            name,
            settings,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                window: VecDeque::with_capacity(capacity),
                opened_at: None,
                probe_in_flight: false,
            }),
        }
    }

    /// Ask whether a call may proceed.
    ///
    /// In Open state this also handles the cool-down expiry: the first
    /// caller after the cool-down gets the Half-Open probe slot.
    pub fn permit(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let elapsed = inner
                    .opened_at
                    .map(|t| t.elapsed())
                    .unwrap_or(Duration::ZERO);
                if elapsed >= self.settings.cooldown {
                    inner.state = CircuitState::HalfOpen;
                    inner.probe_in_flight = true;
                    tracing::info!(breaker = self.name, "Circuit half-open, permitting probe");
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                if inner.probe_in_flight {
                    false
                } else {
                    inner.probe_in_flight = true;
                    true
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => {
                push_outcome(&mut inner, &self.settings, true);
                self.evaluate(&mut inner);
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Closed;
                inner.window.clear();
                inner.opened_at = None;
                inner.probe_in_flight = false;
                tracing::info!(breaker = self.name, "Probe succeeded, circuit closed");
            }
            // Late result from a call permitted before the transition.
            CircuitState::Open => {}
        }
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => {
                push_outcome(&mut inner, &self.settings, false);
                self.evaluate(&mut inner);
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
                inner.probe_in_flight = false;
                tracing::warn!(breaker = self.name, "Probe failed, circuit re-opened");
            }
            CircuitState::Open => {}
        }
    }

    /// Current state, accounting for an elapsed cool-down.
    pub fn state(&self) -> CircuitState {
        let inner = self.lock();
        if inner.state == CircuitState::Open {
            let elapsed = inner
                .opened_at
                .map(|t| t.elapsed())
                .unwrap_or(Duration::ZERO);
            if elapsed >= self.settings.cooldown {
                return CircuitState::HalfOpen;
            }
        }
        inner.state
    }

    fn evaluate(&self, inner: &mut Inner) {
        if inner.window.len() < self.settings.min_calls {
            return;
        }
        let failures = inner.window.iter().filter(|ok| !**ok).count();
        let rate = failures as f64 / inner.window.len() as f64;
        if rate >= self.settings.failure_rate_threshold {
            inner.state = CircuitState::Open;
            inner.opened_at = Some(Instant::now());
            tracing::warn!(
                breaker = self.name,
                failure_rate = rate,
                window = inner.window.len(),
                "Failure rate over threshold, circuit opened"
            );
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("circuit breaker mutex poisoned")
    }
}

fn settings_capacity(settings: &BreakerSettings) -> usize {
    settings.window_size.max(1)
}

fn push_outcome(inner: &mut Inner, settings: &BreakerSettings, ok: bool) {
    if inner.window.len() == settings_capacity(settings) {
        inner.window.pop_front();
    }
    inner.window.push_back(ok);
}
