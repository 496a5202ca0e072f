//! Completion barrier over outstanding imports

use super::LoadError;
use std::fmt;
use tracing::{debug, info, warn};

/// What the barrier saw by the time it fired
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarrierReport {
    pub expected: usize,
    /// Failures in arrival order
    pub failures: Vec<LoadError>,
}

impl BarrierReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Barrier state after a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierState {
    /// Still waiting on `remaining` completions
    Pending { remaining: usize },
    /// This notification fired the barrier
    Fired,
    /// The barrier had already fired; the notification was ignored
    AlreadyFired,
}

type OnComplete = Box<dyn FnOnce(BarrierReport) + Send>;

/// Releases exactly once after `expected` completions, in any order
///
/// Failed imports count as completions so a failure never holds the
/// barrier open.
pub struct LoadBarrier {
    expected: usize,
    completed: usize,
    failures: Vec<LoadError>,
    on_complete: Option<OnComplete>,
}

impl LoadBarrier {
    /// Create a barrier; with `expected == 0` it fires before returning
    pub fn new(expected: usize, on_complete: impl FnOnce(BarrierReport) + Send + 'static) -> Self {
        let mut barrier = Self {
            expected,
            completed: 0,
            failures: Vec::new(),
            on_complete: Some(Box::new(on_complete)),
        };
        if expected == 0 {
            debug!("Barrier created with nothing to wait for");
            barrier.fire();
        }
        barrier
    }

    /// Record one completion, successful or not
    pub fn notify_one_completed(&mut self, result: Result<(), LoadError>) -> BarrierState {
        if self.is_fired() {
            warn!("Completion arrived after the barrier fired; ignoring");
            return BarrierState::AlreadyFired;
        }

        self.completed += 1;
        if let Err(error) = result {
            debug!(error = %error, "Import completed with failure");
            self.failures.push(error);
        }

        if self.completed == self.expected {
            self.fire();
            BarrierState::Fired
        } else {
            BarrierState::Pending {
                remaining: self.remaining(),
            }
        }
    }

    fn fire(&mut self) {
        let Some(on_complete) = self.on_complete.take() else {
            return;
        };
        info!(
            expected = self.expected,
            failures = self.failures.len(),
            "Load barrier fired"
        );
        on_complete(BarrierReport {
            expected: self.expected,
            failures: std::mem::take(&mut self.failures),
        });
    }

    pub fn is_fired(&self) -> bool {
        self.on_complete.is_none()
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn remaining(&self) -> usize {
        self.expected - self.completed
    }
}

impl fmt::Debug for LoadBarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadBarrier")
            .field("expected", &self.expected)
            .field("completed", &self.completed)
            .field("fired", &self.is_fired())
            .finish()
    }
}
