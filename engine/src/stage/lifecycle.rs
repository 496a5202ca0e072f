//! Drives a stage build across the asynchronous import phase

use super::{Populated, Stage, StageBuilder, StageInitError};
use crate::assets::{
    AssetStore, BarrierReport, CancellationToken, ImportOutcome, LoadBarrier, LoadError,
};
use crate::config::StageConfig;
use crate::core::context::EngineContext;
use crate::graphics::RenderHost;
use crate::io::LevelDefinition;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Where a [`StageLifecycle`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    NotStarted,
    /// Import requests are outstanding
    AwaitingImports,
    Complete,
    Failed,
    Cancelled,
}

enum StageEvent {
    Imported { index: usize, outcome: ImportOutcome },
    ImportsSettled(BarrierReport),
}

struct ImportWait {
    builder: StageBuilder,
    populated: Populated,
    barrier: LoadBarrier,
    outcomes: Vec<Option<ImportOutcome>>,
    started: Instant,
}

enum LifecycleState {
    NotStarted(StageBuilder),
    AwaitingImports(ImportWait),
    Complete(Stage),
    Failed(StageInitError),
    Cancelled,
    /// Only observed while a transition is in progress
    Taken,
}

type InitCompleteHook = Box<dyn FnOnce(&Stage)>;

/// Builds one stage, deferring the post-import phases to the load barrier
///
/// Completions from the asset store travel through a channel; [`pump`]
/// drains it on the loop thread, so stores may complete from any thread.
/// Dropping the lifecycle cancels outstanding imports.
///
/// [`pump`]: StageLifecycle::pump
pub struct StageLifecycle {
    state: LifecycleState,
    events_tx: Sender<StageEvent>,
    events_rx: Receiver<StageEvent>,
    cancel: CancellationToken,
    timeout: Option<Duration>,
    on_init_complete: Option<InitCompleteHook>,
}

impl StageLifecycle {
    pub fn new(level: LevelDefinition, config: StageConfig) -> Self {
        let timeout = config.import_timeout();
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            state: LifecycleState::NotStarted(StageBuilder::new(level, config)),
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
            timeout,
            on_init_complete: None,
        }
    }

    /// Register the hook run once the stage reaches InitComplete
    ///
    /// This is the point where GUI construction may begin.
    pub fn on_init_complete(&mut self, hook: impl FnOnce(&Stage) + 'static) {
        self.on_init_complete = Some(Box::new(hook));
    }

    /// Run the synchronous phases and issue the model imports
    ///
    /// Completions the store delivers inline are processed before this
    /// returns, so a stage without imports is complete on return.
    pub fn begin<H: RenderHost, S: AssetStore + ?Sized>(
        &mut self,
        ctx: &mut EngineContext<H>,
        store: &mut S,
    ) -> StageStatus {
        let mut builder = match std::mem::replace(&mut self.state, LifecycleState::Taken) {
            LifecycleState::NotStarted(builder) => builder,
            other => {
                warn!("Stage construction already started");
                self.state = other;
                return self.status();
            }
        };

        let populated = match builder.populate(ctx) {
            Ok(populated) => populated,
            Err(error) => {
                self.fail(error);
                return self.status();
            }
        };

        let requests = builder.import_requests();
        let settled_tx = self.events_tx.clone();
        let barrier = LoadBarrier::new(requests.len(), move |report| {
            let _ = settled_tx.send(StageEvent::ImportsSettled(report));
        });

        let count = requests.len();
        for (index, request) in requests.into_iter().enumerate() {
            let tx = self.events_tx.clone();
            let cancel = self.cancel.clone();
            store.import_model(
                request,
                self.cancel.clone(),
                Box::new(move |outcome| {
                    if cancel.is_cancelled() {
                        return;
                    }
                    // The stage is gone once the receiver is dropped
                    let _ = tx.send(StageEvent::Imported { index, outcome });
                }),
            );
        }

        self.state = LifecycleState::AwaitingImports(ImportWait {
            builder,
            populated,
            barrier,
            outcomes: vec![None; count],
            started: Instant::now(),
        });
        self.pump(ctx)
    }

    /// Process delivered completions; finishes the stage once all are in
    pub fn pump<H: RenderHost>(&mut self, ctx: &mut EngineContext<H>) -> StageStatus {
        self.pump_at(ctx, Instant::now())
    }

    /// [`pump`](Self::pump) with an explicit clock for the import timeout
    pub fn pump_at<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
        now: Instant,
    ) -> StageStatus {
        let LifecycleState::AwaitingImports(wait) = &mut self.state else {
            self.discard_late_events();
            return self.status();
        };

        let mut settled = Self::drain(&self.events_rx, wait);
        if settled.is_none() {
            if let Some(timeout) = self.timeout {
                if now.saturating_duration_since(wait.started) >= timeout {
                    Self::settle_outstanding(wait, timeout);
                    settled = Self::drain(&self.events_rx, wait);
                }
            }
        }

        if let Some(report) = settled {
            self.complete(ctx, report);
        }
        self.status()
    }

    fn drain(events: &Receiver<StageEvent>, wait: &mut ImportWait) -> Option<BarrierReport> {
        loop {
            match events.try_recv() {
                Ok(StageEvent::Imported { index, outcome }) => {
                    let Some(slot) = wait.outcomes.get_mut(index) else {
                        warn!(index, "Completion for an unknown import request");
                        continue;
                    };
                    if slot.is_some() {
                        warn!(index, "Duplicate completion for import request");
                        continue;
                    }
                    let result = outcome.as_ref().map(|_| ()).map_err(Clone::clone);
                    *slot = Some(outcome);
                    wait.barrier.notify_one_completed(result);
                }
                Ok(StageEvent::ImportsSettled(report)) => return Some(report),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    fn settle_outstanding(wait: &mut ImportWait, timeout: Duration) {
        let outstanding = wait.outcomes.iter().filter(|slot| slot.is_none()).count();
        warn!(
            outstanding,
            timeout_ms = timeout.as_millis() as u64,
            "Model imports timed out"
        );
        for slot in wait.outcomes.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(Err(LoadError::TimedOut));
            wait.barrier.notify_one_completed(Err(LoadError::TimedOut));
        }
    }

    fn complete<H: RenderHost>(&mut self, ctx: &mut EngineContext<H>, report: BarrierReport) {
        let wait = match std::mem::replace(&mut self.state, LifecycleState::Taken) {
            LifecycleState::AwaitingImports(wait) => wait,
            other => {
                self.state = other;
                return;
            }
        };
        let ImportWait {
            mut builder,
            populated,
            outcomes,
            ..
        } = wait;

        debug!(
            expected = report.expected,
            failures = report.failures.len(),
            "Imports settled"
        );
        builder.mark_imports_settled();

        let outcomes = outcomes
            .into_iter()
            .map(|slot| slot.unwrap_or(Err(LoadError::TimedOut)))
            .collect();
        let result = builder
            .materialize_imports(ctx, outcomes)
            .and_then(|imported| builder.finish(ctx, populated, imported));

        match result {
            Ok(stage) => {
                if let Some(hook) = self.on_init_complete.take() {
                    hook(&stage);
                }
                self.state = LifecycleState::Complete(stage);
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: StageInitError) {
        error!(error = %error, "Stage construction failed");
        self.state = LifecycleState::Failed(error);
    }

    fn discard_late_events(&self) {
        let late = self.events_rx.try_iter().count();
        if late > 0 {
            debug!(count = late, "Discarded late stage events");
        }
    }

    /// Abandon construction; outstanding completions are ignored
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        match self.state {
            LifecycleState::NotStarted(_) | LifecycleState::AwaitingImports(_) => {
                info!("Stage construction cancelled");
                self.state = LifecycleState::Cancelled;
            }
            _ => {}
        }
        self.discard_late_events();
    }

    pub fn status(&self) -> StageStatus {
        match self.state {
            LifecycleState::NotStarted(_) | LifecycleState::Taken => StageStatus::NotStarted,
            LifecycleState::AwaitingImports(_) => StageStatus::AwaitingImports,
            LifecycleState::Complete(_) => StageStatus::Complete,
            LifecycleState::Failed(_) => StageStatus::Failed,
            LifecycleState::Cancelled => StageStatus::Cancelled,
        }
    }

    /// Imports still outstanding while awaiting
    pub fn pending_imports(&self) -> usize {
        match &self.state {
            LifecycleState::AwaitingImports(wait) => wait.barrier.remaining(),
            _ => 0,
        }
    }

    pub fn stage(&self) -> Option<&Stage> {
        match &self.state {
            LifecycleState::Complete(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn stage_mut(&mut self) -> Option<&mut Stage> {
        match &mut self.state {
            LifecycleState::Complete(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StageInitError> {
        match &self.state {
            LifecycleState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Token shared with the stores serving this stage
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Take the finished stage or the construction error
    pub fn into_result(mut self) -> Result<Stage, StageInitError> {
        match std::mem::replace(&mut self.state, LifecycleState::Taken) {
            LifecycleState::Complete(stage) => Ok(stage),
            LifecycleState::Failed(error) => Err(error),
            LifecycleState::Cancelled => Err(StageInitError::Cancelled),
            other => {
                self.state = other;
                Err(StageInitError::Incomplete)
            }
        }
    }
}

impl Drop for StageLifecycle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for StageLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageLifecycle")
            .field("status", &self.status())
            .field("pending_imports", &self.pending_imports())
            .field("timeout", &self.timeout)
            .finish()
    }
}
