//! Work deferred to the next turn of the async runtime.
//!
//! On a current-thread runtime the work is spawned right away; it cannot run
//! before the caller yields. On a multi-thread runtime an idle worker would
//! pick it up immediately, so the spawn is held back until the handle is
//! first polled. Dropping an unpolled handle spawns the work detached.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;

use crate::error::TimingWarning;
use crate::measurement::Measurement;
use crate::report::Reporter;

/// Values a deferred operation can resolve to.
pub trait DeferredOutput: Send + 'static {
    /// Value to resolve with when the task failed to produce one.
    fn on_task_failure(warning: TimingWarning) -> Self;
}

impl DeferredOutput for Measurement {
    fn on_task_failure(warning: TimingWarning) -> Self {
        Measurement::Invalid(warning)
    }
}

impl DeferredOutput for f64 {
    fn on_task_failure(_warning: TimingWarning) -> Self {
        0.0
    }
}

type Spawner<T> = Box<dyn FnOnce() -> JoinHandle<T> + Send>;

enum State<T> {
    Ready(Option<T>),
    /// Not yet handed to the runtime
    Queued(Option<Spawner<T>>),
    Spawned(JoinHandle<T>),
}

/// Handle to a deferred operation.
///
/// Resolves exactly once. Dropping it detaches the task, which still runs.
/// There is no cancellation.
///
/// On a multi-thread runtime the work starts when the handle is first
/// awaited (or dropped), not when it is created.
pub struct Deferred<T> {
    state: State<T>,
    reporter: Arc<dyn Reporter>,
}

impl<T: DeferredOutput> Deferred<T> {
    /// Run `work` on the next runtime turn, or inline when no tokio runtime
    /// is current.
    pub(crate) fn schedule<F>(operation: &'static str, reporter: Arc<dyn Reporter>, work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => Self {
                state: State::Spawned(handle.spawn(async move { work() })),
                reporter,
            },
            Ok(handle) => {
                let spawner: Spawner<T> = Box::new(move || handle.spawn(async move { work() }));
                Self {
                    state: State::Queued(Some(spawner)),
                    reporter,
                }
            }
            Err(_) => {
                reporter.warn(&TimingWarning::SchedulerUnavailable { operation });
                Self {
                    state: State::Ready(Some(work())),
                    reporter,
                }
            }
        }
    }

    /// Whether the work ran inline and the value is already available.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(Some(_)))
    }

    fn fail(&self, warning: TimingWarning) -> T {
        self.reporter.warn(&warning);
        T::on_task_failure(warning)
    }
}

impl<T: DeferredOutput + Unpin> Future for Deferred<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let this = self.get_mut();
        if let State::Queued(spawner) = &mut this.state {
            match spawner.take() {
                Some(spawn) => this.state = State::Spawned(spawn()),
                None => {
                    return Poll::Ready(this.fail(TimingWarning::DeferredTaskFailed(
                        "task was never spawned".to_string(),
                    )));
                }
            }
        }

        match &mut this.state {
            State::Ready(value) => match value.take() {
                Some(value) => Poll::Ready(value),
                None => Poll::Ready(this.fail(TimingWarning::DeferredTaskFailed(
                    "polled after completion".to_string(),
                ))),
            },
            State::Spawned(handle) => match Pin::new(handle).poll(cx) {
                Poll::Ready(Ok(value)) => Poll::Ready(value),
                Poll::Ready(Err(err)) => {
                    Poll::Ready(this.fail(TimingWarning::DeferredTaskFailed(err.to_string())))
                }
                Poll::Pending => Poll::Pending,
            },
            State::Queued(_) => Poll::Pending,
        }
    }
}

impl<T> Drop for Deferred<T> {
    fn drop(&mut self) {
        if let State::Queued(spawner) = &mut self.state {
            if let Some(spawn) = spawner.take() {
                drop(spawn());
            }
        }
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::Ready(Some(_)) => "ready",
            State::Ready(None) => "taken",
            State::Queued(_) => "queued",
            State::Spawned(_) => "spawned",
        };
        f.debug_struct("Deferred").field("state", &state).finish()
    }
}
