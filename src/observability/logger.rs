use std::future::Future;

use tracing::instrument::{Instrument, WithSubscriber};
use tracing::{Dispatch, Span};

/// Logging handle passed into the manager and dispatcher.
///
/// Events raised while an operation runs go to the wrapped dispatch only, so
/// nothing depends on a process-wide default subscriber.
#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Discards everything.
    pub fn noop() -> Self {
        Self { dispatch: Dispatch::none() }
    }

    /// Captures whatever dispatch is the default at the call site.
    pub fn current() -> Self {
        Self { dispatch: tracing::dispatcher::get_default(|d| d.clone()) }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Runs `fut` with this logger's dispatch inside the span built by `span`.
    pub fn scope<F>(&self, span: impl FnOnce() -> Span, fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        let span = tracing::dispatcher::with_default(&self.dispatch, span);
        fut.instrument(span).with_subscriber(self.dispatch.clone())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}
