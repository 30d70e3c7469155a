// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The poller implementation.
//!
//! Each call to `poll()` performs exactly one status fetch. The result of the
//! fetch is classified, and any error (including the synthetic error for a
//! process that is still running) is handed to the polling error policy. The
//! policy decides if the loop continues.

use crate::{
    Classification, Error, Poller, PollingBackoffPolicy, PollingErrorPolicy, PollingResult, Result,
    StatusClassifier, StatusReport, StillProcessing,
};
use gax::loop_state::LoopState;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// Creates a new `impl Poller<T>` from a status fetch and a classifier.
///
/// # Parameters
/// * `error_policy` - decides if the loop continues after a status fetch
///   fails, or after the process is reported as still running. Typically this
///   policy limits the number of attempts.
/// * `backoff_policy` - the delay between attempts in
///   [until_done()][Poller::until_done].
/// * `classifier` - classifies the status values.
/// * `operation` - a name for the polled process, used in error messages and
///   logs.
/// * `fetch` - fetches the current status.
///
/// # Example
/// ```
/// # use speech_lro::*;
/// # tokio_test::block_on(async {
/// use gax::polling_backoff_policy::FixedInterval;
/// use gax::polling_error_policy::{PollingErrorPolicyExt, RetryPending};
/// use std::sync::Arc;
/// use std::time::Duration;
/// let mut poller = new_poller(
///     Arc::new(RetryPending.with_attempt_limit(5)),
///     Arc::new(FixedInterval::new(Duration::from_millis(1))),
///     |status: &i32| if *status == 0 { Classification::Done } else { Classification::Processing },
///     "example",
///     || async { Ok(0) },
/// );
/// let first = poller.poll().await;
/// assert!(matches!(first, Some(PollingResult::Completed(Ok(0)))));
/// assert!(poller.poll().await.is_none());
/// # });
/// ```
pub fn new_poller<T, C, F, Fut>(
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    classifier: C,
    operation: impl Into<String>,
    fetch: F,
) -> impl Poller<T>
where
    T: Send,
    C: StatusClassifier<T>,
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
{
    PollerImpl {
        error_policy,
        backoff_policy,
        classifier,
        operation: operation.into(),
        fetch,
        attempt_count: 0,
        done: false,
        status: PhantomData,
    }
}

struct PollerImpl<T, C, F> {
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    classifier: C,
    operation: String,
    fetch: F,
    attempt_count: u32,
    done: bool,
    status: PhantomData<fn() -> T>,
}

impl<T, C, F> crate::sealed::Poller for PollerImpl<T, C, F> {}

impl<T, C, F, Fut> Poller<T> for PollerImpl<T, C, F>
where
    T: Send,
    C: StatusClassifier<T>,
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
{
    async fn poll(&mut self) -> Option<PollingResult<T>> {
        if self.done {
            return None;
        }
        self.attempt_count += 1;
        let result = (self.fetch)().await;
        let (done, poll) = handle_poll(
            self.error_policy.as_ref(),
            &self.classifier,
            &self.operation,
            self.attempt_count,
            result,
        );
        self.done = done;
        Some(poll)
    }

    async fn until_done(mut self) -> Result<T> {
        while let Some(p) = self.poll().await {
            match p {
                // Return, the process completed or the polling policy stopped
                // the loop.
                PollingResult::Completed(r) => return r,
                // Continue, the process is still running and the polling
                // policy allows more attempts.
                PollingResult::InProgress(_) => (),
                // Continue, the polling policy decided the error is
                // recoverable.
                PollingResult::PollingError(_) => (),
            }
            let delay = self.backoff_policy.wait_period(self.attempt_count);
            tokio::time::sleep(delay).await;
        }
        // Only reachable if the application called `poll()` until completion
        // before calling `until_done()`.
        Err(Error::invalid_argument(AlreadyCompleted(self.operation)))
    }

    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<T>> + Unpin {
        use futures::stream::unfold;
        Box::pin(unfold(Some(self), move |state| async move {
            if let Some(mut poller) = state {
                if let Some(pr) = poller.poll().await {
                    return Some((pr, Some(poller)));
                }
            };
            None
        }))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("the polling loop for {0} has already completed")]
struct AlreadyCompleted(String);

/// Handles the result of one status fetch.
///
/// Returns `true` in the first element if the polling loop must stop.
fn handle_poll<T, C>(
    error_policy: &dyn PollingErrorPolicy,
    classifier: &C,
    operation: &str,
    attempt_count: u32,
    result: Result<T>,
) -> (bool, PollingResult<T>)
where
    C: StatusClassifier<T> + ?Sized,
{
    let status = match result {
        Ok(s) => s,
        Err(e) => {
            let state = error_policy.on_error(attempt_count, e);
            return handle_polling_error(state, operation, attempt_count);
        }
    };
    let classification = classifier.classify(&status);
    tracing::debug!(operation, attempt_count, ?classification, "polled status");
    match classification {
        Classification::Done => (true, PollingResult::Completed(Ok(status))),
        Classification::Failed => {
            let report = StatusReport::new(operation, classifier.describe(&status));
            (
                true,
                PollingResult::Completed(Err(Error::terminal_failure(report))),
            )
        }
        Classification::Unexpected => {
            let report = StatusReport::new(operation, classifier.describe(&status));
            (
                true,
                PollingResult::Completed(Err(Error::unexpected_status(report))),
            )
        }
        Classification::Processing => {
            let pending = Error::timeout(StillProcessing::new(operation, attempt_count));
            match error_policy.on_error(attempt_count, pending) {
                LoopState::Continue(_) => (false, PollingResult::InProgress(Some(status))),
                LoopState::Exhausted(e) | LoopState::Permanent(e) => {
                    tracing::debug!(operation, attempt_count, "polling loop stopped: {e}");
                    (true, PollingResult::Completed(Err(e)))
                }
            }
        }
    }
}

fn handle_polling_error<T>(
    state: LoopState,
    operation: &str,
    attempt_count: u32,
) -> (bool, PollingResult<T>) {
    match state {
        LoopState::Continue(e) => {
            tracing::warn!(
                operation,
                attempt_count,
                "retrying status fetch after error: {e}"
            );
            (false, PollingResult::PollingError(e))
        }
        LoopState::Exhausted(e) | LoopState::Permanent(e) => {
            tracing::debug!(operation, attempt_count, "status fetch failed: {e}");
            (true, PollingResult::Completed(Err(e)))
        }
    }
}
