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

//! Types and functions to wait for server-side processes to complete.
//!
//! Some operations in the speech-to-text service start a process that runs in
//! the background, for example, analyzing the corpora of a custom language
//! model, or training the model. The service offers no notification when such
//! processes complete, the application must check the status periodically.
//!
//! This crate implements the polling loop. The loop is agnostic of the
//! transport: it calls an application-supplied function to fetch the current
//! status, and an application-supplied [StatusClassifier] to decide if the
//! status is terminal.
//!
//! # Example
//! ```
//! # use speech_lro::*;
//! # use gax::options::PollConfig;
//! # tokio_test::block_on(async {
//! use std::time::Duration;
//! let config = PollConfig::default()
//!     .with_interval(Duration::from_millis(1))
//!     .with_times(3);
//! let fetch = || async { Ok::<_, Error>("ready") };
//! let classify = |status: &&str| match *status {
//!     "ready" => Classification::Done,
//!     "training" => Classification::Processing,
//!     "failed" => Classification::Failed,
//!     _ => Classification::Unexpected,
//! };
//! let status = poll_until_terminal(fetch, classify, &config).await?;
//! assert_eq!(status, "ready");
//! # Ok::<(), Error>(()) });
//! ```

pub use gax::Result;
pub use gax::error::Error;
pub use gax::polling_backoff_policy::PollingBackoffPolicy;
pub use gax::polling_error_policy::PollingErrorPolicy;
use gax::options::PollConfig;
use gax::polling_error_policy::{PollingErrorPolicyExt, RetryPendingAndTransport};
use std::future::Future;
use std::sync::Arc;

mod poller;
pub use poller::new_poller;

/// The classification of a status value returned by the status fetch.
///
/// The polling loop never inspects status values directly, a
/// [StatusClassifier] maps each value to one of these variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The process is still running, poll again.
    Processing,
    /// The process completed successfully.
    Done,
    /// The process completed with an error. Polling again will not help.
    Failed,
    /// The status is not recognized. Polling stops.
    Unexpected,
}

/// Maps the status values of a resource to a [Classification].
///
/// Any `Fn(&T) -> Classification` closure is a classifier. Implement the trait
/// directly to include the status in error messages.
pub trait StatusClassifier<T>: Send + Sync {
    /// Classifies a status value.
    fn classify(&self, status: &T) -> Classification;

    /// Describes the status value, used in error messages.
    fn describe(&self, _status: &T) -> String {
        "unknown".to_string()
    }
}

impl<T, F> StatusClassifier<T> for F
where
    F: Fn(&T) -> Classification + Send + Sync,
{
    fn classify(&self, status: &T) -> Classification {
        self(status)
    }
}

/// The result of polling a server-side process.
///
/// # Parameters
/// * `T` - the status type. The poller returns the status value while the
///   process is running, and when it completes successfully.
#[derive(Debug)]
pub enum PollingResult<T> {
    /// The process is still running.
    InProgress(Option<T>),
    /// The process completed, or the polling loop stopped.
    Completed(Result<T>),
    /// An error trying to fetch the status.
    ///
    /// The polling error policy decided the error may disappear in the next
    /// attempt.
    PollingError(Error),
}

/// The trait implemented by the pollers.
///
/// # Parameters
/// * `T` - the status type returned by the status fetch.
pub trait Poller<T>: Send + sealed::Poller {
    /// Query the current status of the process.
    ///
    /// Performs exactly one status fetch. Returns `None` once the poller has
    /// returned a [PollingResult::Completed] value.
    fn poll(&mut self) -> impl Future<Output = Option<PollingResult<T>>> + Send;

    /// Poll the process until it completes, or the polling policy stops the
    /// loop.
    ///
    /// Waits between attempts as prescribed by the backoff policy.
    fn until_done(self) -> impl Future<Output = Result<T>> + Send;

    /// Convert a poller to a [Stream][futures::Stream].
    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<T>> + Unpin;
}

/// Polls until the process reaches a terminal state.
///
/// Calls `fetch` up to `config.times()` times, waiting `config.interval()`
/// between attempts. The loop stops as soon as `classifier` reports the status
/// as done, failed, or unexpected.
///
/// Returns the last status value if the process completes successfully.
/// Otherwise, the error kind indicates why the loop stopped:
/// * [Timeout][gax::error::ErrorKind::Timeout]: the process was still running
///   after the last attempt.
/// * [TerminalFailure][gax::error::ErrorKind::TerminalFailure]: the process
///   failed.
/// * [UnexpectedStatus][gax::error::ErrorKind::UnexpectedStatus]: the status
///   was not recognized.
/// * [Transport][gax::error::ErrorKind::Transport]: `fetch` failed on the last
///   attempt.
/// * [InvalidArgument][gax::error::ErrorKind::InvalidArgument]: `config` is
///   invalid, `fetch` is never called.
///
/// Failures in `fetch` are retried, use [new_poller] with a different
/// [PollingErrorPolicy] to change this behavior.
pub async fn poll_until_terminal<T, C, F, Fut>(
    fetch: F,
    classifier: C,
    config: &PollConfig,
) -> Result<T>
where
    T: Send,
    C: StatusClassifier<T>,
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
{
    config.validate()?;
    let error_policy = RetryPendingAndTransport.with_attempt_limit(config.times());
    new_poller(
        Arc::new(error_policy),
        Arc::new(config.backoff_policy()),
        classifier,
        "status",
        fetch,
    )
    .until_done()
    .await
}

/// The process was still running after an attempt.
///
/// This is the source of the [Timeout][gax::error::ErrorKind::Timeout] errors
/// created by the poller.
#[derive(Debug, thiserror::Error)]
#[error("{operation} is still processing after {attempt_count} attempt(s)")]
pub struct StillProcessing {
    operation: String,
    attempt_count: u32,
}

impl StillProcessing {
    pub(crate) fn new(operation: &str, attempt_count: u32) -> Self {
        Self {
            operation: operation.to_string(),
            attempt_count,
        }
    }

    /// The name of the polled operation.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The number of attempts, including the attempt reporting this status.
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }
}

/// The process reported a failed or unrecognized status.
///
/// This is the source of the
/// [TerminalFailure][gax::error::ErrorKind::TerminalFailure] and
/// [UnexpectedStatus][gax::error::ErrorKind::UnexpectedStatus] errors created
/// by the poller.
#[derive(Debug, thiserror::Error)]
#[error("{operation} reports status {status}")]
pub struct StatusReport {
    operation: String,
    status: String,
}

impl StatusReport {
    pub(crate) fn new(operation: &str, status: String) -> Self {
        Self {
            operation: operation.to_string(),
            status,
        }
    }

    /// The name of the polled operation.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The description of the status, as returned by
    /// [StatusClassifier::describe].
    pub fn status(&self) -> &str {
        &self.status
    }
}

pub(crate) mod sealed {
    pub trait Poller {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::time::Duration;

    #[test]
    fn closure_classifier() {
        let classifier = |v: &i32| match v {
            0 => Classification::Processing,
            1 => Classification::Done,
            2 => Classification::Failed,
            _ => Classification::Unexpected,
        };
        assert_eq!(classifier.classify(&0), Classification::Processing);
        assert_eq!(classifier.classify(&1), Classification::Done);
        assert_eq!(classifier.classify(&2), Classification::Failed);
        assert_eq!(classifier.classify(&3), Classification::Unexpected);
        assert_eq!(classifier.describe(&3), "unknown");
    }

    #[test]
    fn still_processing() {
        let e = StillProcessing::new("customization abc", 3);
        assert_eq!(e.operation(), "customization abc");
        assert_eq!(e.attempt_count(), 3);
        let fmt = e.to_string();
        assert!(fmt.contains("customization abc"), "{fmt}");
        assert!(fmt.contains("3 attempt"), "{fmt}");
    }

    #[test]
    fn status_report() {
        let e = StatusReport::new("customization abc", "failed".to_string());
        assert_eq!(e.operation(), "customization abc");
        assert_eq!(e.status(), "failed");
        let fmt = e.to_string();
        assert!(fmt.contains("customization abc"), "{fmt}");
        assert!(fmt.contains("failed"), "{fmt}");
    }

    #[tokio::test]
    async fn invalid_config() {
        let config = PollConfig::default().with_times(0);
        let got = poll_until_terminal(never_called, |_: &i32| Classification::Done, &config).await;
        let err = got.unwrap_err();
        assert!(err.is_invalid_argument(), "{err:?}");

        let config = PollConfig::default().with_interval(Duration::ZERO);
        let got = poll_until_terminal(never_called, |_: &i32| Classification::Done, &config).await;
        let err = got.unwrap_err();
        assert!(err.is_invalid_argument(), "{err:?}");
        assert!(err.source().is_some(), "{err:?}");
    }

    async fn never_called() -> Result<i32> {
        panic!("fetch should not be called")
    }
}
