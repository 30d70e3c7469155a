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

//! Defines the types for polling error policies.
//!
//! # Example
//! ```
//! # use speech_gax::polling_error_policy::*;
//! // Keep polling while the resource is pending, or the status fetch fails,
//! // but stop after 50 attempts.
//! let policy = RetryPendingAndTransport.with_attempt_limit(50);
//! ```
//!
//! The helpers poll long-running server-side processes, such as corpus
//! analysis or model training, and need to (1) distinguish between conditions
//! that may resolve in a future attempt and conditions that will never
//! resolve, and (2) limit the number of attempts.
//!
//! Each attempt that does not reach a terminal state produces an error. A
//! resource that is still processing produces an error of kind
//! [Timeout][crate::error::ErrorKind::Timeout], a failed status fetch produces
//! an error of kind [Transport][crate::error::ErrorKind::Transport]. The policy
//! receives these errors and decides if the loop continues.
//!
//! Resources in a failed or unexpected state stop the loop before the policy
//! is consulted.

use crate::error::{Error, ErrorKind};
use crate::loop_state::LoopState;
use std::sync::Arc;

/// Determines how errors are handled in the polling loop.
///
/// Implementations of this trait determine if polling errors may resolve in
/// future attempts, and for how long the polling loop may continue.
pub trait PollingErrorPolicy: Send + Sync + std::fmt::Debug {
    /// Query the polling policy after an unsuccessful attempt.
    ///
    /// # Parameters
    /// * `attempt_count` - the number of attempts, including the attempt that
    ///   produced `error`. It is always non-zero.
    /// * `error` - the error produced by the last attempt.
    fn on_error(&self, attempt_count: u32, error: Error) -> LoopState;
}

/// A helper type to use [PollingErrorPolicy] in request options.
#[derive(Clone, Debug)]
pub struct PollingErrorPolicyArg(pub(crate) Arc<dyn PollingErrorPolicy>);

impl<T> std::convert::From<T> for PollingErrorPolicyArg
where
    T: PollingErrorPolicy + 'static,
{
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<PollingErrorPolicyArg> for Arc<dyn PollingErrorPolicy> {
    fn from(value: PollingErrorPolicyArg) -> Self {
        value.0
    }
}

// Shared policies can be decorated too, e.g. with an attempt limit.
impl PollingErrorPolicy for Arc<dyn PollingErrorPolicy> {
    fn on_error(&self, attempt_count: u32, error: Error) -> LoopState {
        self.as_ref().on_error(attempt_count, error)
    }
}

/// Extension trait for [PollingErrorPolicy]
pub trait PollingErrorPolicyExt: PollingErrorPolicy + Sized {
    /// Decorate a [PollingErrorPolicy] to limit the number of poll attempts.
    ///
    /// The policy passes through the results from the inner policy as long as
    /// `attempt_count < maximum_attempts`. Once the maximum number of attempts
    /// is reached, the policy returns [Exhausted][LoopState::Exhausted] if the
    /// inner policy returns [Continue][LoopState::Continue], and passes the
    /// inner policy result otherwise.
    ///
    /// # Example
    /// ```
    /// # use speech_gax::*;
    /// use polling_error_policy::*;
    /// let policy = RetryPending.with_attempt_limit(3);
    /// assert!(policy.on_error(1, pending()).is_continue());
    /// assert!(policy.on_error(2, pending()).is_continue());
    /// assert!(policy.on_error(3, pending()).is_exhausted());
    ///
    /// use speech_gax::error::Error;
    /// fn pending() -> Error { Error::timeout("still training") }
    /// ```
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: PollingErrorPolicy> PollingErrorPolicyExt for T {}

/// A polling policy that continues while the resource is pending, and when
/// the status fetch fails.
///
/// This is the default policy. It treats transport errors as transient, in the
/// same way as a resource that is still processing. All other errors stop the
/// loop.
///
/// This policy must be decorated to limit the number of polling attempts.
///
/// # Example
/// ```
/// # use speech_gax::polling_error_policy::*;
/// use speech_gax::error::Error;
/// let policy = RetryPendingAndTransport;
/// assert!(policy.on_error(1, Error::timeout("pending")).is_continue());
/// assert!(policy.on_error(1, Error::transport("reset")).is_continue());
/// assert!(policy.on_error(1, Error::no_work_item("empty")).is_permanent());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RetryPendingAndTransport;

impl PollingErrorPolicy for RetryPendingAndTransport {
    fn on_error(&self, _attempt_count: u32, error: Error) -> LoopState {
        match error.kind() {
            ErrorKind::Timeout | ErrorKind::Transport => LoopState::Continue(error),
            _ => LoopState::Permanent(error),
        }
    }
}

/// A polling policy that only continues while the resource is pending.
///
/// Use this policy if failures fetching the resource status should stop the
/// polling loop.
///
/// This policy must be decorated to limit the number of polling attempts.
///
/// # Example
/// ```
/// # use speech_gax::polling_error_policy::*;
/// use speech_gax::error::Error;
/// let policy = RetryPending;
/// assert!(policy.on_error(1, Error::timeout("pending")).is_continue());
/// assert!(policy.on_error(1, Error::transport("reset")).is_permanent());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RetryPending;

impl PollingErrorPolicy for RetryPending {
    fn on_error(&self, _attempt_count: u32, error: Error) -> LoopState {
        match error.kind() {
            ErrorKind::Timeout => LoopState::Continue(error),
            _ => LoopState::Permanent(error),
        }
    }
}

/// A polling policy decorator that limits the number of attempts.
///
/// This policy decorates an inner policy and limits the total number of
/// polling attempts. The policy passes through the results from the inner
/// policy as long as `attempt_count < maximum_attempts`. However, once the
/// maximum number of attempts is reached, the policy replaces any
/// [Continue][LoopState::Continue] result with
/// [Exhausted][LoopState::Exhausted].
///
/// The error is never wrapped, the last error is returned as-is.
///
/// # Parameters
/// * `P` - the inner polling policy, defaults to [RetryPendingAndTransport].
#[derive(Debug)]
pub struct LimitedAttemptCount<P = RetryPendingAndTransport>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    ///
    /// # Example
    /// ```
    /// # use speech_gax::polling_error_policy::*;
    /// use speech_gax::error::Error;
    /// let policy = LimitedAttemptCount::new(5);
    /// assert!(policy.on_error(10, Error::timeout("pending")).is_exhausted());
    /// ```
    pub fn new(maximum_attempts: u32) -> Self {
        Self {
            inner: RetryPendingAndTransport,
            maximum_attempts,
        }
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    ///
    /// # Example
    /// ```
    /// # use speech_gax::polling_error_policy::*;
    /// use speech_gax::error::Error;
    /// let policy = LimitedAttemptCount::custom(RetryPending, 2);
    /// assert!(policy.on_error(1, Error::timeout("pending")).is_continue());
    /// assert!(policy.on_error(2, Error::timeout("pending")).is_exhausted());
    /// ```
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }

    /// The maximum number of attempts.
    pub fn maximum_attempts(&self) -> u32 {
        self.maximum_attempts
    }
}

impl<P> PollingErrorPolicy for LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    fn on_error(&self, count: u32, error: Error) -> LoopState {
        match self.inner.on_error(count, error) {
            LoopState::Permanent(e) => LoopState::Permanent(e),
            LoopState::Exhausted(e) => LoopState::Exhausted(e),
            LoopState::Continue(e) => {
                if count >= self.maximum_attempts {
                    LoopState::Exhausted(e)
                } else {
                    LoopState::Continue(e)
                }
            }
        }
    }
}
