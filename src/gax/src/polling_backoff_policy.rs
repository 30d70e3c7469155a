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

//! Defines the trait for polling backoff policies and a fixed interval
//! implementation.
//!
//! The helpers poll server-side processes until they complete. In between
//! attempts they wait, to avoid overloading the service.
//!
//! The speech-to-text service recommends a fixed interval between status
//! checks, so [FixedInterval] is the only implementation provided.
//!
//! # Example
//! ```
//! # use speech_gax::polling_backoff_policy::*;
//! use std::time::Duration;
//! let policy = FixedInterval::new(Duration::from_secs(5));
//! assert_eq!(policy.wait_period(1), Duration::from_secs(5));
//! assert_eq!(policy.wait_period(7), Duration::from_secs(5));
//! ```

use std::sync::Arc;
use std::time::Duration;

/// Defines the trait implemented by all backoff strategies.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the delay before the next attempt.
    ///
    /// # Parameters
    /// * `attempt_count` - the number of poll queries. This method is always
    ///   called after the first attempt.
    fn wait_period(&self, attempt_count: u32) -> Duration;
}

/// A helper type to use [PollingBackoffPolicy] in request options.
#[derive(Clone, Debug)]
pub struct PollingBackoffPolicyArg(pub(crate) Arc<dyn PollingBackoffPolicy>);

impl<T: PollingBackoffPolicy + 'static> std::convert::From<T> for PollingBackoffPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn PollingBackoffPolicy>> for PollingBackoffPolicyArg {
    fn from(value: Arc<dyn PollingBackoffPolicy>) -> Self {
        Self(value)
    }
}

impl std::convert::From<PollingBackoffPolicyArg> for Arc<dyn PollingBackoffPolicy> {
    fn from(value: PollingBackoffPolicyArg) -> Self {
        value.0
    }
}

/// Waits the same amount of time between all attempts.
///
/// Polling backoff policies should not use jitter: the goal is to check the
/// status at a predictable cadence, not to spread load after a failure.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_INTERVAL)
    }
}

impl PollingBackoffPolicy for FixedInterval {
    fn wait_period(&self, _attempt_count: u32) -> Duration {
        self.interval
    }
}
