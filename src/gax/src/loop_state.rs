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

//! Polling loop control types.
//!
//! The poller turns every attempt that does not reach a terminal status into
//! an [Error]: a status that is still processing becomes a
//! [Timeout][crate::error::ErrorKind::Timeout] error, a failed status fetch
//! keeps its own kind. The [polling error policy] inspects that error and the
//! attempt count, and answers with a [LoopState]. The poller sleeps and
//! fetches the status again only on [LoopState::Continue]. Any other answer
//! ends the loop, and the error it carries is what the caller receives.
//!
//! Applications only need to use these types when implementing their own
//! polling error policies.
//!
//! [polling error policy]: crate::polling_error_policy::PollingErrorPolicy

use crate::error::Error;

/// The decision a polling error policy makes after an attempt.
#[derive(Debug)]
pub enum LoopState {
    /// Stop polling, the error cannot be fixed by asking again.
    ///
    /// For example, the status fetch failed with a transport error and the
    /// policy only tolerates statuses that are still processing.
    Permanent(Error),

    /// Stop polling, the policy ran out of attempts.
    ///
    /// The error would be worth another attempt, but the attempt limit was
    /// reached. For a status that is still processing this is the polling
    /// timeout.
    Exhausted(Error),

    /// Sleep for the backoff period and fetch the status again.
    Continue(Error),
}

impl LoopState {
    pub fn is_permanent(&self) -> bool {
        match &self {
            Self::Permanent(_) => true,
            Self::Exhausted(_) | Self::Continue(_) => false,
        }
    }
    pub fn is_exhausted(&self) -> bool {
        match &self {
            Self::Exhausted(_) => true,
            Self::Permanent(_) | Self::Continue(_) => false,
        }
    }
    pub fn is_continue(&self) -> bool {
        match &self {
            Self::Continue(_) => true,
            Self::Permanent(_) | Self::Exhausted(_) => false,
        }
    }

    /// Consumes the decision and returns the error it carries.
    pub fn into_error(self) -> Error {
        match self {
            Self::Permanent(e) | Self::Exhausted(e) | Self::Continue(e) => e,
        }
    }
}
