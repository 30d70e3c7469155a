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

//! Speech-to-Text API helpers.
//!
//! This crate contains the error type, the polling configuration, and the
//! polling policies used by the speech-to-text helpers. Applications only need
//! to use it directly when customizing the polling loops, or when implementing
//! the service stubs.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping service calls.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the helpers.
pub mod error;

pub mod loop_state;
pub mod options;
pub mod polling_backoff_policy;
pub mod polling_error_policy;
