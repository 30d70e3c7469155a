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

//! Polling configuration and per request options.
//!
//! The defaults are intended to work for most applications: the helpers
//! check the status every 5 seconds, at most 30 times. Applications waiting
//! for large corpora, or for models with a lot of training data, may need to
//! wait longer.
//!
//! Each request builder owns a [RequestOptions] value. The builder methods
//! modify the options, which are immutable once the request is sent.

use crate::Result;
use crate::error::Error;
use crate::polling_backoff_policy::{FixedInterval, PollingBackoffPolicy, PollingBackoffPolicyArg};
use crate::polling_error_policy::{
    LimitedAttemptCount, PollingErrorPolicy, PollingErrorPolicyArg, RetryPendingAndTransport,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;

/// The default delay between polling attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// The default number of polling attempts.
pub const DEFAULT_TIMES: u32 = 30;

/// The timing parameters for one polling loop.
///
/// # Example
/// ```
/// # use speech_gax::options::PollConfig;
/// use std::time::Duration;
/// let config = PollConfig::default()
///     .with_interval(Duration::from_secs(10))
///     .with_times(60);
/// assert_eq!(config.interval(), Duration::from_secs(10));
/// assert_eq!(config.times(), 60);
/// # assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    times: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            times: DEFAULT_TIMES,
        }
    }
}

impl PollConfig {
    /// Changes the delay between attempts.
    pub fn with_interval<T: Into<Duration>>(mut self, v: T) -> Self {
        self.interval = v.into();
        self
    }

    /// Changes the maximum number of attempts.
    pub fn with_times(mut self, v: u32) -> Self {
        self.times = v;
        self
    }

    /// The delay between attempts.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The maximum number of attempts.
    pub fn times(&self) -> u32 {
        self.times
    }

    /// Verifies both the interval and the number of attempts are positive.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::invalid_argument(InvalidPollConfig::Interval));
        }
        if self.times == 0 {
            return Err(Error::invalid_argument(InvalidPollConfig::Times));
        }
        Ok(())
    }

    /// The backoff policy implementing this configuration.
    pub fn backoff_policy(&self) -> FixedInterval {
        FixedInterval::new(self.interval)
    }
}

/// The reason a [PollConfig] is rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidPollConfig {
    #[error("the polling interval must be greater than zero")]
    Interval,
    #[error("the number of polling attempts must be greater than zero")]
    Times,
}

/// A set of options configuring a single request.
///
/// Application only use this type directly in mocks, where they may want to
/// verify their application has configured all the right request options.
///
/// All other code uses this type indirectly, via the per-request builders.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    poll_config: PollConfig,
    polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
    headers: HeaderMap,
}

impl RequestOptions {
    /// Get the polling configuration.
    pub fn poll_config(&self) -> &PollConfig {
        &self.poll_config
    }

    /// Sets the polling configuration.
    pub fn set_poll_config(&mut self, v: PollConfig) {
        self.poll_config = v;
    }

    /// Get the current polling error policy override, if any.
    pub fn polling_error_policy(&self) -> &Option<Arc<dyn PollingErrorPolicy>> {
        &self.polling_error_policy
    }

    /// Sets the polling error policy.
    ///
    /// The policy is always decorated with the attempt limit from the
    /// [PollConfig].
    pub fn set_polling_error_policy<V: Into<PollingErrorPolicyArg>>(&mut self, v: V) {
        self.polling_error_policy = Some(v.into().into());
    }

    /// The polling error policy for this request, limited to the configured
    /// number of attempts.
    pub fn effective_polling_error_policy(&self) -> Arc<dyn PollingErrorPolicy> {
        let times = self.poll_config.times();
        match self.polling_error_policy.clone() {
            Some(p) => Arc::new(LimitedAttemptCount::custom(p, times)),
            None => Arc::new(LimitedAttemptCount::custom(RetryPendingAndTransport, times)),
        }
    }

    /// Get the current polling backoff policy override, if any.
    pub fn polling_backoff_policy(&self) -> &Option<Arc<dyn PollingBackoffPolicy>> {
        &self.polling_backoff_policy
    }

    /// Sets the polling backoff policy.
    ///
    /// The policy replaces the fixed interval from the [PollConfig]. The
    /// number of attempts is still limited by the [PollConfig].
    pub fn set_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(&mut self, v: V) {
        self.polling_backoff_policy = Some(v.into().into());
    }

    /// The polling backoff policy for this request.
    ///
    /// Defaults to a [FixedInterval] with the configured interval.
    pub fn effective_polling_backoff_policy(&self) -> Arc<dyn PollingBackoffPolicy> {
        match self.polling_backoff_policy.clone() {
            Some(p) => p,
            None => Arc::new(self.poll_config.backoff_policy()),
        }
    }

    /// Additional headers sent with the request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the additional headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// Implementations of this trait provide setters to configure request options.
///
/// The request builders for each operation implement this trait.
pub trait RequestOptionsBuilder: internal::RequestBuilder {
    /// Sets the delay between polling attempts.
    fn with_interval<V: Into<Duration>>(self, v: V) -> Self;

    /// Sets the maximum number of polling attempts.
    fn with_times(self, v: u32) -> Self;

    /// Sets the polling error policy configuration.
    fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(self, v: V) -> Self;

    /// Sets the polling backoff policy configuration.
    fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(self, v: V) -> Self;

    /// Adds a header to the request, replacing any previous value.
    fn with_header(self, name: HeaderName, value: HeaderValue) -> Self;
}

#[doc(hidden)]
pub mod internal {
    //! This module contains implementation details. It is not part of the
    //! public API. Types inside may be changed or removed without warnings.
    //! Applications should not use any types contained within.
    use super::RequestOptions;

    /// Simplify implementation of the [super::RequestOptionsBuilder] trait in
    /// generated code.
    pub trait RequestBuilder {
        fn request_options(&mut self) -> &mut RequestOptions;
    }
}

/// Implements the sealed [RequestOptionsBuilder] trait.
impl<T> RequestOptionsBuilder for T
where
    T: internal::RequestBuilder,
{
    fn with_interval<V: Into<Duration>>(mut self, v: V) -> Self {
        let config = self.request_options().poll_config().with_interval(v);
        self.request_options().set_poll_config(config);
        self
    }

    fn with_times(mut self, v: u32) -> Self {
        let config = self.request_options().poll_config().with_times(v);
        self.request_options().set_poll_config(config);
        self
    }

    fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_polling_error_policy(v);
        self
    }

    fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_polling_backoff_policy(v);
        self
    }

    fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.request_options().headers_mut().insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling_error_policy::RetryPending;

    #[derive(Debug, Default)]
    struct TestBuilder {
        request_options: RequestOptions,
    }
    impl internal::RequestBuilder for TestBuilder {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.request_options
        }
    }

    #[test]
    fn poll_config_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.interval(), Duration::from_millis(5000));
        assert_eq!(config.times(), 30);
        assert!(config.validate().is_ok(), "{config:?}");
        assert_eq!(config.backoff_policy().interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn poll_config_validate() {
        use std::error::Error as _;

        let config = PollConfig::default().with_interval(Duration::ZERO);
        let err = config.validate().unwrap_err();
        assert!(err.is_invalid_argument(), "{err:?}");
        let source = err
            .source()
            .and_then(|e| e.downcast_ref::<InvalidPollConfig>());
        assert_eq!(source, Some(&InvalidPollConfig::Interval), "{err:?}");

        let config = PollConfig::default().with_times(0);
        let err = config.validate().unwrap_err();
        assert!(err.is_invalid_argument(), "{err:?}");
        let source = err
            .source()
            .and_then(|e| e.downcast_ref::<InvalidPollConfig>());
        assert_eq!(source, Some(&InvalidPollConfig::Times), "{err:?}");
    }

    #[test]
    fn request_options_builder() {
        let builder = TestBuilder::default()
            .with_interval(Duration::from_millis(10))
            .with_times(3)
            .with_polling_error_policy(RetryPending)
            .with_header(
                http::header::USER_AGENT,
                HeaderValue::from_static("test/1.0"),
            );
        let options = builder.request_options;
        assert_eq!(
            options.headers().get(http::header::USER_AGENT),
            Some(&HeaderValue::from_static("test/1.0"))
        );
        assert_eq!(options.poll_config().interval(), Duration::from_millis(10));
        assert_eq!(options.poll_config().times(), 3);
        assert!(options.polling_error_policy().is_some(), "{options:?}");
    }

    #[test]
    fn effective_policy_default() {
        let mut options = RequestOptions::default();
        options.set_poll_config(PollConfig::default().with_times(2));
        let policy = options.effective_polling_error_policy();
        assert!(policy.on_error(1, Error::transport("err")).is_continue());
        assert!(policy.on_error(2, Error::timeout("err")).is_exhausted());
        assert!(policy.on_error(1, Error::no_work_item("err")).is_permanent());
    }

    #[test]
    fn effective_policy_custom() {
        let mut options = RequestOptions::default();
        options.set_poll_config(PollConfig::default().with_times(2));
        options.set_polling_error_policy(RetryPending);
        let policy = options.effective_polling_error_policy();
        assert!(policy.on_error(1, Error::transport("err")).is_permanent());
        assert!(policy.on_error(1, Error::timeout("err")).is_continue());
        assert!(policy.on_error(2, Error::timeout("err")).is_exhausted());
    }

    #[test]
    fn effective_backoff_policy_default() {
        let mut options = RequestOptions::default();
        options.set_poll_config(PollConfig::default().with_interval(Duration::from_millis(20)));
        assert!(options.polling_backoff_policy().is_none(), "{options:?}");
        let policy = options.effective_polling_backoff_policy();
        assert_eq!(policy.wait_period(1), Duration::from_millis(20));
        assert_eq!(policy.wait_period(5), Duration::from_millis(20));
    }

    #[test]
    fn effective_backoff_policy_custom() {
        let builder = TestBuilder::default()
            .with_interval(Duration::from_millis(20))
            .with_polling_backoff_policy(FixedInterval::new(Duration::from_millis(75)));
        let options = builder.request_options;
        assert!(options.polling_backoff_policy().is_some(), "{options:?}");
        let policy = options.effective_polling_backoff_policy();
        assert_eq!(policy.wait_period(1), Duration::from_millis(75));
        assert_eq!(options.poll_config().interval(), Duration::from_millis(20));
    }

    #[test]
    fn headers() {
        let mut options = RequestOptions::default();
        assert!(options.headers().is_empty());
        options.headers_mut().insert(
            http::header::USER_AGENT,
            http::HeaderValue::from_static("test/1.0"),
        );
        assert_eq!(
            options.headers().get(http::header::USER_AGENT),
            Some(&http::HeaderValue::from_static("test/1.0"))
        );
    }
}
