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

//! Credentials forwarded to the service stubs.
//!
//! The helpers never use the credentials directly. They are part of the
//! client configuration, and forwarded to the stub when opening a recognize
//! stream. The stub uses them to authenticate the connection.

use crate::Result;
use crate::error::ConfigError;
use http::{HeaderMap, HeaderValue};
use std::sync::Arc;

/// Implementations of this trait produce the authentication headers for a
/// request.
pub trait Authenticator: std::fmt::Debug + Send + Sync {
    /// A short name for the authentication mechanism, e.g. `bearerToken`.
    fn authentication_type(&self) -> &str;

    /// The headers to authenticate a request.
    fn headers(&self) -> Result<HeaderMap>;
}

/// A cheap to clone handle to an [Authenticator].
///
/// # Example
/// ```
/// # use speech_to_text::credentials::*;
/// let credentials = Credentials::from(BearerToken::new("my-token"));
/// assert_eq!(credentials.authentication_type(), "bearerToken");
/// # Ok::<(), speech_to_text::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Credentials {
    inner: Arc<dyn Authenticator>,
}

impl Credentials {
    /// A short name for the authentication mechanism.
    pub fn authentication_type(&self) -> &str {
        self.inner.authentication_type()
    }

    /// The headers to authenticate a request.
    pub fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers()
    }
}

impl<T> From<T> for Credentials
where
    T: Authenticator + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::from(NoAuth)
    }
}

/// Authenticates requests with a bearer token.
///
/// The application is responsible for refreshing the token.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"[censored]")
            .finish()
    }
}

impl Authenticator for BearerToken {
    fn authentication_type(&self) -> &str {
        "bearerToken"
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|e| {
            crate::Error::invalid_argument(ConfigError::InvalidHeaderValue(
                http::header::AUTHORIZATION.to_string(),
                e,
            ))
        })?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Sends requests without authentication.
///
/// Useful with services behind a proxy that adds the authentication headers.
#[derive(Clone, Debug, Default)]
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn authentication_type(&self) -> &str {
        "noAuth"
    }

    fn headers(&self) -> Result<HeaderMap> {
        Ok(HeaderMap::new())
    }
}
