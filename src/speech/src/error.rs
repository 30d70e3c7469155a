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

//! Custom errors for the Speech-to-Text helpers.
//!
//! These types are the source of the [Error][crate::Error] values returned by
//! the helpers. Use [std::error::Error::source] and `downcast_ref()` to
//! examine them.

/// The client configuration is invalid.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// No endpoint in the client builder nor in the environment.
    #[error(
        "missing service endpoint, use `with_endpoint()` or set the {} environment variable",
        crate::client::ENDPOINT_VAR
    )]
    MissingEndpoint,

    /// The endpoint is not a valid URL.
    #[error("invalid service endpoint {0:?}")]
    InvalidEndpoint(String, #[source] url::ParseError),

    /// The endpoint uses a scheme that cannot be mapped to a streaming scheme.
    #[error("unsupported scheme {0:?} in the service endpoint, expected http, https, ws, or wss")]
    UnsupportedScheme(String),

    /// The proxy is not a valid URL.
    #[error("invalid proxy {0:?}")]
    InvalidProxy(String, #[source] url::ParseError),

    /// A header name is invalid.
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String, #[source] http::header::InvalidHeaderName),

    /// A header value is invalid.
    #[error("invalid value for header {0}")]
    InvalidHeaderValue(String, #[source] http::header::InvalidHeaderValue),
}

/// A recognize request is invalid.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum RecognizeError {
    /// The audio is a stream and the request does not set a content type.
    #[error("the content type is required when the audio is a stream")]
    MissingContentType,
}

/// The customization id is empty.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("the customization id is required")]
pub struct MissingCustomizationId;

/// The customization has no corpora, there is nothing to wait for.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("customization {0} has no corpora")]
pub struct NoCorpora(pub String);

/// The recognize stream is closed.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("the recognize stream is closed")]
pub struct StreamClosed;
