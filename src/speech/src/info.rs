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

//! Diagnostic header helpers.

use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::LazyLock;

pub(crate) const NAME: &str = env!("CARGO_PKG_NAME");
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const SERVICE_NAME: &str = "speech_to_text";
pub(crate) const SERVICE_VERSION: &str = "V1";

pub(crate) static SDK_ANALYTICS: HeaderName = HeaderName::from_static("x-sdk-analytics");

static USER_AGENT: LazyLock<HeaderValue> = LazyLock::new(|| {
    // The package name and version only contain valid header characters.
    HeaderValue::from_static(concat!(
        env!("CARGO_PKG_NAME"),
        "-rust/",
        env!("CARGO_PKG_VERSION")
    ))
});

/// Formats the `x-sdk-analytics` header value for `operation`.
pub(crate) fn sdk_analytics(operation: &str) -> String {
    format!(
        "service_name={SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={operation}"
    )
}

/// The fixed headers identifying the library, its version, and the operation.
///
/// Operation names are static identifiers, they always produce valid header
/// values.
pub(crate) fn diagnostic_headers(operation: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&sdk_analytics(operation)) {
        headers.insert(SDK_ANALYTICS.clone(), value);
    }
    headers.insert(http::header::USER_AGENT, USER_AGENT.clone());
    headers
}
