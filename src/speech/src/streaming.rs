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

//! Maps the recognition parameters into the configuration of a recognize
//! stream.
//!
//! The helpers do not open the connection, they compute its configuration:
//! the URL, the query parameters, the headers, and the first message sent over
//! the connection. The [stub][crate::stub::SpeechToText] opens the connection.
//!
//! # Headers
//!
//! The headers are merged from three sources, each source replaces the values
//! of any header set by the previous sources:
//! 1. The diagnostic headers, `x-sdk-analytics` and `user-agent`, which
//!    identify this library, its version, and the operation.
//! 2. The default headers in the client configuration.
//! 3. The headers in [RecognizeStreamParams::headers].

use crate::Result;
use crate::client::ClientConfig;
use crate::credentials::Credentials;
use crate::error::ConfigError;
use http::HeaderMap;
use url::Url;

/// The operation name used in the diagnostic headers.
pub(crate) const OPERATION: &str = "recognizeUsingWebSocket";

const RECOGNIZE_PATH: &str = "v1/recognize";

/// The parameters for a recognize stream.
///
/// All the parameters are optional. The service uses its defaults for any
/// parameter not set.
///
/// # Example
/// ```
/// # use speech_to_text::streaming::RecognizeStreamParams;
/// let params = RecognizeStreamParams {
///     content_type: Some("audio/l16;rate=16000".into()),
///     model: Some("en-US_BroadbandModel".into()),
///     interim_results: Some(true),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizeStreamParams {
    /// The format of the audio.
    pub content_type: Option<String>,
    /// The model used for recognition.
    pub model: Option<String>,
    pub language_customization_id: Option<String>,
    pub acoustic_customization_id: Option<String>,
    pub base_model_version: Option<String>,
    /// The relative weight of the custom language model, between 0.0 and 1.0.
    pub customization_weight: Option<f64>,
    /// Seconds of silence before the service closes the connection.
    pub inactivity_timeout: Option<i32>,
    pub interim_results: Option<bool>,
    pub keywords: Vec<String>,
    pub keywords_threshold: Option<f32>,
    pub max_alternatives: Option<i32>,
    pub word_alternatives_threshold: Option<f32>,
    pub word_confidence: Option<bool>,
    pub timestamps: Option<bool>,
    pub profanity_filter: Option<bool>,
    pub smart_formatting: Option<bool>,
    pub speaker_labels: Option<bool>,
    pub grammar_name: Option<String>,
    pub redaction: Option<bool>,
    pub processing_metrics: Option<bool>,
    pub processing_metrics_interval: Option<f32>,
    pub audio_metrics: Option<bool>,
    pub end_of_phrase_silence_time: Option<f64>,
    pub split_transcript_at_phrase_end: Option<bool>,
    pub speech_detector_sensitivity: Option<f32>,
    pub background_audio_suppression: Option<f32>,
    pub low_latency: Option<bool>,
    pub character_insertion_bias: Option<f32>,
    /// Asks the service to not use the request data to improve its models.
    pub learning_opt_out: bool,
    /// Associates the request data with a customer id.
    pub customer_id: Option<String>,
    /// Authenticates the connection with an access token in the query string,
    /// instead of the configured credentials.
    pub access_token: Option<String>,
    /// Headers for this request. They take precedence over the client default
    /// headers.
    pub headers: HeaderMap,
}

/// The first message sent over a recognize stream.
///
/// Serialize this type to JSON to get the message.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[non_exhaustive]
pub struct OpeningMessage {
    pub action: &'static str,
    #[serde(rename = "content-type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interim_results: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_alternatives: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_alternatives_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_confidence: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profanity_filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_formatting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_metrics_interval: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_phrase_silence_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_transcript_at_phrase_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_detector_sensitivity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_audio_suppression: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_latency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_insertion_bias: Option<f32>,
}

impl OpeningMessage {
    fn new(params: &RecognizeStreamParams) -> Self {
        let p = params.clone();
        Self {
            action: "start",
            content_type: p.content_type,
            customization_weight: p.customization_weight,
            inactivity_timeout: p.inactivity_timeout,
            interim_results: p.interim_results,
            keywords: p.keywords,
            keywords_threshold: p.keywords_threshold,
            max_alternatives: p.max_alternatives,
            word_alternatives_threshold: p.word_alternatives_threshold,
            word_confidence: p.word_confidence,
            timestamps: p.timestamps,
            profanity_filter: p.profanity_filter,
            smart_formatting: p.smart_formatting,
            speaker_labels: p.speaker_labels,
            grammar_name: p.grammar_name,
            redaction: p.redaction,
            processing_metrics: p.processing_metrics,
            processing_metrics_interval: p.processing_metrics_interval,
            audio_metrics: p.audio_metrics,
            end_of_phrase_silence_time: p.end_of_phrase_silence_time,
            split_transcript_at_phrase_end: p.split_transcript_at_phrase_end,
            speech_detector_sensitivity: p.speech_detector_sensitivity,
            background_audio_suppression: p.background_audio_suppression,
            low_latency: p.low_latency,
            character_insertion_bias: p.character_insertion_bias,
        }
    }
}

/// The configuration of a recognize stream.
///
/// This is the input to [open_recognize_stream()][crate::stub::SpeechToText::open_recognize_stream].
/// It is immutable once created.
#[derive(Clone, Debug)]
pub struct StreamingConnectionConfig {
    credentials: Credentials,
    service_url: Url,
    proxy: Option<Url>,
    disable_ssl_verification: bool,
    headers: HeaderMap,
    query_params: Vec<(&'static str, String)>,
    opening_message: OpeningMessage,
}

impl StreamingConnectionConfig {
    /// Computes the configuration for a recognize stream.
    pub fn new(client: &ClientConfig, params: RecognizeStreamParams) -> Result<Self> {
        let service_url = streaming_url(client.endpoint())?;
        let mut headers = crate::info::diagnostic_headers(OPERATION);
        merge_headers(&mut headers, client.headers());
        merge_headers(&mut headers, &params.headers);
        let query_params = query_params(&params);
        let opening_message = OpeningMessage::new(&params);
        Ok(Self {
            credentials: client.credentials().clone(),
            service_url,
            proxy: client.proxy().cloned(),
            disable_ssl_verification: client.disable_ssl_verification(),
            headers,
            query_params,
            opening_message,
        })
    }

    /// The credentials used to authenticate the connection.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The URL of the recognize endpoint, without query parameters.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// The proxy for the connection, if any.
    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }

    /// If `true`, the stub must not verify the TLS certificates of the service.
    pub fn disable_ssl_verification(&self) -> bool {
        self.disable_ssl_verification
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The query parameters, in the order they should be sent.
    pub fn query_params(&self) -> &[(&'static str, String)] {
        &self.query_params
    }

    pub fn opening_message(&self) -> &OpeningMessage {
        &self.opening_message
    }

    /// The service URL including the query parameters.
    pub fn request_url(&self) -> Url {
        let mut url = self.service_url.clone();
        if !self.query_params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query_params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }
}

/// Maps the service endpoint into the URL of the recognize stream.
///
/// `http` maps to `ws`, `https` maps to `wss`, and the recognize path is
/// appended to any path in the endpoint.
fn streaming_url(endpoint: &Url) -> Result<Url> {
    let scheme = match endpoint.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        s => {
            return Err(crate::Error::invalid_argument(
                ConfigError::UnsupportedScheme(s.to_string()),
            ));
        }
    };
    let mut url = endpoint.clone();
    url.set_scheme(scheme).map_err(|_| {
        crate::Error::invalid_argument(ConfigError::UnsupportedScheme(
            endpoint.scheme().to_string(),
        ))
    })?;
    let path = format!("{}/{RECOGNIZE_PATH}", endpoint.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn query_params(params: &RecognizeStreamParams) -> Vec<(&'static str, String)> {
    let optional = [
        ("model", params.model.as_ref()),
        (
            "language_customization_id",
            params.language_customization_id.as_ref(),
        ),
        (
            "acoustic_customization_id",
            params.acoustic_customization_id.as_ref(),
        ),
        ("base_model_version", params.base_model_version.as_ref()),
    ];
    let mut query: Vec<_> = optional
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v.clone())))
        .collect();
    if params.learning_opt_out {
        query.push(("x-watson-learning-opt-out", "true".to_string()));
    }
    if let Some(id) = &params.customer_id {
        query.push(("x-watson-metadata", format!("customer_id={id}")));
    }
    if let Some(token) = &params.access_token {
        query.push(("access_token", token.clone()));
    }
    query
}

/// Replaces the values in `target` for every header present in `source`.
fn merge_headers(target: &mut HeaderMap, source: &HeaderMap) {
    for name in source.keys() {
        target.remove(name);
        for value in source.get_all(name) {
            target.append(name.clone(), value.clone());
        }
    }
}
