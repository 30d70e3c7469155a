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

use crate::Result;
use crate::builder::speech_to_text::{Recognize, WhenCorporaAnalyzed, WhenCustomizationReady};
use crate::credentials::Credentials;
use crate::error::ConfigError;
use crate::model::AudioPayload;
use crate::recognize_stream::RecognizeStream;
use crate::streaming::{RecognizeStreamParams, StreamingConnectionConfig};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use url::Url;

/// The environment variable with the default service endpoint.
pub const ENDPOINT_VAR: &str = "SPEECH_TO_TEXT_URL";

/// The environment variable to disable TLS certificate verification.
///
/// Only the value `true` disables the verification.
pub const DISABLE_SSL_VAR: &str = "SPEECH_TO_TEXT_DISABLE_SSL";

/// Implements a client for the Speech-to-Text service.
///
/// # Example
/// ```
/// # use speech_to_text::client::SpeechToText;
/// # use speech_to_text::stub;
/// # #[derive(Debug)]
/// # struct MyTransport;
/// # impl stub::SpeechToText for MyTransport {}
/// let client = SpeechToText::builder(MyTransport)
///     .with_endpoint("https://speech.example.com/instances/my-instance")
///     .build()?;
/// // use `client` to wait for custom models, or to recognize audio.
/// # Ok::<(), speech_to_text::Error>(())
/// ```
///
/// # Configuration
///
/// To configure `SpeechToText` use the `with_*` methods in the type returned
/// by [builder()][SpeechToText::builder]. Common configuration changes include:
///
/// * [with_endpoint()][ClientBuilder::with_endpoint]: the service endpoint.
///   If not set, the client uses the value of the `SPEECH_TO_TEXT_URL`
///   environment variable.
/// * [with_credentials()][ClientBuilder::with_credentials]: by default the
///   client sends requests without authentication.
///
/// # Pooling and Cloning
///
/// `SpeechToText` holds its stub in an [Arc], cloning the client is cheap.
#[derive(Debug)]
pub struct SpeechToText<S> {
    inner: Arc<S>,
    config: Arc<ClientConfig>,
}

impl<S> Clone for SpeechToText<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SpeechToText<S>
where
    S: crate::stub::SpeechToText + 'static,
{
    /// Returns a builder for [SpeechToText].
    ///
    /// # Parameters
    /// * `stub` - performs the calls to the service.
    pub fn builder(stub: S) -> ClientBuilder<S> {
        ClientBuilder::new(stub)
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Waits until the corpora of a custom language model are analyzed.
    ///
    /// The request fails with a
    /// [NoWorkItem][gax::error::ErrorKind::NoWorkItem] error if the model has
    /// no corpora. See [WhenCorporaAnalyzed] for the other error conditions.
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// let corpora = client
    ///     .when_corpora_analyzed("my-customization-id")
    ///     .send()
    ///     .await?;
    /// for corpus in corpora.corpora {
    ///     println!("{} has {} words", corpus.name, corpus.total_words);
    /// }
    /// # Ok(()) }
    /// ```
    pub fn when_corpora_analyzed<T: Into<String>>(
        &self,
        customization_id: T,
    ) -> WhenCorporaAnalyzed<S> {
        WhenCorporaAnalyzed::new(self.inner.clone(), customization_id.into())
    }

    /// Waits until a custom language model is ready to use.
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// use gax::options::RequestOptionsBuilder;
    /// let model = client
    ///     .when_customization_ready("my-customization-id")
    ///     .with_times(120)
    ///     .send()
    ///     .await?;
    /// println!("model {} is {}", model.customization_id, model.status);
    /// # Ok(()) }
    /// ```
    pub fn when_customization_ready<T: Into<String>>(
        &self,
        customization_id: T,
    ) -> WhenCustomizationReady<S> {
        WhenCustomizationReady::new(self.inner.clone(), customization_id.into())
    }

    /// Opens a recognize stream.
    ///
    /// Computes the [StreamingConnectionConfig] from the client configuration
    /// and `params`, and asks the stub to open the stream.
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// use futures::StreamExt;
    /// use speech_to_text::streaming::RecognizeStreamParams;
    /// let params = RecognizeStreamParams {
    ///     content_type: Some("audio/flac".into()),
    ///     ..Default::default()
    /// };
    /// let mut stream = client.recognize_using_websocket(params).await?;
    /// stream.send_audio(std::fs::read("audio.flac")?).await?;
    /// stream.stop().await?;
    /// while let Some(results) = stream.next().await {
    ///     println!("{:?}", results?);
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn recognize_using_websocket(
        &self,
        params: RecognizeStreamParams,
    ) -> Result<RecognizeStream> {
        let config = StreamingConnectionConfig::new(&self.config, params)?;
        tracing::debug!(
            url = %config.service_url(),
            query_params = ?config.query_params().iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            "opening recognize stream"
        );
        self.inner.open_recognize_stream(config).await
    }

    /// Recognizes audio in a single request.
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// let results = client
    ///     .recognize(std::fs::read("audio.flac")?)
    ///     .set_content_type("audio/flac")
    ///     .send()
    ///     .await?;
    /// println!("{results:?}");
    /// # Ok(()) }
    /// ```
    pub fn recognize<T: Into<AudioPayload>>(&self, audio: T) -> Recognize<S> {
        Recognize::new(self.inner.clone(), audio.into())
    }
}

/// The configuration of a [SpeechToText] client.
///
/// Immutable once the client is built.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    endpoint: Url,
    credentials: Credentials,
    proxy: Option<Url>,
    disable_ssl_verification: bool,
    headers: HeaderMap,
}

impl ClientConfig {
    pub(crate) fn new(
        endpoint: Url,
        credentials: Credentials,
        proxy: Option<Url>,
        disable_ssl_verification: bool,
        headers: HeaderMap,
    ) -> Self {
        Self {
            endpoint,
            credentials,
            proxy,
            disable_ssl_verification,
            headers,
        }
    }

    /// The service endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The proxy for all connections, if any.
    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }

    /// If `true`, the stub must not verify the TLS certificates of the service.
    pub fn disable_ssl_verification(&self) -> bool {
        self.disable_ssl_verification
    }

    /// Headers sent with every streaming request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// A builder for [SpeechToText].
///
/// ```
/// # use speech_to_text::client::SpeechToText;
/// # use speech_to_text::credentials::BearerToken;
/// # #[derive(Debug)]
/// # struct MyTransport;
/// # impl speech_to_text::stub::SpeechToText for MyTransport {}
/// let client = SpeechToText::builder(MyTransport)
///     .with_endpoint("https://speech.example.com/instances/my-instance")
///     .with_credentials(BearerToken::new("my-token"))
///     .with_header("x-my-header", "my-value")
///     .build()?;
/// # Ok::<(), speech_to_text::Error>(())
/// ```
pub struct ClientBuilder<S> {
    stub: S,
    endpoint: Option<String>,
    credentials: Option<Credentials>,
    proxy: Option<String>,
    disable_ssl_verification: Option<bool>,
    headers: Vec<(String, String)>,
}

impl<S> ClientBuilder<S>
where
    S: crate::stub::SpeechToText + 'static,
{
    pub(crate) fn new(stub: S) -> Self {
        Self {
            stub,
            endpoint: None,
            credentials: None,
            proxy: None,
            disable_ssl_verification: None,
            headers: Vec::new(),
        }
    }

    /// Creates a new client.
    ///
    /// Fails with an [InvalidArgument][gax::error::ErrorKind::InvalidArgument]
    /// error if there is no endpoint, or if any setting is invalid.
    pub fn build(self) -> Result<SpeechToText<S>> {
        let endpoint = match self.endpoint {
            Some(e) => e,
            None => std::env::var(ENDPOINT_VAR)
                .map_err(|_| crate::Error::invalid_argument(ConfigError::MissingEndpoint))?,
        };
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            crate::Error::invalid_argument(ConfigError::InvalidEndpoint(endpoint.clone(), e))
        })?;
        let proxy = self
            .proxy
            .map(|p| {
                Url::parse(&p).map_err(|e| {
                    crate::Error::invalid_argument(ConfigError::InvalidProxy(p.clone(), e))
                })
            })
            .transpose()?;
        let disable_ssl_verification = self.disable_ssl_verification.unwrap_or_else(|| {
            std::env::var(DISABLE_SSL_VAR)
                .map(|v| v == "true")
                .unwrap_or(false)
        });
        let headers = parse_headers(self.headers)?;
        let config = ClientConfig::new(
            endpoint,
            self.credentials.unwrap_or_default(),
            proxy,
            disable_ssl_verification,
            headers,
        );
        Ok(SpeechToText {
            inner: Arc::new(self.stub),
            config: Arc::new(config),
        })
    }

    /// Sets the endpoint.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Configures the authentication credentials.
    pub fn with_credentials<V: Into<Credentials>>(mut self, v: V) -> Self {
        self.credentials = Some(v.into());
        self
    }

    /// Sends all connections through a proxy.
    pub fn with_proxy<V: Into<String>>(mut self, v: V) -> Self {
        self.proxy = Some(v.into());
        self
    }

    /// Disables the verification of the service TLS certificates.
    ///
    /// Only use this with services using self-signed certificates in test
    /// environments. If not set, the client uses the value of the
    /// `SPEECH_TO_TEXT_DISABLE_SSL` environment variable.
    pub fn with_disable_ssl_verification(mut self, v: bool) -> Self {
        self.disable_ssl_verification = Some(v);
        self
    }

    /// Adds a default header for streaming requests.
    ///
    /// The headers in each request take precedence over the default headers.
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

fn parse_headers(headers: Vec<(String, String)>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            crate::Error::invalid_argument(ConfigError::InvalidHeaderName(name.clone(), e))
        })?;
        let header_value = HeaderValue::from_str(&value).map_err(|e| {
            crate::Error::invalid_argument(ConfigError::InvalidHeaderValue(name.clone(), e))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
