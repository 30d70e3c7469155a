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

pub mod speech_to_text {
    //! Request builders for [SpeechToText][crate::client::SpeechToText].
    //!
    //! The polling builders implement
    //! [RequestOptionsBuilder][gax::options::RequestOptionsBuilder], use its
    //! methods to change the polling interval and the number of attempts.
    use crate::Result;
    use crate::error::{MissingCustomizationId, RecognizeError};
    use crate::model::{
        AudioPayload, Corpora, LanguageModel, RecognizeRequest, SpeechRecognitionResults,
    };
    use gax::options::RequestOptions;
    use std::sync::Arc;

    /// The request builder for
    /// [SpeechToText::when_corpora_analyzed][crate::client::SpeechToText::when_corpora_analyzed].
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// use gax::options::RequestOptionsBuilder;
    /// use std::time::Duration;
    /// let corpora = client
    ///     .when_corpora_analyzed("my-customization-id")
    ///     .with_interval(Duration::from_secs(1))
    ///     .with_times(10)
    ///     .send()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    #[derive(Clone, Debug)]
    pub struct WhenCorporaAnalyzed<S> {
        stub: Arc<S>,
        customization_id: String,
        options: RequestOptions,
    }

    impl<S> WhenCorporaAnalyzed<S>
    where
        S: crate::stub::SpeechToText + 'static,
    {
        pub(crate) fn new(stub: Arc<S>, customization_id: String) -> Self {
            Self {
                stub,
                customization_id,
                options: RequestOptions::default(),
            }
        }

        /// Polls until all the corpora are analyzed.
        ///
        /// Returns the corpora once any corpus is analyzed and no corpus is
        /// being processed. Otherwise the error kind indicates why polling
        /// stopped:
        /// * [InvalidArgument][gax::error::ErrorKind::InvalidArgument]: the
        ///   customization id is empty, or the polling configuration is invalid.
        /// * [NoWorkItem][gax::error::ErrorKind::NoWorkItem]: the customization
        ///   has no corpora.
        /// * [Timeout][gax::error::ErrorKind::Timeout]: some corpus was still
        ///   being processed after the last attempt.
        /// * [UnexpectedStatus][gax::error::ErrorKind::UnexpectedStatus]: no
        ///   corpus is analyzed nor being processed.
        /// * [Transport][gax::error::ErrorKind::Transport]: the last call to
        ///   the service failed.
        pub async fn send(self) -> Result<Corpora> {
            check_customization_id(&self.customization_id)?;
            crate::wait::corpora_analyzed(self.stub, self.customization_id, self.options).await
        }
    }

    impl<S> gax::options::internal::RequestBuilder for WhenCorporaAnalyzed<S> {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for
    /// [SpeechToText::when_customization_ready][crate::client::SpeechToText::when_customization_ready].
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// use gax::options::RequestOptionsBuilder;
    /// use gax::polling_error_policy::RetryPending;
    /// let model = client
    ///     .when_customization_ready("my-customization-id")
    ///     .with_polling_error_policy(RetryPending)
    ///     .send()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    #[derive(Clone, Debug)]
    pub struct WhenCustomizationReady<S> {
        stub: Arc<S>,
        customization_id: String,
        options: RequestOptions,
    }

    impl<S> WhenCustomizationReady<S>
    where
        S: crate::stub::SpeechToText + 'static,
    {
        pub(crate) fn new(stub: Arc<S>, customization_id: String) -> Self {
            Self {
                stub,
                customization_id,
                options: RequestOptions::default(),
            }
        }

        /// Polls until the custom language model is ready or available.
        ///
        /// Otherwise the error kind indicates why polling stopped:
        /// * [InvalidArgument][gax::error::ErrorKind::InvalidArgument]: the
        ///   customization id is empty, or the polling configuration is invalid.
        /// * [Timeout][gax::error::ErrorKind::Timeout]: the model was still
        ///   pending or training after the last attempt.
        /// * [TerminalFailure][gax::error::ErrorKind::TerminalFailure]: the
        ///   model training failed.
        /// * [UnexpectedStatus][gax::error::ErrorKind::UnexpectedStatus]: the
        ///   model is upgrading, or its status is not recognized.
        /// * [Transport][gax::error::ErrorKind::Transport]: the last call to
        ///   the service failed.
        pub async fn send(self) -> Result<LanguageModel> {
            check_customization_id(&self.customization_id)?;
            crate::wait::customization_ready(self.stub, self.customization_id, self.options).await
        }
    }

    impl<S> gax::options::internal::RequestBuilder for WhenCustomizationReady<S> {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    fn check_customization_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(crate::Error::invalid_argument(MissingCustomizationId));
        }
        Ok(())
    }

    /// The request builder for
    /// [SpeechToText::recognize][crate::client::SpeechToText::recognize].
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::client::SpeechToText;
    /// # async fn sample<S: speech_to_text::stub::SpeechToText + 'static>(client: &SpeechToText<S>) -> anyhow::Result<()> {
    /// use speech_to_text::model::AudioPayload;
    /// let chunks = futures::stream::iter(vec![Ok(bytes::Bytes::from_static(b"..."))]);
    /// let results = client
    ///     .recognize(AudioPayload::stream(chunks))
    ///     .set_content_type("audio/l16;rate=16000")
    ///     .set_model("en-US_BroadbandModel")
    ///     .send()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    #[derive(Debug)]
    pub struct Recognize<S> {
        stub: Arc<S>,
        request: RecognizeRequest,
        options: RequestOptions,
    }

    impl<S> Recognize<S>
    where
        S: crate::stub::SpeechToText + 'static,
    {
        pub(crate) fn new(stub: Arc<S>, audio: AudioPayload) -> Self {
            Self {
                stub,
                request: RecognizeRequest::new(audio),
                options: RequestOptions::default(),
            }
        }

        /// Sends the request.
        ///
        /// If the audio is a stream the request must have a content type.
        /// Requests without one fail with an
        /// [InvalidArgument][gax::error::ErrorKind::InvalidArgument] error,
        /// and the stub is not called.
        pub async fn send(self) -> Result<SpeechRecognitionResults> {
            let missing_content_type = self
                .request
                .content_type
                .as_deref()
                .is_none_or(str::is_empty);
            if self.request.audio.is_stream() && missing_content_type {
                tracing::debug!(
                    "rejecting recognize request: streaming audio without a content type"
                );
                return Err(crate::Error::invalid_argument(
                    RecognizeError::MissingContentType,
                ));
            }
            self.stub.recognize(self.request, self.options).await
        }

        /// Sets the format of the audio, e.g. `audio/flac`.
        pub fn set_content_type<T: Into<String>>(mut self, v: T) -> Self {
            self.request.content_type = Some(v.into());
            self
        }

        /// Sets the model used for recognition.
        pub fn set_model<T: Into<String>>(mut self, v: T) -> Self {
            self.request.model = Some(v.into());
            self
        }

        /// Sets the custom language model used for recognition.
        pub fn set_language_customization_id<T: Into<String>>(mut self, v: T) -> Self {
            self.request.language_customization_id = Some(v.into());
            self
        }

        /// Sets the custom acoustic model used for recognition.
        pub fn set_acoustic_customization_id<T: Into<String>>(mut self, v: T) -> Self {
            self.request.acoustic_customization_id = Some(v.into());
            self
        }

        pub fn set_base_model_version<T: Into<String>>(mut self, v: T) -> Self {
            self.request.base_model_version = Some(v.into());
            self
        }

        /// Sets the keywords to spot in the audio.
        pub fn set_keywords<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<String>,
        {
            self.request.keywords = v.into_iter().map(|k| k.into()).collect();
            self
        }

        pub fn set_keywords_threshold(mut self, v: f32) -> Self {
            self.request.keywords_threshold = Some(v);
            self
        }

        pub fn set_max_alternatives(mut self, v: i32) -> Self {
            self.request.max_alternatives = Some(v);
            self
        }

        pub fn set_timestamps(mut self, v: bool) -> Self {
            self.request.timestamps = Some(v);
            self
        }

        pub fn set_word_confidence(mut self, v: bool) -> Self {
            self.request.word_confidence = Some(v);
            self
        }

        pub fn set_smart_formatting(mut self, v: bool) -> Self {
            self.request.smart_formatting = Some(v);
            self
        }

        pub fn set_speaker_labels(mut self, v: bool) -> Self {
            self.request.speaker_labels = Some(v);
            self
        }
    }

    impl<S> gax::options::internal::RequestBuilder for Recognize<S> {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

}
