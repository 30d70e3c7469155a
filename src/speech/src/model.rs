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

//! The messages exchanged with the Speech-to-Text service.

use bytes::Bytes;
use futures::stream::BoxStream;

/// Information about a corpus of a custom language model.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Corpus {
    /// The name of the corpus.
    pub name: String,

    /// The total number of words in the corpus.
    pub total_words: i64,

    /// The number of words in the corpus that are not in the base vocabulary.
    pub out_of_vocabulary_words: i64,

    /// The status of the corpus.
    pub status: CorpusStatus,

    /// If the service failed to analyze the corpus, the error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][Corpus::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [total_words][Corpus::total_words].
    pub fn set_total_words<T: Into<i64>>(mut self, v: T) -> Self {
        self.total_words = v.into();
        self
    }

    /// Sets the value of [out_of_vocabulary_words][Corpus::out_of_vocabulary_words].
    pub fn set_out_of_vocabulary_words<T: Into<i64>>(mut self, v: T) -> Self {
        self.out_of_vocabulary_words = v.into();
        self
    }

    /// Sets the value of [status][Corpus::status].
    pub fn set_status<T: Into<CorpusStatus>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }

    /// Sets the value of [error][Corpus::error].
    pub fn set_error<T: Into<String>>(mut self, v: T) -> Self {
        self.error = Some(v.into());
        self
    }
}

/// The status of a [Corpus].
///
/// The service may add new values, these are preserved in
/// [UnknownValue][CorpusStatus::UnknownValue].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CorpusStatus {
    /// The service analyzed the corpus.
    Analyzed,
    /// The service is analyzing the corpus.
    BeingProcessed,
    /// The service cannot analyze the corpus, e.g., because it conflicts with
    /// another request.
    Undetermined,
    /// A value not known to this version of the library.
    UnknownValue(String),
}

impl CorpusStatus {
    /// The string representation of the status, as used by the service.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Analyzed => "analyzed",
            Self::BeingProcessed => "being_processed",
            Self::Undetermined => "undetermined",
            Self::UnknownValue(v) => v.as_str(),
        }
    }
}

impl Default for CorpusStatus {
    fn default() -> Self {
        Self::UnknownValue(String::new())
    }
}

impl std::fmt::Display for CorpusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CorpusStatus {
    fn from(value: &str) -> Self {
        match value {
            "analyzed" => Self::Analyzed,
            "being_processed" => Self::BeingProcessed,
            "undetermined" => Self::Undetermined,
            v => Self::UnknownValue(v.to_string()),
        }
    }
}

impl serde::Serialize for CorpusStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for CorpusStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = String::deserialize(deserializer)?;
        Ok(Self::from(v.as_str()))
    }
}

/// The corpora of a custom language model.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Corpora {
    pub corpora: Vec<Corpus>,
}

impl Corpora {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [corpora][Corpora::corpora].
    pub fn set_corpora<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Corpus>,
    {
        self.corpora = v.into_iter().map(|i| i.into()).collect();
        self
    }
}

/// Information about a custom language model.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct LanguageModel {
    /// The customization id, a GUID assigned by the service.
    pub customization_id: String,

    /// The creation time, in `YYYY-MM-DDThh:mm:ss.sTZD` format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// The last modification time, in `YYYY-MM-DDThh:mm:ss.sTZD` format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// The language identifier, e.g. `en-US`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// The dialect of the language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,

    /// The versions of the base model this model was created against.
    pub versions: Vec<String>,

    /// The GUID of the credentials of the model owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// The name of the custom model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The description of the custom model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The name of the base model this model customizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_name: Option<String>,

    /// The status of the model.
    pub status: LanguageModelStatus,

    /// The progress of training, as a percentage.
    pub progress: i32,

    /// If training failed, the error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Warnings produced while training the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
}

impl LanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [customization_id][LanguageModel::customization_id].
    pub fn set_customization_id<T: Into<String>>(mut self, v: T) -> Self {
        self.customization_id = v.into();
        self
    }

    /// Sets the value of [language][LanguageModel::language].
    pub fn set_language<T: Into<String>>(mut self, v: T) -> Self {
        self.language = Some(v.into());
        self
    }

    /// Sets the value of [name][LanguageModel::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }

    /// Sets the value of [base_model_name][LanguageModel::base_model_name].
    pub fn set_base_model_name<T: Into<String>>(mut self, v: T) -> Self {
        self.base_model_name = Some(v.into());
        self
    }

    /// Sets the value of [status][LanguageModel::status].
    pub fn set_status<T: Into<LanguageModelStatus>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }

    /// Sets the value of [progress][LanguageModel::progress].
    pub fn set_progress<T: Into<i32>>(mut self, v: T) -> Self {
        self.progress = v.into();
        self
    }

    /// Sets the value of [error][LanguageModel::error].
    pub fn set_error<T: Into<String>>(mut self, v: T) -> Self {
        self.error = Some(v.into());
        self
    }
}

/// The status of a [LanguageModel].
///
/// Models start as `pending`, move to `ready` once they have training data,
/// then to `training` and finally `available`. Training may also end in
/// `failed`. Models move to `upgrading` while the service upgrades them to a
/// new version of the base model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LanguageModelStatus {
    Pending,
    Ready,
    Training,
    Failed,
    Upgrading,
    Available,
    /// A value not known to this version of the library.
    UnknownValue(String),
}

impl LanguageModelStatus {
    /// The string representation of the status, as used by the service.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Training => "training",
            Self::Failed => "failed",
            Self::Upgrading => "upgrading",
            Self::Available => "available",
            Self::UnknownValue(v) => v.as_str(),
        }
    }
}

impl Default for LanguageModelStatus {
    fn default() -> Self {
        Self::UnknownValue(String::new())
    }
}

impl std::fmt::Display for LanguageModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LanguageModelStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "ready" => Self::Ready,
            "training" => Self::Training,
            "failed" => Self::Failed,
            "upgrading" => Self::Upgrading,
            "available" => Self::Available,
            v => Self::UnknownValue(v.to_string()),
        }
    }
}

impl serde::Serialize for LanguageModelStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for LanguageModelStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = String::deserialize(deserializer)?;
        Ok(Self::from(v.as_str()))
    }
}

/// The results of a recognition request, or of one message in a recognize
/// stream.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct SpeechRecognitionResults {
    pub results: Vec<SpeechRecognitionResult>,

    /// The index of the first result in `results`. Streams send updates for
    /// earlier results as the service refines them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_index: Option<i32>,

    pub warnings: Vec<String>,
}

impl SpeechRecognitionResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [results][SpeechRecognitionResults::results].
    pub fn set_results<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<SpeechRecognitionResult>,
    {
        self.results = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Sets the value of [result_index][SpeechRecognitionResults::result_index].
    pub fn set_result_index<T: Into<i32>>(mut self, v: T) -> Self {
        self.result_index = Some(v.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct SpeechRecognitionResult {
    /// If `true`, the result will not change. Interim results may be updated
    /// by later messages.
    #[serde(rename = "final")]
    pub final_results: bool,

    /// Alternative transcripts, the most likely first.
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

impl SpeechRecognitionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [final_results][SpeechRecognitionResult::final_results].
    pub fn set_final_results(mut self, v: bool) -> Self {
        self.final_results = v;
        self
    }

    /// Sets the value of [alternatives][SpeechRecognitionResult::alternatives].
    pub fn set_alternatives<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<SpeechRecognitionAlternative>,
    {
        self.alternatives = v.into_iter().map(|i| i.into()).collect();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct SpeechRecognitionAlternative {
    pub transcript: String,

    /// The confidence score, only returned for the best alternative of final
    /// results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SpeechRecognitionAlternative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [transcript][SpeechRecognitionAlternative::transcript].
    pub fn set_transcript<T: Into<String>>(mut self, v: T) -> Self {
        self.transcript = v.into();
        self
    }

    /// Sets the value of [confidence][SpeechRecognitionAlternative::confidence].
    pub fn set_confidence<T: Into<f64>>(mut self, v: T) -> Self {
        self.confidence = Some(v.into());
        self
    }
}

/// The audio in a single-shot recognize request.
///
/// Small payloads are typically buffered, larger payloads can be sent as a
/// stream of bytes. The service cannot detect the format of a stream, requests
/// with a streaming payload must set the content type.
pub enum AudioPayload {
    /// The audio is in memory.
    Buffered(Bytes),
    /// The audio is a continuous stream of bytes.
    Stream(BoxStream<'static, crate::Result<Bytes>>),
}

impl AudioPayload {
    /// Creates a streaming payload.
    ///
    /// # Example
    /// ```
    /// # use speech_to_text::model::AudioPayload;
    /// let chunks = vec![Ok(bytes::Bytes::from_static(b"RIFF"))];
    /// let payload = AudioPayload::stream(futures::stream::iter(chunks));
    /// assert!(payload.is_stream());
    /// ```
    pub fn stream<S>(stream: S) -> Self
    where
        S: futures::Stream<Item = crate::Result<Bytes>> + Send + 'static,
    {
        Self::Stream(Box::pin(stream))
    }

    /// Returns `true` if the payload is a stream.
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}

impl std::fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buffered(b) => f.debug_tuple("Buffered").field(&b.len()).finish(),
            Self::Stream(_) => f.debug_tuple("Stream").finish_non_exhaustive(),
        }
    }
}

impl From<Bytes> for AudioPayload {
    fn from(value: Bytes) -> Self {
        Self::Buffered(value)
    }
}

impl From<Vec<u8>> for AudioPayload {
    fn from(value: Vec<u8>) -> Self {
        Self::Buffered(Bytes::from(value))
    }
}

impl From<&'static [u8]> for AudioPayload {
    fn from(value: &'static [u8]) -> Self {
        Self::Buffered(Bytes::from_static(value))
    }
}

/// The request for a single-shot recognition.
#[derive(Debug)]
#[non_exhaustive]
pub struct RecognizeRequest {
    pub audio: AudioPayload,
    /// The format of the audio, e.g. `audio/flac` or `audio/l16;rate=16000`.
    pub content_type: Option<String>,
    pub model: Option<String>,
    pub language_customization_id: Option<String>,
    pub acoustic_customization_id: Option<String>,
    pub base_model_version: Option<String>,
    pub keywords: Vec<String>,
    pub keywords_threshold: Option<f32>,
    pub max_alternatives: Option<i32>,
    pub timestamps: Option<bool>,
    pub word_confidence: Option<bool>,
    pub smart_formatting: Option<bool>,
    pub speaker_labels: Option<bool>,
}

impl RecognizeRequest {
    pub fn new<T: Into<AudioPayload>>(audio: T) -> Self {
        Self {
            audio: audio.into(),
            content_type: None,
            model: None,
            language_customization_id: None,
            acoustic_customization_id: None,
            base_model_version: None,
            keywords: Vec::new(),
            keywords_threshold: None,
            max_alternatives: None,
            timestamps: None,
            word_confidence: None,
            smart_formatting: None,
            speaker_labels: None,
        }
    }
}
