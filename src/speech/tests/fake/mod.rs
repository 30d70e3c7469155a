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

//! A fake implementation of the service stub.
//!
//! The fake returns canned responses in order, and records the calls.

use gax::options::RequestOptions;
use speech_to_text::model::{
    Corpora, LanguageModel, RecognizeRequest, SpeechRecognitionAlternative,
    SpeechRecognitionResult, SpeechRecognitionResults,
};
use speech_to_text::streaming::StreamingConnectionConfig;
use speech_to_text::{Error, RecognizeStream, Result, StreamMessage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const CUSTOMIZATION_ID: &str = "test-customization-id";

#[derive(Debug, Default)]
struct State {
    corpora: VecDeque<Result<Corpora>>,
    models: VecDeque<Result<LanguageModel>>,
    list_corpora_calls: u32,
    get_language_model_calls: u32,
    recognize_calls: u32,
    last_options: Option<RequestOptions>,
    stream_configs: Vec<StreamingConnectionConfig>,
}

#[derive(Clone, Debug, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    pub fn with_corpora<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<Corpora>>,
    {
        let fake = Self::default();
        fake.lock().corpora = responses.into_iter().collect();
        fake
    }

    pub fn with_models<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<LanguageModel>>,
    {
        let fake = Self::default();
        fake.lock().models = responses.into_iter().collect();
        fake
    }

    pub fn list_corpora_calls(&self) -> u32 {
        self.lock().list_corpora_calls
    }

    pub fn get_language_model_calls(&self) -> u32 {
        self.lock().get_language_model_calls
    }

    pub fn recognize_calls(&self) -> u32 {
        self.lock().recognize_calls
    }

    pub fn last_options(&self) -> Option<RequestOptions> {
        self.lock().last_options.clone()
    }

    pub fn stream_configs(&self) -> Vec<StreamingConnectionConfig> {
        self.lock().stream_configs.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("never poisoned")
    }
}

fn exhausted() -> Error {
    Error::transport("no more responses")
}

impl speech_to_text::stub::SpeechToText for FakeService {
    async fn list_corpora(
        &self,
        customization_id: String,
        options: RequestOptions,
    ) -> Result<Corpora> {
        assert_eq!(customization_id, CUSTOMIZATION_ID);
        let mut state = self.lock();
        state.list_corpora_calls += 1;
        state.last_options = Some(options);
        state.corpora.pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn get_language_model(
        &self,
        customization_id: String,
        options: RequestOptions,
    ) -> Result<LanguageModel> {
        assert_eq!(customization_id, CUSTOMIZATION_ID);
        let mut state = self.lock();
        state.get_language_model_calls += 1;
        state.last_options = Some(options);
        state.models.pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn recognize(
        &self,
        _req: RecognizeRequest,
        _options: RequestOptions,
    ) -> Result<SpeechRecognitionResults> {
        self.lock().recognize_calls += 1;
        Ok(SpeechRecognitionResults::new())
    }

    async fn open_recognize_stream(
        &self,
        config: StreamingConnectionConfig,
    ) -> Result<RecognizeStream> {
        self.lock().stream_configs.push(config);
        let (tx, mut requests) = mpsc::channel(8);
        let (responses, rx) = mpsc::channel(8);
        // Echo the size of each audio chunk as an interim result, finish on
        // the first stop message.
        tokio::spawn(async move {
            let mut total = 0;
            while let Some(message) = requests.recv().await {
                let results = match message {
                    StreamMessage::Audio(data) => {
                        total += data.len();
                        transcript(format!("{} bytes", data.len()), false)
                    }
                    StreamMessage::Stop => transcript(format!("{total} bytes total"), true),
                    _ => continue,
                };
                let stop = results.results.iter().any(|r| r.final_results);
                if responses.send(Ok(results)).await.is_err() || stop {
                    break;
                }
            }
        });
        Ok(RecognizeStream::new(tx, rx))
    }
}

fn transcript(text: String, final_results: bool) -> SpeechRecognitionResults {
    SpeechRecognitionResults::new().set_results([SpeechRecognitionResult::new()
        .set_final_results(final_results)
        .set_alternatives([SpeechRecognitionAlternative::new().set_transcript(text)])])
}
