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

//! Traits to mock the calls to the Speech-to-Text service.
//!
//! The client in this crate delegates all the calls to the service to an
//! implementation of these traits. Applications provide the implementation
//! for their transport, and tests provide mocks or fakes.

use crate::Result;
use crate::model::{Corpora, LanguageModel, RecognizeRequest, SpeechRecognitionResults};
use crate::recognize_stream::RecognizeStream;
use crate::streaming::StreamingConnectionConfig;
use gax::options::RequestOptions;

const UNIMPLEMENTED: &str = concat!(
    "this method is not implemented by the stub. ",
    "The ",
    env!("CARGO_PKG_NAME"),
    " helpers call it, implement the method in your stub."
);

/// Defines the trait used to implement [crate::client::SpeechToText].
///
/// Application developers implement this trait to connect the client to the
/// service, or to mock `client::SpeechToText` in their tests.
///
/// The trait provides a default implementation of each method. These
/// implementations panic, implement the methods used by your application.
pub trait SpeechToText: std::fmt::Debug + Send + Sync {
    /// Lists the corpora of a custom language model.
    ///
    /// Called by [crate::client::SpeechToText::when_corpora_analyzed], once
    /// per polling attempt, and once before the polling loop starts.
    fn list_corpora(
        &self,
        _customization_id: String,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Corpora>> + Send {
        unimplemented_stub::<Corpora>()
    }

    /// Gets a custom language model.
    ///
    /// Called by [crate::client::SpeechToText::when_customization_ready], once
    /// per polling attempt.
    fn get_language_model(
        &self,
        _customization_id: String,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<LanguageModel>> + Send {
        unimplemented_stub::<LanguageModel>()
    }

    /// Implements [crate::client::SpeechToText::recognize].
    fn recognize(
        &self,
        _req: RecognizeRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<SpeechRecognitionResults>> + Send {
        unimplemented_stub::<SpeechRecognitionResults>()
    }

    /// Opens a recognize stream.
    ///
    /// The implementation connects to
    /// [request_url()][StreamingConnectionConfig::request_url] using the
    /// headers, credentials, proxy, and TLS settings in `config`. It sends the
    /// [opening message][StreamingConnectionConfig::opening_message] as JSON,
    /// and then forwards the messages between the connection and the returned
    /// [RecognizeStream].
    fn open_recognize_stream(
        &self,
        _config: StreamingConnectionConfig,
    ) -> impl std::future::Future<Output = Result<RecognizeStream>> + Send {
        unimplemented_stub::<RecognizeStream>()
    }
}

async fn unimplemented_stub<T>() -> Result<T> {
    unimplemented!("{UNIMPLEMENTED}");
}
