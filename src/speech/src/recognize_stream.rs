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
use crate::error::StreamClosed;
use crate::model::SpeechRecognitionResults;
use bytes::Bytes;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{Receiver, Sender};

/// The messages sent from the application to the service over a recognize
/// stream.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum StreamMessage {
    /// A chunk of audio.
    Audio(Bytes),
    /// The application has no more audio. The service sends the final results
    /// and the stub closes the connection.
    Stop,
}

/// A live recognize stream.
///
/// The stream is a duplex connection. The application sends audio with
/// [send_audio()][RecognizeStream::send_audio] and receives the recognition
/// results as a [Stream][futures::Stream].
///
/// Stubs create the stream from a pair of channels: the stub reads the
/// application messages from the receiving half of the first channel, and
/// writes the results to the sending half of the second.
///
/// # Example
/// ```
/// # use speech_to_text::{RecognizeStream, StreamMessage};
/// # use speech_to_text::model::SpeechRecognitionResults;
/// # tokio_test::block_on(async {
/// use futures::StreamExt;
/// let (tx, mut requests) = tokio::sync::mpsc::channel(8);
/// let (responses, rx) = tokio::sync::mpsc::channel(8);
/// let mut stream = RecognizeStream::new(tx, rx);
///
/// stream.send_audio(bytes::Bytes::from_static(b"audio")).await?;
/// assert_eq!(requests.recv().await, Some(StreamMessage::Audio(bytes::Bytes::from_static(b"audio"))));
///
/// responses.send(Ok(SpeechRecognitionResults::new())).await.unwrap();
/// drop(responses);
/// assert!(matches!(stream.next().await, Some(Ok(_))));
/// assert!(stream.next().await.is_none());
/// # Ok::<(), speech_to_text::Error>(()) });
/// ```
#[derive(Debug)]
pub struct RecognizeStream {
    tx: Sender<StreamMessage>,
    rx: Receiver<Result<SpeechRecognitionResults>>,
}

impl RecognizeStream {
    pub fn new(tx: Sender<StreamMessage>, rx: Receiver<Result<SpeechRecognitionResults>>) -> Self {
        Self { tx, rx }
    }

    /// Sends a chunk of audio to the service.
    ///
    /// Fails with a [Transport][gax::error::ErrorKind::Transport] error if the
    /// stub closed the connection.
    pub async fn send_audio<T: Into<Bytes>>(&self, data: T) -> Result<()> {
        self.send(StreamMessage::Audio(data.into())).await
    }

    /// Tells the service there is no more audio.
    ///
    /// The results for the audio sent so far are still delivered.
    pub async fn stop(&self) -> Result<()> {
        self.send(StreamMessage::Stop).await
    }

    /// Waits for the next recognition results.
    ///
    /// Returns `None` once the stub closes the connection.
    pub async fn next_results(&mut self) -> Option<Result<SpeechRecognitionResults>> {
        self.rx.recv().await
    }

    async fn send(&self, message: StreamMessage) -> Result<()> {
        self.tx
            .send(message)
            .await
            .map_err(|_| crate::Error::transport(StreamClosed))
    }
}

impl futures::Stream for RecognizeStream {
    type Item = Result<SpeechRecognitionResults>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
