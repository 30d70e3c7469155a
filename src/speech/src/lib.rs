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

//! Helpers for the Speech-to-Text service.
//!
//! This crate extends a Speech-to-Text client with:
//! * Functions to wait until the corpora of a custom language model are
//!   analyzed, and until a custom language model is ready to use.
//! * A streaming recognition adapter, which maps the recognition parameters
//!   into the configuration of a persistent duplex connection.
//! * Input validation for single-shot recognition requests.
//!
//! The calls to the service are performed by an implementation of
//! [stub::SpeechToText]. Applications provide this implementation, typically
//! a thin wrapper around their HTTP and WebSocket libraries of choice.
//!
//! # Example
//! ```
//! # use speech_to_text::client::SpeechToText;
//! # use speech_to_text::stub;
//! # #[derive(Debug)]
//! # struct MyTransport;
//! # impl stub::SpeechToText for MyTransport {}
//! # async fn sample() -> anyhow::Result<()> {
//! use gax::options::RequestOptionsBuilder;
//! use std::time::Duration;
//! let client = SpeechToText::builder(MyTransport)
//!     .with_endpoint("https://speech.example.com/instances/my-instance")
//!     .build()?;
//! let model = client
//!     .when_customization_ready("my-customization-id")
//!     .with_interval(Duration::from_secs(10))
//!     .with_times(60)
//!     .send()
//!     .await?;
//! println!("the model is ready: {model:?}");
//! # Ok(()) }
//! ```

pub use gax::Result;
pub use gax::error::Error;

pub mod builder;
pub mod client;
pub mod credentials;
pub mod error;
pub mod model;
pub mod stub;
pub mod wait;

mod info;
mod recognize_stream;
pub mod streaming;

pub use recognize_stream::{RecognizeStream, StreamMessage};
