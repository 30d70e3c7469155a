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

#[allow(dead_code)]
mod fake;

use bytes::Bytes;
use fake::FakeService;
use futures::StreamExt;
use http::HeaderValue;
use speech_to_text::client::SpeechToText;
use speech_to_text::credentials::BearerToken;
use speech_to_text::error::RecognizeError;
use speech_to_text::model::AudioPayload;
use speech_to_text::streaming::RecognizeStreamParams;
use std::error::Error as _;

type TestResult = anyhow::Result<()>;

fn client(fake: &FakeService) -> anyhow::Result<SpeechToText<FakeService>> {
    let client = SpeechToText::builder(fake.clone())
        .with_endpoint("https://speech.example.com/instances/1234")
        .with_credentials(BearerToken::new("test-token"))
        .with_header("x-team", "speech-tests")
        .build()?;
    Ok(client)
}

fn audio_stream() -> AudioPayload {
    AudioPayload::stream(futures::stream::iter(vec![
        Ok(Bytes::from_static(b"chunk-1")),
        Ok(Bytes::from_static(b"chunk-2")),
    ]))
}

#[tokio::test]
async fn stream_without_content_type() -> TestResult {
    let fake = FakeService::default();
    let err = client(&fake)?
        .recognize(audio_stream())
        .send()
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument(), "{err:?}");
    let source = err.source().and_then(|e| e.downcast_ref::<RecognizeError>());
    assert_eq!(source, Some(&RecognizeError::MissingContentType));
    assert_eq!(fake.recognize_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn stream_with_content_type() -> TestResult {
    let fake = FakeService::default();
    client(&fake)?
        .recognize(audio_stream())
        .set_content_type("audio/l16;rate=16000")
        .send()
        .await?;
    assert_eq!(fake.recognize_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn buffered_without_content_type() -> TestResult {
    let fake = FakeService::default();
    client(&fake)?
        .recognize(b"RIFF....WAVE".to_vec())
        .send()
        .await?;
    assert_eq!(fake.recognize_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn websocket_connection_config() -> TestResult {
    let fake = FakeService::default();
    let mut params = RecognizeStreamParams {
        content_type: Some("audio/flac".into()),
        model: Some("en-US_BroadbandModel".into()),
        interim_results: Some(true),
        ..Default::default()
    };
    params
        .headers
        .insert("x-team", HeaderValue::from_static("override"));
    let _stream = client(&fake)?.recognize_using_websocket(params).await?;

    let configs = fake.stream_configs();
    assert_eq!(configs.len(), 1);
    let config = &configs[0];
    assert_eq!(
        config.service_url().as_str(),
        "wss://speech.example.com/instances/1234/v1/recognize"
    );
    assert_eq!(
        config.request_url().as_str(),
        "wss://speech.example.com/instances/1234/v1/recognize?model=en-US_BroadbandModel"
    );
    assert_eq!(
        config.headers().get("x-team"),
        Some(&HeaderValue::from_static("override"))
    );
    let analytics = config
        .headers()
        .get("x-sdk-analytics")
        .and_then(|v| v.to_str().ok());
    assert!(
        analytics.is_some_and(|v| v.contains("operation_id=recognizeUsingWebSocket")),
        "{analytics:?}"
    );
    let auth = config.credentials().headers()?;
    assert_eq!(
        auth.get(http::header::AUTHORIZATION),
        Some(&HeaderValue::from_static("Bearer test-token"))
    );

    let message = serde_json::to_value(config.opening_message())?;
    assert_eq!(
        message,
        serde_json::json!({
            "action": "start",
            "content-type": "audio/flac",
            "interim_results": true,
        })
    );
    Ok(())
}

#[tokio::test]
async fn websocket_results() -> TestResult {
    let fake = FakeService::default();
    let params = RecognizeStreamParams {
        content_type: Some("audio/flac".into()),
        ..Default::default()
    };
    let mut stream = client(&fake)?.recognize_using_websocket(params).await?;
    stream.send_audio(vec![0_u8; 16]).await?;
    stream.send_audio(vec![0_u8; 32]).await?;
    stream.stop().await?;

    let mut transcripts = Vec::new();
    while let Some(results) = stream.next().await {
        let results = results?;
        for r in results.results {
            transcripts.push((r.final_results, r.alternatives[0].transcript.clone()));
        }
    }
    assert_eq!(
        transcripts,
        vec![
            (false, "16 bytes".to_string()),
            (false, "32 bytes".to_string()),
            (true, "48 bytes total".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn websocket_send_after_close() -> TestResult {
    let fake = FakeService::default();
    let mut stream = client(&fake)?
        .recognize_using_websocket(RecognizeStreamParams::default())
        .await?;
    stream.stop().await?;
    while stream.next().await.is_some() {}
    // The fake service is gone after the final results.
    let err = stream.send_audio(vec![0_u8; 8]).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn websocket_bad_scheme() -> TestResult {
    let fake = FakeService::default();
    let client = SpeechToText::builder(fake.clone())
        .with_endpoint("ftp://speech.example.com")
        .build()?;
    let err = client
        .recognize_using_websocket(RecognizeStreamParams::default())
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument(), "{err:?}");
    assert!(fake.stream_configs().is_empty());
    Ok(())
}
