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

use fake::{CUSTOMIZATION_ID, FakeService};
use gax::options::RequestOptionsBuilder;
use gax::polling_backoff_policy::FixedInterval;
use gax::polling_error_policy::RetryPending;
use lro::{StatusReport, StillProcessing};
use speech_to_text::client::SpeechToText;
use speech_to_text::error::{MissingCustomizationId, NoCorpora};
use speech_to_text::model::{Corpora, Corpus, CorpusStatus, LanguageModel, LanguageModelStatus};
use speech_to_text::{Error, Result};
use std::error::Error as _;
use std::time::Duration;
use tokio::time::Instant;

type TestResult = anyhow::Result<()>;

const INTERVAL: Duration = Duration::from_millis(10);

fn client(fake: &FakeService) -> anyhow::Result<SpeechToText<FakeService>> {
    let client = SpeechToText::builder(fake.clone())
        .with_endpoint("https://speech.example.com")
        .build()?;
    Ok(client)
}

fn corpora<I: IntoIterator<Item = CorpusStatus>>(statuses: I) -> Result<Corpora> {
    Ok(Corpora::new().set_corpora(
        statuses
            .into_iter()
            .enumerate()
            .map(|(i, s)| Corpus::new().set_name(format!("corpus-{i}")).set_status(s)),
    ))
}

fn model(status: LanguageModelStatus) -> Result<LanguageModel> {
    Ok(LanguageModel::new()
        .set_customization_id(CUSTOMIZATION_ID)
        .set_status(status))
}

#[tokio::test(start_paused = true)]
async fn corpora_analyzed_on_third_attempt() -> TestResult {
    let fake = FakeService::with_corpora([
        corpora([CorpusStatus::BeingProcessed]),
        corpora([CorpusStatus::BeingProcessed]),
        corpora([CorpusStatus::BeingProcessed]),
        corpora([CorpusStatus::Analyzed]),
    ]);
    let start = Instant::now();
    let got = client(&fake)?
        .when_corpora_analyzed(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_times(3)
        .send()
        .await?;
    assert_eq!(got.corpora[0].status, CorpusStatus::Analyzed);
    // One call to check there are corpora, and three polling attempts.
    assert_eq!(fake.list_corpora_calls(), 4);
    assert_eq!(start.elapsed(), 2 * INTERVAL);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn corpora_without_work_item() -> TestResult {
    let fake = FakeService::with_corpora([corpora([])]);
    let start = Instant::now();
    let err = client(&fake)?
        .when_corpora_analyzed(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_times(5)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_no_work_item(), "{err:?}");
    let source = err.source().and_then(|e| e.downcast_ref::<NoCorpora>());
    assert_eq!(source, Some(&NoCorpora(CUSTOMIZATION_ID.to_string())));
    assert_eq!(fake.list_corpora_calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn corpora_check_error_is_returned() -> TestResult {
    let fake = FakeService::with_corpora([Err(Error::transport("connection reset"))]);
    let err = client(&fake)?
        .when_corpora_analyzed(CUSTOMIZATION_ID)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(fake.list_corpora_calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn corpora_undetermined() -> TestResult {
    let fake = FakeService::with_corpora([
        corpora([CorpusStatus::BeingProcessed]),
        corpora([CorpusStatus::Undetermined]),
    ]);
    let err = client(&fake)?
        .when_corpora_analyzed(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_unexpected_status(), "{err:?}");
    let report = err.source().and_then(|e| e.downcast_ref::<StatusReport>());
    assert_eq!(
        report.map(|r| r.status()),
        Some("[corpus-0=undetermined]"),
        "{err:?}"
    );
    assert_eq!(fake.list_corpora_calls(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_ready_after_training() -> TestResult {
    let fake = FakeService::with_models([
        model(LanguageModelStatus::Pending),
        model(LanguageModelStatus::Training),
        model(LanguageModelStatus::Available),
    ]);
    let start = Instant::now();
    let got = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_times(3)
        .send()
        .await?;
    assert_eq!(got.status, LanguageModelStatus::Available);
    assert_eq!(fake.get_language_model_calls(), 3);
    assert_eq!(start.elapsed(), 2 * INTERVAL);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_ready_with_backoff_policy() -> TestResult {
    let fake = FakeService::with_models([
        model(LanguageModelStatus::Pending),
        model(LanguageModelStatus::Training),
        model(LanguageModelStatus::Available),
    ]);
    let start = Instant::now();
    let got = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_polling_backoff_policy(FixedInterval::new(Duration::from_millis(25)))
        .send()
        .await?;
    assert_eq!(got.status, LanguageModelStatus::Available);
    assert_eq!(fake.get_language_model_calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_millis(50));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_timeout() -> TestResult {
    let fake = FakeService::with_models([
        model(LanguageModelStatus::Pending),
        model(LanguageModelStatus::Training),
        model(LanguageModelStatus::Ready),
    ]);
    let start = Instant::now();
    let err = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_times(2)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
    let pending = err.source().and_then(|e| e.downcast_ref::<StillProcessing>());
    assert_eq!(pending.map(|p| p.attempt_count()), Some(2), "{err:?}");
    assert_eq!(fake.get_language_model_calls(), 2);
    assert_eq!(start.elapsed(), INTERVAL);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_failed() -> TestResult {
    let fake = FakeService::with_models([Ok(LanguageModel::new()
        .set_status(LanguageModelStatus::Failed)
        .set_error("not enough words"))]);
    let err = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_times(5)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_terminal_failure(), "{err:?}");
    let report = err.source().and_then(|e| e.downcast_ref::<StatusReport>());
    assert_eq!(
        report.map(|r| r.status()),
        Some("failed (not enough words)"),
        "{err:?}"
    );
    assert_eq!(fake.get_language_model_calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_upgrading() -> TestResult {
    let fake = FakeService::with_models([model(LanguageModelStatus::Upgrading)]);
    let err = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_unexpected_status(), "{err:?}");
    assert_eq!(fake.get_language_model_calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_transport_errors_are_retried() -> TestResult {
    let fake = FakeService::with_models([
        Err(Error::transport("connection reset")),
        model(LanguageModelStatus::Ready),
    ]);
    let got = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .send()
        .await?;
    assert_eq!(got.status, LanguageModelStatus::Ready);
    assert_eq!(fake.get_language_model_calls(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn customization_transport_errors_with_retry_pending() -> TestResult {
    let fake = FakeService::with_models([
        Err(Error::transport("connection reset")),
        model(LanguageModelStatus::Ready),
    ]);
    let err = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_interval(INTERVAL)
        .with_polling_error_policy(RetryPending)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(fake.get_language_model_calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn request_headers_reach_the_stub() -> TestResult {
    let fake = FakeService::with_models([model(LanguageModelStatus::Ready)]);
    client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_header(
            http::HeaderName::from_static("x-request-tag"),
            http::HeaderValue::from_static("nightly-build"),
        )
        .send()
        .await?;
    let options = fake.last_options().expect("stub was called");
    assert_eq!(
        options.headers().get("x-request-tag"),
        Some(&http::HeaderValue::from_static("nightly-build"))
    );
    Ok(())
}

#[tokio::test]
async fn invalid_poll_config() -> TestResult {
    let fake = FakeService::with_models([model(LanguageModelStatus::Ready)]);
    let err = client(&fake)?
        .when_customization_ready(CUSTOMIZATION_ID)
        .with_times(0)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument(), "{err:?}");
    assert_eq!(fake.get_language_model_calls(), 0);

    let fake = FakeService::with_corpora([corpora([CorpusStatus::Analyzed])]);
    let err = client(&fake)?
        .when_corpora_analyzed(CUSTOMIZATION_ID)
        .with_interval(Duration::ZERO)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument(), "{err:?}");
    assert_eq!(fake.list_corpora_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn missing_customization_id() -> TestResult {
    let fake = FakeService::default();
    let client = client(&fake)?;
    let err = client.when_corpora_analyzed("").send().await.unwrap_err();
    assert!(err.is_invalid_argument(), "{err:?}");
    let source = err
        .source()
        .and_then(|e| e.downcast_ref::<MissingCustomizationId>());
    assert_eq!(source, Some(&MissingCustomizationId));

    let err = client.when_customization_ready("").send().await.unwrap_err();
    assert!(err.is_invalid_argument(), "{err:?}");
    assert_eq!(fake.list_corpora_calls(), 0);
    assert_eq!(fake.get_language_model_calls(), 0);
    Ok(())
}
