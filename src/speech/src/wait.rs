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

//! Classifiers and polling loops for the custom model lifecycles.
//!
//! The classifiers are public, applications with their own polling loops can
//! use them with [lro::poll_until_terminal].

use crate::Result;
use crate::error::NoCorpora;
use crate::model::{Corpora, CorpusStatus, LanguageModel, LanguageModelStatus};
use gax::options::RequestOptions;
use lro::{Classification, Poller, StatusClassifier};
use std::sync::Arc;

/// Classifies the corpora of a custom language model.
///
/// The corpora are still processing if any corpus is being processed. They are
/// done if no corpus is being processed and at least one corpus is analyzed.
/// Any other combination, including an empty list, is unexpected.
///
/// # Example
/// ```
/// # use speech_to_text::wait::CorporaClassifier;
/// # use speech_to_text::model::*;
/// use lro::{Classification, StatusClassifier};
/// let corpora = Corpora::new().set_corpora([
///     Corpus::new().set_status(CorpusStatus::Analyzed),
///     Corpus::new().set_status(CorpusStatus::BeingProcessed),
/// ]);
/// assert_eq!(CorporaClassifier.classify(&corpora), Classification::Processing);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CorporaClassifier;

impl StatusClassifier<Corpora> for CorporaClassifier {
    fn classify(&self, status: &Corpora) -> Classification {
        let any = |s: CorpusStatus| status.corpora.iter().any(|c| c.status == s);
        if any(CorpusStatus::BeingProcessed) {
            return Classification::Processing;
        }
        if any(CorpusStatus::Analyzed) {
            return Classification::Done;
        }
        Classification::Unexpected
    }

    fn describe(&self, status: &Corpora) -> String {
        let statuses = status
            .corpora
            .iter()
            .map(|c| format!("{}={}", c.name, c.status))
            .collect::<Vec<_>>();
        format!("[{}]", statuses.join(", "))
    }
}

/// Classifies a custom language model.
///
/// | Status                     | Classification |
/// | -------------------------- | -------------- |
/// | `pending`, `training`      | Processing     |
/// | `ready`, `available`       | Done           |
/// | `failed`                   | Failed         |
/// | `upgrading`, anything else | Unexpected     |
#[derive(Clone, Copy, Debug, Default)]
pub struct LanguageModelClassifier;

impl StatusClassifier<LanguageModel> for LanguageModelClassifier {
    fn classify(&self, status: &LanguageModel) -> Classification {
        use LanguageModelStatus as S;
        match &status.status {
            S::Pending | S::Training => Classification::Processing,
            S::Ready | S::Available => Classification::Done,
            S::Failed => Classification::Failed,
            S::Upgrading | S::UnknownValue(_) => Classification::Unexpected,
        }
    }

    fn describe(&self, status: &LanguageModel) -> String {
        match &status.error {
            Some(e) => format!("{} ({e})", status.status),
            None => status.status.to_string(),
        }
    }
}

pub(crate) async fn corpora_analyzed<S>(
    stub: Arc<S>,
    customization_id: String,
    options: RequestOptions,
) -> Result<Corpora>
where
    S: crate::stub::SpeechToText + 'static,
{
    options.poll_config().validate()?;
    // An empty collection is never going to change, fail before polling.
    let initial = stub
        .list_corpora(customization_id.clone(), options.clone())
        .await?;
    if initial.corpora.is_empty() {
        tracing::debug!(customization_id, "no corpora to wait for");
        return Err(crate::Error::no_work_item(NoCorpora(customization_id)));
    }
    let operation = format!("corpora analysis for customization {customization_id}");
    let fetch = {
        let options = options.clone();
        move || {
            let stub = stub.clone();
            let id = customization_id.clone();
            let options = options.clone();
            async move { stub.list_corpora(id, options).await }
        }
    };
    lro::new_poller(
        options.effective_polling_error_policy(),
        options.effective_polling_backoff_policy(),
        CorporaClassifier,
        operation,
        fetch,
    )
    .until_done()
    .await
}

pub(crate) async fn customization_ready<S>(
    stub: Arc<S>,
    customization_id: String,
    options: RequestOptions,
) -> Result<LanguageModel>
where
    S: crate::stub::SpeechToText + 'static,
{
    options.poll_config().validate()?;
    let operation = format!("training for customization {customization_id}");
    let fetch = {
        let options = options.clone();
        move || {
            let stub = stub.clone();
            let id = customization_id.clone();
            let options = options.clone();
            async move { stub.get_language_model(id, options).await }
        }
    };
    lro::new_poller(
        options.effective_polling_error_policy(),
        options.effective_polling_backoff_policy(),
        LanguageModelClassifier,
        operation,
        fetch,
    )
    .until_done()
    .await
}
