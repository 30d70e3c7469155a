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

use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by the speech-to-text helpers.
///
/// The helpers report errors from multiple sources. The status fetch may fail
/// in the transport, the remote resource may reach a failed state, the polling
/// loop may run out of attempts while the resource is still processing, or the
/// application may supply invalid inputs.
///
/// Most applications will just return the error or log it. Applications that
/// need to react to specific conditions can use the predicates, or match on
/// [kind()][Error::kind]. The error [source][std::error::Error::source] holds
/// the details.
///
/// # Example
/// ```
/// use speech_gax::error::Error;
/// match example_function() {
///     Err(e) if e.is_timeout() => { println!("still processing {e}"); },
///     Err(e) if e.is_terminal_failure() => { println!("training failed {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # Err(Error::timeout("still training"))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

/// The type of error held by an [Error] instance.
///
/// Polling error policies receive errors of all kinds and use this type to
/// decide if the polling loop may continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// There is nothing to wait for, e.g. the customization has no corpora.
    NoWorkItem,
    /// The polling loop ran out of attempts while the resource was pending.
    Timeout,
    /// The remote resource reports a failed state.
    TerminalFailure,
    /// The remote resource reports a state the helpers do not recognize.
    UnexpectedStatus,
    /// The status fetch, or another call to the service, failed.
    Transport,
    /// The application provided invalid inputs.
    InvalidArgument,
}

impl Error {
    /// Creates an error indicating there is nothing to wait for.
    ///
    /// # Example
    /// ```
    /// use speech_gax::error::Error;
    /// let error = Error::no_work_item("customization has no corpora");
    /// assert!(error.is_no_work_item());
    /// ```
    pub fn no_work_item<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::NoWorkItem, source)
    }

    /// The polling loop has nothing to wait for.
    ///
    /// # Troubleshooting
    ///
    /// Corpora analysis can only be awaited after at least one corpus is added
    /// to the custom language model.
    pub fn is_no_work_item(&self) -> bool {
        matches!(self.kind, ErrorKind::NoWorkItem)
    }

    /// Creates an error representing a resource that is still processing when
    /// the polling loop stops.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use speech_gax::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Timeout, source)
    }

    /// The resource was still processing after the last polling attempt.
    ///
    /// This is always a client-side generated error. The resource may still
    /// complete in the service.
    ///
    /// # Troubleshooting
    ///
    /// Training a custom model may take many minutes. Increase the number of
    /// attempts or the interval between attempts.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Creates an error for a resource that reached a failed state.
    ///
    /// # Example
    /// ```
    /// use speech_gax::error::Error;
    /// let error = Error::terminal_failure("training failed");
    /// assert!(error.is_terminal_failure());
    /// ```
    pub fn terminal_failure<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::TerminalFailure, source)
    }

    /// The service reports the resource in a failed state.
    ///
    /// Such errors never recover by polling again.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::TerminalFailure)
    }

    /// Creates an error for a status value not covered by any classification.
    ///
    /// # Example
    /// ```
    /// use speech_gax::error::Error;
    /// let error = Error::unexpected_status("upgrading");
    /// assert!(error.is_unexpected_status());
    /// ```
    pub fn unexpected_status<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::UnexpectedStatus, source)
    }

    /// The service reports a status that is neither pending, done, nor failed.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedStatus)
    }

    /// Creates an error reported by the transport, or by the service.
    ///
    /// Implementations of the service stubs use this to wrap their errors.
    ///
    /// # Example
    /// ```
    /// use speech_gax::error::Error;
    /// let error = Error::transport("connection reset");
    /// assert!(error.is_transport());
    /// ```
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Transport, source)
    }

    /// The request to the service failed.
    ///
    /// The default polling error policy treats these errors as transient.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    /// Creates an error representing invalid application inputs.
    ///
    /// # Example
    /// ```
    /// use speech_gax::error::Error;
    /// let error = Error::invalid_argument("content type is required");
    /// assert!(error.is_invalid_argument());
    /// ```
    pub fn invalid_argument<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::InvalidArgument, source)
    }

    /// The request was rejected locally, before contacting the service.
    ///
    /// This error is never transient, the same inputs fail on every attempt.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument)
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn new<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        Self {
            kind,
            source: Some(source.into()),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            ErrorKind::NoWorkItem => "there is nothing to wait for",
            ErrorKind::Timeout => "the resource is still processing",
            ErrorKind::TerminalFailure => "the resource reports a failed state",
            ErrorKind::UnexpectedStatus => "the resource reports an unexpected status",
            ErrorKind::Transport => "the request to the service failed",
            ErrorKind::InvalidArgument => "the request has invalid arguments",
        };
        match &self.source {
            Some(e) => write!(f, "{prefix}: {e}"),
            None => write!(f, "{prefix}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error))
    }
}
