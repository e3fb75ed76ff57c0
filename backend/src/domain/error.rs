//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to a status code and renders the messages inside the
//! `{"errors": [...]}` envelope.

use std::fmt;

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The operation ran but affected nothing although the target existed.
    OperationFailed,
    /// The requested record does not exist.
    NotFound,
    /// A backing dependency is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

impl ErrorCode {
    /// Message used when an error is built without one, and for redaction.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "bad request",
            Self::OperationFailed => "failed to perform the operation",
            Self::NotFound => "not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "internal server error",
        }
    }
}

/// Domain error carrying one or more human-readable messages.
///
/// ## Invariants
/// - `messages` is never empty; blank messages are replaced by the code's
///   [`ErrorCode::default_message`].
///
/// # Examples
/// ```
/// use storefront::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("product 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.messages(), ["product 42 not found"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    messages: Vec<String>,
    trace_id: Option<TraceId>,
}

impl Error {
    /// Create an error with a single message.
    ///
    /// The active [`TraceId`] is captured when one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_messages(code, [message])
    }

    /// Create an error listing several messages, one per violation.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::{Error, ErrorCode};
    ///
    /// let err = Error::with_messages(
    ///     ErrorCode::InvalidRequest,
    ///     ["name is required", "description is too long"],
    /// );
    /// assert_eq!(err.messages().len(), 2);
    /// ```
    pub fn with_messages<I, S>(code: ErrorCode, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut messages: Vec<String> = messages
            .into_iter()
            .map(Into::into)
            .filter(|message| !message.trim().is_empty())
            .collect();
        if messages.is_empty() {
            messages.push(code.default_message().to_owned());
        }
        Self {
            code,
            messages,
            trace_id: TraceId::current(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// First message, used for logging and single-error responses.
    pub fn message(&self) -> &str {
        self.messages
            .first()
            .map_or(self.code.default_message(), String::as_str)
    }

    /// Every message carried by the error.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Trace identifier captured when the error was created.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::OperationFailed`] using the
    /// stock message.
    pub fn operation_failed() -> Self {
        Self::new(
            ErrorCode::OperationFailed,
            ErrorCode::OperationFailed.default_message(),
        )
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for Error {}
