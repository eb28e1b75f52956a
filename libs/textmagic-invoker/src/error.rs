//! Invocation error type.

use thiserror::Error;

/// Boxed error used for chained transport causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The single error kind raised by a failed invocation.
///
/// Two semantically distinct failure categories collapse into this one kind:
/// a gateway response with a status outside 200-299, and a transport-level
/// failure (connection refused, timeout, DNS, stream interruption). They are
/// distinguished only by message; transport failures additionally carry the
/// underlying error, reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceInvokerError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ServiceInvokerError {
    /// Error for a gateway response with a non-2xx status code.
    pub(crate) fn http_status(code: u16) -> Self {
        Self {
            message: format!("Server responded with {code} http code"),
            source: None,
        }
    }

    /// Error wrapping a transport-level failure, preserving the cause.
    pub(crate) fn transport(cause: BoxError) -> Self {
        Self {
            message: cause.to_string(),
            source: Some(cause),
        }
    }

    /// The human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
