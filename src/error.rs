//! Error types and the fixed texts shown to the person issuing commands.

use thiserror::Error;

/// Returned for any malformed command and for upstream failures of read-only commands.
pub const PARAMS_ERROR: &str = "命令参数错误";
/// Returned when no handler exists for the operator or operator/resource pair.
pub const NO_SUCH_COMMAND: &str = "没有该命令";
pub const EXPOSE_UNSUPPORTED: &str = "expose only supports pod";
pub const DELETE_UNSUPPORTED: &str = "delete only supports pods, services, namespaces";
pub const CREATE_UNSUPPORTED: &str = "create only supports namespaces";

/// Failure of a single command invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed or incomplete token list. The detail is kept for logs only.
    #[error("invalid command parameters: {0}")]
    Params(String),

    /// Operator, or operator/resource pair, without a handler.
    #[error("no such command")]
    NoSuchCommand,

    /// Operator is valid but does not support the requested resource.
    #[error("{0}")]
    Unsupported(&'static str),

    /// Kubernetes API error
    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Manifest (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parameter error with the given detail
    pub fn params(detail: impl Into<String>) -> Self {
        Self::Params(detail.into())
    }

    /// Text handed back to the caller for this error.
    ///
    /// Upstream and serialization failures collapse into [`PARAMS_ERROR`];
    /// the underlying cause only reaches the log.
    pub fn display_text(&self) -> &'static str {
        match self {
            Error::NoSuchCommand => NO_SUCH_COMMAND,
            Error::Unsupported(text) => *text,
            Error::Params(_) | Error::Kube(_) | Error::Serialization(_) => PARAMS_ERROR,
        }
    }

    /// Whether this error came from the API rather than from the command itself.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Kube(_) | Error::Serialization(_))
    }
}

/// Message of an upstream failure as shown by the mutating commands.
pub fn upstream_message(error: &kube::Error) -> String {
    match error {
        kube::Error::Api(status) if !status.message.is_empty() => status.message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use kube::core::ErrorResponse;

    use super::*;

    #[test]
    fn grammar_and_upstream_errors_share_the_sentinel() {
        assert_eq!(Error::params("dangling -n").display_text(), PARAMS_ERROR);
        let api = kube::Error::Api(ErrorResponse {
            status: "Failure".into(),
            message: "boom".into(),
            reason: "InternalError".into(),
            code: 500,
        });
        let err = Error::from(api);
        assert!(err.is_upstream());
        assert_eq!(err.display_text(), PARAMS_ERROR);
    }

    #[test]
    fn unsupported_keeps_its_own_text() {
        assert_eq!(
            Error::Unsupported(EXPOSE_UNSUPPORTED).display_text(),
            "expose only supports pod"
        );
        assert_eq!(Error::NoSuchCommand.display_text(), NO_SUCH_COMMAND);
    }

    #[test]
    fn upstream_message_prefers_status_message() {
        let api = kube::Error::Api(ErrorResponse {
            status: "Failure".into(),
            message: "pods \"web\" already exists".into(),
            reason: "AlreadyExists".into(),
            code: 409,
        });
        assert_eq!(upstream_message(&api), "pods \"web\" already exists");
    }
}
