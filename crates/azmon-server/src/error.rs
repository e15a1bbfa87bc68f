//! Error types for the remote web command server.
//!
//! [`DispatchError`] covers every way a `/api/...` request can fail. None of
//! them reach the HTTP client verbatim: [`DispatchError::public_message`]
//! collapses each kind into one of two fixed strings, and the detail is only
//! logged server-side.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use azmon_core::MonitorError;
use serde::Serialize;

/// Reply text for a target that is not in the registry.
pub const NOT_ALLOWED_MESSAGE: &str = "remote call not allowed";

/// Reply text for every other dispatch failure.
pub const EXECUTION_ERROR_MESSAGE: &str = "ERROR executing remote web command";

/// Failure of one step of the dispatch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The path is not `/api/{target}/{method}`.
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    /// A query pair is not `key=value`.
    #[error("malformed argument: '{0}'")]
    MalformedArgument(String),

    /// The target is not registered.
    #[error("remote call not allowed: {0}")]
    NotPermitted(String),

    /// The target has no capability with this name.
    #[error("method not found: {target}/{method}")]
    MethodNotFound { target: String, method: String },

    /// The handler ran and failed.
    #[error("invocation failed: {0}")]
    InvocationFailure(#[from] InvocationError),

    /// The handler's return value could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DispatchError {
    /// The fixed, non-leaking text placed in the response `data` field.
    pub fn public_message(&self) -> &'static str {
        match self {
            DispatchError::NotPermitted(_) => NOT_ALLOWED_MESSAGE,
            _ => EXECUTION_ERROR_MESSAGE,
        }
    }
}

/// Errors raised by a capability handler.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// Keyword arguments were passed to a method that takes none.
    #[error("method takes no arguments but {count} were given")]
    UnexpectedArguments { count: usize },

    /// A required keyword argument is absent.
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    /// A keyword argument the method does not accept.
    #[error("unexpected keyword argument '{0}'")]
    UnknownArgument(String),

    /// A keyword argument whose string value could not be interpreted.
    #[error("invalid value '{value}' for argument '{name}': {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    /// The handler panicked or its worker was cancelled.
    #[error("handler aborted: {0}")]
    Aborted(String),
}

/// Errors building a target registry or capability table.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("invalid method name '{0}': expected a lowercase identifier not starting with '_'")]
    InvalidMethodName(String),

    #[error("method '{0}' is already registered")]
    DuplicateMethod(String),

    #[error("invalid target name '{0}': expected a lowercase identifier not starting with '_'")]
    InvalidTargetName(String),

    #[error("target '{0}' is already registered")]
    DuplicateTarget(String),
}

/// Structured error detail in page responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    pub message: String,
}

/// Errors from the non-dispatch routes (the process list page).
///
/// `/api` requests never produce this type; they always answer 200 with an
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The monitor failed while building the page (500).
    #[error("monitor error: {0}")]
    Monitor(#[from] MonitorError),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::Monitor(err) => ApiErrorDetail {
                code: "MONITOR_ERROR".to_string(),
                message: err.to_string(),
            },
            ApiError::InternalError(msg) => ApiErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: msg.clone(),
            },
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

/// Errors from the listener lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to start listener thread: {0}")]
    Spawn(std::io::Error),

    #[error("web server is already running on {0}")]
    AlreadyRunning(SocketAddr),

    #[error("stopping the web server is not supported")]
    StopUnsupported,
}

/// Errors reading [`crate::config::ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}
