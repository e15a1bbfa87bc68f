//! Response envelope for `/api` replies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DispatchError;

/// Status text carried by every envelope, success or failure.
pub const FINISHED: &str = "Finished";

/// Uniform `{message, command, data}` body of every `/api` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub message: String,
    /// The `{target}/{method}` fragment exactly as received.
    pub command: String,
    /// Handler result on success, the public error message on failure.
    pub data: Value,
}

impl ResponseEnvelope {
    pub fn finished(command: impl Into<String>, data: Value) -> Self {
        ResponseEnvelope {
            message: FINISHED.to_string(),
            command: command.into(),
            data,
        }
    }
}

/// Encodes a handler's return value as JSON.
pub fn to_payload<R: Serialize + ?Sized>(value: &R) -> Result<Value, DispatchError> {
    Ok(serde_json::to_value(value)?)
}
