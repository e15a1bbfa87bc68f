//! Remote web command dispatch.
//!
//! One request flows through four steps:
//! - [`parser::parse_command`] turns the URL into a [`CallDescriptor`]
//! - [`registry::TargetRegistry::guard`] checks the target is allowed
//! - [`capability::Target::invoke`] runs the named capability
//! - [`shaper::ResponseEnvelope`] wraps the result for the client
//!
//! [`Dispatcher::dispatch`] runs the first three behind a single failure
//! boundary: every error becomes an [`Outcome::Failure`] carrying a fixed
//! public message, and the error detail is only logged.

pub mod capability;
pub mod descriptor;
pub mod parser;
pub mod registry;
pub mod shaper;

pub use capability::{BoundTarget, CapabilityTable, Target};
pub use descriptor::{Arguments, CallDescriptor};
pub use parser::{parse_command, COMMAND_PREFIX};
pub use registry::TargetRegistry;
pub use shaper::{ResponseEnvelope, FINISHED};

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{DispatchError, InvocationError};

/// Terminal state of one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(&'static str),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The value placed in the envelope's `data` field.
    pub fn into_data(self) -> Value {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(message) => Value::String(message.to_string()),
        }
    }

    pub fn into_envelope(self, command: impl Into<String>) -> ResponseEnvelope {
        ResponseEnvelope::finished(command, self.into_data())
    }
}

/// Runs remote web commands against a [`TargetRegistry`].
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<TargetRegistry>,
    log_commands: bool,
}

impl Dispatcher {
    pub fn new(registry: Arc<TargetRegistry>, log_commands: bool) -> Self {
        Dispatcher {
            registry,
            log_commands,
        }
    }

    /// Dispatches `url` and never fails: errors become [`Outcome::Failure`].
    ///
    /// The capability runs on the blocking pool, so a slow or hanging handler
    /// holds only its own worker thread. A panicking handler is reported as a
    /// failed invocation.
    pub async fn dispatch(&self, url: &str) -> Outcome {
        let span = tracing::info_span!("api", request_id = %Uuid::new_v4());
        async {
            if self.log_commands {
                tracing::info!("{}", url);
            }

            let registry = Arc::clone(&self.registry);
            let owned_url = url.to_string();
            let result = tokio::task::spawn_blocking(move || call(&registry, &owned_url))
                .await
                .unwrap_or_else(|join_err| {
                    Err(DispatchError::InvocationFailure(InvocationError::Aborted(
                        join_err.to_string(),
                    )))
                });

            into_outcome(url, result)
        }
        .instrument(span)
        .await
    }

    /// Same pipeline as [`Dispatcher::dispatch`], run on the calling thread
    /// and without the failure boundary.
    pub fn call(&self, url: &str) -> Result<Value, DispatchError> {
        call(&self.registry, url)
    }
}

fn call(registry: &TargetRegistry, url: &str) -> Result<Value, DispatchError> {
    let descriptor = parse_command(url)?;
    let target = registry.guard(&descriptor)?;
    target.invoke(&descriptor.method, &descriptor.arguments)
}

fn into_outcome(url: &str, result: Result<Value, DispatchError>) -> Outcome {
    match result {
        Ok(value) => Outcome::Success(value),
        Err(err) => {
            tracing::warn!(url, error = %err, "remote web command failed");
            Outcome::Failure(err.public_message())
        }
    }
}
