//! Remote web command handler.

use axum::extract::{OriginalUri, State};
use axum::Json;

use crate::dispatch::{ResponseEnvelope, COMMAND_PREFIX};
use crate::state::AppState;

/// Dispatches a remote web command and always answers 200 with an envelope.
///
/// `GET /api/{target}/{method}?k1=v1&k2=v2`
///
/// The `command` field echoes the raw path after `/api/`, undecoded.
pub async fn api(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Json<ResponseEnvelope> {
    let command = uri
        .path()
        .strip_prefix(COMMAND_PREFIX)
        .unwrap_or_default()
        .to_string();
    let outcome = state.dispatcher.dispatch(&uri.to_string()).await;
    Json(outcome.into_envelope(command))
}
