//! URL command parser.
//!
//! Turns `/api/{target}/{method}?k1=v1&k2=v2` (absolute or origin-form) into a
//! [`CallDescriptor`]. Values stay as raw strings; no percent-decoding is done
//! and interpreting them is left to the invoked method.

use axum::http::Uri;
use indexmap::IndexMap;

use super::descriptor::{Arguments, CallDescriptor};
use crate::error::DispatchError;

/// Path prefix that marks a remote web command.
pub const COMMAND_PREFIX: &str = "/api/";

pub fn parse_command(url: &str) -> Result<CallDescriptor, DispatchError> {
    let uri: Uri = url
        .parse()
        .map_err(|_| DispatchError::MalformedCommand(url.to_string()))?;

    let command = uri
        .path()
        .strip_prefix(COMMAND_PREFIX)
        .ok_or_else(|| DispatchError::MalformedCommand(uri.path().to_string()))?;
    let (target, method) = split_command(command)?;
    let arguments = parse_arguments(uri.query().unwrap_or(""))?;

    Ok(CallDescriptor {
        target: target.to_string(),
        method: method.to_string(),
        arguments,
    })
}

/// Splits `target/method`, requiring exactly two non-empty components.
fn split_command(command: &str) -> Result<(&str, &str), DispatchError> {
    let mut parts = command.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(target), Some(method), None) if !target.is_empty() && !method.is_empty() => {
            Ok((target, method))
        }
        _ => Err(DispatchError::MalformedCommand(command.to_string())),
    }
}

fn parse_arguments(query: &str) -> Result<Arguments, DispatchError> {
    if query.is_empty() {
        return Ok(Arguments::None);
    }

    let mut map = IndexMap::new();
    for pair in query.split('&') {
        let mut pieces = pair.split('=');
        match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(key), Some(value), None) if !key.is_empty() => {
                map.insert(key.to_string(), value.to_string());
            }
            _ => return Err(DispatchError::MalformedArgument(pair.to_string())),
        }
    }
    Ok(Arguments::Keyword(map))
}
