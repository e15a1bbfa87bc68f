//! HTTP handlers.
//!
//! Handlers are thin: they extract the request, hand the work to the
//! [`crate::dispatch::Dispatcher`] or the monitor, and wrap the result.

pub mod api;
pub mod index;
