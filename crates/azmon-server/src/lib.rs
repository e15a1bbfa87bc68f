//! Remote web command server for the process monitor.
//!
//! Exposes a process list page and a `/api/{target}/{method}?k=v` endpoint
//! that calls methods on a registered target through its capability table.
//! This crate contains the dispatch pipeline, the axum routes, configuration
//! and the background listener.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod listener;
pub mod monitor_target;
pub mod router;
pub mod state;
