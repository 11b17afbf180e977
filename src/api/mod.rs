//! HTTP API: trigger endpoint, health check, and SSE progress stream.

pub mod logs;
pub mod server;
pub mod types;
