//! Debug event logging for graph operations and HTTP calls.
//!
//! Logging never affects control flow. [`NoopLogger`] is the default;
//! [`TracingLogger`] is selected when [`ServerConfig::debug`] is set, and any
//! other [`EventLogger`] can be injected with [`Client::with_logger`].
//!
//! [`ServerConfig::debug`]: rexster_core::ServerConfig::debug
//! [`Client::with_logger`]: crate::Client::with_logger

use crate::ClientError;

/// One observable event
#[derive(Debug)]
pub enum LogEvent<'a> {
    /// A facade operation is about to dispatch
    Operation {
        graph: &'a str,
        name: &'static str,
        args: &'a [String],
    },
    /// An HTTP request is about to be sent
    Request { method: &'a str, url: &'a str },
    /// An HTTP request resolved to an error
    RequestFailed {
        method: &'a str,
        url: &'a str,
        error: &'a ClientError,
    },
    /// A reply body was not JSON and decoded as an empty envelope
    MalformedBody {
        method: &'a str,
        url: &'a str,
        error: &'a serde_json::Error,
    },
}

/// Receiver of debug events
pub trait EventLogger: Send + Sync {
    fn log_event(&self, event: &LogEvent<'_>);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl EventLogger for NoopLogger {
    fn log_event(&self, _event: &LogEvent<'_>) {}
}

/// Forwards events to `tracing` at debug level, malformed bodies at warn
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl EventLogger for TracingLogger {
    fn log_event(&self, event: &LogEvent<'_>) {
        match event {
            LogEvent::Operation { graph, name, args } => {
                tracing::debug!(graph = %graph, args = ?args, "GRAPH {}", name);
            }
            LogEvent::Request { method, url } => {
                tracing::debug!(method = %method, url = %url, "HTTP request");
            }
            LogEvent::RequestFailed { method, url, error } => {
                tracing::debug!(method = %method, url = %url, error = %error, "HTTP {} failed to {}", method, url);
            }
            LogEvent::MalformedBody { method, url, error } => {
                tracing::warn!(method = %method, url = %url, error = %error, "Undecodable response body");
            }
        }
    }
}
