//! Rexster Client Library
//!
//! HTTP client for the Rexster graph server REST API.
//!
//! ```rust,no_run
//! use rexster_rs::{GraphElement, ServerConfig, Vertex};
//!
//! #[tokio::main]
//! async fn main() -> rexster_rs::Result<()> {
//!     let graph = rexster_rs::Graph::new("tinkergraph", ServerConfig::default());
//!     let response = graph.get_vertex("1").await?;
//!     if let Some(v) = response.vertex() {
//!         println!("{} is named {}", v.id(), v.get("name"));
//!     }
//!     graph.create_or_update_vertex(&Vertex::new("42", None)).await?;
//!     Ok(())
//! }
//! ```
//!
//! The `*_batch` operations and [`Graph::batch`] need the batch kibble
//! installed on the server.

mod client;
mod graph;
pub mod logging;
pub mod urls;

pub use client::Client;
pub use graph::Graph;
pub use logging::{EventLogger, LogEvent, NoopLogger, TracingLogger};
pub use rexster_core::models::*;
pub use rexster_core::ServerConfig;
pub use urls::{GraphUrls, VertexEdges};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-200 reply; `message` is the server's `message` and `error` joined
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
