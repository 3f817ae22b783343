//! Rexster Core Library
//!
//! Data types shared by the Rexster REST client:
//! - Server connection settings
//! - Vertex and edge property bags
//! - Response and error envelopes
//! - Batch transaction actions

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::ServerConfig;
pub use models::*;
