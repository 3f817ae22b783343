use serde::{Deserialize, Serialize};

/// Connection settings for one Rexster server.
///
/// Derives `Deserialize` so an embedding application can nest it in its own
/// configuration file; the library itself never reads files or environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// REST API port (usually 8182)
    #[serde(default = "default_rest_port")]
    pub rest_port: u16,

    /// Emit debug events through `tracing` for every call
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rest_port() -> u16 {
    8182
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, rest_port: u16) -> Self {
        Self {
            host: host.into(),
            rest_port,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// `http://{host}:{rest_port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.rest_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            rest_port: default_rest_port(),
            debug: false,
        }
    }
}
