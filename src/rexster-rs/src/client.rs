use crate::logging::{EventLogger, LogEvent, NoopLogger, TracingLogger};
use crate::{ClientError, Graph, Result};
use reqwest::{Client as HttpClient, Method, StatusCode};
use rexster_core::{ErrorResponse, Response, ServerConfig};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Rexster REST API Client
///
/// Stateless apart from the connection pool kept by the inner
/// `reqwest::Client`. Cloning is cheap and clones share that pool.
#[derive(Clone)]
pub struct Client {
    server: ServerConfig,
    http: HttpClient,
    logger: Arc<dyn EventLogger>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client for the given server.
    ///
    /// Debug events go to `tracing` when `server.debug` is set and are
    /// discarded otherwise.
    pub fn new(server: ServerConfig) -> Self {
        let logger: Arc<dyn EventLogger> = if server.debug {
            Arc::new(TracingLogger)
        } else {
            Arc::new(NoopLogger)
        };

        Self {
            server,
            http: HttpClient::new(),
            logger,
        }
    }

    /// Replace the debug event logger
    pub fn with_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Use a preconfigured HTTP client, e.g. one with timeouts.
    /// No timeout is set otherwise.
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Handle on one graph served by this client
    pub fn graph(&self, name: impl Into<String>) -> Graph {
        Graph::with_client(name, self.clone())
    }

    pub(crate) fn logger(&self) -> &dyn EventLogger {
        self.logger.as_ref()
    }

    /// GET `url` with no body
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.send::<()>(Method::GET, url, None).await
    }

    /// Send one request. A `data` payload is encoded as a JSON body.
    ///
    /// Status 200 resolves to the decoded [`Response`]; any other status
    /// resolves to [`ClientError::Server`]. Nothing is retried.
    pub async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        data: Option<&T>,
    ) -> Result<Response> {
        self.logger.log_event(&LogEvent::Request {
            method: method.as_str(),
            url,
        });

        let result = self.dispatch(&method, url, data).await;

        if let Err(error) = &result {
            self.logger.log_event(&LogEvent::RequestFailed {
                method: method.as_str(),
                url,
                error,
            });
        }
        result
    }

    async fn dispatch<T: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        data: Option<&T>,
    ) -> Result<Response> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(data) = data {
            request = request.json(data);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        self.decode(method, url, status, &body)
    }

    // A body that is not JSON decodes as an empty envelope
    fn decode(
        &self,
        method: &Method,
        url: &str,
        status: StatusCode,
        body: &[u8],
    ) -> Result<Response> {
        let value = match parse_body(body) {
            Ok(value) => value,
            Err(error) => {
                self.logger.log_event(&LogEvent::MalformedBody {
                    method: method.as_str(),
                    url,
                    error: &error,
                });
                Value::Null
            }
        };
        decode_response(status, value)
    }
}

fn parse_body(body: &[u8]) -> serde_json::Result<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
}

/// Resolve a reply into a success envelope or a server error.
/// Missing or mistyped fields take their defaults one by one.
pub(crate) fn decode_response(status: StatusCode, body: Value) -> Result<Response> {
    if status == StatusCode::OK {
        return Ok(Response::from_value(body));
    }

    let error = ErrorResponse::from_value(body);
    let mut message = error.combined_message();
    if message.is_empty() {
        message = status.to_string();
    }

    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}
