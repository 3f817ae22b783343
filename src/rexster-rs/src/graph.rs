use crate::logging::LogEvent;
use crate::urls::{GraphUrls, VertexEdges};
use crate::{Client, ClientError, Result};
use reqwest::Method;
use rexster_core::{
    Edge, GraphElement, KeyIndexType, Response, ServerConfig, TxAction, TxActionType, Vertex,
};
use serde_json::{json, Value};

/// Graph is one named graph served by a Rexster server.
///
/// Every operation is a single request; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    client: Client,
}

impl Graph {
    /// Graph `name` on `server`, with its own client
    pub fn new(name: impl Into<String>, server: ServerConfig) -> Self {
        Self::with_client(name, Client::new(server))
    }

    pub(crate) fn with_client(name: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn urls(&self) -> Result<GraphUrls> {
        GraphUrls::new(self.client.server(), &self.name)
    }

    fn log(&self, name: &'static str, args: &[String]) {
        self.client.logger().log_event(&LogEvent::Operation {
            graph: &self.name,
            name,
            args,
        });
    }

    pub async fn get_vertex(&self, id: &str) -> Result<Response> {
        self.log("get_vertex", &[id.to_string()]);
        let url = self.urls()?.vertex(id);
        self.client.get(&url).await
    }

    pub async fn query_vertices(&self, key: &str, value: &str) -> Result<Response> {
        self.log("query_vertices", &[key.to_string(), value.to_string()]);
        let url = self.urls()?.query_vertices(key, value);
        self.client.get(&url).await
    }

    /// All vertices in the `key` index having any of `values`.
    /// Requires the batch kibble.
    pub async fn query_vertices_batch<S: AsRef<str>>(
        &self,
        key: &str,
        values: &[S],
    ) -> Result<Response> {
        self.log(
            "query_vertices_batch",
            &[key.to_string(), values.len().to_string()],
        );
        let url = self.urls()?.query_vertices_batch(key, values)?;
        self.client.get(&url).await
    }

    pub async fn get_vertex_both_e(&self, id: &str) -> Result<Response> {
        self.log("get_vertex_both_e", &[id.to_string()]);
        self.get_vertex_edges(id, VertexEdges::Both).await
    }

    pub async fn get_vertex_in_e(&self, id: &str) -> Result<Response> {
        self.log("get_vertex_in_e", &[id.to_string()]);
        self.get_vertex_edges(id, VertexEdges::In).await
    }

    pub async fn get_vertex_out_e(&self, id: &str) -> Result<Response> {
        self.log("get_vertex_out_e", &[id.to_string()]);
        self.get_vertex_edges(id, VertexEdges::Out).await
    }

    async fn get_vertex_edges(&self, id: &str, edges: VertexEdges) -> Result<Response> {
        let url = self.urls()?.vertex_edges(id, edges);
        self.client.get(&url).await
    }

    pub async fn get_edge(&self, id: &str) -> Result<Response> {
        self.log("get_edge", &[id.to_string()]);
        let url = self.urls()?.edge(id);
        self.client.get(&url).await
    }

    pub async fn query_edges(&self, key: &str, value: &str) -> Result<Response> {
        self.log("query_edges", &[key.to_string(), value.to_string()]);
        let url = self.urls()?.query_edges(key, value);
        self.client.get(&url).await
    }

    /// Run a Gremlin script on the server.
    ///
    /// The script is sent verbatim; there is no parameter binding, so never
    /// interpolate untrusted input into it.
    pub async fn eval(&self, script: &str) -> Result<Response> {
        self.log("eval", &[script.to_string()]);
        let url = self.urls()?.eval(script);
        self.client.get(&url).await
    }

    /// POST the vertex to its own URL; creates it or updates its properties
    pub async fn create_or_update_vertex(&self, vertex: &Vertex) -> Result<Response> {
        let id = vertex.id();
        self.log("create_or_update_vertex", &[id.clone()]);
        let url = self.urls()?.vertex(&id);
        self.client
            .send(Method::POST, &url, Some(vertex.properties()))
            .await
    }

    pub async fn create_or_update_edge(&self, edge: &Edge) -> Result<Response> {
        let id = edge.id();
        self.log(
            "create_or_update_edge",
            &[
                id.clone(),
                edge.out_v().to_string(),
                edge.label().to_string(),
                edge.in_v().to_string(),
            ],
        );
        let url = self.urls()?.edge(&id);
        self.client
            .send(Method::POST, &url, Some(edge.properties()))
            .await
    }

    pub async fn create_key_index(&self, index_type: KeyIndexType, key: &str) -> Result<Response> {
        self.log("create_key_index", &[index_type.to_string(), key.to_string()]);
        let url = self.urls()?.key_index(index_type, key);
        self.client.send::<()>(Method::POST, &url, None).await
    }

    /// Submit create/update actions as one transaction (batch kibble).
    ///
    /// Delete actions are not supported; a batch containing one fails
    /// before anything is sent.
    pub async fn batch(&self, actions: &[TxAction]) -> Result<Response> {
        self.log("batch", &[actions.len().to_string()]);

        if let Some(action) = actions.iter().find(|a| a.action == TxActionType::Delete) {
            return Err(ClientError::Unsupported(format!(
                "batch delete of {} {:?}",
                action.item.element_type(),
                action.item.id()
            )));
        }

        let tx: Vec<Value> = actions.iter().map(TxAction::to_tx_entry).collect();
        let url = self.urls()?.batch_tx();
        self.client
            .send(Method::POST, &url, Some(&json!({ "tx": tx })))
            .await
    }
}
