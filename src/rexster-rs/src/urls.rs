//! Resource URLs of the Rexster REST API

use crate::{ClientError, Result};
use rexster_core::{KeyIndexType, ServerConfig};
use url::Url;

/// Edge sub-resources of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexEdges {
    Both,
    In,
    Out,
}

impl VertexEdges {
    pub fn as_str(&self) -> &'static str {
        match self {
            VertexEdges::Both => "bothE",
            VertexEdges::In => "inE",
            VertexEdges::Out => "outE",
        }
    }
}

/// Builds the URLs of one named graph: `http://{host}:{port}/graphs/{name}/...`
#[derive(Debug, Clone)]
pub struct GraphUrls {
    base: Url,
}

impl GraphUrls {
    pub fn new(server: &ServerConfig, graph_name: &str) -> Result<Self> {
        let mut base = Url::parse(&server.base_url())?;
        base.set_path(&format!("/graphs/{}", escape_slashes(graph_name)));
        Ok(Self { base })
    }

    fn join(&self, suffix: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}{}", self.base.path(), suffix));
        url
    }

    pub fn graph(&self) -> String {
        self.base.to_string()
    }

    pub fn vertex(&self, id: &str) -> String {
        self.join(&format!("/vertices/{}", escape_slashes(id))).into()
    }

    pub fn vertex_edges(&self, id: &str, edges: VertexEdges) -> String {
        self.join(&format!("/vertices/{}/{}", escape_slashes(id), edges.as_str()))
            .into()
    }

    pub fn edge(&self, id: &str) -> String {
        self.join(&format!("/edges/{}", escape_slashes(id))).into()
    }

    pub fn query_vertices(&self, key: &str, value: &str) -> String {
        let mut url = self.join("/vertices");
        url.query_pairs_mut()
            .append_pair("key", key)
            .append_pair("value", value);
        url.into()
    }

    pub fn query_edges(&self, key: &str, value: &str) -> String {
        let mut url = self.join("/edges");
        url.query_pairs_mut()
            .append_pair("key", key)
            .append_pair("value", value);
        url.into()
    }

    /// Key index lookup of several values at once (batch kibble).
    ///
    /// The server splits the bracketed list on commas, so a value that
    /// contains one is rejected.
    pub fn query_vertices_batch<S: AsRef<str>>(&self, key: &str, values: &[S]) -> Result<String> {
        let values: Vec<&str> = values.iter().map(|v| v.as_ref()).collect();
        if let Some(value) = values.iter().find(|v| v.contains(',')) {
            return Err(ClientError::InvalidArgument(format!(
                "batch value {:?} contains a comma",
                value
            )));
        }
        let list = format!("[{}]", values.join(","));

        let mut url = self.join("/tp/batch/vertices");
        url.query_pairs_mut()
            .append_pair("type", "keyindex")
            .append_pair("key", key)
            .append_pair("values", &list);
        Ok(url.into())
    }

    pub fn eval(&self, script: &str) -> String {
        let mut url = self.join("/tp/gremlin");
        url.query_pairs_mut().append_pair("script", script);
        url.into()
    }

    pub fn batch_tx(&self) -> String {
        self.join("/tp/batch/tx").into()
    }

    pub fn key_index(&self, index_type: KeyIndexType, key: &str) -> String {
        self.join(&format!(
            "/keyindices/{}/{}",
            index_type.as_str(),
            escape_slashes(key)
        ))
        .into()
    }
}

/// Replace every `/` with `%2F` so an identifier stays one path segment.
///
/// A `%` that already starts an escape (`%` plus two hex digits) is kept, so
/// escaping twice is a no-op and never yields `%252F`. Any other `%` becomes
/// `%25`. As a consequence the literal id `a%2Fb` and the id `a/b` map to the
/// same path.
pub fn escape_slashes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '/' => out.push_str("%2F"),
            '%' if !is_escape(&bytes[i + 1..]) => out.push_str("%25"),
            c => out.push(c),
        }
    }
    out
}

fn is_escape(rest: &[u8]) -> bool {
    rest.len() >= 2 && rest[0].is_ascii_hexdigit() && rest[1].is_ascii_hexdigit()
}
