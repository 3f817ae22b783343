//! In-process stand-in for a Rexster server, seeded with the stock
//! "tinkergraph" sample (vertices 1-6, edges 7-12).
//!
//! It answers only the routes the client uses, in the reply shapes Rexster
//! sends. It stores elements in maps and evaluates nothing.

#![allow(dead_code)]

use actix_web::dev::{Service, ServerHandle};
use actix_web::{web, App, HttpResponse, HttpServer};
use rexster_rs::ServerConfig;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

pub const GRAPH: &str = "tinkergraph";

type Object = Map<String, Value>;

#[derive(Default)]
pub struct FixtureGraph {
    vertices: BTreeMap<String, Object>,
    edges: BTreeMap<String, Object>,
    key_indices: HashSet<(String, String)>,
}

fn object(value: Value) -> Object {
    match value {
        Value::Object(map) => map,
        _ => Object::new(),
    }
}

impl FixtureGraph {
    pub fn tinkergraph() -> Self {
        let mut graph = Self::default();
        for (id, props) in [
            ("1", json!({"name": "marko", "age": 29})),
            ("2", json!({"name": "vadas", "age": 27})),
            ("3", json!({"name": "lop", "lang": "java"})),
            ("4", json!({"name": "josh", "age": 32})),
            ("5", json!({"name": "ripple", "lang": "java"})),
            ("6", json!({"name": "peter", "age": 35})),
        ] {
            graph.upsert_vertex(id, object(props));
        }
        for (id, out_v, label, in_v, weight) in [
            ("7", "1", "knows", "2", 0.5),
            ("8", "1", "knows", "4", 1.0),
            ("9", "1", "created", "3", 0.4),
            ("10", "4", "created", "5", 1.0),
            ("11", "4", "created", "3", 0.4),
            ("12", "6", "created", "3", 0.2),
        ] {
            graph.upsert_edge(
                id,
                object(json!({"_outV": out_v, "_label": label, "_inV": in_v, "weight": weight})),
            );
        }
        graph
    }

    fn upsert_vertex(&mut self, id: &str, props: Object) -> Value {
        let vertex = self.vertices.entry(id.to_string()).or_default();
        vertex.extend(props);
        vertex.insert("_id".to_string(), json!(id));
        vertex.insert("_type".to_string(), json!("vertex"));
        Value::Object(vertex.clone())
    }

    fn upsert_edge(&mut self, id: &str, props: Object) -> Value {
        let edge = self.edges.entry(id.to_string()).or_default();
        edge.extend(props);
        edge.insert("_id".to_string(), json!(id));
        edge.insert("_type".to_string(), json!("edge"));
        Value::Object(edge.clone())
    }

    fn matching(elements: &BTreeMap<String, Object>, key: &str, values: &[&str]) -> Vec<Value> {
        elements
            .values()
            .filter(|e| matches!(e.get(key), Some(Value::String(s)) if values.contains(&s.as_str())))
            .map(|e| Value::Object(e.clone()))
            .collect()
    }

    fn edges_of(&self, id: &str, direction: &str) -> Vec<Value> {
        self.edges
            .values()
            .filter(|e| {
                let out = e.get("_outV") == Some(&json!(id));
                let inn = e.get("_inV") == Some(&json!(id));
                match direction {
                    "outE" => out,
                    "inE" => inn,
                    _ => out || inn,
                }
            })
            .map(|e| Value::Object(e.clone()))
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

pub struct FixtureState {
    pub graph: Mutex<FixtureGraph>,
}

fn ok(results: Value) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "results": results,
        "success": true,
        "version": "2.4.0",
        "queryTime": 0.25,
    }))
}

fn not_found(message: String) -> HttpResponse {
    HttpResponse::NotFound().json(json!({"message": message, "version": "2.4.0"}))
}

fn check_graph(graph: &str) -> Option<HttpResponse> {
    if graph != GRAPH {
        return Some(not_found(format!("Graph [{}] could not be found", graph)));
    }
    None
}

async fn get_vertex(
    path: web::Path<(String, String)>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let (graph, id) = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    match state.graph.lock().await.vertices.get(&id) {
        Some(v) => ok(Value::Object(v.clone())),
        None => not_found(format!("Vertex with [{}] cannot be found.", id)),
    }
}

async fn post_vertex(
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let (graph, id) = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let vertex = state
        .graph
        .lock()
        .await
        .upsert_vertex(&id, object(body.into_inner()));
    ok(vertex)
}

async fn vertex_edges(
    path: web::Path<(String, String, String)>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let (graph, id, direction) = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let fixture = state.graph.lock().await;
    if !fixture.vertices.contains_key(&id) {
        return not_found(format!("Vertex with [{}] cannot be found.", id));
    }
    ok(Value::Array(fixture.edges_of(&id, &direction)))
}

async fn query_vertices(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let graph = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let key = query.get("key").cloned().unwrap_or_default();
    let value = query.get("value").cloned().unwrap_or_default();
    let fixture = state.graph.lock().await;
    ok(Value::Array(FixtureGraph::matching(&fixture.vertices, &key, &[value.as_str()])))
}

async fn get_edge(
    path: web::Path<(String, String)>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let (graph, id) = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    match state.graph.lock().await.edges.get(&id) {
        Some(e) => ok(Value::Object(e.clone())),
        None => not_found(format!("Edge with id [{}] cannot be found.", id)),
    }
}

async fn post_edge(
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let (graph, id) = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let props = object(body.into_inner());
    let mut fixture = state.graph.lock().await;
    for end in ["_outV", "_inV"] {
        let exists = match props.get(end) {
            Some(Value::String(v)) => fixture.vertices.contains_key(v),
            _ => fixture
                .edges
                .get(&id)
                .map(|e| e.contains_key(end))
                .unwrap_or(false),
        };
        if !exists {
            return HttpResponse::BadRequest()
                .json(json!({"message": format!("an edge must specify a {}", end)}));
        }
    }
    ok(fixture.upsert_edge(&id, props))
}

async fn query_edges(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let graph = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let key = query.get("key").cloned().unwrap_or_default();
    let value = query.get("value").cloned().unwrap_or_default();
    let fixture = state.graph.lock().await;
    ok(Value::Array(FixtureGraph::matching(&fixture.edges, &key, &[value.as_str()])))
}

async fn batch_vertices(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let graph = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let key = query.get("key").cloned().unwrap_or_default();
    let list = query.get("values").cloned().unwrap_or_default();
    let Some(inner) = list.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
        return HttpResponse::BadRequest().json(json!({"message": "values must be a list"}));
    };
    let values: Vec<&str> = inner.split(',').collect();
    let fixture = state.graph.lock().await;
    ok(Value::Array(FixtureGraph::matching(&fixture.vertices, &key, &values)))
}

async fn batch_tx(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let graph = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    let Some(Value::Array(tx)) = body.get("tx").cloned() else {
        return HttpResponse::BadRequest().json(json!({"message": "no tx"}));
    };
    let mut fixture = state.graph.lock().await;
    for entry in &tx {
        let mut props = object(entry.clone());
        let id = match props.remove("_id") {
            Some(Value::String(id)) => id,
            _ => format!("tx{}", fixture.vertices.len() + fixture.edges.len()),
        };
        let action = props.remove("_action");
        if action != Some(json!("create")) && action != Some(json!("update")) {
            return HttpResponse::BadRequest().json(json!({"message": "bad _action"}));
        }
        match props.remove("_type") {
            Some(t) if t == json!("vertex") => {
                fixture.upsert_vertex(&id, props);
            }
            Some(t) if t == json!("edge") => {
                fixture.upsert_edge(&id, props);
            }
            _ => return HttpResponse::BadRequest().json(json!({"message": "bad _type"})),
        }
    }
    HttpResponse::Ok().json(json!({"success": true, "txProcessed": tx.len(), "version": "2.4.0"}))
}

async fn key_index(
    path: web::Path<(String, String, String)>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let (graph, kind, key) = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    if kind != "vertex" && kind != "edge" {
        return HttpResponse::BadRequest().json(json!({"message": "unknown index class"}));
    }
    state.graph.lock().await.key_indices.insert((kind, key));
    HttpResponse::Ok().json(json!({"queryTime": 0.1, "version": "2.4.0"}))
}

async fn gremlin(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<FixtureState>,
) -> HttpResponse {
    let graph = path.into_inner();
    if let Some(resp) = check_graph(&graph) {
        return resp;
    }
    // Canned answers only
    let fixture = state.graph.lock().await;
    match query.get("script").map(String::as_str) {
        Some("g.V.count()") => ok(json!([fixture.vertex_count()])),
        Some("g.V[3]") => ok(json!([fixture.vertices.get("3")])),
        _ => HttpResponse::InternalServerError().json(json!({
            "message": "",
            "error": "javax.script.ScriptException: groovy.lang.MissingPropertyException",
        })),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/graphs/{graph}")
            .route("/vertices", web::get().to(query_vertices))
            .route("/vertices/{id}", web::get().to(get_vertex))
            .route("/vertices/{id}", web::post().to(post_vertex))
            .route("/vertices/{id}/{direction}", web::get().to(vertex_edges))
            .route("/edges", web::get().to(query_edges))
            .route("/edges/{id}", web::get().to(get_edge))
            .route("/edges/{id}", web::post().to(post_edge))
            .route("/keyindices/{kind}/{key}", web::post().to(key_index))
            .route("/tp/gremlin", web::get().to(gremlin))
            .route("/tp/batch/vertices", web::get().to(batch_vertices))
            .route("/tp/batch/tx", web::post().to(batch_tx)),
    );
}

/// A fixture server bound to an ephemeral local port
pub struct FixtureServer {
    pub port: u16,
    pub state: web::Data<FixtureState>,
    /// Every request received, as "METHOD /path?query"
    requests: Arc<StdMutex<Vec<String>>>,
    handle: ServerHandle,
}

impl FixtureServer {
    /// Start the server on the current actix runtime
    pub async fn start() -> Self {
        let state = web::Data::new(FixtureState {
            graph: Mutex::new(FixtureGraph::tinkergraph()),
        });
        let requests = Arc::new(StdMutex::new(Vec::new()));

        let app_state = state.clone();
        let app_requests = requests.clone();
        let server = HttpServer::new(move || {
            let requests = app_requests.clone();
            App::new()
                .app_data(app_state.clone())
                .wrap_fn(move |req, srv| {
                    requests
                        .lock()
                        .unwrap()
                        .push(format!("{} {}", req.method(), req.uri()));
                    srv.call(req)
                })
                .configure(configure)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fixture server");
        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            port,
            state,
            requests,
            handle,
        }
    }

    pub fn config(&self) -> ServerConfig {
        ServerConfig::new("127.0.0.1", self.port)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
