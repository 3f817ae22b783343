//! Tinkergraph Example
//!
//! Walks the sample "tinkergraph" served by a local Rexster started with
//! `./rexster.sh -s`.
//!
//! Run with: cargo run --example tinkergraph
//! Set RUST_LOG=rexster_rs=debug to see every request.

use rexster_rs::{GraphElement, KeyIndexType, ServerConfig, TxAction, Vertex};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rexster_rs=debug")),
        )
        .with_target(false)
        .init();

    let server = ServerConfig::new("127.0.0.1", 8182).with_debug(true);
    let graph = rexster_rs::Graph::new("tinkergraph", server);
    println!("Rexster Tinkergraph Example\n");

    // Single vertex
    let response = graph.get_vertex("1").await?;
    if let Some(v) = response.vertex() {
        println!("📍 Vertex {} is {}", v.id(), v.get("name"));
    }

    // Key/value query
    let response = graph.query_vertices("lang", "java").await?;
    for v in response.vertices().unwrap_or_default() {
        println!("   {} written in java", v.get("name"));
    }

    // Outgoing edges
    let response = graph.get_vertex_out_e("1").await?;
    for e in response.edges().unwrap_or_default() {
        println!("🔗 {} -[{}]-> {}", e.out_v(), e.label(), e.in_v());
    }

    // Upsert
    let mut v = Vertex::new("example", None);
    v.set("color", "blue");
    graph.create_or_update_vertex(&v).await?;
    v.set("radius", json!(3));
    let updated = graph.create_or_update_vertex(&v).await?;
    println!("✅ Upserted {:?}", updated.vertex());

    // Missing elements are server errors
    match graph.get_vertex("doesnotexist").await {
        Ok(r) => println!("unexpected: {:?}", r),
        Err(e) => println!("❌ {}", e),
    }

    // Gremlin
    let response = graph.eval("g.V.count()").await?;
    println!("🔍 g.V.count() = {:?}", response.results);

    // Batch kibble required from here on
    graph.create_key_index(KeyIndexType::Vertex, "color").await?;
    let response = graph.query_vertices_batch("name", &["peter", "vadas"]).await?;
    println!("📦 Batch lookup found {} vertices", response.vertices().map_or(0, |vs| vs.len()));

    let actions = vec![
        TxAction::create(Vertex::new("tx_a", None)),
        TxAction::update(v),
    ];
    let response = graph.batch(&actions).await?;
    println!("📦 Batch tx success={}", response.success);

    Ok(())
}
