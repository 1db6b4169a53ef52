//! Live Neo4j tests for the idempotent upserts.
//! Run with: cargo test -p followgraph-graph --test live_upsert_test -- --ignored

use followgraph_common::Lifecycle;
use followgraph_graph::{query, GraphClient, GraphWriter, RelationKind};

async fn connect() -> GraphClient {
    let uri = std::env::var("NEO4J_URI").expect("NEO4J_URI required");
    let user = std::env::var("NEO4J_USER").expect("NEO4J_USER required");
    let password = std::env::var("NEO4J_PASSWORD").expect("NEO4J_PASSWORD required");
    GraphClient::connect(&uri, &user, &password)
        .await
        .expect("Failed to connect")
}

async fn count(client: &GraphClient, cypher: &str, id: i64) -> i64 {
    let mut result = client
        .inner()
        .execute(query(cypher).param("id", id))
        .await
        .unwrap();
    let row = result.next().await.unwrap().expect("No result row");
    row.get("n").unwrap()
}

#[tokio::test]
#[ignore] // requires live Neo4j credentials
async fn node_and_edge_upserts_are_idempotent() {
    let client = connect().await;
    let writer = GraphWriter::new(client.clone(), Lifecycle::new());

    // Ids derived from the clock so reruns don't collide.
    let a = chrono::Utc::now().timestamp_micros();
    let b = a + 1;

    for _ in 0..3 {
        writer.create_user_if_absent(a).await.unwrap();
        writer.create_user_if_absent(b).await.unwrap();
        writer
            .create_relation_if_absent(a, RelationKind::Follows, b)
            .await
            .unwrap();
    }

    let nodes = count(
        &client,
        "MATCH (u:TwitterUser {user_id: $id}) RETURN count(u) AS n",
        a,
    )
    .await;
    assert_eq!(nodes, 1);

    let edges = count(
        &client,
        "MATCH (:TwitterUser {user_id: $id})-[r:FOLLOWS]->(:TwitterUser) RETURN count(r) AS n",
        a,
    )
    .await;
    assert_eq!(edges, 1);
}

#[tokio::test]
#[ignore] // requires live Neo4j credentials
async fn edge_requires_both_nodes() {
    let client = connect().await;
    let writer = GraphWriter::new(client.clone(), Lifecycle::new());

    let a = chrono::Utc::now().timestamp_micros() + 1_000_000;
    writer.create_user_if_absent(a).await.unwrap();

    // Target node never created: MATCH finds nothing, statement is a no-op.
    writer
        .create_relation_if_absent(a, RelationKind::Follows, a + 1)
        .await
        .unwrap();

    let edges = count(
        &client,
        "MATCH (:TwitterUser {user_id: $id})-[r:FOLLOWS]->() RETURN count(r) AS n",
        a,
    )
    .await;
    assert_eq!(edges, 0);
}
