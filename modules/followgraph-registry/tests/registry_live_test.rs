//! Live Postgres test for the user registry.
//! Run with: cargo test -p followgraph-registry --test registry_live_test -- --ignored

use followgraph_common::TwitterUser;
use followgraph_registry::UserRegistry;

#[tokio::test]
#[ignore] // requires a live Postgres at DATABASE_URL
async fn persist_is_idempotent() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = sqlx::PgPool::connect(&url).await.expect("Failed to connect");

    let registry = UserRegistry::new(pool.clone());
    registry.migrate().await.expect("Migration failed");

    // Use a timestamp-derived id so reruns don't collide with old rows.
    let id = chrono::Utc::now().timestamp_micros();
    let user = TwitterUser {
        id,
        name: Some("Live Test".to_string()),
        screen_name: Some("live_test".to_string()),
    };

    assert!(registry.persist(&user).await.unwrap());
    for _ in 0..3 {
        assert!(!registry.persist(&user).await.unwrap());
    }

    let rows: i64 =
        sqlx::query_scalar("SELECT count(*) FROM twitter_users WHERE user_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rows, 1);
}
