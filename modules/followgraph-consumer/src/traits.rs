// Trait abstractions for the orchestrator's dependencies.
//
// UserStore replaces UserRegistry, FollowStore replaces GraphWriter and
// FriendSource replaces TwitterClient, so the chain tests run against
// in-memory mocks: no network, no database.

use async_trait::async_trait;

use followgraph_common::TwitterUser;
use followgraph_graph::{GraphWriter, RelationKind};
use followgraph_registry::UserRegistry;
use twitter_client::{FriendIdsPage, TwitterClient};

// ---------------------------------------------------------------------------
// UserStore — replaces UserRegistry
// ---------------------------------------------------------------------------

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Register a user; `true` iff this call was the first insert.
    async fn persist(&self, user: &TwitterUser) -> followgraph_registry::Result<bool>;
}

#[async_trait]
impl UserStore for UserRegistry {
    async fn persist(&self, user: &TwitterUser) -> followgraph_registry::Result<bool> {
        UserRegistry::persist(self, user).await
    }
}

// ---------------------------------------------------------------------------
// FollowStore — replaces GraphWriter
// ---------------------------------------------------------------------------

#[async_trait]
pub trait FollowStore: Send + Sync {
    async fn create_user_if_absent(&self, user_id: i64) -> followgraph_graph::Result<()>;

    async fn create_relation_if_absent(
        &self,
        source: i64,
        kind: RelationKind,
        target: i64,
    ) -> followgraph_graph::Result<()>;
}

#[async_trait]
impl FollowStore for GraphWriter {
    async fn create_user_if_absent(&self, user_id: i64) -> followgraph_graph::Result<()> {
        GraphWriter::create_user_if_absent(self, user_id).await
    }

    async fn create_relation_if_absent(
        &self,
        source: i64,
        kind: RelationKind,
        target: i64,
    ) -> followgraph_graph::Result<()> {
        GraphWriter::create_relation_if_absent(self, source, kind, target).await
    }
}

// ---------------------------------------------------------------------------
// FriendSource — replaces TwitterClient
// ---------------------------------------------------------------------------

#[async_trait]
pub trait FriendSource: Send + Sync {
    /// One page of the accounts `user_id` follows.
    async fn friend_ids(&self, user_id: i64, cursor: i64)
        -> twitter_client::Result<FriendIdsPage>;
}

#[async_trait]
impl FriendSource for TwitterClient {
    async fn friend_ids(
        &self,
        user_id: i64,
        cursor: i64,
    ) -> twitter_client::Result<FriendIdsPage> {
        TwitterClient::friend_ids(self, user_id, cursor).await
    }
}
