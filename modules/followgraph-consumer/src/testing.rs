// Test mocks for the consumer.
//
// Three mocks matching the three trait boundaries:
// - MemoryUserStore (UserStore) — HashSet-based registry
// - RecordingGraph (FollowStore) — appends every write to an op log
// - ScriptedFriends (FriendSource) — scripted replies, one per request
//
// Plus FailingUserStore for the fatal-error path.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use followgraph_common::TwitterUser;
use followgraph_graph::RelationKind;
use twitter_client::{FriendIdsPage, TwitterError};

use crate::traits::{FollowStore, FriendSource, UserStore};

// ---------------------------------------------------------------------------
// MemoryUserStore
// ---------------------------------------------------------------------------

/// In-memory registry: first persist of an identity returns true.
#[derive(Default)]
pub struct MemoryUserStore {
    seen: Mutex<HashSet<i64>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn persist(&self, user: &TwitterUser) -> followgraph_registry::Result<bool> {
        Ok(self.seen.lock().unwrap().insert(user.id))
    }
}

/// Registry whose every call fails with a database fault.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn persist(&self, _user: &TwitterUser) -> followgraph_registry::Result<bool> {
        Err(followgraph_registry::RegistryError::Database(
            sqlx::Error::PoolClosed,
        ))
    }
}

// ---------------------------------------------------------------------------
// RecordingGraph
// ---------------------------------------------------------------------------

/// Graph store that records every write, in order, as a compact string.
#[derive(Default)]
pub struct RecordingGraph {
    ops: Mutex<Vec<String>>,
}

impl RecordingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered op log, e.g. `["node(1)", "edge(1-FOLLOWS->2)"]`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl FollowStore for RecordingGraph {
    async fn create_user_if_absent(&self, user_id: i64) -> followgraph_graph::Result<()> {
        self.ops.lock().unwrap().push(format!("node({user_id})"));
        Ok(())
    }

    async fn create_relation_if_absent(
        &self,
        source: i64,
        kind: RelationKind,
        target: i64,
    ) -> followgraph_graph::Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("edge({source}-{kind}->{target})"));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedFriends
// ---------------------------------------------------------------------------

/// One scripted reply to a friend-ids request.
pub enum FriendReply {
    Page { ids: Vec<i64>, next_cursor: i64 },
    RateLimited(Duration),
    NotFound,
    Transient,
}

/// Friend source that pops one scripted reply per request and records
/// every `(user_id, cursor)` it was asked for. Panics if called with an
/// exhausted script, so "no further remote calls" assertions fail loudly.
#[derive(Default)]
pub struct ScriptedFriends {
    script: Mutex<VecDeque<FriendReply>>,
    calls: Mutex<Vec<(i64, i64)>>,
}

impl ScriptedFriends {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_page(self, ids: &[i64], next_cursor: i64) -> Self {
        self.push(FriendReply::Page {
            ids: ids.to_vec(),
            next_cursor,
        })
    }

    pub fn then_rate_limited(self, reset: Duration) -> Self {
        self.push(FriendReply::RateLimited(reset))
    }

    pub fn then_not_found(self) -> Self {
        self.push(FriendReply::NotFound)
    }

    pub fn then_transient(self) -> Self {
        self.push(FriendReply::Transient)
    }

    fn push(self, reply: FriendReply) -> Self {
        self.script.lock().unwrap().push_back(reply);
        self
    }

    /// Every `(user_id, cursor)` requested, in order.
    pub fn calls(&self) -> Vec<(i64, i64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FriendSource for ScriptedFriends {
    async fn friend_ids(
        &self,
        user_id: i64,
        cursor: i64,
    ) -> twitter_client::Result<FriendIdsPage> {
        self.calls.lock().unwrap().push((user_id, cursor));

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedFriends: unexpected request ({user_id}, {cursor})"));

        match reply {
            FriendReply::Page { ids, next_cursor } => Ok(FriendIdsPage { ids, next_cursor }),
            FriendReply::RateLimited(reset) => Err(TwitterError::RateLimited { reset }),
            FriendReply::NotFound => Err(TwitterError::NotFound),
            FriendReply::Transient => Err(TwitterError::Network("connection reset".to_string())),
        }
    }
}
