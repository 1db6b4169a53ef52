use std::sync::Arc;

use tracing::{debug, error, info};

use followgraph_common::{Lifecycle, Post, RetryForever, RetryPolicy};
use followgraph_graph::RelationKind;

use crate::error::ConsumerError;
use crate::expander::Followees;
use crate::traits::{FollowStore, FriendSource, UserStore};

/// How one inbound event ended. Every outcome is acknowledged by the
/// transport glue; the variants exist for logging and replay control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First sighting: user registered and follow graph expanded.
    Registered { followees: u64 },
    /// Author already registered; no graph work.
    Duplicate,
    /// Shutdown unwound the event mid-flight. The idempotent writes make
    /// redelivery safe, so remaining work is re-derived from the replay.
    Interrupted,
    /// Unexpected fault. Logged, and the event is still acknowledged —
    /// its remaining work is dropped (see DESIGN.md, a preserved
    /// trade-off of the original system).
    Failed,
}

/// Per-event control flow: decode → register → (if new) expand and write.
///
/// Sequential by design: one event is fully processed, including nested
/// expansion and graph writes, before the next is accepted. Concurrency,
/// if any, comes from the transport's own dispatch.
pub struct Orchestrator {
    registry: Arc<dyn UserStore>,
    graph: Arc<dyn FollowStore>,
    friends: Arc<dyn FriendSource>,
    lifecycle: Lifecycle,
    retry: Arc<dyn RetryPolicy>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<dyn UserStore>,
        graph: Arc<dyn FollowStore>,
        friends: Arc<dyn FriendSource>,
        lifecycle: Lifecycle,
    ) -> Self {
        Self {
            registry,
            graph,
            friends,
            lifecycle,
            retry: Arc::new(RetryForever),
        }
    }

    /// Retry policy handed to each expansion (production: retry forever).
    pub fn with_retry_policy(mut self, retry: Arc<dyn RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    /// Process one event payload. Never returns an error: the closed
    /// signal maps to [`Outcome::Interrupted`] (logged as a clean stop),
    /// everything else fatal maps to [`Outcome::Failed`] after logging.
    pub async fn process(&self, payload: &[u8]) -> Outcome {
        match self.handle(payload).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_closed() => {
                info!("Shutdown during event processing; work resumes on redelivery");
                Outcome::Interrupted
            }
            Err(e) => {
                error!(error = %e, "Event processing failed, dropping event");
                Outcome::Failed
            }
        }
    }

    async fn handle(&self, payload: &[u8]) -> Result<Outcome, ConsumerError> {
        let post: Post = serde_json::from_slice(payload)?;
        let user = post.user;

        if !self.registry.persist(&user).await? {
            debug!(user_id = user.id, "Author already registered, skipping expansion");
            return Ok(Outcome::Duplicate);
        }

        // First sighting: subject node first, then per followee a node
        // followed by the edge — the edge MATCH needs both endpoints.
        self.graph.create_user_if_absent(user.id).await?;

        let mut followees = Followees::new(self.friends.as_ref(), self.lifecycle.clone(), user.id)
            .with_retry_policy(self.retry.clone());

        let mut count = 0u64;
        while let Some(followee) = followees.next().await? {
            self.graph.create_user_if_absent(followee).await?;
            self.graph
                .create_relation_if_absent(user.id, RelationKind::Follows, followee)
                .await?;
            count += 1;
        }

        info!(user_id = user.id, followees = count, "Follow graph expanded");
        Ok(Outcome::Registered { followees: count })
    }
}
