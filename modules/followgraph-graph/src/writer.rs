use std::sync::Arc;
use std::time::Duration;

use neo4rs::{query, Query};
use tracing::warn;

use followgraph_common::{Lifecycle, RetryForever, RetryPolicy};

use crate::error::Result;
use crate::GraphClient;

/// Pause before retrying after a fault that looks like the store itself
/// is unreachable, rather than a bad query.
const CONNECTIVITY_PAUSE: Duration = Duration::from_secs(1);

/// Typed relation between two user nodes.
///
/// Relationship types cannot be bound as Cypher parameters, so the kind
/// is a closed enum spliced into the template as a static identifier;
/// everything else stays a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Follows,
}

impl RelationKind {
    pub fn as_cypher(&self) -> &'static str {
        match self {
            RelationKind::Follows => "FOLLOWS",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_cypher())
    }
}

/// Write-side wrapper for the graph. Used by the consumer only.
///
/// Every write is an idempotent MERGE: concurrent writers racing on the
/// same node or edge converge to a single persisted record without any
/// application-level locking. Faults are retried until the query lands
/// or the lifecycle closes.
pub struct GraphWriter {
    client: GraphClient,
    lifecycle: Lifecycle,
    retry: Arc<dyn RetryPolicy>,
}

impl GraphWriter {
    pub fn new(client: GraphClient, lifecycle: Lifecycle) -> Self {
        Self {
            client,
            lifecycle,
            retry: Arc::new(RetryForever),
        }
    }

    pub fn with_retry_policy(mut self, retry: Arc<dyn RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    /// Ensure a node exists for `user_id`. MERGE on user_id for
    /// idempotency; no other predicates, so a node created for a bare
    /// followee id matches the same identity seen later as an author.
    pub async fn create_user_if_absent(&self, user_id: i64) -> Result<()> {
        self.run_retrying(|| {
            query("MERGE (u:TwitterUser {user_id: $user_id})").param("user_id", user_id)
        })
        .await
    }

    /// Ensure the `source -[kind]-> target` edge exists. Matches both
    /// existing nodes and MERGEs the relationship, so at most one edge
    /// exists per ordered (source, kind, target) triple. Both nodes must
    /// already exist; if either is missing the MATCH finds nothing and
    /// the statement is a no-op.
    pub async fn create_relation_if_absent(
        &self,
        source: i64,
        kind: RelationKind,
        target: i64,
    ) -> Result<()> {
        let template = format!(
            "MATCH (a:TwitterUser {{user_id: $source}}), (b:TwitterUser {{user_id: $target}})
             MERGE (a)-[:{}]->(b)",
            kind.as_cypher()
        );
        self.run_retrying(|| {
            query(&template)
                .param("source", source)
                .param("target", target)
        })
        .await
    }

    /// Run a query, retrying until it succeeds or the lifecycle closes.
    ///
    /// Connectivity-classified faults pause before the next attempt so a
    /// store restart isn't hammered; everything else retries on the
    /// injected policy (unbounded and immediate in production).
    async fn run_retrying(&self, build: impl Fn() -> Query) -> Result<()> {
        let mut attempt = 0u32;
        loop {
            self.lifecycle.guard()?;

            let err = match self.client.graph.run(build()).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            attempt += 1;
            warn!(error = %err, attempt, "Retrying graph query");

            let mut delay = match self.retry.next_delay(attempt) {
                Some(d) => d,
                None => return Err(err.into()),
            };
            if is_connectivity(&err) {
                delay = delay.max(CONNECTIVITY_PAUSE);
            }
            if !delay.is_zero() {
                self.lifecycle.sleep(delay).await?;
            }
        }
    }
}

fn is_connectivity(err: &neo4rs::Error) -> bool {
    matches!(
        err,
        neo4rs::Error::ConnectionError | neo4rs::Error::IOError { .. }
    )
}
