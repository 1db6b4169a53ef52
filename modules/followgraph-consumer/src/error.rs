use followgraph_common::Closed;
use followgraph_graph::GraphError;
use followgraph_registry::RegistryError;
use twitter_client::TwitterError;

/// Failure of a graph expansion.
///
/// Rate limits, vanished accounts and transient faults are handled inside
/// the expander and never appear here. `Api` only occurs when a retry
/// policy gives up, which the production policy never does.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    #[error(transparent)]
    Closed(#[from] Closed),

    #[error("Friend listing failed: {0}")]
    Api(#[from] TwitterError),
}

impl ExpandError {
    pub fn is_closed(&self) -> bool {
        matches!(self, ExpandError::Closed(_))
    }
}

/// Per-event failure at the orchestrator boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    #[error(transparent)]
    Closed(#[from] Closed),

    #[error("Malformed event payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Expand(#[from] ExpandError),
}

impl ConsumerError {
    /// Whether this is the clean shutdown signal rather than a fault.
    pub fn is_closed(&self) -> bool {
        match self {
            ConsumerError::Closed(_) => true,
            ConsumerError::Graph(e) => e.is_closed(),
            ConsumerError::Expand(e) => e.is_closed(),
            _ => false,
        }
    }
}
