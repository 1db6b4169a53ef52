use followgraph_common::Closed;

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Clean shutdown unwound an in-progress write. Not a failure.
    #[error(transparent)]
    Closed(#[from] Closed),

    #[error("Graph store error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

impl GraphError {
    pub fn is_closed(&self) -> bool {
        matches!(self, GraphError::Closed(_))
    }
}
