pub mod client;
pub mod error;
pub mod writer;

pub use client::GraphClient;
pub use error::{GraphError, Result};
pub use writer::{GraphWriter, RelationKind};

pub use neo4rs::query;
