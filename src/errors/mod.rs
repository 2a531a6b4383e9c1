//! Typed error hierarchy for the indexer.
//!
//! Hand-written `Display` impls, no `thiserror` derive, matching the
//! teacher's own `src/errors/mod.rs` / `src/errors/blockchain.rs` style.

use std::fmt;

mod node;
mod decode;
mod persist;
mod config;

pub use node::NodeError;
pub use decode::DecodeError;
pub use persist::PersistError;
pub use config::ConfigError;

#[derive(Debug)]
pub enum IndexerError {
    ServiceStopped,
    Node(NodeError),
    Decode(DecodeError),
    Persist(PersistError),
    Config(ConfigError),
}

impl fmt::Display for IndexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexerError::ServiceStopped => write!(f, "service stopped"),
            IndexerError::Node(e) => write!(f, "node error: {}", e),
            IndexerError::Decode(e) => write!(f, "decode error: {}", e),
            IndexerError::Persist(e) => write!(f, "persist error: {}", e),
            IndexerError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for IndexerError {}

impl From<NodeError> for IndexerError {
    fn from(e: NodeError) -> Self {
        IndexerError::Node(e)
    }
}

impl From<DecodeError> for IndexerError {
    fn from(e: DecodeError) -> Self {
        IndexerError::Decode(e)
    }
}

impl From<PersistError> for IndexerError {
    fn from(e: PersistError) -> Self {
        IndexerError::Persist(e)
    }
}

impl From<ConfigError> for IndexerError {
    fn from(e: ConfigError) -> Self {
        IndexerError::Config(e)
    }
}
