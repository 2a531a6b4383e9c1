use std::fmt;

/// Errors returned by a node client call
#[derive(Debug, Clone)]
pub enum NodeError {
    /// `"Block not available for slot"` / `"limit"` — retry up to 10 times, 1s apart.
    NotAvailable(String),
    RateLimited(String),
    /// The node reported the slot was skipped; not retried, not a failure.
    Skipped,
    /// Anything else — the block is marked Failed and handed to recovery.
    Fatal(String),
}

impl NodeError {
    /// Classifies a raw JSON-RPC error message the way
    /// `original_source/rc_dex/consumer/internal/logic/block/price.go` does.
    pub fn classify(message: &str) -> NodeError {
        if message.contains("was skipped") {
            NodeError::Skipped
        } else if message.contains("Block not available for slot") {
            NodeError::NotAvailable(message.to_string())
        } else if message.contains("limit") {
            NodeError::RateLimited(message.to_string())
        } else {
            NodeError::Fatal(message.to_string())
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, NodeError::NotAvailable(_) | NodeError::RateLimited(_))
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::NotAvailable(m) => write!(f, "block not available: {}", m),
            NodeError::RateLimited(m) => write!(f, "rate limited: {}", m),
            NodeError::Skipped => write!(f, "slot was skipped"),
            NodeError::Fatal(m) => write!(f, "fatal node error: {}", m),
        }
    }
}

impl std::error::Error for NodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_substrings() {
        assert!(matches!(
            NodeError::classify("Block not available for slot 5"),
            NodeError::NotAvailable(_)
        ));
        assert!(matches!(
            NodeError::classify("rate limit exceeded"),
            NodeError::RateLimited(_)
        ));
        assert!(matches!(
            NodeError::classify("slot 5 was skipped"),
            NodeError::Skipped
        ));
        assert!(matches!(NodeError::classify("boom"), NodeError::Fatal(_)));
    }

    #[test]
    fn only_transient_kinds_are_retryable() {
        assert!(NodeError::classify("limit").is_retryable());
        assert!(!NodeError::classify("boom").is_retryable());
        assert!(!NodeError::Skipped.is_retryable());
    }
}
