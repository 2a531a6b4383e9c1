use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Processed,
    Failed,
    Skipped,
}

/// Identity: `slot`. `status` is set exactly once per slot; `sol_price >= 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub slot: u64,
    pub block_time: Option<i64>,
    pub block_height: Option<u64>,
    pub status: BlockStatus,
    pub sol_price: f64,
}

impl Block {
    pub fn new(slot: u64) -> Block {
        Block {
            slot,
            block_time: None,
            block_height: None,
            status: BlockStatus::Failed,
            sol_price: 0.0,
        }
    }
}
