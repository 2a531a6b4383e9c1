//! Node client pool and JSON-RPC/WebSocket wire types.

mod pool;
mod types;
mod ws;

pub use pool::NodeClientPool;
pub use types::{
    BlockResponse, InnerInstructionSet, ParsedInstruction, TokenBalance, TransactionEntry,
    TransactionMeta, UiTokenAmount,
};
pub use ws::{SlotNotification, SlotWsClient};
