//! `getBlock` wire shapes: `TransactionData`, `TransactionMeta`,
//! `TokenBalance`, `UiTokenAmount` — the raw JSON-RPC shape, not
//! `solana-client`'s typed `EncodedConfirmedBlock`, because the
//! event-log parser needs the untouched `logMessages` array and
//! account-key list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockResponse {
    #[serde(rename = "blockTime")]
    pub block_time: Option<i64>,
    #[serde(rename = "blockHeight")]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub transactions: Vec<TransactionEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionEntry {
    pub transaction: TransactionData,
    pub meta: Option<TransactionMeta>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionData {
    pub signatures: Vec<String>,
    pub message: TransactionMessage,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionMessage {
    #[serde(rename = "accountKeys")]
    pub account_keys: Vec<String>,
    pub instructions: Vec<ParsedInstruction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParsedInstruction {
    #[serde(rename = "programIdIndex")]
    pub program_id_index: usize,
    pub accounts: Vec<usize>,
    /// base58-encoded raw instruction data.
    pub data: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionMeta {
    pub err: Option<serde_json::Value>,
    #[serde(rename = "preTokenBalances", default)]
    pub pre_token_balances: Vec<TokenBalance>,
    #[serde(rename = "postTokenBalances", default)]
    pub post_token_balances: Vec<TokenBalance>,
    #[serde(rename = "logMessages", default)]
    pub log_messages: Vec<String>,
    #[serde(rename = "innerInstructions", default)]
    pub inner_instructions: Vec<InnerInstructionSet>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InnerInstructionSet {
    pub index: usize,
    pub instructions: Vec<ParsedInstruction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenBalance {
    #[serde(rename = "accountIndex")]
    pub account_index: usize,
    pub mint: String,
    pub owner: Option<String>,
    #[serde(rename = "uiTokenAmount")]
    pub ui_token_amount: UiTokenAmount,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiTokenAmount {
    pub amount: String,
    pub decimals: u8,
}

impl UiTokenAmount {
    pub fn amount_i64(&self) -> i64 {
        self.amount.parse().unwrap_or(0)
    }
}
