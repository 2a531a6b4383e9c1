//! Repository contracts, the seam between the orchestrator and
//! whatever relational store backs it. Grounded in shape on the Go
//! `rc_dex/model/solmodel/*Model` interfaces (`customXModel` wrapping
//! `defaultXModel`), translated to Rust traits.

use crate::domain::{Block, Pair, PumpAmmInfo, Token, Trade};
use crate::errors::PersistError;
use async_trait::async_trait;

/// A token-account snapshot row
#[derive(Debug, Clone)]
pub struct TokenAccountSnapshot {
    pub chain_id: u64,
    pub owner: String,
    pub token_account_address: String,
    pub token_address: String,
    pub token_decimal: u8,
    pub pre_value: i64,
    pub post_value: i64,
    pub closed: bool,
    pub init: bool,
    pub slot: u64,
}

#[async_trait]
pub trait BlockRepo: Send + Sync {
    async fn insert(&self, block: &Block) -> Result<(), PersistError>;
    async fn find_one_by_near_slot(&self, slot: u64) -> Result<Option<Block>, PersistError>;
    async fn find_first_failed(&self) -> Result<Option<Block>, PersistError>;
    async fn find_processing_slots(&self, from_slot: u64, limit: usize) -> Result<Vec<u64>, PersistError>;
}

#[async_trait]
pub trait PairRepo: Send + Sync {
    async fn find_one_by(&self, chain_id: u64, address: &str) -> Result<Option<Pair>, PersistError>;
    async fn insert(&self, pair: &Pair) -> Result<(), PersistError>;
    async fn update(&self, pair: &Pair) -> Result<(), PersistError>;
}

#[async_trait]
pub trait TokenRepo: Send + Sync {
    async fn find_one_by(&self, chain_id: u64, address: &str) -> Result<Option<Token>, PersistError>;
    async fn insert(&self, token: &Token) -> Result<(), PersistError>;
    async fn update(&self, token: &Token) -> Result<(), PersistError>;
}

#[async_trait]
pub trait TradeRepo: Send + Sync {
    async fn batch_insert(&self, trades: &[Trade]) -> Result<(), PersistError>;
}

#[async_trait]
pub trait PumpAmmInfoRepo: Send + Sync {
    async fn find_one_by_pool(&self, pool: &str) -> Result<Option<PumpAmmInfo>, PersistError>;
    /// Duplicate-key is non-fatal: callers treat it as "already there".
    async fn insert(&self, info: &PumpAmmInfo) -> Result<(), PersistError>;
}

#[async_trait]
pub trait SolTokenAccountRepo: Send + Sync {
    async fn batch_insert(&self, snapshots: &[TokenAccountSnapshot]) -> Result<(), PersistError>;
}
