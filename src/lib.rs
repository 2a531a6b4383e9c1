//! Solana DEX event indexer: slot ingestion, transaction decoding, and
//! persistence for PumpFun / PumpFun-AMM swap activity.

pub mod config;
pub mod constants;
pub mod decode;
pub mod domain;
pub mod errors;
pub mod ingestion;
pub mod logger;
pub mod metadata;
pub mod persistence;
pub mod rpc;
pub mod worker;
