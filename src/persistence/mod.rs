//! Persistence orchestrator and repository contracts

pub mod orchestrator;
pub mod repo;
pub mod sqlite;

pub use orchestrator::Orchestrator;
pub use repo::{
    BlockRepo, PairRepo, PumpAmmInfoRepo, SolTokenAccountRepo, TokenAccountSnapshot, TokenRepo,
    TradeRepo,
};
pub use sqlite::Database;
