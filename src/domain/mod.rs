//! Core entities Field shapes cross-checked against
//! `original_source/rc_dex/pkg/types/type.go` and
//! `consumer/internal/logic/block/types.go`.

mod block;
mod pair;
mod pump;
mod pump_amm_info;
mod token;
mod token_account;
mod trade;

pub use block::{Block, BlockStatus};
pub use pair::Pair;
pub use pump::PumpStatus;
pub use pump_amm_info::PumpAmmInfo;
pub use token::{Token, TokenProgram};
pub use token_account::{ui, TokenAccount};
pub use trade::{Trade, TradeType};
