//! Transaction decoding: token-account reconstruction, SOL price
//! estimation, instruction/event dispatch, pump curve tracking.

mod dispatch;
mod pump_curve;
mod pumpfun_amm;
mod sol_price;
mod token_account;

pub use dispatch::{decode_transaction, init_virtual_base_reserves, DecodedTrade};
pub use pump_curve::pump_point;
pub use pumpfun_amm::{parse_pump_amm_events, PumpAmmEvent};
pub use sol_price::{collect_block_prices, estimate_sol_price};
pub use token_account::reconstruct_token_accounts;
