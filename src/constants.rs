//! Chain/program/token constants grounded in
//! `original_source/rc_dex/consumer/internal/logic/block/constants.go` and
//! `pkg/util/weth.go`.

/// The indexer is single-chain (Solana mainnet); entities still carry a
/// `chain_id` column for parity with the original's multi-chain schema.
/// Matches `pkg/util/weth.go`'s `SolanaWSolToken.ChainId`.
pub const SOLANA_CHAIN_ID: u64 = 100_000;

pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const WSOL_DECIMALS: u8 = 9;

pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
pub const STABLE_DECIMALS: u8 = 6;

pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

pub const PUMP_FUN_PROGRAM_ID: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";
pub const PUMP_FUN_AMM_PROGRAM_ID: &str = "pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA";

/// Stable-DEX programs recognized by the SOL price estimator
pub const ORCA_WHIRLPOOL_PROGRAM_ID: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";
pub const RAYDIUM_CLMM_PROGRAM_ID: &str = "CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK";
pub const METEORA_DLMM_PROGRAM_ID: &str = "LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo";
pub const PHOENIX_PROGRAM_ID: &str = "PhoeNiXZ8ByJGLkxNfZRnkUfjvmuYqLR89jjFHGqdXY";

pub const STABLE_DEX_PROGRAM_IDS: &[&str] = &[
    ORCA_WHIRLPOOL_PROGRAM_ID,
    RAYDIUM_CLMM_PROGRAM_ID,
    METEORA_DLMM_PROGRAM_ID,
    PHOENIX_PROGRAM_ID,
];

/// Pump bonding curve constant
pub const INIT_PUMP_TOKEN_AMOUNT: u64 = 873_000_000;
pub const INIT_PUMP_VIRTUAL_BASE_RESERVES: u64 = 1_073_000_191;

pub const SWAP_NAME_PUMP_FUN: &str = "PumpFun";
pub const SWAP_NAME_PUMP_SWAP: &str = "PumpSwap";

/// PumpFun-AMM instruction discriminators
pub const PUMP_AMM_BUY_DISCRIMINATOR: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];
pub const PUMP_AMM_SELL_DISCRIMINATOR: [u8; 8] = [51, 230, 133, 164, 1, 127, 131, 173];

/// PumpFun-AMM event log discriminators. Concrete byte values are
/// implementation-defined on-chain constants; these follow the program's
/// published IDL event ordering.
pub const PUMP_AMM_BUY_EVENT_DISCRIMINATOR: [u8; 8] = [103, 244, 82, 31, 44, 245, 119, 119];
pub const PUMP_AMM_SELL_EVENT_DISCRIMINATOR: [u8; 8] = [62, 47, 55, 10, 165, 3, 220, 42];
pub const PUMP_AMM_CREATE_POOL_EVENT_DISCRIMINATOR: [u8; 8] = [177, 49, 12, 210, 160, 118, 167, 116];

pub const PROGRAM_DATA_LOG_PREFIX: &str = "Program data: ";
