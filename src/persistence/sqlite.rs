//! SQLite-backed repository implementation: `Database { conn:
//! Mutex<Connection> }`, one `CREATE TABLE IF NOT EXISTS` method per
//! entity.

use crate::domain::{Block, BlockStatus, Pair, PumpAmmInfo, PumpStatus, Token, TokenProgram, Trade, TradeType};
use crate::errors::PersistError;
use crate::persistence::repo::{
    BlockRepo, PairRepo, PumpAmmInfoRepo, SolTokenAccountRepo, TokenAccountSnapshot, TokenRepo,
    TradeRepo,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

pub struct Database {
    conn: Mutex<Connection>,
}

// SAFETY: all access goes through the internal `Mutex`; `rusqlite::Connection`
// itself is `!Sync` only because of its internal `Cell`s, which the mutex
// serializes.
unsafe impl Send for Database {}
unsafe impl Sync for Database {}

impl Database {
    pub fn open(path: &str) -> Result<Database, PersistError> {
        let conn = Connection::open(path)?;
        let db = Database { conn: Mutex::new(conn) };
        db.initialize_tables()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Database, PersistError> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn: Mutex::new(conn) };
        db.initialize_tables()?;
        Ok(db)
    }

    fn initialize_tables(&self) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        self.create_blocks_table(&conn)?;
        self.create_pairs_table(&conn)?;
        self.create_tokens_table(&conn)?;
        self.create_trades_table(&conn)?;
        self.create_pump_amm_info_table(&conn)?;
        self.create_token_accounts_table(&conn)?;
        Ok(())
    }

    fn create_blocks_table(&self, conn: &Connection) -> Result<(), PersistError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS blocks (
                slot INTEGER PRIMARY KEY,
                block_time INTEGER,
                block_height INTEGER,
                status TEXT NOT NULL,
                sol_price REAL NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn create_pairs_table(&self, conn: &Connection) -> Result<(), PersistError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pairs (
                chain_id INTEGER NOT NULL,
                address TEXT NOT NULL,
                name TEXT NOT NULL,
                base_token_addr TEXT NOT NULL,
                token_addr TEXT NOT NULL,
                base_token_symbol TEXT NOT NULL,
                token_symbol TEXT NOT NULL,
                base_token_decimal INTEGER NOT NULL,
                token_decimal INTEGER NOT NULL,
                current_base_token_amount REAL NOT NULL,
                current_token_amount REAL NOT NULL,
                init_base_token_amount REAL NOT NULL,
                init_token_amount REAL NOT NULL,
                fdv REAL NOT NULL,
                mkt_cap REAL NOT NULL,
                liquidity REAL NOT NULL,
                base_token_price REAL NOT NULL,
                token_price REAL NOT NULL,
                slot INTEGER NOT NULL,
                block_time INTEGER NOT NULL,
                latest_trade_time INTEGER NOT NULL,
                pump_point REAL NOT NULL,
                pump_status INTEGER NOT NULL,
                pump_launched INTEGER NOT NULL,
                pump_market_cap REAL NOT NULL,
                pump_virtual_base_token_reserves INTEGER NOT NULL,
                pump_virtual_token_reserves INTEGER NOT NULL,
                pump_pair_addr TEXT NOT NULL,
                pump_owner TEXT NOT NULL,
                PRIMARY KEY (chain_id, address)
            )",
            [],
        )?;
        Ok(())
    }

    fn create_tokens_table(&self, conn: &Connection) -> Result<(), PersistError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tokens (
                chain_id INTEGER NOT NULL,
                address TEXT NOT NULL,
                decimals INTEGER NOT NULL,
                total_supply REAL NOT NULL,
                program TEXT,
                symbol TEXT NOT NULL,
                name TEXT NOT NULL,
                icon TEXT NOT NULL,
                website TEXT NOT NULL,
                twitter TEXT NOT NULL,
                telegram TEXT NOT NULL,
                description TEXT NOT NULL,
                slot INTEGER NOT NULL,
                PRIMARY KEY (chain_id, address)
            )",
            [],
        )?;
        Ok(())
    }

    fn create_trades_table(&self, conn: &Connection) -> Result<(), PersistError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS trades (
                hash_id TEXT PRIMARY KEY,
                chain_id INTEGER NOT NULL,
                pair_addr TEXT NOT NULL,
                tx_hash TEXT NOT NULL,
                maker TEXT NOT NULL,
                trade_type TEXT NOT NULL,
                base_token_amount REAL NOT NULL,
                token_amount REAL NOT NULL,
                base_token_price_usd REAL NOT NULL,
                total_usd REAL NOT NULL,
                token_price_usd REAL NOT NULL,
                \"to\" TEXT NOT NULL,
                block_num INTEGER NOT NULL,
                block_time INTEGER NOT NULL,
                swap_name TEXT NOT NULL,
                mkt_cap REAL NOT NULL,
                fdv REAL NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn create_pump_amm_info_table(&self, conn: &Connection) -> Result<(), PersistError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pump_amm_info (
                pool_account TEXT PRIMARY KEY,
                global_config_account TEXT NOT NULL,
                base_mint TEXT NOT NULL,
                quote_mint TEXT NOT NULL,
                pool_base_token_account TEXT NOT NULL,
                pool_quote_token_account TEXT NOT NULL,
                protocol_fee_recipient TEXT NOT NULL,
                protocol_fee_recipient_token_account TEXT NOT NULL,
                base_token_program TEXT NOT NULL,
                quote_token_program TEXT NOT NULL,
                event_authority TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn create_token_accounts_table(&self, conn: &Connection) -> Result<(), PersistError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS token_accounts (
                chain_id INTEGER NOT NULL,
                owner TEXT NOT NULL,
                token_account_address TEXT NOT NULL,
                token_address TEXT NOT NULL,
                token_decimal INTEGER NOT NULL,
                pre_value INTEGER NOT NULL,
                post_value INTEGER NOT NULL,
                closed INTEGER NOT NULL,
                init INTEGER NOT NULL,
                slot INTEGER NOT NULL,
                PRIMARY KEY (chain_id, owner, token_account_address, slot)
            )",
            [],
        )?;
        Ok(())
    }
}

fn status_to_str(status: BlockStatus) -> &'static str {
    match status {
        BlockStatus::Processed => "processed",
        BlockStatus::Failed => "failed",
        BlockStatus::Skipped => "skipped",
    }
}

fn status_from_str(s: &str) -> BlockStatus {
    match s {
        "processed" => BlockStatus::Processed,
        "skipped" => BlockStatus::Skipped,
        _ => BlockStatus::Failed,
    }
}

#[async_trait]
impl BlockRepo for Database {
    async fn insert(&self, block: &Block) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT INTO blocks (slot, block_time, block_height, status, sol_price)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(slot) DO UPDATE SET
                block_time = excluded.block_time,
                block_height = excluded.block_height,
                status = excluded.status,
                sol_price = excluded.sol_price",
            params![
                block.slot as i64,
                block.block_time,
                block.block_height.map(|h| h as i64),
                status_to_str(block.status),
                block.sol_price,
            ],
        );
        result.map(|_| ()).map_err(PersistError::from)
    }

    async fn find_one_by_near_slot(&self, slot: u64) -> Result<Option<Block>, PersistError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT slot, block_time, block_height, status, sol_price FROM blocks
                 WHERE slot < ?1 AND status = 'processed' ORDER BY slot DESC LIMIT 1",
                params![slot as i64],
                |r| {
                    Ok(Block {
                        slot: r.get::<_, i64>(0)? as u64,
                        block_time: r.get(1)?,
                        block_height: r.get::<_, Option<i64>>(2)?.map(|h| h as u64),
                        status: status_from_str(&r.get::<_, String>(3)?),
                        sol_price: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    async fn find_first_failed(&self) -> Result<Option<Block>, PersistError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT slot, block_time, block_height, status, sol_price FROM blocks
                 WHERE status = 'failed' ORDER BY slot ASC LIMIT 1",
                [],
                |r| {
                    Ok(Block {
                        slot: r.get::<_, i64>(0)? as u64,
                        block_time: r.get(1)?,
                        block_height: r.get::<_, Option<i64>>(2)?.map(|h| h as u64),
                        status: status_from_str(&r.get::<_, String>(3)?),
                        sol_price: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    async fn find_processing_slots(&self, from_slot: u64, limit: usize) -> Result<Vec<u64>, PersistError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT slot FROM blocks WHERE status = 'failed' AND slot >= ?1 ORDER BY slot DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![from_slot as i64, limit as i64], |r| {
                Ok(r.get::<_, i64>(0)? as u64)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn program_to_str(program: Option<TokenProgram>) -> Option<&'static str> {
    program.map(|p| match p {
        TokenProgram::TokenProgram => "token",
        TokenProgram::Token2022Program => "token2022",
    })
}

fn program_from_str(s: Option<String>) -> Option<TokenProgram> {
    match s.as_deref() {
        Some("token") => Some(TokenProgram::TokenProgram),
        Some("token2022") => Some(TokenProgram::Token2022Program),
        _ => None,
    }
}

#[async_trait]
impl TokenRepo for Database {
    async fn find_one_by(&self, chain_id: u64, address: &str) -> Result<Option<Token>, PersistError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT chain_id, address, decimals, total_supply, program, symbol, name, icon,
                        website, twitter, telegram, description, slot
                 FROM tokens WHERE chain_id = ?1 AND address = ?2",
                params![chain_id as i64, address],
                |r| {
                    Ok(Token {
                        chain_id: r.get::<_, i64>(0)? as u64,
                        address: r.get(1)?,
                        decimals: r.get(2)?,
                        total_supply: r.get(3)?,
                        program: program_from_str(r.get(4)?),
                        symbol: r.get(5)?,
                        name: r.get(6)?,
                        icon: r.get(7)?,
                        website: r.get(8)?,
                        twitter: r.get(9)?,
                        telegram: r.get(10)?,
                        description: r.get(11)?,
                        slot: r.get::<_, i64>(12)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    async fn insert(&self, token: &Token) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO tokens (chain_id, address, decimals, total_supply, program, symbol,
                name, icon, website, twitter, telegram, description, slot)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            params![
                token.chain_id as i64,
                token.address,
                token.decimals,
                token.total_supply,
                program_to_str(token.program),
                token.symbol,
                token.name,
                token.icon,
                token.website,
                token.twitter,
                token.telegram,
                token.description,
                token.slot as i64,
            ],
        )?;
        Ok(())
    }

    async fn update(&self, token: &Token) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE tokens SET decimals=?3, total_supply=?4, program=?5, symbol=?6, name=?7,
                icon=?8, website=?9, twitter=?10, telegram=?11, description=?12, slot=?13
             WHERE chain_id=?1 AND address=?2",
            params![
                token.chain_id as i64,
                token.address,
                token.decimals,
                token.total_supply,
                program_to_str(token.program),
                token.symbol,
                token.name,
                token.icon,
                token.website,
                token.twitter,
                token.telegram,
                token.description,
                token.slot as i64,
            ],
        )?;
        Ok(())
    }
}

#[async_trait]
impl PairRepo for Database {
    async fn find_one_by(&self, chain_id: u64, address: &str) -> Result<Option<Pair>, PersistError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT chain_id, address, name, base_token_addr, token_addr, base_token_symbol,
                        token_symbol, base_token_decimal, token_decimal, current_base_token_amount,
                        current_token_amount, init_base_token_amount, init_token_amount, fdv,
                        mkt_cap, liquidity, base_token_price, token_price, slot, block_time,
                        latest_trade_time, pump_point, pump_status, pump_launched, pump_market_cap,
                        pump_virtual_base_token_reserves, pump_virtual_token_reserves,
                        pump_pair_addr, pump_owner
                 FROM pairs WHERE chain_id = ?1 AND address = ?2",
                params![chain_id as i64, address],
                row_to_pair,
            )
            .optional()?;
        Ok(row)
    }

    async fn insert(&self, pair: &Pair) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        exec_pair_upsert(&conn, pair, true)
    }

    async fn update(&self, pair: &Pair) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        exec_pair_upsert(&conn, pair, false)
    }
}

fn row_to_pair(r: &rusqlite::Row) -> rusqlite::Result<Pair> {
    Ok(Pair {
        chain_id: r.get::<_, i64>(0)? as u64,
        address: r.get(1)?,
        name: r.get(2)?,
        base_token_addr: r.get(3)?,
        token_addr: r.get(4)?,
        base_token_symbol: r.get(5)?,
        token_symbol: r.get(6)?,
        base_token_decimal: r.get(7)?,
        token_decimal: r.get(8)?,
        current_base_token_amount: r.get(9)?,
        current_token_amount: r.get(10)?,
        init_base_token_amount: r.get(11)?,
        init_token_amount: r.get(12)?,
        fdv: r.get(13)?,
        mkt_cap: r.get(14)?,
        liquidity: r.get(15)?,
        base_token_price: r.get(16)?,
        token_price: r.get(17)?,
        slot: r.get::<_, i64>(18)? as u64,
        block_time: r.get(19)?,
        latest_trade_time: r.get(20)?,
        pump_point: r.get(21)?,
        pump_status: PumpStatus::from_i64(r.get(22)?).unwrap_or(PumpStatus::NotStart),
        pump_launched: r.get::<_, i64>(23)? != 0,
        pump_market_cap: r.get(24)?,
        pump_virtual_base_token_reserves: r.get::<_, i64>(25)? as u64,
        pump_virtual_token_reserves: r.get::<_, i64>(26)? as u64,
        pump_pair_addr: r.get(27)?,
        pump_owner: r.get(28)?,
    })
}

fn exec_pair_upsert(conn: &Connection, pair: &Pair, insert: bool) -> Result<(), PersistError> {
    let sql = if insert {
        "INSERT INTO pairs (chain_id, address, name, base_token_addr, token_addr,
            base_token_symbol, token_symbol, base_token_decimal, token_decimal,
            current_base_token_amount, current_token_amount, init_base_token_amount,
            init_token_amount, fdv, mkt_cap, liquidity, base_token_price, token_price,
            slot, block_time, latest_trade_time, pump_point, pump_status, pump_launched,
            pump_market_cap, pump_virtual_base_token_reserves, pump_virtual_token_reserves,
            pump_pair_addr, pump_owner)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,
            ?22,?23,?24,?25,?26,?27,?28,?29)"
    } else {
        "UPDATE pairs SET name=?3, base_token_addr=?4, token_addr=?5, base_token_symbol=?6,
            token_symbol=?7, base_token_decimal=?8, token_decimal=?9,
            current_base_token_amount=?10, current_token_amount=?11,
            init_base_token_amount=?12, init_token_amount=?13, fdv=?14, mkt_cap=?15,
            liquidity=?16, base_token_price=?17, token_price=?18, slot=?19, block_time=?20,
            latest_trade_time=?21, pump_point=?22, pump_status=?23, pump_launched=?24,
            pump_market_cap=?25, pump_virtual_base_token_reserves=?26,
            pump_virtual_token_reserves=?27, pump_pair_addr=?28, pump_owner=?29
         WHERE chain_id=?1 AND address=?2"
    };
    conn.execute(
        sql,
        params![
            pair.chain_id as i64,
            pair.address,
            pair.name,
            pair.base_token_addr,
            pair.token_addr,
            pair.base_token_symbol,
            pair.token_symbol,
            pair.base_token_decimal,
            pair.token_decimal,
            pair.current_base_token_amount,
            pair.current_token_amount,
            pair.init_base_token_amount,
            pair.init_token_amount,
            pair.fdv,
            pair.mkt_cap,
            pair.liquidity,
            pair.base_token_price,
            pair.token_price,
            pair.slot as i64,
            pair.block_time,
            pair.latest_trade_time,
            pair.pump_point,
            pair.pump_status.as_i64(),
            pair.pump_launched as i64,
            pair.pump_market_cap,
            pair.pump_virtual_base_token_reserves as i64,
            pair.pump_virtual_token_reserves as i64,
            pair.pump_pair_addr,
            pair.pump_owner,
        ],
    )?;
    Ok(())
}

fn trade_type_to_str(t: &TradeType) -> String {
    match t {
        TradeType::Buy => "buy".to_string(),
        TradeType::Sell => "sell".to_string(),
        TradeType::TokenMint => "mint".to_string(),
        TradeType::TokenBurn => "burn".to_string(),
        TradeType::Other(label) => format!("other:{}", label),
    }
}

#[async_trait]
impl TradeRepo for Database {
    async fn batch_insert(&self, trades: &[Trade]) -> Result<(), PersistError> {
        if trades.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO trades (hash_id, chain_id, pair_addr, tx_hash, maker,
                    trade_type, base_token_amount, token_amount, base_token_price_usd,
                    total_usd, token_price_usd, \"to\", block_num, block_time, swap_name,
                    mkt_cap, fdv)
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17)",
            )?;
            for trade in trades {
                stmt.execute(params![
                    trade.hash_id,
                    trade.chain_id as i64,
                    trade.pair_addr,
                    trade.tx_hash,
                    trade.maker,
                    trade_type_to_str(&trade.trade_type),
                    trade.base_token_amount,
                    trade.token_amount,
                    trade.base_token_price_usd,
                    trade.total_usd,
                    trade.token_price_usd,
                    trade.to,
                    trade.block_num as i64,
                    trade.block_time,
                    trade.swap_name,
                    trade.mkt_cap,
                    trade.fdv,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl PumpAmmInfoRepo for Database {
    async fn find_one_by_pool(&self, pool: &str) -> Result<Option<PumpAmmInfo>, PersistError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT pool_account, global_config_account, base_mint, quote_mint,
                        pool_base_token_account, pool_quote_token_account,
                        protocol_fee_recipient, protocol_fee_recipient_token_account,
                        base_token_program, quote_token_program, event_authority
                 FROM pump_amm_info WHERE pool_account = ?1",
                params![pool],
                |r| {
                    Ok(PumpAmmInfo {
                        pool_account: r.get(0)?,
                        global_config_account: r.get(1)?,
                        base_mint: r.get(2)?,
                        quote_mint: r.get(3)?,
                        pool_base_token_account: r.get(4)?,
                        pool_quote_token_account: r.get(5)?,
                        protocol_fee_recipient: r.get(6)?,
                        protocol_fee_recipient_token_account: r.get(7)?,
                        base_token_program: r.get(8)?,
                        quote_token_program: r.get(9)?,
                        event_authority: r.get(10)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    async fn insert(&self, info: &PumpAmmInfo) -> Result<(), PersistError> {
        let conn = self.conn.lock();
        // Duplicate-key absorbed into success
        let result = conn.execute(
            "INSERT INTO pump_amm_info (pool_account, global_config_account, base_mint,
                quote_mint, pool_base_token_account, pool_quote_token_account,
                protocol_fee_recipient, protocol_fee_recipient_token_account,
                base_token_program, quote_token_program, event_authority)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
            params![
                info.pool_account,
                info.global_config_account,
                info.base_mint,
                info.quote_mint,
                info.pool_base_token_account,
                info.pool_quote_token_account,
                info.protocol_fee_recipient,
                info.protocol_fee_recipient_token_account,
                info.base_token_program,
                info.quote_token_program,
                info.event_authority,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(e) => match PersistError::from(e) {
                PersistError::DuplicateKey => Ok(()),
                other => Err(other),
            },
        }
    }
}

#[async_trait]
impl SolTokenAccountRepo for Database {
    async fn batch_insert(&self, snapshots: &[TokenAccountSnapshot]) -> Result<(), PersistError> {
        if snapshots.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO token_accounts (chain_id, owner, token_account_address,
                    token_address, token_decimal, pre_value, post_value, closed, init, slot)
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
            )?;
            for snap in snapshots {
                stmt.execute(params![
                    snap.chain_id as i64,
                    snap.owner,
                    snap.token_account_address,
                    snap.token_address,
                    snap.token_decimal,
                    snap.pre_value,
                    snap.post_value,
                    snap.closed as i64,
                    snap.init as i64,
                    snap.slot as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn block_insert_then_find_processing_slots() {
        let db = Database::open_in_memory().unwrap();
        let mut block = Block::new(1000);
        block.status = BlockStatus::Failed;
        BlockRepo::insert(&db, &block).await.unwrap();

        let slots = db.find_processing_slots(900, 50).await.unwrap();
        assert_eq!(slots, vec![1000]);
    }

    #[tokio::test]
    async fn pump_amm_info_duplicate_insert_is_a_no_op() {
        let db = Database::open_in_memory().unwrap();
        let info = PumpAmmInfo {
            pool_account: "pool1".into(),
            global_config_account: "gc".into(),
            base_mint: "base".into(),
            quote_mint: "quote".into(),
            pool_base_token_account: "pb".into(),
            pool_quote_token_account: "pq".into(),
            protocol_fee_recipient: "fee".into(),
            protocol_fee_recipient_token_account: "feeacct".into(),
            base_token_program: "tp".into(),
            quote_token_program: "tp".into(),
            event_authority: "ea".into(),
        };
        PumpAmmInfoRepo::insert(&db, &info).await.unwrap();
        PumpAmmInfoRepo::insert(&db, &info).await.unwrap();
        let found = db.find_one_by_pool("pool1").await.unwrap();
        assert!(found.is_some());
    }
}
