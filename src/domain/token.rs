use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenProgram {
    TokenProgram,
    Token2022Program,
}

/// Identity: `(chain_id, address)`. Fields are filled lazily: missing
/// fields are fetched on demand; a non-empty value is never overwritten
/// with empty. `total_supply` is refreshed on observed mint/burn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: String,
    pub decimals: u8,
    pub total_supply: f64,
    pub program: Option<TokenProgram>,
    pub symbol: String,
    pub name: String,
    pub icon: String,
    pub website: String,
    pub twitter: String,
    pub telegram: String,
    pub description: String,
    pub slot: u64,
}

impl Token {
    pub fn new(chain_id: u64, address: String, decimals: u8, slot: u64) -> Token {
        Token {
            chain_id,
            address,
            decimals,
            total_supply: 0.0,
            program: None,
            symbol: String::new(),
            name: String::new(),
            icon: String::new(),
            website: String::new(),
            twitter: String::new(),
            telegram: String::new(),
            description: String::new(),
            slot,
        }
    }

    /// Merges `other` into `self` in place, only filling currently-empty
    /// fields, following SaveToken's "never overwrite non-empty with
    /// empty" invariant Returns whether anything changed.
    pub fn merge_fill(&mut self, other: &Token) -> bool {
        let mut changed = false;
        if self.total_supply == 0.0 && other.total_supply != 0.0 {
            self.total_supply = other.total_supply;
            changed = true;
        }
        if self.program.is_none() && other.program.is_some() {
            self.program = other.program;
            changed = true;
        }
        macro_rules! fill_str {
            ($field:ident) => {
                if self.$field.is_empty() && !other.$field.is_empty() {
                    self.$field = other.$field.clone();
                    changed = true;
                }
            };
        }
        fill_str!(symbol);
        fill_str!(name);
        fill_str!(icon);
        fill_str!(website);
        fill_str!(twitter);
        fill_str!(telegram);
        fill_str!(description);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_fill_only_fills_empty_fields() {
        let mut existing = Token::new(1, "mint".into(), 6, 10);
        existing.symbol = "FOO".into();
        let mut incoming = Token::new(1, "mint".into(), 6, 10);
        incoming.symbol = "BAR".into();
        incoming.name = "Foo Coin".into();

        let changed = existing.merge_fill(&incoming);
        assert!(changed);
        assert_eq!(existing.symbol, "FOO"); // not overwritten
        assert_eq!(existing.name, "Foo Coin"); // filled
    }

    #[test]
    fn merge_fill_is_noop_when_nothing_new() {
        let mut existing = Token::new(1, "mint".into(), 6, 10);
        existing.symbol = "FOO".into();
        let incoming = Token::new(1, "mint".into(), 6, 10);
        assert!(!existing.merge_fill(&incoming));
    }
}
