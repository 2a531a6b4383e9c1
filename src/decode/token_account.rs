//! Token-account reconstructor. Builds the address -> TokenAccount map
//! from pre/post token balances and init-account instructions

use crate::constants::TOKEN_PROGRAM_ID;
use crate::domain::TokenAccount;
use crate::rpc::types::{ParsedInstruction, TransactionEntry};
use std::collections::HashMap;

const INITIALIZE_ACCOUNT: u8 = 1;
const INITIALIZE_ACCOUNT_2: u8 = 16;
const INITIALIZE_ACCOUNT_3: u8 = 18;

/// The reconstructed map, and whether any account observed a
/// pre != post balance change (used by the price estimator to decide whether to even look
/// at this transaction for stable-coin swap legs).
pub fn reconstruct_token_accounts(tx: &TransactionEntry) -> (HashMap<String, TokenAccount>, bool) {
    let mut accounts: HashMap<String, TokenAccount> = HashMap::new();
    let mut has_change = false;

    let account_keys = &tx.transaction.message.account_keys;
    let meta = match &tx.meta {
        Some(m) => m,
        None => return (accounts, false),
    };

    // Step 1: seed from pre-balances.
    for balance in &meta.pre_token_balances {
        let address = match account_keys.get(balance.account_index) {
            Some(a) => a.clone(),
            None => continue,
        };
        accounts.insert(
            address.clone(),
            TokenAccount {
                owner: balance.owner.clone().unwrap_or_default(),
                token_account_address: address,
                token_address: balance.mint.clone(),
                token_decimal: balance.ui_token_amount.decimals,
                pre_value: balance.ui_token_amount.amount_i64(),
                post_value: 0,
                closed: true,
                init: false,
            },
        );
    }

    // Step 2: merge post-balances.
    for balance in &meta.post_token_balances {
        let address = match account_keys.get(balance.account_index) {
            Some(a) => a.clone(),
            None => continue,
        };
        let post_value = balance.ui_token_amount.amount_i64();
        match accounts.get_mut(&address) {
            Some(entry) => {
                entry.post_value = post_value;
                entry.closed = false;
                if entry.pre_value != post_value {
                    has_change = true;
                }
            }
            None => {
                accounts.insert(
                    address.clone(),
                    TokenAccount {
                        owner: balance.owner.clone().unwrap_or_default(),
                        token_account_address: address,
                        token_address: balance.mint.clone(),
                        token_decimal: balance.ui_token_amount.decimals,
                        pre_value: 0,
                        post_value,
                        closed: false,
                        init: true,
                    },
                );
                has_change = true;
            }
        }
    }

    // Step 3: walk top-level and inner instructions for init-account variants.
    let mut all_instructions: Vec<&ParsedInstruction> =
        tx.transaction.message.instructions.iter().collect();
    for inner in &meta.inner_instructions {
        all_instructions.extend(inner.instructions.iter());
    }

    for ix in all_instructions {
        let program = match account_keys.get(ix.program_id_index) {
            Some(p) => p,
            None => continue,
        };
        if program != TOKEN_PROGRAM_ID {
            continue;
        }
        let data = match bs58::decode(&ix.data).into_vec() {
            Ok(d) => d,
            Err(_) => continue,
        };
        if data.is_empty() {
            continue;
        }
        let variant = data[0];
        let (token_account_idx, mint_idx, owner) = match variant {
            INITIALIZE_ACCOUNT if ix.accounts.len() >= 3 => {
                (ix.accounts[0], ix.accounts[1], account_keys.get(ix.accounts[2]).cloned())
            }
            INITIALIZE_ACCOUNT_2 | INITIALIZE_ACCOUNT_3 if ix.accounts.len() >= 2 && data.len() >= 33 => {
                let owner_bytes = &data[1..33];
                (ix.accounts[0], ix.accounts[1], Some(bs58::encode(owner_bytes).into_string()))
            }
            _ => continue,
        };
        let address = match account_keys.get(token_account_idx) {
            Some(a) => a.clone(),
            None => continue,
        };
        let mint = match account_keys.get(mint_idx) {
            Some(m) => m.clone(),
            None => continue,
        };
        if let Some(existing) = accounts.get(&address) {
            if existing.token_address == mint {
                continue;
            }
        }
        accounts.insert(
            address.clone(),
            TokenAccount {
                owner: owner.unwrap_or_default(),
                token_account_address: address,
                token_address: mint,
                token_decimal: 0,
                pre_value: 0,
                post_value: 0,
                closed: false,
                init: true,
            },
        );
    }

    // Step 4: build mint -> decimal map from non-zero entries; back-fill zeros.
    let mut decimals_by_mint: HashMap<String, u8> = HashMap::new();
    for acct in accounts.values() {
        if acct.token_decimal != 0 {
            decimals_by_mint
                .entry(acct.token_address.clone())
                .or_insert(acct.token_decimal);
        }
    }
    for acct in accounts.values_mut() {
        if acct.token_decimal == 0 {
            if let Some(d) = decimals_by_mint.get(&acct.token_address) {
                acct.token_decimal = *d;
            }
        }
    }

    (accounts, has_change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::types::{
        InnerInstructionSet, TokenBalance, TransactionData, TransactionMessage, TransactionMeta,
        UiTokenAmount,
    };

    fn empty_tx() -> TransactionEntry {
        TransactionEntry {
            transaction: TransactionData {
                signatures: vec!["sig".into()],
                message: TransactionMessage {
                    account_keys: vec!["acct0".into(), "mint0".into()],
                    instructions: vec![],
                },
            },
            meta: Some(TransactionMeta {
                err: None,
                pre_token_balances: vec![],
                post_token_balances: vec![],
                log_messages: vec![],
                inner_instructions: vec![],
            }),
        }
    }

    #[test]
    fn backfills_decimal_from_sibling_account() {
        let mut tx = empty_tx();
        tx.transaction.message.account_keys =
            vec!["acctA".into(), "acctB".into(), "mint0".into()];
        tx.meta.as_mut().unwrap().post_token_balances = vec![
            TokenBalance {
                account_index: 0,
                mint: "mint0".into(),
                owner: Some("ownerA".into()),
                ui_token_amount: UiTokenAmount { amount: "100".into(), decimals: 6 },
            },
            TokenBalance {
                account_index: 1,
                mint: "mint0".into(),
                owner: Some("ownerB".into()),
                ui_token_amount: UiTokenAmount { amount: "200".into(), decimals: 0 },
            },
        ];
        let (map, has_change) = reconstruct_token_accounts(&tx);
        assert!(has_change);
        assert_eq!(map.get("acctB").unwrap().token_decimal, 6);
    }

    #[test]
    fn inner_init_account_2_extracts_owner_from_data() {
        let mut tx = empty_tx();
        tx.transaction.message.account_keys =
            vec!["token_program".into(), "new_acct".into(), "mint0".into()];
        let mut owner_bytes = vec![7u8; 32];
        owner_bytes[0] = 9;
        let mut data = vec![INITIALIZE_ACCOUNT_2];
        data.extend(owner_bytes.iter());
        tx.meta.as_mut().unwrap().inner_instructions = vec![InnerInstructionSet {
            index: 0,
            instructions: vec![ParsedInstruction {
                program_id_index: 0,
                accounts: vec![1, 2],
                data: bs58::encode(&data).into_string(),
            }],
        }];
        tx.transaction.message.account_keys[0] = crate::constants::TOKEN_PROGRAM_ID.to_string();
        let (map, _) = reconstruct_token_accounts(&tx);
        let entry = map.get("new_acct").expect("inserted");
        assert!(entry.init);
        assert_eq!(entry.owner, bs58::encode(&owner_bytes).into_string());
    }
}
