//! Token program detection and offchain metadata enrichment.
//! Grounded on `original_source/rc_dex/pkg/sol/sol.go`
//! (`GetTokenProgram`, `GetTokenInfo`, `GetToken2022Info`).

use crate::constants::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::domain::TokenProgram;
use crate::errors::NodeError;
use crate::rpc::NodeClientPool;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use solana_program::pubkey::Pubkey;
use std::str::FromStr;

/// Metaplex Token Metadata program, fixed across all mints.
const METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// Fetched token metadata, as much of it as was resolvable.
#[derive(Debug, Clone, Default)]
pub struct TokenMetadata {
    pub symbol: String,
    pub name: String,
    pub icon: String,
    pub website: String,
    pub twitter: String,
    pub telegram: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct OffchainMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    twitter: String,
    #[serde(default)]
    telegram: String,
}

/// Classifies a mint's owner program, mirroring `GetTokenProgram`: the
/// owner must be one of the two known SPL token programs.
pub async fn detect_token_program(
    pool: &NodeClientPool,
    mint: &str,
) -> Result<TokenProgram, NodeError> {
    let info = pool.get_account_info(mint).await?;
    let owner = info
        .get("value")
        .and_then(|v| v.get("owner"))
        .and_then(|o| o.as_str())
        .ok_or_else(|| NodeError::Fatal("missing owner in getAccountInfo response".into()))?;
    match owner {
        TOKEN_PROGRAM_ID => Ok(TokenProgram::TokenProgram),
        TOKEN_2022_PROGRAM_ID => Ok(TokenProgram::Token2022Program),
        other => Err(NodeError::Fatal(format!("unrecognized token program owner: {}", other))),
    }
}

/// Resolves a metadata URI to JSON, retrying through a public IPFS gateway
/// if the original URI is an `ipfs://` link that the direct fetch can't
/// reach (mirrors `isURLAccessible` / `replaceWithPublicGateway` in the
/// original).
pub async fn fetch_offchain_metadata(
    http: &reqwest::Client,
    uri: &str,
) -> Option<TokenMetadata> {
    let candidates = [uri.to_string(), to_public_gateway(uri)];
    for candidate in candidates {
        if let Ok(resp) = http.get(&candidate).send().await {
            if let Ok(parsed) = resp.json::<OffchainMetadata>().await {
                return Some(TokenMetadata {
                    symbol: parsed.symbol,
                    name: parsed.name,
                    icon: parsed.image,
                    website: parsed.website,
                    twitter: parsed.twitter,
                    telegram: parsed.telegram,
                    description: parsed.description,
                });
            }
        }
    }
    None
}

/// Derives the Metaplex metadata PDA for a mint: `["metadata", metadata
/// program id, mint]` under the metadata program itself.
fn metadata_pda(mint: &str) -> Option<String> {
    let program_id = Pubkey::from_str(METADATA_PROGRAM_ID).ok()?;
    let mint_key = Pubkey::from_str(mint).ok()?;
    let (pda, _bump) = Pubkey::find_program_address(
        &[b"metadata", program_id.as_ref(), mint_key.as_ref()],
        &program_id,
    );
    Some(pda.to_string())
}

/// Reads a Borsh length-prefixed UTF-8 string (`u32` LE length + bytes)
/// out of `data` at `*offset`, advancing it past the field.
fn read_borsh_string(data: &[u8], offset: &mut usize) -> Option<String> {
    let len = u32::from_le_bytes(data.get(*offset..*offset + 4)?.try_into().ok()?) as usize;
    *offset += 4;
    let bytes = data.get(*offset..*offset + len)?;
    *offset += len;
    Some(String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string())
}

/// Pulls `uri` out of a Metaplex `Metadata` account: 1-byte key + 32-byte
/// update authority + 32-byte mint, then `name`/`symbol`/`uri` as
/// length-prefixed strings, in that order.
fn parse_metadata_uri(data: &[u8]) -> Option<String> {
    let mut offset = 1 + 32 + 32;
    let _name = read_borsh_string(data, &mut offset)?;
    let _symbol = read_borsh_string(data, &mut offset)?;
    let uri = read_borsh_string(data, &mut offset)?;
    if uri.is_empty() {
        None
    } else {
        Some(uri)
    }
}

/// Fetches and decodes the Metaplex metadata account's `uri` field for a
/// mint, best-effort.
async fn fetch_metaplex_uri(pool: &NodeClientPool, mint: &str) -> Option<String> {
    let pda = metadata_pda(mint)?;
    let info = pool.get_account_info(&pda).await.ok()?;
    let encoded = info.get("value")?.get("data")?.as_array()?.first()?.as_str()?;
    let bytes = BASE64.decode(encoded).ok()?;
    parse_metadata_uri(&bytes)
}

/// Full SaveToken enrichment (C2b/C3b): token-program classification plus
/// offchain metadata resolved through the Metaplex metadata account.
/// Every step is best-effort — a missing account, unparsable data, or
/// unreachable gateway yields `None` rather than failing the caller.
pub async fn enrich_token(
    pool: &NodeClientPool,
    http: &reqwest::Client,
    mint: &str,
) -> (Option<TokenProgram>, Option<TokenMetadata>) {
    let program = detect_token_program(pool, mint).await.ok();
    let metadata = match fetch_metaplex_uri(pool, mint).await {
        Some(uri) => fetch_offchain_metadata(http, &uri).await,
        None => None,
    };
    (program, metadata)
}

fn to_public_gateway(uri: &str) -> String {
    if let Some(cid) = uri.strip_prefix("ipfs://") {
        format!("https://ipfs.io/ipfs/{}", cid)
    } else {
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uri_out_of_metaplex_layout() {
        let mut data = vec![4u8]; // key
        data.extend(vec![0u8; 32]); // update authority
        data.extend(vec![0u8; 32]); // mint
        data.extend(5u32.to_le_bytes());
        data.extend(b"Token");
        data.extend(3u32.to_le_bytes());
        data.extend(b"TKN");
        data.extend(19u32.to_le_bytes());
        data.extend(b"https://example.com");
        assert_eq!(parse_metadata_uri(&data).as_deref(), Some("https://example.com"));
    }

    #[test]
    fn rewrites_ipfs_scheme_to_public_gateway() {
        assert_eq!(
            to_public_gateway("ipfs://bafybeituffy"),
            "https://ipfs.io/ipfs/bafybeituffy"
        );
    }

    #[test]
    fn leaves_http_urls_untouched() {
        assert_eq!(to_public_gateway("https://example.com/x.json"), "https://example.com/x.json");
    }
}
