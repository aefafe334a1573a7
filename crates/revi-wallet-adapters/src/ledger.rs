//! Async Solana JSON-RPC client for balance display.
//!
//! Exactly two queries per wallet: `getBalance` and
//! `getTokenAccountsByOwner` with the SPL token program filter. No retry,
//! no caching; every wallet change triggers one fresh fetch.

use serde_json::Value;

use revi_wallet_core::{assemble_balance, stale_balance, Balance, PortError, RawTokenAccount};

use crate::AppConfig;

pub const SPL_TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

#[derive(Debug, Clone)]
pub struct SolanaRpcClient {
    endpoint: String,
    client: reqwest::Client,
}

impl SolanaRpcClient {
    pub fn new(config: &AppConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.rpc_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(
                config.rpc_connect_timeout_ms,
            ))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build rpc client: {e}")))?;
        Ok(Self {
            endpoint: config.rpc_endpoint(),
            client,
        })
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("rpc request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Transport(format!("rpc json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!("rpc status {status}: {body}")));
        }
        if let Some(err) = body.get("error") {
            return Err(PortError::Transport(format!("rpc returned error: {err}")));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("rpc response missing result".to_owned()))
    }

    /// Native balance in lamports.
    pub async fn get_balance(&self, address: &str) -> Result<u64, PortError> {
        let result = self
            .rpc_call(
                "getBalance",
                serde_json::json!([address, {"commitment": "confirmed"}]),
            )
            .await?;
        result
            .get("value")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| PortError::Validation("getBalance result missing value".to_owned()))
    }

    /// SPL token accounts owned by `address`, parsed from the `jsonParsed`
    /// encoding down to the mint and UI amount the registry needs.
    pub async fn get_token_accounts(&self, address: &str) -> Result<Vec<RawTokenAccount>, PortError> {
        let result = self
            .rpc_call(
                "getTokenAccountsByOwner",
                serde_json::json!([
                    address,
                    {"programId": SPL_TOKEN_PROGRAM_ID},
                    {"encoding": "jsonParsed", "commitment": "confirmed"},
                ]),
            )
            .await?;
        let entries = result
            .get("value")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                PortError::Validation("getTokenAccountsByOwner result missing value".to_owned())
            })?;

        let mut accounts = Vec::with_capacity(entries.len());
        for entry in entries {
            let info = entry
                .pointer("/account/data/parsed/info")
                .ok_or_else(|| {
                    PortError::Validation("token account missing parsed info".to_owned())
                })?;
            let mint = info
                .get("mint")
                .and_then(|v| v.as_str())
                .ok_or_else(|| PortError::Validation("token account missing mint".to_owned()))?;
            let ui_amount = info
                .pointer("/tokenAmount/uiAmount")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            accounts.push(RawTokenAccount {
                mint: mint.to_owned(),
                ui_amount,
            });
        }
        Ok(accounts)
    }

    /// Best-effort balance for the portfolio panel. Query failures are
    /// logged and degrade to zeroed figures marked stale; they are never
    /// surfaced as user-facing errors.
    pub async fn fetch_balance(&self, address: &str) -> Balance {
        let lamports = match self.get_balance(address).await {
            Ok(lamports) => lamports,
            Err(e) => {
                tracing::warn!(%address, error = %e, "balance fetch failed");
                return stale_balance();
            }
        };

        match self.get_token_accounts(address).await {
            Ok(accounts) => assemble_balance(lamports, &accounts),
            Err(e) => {
                tracing::warn!(%address, error = %e, "token account fetch failed");
                let mut balance = assemble_balance(lamports, &[]);
                balance.stale = true;
                balance
            }
        }
    }
}
