mod common;

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use revi_wallet_adapters::SolanaRpcClient;
use revi_wallet_core::PortError;

const OWNER: &str = "7S3P4HxJpyyigGzodYwHtCxZyUQe9JiBMHyRWXArAaKv";
const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn healthy_script(method: &str, params: &Value) -> (u16, Value) {
    match method {
        "getBalance" => (200, json!({"result": {"context": {"slot": 1}, "value": 2_500_000_000u64}})),
        "getTokenAccountsByOwner" => {
            // The client must ask for the SPL token program in jsonParsed form.
            assert_eq!(
                params[1]["programId"],
                "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
            );
            assert_eq!(params[2]["encoding"], "jsonParsed");
            (
                200,
                json!({"result": {"context": {"slot": 1}, "value": [
                    {"pubkey": "TokenAcc1", "account": {"data": {"parsed": {"info": {
                        "mint": USDC_MINT,
                        "tokenAmount": {"uiAmount": 12.5, "decimals": 6, "amount": "12500000"}
                    }}}}},
                    {"pubkey": "TokenAcc2", "account": {"data": {"parsed": {"info": {
                        "mint": "UnknownMint1111111111111111111111111111111",
                        "tokenAmount": {"uiAmount": 3.0, "decimals": 9, "amount": "3000000000"}
                    }}}}}
                ]}}),
            )
        }
        _ => (404, json!({"error": "unknown method"})),
    }
}

#[tokio::test]
async fn parses_lamports_and_token_accounts() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (endpoint, _join) = common::spawn_rpc_server(Arc::clone(&calls), healthy_script, 4);

    let client = SolanaRpcClient::new(&common::rpc_config(endpoint)).expect("client");

    let lamports = client.get_balance(OWNER).await.expect("balance");
    assert_eq!(lamports, 2_500_000_000);

    let accounts = client.get_token_accounts(OWNER).await.expect("accounts");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].mint, USDC_MINT);
    assert_eq!(accounts[0].ui_amount, 12.5);

    let recorded = calls.lock().expect("calls lock");
    assert_eq!(recorded.as_slice(), ["getBalance", "getTokenAccountsByOwner"]);
}

#[tokio::test]
async fn fetch_balance_assembles_known_tokens() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (endpoint, _join) = common::spawn_rpc_server(calls, healthy_script, 4);

    let client = SolanaRpcClient::new(&common::rpc_config(endpoint)).expect("client");
    let balance = client.fetch_balance(OWNER).await;

    assert_eq!(balance.sol, 2.5);
    assert!(!balance.stale);
    assert_eq!(balance.tokens.len(), 1);
    assert_eq!(balance.tokens[0].symbol, "USDC");
}

fn http_error_script(_method: &str, _params: &Value) -> (u16, Value) {
    (500, json!({"error": "internal"}))
}

#[tokio::test]
async fn http_failure_maps_to_transport_error() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (endpoint, _join) = common::spawn_rpc_server(calls, http_error_script, 2);

    let client = SolanaRpcClient::new(&common::rpc_config(endpoint)).expect("client");
    let err = client.get_balance(OWNER).await.expect_err("must fail");
    assert!(matches!(err, PortError::Transport(_)));
}

fn rpc_error_script(_method: &str, _params: &Value) -> (u16, Value) {
    (200, json!({"error": {"code": -32602, "message": "Invalid param: WrongSize"}}))
}

#[tokio::test]
async fn rpc_error_body_maps_to_transport_error() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (endpoint, _join) = common::spawn_rpc_server(calls, rpc_error_script, 2);

    let client = SolanaRpcClient::new(&common::rpc_config(endpoint)).expect("client");
    let err = client.get_balance(OWNER).await.expect_err("must fail");
    assert!(err.to_string().contains("Invalid param"));
}

#[tokio::test]
async fn fetch_balance_swallows_failure_into_stale_zero() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (endpoint, _join) = common::spawn_rpc_server(calls, http_error_script, 2);

    let client = SolanaRpcClient::new(&common::rpc_config(endpoint)).expect("client");
    let balance = client.fetch_balance(OWNER).await;

    assert_eq!(balance.sol, 0.0);
    assert!(balance.tokens.is_empty());
    assert!(balance.stale);
}

fn token_failure_script(method: &str, _params: &Value) -> (u16, Value) {
    match method {
        "getBalance" => (200, json!({"result": {"context": {"slot": 1}, "value": 1_000_000_000u64}})),
        _ => (500, json!({"error": "internal"})),
    }
}

#[tokio::test]
async fn token_failure_keeps_sol_but_marks_stale() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (endpoint, _join) = common::spawn_rpc_server(calls, token_failure_script, 3);

    let client = SolanaRpcClient::new(&common::rpc_config(endpoint)).expect("client");
    let balance = client.fetch_balance(OWNER).await;

    assert_eq!(balance.sol, 1.0);
    assert!(balance.tokens.is_empty());
    assert!(balance.stale);
}
