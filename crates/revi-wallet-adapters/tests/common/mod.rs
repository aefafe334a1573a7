#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;
use tiny_http::{Response, Server, StatusCode};

use revi_wallet_adapters::AppConfig;

/// Script for one mock endpoint: maps an incoming JSON-RPC method and its
/// params to a status code and response body.
pub type RpcScript = fn(&str, &Value) -> (u16, Value);

/// Spawns a mock JSON-RPC server that records called method names and
/// answers from `script`. Shuts down after `max_requests` requests.
pub fn spawn_rpc_server(
    calls: Arc<Mutex<Vec<String>>>,
    script: RpcScript,
    max_requests: usize,
) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..max_requests {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };

            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = parsed
                .get("method")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_owned();
            let params = parsed.get("params").cloned().unwrap_or(Value::Null);

            if let Ok(mut g) = calls.lock() {
                g.push(method.clone());
            }

            let (code, payload) = script(&method, &params);
            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}

pub fn bridge_config(bridge_url: String) -> AppConfig {
    AppConfig {
        provider_bridge_url: Some(bridge_url),
        rpc_timeout_ms: 5_000,
        rpc_connect_timeout_ms: 2_000,
        ..AppConfig::default()
    }
}

pub fn rpc_config(endpoint: String) -> AppConfig {
    AppConfig {
        rpc_url: endpoint,
        rpc_api_key: String::new(),
        rpc_timeout_ms: 5_000,
        rpc_connect_timeout_ms: 2_000,
        ..AppConfig::default()
    }
}
