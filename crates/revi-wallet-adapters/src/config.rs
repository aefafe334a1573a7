//! Deployment configuration: everything here is supplied through the
//! environment at startup and immutable afterwards.

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base RPC URL without the API key segment.
    pub rpc_url: String,
    /// Appended as the final path segment of the RPC endpoint when set.
    pub rpc_api_key: String,
    pub provider_app_id: String,
    pub cluster: String,
    /// When set, the provider adapter speaks HTTP to a local bridge
    /// process instead of running its deterministic offline mode.
    pub provider_bridge_url: Option<String>,
    pub rpc_timeout_ms: u64,
    pub rpc_connect_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://solana-mainnet.g.alchemy.com/v2".to_owned(),
            rpc_api_key: String::new(),
            provider_app_id: String::new(),
            cluster: "mainnet-beta".to_owned(),
            provider_bridge_url: None,
            rpc_timeout_ms: 15_000,
            rpc_connect_timeout_ms: 5_000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: env_string("REVI_SOLANA_RPC_URL").unwrap_or(defaults.rpc_url),
            rpc_api_key: env_string("REVI_RPC_API_KEY").unwrap_or(defaults.rpc_api_key),
            provider_app_id: env_string("REVI_PROVIDER_APP_ID").unwrap_or(defaults.provider_app_id),
            cluster: env_string("REVI_SOLANA_CLUSTER").unwrap_or(defaults.cluster),
            provider_bridge_url: env_string("REVI_PROVIDER_BRIDGE_URL"),
            rpc_timeout_ms: env_u64("REVI_RPC_TIMEOUT_MS").unwrap_or(defaults.rpc_timeout_ms),
            rpc_connect_timeout_ms: defaults.rpc_connect_timeout_ms,
        }
    }

    /// The full RPC endpoint the ledger client posts to.
    pub fn rpc_endpoint(&self) -> String {
        if self.rpc_api_key.is_empty() {
            self.rpc_url.clone()
        } else {
            format!("{}/{}", self.rpc_url.trim_end_matches('/'), self.rpc_api_key)
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key).and_then(|value| value.parse().ok())
}
