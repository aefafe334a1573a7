//! Embedded-wallet provider adapter.
//!
//! Two live modes: `Deterministic`, a fully offline double with a scripted
//! session and a derived signature, and `Bridge`, JSON over HTTP to a local
//! process speaking the provider SDK's protocol. `Disabled` carries the
//! reason construction failed.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use sha2::{Digest, Sha256};

use revi_wallet_core::{
    LoginOptions, PortError, ProviderEvent, ProviderEventKind, SessionSnapshot, SignatureResponse,
    Wallet, WalletProviderPort,
};

use crate::AppConfig;

/// Address reported by the deterministic mode's built-in wallet.
pub const DETERMINISTIC_WALLET_ADDRESS: &str = "7S3P4HxJpyyigGzodYwHtCxZyUQe9JiBMHyRWXArAaKv";

#[derive(Debug, Clone)]
pub struct EmbeddedWalletAdapter {
    mode: ProviderMode,
    app_id: String,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    Bridge(BridgeRuntime),
}

#[derive(Debug, Clone)]
struct BridgeRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Clone, Default)]
struct ProviderState {
    session: SessionSnapshot,
    wallets: Vec<Wallet>,
    event_seq: u64,
    events: Vec<ProviderEvent>,
}

impl Default for EmbeddedWalletAdapter {
    fn default() -> Self {
        Self::with_config(AppConfig::from_env())
    }
}

impl EmbeddedWalletAdapter {
    pub fn with_config(config: AppConfig) -> Self {
        let mode = if let Some(ref base_url) = config.provider_bridge_url {
            let timeout = std::time::Duration::from_millis(config.rpc_timeout_ms);
            let connect_timeout = std::time::Duration::from_millis(config.rpc_connect_timeout_ms);
            match reqwest::blocking::Client::builder()
                .timeout(timeout)
                .connect_timeout(connect_timeout)
                .build()
            {
                Ok(client) => ProviderMode::Bridge(BridgeRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => ProviderMode::Disabled(format!(
                    "failed to initialize provider bridge client: {e}"
                )),
            }
        } else {
            ProviderMode::Deterministic
        };

        let adapter = Self {
            mode,
            app_id: config.provider_app_id,
            state: Arc::new(Mutex::new(ProviderState {
                // The offline double is ready from the first frame; the
                // bridge reports readiness through its own session call.
                session: SessionSnapshot {
                    ready: true,
                    authenticated: false,
                    user: Value::Null,
                },
                ..ProviderState::default()
            })),
        };

        if matches!(adapter.mode, ProviderMode::Deterministic) {
            let snapshot = adapter
                .state
                .lock()
                .map(|g| g.session.clone())
                .unwrap_or_default();
            let _ = adapter.record_event(ProviderEventKind::SessionChanged(snapshot));
        }

        adapter
    }

    fn check_mode(&self) -> Result<(), PortError> {
        if let ProviderMode::Disabled(reason) = &self.mode {
            return Err(PortError::Policy(reason.clone()));
        }
        Ok(())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    fn record_event(&self, kind: ProviderEventKind) -> Result<(), PortError> {
        let mut g = self.lock_state()?;
        g.event_seq = g.event_seq.saturating_add(1);
        let sequence = g.event_seq;
        g.events.push(ProviderEvent { sequence, kind });
        Ok(())
    }

    /// 64 bytes derived from the signer address and payload. Stable across
    /// runs so offline tests can assert on the output.
    fn deterministic_signature(&self, address: &str, payload: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(address.as_bytes());
        hasher.update(payload);
        let first = hasher.finalize();

        let mut hasher = Sha256::new();
        hasher.update(first);
        hasher.update(payload);
        let second = hasher.finalize();

        let mut signature = Vec::with_capacity(64);
        signature.extend_from_slice(&first);
        signature.extend_from_slice(&second);
        signature
    }

    fn bridge_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let bridge = match &self.mode {
            ProviderMode::Bridge(bridge) => bridge,
            ProviderMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
            ProviderMode::Deterministic => {
                return Err(PortError::NotImplemented("provider bridge not enabled"))
            }
        };

        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = bridge
            .client
            .post(&bridge.base_url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("provider bridge request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("provider bridge json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "provider bridge status {status}: {body}"
            )));
        }
        if let Some(err) = body.get("error") {
            return Err(PortError::Transport(format!(
                "provider bridge returned error: {err}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("provider bridge missing result".to_owned()))
    }

    fn mirror_session(&self, snapshot: SessionSnapshot) -> Result<(), PortError> {
        let changed = {
            let mut g = self.lock_state()?;
            let changed = g.session != snapshot;
            g.session = snapshot.clone();
            changed
        };
        if changed {
            self.record_event(ProviderEventKind::SessionChanged(snapshot))?;
        }
        Ok(())
    }

    fn mirror_wallets(&self, wallets: Vec<Wallet>) -> Result<(), PortError> {
        let changed = {
            let mut g = self.lock_state()?;
            let changed = g.wallets != wallets;
            g.wallets = wallets.clone();
            changed
        };
        if changed {
            self.record_event(ProviderEventKind::WalletsChanged(wallets))?;
        }
        Ok(())
    }

    pub fn debug_inject_session(&self, snapshot: SessionSnapshot) -> Result<(), PortError> {
        self.mirror_session(snapshot)
    }

    pub fn debug_inject_wallets(&self, wallets: Vec<Wallet>) -> Result<(), PortError> {
        self.mirror_wallets(wallets)
    }
}

impl WalletProviderPort for EmbeddedWalletAdapter {
    fn login(&self, options: &LoginOptions) -> Result<SessionSnapshot, PortError> {
        self.check_mode()?;

        if matches!(self.mode, ProviderMode::Bridge(_)) {
            let result = self.bridge_call("login", serde_json::json!([options]))?;
            let snapshot: SessionSnapshot = serde_json::from_value(result)
                .map_err(|e| PortError::Validation(format!("invalid login response: {e}")))?;
            self.mirror_session(snapshot.clone())?;
            let _ = self.wallets()?;
            return Ok(snapshot);
        }

        let snapshot = SessionSnapshot {
            ready: true,
            authenticated: true,
            user: serde_json::json!({
                "id": "did:privy:deterministic-user",
                "app_id": self.app_id,
                "login_methods": options.login_methods,
            }),
        };
        self.mirror_session(snapshot.clone())?;
        self.mirror_wallets(vec![Wallet {
            address: DETERMINISTIC_WALLET_ADDRESS.to_owned(),
            client_type: "privy".to_owned(),
        }])?;
        Ok(snapshot)
    }

    fn logout(&self) -> Result<(), PortError> {
        self.check_mode()?;

        if matches!(self.mode, ProviderMode::Bridge(_)) {
            let _ = self.bridge_call("logout", serde_json::json!([]))?;
        }

        self.mirror_wallets(Vec::new())?;
        self.mirror_session(SessionSnapshot {
            ready: true,
            authenticated: false,
            user: Value::Null,
        })?;
        Ok(())
    }

    fn session(&self) -> Result<SessionSnapshot, PortError> {
        self.check_mode()?;

        if matches!(self.mode, ProviderMode::Bridge(_)) {
            let result = self.bridge_call("session", serde_json::json!([]))?;
            let snapshot: SessionSnapshot = serde_json::from_value(result)
                .map_err(|e| PortError::Validation(format!("invalid session response: {e}")))?;
            self.mirror_session(snapshot.clone())?;
            return Ok(snapshot);
        }

        Ok(self.lock_state()?.session.clone())
    }

    fn wallets(&self) -> Result<Vec<Wallet>, PortError> {
        self.check_mode()?;

        if matches!(self.mode, ProviderMode::Bridge(_)) {
            let result = self.bridge_call("wallets", serde_json::json!([]))?;
            let wallets: Vec<Wallet> = serde_json::from_value(result)
                .map_err(|e| PortError::Validation(format!("invalid wallets response: {e}")))?;
            self.mirror_wallets(wallets.clone())?;
            return Ok(wallets);
        }

        Ok(self.lock_state()?.wallets.clone())
    }

    fn sign_message(&self, address: &str, message: &[u8]) -> Result<SignatureResponse, PortError> {
        self.check_mode()?;

        if matches!(self.mode, ProviderMode::Bridge(_)) {
            let result =
                self.bridge_call("signMessage", serde_json::json!([address, message]))?;
            let response: SignatureResponse = serde_json::from_value(result).map_err(|e| {
                PortError::Validation(format!("invalid signMessage response: {e}"))
            })?;
            return Ok(response);
        }

        let known = self
            .lock_state()?
            .wallets
            .iter()
            .any(|wallet| wallet.address == address);
        if !known {
            return Err(PortError::NotFound(format!(
                "no connected wallet with address {address}"
            )));
        }
        Ok(SignatureResponse::Raw(
            self.deterministic_signature(address, message),
        ))
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        self.check_mode()?;
        let mut g = self.lock_state()?;
        Ok(std::mem::take(&mut g.events))
    }
}
