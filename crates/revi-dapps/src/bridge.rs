//! Facade over the wallet ports for the egui shell. Every call here is
//! blocking; the shell runs them on worker threads, never on the UI thread.

use std::sync::Arc;

use revi_wallet_adapters::{AppConfig, EmbeddedWalletAdapter, SolanaRpcClient, SystemClockAdapter};
use revi_wallet_core::{
    sign_message, Balance, ClockPort, LoginOptions, PortError, ProviderEvent, SessionSnapshot,
    SigningResult, Wallet, WalletProviderPort,
};

#[derive(Clone)]
pub struct WalletBridge {
    provider: Arc<EmbeddedWalletAdapter>,
    ledger: Arc<SolanaRpcClient>,
    clock: SystemClockAdapter,
    cluster: String,
}

impl WalletBridge {
    pub fn from_env() -> Result<Self, PortError> {
        let config = AppConfig::from_env();
        let ledger = SolanaRpcClient::new(&config)?;
        Ok(Self {
            provider: Arc::new(EmbeddedWalletAdapter::with_config(config.clone())),
            ledger: Arc::new(ledger),
            clock: SystemClockAdapter,
            cluster: config.cluster,
        })
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms().unwrap_or(0)
    }

    /// Re-reads session and wallet state from the provider so the event
    /// channel reflects any changes made outside the app.
    pub fn refresh_session(&self) -> Result<(), PortError> {
        let _ = self.provider.session()?;
        let _ = self.provider.wallets()?;
        Ok(())
    }

    pub fn login(&self, options: &LoginOptions) -> Result<SessionSnapshot, PortError> {
        self.provider.login(options)
    }

    pub fn logout(&self) -> Result<(), PortError> {
        self.provider.logout()
    }

    pub fn drain_events(&self) -> Vec<ProviderEvent> {
        match self.provider.drain_events() {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "draining provider events failed");
                Vec::new()
            }
        }
    }

    pub fn sign(&self, wallet: Option<&Wallet>, message_text: &str) -> SigningResult {
        sign_message(self.provider.as_ref(), wallet, message_text)
    }

    /// Fetches the wallet balance on the calling thread. Degrades to stale
    /// zeroed figures when the runtime itself cannot be built.
    pub fn fetch_balance_blocking(&self, address: &str) -> Balance {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build balance fetch runtime");
                return revi_wallet_core::stale_balance();
            }
        };
        runtime.block_on(self.ledger.fetch_balance(address))
    }
}
