use thiserror::Error;

use crate::domain::{LoginOptions, ProviderEvent, SessionSnapshot, SignatureResponse, Wallet};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// The embedded-wallet provider boundary. Login UX, session tokens and
/// signature cryptography all live behind this trait; the client only
/// mirrors what the provider reports.
pub trait WalletProviderPort {
    fn login(&self, options: &LoginOptions) -> Result<SessionSnapshot, PortError>;
    fn logout(&self) -> Result<(), PortError>;
    fn session(&self) -> Result<SessionSnapshot, PortError>;
    fn wallets(&self) -> Result<Vec<Wallet>, PortError>;
    fn sign_message(&self, address: &str, message: &[u8]) -> Result<SignatureResponse, PortError>;
    /// Pulls the ordered backlog of provider-pushed updates. Draining is
    /// destructive; each event is delivered exactly once.
    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError>;
}

pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, PortError>;
}
