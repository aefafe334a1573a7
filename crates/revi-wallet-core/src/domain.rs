use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A wallet reported by the embedded-wallet provider. Read-only to us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    pub client_type: String,
}

/// Snapshot of the provider's auth state, mirrored into local state on
/// every provider event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSnapshot {
    pub ready: bool,
    pub authenticated: bool,
    pub user: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub symbol: String,
    pub amount: f64,
    pub decimals: u8,
}

/// Displayed balances for the active wallet. Recomputed wholesale on every
/// wallet change; `stale` marks figures that come from a failed fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Balance {
    pub sol: f64,
    pub tokens: Vec<TokenBalance>,
    pub stale: bool,
}

/// Outcome of one sign invocation. The signature and error arms are
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningResult {
    Signed {
        message_text: String,
        signature_base64: String,
    },
    Failed {
        error_text: String,
    },
}

/// Options forwarded to the provider's login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOptions {
    pub login_methods: Vec<String>,
    pub wallet_chain_type: String,
    pub disable_signup: bool,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self {
            login_methods: vec!["wallet".to_owned(), "email".to_owned()],
            wallet_chain_type: "solana-only".to_owned(),
            disable_signup: false,
        }
    }
}

/// Ordered event pushed by the provider adapter and consumed by the
/// session state machine. Replaces the provider's callback registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEvent {
    pub sequence: u64,
    pub kind: ProviderEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderEventKind {
    SessionChanged(SessionSnapshot),
    WalletsChanged(Vec<Wallet>),
}

/// Providers disagree on the shape of a signing response: some return the
/// raw signature bytes, others wrap them in an object. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignatureResponse {
    Raw(Vec<u8>),
    Wrapped { signature: Vec<u8> },
}

impl SignatureResponse {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SignatureResponse::Raw(bytes) => bytes,
            SignatureResponse::Wrapped { signature } => signature,
        }
    }
}
