pub mod clock;
pub mod config;
pub mod ledger;
pub mod provider;

pub use clock::SystemClockAdapter;
pub use config::AppConfig;
pub use ledger::{SolanaRpcClient, SPL_TOKEN_PROGRAM_ID};
pub use provider::{EmbeddedWalletAdapter, DETERMINISTIC_WALLET_ADDRESS};
