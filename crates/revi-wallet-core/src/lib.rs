pub mod balance;
pub mod codec;
pub mod domain;
pub mod ports;
pub mod session;
pub mod signing;

pub use balance::{assemble_balance, stale_balance, KnownToken, RawTokenAccount, KNOWN_TOKENS};
pub use domain::{
    Balance, LoginOptions, ProviderEvent, ProviderEventKind, SessionSnapshot, SignatureResponse,
    SigningResult, TokenBalance, Wallet,
};
pub use ports::{ClockPort, PortError, WalletProviderPort};
pub use session::{SessionEffect, SessionPhase, SessionState};
pub use signing::{sign_message, DEFAULT_SIGNING_MESSAGE, NO_WALLET_ERROR};
