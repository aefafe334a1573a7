//! The message-signing round trip: encode, delegate to the provider,
//! normalize, display-encode.

use crate::codec;
use crate::domain::{SigningResult, Wallet};
use crate::ports::WalletProviderPort;

/// Signed when the user submits a blank message.
pub const DEFAULT_SIGNING_MESSAGE: &str = "Sign this message with your Solana wallet!";

/// Exact error text shown when signing is requested with no active wallet.
pub const NO_WALLET_ERROR: &str = "No Solana wallet connected.";

/// Runs one sign invocation. Repeated calls with the same inputs are
/// independent round trips; there is no dedup. Failures come back as a
/// `Failed` result, never as a panic or a propagated error.
pub fn sign_message<P: WalletProviderPort>(
    provider: &P,
    wallet: Option<&Wallet>,
    message_text: &str,
) -> SigningResult {
    let Some(wallet) = wallet else {
        return SigningResult::Failed {
            error_text: NO_WALLET_ERROR.to_owned(),
        };
    };

    let text = if message_text.is_empty() {
        DEFAULT_SIGNING_MESSAGE
    } else {
        message_text
    };
    let message_bytes = codec::encode_message(text);

    match provider.sign_message(&wallet.address, &message_bytes) {
        Ok(response) => SigningResult::Signed {
            message_text: text.to_owned(),
            signature_base64: codec::signature_to_base64(&response.into_bytes()),
        },
        Err(e) => SigningResult::Failed {
            error_text: format!("Error signing message: {e}"),
        },
    }
}
