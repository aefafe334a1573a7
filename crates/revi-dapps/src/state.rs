//! Per-screen view state. No business logic beyond keeping the signing
//! result fields mutually exclusive.

use revi_wallet_core::{Balance, SigningResult};

/// How long the clipboard "copied" acknowledgement stays visible.
pub const COPY_ACK_MS: u64 = 2_000;

#[derive(Debug, Default)]
pub struct LandingState {
    pub login_busy: bool,
    pub login_error: Option<String>,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub message_input: String,
    pub signing_busy: bool,
    /// Base64 signature of the last successful sign. Never non-empty at
    /// the same time as `signing_error`.
    pub signature: String,
    pub signing_error: String,
    pub balance: Option<Balance>,
    pub copied_until_ms: Option<u64>,
    pub show_disconnect_confirm: bool,
    pub focus_message_input: bool,
}

impl DashboardState {
    /// Folds one signing outcome into the view. Success clears the input
    /// for the next message; failure leaves it for the retry.
    pub fn apply_signing_result(&mut self, result: SigningResult) {
        match result {
            SigningResult::Signed {
                signature_base64, ..
            } => {
                self.signature = signature_base64;
                self.signing_error.clear();
                self.message_input.clear();
            }
            SigningResult::Failed { error_text } => {
                self.signing_error = error_text;
                self.signature.clear();
            }
        }
    }

    pub fn clear_signing(&mut self) {
        self.message_input.clear();
        self.signature.clear();
        self.signing_error.clear();
    }

    pub fn request_disconnect(&mut self) {
        self.show_disconnect_confirm = true;
    }

    /// Backing out of the confirmation leaves everything else untouched.
    pub fn cancel_disconnect(&mut self) {
        self.show_disconnect_confirm = false;
    }

    /// Confirming clears the signing fields so no stale signature survives
    /// into the next session. The caller still has to run the logout.
    pub fn confirm_disconnect(&mut self) {
        self.clear_signing();
        self.show_disconnect_confirm = false;
    }

    pub fn mark_copied(&mut self, now_ms: u64) {
        self.copied_until_ms = Some(now_ms + COPY_ACK_MS);
    }

    pub fn copied_recently(&self, now_ms: u64) -> bool {
        self.copied_until_ms.is_some_and(|until| now_ms < until)
    }
}
