//! Session lifecycle state machine.
//!
//! Consumes the ordered [`ProviderEvent`] stream and yields explicit
//! effects for the shell to execute. The shell never inspects provider
//! callbacks directly; this is the only place lifecycle decisions are made.

use crate::domain::{ProviderEvent, ProviderEventKind, SessionSnapshot, Wallet};

/// `Unready -> ReadyUnauthenticated -> ReadyAuthenticated -> ReadyUnauthenticated`
/// (the last edge on logout). If the provider never becomes ready we stay in
/// `Unready` forever: a blocked loading state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unready,
    ReadyUnauthenticated,
    ReadyAuthenticated,
}

/// Side effects requested by a transition. Executing them is the shell's
/// job; the state machine itself never does I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    FetchBalance { address: String },
    ClearBalance,
    NavigateToLanding,
    NavigateToDashboard,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    phase: SessionPhase,
    snapshot: SessionSnapshot,
    active_wallet: Option<Wallet>,
    last_sequence: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Unready,
            snapshot: SessionSnapshot::default(),
            active_wallet: None,
            last_sequence: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// The single operative wallet: always the first of the provider's
    /// reported list, or none when the list is empty.
    pub fn active_wallet(&self) -> Option<&Wallet> {
        self.active_wallet.as_ref()
    }

    /// Applies one provider event and returns the effects it triggers.
    /// Events that arrive out of order (sequence at or below the last one
    /// seen) are dropped.
    pub fn apply(&mut self, event: ProviderEvent) -> Vec<SessionEffect> {
        if event.sequence <= self.last_sequence {
            return Vec::new();
        }
        self.last_sequence = event.sequence;

        match event.kind {
            ProviderEventKind::SessionChanged(snapshot) => self.apply_session(snapshot),
            ProviderEventKind::WalletsChanged(wallets) => self.apply_wallets(wallets),
        }
    }

    fn apply_session(&mut self, snapshot: SessionSnapshot) -> Vec<SessionEffect> {
        let previous = self.phase;
        self.snapshot = snapshot;
        self.phase = phase_of(&self.snapshot);

        let mut effects = Vec::new();
        match (previous, self.phase) {
            (SessionPhase::ReadyAuthenticated, SessionPhase::ReadyUnauthenticated) => {
                // Logout or session expiry: the wallet list is gone with it.
                self.active_wallet = None;
                effects.push(SessionEffect::ClearBalance);
                effects.push(SessionEffect::NavigateToLanding);
            }
            (_, SessionPhase::ReadyUnauthenticated)
                if previous != SessionPhase::ReadyUnauthenticated =>
            {
                effects.push(SessionEffect::NavigateToLanding);
            }
            (_, SessionPhase::ReadyAuthenticated)
                if previous != SessionPhase::ReadyAuthenticated =>
            {
                effects.push(SessionEffect::NavigateToDashboard);
            }
            _ => {}
        }
        effects
    }

    fn apply_wallets(&mut self, wallets: Vec<Wallet>) -> Vec<SessionEffect> {
        let previous_address = self
            .active_wallet
            .as_ref()
            .map(|wallet| wallet.address.clone());
        self.active_wallet = wallets.into_iter().next();

        match self.active_wallet.as_ref() {
            Some(wallet) if wallet.address.is_empty() => Vec::new(),
            Some(wallet) if previous_address.as_deref() != Some(wallet.address.as_str()) => {
                vec![SessionEffect::FetchBalance {
                    address: wallet.address.clone(),
                }]
            }
            Some(_) => Vec::new(),
            None if previous_address.is_some() => vec![SessionEffect::ClearBalance],
            None => Vec::new(),
        }
    }
}

fn phase_of(snapshot: &SessionSnapshot) -> SessionPhase {
    match (snapshot.ready, snapshot.authenticated) {
        (false, _) => SessionPhase::Unready,
        (true, false) => SessionPhase::ReadyUnauthenticated,
        (true, true) => SessionPhase::ReadyAuthenticated,
    }
}
