//! Main application state and update loop.
//!
//! Provider events are drained once per frame and folded through the
//! session state machine; the effects it returns are the only thing that
//! changes routes or starts balance fetches. Blocking work runs on worker
//! threads that post into `Arc<Mutex<Option<..>>>` result slots.

use std::sync::{Arc, Mutex};

use eframe::egui;

use revi_wallet_core::{
    Balance, LoginOptions, SessionEffect, SessionSnapshot, SessionState, SigningResult,
};

use crate::bridge::WalletBridge;
use crate::state::{DashboardState, LandingState};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Dashboard,
}

/// Result from the async login attempt
#[derive(Clone)]
enum LoginResult {
    Done,
    Error(String),
}

/// Result from an async balance fetch, tagged with the generation that
/// issued it so late arrivals from an earlier wallet can be discarded.
#[derive(Clone)]
struct BalanceUpdate {
    generation: u64,
    balance: Balance,
}

/// The main application state
pub struct App {
    route: Route,
    session: SessionState,
    landing: LandingState,
    dashboard: DashboardState,
    bridge: WalletBridge,
    /// Async login result receiver
    login_result: Arc<Mutex<Option<LoginResult>>>,
    /// Async signing result receiver
    sign_result: Arc<Mutex<Option<SigningResult>>>,
    /// Async balance fetch result receiver
    balance_result: Arc<Mutex<Option<BalanceUpdate>>>,
    /// Newest balance fetch generation issued so far
    balance_generation: u64,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>, bridge: WalletBridge) -> Self {
        if let Err(e) = bridge.refresh_session() {
            tracing::warn!(error = %e, "initial session refresh failed");
        }

        Self {
            route: Route::default(),
            session: SessionState::new(),
            landing: LandingState::default(),
            dashboard: DashboardState::default(),
            bridge,
            login_result: Arc::new(Mutex::new(None)),
            sign_result: Arc::new(Mutex::new(None)),
            balance_result: Arc::new(Mutex::new(None)),
            balance_generation: 0,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.apply_provider_events(ctx);
        self.check_login_result();
        self.check_sign_result();
        self.check_balance_result();

        // Until the provider reports ready nothing is known about the
        // session, so neither screen is shown.
        if !self.session.snapshot().ready {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui::loading_spinner(ui);
                });
            });
            return;
        }

        self.route = resolve_route(self.route, self.session.snapshot());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("◎ Revi DApps")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(153, 69, 255)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(self.bridge.cluster().to_owned()).weak());
                });
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                match self.route {
                    Route::Landing => self.render_landing(ui, ctx),
                    Route::Dashboard => self.render_dashboard(ui, ctx),
                }
                ui.add_space(20.0);
            });
        });

        if self.dashboard.show_disconnect_confirm {
            self.render_disconnect_confirm(ctx);
        }
    }
}

/// Redirect rules: an authenticated session never shows the landing page
/// and an unauthenticated one never shows the dashboard. While the
/// provider is not ready the current route is left alone.
fn resolve_route(current: Route, snapshot: &SessionSnapshot) -> Route {
    if !snapshot.ready {
        return current;
    }
    if snapshot.authenticated {
        Route::Dashboard
    } else {
        Route::Landing
    }
}

fn apply_balance_update(dashboard: &mut DashboardState, latest_generation: u64, update: BalanceUpdate) {
    if update.generation != latest_generation {
        tracing::debug!(
            generation = update.generation,
            latest_generation,
            "discarding balance result from a superseded fetch"
        );
        return;
    }
    dashboard.balance = Some(update.balance);
}

impl App {
    // =========================================================================
    // EVENTS AND ASYNC RESULTS
    // =========================================================================

    fn apply_provider_events(&mut self, ctx: &egui::Context) {
        for event in self.bridge.drain_events() {
            for effect in self.session.apply(event) {
                tracing::debug!(?effect, "session effect");
                match effect {
                    SessionEffect::FetchBalance { address } => {
                        self.trigger_balance_fetch(address, ctx);
                    }
                    SessionEffect::ClearBalance => {
                        self.dashboard.balance = None;
                    }
                    SessionEffect::NavigateToLanding => {
                        self.dashboard = DashboardState::default();
                        self.route = Route::Landing;
                    }
                    SessionEffect::NavigateToDashboard => {
                        self.dashboard.focus_message_input = true;
                        self.route = Route::Dashboard;
                    }
                }
            }
        }
    }

    fn check_login_result(&mut self) {
        let result = {
            let mut guard = self.login_result.lock().unwrap();
            guard.take()
        };

        if let Some(result) = result {
            self.landing.login_busy = false;
            match result {
                LoginResult::Done => self.landing.login_error = None,
                LoginResult::Error(e) => {
                    tracing::warn!(error = %e, "login failed");
                    self.landing.login_error = Some(e);
                }
            }
        }
    }

    fn trigger_login(&mut self, ctx: &egui::Context) {
        if self.landing.login_busy {
            return;
        }

        self.landing.login_busy = true;
        self.landing.login_error = None;
        let bridge = self.bridge.clone();
        let result = Arc::clone(&self.login_result);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = match bridge.login(&LoginOptions::default()) {
                Ok(snapshot) => {
                    let user_id = snapshot
                        .user
                        .pointer("/id")
                        .and_then(|v| v.as_str())
                        .unwrap_or("unknown");
                    tracing::info!(user = user_id, "login succeeded");
                    LoginResult::Done
                }
                Err(e) => LoginResult::Error(format!("Failed to connect wallet: {e}")),
            };
            let mut guard = result.lock().unwrap();
            *guard = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn check_sign_result(&mut self) {
        let result = {
            let mut guard = self.sign_result.lock().unwrap();
            guard.take()
        };

        if let Some(result) = result {
            self.dashboard.signing_busy = false;
            self.dashboard.apply_signing_result(result);
        }
    }

    fn trigger_sign(&mut self, ctx: &egui::Context) {
        if self.dashboard.signing_busy {
            return;
        }

        self.dashboard.signing_busy = true;
        let bridge = self.bridge.clone();
        let wallet = self.session.active_wallet().cloned();
        let message = self.dashboard.message_input.clone();
        let result = Arc::clone(&self.sign_result);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = bridge.sign(wallet.as_ref(), &message);
            let mut guard = result.lock().unwrap();
            *guard = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn check_balance_result(&mut self) {
        let result = {
            let mut guard = self.balance_result.lock().unwrap();
            guard.take()
        };

        if let Some(update) = result {
            apply_balance_update(&mut self.dashboard, self.balance_generation, update);
        }
    }

    fn trigger_balance_fetch(&mut self, address: String, ctx: &egui::Context) {
        self.balance_generation += 1;
        let generation = self.balance_generation;
        self.dashboard.balance = None;

        let bridge = self.bridge.clone();
        let result = Arc::clone(&self.balance_result);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let balance = bridge.fetch_balance_blocking(&address);
            let mut guard = result.lock().unwrap();
            *guard = Some(BalanceUpdate {
                generation,
                balance,
            });
            ctx.request_repaint();
        });
    }

    fn trigger_logout(&mut self) {
        let bridge = self.bridge.clone();
        std::thread::spawn(move || {
            if let Err(e) = bridge.logout() {
                tracing::warn!(error = %e, "logout failed");
            }
        });
    }

    // =========================================================================
    // LANDING
    // =========================================================================

    fn render_landing(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui::styled_heading(ui, "Revi DApps");
            ui.label(egui::RichText::new("Secure Solana Wallet Interface").size(16.0));
            ui.add_space(20.0);
            ui.label("Connect, manage, and interact with your Solana wallet securely.");
            ui.add_space(10.0);
            ui.label("• Connect with a Solana wallet or email");
            ui.label("• View your SOL and token balances");
            ui.label("• Sign messages with your wallet");
            ui.add_space(20.0);

            if let Some(error) = self.landing.login_error.clone() {
                ui::error_message(ui, &error);
                ui.add_space(10.0);
            }

            let busy = self.landing.login_busy;
            let label = if busy { "Connecting..." } else { "Connect Wallet" };
            if ui::primary_button_enabled(ui, label, !busy).clicked() {
                self.trigger_login(ctx);
            }
        });
    }

    // =========================================================================
    // DASHBOARD
    // =========================================================================

    fn render_dashboard(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Dashboard");
        ui.add_space(10.0);

        let wallet = self.session.active_wallet().cloned();

        ui::section_header(ui, "Wallet");
        ui::card(ui, |ui| match &wallet {
            Some(wallet) => {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&wallet.address).monospace());

                    let now = self.bridge.now_ms();
                    let copy_label = if self.dashboard.copied_recently(now) {
                        "✔"
                    } else {
                        "📋"
                    };
                    if ui
                        .small_button(copy_label)
                        .on_hover_text("Copy address")
                        .clicked()
                    {
                        ui::copy_to_clipboard(&wallet.address);
                        self.dashboard.mark_copied(now);
                    }
                    if self.dashboard.copied_recently(now) {
                        ctx.request_repaint_after(std::time::Duration::from_millis(250));
                    }

                    if ui
                        .small_button("🔗")
                        .on_hover_text("View on Solana Explorer")
                        .clicked()
                    {
                        ui::open_url_new_tab(&ui::get_explorer_address_url(
                            self.bridge.cluster(),
                            &wallet.address,
                        ));
                    }
                });
                ui.label(
                    egui::RichText::new(format!("client: {}", wallet.client_type))
                        .weak()
                        .small(),
                );
            }
            None => {
                ui.label(egui::RichText::new("No wallet connected yet.").weak());
            }
        });

        ui::section_header(ui, "Portfolio");
        ui::card(ui, |ui| match self.dashboard.balance.clone() {
            None if wallet.is_some() => ui::loading_spinner(ui),
            None => {
                ui.label(egui::RichText::new("Connect a wallet to see balances.").weak());
            }
            Some(balance) => {
                if balance.stale {
                    ui::warning_message(ui, "Balance lookup failed; figures may be out of date.");
                }
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("SOL").strong());
                    ui.label(egui::RichText::new(format!("{:.4}", balance.sol)).monospace());
                });
                if balance.tokens.is_empty() {
                    ui.label(egui::RichText::new("No tokens found in this wallet").weak());
                } else {
                    for token in &balance.tokens {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&token.symbol).strong());
                            ui.label(
                                egui::RichText::new(format!("{:.4}", token.amount)).monospace(),
                            );
                        });
                    }
                }
            }
        });

        ui::section_header(ui, "Sign Message");
        ui::card(ui, |ui| {
            let response = ui::message_input(ui, &mut self.dashboard.message_input);
            if self.dashboard.focus_message_input {
                response.request_focus();
                self.dashboard.focus_message_input = false;
            }
            ui.add_space(6.0);

            let busy = self.dashboard.signing_busy;
            let label = if busy { "Signing..." } else { "Sign Message" };
            if ui::primary_button_enabled(ui, label, !busy).clicked() {
                self.trigger_sign(ctx);
            }

            if !self.dashboard.signature.is_empty() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new("Signature").strong());
                ui::copyable_value(ui, &self.dashboard.signature.clone());
            }
            if !self.dashboard.signing_error.is_empty() {
                ui.add_space(6.0);
                ui::error_message(ui, &self.dashboard.signing_error.clone());
            }
        });

        ui::section_header(ui, "Account");
        ui::card(ui, |ui| {
            let user = &self.session.snapshot().user;
            if user.is_null() {
                ui.label(egui::RichText::new("No account details available.").weak());
            } else {
                let pretty =
                    serde_json::to_string_pretty(user).unwrap_or_else(|_| user.to_string());
                ui.label(egui::RichText::new(pretty).monospace().small());
            }
        });

        ui.add_space(15.0);
        if ui::secondary_button(ui, "Disconnect").clicked() {
            self.dashboard.request_disconnect();
        }
    }

    fn render_disconnect_confirm(&mut self, ctx: &egui::Context) {
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Disconnect Wallet")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to disconnect your wallet?");
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui::primary_button(ui, "Disconnect").clicked() {
                        confirmed = true;
                    }
                    if ui::secondary_button(ui, "Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.dashboard.confirm_disconnect();
            self.trigger_logout();
        } else if cancelled {
            self.dashboard.cancel_disconnect();
        }
    }
}
