//! Pure assembly of raw ledger records into a displayable [`Balance`].
//! The I/O half lives in the adapters crate.

use crate::domain::{Balance, TokenBalance};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct KnownToken {
    pub symbol: &'static str,
    pub mint: &'static str,
    pub decimals: u8,
}

/// SPL tokens the portfolio panel knows how to label. Mints outside this
/// registry are dropped from the display.
pub const KNOWN_TOKENS: &[KnownToken] = &[
    KnownToken {
        symbol: "USDC",
        mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
        decimals: 6,
    },
    KnownToken {
        symbol: "SANA",
        mint: "5dpN5wMH8j8au29Rp91qn4WfNq6t6xJfcjQNcFeDJ8Ct",
        decimals: 9,
    },
];

/// One token-account record as returned by the ledger, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTokenAccount {
    pub mint: String,
    pub ui_amount: f64,
}

/// Builds a fresh balance from raw ledger records. Token output follows
/// registry order regardless of the order the ledger reported accounts in.
pub fn assemble_balance(lamports: u64, accounts: &[RawTokenAccount]) -> Balance {
    let tokens = KNOWN_TOKENS
        .iter()
        .filter_map(|token| {
            accounts
                .iter()
                .find(|account| account.mint == token.mint)
                .map(|account| TokenBalance {
                    symbol: token.symbol.to_owned(),
                    amount: account.ui_amount,
                    decimals: token.decimals,
                })
        })
        .collect();

    Balance {
        sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        tokens,
        stale: false,
    }
}

/// The best-effort fallback when a fetch fails: zeroed figures, flagged
/// stale so the view can note the failure without raising an error.
pub fn stale_balance() -> Balance {
    Balance {
        sol: 0.0,
        tokens: Vec::new(),
        stale: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lamports_convert_to_sol() {
        let balance = assemble_balance(1_500_000_000, &[]);
        assert_eq!(balance.sol, 1.5);
        assert!(!balance.stale);
    }

    #[test]
    fn unknown_mints_are_dropped() {
        let accounts = vec![
            RawTokenAccount {
                mint: "UnknownMint1111111111111111111111111111111".to_owned(),
                ui_amount: 42.0,
            },
            RawTokenAccount {
                mint: KNOWN_TOKENS[0].mint.to_owned(),
                ui_amount: 12.5,
            },
        ];
        let balance = assemble_balance(0, &accounts);
        assert_eq!(balance.tokens.len(), 1);
        assert_eq!(balance.tokens[0].symbol, "USDC");
        assert_eq!(balance.tokens[0].amount, 12.5);
        assert_eq!(balance.tokens[0].decimals, 6);
    }

    #[test]
    fn tokens_follow_registry_order() {
        let accounts = vec![
            RawTokenAccount {
                mint: KNOWN_TOKENS[1].mint.to_owned(),
                ui_amount: 3.0,
            },
            RawTokenAccount {
                mint: KNOWN_TOKENS[0].mint.to_owned(),
                ui_amount: 7.0,
            },
        ];
        let balance = assemble_balance(0, &accounts);
        let symbols: Vec<&str> = balance.tokens.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["USDC", "SANA"]);
    }

    #[test]
    fn stale_balance_is_zeroed() {
        let balance = stale_balance();
        assert_eq!(balance.sol, 0.0);
        assert!(balance.tokens.is_empty());
        assert!(balance.stale);
    }
}
