//! Wallet overview: balance cards with per-wallet hide toggles, and a detail sheet
//! listing searchable transactions.

use crate::format::{mask_with, MASK_GLYPH, MASK_MIN_WIDTH};
use crate::types::{DebitCredit, TransactionRecord, Wallet};
use std::collections::HashMap;

/// State of the wallet overview screen.
#[derive(Debug, Clone)]
pub struct WalletBoard {
    wallets: Vec<Wallet>,
    transactions: Vec<TransactionRecord>,
    visibility: HashMap<u32, bool>,
    details: Option<u32>,
    details_visible: bool,
    search: String,
    direction: Option<DebitCredit>,
    mask_glyph: char,
    mask_min_width: usize,
}

impl WalletBoard {
    /// All balances start visible.
    pub fn new(wallets: Vec<Wallet>, transactions: Vec<TransactionRecord>) -> Self {
        let visibility = wallets.iter().map(|w| (w.id, true)).collect();
        Self {
            wallets,
            transactions,
            visibility,
            details: None,
            details_visible: true,
            search: String::new(),
            direction: None,
            mask_glyph: MASK_GLYPH,
            mask_min_width: MASK_MIN_WIDTH,
        }
    }

    /// Use a different masking glyph and minimum masked width.
    pub fn with_mask(mut self, glyph: char, min_width: usize) -> Self {
        self.mask_glyph = glyph;
        self.mask_min_width = min_width;
        self
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn wallet(&self, wallet_id: u32) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == wallet_id)
    }

    /// Flip a card between showing and hiding its balance. Returns the new visibility.
    pub fn toggle_visibility(&mut self, wallet_id: u32) -> Option<bool> {
        let visible = self.visibility.get_mut(&wallet_id)?;
        *visible = !*visible;
        Some(*visible)
    }

    pub fn is_visible(&self, wallet_id: u32) -> Option<bool> {
        self.visibility.get(&wallet_id).copied()
    }

    /// Balance text for a card: the raw balance, or its masked form when hidden.
    pub fn balance_text(&self, wallet_id: u32) -> Option<String> {
        let wallet = self.wallet(wallet_id)?;
        let visible = self.is_visible(wallet_id).unwrap_or(true);
        Some(self.render(&wallet.amount, visible))
    }

    /// Open the detail sheet for a wallet. Unknown ids are ignored.
    pub fn open_details(&mut self, wallet_id: u32) -> bool {
        if self.wallet(wallet_id).is_none() {
            return false;
        }
        self.details = Some(wallet_id);
        true
    }

    /// Close the detail sheet. Its balance becomes visible again and the search is cleared.
    pub fn close_details(&mut self) {
        self.details = None;
        self.details_visible = true;
        self.search.clear();
    }

    pub fn details_wallet(&self) -> Option<&Wallet> {
        self.details.and_then(|id| self.wallet(id))
    }

    /// The sheet has its own hide toggle, independent of the cards.
    pub fn toggle_details_visibility(&mut self) -> bool {
        self.details_visible = !self.details_visible;
        self.details_visible
    }

    pub fn details_visible(&self) -> bool {
        self.details_visible
    }

    pub fn details_balance_text(&self) -> Option<String> {
        let wallet = self.details_wallet()?;
        Some(self.render(&wallet.amount, self.details_visible))
    }

    /// `Hide Balance` / `Show Balance` button label for the sheet.
    pub fn details_toggle_label(&self) -> &'static str {
        if self.details_visible {
            "Hide Balance"
        } else {
            "Show Balance"
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Only list debits or credits; `None` lists both.
    pub fn set_direction_filter(&mut self, direction: Option<DebitCredit>) {
        self.direction = direction;
    }

    /// Transactions whose title contains the search query, ignoring case, and that
    /// match the direction filter.
    pub fn filtered_transactions(&self) -> Vec<&TransactionRecord> {
        let query = self.search.to_lowercase();
        self.transactions
            .iter()
            .filter(|tx| self.direction.is_none() || self.direction == Some(tx.debit_credit))
            .filter(|tx| tx.title.to_lowercase().contains(&query))
            .collect()
    }

    fn render(&self, amount: &str, visible: bool) -> String {
        if visible {
            amount.to_string()
        } else {
            mask_with(amount, self.mask_glyph, self.mask_min_width)
        }
    }
}
