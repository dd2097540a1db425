//! Conversion screen state.
//!
//! The screen owns a canonical amount and the input ("from") currency. Every user
//! action goes through [`reduce`], a pure transition, and the rendered strings are
//! derived from the resulting state by [`ConversionSession::view`].

use crate::amount::{is_submittable, normalize};
use crate::conversion::{convert, ExchangeRate};
use crate::error::{Error, Result};
use crate::format::{display, rate_caption};
use crate::types::{Currency, CurrencyPair, Direction};
use log::debug;
use serde::Serialize;

/// User actions on the conversion screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// New content of the amount text field, as typed or pasted.
    Input(String),
    /// A single key press appended to the current amount.
    Keystroke(char),
    /// Delete the last character of the amount.
    Backspace,
    /// Swap input and output currencies. Clears the amount.
    Swap,
    /// Clear the amount.
    Reset,
}

/// Where the amount entry stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryState {
    /// Nothing entered.
    Empty,
    /// Something entered, but it is zero or a bare separator.
    Entering,
    /// A positive amount; submit is enabled.
    Valid,
}

impl EntryState {
    pub fn of(amount: &str) -> Self {
        if amount.is_empty() {
            EntryState::Empty
        } else if is_submittable(amount) {
            EntryState::Valid
        } else {
            EntryState::Entering
        }
    }
}

/// Canonical amount plus input currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub amount: String,
    pub from: Currency,
}

impl SessionState {
    pub fn new(from: Currency) -> Self {
        Self {
            amount: String::new(),
            from,
        }
    }
}

/// Apply one action to a state. `from` is swapped within `pair`.
pub fn reduce(state: SessionState, action: &SessionAction, pair: CurrencyPair) -> SessionState {
    match action {
        SessionAction::Input(text) => SessionState {
            amount: normalize(text),
            ..state
        },
        SessionAction::Keystroke(key) => {
            let mut raw = state.amount;
            raw.push(*key);
            SessionState {
                amount: normalize(&raw),
                from: state.from,
            }
        }
        SessionAction::Backspace => {
            let mut amount = state.amount;
            amount.pop();
            SessionState {
                amount,
                from: state.from,
            }
        }
        SessionAction::Swap => SessionState {
            amount: String::new(),
            from: pair.counterpart(state.from).unwrap_or(pair.base),
        },
        SessionAction::Reset => SessionState::new(state.from),
    }
}

/// Everything the conversion screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub from_symbol: &'static str,
    pub to_symbol: &'static str,
    /// Canonical amount, echoed into the editable field.
    pub amount: String,
    /// Grouped input amount, empty when nothing is entered.
    pub display: String,
    /// Grouped converted amount with two decimals, without symbol.
    pub converted: String,
    pub can_submit: bool,
    pub state: EntryState,
    pub send_label: String,
    pub rate_caption: String,
    pub fee_label: String,
}

/// A conversion screen session.
#[derive(Debug, Clone)]
pub struct ConversionSession {
    rate: ExchangeRate,
    state: SessionState,
}

impl ConversionSession {
    /// Start a session with `from` as the input currency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCurrency`] if `from` is not part of the rate's pair.
    pub fn new(rate: ExchangeRate, from: Currency) -> Result<Self> {
        if !rate.pair().contains(from) {
            return Err(Error::InvalidCurrency(format!(
                "{} is not part of {}/{}",
                from,
                rate.pair().base,
                rate.pair().quote
            )));
        }
        Ok(Self {
            rate,
            state: SessionState::new(from),
        })
    }

    pub fn apply(&mut self, action: SessionAction) {
        let previous = self.state.clone();
        self.state = reduce(previous, &action, self.rate.pair());
        debug!(
            "{:?} -> amount={:?} from={} state={:?}",
            action,
            self.state.amount,
            self.state.from,
            self.state()
        );
    }

    /// Feed a string one key at a time.
    pub fn type_keys(&mut self, keys: &str) {
        for key in keys.chars() {
            self.apply(SessionAction::Keystroke(key));
        }
    }

    pub fn amount(&self) -> &str {
        &self.state.amount
    }

    pub fn from(&self) -> Currency {
        self.state.from
    }

    pub fn to(&self) -> Currency {
        self.rate
            .pair()
            .counterpart(self.state.from)
            .unwrap_or(self.rate.pair().quote)
    }

    pub fn rate(&self) -> &ExchangeRate {
        &self.rate
    }

    pub fn direction(&self) -> Direction {
        self.rate.pair().direction_from(self.state.from)
    }

    pub fn state(&self) -> EntryState {
        EntryState::of(&self.state.amount)
    }

    pub fn can_submit(&self) -> bool {
        self.state() == EntryState::Valid
    }

    /// Converted amount, grouped, two decimals.
    pub fn converted(&self) -> String {
        display(&convert(&self.state.amount, self.direction(), &self.rate))
    }

    pub fn view(&self) -> SessionView {
        let from = self.from();
        let to = self.to();
        let shown = display(&self.state.amount);
        let send_label = format!(
            "Send {}{}",
            from.symbol(),
            if shown.is_empty() { "0.00" } else { shown.as_str() }
        );

        SessionView {
            from_currency: from,
            to_currency: to,
            from_symbol: from.symbol(),
            to_symbol: to.symbol(),
            amount: self.state.amount.clone(),
            display: shown,
            converted: self.converted(),
            can_submit: self.can_submit(),
            state: self.state(),
            send_label,
            rate_caption: rate_caption(&self.rate),
            fee_label: format!("Fee: {}0.00 (Free)", from.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> ConversionSession {
        ConversionSession::new(ExchangeRate::default(), Currency::Cad).unwrap()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = session();
        assert_eq!(session.amount(), "");
        assert_eq!(session.state(), EntryState::Empty);
        assert!(!session.can_submit());
        assert_eq!(session.to(), Currency::Ngn);
        assert_eq!(session.view().send_label, "Send $0.00");
        assert_eq!(session.view().converted, "0.00");
    }

    #[test]
    fn test_quote_side_can_start_as_input() {
        let pair = CurrencyPair::new(Currency::Ngn, Currency::Cad).unwrap();
        let rate = ExchangeRate::from_f64(pair, 0.5).unwrap();
        let mut session = ConversionSession::new(rate, Currency::Cad).unwrap();
        assert_eq!(session.direction(), Direction::QuoteToBase);
        session.apply(SessionAction::Input("3".into()));
        assert_eq!(session.view().converted, "6.00");
    }

    #[test]
    fn test_entering_amount_end_to_end() {
        let mut session = session();
        session.apply(SessionAction::Input("1200.567".into()));

        let view = session.view();
        assert_eq!(view.amount, "1200.56");
        assert_eq!(view.display, "1,200.56");
        assert_eq!(view.converted, "1,476,688.80");
        assert!(view.can_submit);
        assert_eq!(view.state, EntryState::Valid);
        assert_eq!(view.send_label, "Send $1,200.56");
        assert_eq!(view.to_symbol, "₦");
        assert_eq!(view.rate_caption, "~ 1 CAD = 1,230.00 NGN");
        assert_eq!(view.fee_label, "Fee: $0.00 (Free)");
    }

    #[test]
    fn test_keystrokes_match_field_input() {
        let mut typed = session();
        typed.type_keys("1200.567");
        assert_eq!(typed.amount(), "1200.56");

        typed.apply(SessionAction::Backspace);
        assert_eq!(typed.amount(), "1200.5");
    }

    #[test]
    fn test_state_progression() {
        let mut session = session();
        session.apply(SessionAction::Keystroke('0'));
        assert_eq!(session.state(), EntryState::Entering);
        session.apply(SessionAction::Keystroke('.'));
        assert_eq!(session.state(), EntryState::Entering);
        session.apply(SessionAction::Keystroke('5'));
        assert_eq!(session.state(), EntryState::Valid);
        session.apply(SessionAction::Reset);
        assert_eq!(session.state(), EntryState::Empty);
        assert_eq!(session.from(), Currency::Cad);
    }

    #[test]
    fn test_swap_mid_entry_resets_amount() {
        let mut session = session();
        session.apply(SessionAction::Input("1,200".into()));
        assert!(session.can_submit());

        session.apply(SessionAction::Swap);
        let view = session.view();
        assert_eq!(view.amount, "");
        assert_eq!(view.display, "");
        assert!(!view.can_submit);
        assert_eq!(view.from_currency, Currency::Ngn);
        assert_eq!(view.to_currency, Currency::Cad);
        assert_eq!(view.send_label, "Send ₦0.00");
    }

    #[test]
    fn test_reverse_direction_divides() {
        let mut session = session();
        session.apply(SessionAction::Swap);
        assert_eq!(session.direction(), Direction::QuoteToBase);
        session.apply(SessionAction::Input("₦1,230".into()));
        assert_eq!(session.view().converted, "1.00");
        session.apply(SessionAction::Input("2460000".into()));
        assert_eq!(session.view().converted, "2,000.00");
    }

    #[test]
    fn test_zero_amount_cannot_submit() {
        let mut session = session();
        session.apply(SessionAction::Input("0.00".into()));
        assert_eq!(session.view().display, "0.00");
        assert_eq!(session.view().converted, "0.00");
        assert!(!session.can_submit());
    }

    #[test]
    fn test_very_long_amount_is_valid() {
        let mut session = session();
        session.apply(SessionAction::Input("1".repeat(30)));
        assert_eq!(session.state(), EntryState::Valid);
        assert!(session.can_submit());
        assert_eq!(
            session.converted(),
            "136,666,666,666,666,660,189,382,822,068,224.00"
        );
    }

    #[test]
    fn test_reduce_is_pure() {
        let pair = CurrencyPair::default();
        let start = SessionState::new(Currency::Cad);
        let next = reduce(start.clone(), &SessionAction::Input("42".into()), pair);
        assert_eq!(start.amount, "");
        assert_eq!(next.amount, "42");
        let swapped = reduce(next, &SessionAction::Swap, pair);
        assert_eq!(swapped, SessionState::new(Currency::Ngn));
    }
}
