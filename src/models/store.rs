use chrono::{DateTime, Local};

#[cfg(debug_assertions)]
use crate::config::DF;
use crate::domain::{MarketUpdate, Token, TokenId, TokenUpdate};

/// Selection before and after a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<TokenId>,
    pub current: Option<TokenId>,
}

/// The dashboard's view of the market: the token list, which token is
/// selected, and when live data last arrived.
///
/// Selection is held by id and resolved against the list on every read, so
/// a pushed update to the selected token shows up in the detail view.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    currency: String,
    tokens: Vec<Token>,
    selected: Option<TokenId>,
    last_update: Option<DateTime<Local>>,
}

impl TokenStore {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }

    /// Selection to keep if it turns up in the first loaded list.
    pub fn with_selection(mut self, token_id: Option<TokenId>) -> Self {
        self.selected = token_id;
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Replace the whole list. Keeps the selection if that token is still
    /// listed, else falls back to the first token (or none for an empty list).
    pub fn replace_all(&mut self, tokens: Vec<Token>) -> Option<SelectionChange> {
        self.tokens = tokens;
        let previous = self.selected;
        let still_listed = previous.is_some_and(|id| self.position(id).is_some());
        if !still_listed {
            self.selected = self.tokens.first().map(|t| t.id);
        }
        self.change_from(previous)
    }

    /// Merge a `token_update` into the matching token's quote.
    ///
    /// `last_update` is stamped even when the token is not in the list.
    /// Returns whether a listed token changed.
    pub fn apply_update(&mut self, update: &TokenUpdate) -> bool {
        self.last_update = Some(Local::now());
        let Some(idx) = self.position(update.token_id) else {
            return false;
        };
        let currency = self.currency.clone();
        let quote = self.tokens[idx].quote_in_mut(&currency);
        match quote.merge(&update.data) {
            Ok(()) => {
                #[cfg(debug_assertions)]
                if DF.log_store_merges {
                    log::info!(
                        "Merged {} field(s) into token {}",
                        update.data.len(),
                        update.token_id
                    );
                }
                true
            }
            Err(e) => {
                log::warn!(
                    "⚠️ Rejected update for token {}: {}",
                    update.token_id,
                    e
                );
                false
            }
        }
    }

    /// Apply every tick of a `market_update`; returns how many listed tokens changed.
    pub fn apply_market_update(&mut self, update: &MarketUpdate) -> usize {
        self.last_update = Some(Local::now());
        let currency = self.currency.clone();
        let mut changed = 0;
        for tick in &update.tokens {
            let Some(idx) = self.position(tick.id) else {
                continue;
            };
            let patch = tick.as_patch();
            if patch.is_empty() {
                continue;
            }
            match self.tokens[idx].quote_in_mut(&currency).merge(&patch) {
                Ok(()) => changed += 1,
                Err(e) => log::warn!("⚠️ Rejected market tick for token {}: {}", tick.id, e),
            }
        }
        #[cfg(debug_assertions)]
        if DF.log_store_merges {
            log::info!(
                "Market update touched {}/{} token(s)",
                changed,
                update.tokens.len()
            );
        }
        changed
    }

    /// Select a listed token. Unknown ids are ignored.
    pub fn select(&mut self, token_id: TokenId) -> Option<SelectionChange> {
        self.position(token_id)?;
        let previous = self.selected;
        self.selected = Some(token_id);
        self.change_from(previous)
    }

    /// Move the selection `step` rows within `visible` (no wrap-around).
    ///
    /// With nothing visible selected, a forward step lands on the first row
    /// and a backward step on the last.
    pub fn select_relative(
        &mut self,
        visible: &[TokenId],
        step: isize,
    ) -> Option<SelectionChange> {
        if visible.is_empty() || step == 0 {
            return None;
        }
        let current = self
            .selected
            .and_then(|id| visible.iter().position(|&v| v == id));
        let target = match current {
            Some(idx) => idx
                .saturating_add_signed(step)
                .min(visible.len() - 1),
            None if step > 0 => 0,
            None => visible.len() - 1,
        };
        self.select(visible[target])
    }

    pub fn selected_id(&self) -> Option<TokenId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Token> {
        self.selected
            .and_then(|id| self.position(id))
            .map(|idx| &self.tokens[idx])
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    fn position(&self, token_id: TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == token_id)
    }

    fn change_from(&self, previous: Option<TokenId>) -> Option<SelectionChange> {
        if previous == self.selected {
            return None;
        }
        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!("Selection {:?} -> {:?}", previous, self.selected);
        }
        Some(SelectionChange {
            previous,
            current: self.selected,
        })
    }
}
