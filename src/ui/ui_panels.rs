use eframe::egui::{Align, Layout, RichText, ScrollArea, Sense, Ui};

use crate::domain::{Token, TokenId};
use crate::ui::format::{format_currency, format_percent_change, format_velocity};
use crate::ui::styles::{TrendGlyph, UiStyleExt, trend_color};
use crate::ui::{UI_CONFIG, UI_TEXT};

/// Scrollable token list. Rows show symbol, name, price, 24h change,
/// a velocity badge and the trend glyph.
pub struct TokenListPanel<'a> {
    tokens: &'a [&'a Token],
    selected: Option<TokenId>,
    currency: &'a str,
    scroll_to_selected: bool,
}

impl<'a> TokenListPanel<'a> {
    pub fn new(tokens: &'a [&'a Token], selected: Option<TokenId>, currency: &'a str) -> Self {
        Self {
            tokens,
            selected,
            currency,
            scroll_to_selected: false,
        }
    }

    pub fn scroll_to_selected(mut self, scroll: bool) -> Self {
        self.scroll_to_selected = scroll;
        self
    }

    /// Returns the id of a clicked row.
    pub fn render(&self, ui: &mut Ui, has_any_tokens: bool) -> Option<TokenId> {
        if self.tokens.is_empty() {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                let msg = if has_any_tokens {
                    &UI_TEXT.list_no_match
                } else {
                    &UI_TEXT.list_empty
                };
                ui.label_subdued(msg.as_str());
            });
            return None;
        }

        let mut clicked = None;
        ScrollArea::vertical()
            .id_salt("token_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for token in self.tokens {
                    if let Some(id) = self.render_row(ui, token) {
                        clicked = Some(id);
                    }
                    ui.add_space(2.0);
                }
            });
        clicked
    }

    fn render_row(&self, ui: &mut Ui, token: &Token) -> Option<TokenId> {
        let is_selected = self.selected == Some(token.id);
        let quote = token.quote_or_empty(self.currency);

        // Hover state from the previous frame drives the fill.
        let row_id = ui.make_persistent_id(("token_row", token.id));
        let was_hovered = ui.data(|d| d.get_temp::<bool>(row_id).unwrap_or(false));

        let inner = UI_CONFIG
            .row_frame(is_selected, was_hovered)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&token.symbol).strong().color(UI_CONFIG.colors.heading));
                        ui.label_subdued(token.name.as_str());
                    });
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let trend = quote.velocity_trend;
                        ui.label(RichText::new(trend.glyph()).color(trend.color()));
                        ui.badge(format_velocity(quote.velocity), UI_CONFIG.colors.accent);
                        ui.vertical(|ui| {
                            ui.with_layout(Layout::top_down(Align::Max), |ui| {
                                ui.label(RichText::new(format_currency(quote.price)).monospace());
                                ui.label(
                                    RichText::new(format_percent_change(quote.percent_change_24h))
                                        .small()
                                        .color(trend_color(quote.percent_change_24h)),
                                );
                            });
                        });
                    });
                });
            });

        let response = inner.response.interact(Sense::click());
        let hovered = response.hovered();
        if hovered != was_hovered {
            ui.data_mut(|d| d.insert_temp(row_id, hovered));
        }
        if is_selected && self.scroll_to_selected {
            response.scroll_to_me(Some(Align::Center));
        }
        response.clicked().then_some(token.id)
    }
}
