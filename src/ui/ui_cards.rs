use eframe::egui::{Align, Grid, Layout, RichText, Ui};

use crate::domain::Token;
use crate::models::MarketSummary;
use crate::ui::format::{
    format_currency, format_number, format_percent_change, format_velocity,
};
use crate::ui::styles::{TrendGlyph, UiStyleExt, trend_color};
use crate::ui::ui_text::ICON_DOT;
use crate::ui::{UI_CONFIG, UI_TEXT};

/// Four equal cards across the top of the dashboard.
pub fn render_overview_cards(ui: &mut Ui, summary: &MarketSummary) {
    let cards = [
        (
            UI_TEXT.card_total_tokens.as_str(),
            summary.token_count.to_string(),
        ),
        (
            UI_TEXT.card_avg_velocity.as_str(),
            format_velocity(Some(summary.average_velocity)),
        ),
        (
            UI_TEXT.card_total_market_cap.as_str(),
            format!("${}", format_number(Some(summary.total_market_cap))),
        ),
        (
            UI_TEXT.card_volume_24h.as_str(),
            format!("${}", format_number(Some(summary.total_volume_24h))),
        ),
    ];

    ui.columns(cards.len(), |columns| {
        for (col, (title, value)) in columns.iter_mut().zip(cards) {
            UI_CONFIG.card_frame().show(col, |ui| {
                ui.set_width(ui.available_width());
                ui.label_subdued(title);
                ui.label(
                    RichText::new(value)
                        .size(22.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
            });
        }
    });
}

/// Selected token: identity, price and the full metric grid.
pub fn render_token_detail(ui: &mut Ui, token: &Token, currency: &str, live: bool) {
    let quote = token.quote_or_empty(currency);

    UI_CONFIG.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new(&token.symbol)
                            .strong()
                            .color(UI_CONFIG.colors.heading),
                    );
                    if live {
                        ui.label(RichText::new(ICON_DOT).color(UI_CONFIG.colors.positive));
                    }
                });
                ui.label_subdued(token.name.as_str());
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.vertical(|ui| {
                    ui.with_layout(Layout::top_down(Align::Max), |ui| {
                        ui.label(
                            RichText::new(format_currency(quote.price))
                                .size(24.0)
                                .strong()
                                .color(UI_CONFIG.colors.heading),
                        );
                        ui.label(
                            RichText::new(format_percent_change(quote.percent_change_24h))
                                .color(trend_color(quote.percent_change_24h)),
                        );
                    });
                });
            });
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(6.0);

        let trend = quote.velocity_trend;
        let trend_text = match trend {
            Some(t) => format!("{} {}", trend.glyph(), t),
            None => trend.glyph().to_string(),
        };

        Grid::new("token_detail_grid")
            .num_columns(4)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.label_subdued(UI_TEXT.detail_market_cap.as_str());
                ui.label(format!("${}", format_number(quote.market_cap)));
                ui.label_subdued(UI_TEXT.detail_volume_24h.as_str());
                ui.label(format!("${}", format_number(quote.volume_24h)));
                ui.end_row();

                ui.label_subdued(UI_TEXT.detail_velocity.as_str());
                ui.label(
                    RichText::new(format_velocity(quote.velocity))
                        .monospace()
                        .color(UI_CONFIG.colors.accent),
                );
                ui.label_subdued(UI_TEXT.detail_trend.as_str());
                ui.label(RichText::new(trend_text).color(trend.color()));
                ui.end_row();

                ui.label_subdued(UI_TEXT.detail_change_24h.as_str());
                ui.label(
                    RichText::new(format_percent_change(quote.percent_change_24h))
                        .color(trend_color(quote.percent_change_24h)),
                );
                ui.label_subdued(UI_TEXT.detail_change_7d.as_str());
                ui.label(
                    RichText::new(format_percent_change(quote.percent_change_7d))
                        .color(trend_color(quote.percent_change_7d)),
                );
                ui.end_row();
            });
    });
}
