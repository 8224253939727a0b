use eframe::egui::{
    Align, Button, CentralPanel, Context, Grid, Layout, Order, RichText, ScrollArea, SidePanel,
    TextEdit, TopBottomPanel, Ui, Window,
};
use strum::IntoEnumIterator;

use crate::app::App;
use crate::data::ConnectionStatus;
use crate::models::{MarketSummary, filter_tokens};
use crate::ui::shortcuts::Shortcut;
use crate::ui::styles::{ConnectionBadge, UiStyleExt};
use crate::ui::ui_cards::{render_overview_cards, render_token_detail};
use crate::ui::ui_panels::TokenListPanel;
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::utils::{format_duration, format_local_time};

impl App {
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.top_panel_frame();

        TopBottomPanel::top("header_panel")
            .frame(frame)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.heading(
                            RichText::new(&UI_TEXT.app_title)
                                .strong()
                                .color(UI_CONFIG.colors.heading),
                        );
                        ui.label_subdued(UI_TEXT.app_subtitle.as_str());
                    });

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let refresh =
                            ui.add_enabled(!self.loading, Button::new(UI_TEXT.btn_refresh.as_str()));
                        if refresh.clicked() {
                            self.request_refresh();
                        }
                        if self.loading {
                            ui.spinner();
                        }

                        ui.separator();
                        ui.label(
                            RichText::new(self.connection.label())
                                .strong()
                                .color(self.connection.color()),
                        );

                        if let Some(ts) = self.store.last_update().or(self.last_fetch) {
                            ui.separator();
                            ui.label(
                                RichText::new(format_local_time(ts))
                                    .monospace()
                                    .color(UI_CONFIG.colors.label),
                            );
                            ui.label_subdued(UI_TEXT.label_last_update.as_str());
                        }
                    });
                });
            });
    }

    pub(crate) fn render_overview_panel(&mut self, ctx: &Context) {
        let summary = MarketSummary::from_tokens(self.store.tokens(), self.store.currency());

        TopBottomPanel::top("overview_panel")
            .frame(UI_CONFIG.central_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                render_overview_cards(ui, &summary);
            });
    }

    pub(crate) fn render_left_panel(&mut self, ctx: &Context) {
        SidePanel::left("token_list_panel")
            .default_width(UI_CONFIG.left_panel_width)
            .min_width(260.0)
            .resizable(true)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                ui.label_subheader(UI_TEXT.list_heading.as_str());
                ui.add_space(4.0);
                ui.add(
                    TextEdit::singleline(&mut self.search_term)
                        .hint_text(UI_TEXT.search_hint.as_str())
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);

                let clicked = {
                    let filtered = filter_tokens(self.store.tokens(), &self.search_term);
                    TokenListPanel::new(&filtered, self.store.selected_id(), self.store.currency())
                        .scroll_to_selected(self.scroll_to_selected)
                        .render(ui, !self.store.is_empty())
                };
                self.scroll_to_selected = false;

                if let Some(token_id) = clicked {
                    self.select_token(token_id);
                }
            });
    }

    pub(crate) fn render_central_panel(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                let live = self.connection == ConnectionStatus::Connected;
                let currency = self.store.currency();

                let Some(token) = self.store.selected() else {
                    let subtitle = match (&self.last_error, self.store.is_empty()) {
                        (Some(err), true) => err.as_str(),
                        (None, true) => UI_TEXT.list_empty.as_str(),
                        _ => "",
                    };
                    render_fullscreen_message(ui, &UI_TEXT.detail_select_prompt, subtitle);
                    return;
                };

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        render_token_detail(ui, token, currency, live);
                        ui.add_space(12.0);
                        self.velocity_chart.show(ui, token, currency);
                    });
            });
    }

    pub(crate) fn render_status_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.bottom_panel_frame();
        TopBottomPanel::bottom("status_panel")
            .frame(frame)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    self.render_status_counts(ui);
                    ui.separator();

                    ui.label(
                        RichText::new(self.connection.label())
                            .small()
                            .color(self.connection.color()),
                    );
                    ui.separator();

                    let every = format_duration(self.settings.refresh_interval.as_millis() as i64);
                    ui.metric(&UI_TEXT.status_refresh_every, &every, UI_CONFIG.colors.label);

                    self.render_status_errors(ui);
                });
            });
    }

    fn render_status_counts(&self, ui: &mut Ui) {
        let shown = filter_tokens(self.store.tokens(), &self.search_term).len();
        let counts = format!("{}/{} {}", shown, self.store.len(), UI_TEXT.status_tokens);
        ui.metric(&UI_TEXT.status_showing, &counts, UI_CONFIG.colors.label);
    }

    fn render_status_errors(&self, ui: &mut Ui) {
        if let Some(err) = &self.last_error {
            ui.separator();
            ui.label(
                RichText::new(format!("{} {}", UI_TEXT.status_fetch_failed, err))
                    .small()
                    .color(UI_CONFIG.colors.negative),
            );
        }
        if let Some(err) = &self.push_error {
            ui.separator();
            ui.label(
                RichText::new(format!("{} {}", UI_TEXT.status_push_error, err))
                    .small()
                    .color(UI_CONFIG.colors.warning),
            );
        }
    }

    pub(crate) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.kbs_name_long.as_str())
            .open(&mut self.show_help)
            .resizable(false)
            // The plot repaints on Order::Foreground, so sit above it.
            .order(Order::Tooltip)
            .collapsible(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label_subdued(UI_TEXT.kbs_heading.as_str());
                ui.add_space(10.0);

                Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for shortcut in Shortcut::iter() {
                            ui.label(RichText::new(shortcut.key_label()).monospace().strong());
                            ui.label(shortcut.description());
                            ui.end_row();
                        }
                    });
            });
    }
}

fn render_fullscreen_message(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new(title).color(UI_CONFIG.colors.subdued));
        if !subtitle.is_empty() {
            ui.add_space(6.0);
            ui.label(RichText::new(subtitle).color(UI_CONFIG.colors.label));
        }
    });
}
