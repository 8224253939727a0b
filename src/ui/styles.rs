use {
    crate::{
        data::ConnectionStatus,
        domain::VelocityTrend,
        ui::{
            UI_CONFIG, UI_TEXT,
            ui_text::{ICON_ACTIVITY, ICON_TREND_DOWN, ICON_TREND_UP},
        },
    },
    eframe::egui::{Color32, CornerRadius, Frame, Margin, RichText, Ui},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).strong().color(UI_CONFIG.colors.heading)
}

/// Green above zero, red below, grey for zero or unknown.
pub fn trend_color(change: Option<f64>) -> Color32 {
    match change {
        Some(v) if v > 0.0 => UI_CONFIG.colors.positive,
        Some(v) if v < 0.0 => UI_CONFIG.colors.negative,
        _ => UI_CONFIG.colors.neutral,
    }
}

/// Icon and colour for a velocity direction.
pub trait TrendGlyph {
    fn glyph(&self) -> &'static str;
    fn color(&self) -> Color32;
}

impl TrendGlyph for Option<VelocityTrend> {
    fn glyph(&self) -> &'static str {
        match self {
            Some(VelocityTrend::Increasing) => ICON_TREND_UP,
            Some(VelocityTrend::Decreasing) => ICON_TREND_DOWN,
            _ => ICON_ACTIVITY,
        }
    }

    fn color(&self) -> Color32 {
        match self {
            Some(VelocityTrend::Increasing) => UI_CONFIG.colors.positive,
            Some(VelocityTrend::Decreasing) => UI_CONFIG.colors.negative,
            _ => UI_CONFIG.colors.neutral,
        }
    }
}

pub trait ConnectionBadge {
    fn label(&self) -> &'static str;
    fn color(&self) -> Color32;
}

impl ConnectionBadge for ConnectionStatus {
    fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => &UI_TEXT.conn_live,
            ConnectionStatus::Connecting => &UI_TEXT.conn_connecting,
            ConnectionStatus::Disconnected => &UI_TEXT.conn_offline,
        }
    }

    fn color(&self) -> Color32 {
        match self {
            ConnectionStatus::Connected => UI_CONFIG.colors.positive,
            ConnectionStatus::Connecting => UI_CONFIG.colors.warning,
            ConnectionStatus::Disconnected => UI_CONFIG.colors.negative,
        }
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    /// Small pill with a tinted background, e.g. the velocity badge in list rows.
    fn badge(&mut self, text: impl Into<String>, color: Color32);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .small()
                .color(UI_CONFIG.colors.subdued),
        );
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0; // Tight spacing
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn badge(&mut self, text: impl Into<String>, color: Color32) {
        Frame::new()
            .fill(color.gamma_multiply(0.2))
            .corner_radius(CornerRadius::same(4))
            .inner_margin(Margin::symmetric(4, 1))
            .show(self, |ui| {
                ui.label(RichText::new(text).small().monospace().color(color));
            });
    }
}
