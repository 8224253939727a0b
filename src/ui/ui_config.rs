use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subdued: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card: Color32,
    pub card_border: Color32,
    pub row_selected: Color32,
    pub row_hover: Color32,

    pub positive: Color32,
    pub negative: Color32,
    pub neutral: Color32,
    pub accent: Color32,
    pub warning: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub left_panel_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(203, 213, 225),
        heading: Color32::WHITE,
        subdued: Color32::from_rgb(148, 163, 184),
        central_panel: Color32::from_rgb(15, 23, 42),
        side_panel: Color32::from_rgb(17, 24, 39),
        card: Color32::from_rgb(30, 41, 59),
        card_border: Color32::from_rgb(51, 65, 85),
        row_selected: Color32::from_rgb(30, 58, 138),
        row_hover: Color32::from_rgb(39, 51, 71),

        positive: Color32::from_rgb(34, 197, 94), // Green
        negative: Color32::from_rgb(239, 68, 68), // Red
        neutral: Color32::GRAY,
        accent: Color32::from_rgb(59, 130, 246), // Blue
        warning: Color32::from_rgb(234, 179, 8),
    },
    left_panel_width: 340.0,
};

impl UiConfig {
    /// Frame for Left/Right panels (Standard padding)
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(12, 8),
            ..Default::default()
        }
    }

    /// Frame for Bottom Status bar (Tighter vertical padding)
    pub fn bottom_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(8, 4),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(12),
            ..Default::default()
        }
    }

    /// Rounded card used by the overview metrics and the detail view.
    pub fn card_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card,
            stroke: Stroke::new(1.0, self.colors.card_border),
            inner_margin: Margin::same(12),
            corner_radius: CornerRadius::same(8),
            ..Default::default()
        }
    }

    /// One row of the token list.
    pub fn row_frame(&self, selected: bool, hovered: bool) -> Frame {
        let fill = if selected {
            self.colors.row_selected
        } else if hovered {
            self.colors.row_hover
        } else {
            Color32::TRANSPARENT
        };
        let stroke = if selected {
            Stroke::new(1.0, self.colors.accent)
        } else {
            Stroke::NONE
        };
        Frame {
            fill,
            stroke,
            inner_margin: Margin::symmetric(8, 6),
            corner_radius: CornerRadius::same(6),
            ..Default::default()
        }
    }
}
