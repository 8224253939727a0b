use eframe::egui::Key;
use strum_macros::EnumIter;

/// Global keyboard shortcuts, in the order the help window lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub(crate) enum Shortcut {
    Refresh,
    ClearSearch,
    SelectPrevious,
    SelectNext,
    ToggleHelp,
}

impl Shortcut {
    pub(crate) fn key(self) -> Key {
        match self {
            Self::Refresh => Key::R,
            Self::ClearSearch => Key::Escape,
            Self::SelectPrevious => Key::ArrowUp,
            Self::SelectNext => Key::ArrowDown,
            Self::ToggleHelp => Key::H,
        }
    }

    pub(crate) fn key_label(self) -> &'static str {
        match self {
            Self::Refresh => "R",
            Self::ClearSearch => "ESC",
            Self::SelectPrevious => "\u{2191}",
            Self::SelectNext => "\u{2193}",
            Self::ToggleHelp => "H",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            Self::Refresh => "Refresh token list now",
            Self::ClearSearch => "Clear search and close help",
            Self::SelectPrevious => "Select previous token in the list",
            Self::SelectNext => "Select next token in the list",
            Self::ToggleHelp => "Toggle this help panel",
        }
    }
}
