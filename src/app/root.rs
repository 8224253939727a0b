use {
    chrono::{DateTime, Local},
    eframe::{
        Frame, Storage,
        egui::{Context, Visuals},
    },
    serde::{Deserialize, Serialize},
    std::{iter, mem},
    strum::IntoEnumIterator,
};

#[cfg(debug_assertions)]
use crate::config::DF;
use crate::{
    app::{AppState, BootstrapState, PhaseView},
    config::DashboardSettings,
    data::{ConnectionStatus, DashboardSync, SyncEvent, SyncHandle},
    domain::TokenId,
    models::{TokenStore, filter_tokens},
    ui::{Shortcut, UI_CONFIG, VelocityChart},
};

#[derive(Deserialize, Serialize, Default)]
#[serde(default)]
pub struct App {
    pub(crate) search_term: String,
    pub(crate) persisted_selection: Option<TokenId>,
    pub(crate) show_help: bool,
    #[serde(skip)]
    pub(crate) settings: DashboardSettings,
    #[serde(skip)]
    pub(crate) store: TokenStore,
    #[serde(skip)]
    pub(crate) sync: Option<SyncHandle>,
    #[serde(skip)]
    pub(crate) connection: ConnectionStatus,
    #[serde(skip)]
    pub(crate) loading: bool,
    #[serde(skip)]
    pub(crate) has_loaded: bool,
    #[serde(skip)]
    pub(crate) last_error: Option<String>,
    #[serde(skip)]
    pub(crate) push_error: Option<String>,
    #[serde(skip)]
    pub(crate) last_fetch: Option<DateTime<Local>>,
    #[serde(skip)]
    pub(crate) velocity_chart: VelocityChart,
    /// Token the push channel was last asked to follow.
    #[serde(skip)]
    pub(crate) subscribed: Option<TokenId>,
    #[serde(skip)]
    pub(crate) scroll_to_selected: bool,
    #[serde(skip)]
    state: AppState,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, settings: DashboardSettings) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.store =
            TokenStore::new(settings.currency.clone()).with_selection(app.persisted_selection);
        app.sync = Some(DashboardSync::spawn(
            settings.clone(),
            Some(cc.egui_ctx.clone()),
        ));
        app.settings = settings;
        app.state = AppState::Bootstrapping(BootstrapState::default());
        app
    }

    /// Drain everything the background thread sent since the last frame.
    pub(crate) fn process_sync_events(&mut self) {
        let events: Vec<SyncEvent> = match &self.sync {
            Some(sync) => iter::from_fn(|| sync.try_recv()).collect(),
            None => return,
        };
        for event in events {
            self.apply_sync_event(event);
        }
    }

    pub(crate) fn apply_sync_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::FetchStarted => self.loading = true,
            SyncEvent::TokensLoaded(tokens) => {
                self.loading = false;
                self.has_loaded = true;
                self.last_error = None;
                self.last_fetch = Some(Local::now());
                if let Some(_change) = self.store.replace_all(tokens) {
                    #[cfg(debug_assertions)]
                    if DF.log_selection {
                        log::info!(
                            "Selection moved from {:?} to {:?} after refresh",
                            _change.previous,
                            _change.current
                        );
                    }
                    self.scroll_to_selected = true;
                }
            }
            SyncEvent::FetchFailed(err) => {
                self.loading = false;
                self.has_loaded = true;
                self.last_error = Some(err);
            }
            SyncEvent::Connection(status) => {
                if status == ConnectionStatus::Connected {
                    self.push_error = None;
                }
                self.connection = status;
            }
            SyncEvent::TokenUpdate(update) => {
                self.store.apply_update(&update);
            }
            SyncEvent::MarketUpdate(update) => {
                self.store.apply_market_update(&update);
            }
            SyncEvent::ServerError(err) => {
                log::warn!("Push server reported: {}", err);
                self.push_error = Some(err);
            }
        }
    }

    /// Keep the push subscription on the selected token.
    pub(crate) fn sync_subscription(&mut self) {
        let current = self.store.selected_id();
        if current == self.subscribed {
            return;
        }
        let Some(sync) = &self.sync else {
            return;
        };
        if let Some(previous) = self.subscribed {
            sync.unsubscribe(previous);
        }
        if let Some(token_id) = current {
            sync.subscribe(token_id);
        }
        #[cfg(debug_assertions)]
        if DF.log_subscriptions {
            log::info!(
                "Push subscription moved from {:?} to {:?}",
                self.subscribed,
                current
            );
        }
        self.subscribed = current;
    }

    pub(crate) fn request_refresh(&mut self) {
        if let Some(sync) = &self.sync {
            if !sync.refresh() {
                log::warn!("Refresh requested but the sync thread has stopped.");
            }
        }
    }

    pub(crate) fn select_token(&mut self, token_id: TokenId) {
        if let Some(_change) = self.store.select(token_id) {
            #[cfg(debug_assertions)]
            if DF.log_selection {
                log::info!("Selected token {:?}", _change.current);
            }
        }
    }

    /// Move the selection within what the search currently shows.
    pub(crate) fn step_selection(&mut self, step: isize) {
        let visible: Vec<TokenId> = filter_tokens(self.store.tokens(), &self.search_term)
            .iter()
            .map(|t| t.id)
            .collect();
        if self.store.select_relative(&visible, step).is_some() {
            self.scroll_to_selected = true;
        }
    }

    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            // If the user typing in text box, don't trigger global hotkeys.
            return;
        }

        let pressed: Vec<Shortcut> = ctx.input(|i| {
            Shortcut::iter()
                .filter(|shortcut| i.key_pressed(shortcut.key()))
                .collect()
        });
        for shortcut in pressed {
            self.run_shortcut(shortcut);
        }
    }

    pub(crate) fn run_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Refresh => self.request_refresh(),
            Shortcut::ClearSearch => {
                self.search_term.clear();
                self.show_help = false;
            }
            Shortcut::SelectPrevious => self.step_selection(-1),
            Shortcut::SelectNext => self.step_selection(1),
            Shortcut::ToggleHelp => self.show_help = !self.show_help,
        }
    }

    fn shutdown_sync(&mut self) {
        if let Some(sync) = &mut self.sync {
            sync.shutdown();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown_sync();
        }
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Bootstrapping(mut s) => s.tick(self, ctx),
            AppState::Running(mut s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        // Before the first load the store only holds the restored id.
        self.persisted_selection = self.store.selected_id();
        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!(
                "💾 SAVE [App]: persisted selection = {:?}",
                self.persisted_selection
            );
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.selection.bg_fill = UI_CONFIG.colors.row_selected;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
