use eframe::egui::Context;

use crate::app::{
    App,
    phases::PhaseView,
    state::{AppState, RunningState},
};

impl PhaseView for RunningState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.process_sync_events();
        app.sync_subscription();
        app.handle_global_shortcuts(ctx);

        // Panel order matters to egui: top and bottom bars, then the side list,
        // then the central view takes what is left.
        app.render_top_panel(ctx);
        app.render_overview_panel(ctx);
        app.render_status_panel(ctx);
        app.render_left_panel(ctx);
        app.render_central_panel(ctx);
        app.render_help_panel(ctx);

        AppState::Running(RunningState)
    }
}
