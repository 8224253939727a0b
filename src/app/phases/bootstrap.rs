use std::time::Duration;

use eframe::egui::Context;

use crate::app::{
    App,
    phases::PhaseView,
    state::{AppState, BootstrapState, RunningState},
};
use crate::ui::render_bootstrap;

impl PhaseView for BootstrapState {
    /// Loading screen until the first fetch reports back, good or bad.
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.process_sync_events();
        if app.has_loaded {
            log::info!(
                "First fetch finished after {:?}; showing dashboard.",
                self.started.elapsed()
            );
            ctx.request_repaint();
            return AppState::Running(RunningState);
        }

        render_bootstrap(ctx, self);
        // Keeps the elapsed counter ticking; sync events wake us sooner.
        ctx.request_repaint_after(Duration::from_secs(1));
        AppState::Bootstrapping(self.clone())
    }
}
