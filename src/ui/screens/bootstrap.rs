use {
    crate::{
        app::BootstrapState,
        ui::{UI_CONFIG, UI_TEXT},
        utils::format_duration,
    },
    eframe::egui::{CentralPanel, Context, RichText},
};

pub(crate) fn render_bootstrap(ctx: &Context, state: &BootstrapState) {
    CentralPanel::default()
        .frame(UI_CONFIG.central_panel_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading(
                    RichText::new(&UI_TEXT.ls_title)
                        .size(24.0)
                        .strong()
                        .color(UI_CONFIG.colors.accent),
                );
                ui.add_space(20.0);
                ui.spinner();
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&UI_TEXT.ls_loading)
                        .italics()
                        .color(UI_CONFIG.colors.subdued),
                );
                ui.add_space(20.0);
                let elapsed = state.started.elapsed().as_millis() as i64;
                ui.label(
                    RichText::new(format_duration(elapsed))
                        .small()
                        .monospace()
                        .color(UI_CONFIG.colors.subdued),
                );
            });
        });
}
