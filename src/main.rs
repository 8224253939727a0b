#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use {
    clap::Parser,
    eframe::{NativeOptions, egui::ViewportBuilder},
    log::LevelFilter,
    std::{backtrace::Backtrace, panic, path::PathBuf},
    token_metrics::{Cli, PERSISTENCE, run_app},
};

const WINDOW_TITLE: &str = "Token Metrics Dashboard";

/// Crate logs at Info in debug builds; dependencies stay at Warn. `RUST_LOG` overrides both.
fn init_logging() {
    let (deps, ours) = if cfg!(debug_assertions) {
        (LevelFilter::Warn, LevelFilter::Info)
    } else {
        (LevelFilter::Error, LevelFilter::Error)
    };

    env_logger::Builder::new()
        .filter(None, deps)
        .filter(Some("token_metrics"), ours)
        .parse_default_env()
        .init();
}

fn main() -> eframe::Result {
    panic::set_hook(Box::new(|info| {
        log::error!(
            "Dashboard panicked: {}\nBacktrace:\n{}",
            info,
            Backtrace::force_capture()
        );
    }));
    init_logging();

    let cli = Cli::parse();
    let viewport = ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([1280.0, 820.0])
        .with_min_inner_size([900.0, 600.0]);
    let options = NativeOptions {
        viewport,
        persistence_path: Some(PathBuf::from(PERSISTENCE.app.state_path)),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(run_app(cc, cli)))),
    )
}
