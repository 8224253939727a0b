// src/app/state.rs

use std::time::Instant;

#[derive(Clone)]
pub(crate) struct RunningState;

pub(crate) enum AppState {
    Bootstrapping(BootstrapState),
    Running(RunningState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Bootstrapping(BootstrapState::default())
    }
}

/// Waiting for the first token list to arrive.
#[derive(Clone)]
pub(crate) struct BootstrapState {
    pub(crate) started: Instant,
}

impl Default for BootstrapState {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}
