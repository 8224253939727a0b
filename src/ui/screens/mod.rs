mod bootstrap;

pub(crate) use bootstrap::render_bootstrap;
