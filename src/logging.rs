//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Log level for the `verbose` flag: DEBUG when set, INFO otherwise.
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install a stderr fmt layer. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(verbose: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(Targets::new().with_default(level_for(verbose)));
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
