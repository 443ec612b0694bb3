//! Logger setup based on `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, events from `bin_name` and the
/// Roomcast crates are shown at `default_level` and everything else at `info`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    // crate targets use underscores even when the binary name uses hyphens
    let bin_target = bin_name.replace('-', "_");
    format!(
        "info,{bin_target}={default_level},roomcast_server={default_level},tower_http={default_level}"
    )
}
