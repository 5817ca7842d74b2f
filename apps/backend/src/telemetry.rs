use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter: keep the portal chatty, quieten the storage and HTTP
/// client crates. `RUST_LOG` overrides the whole thing.
const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn,redis=warn,reqwest=warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // One JSON object per line with event fields at the top level, for log
    // shippers that index flat documents.
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .json()
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
