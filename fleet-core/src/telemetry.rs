use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::LogLevel;

/// Installs the global tracing subscriber for a binary.
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
pub fn init_tracer(log_level: &LogLevel, service_name: &'static str) {
    let level = tracing::Level::from(log_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    match result {
        Ok(()) => tracing::info!(service = service_name, "tracing initialised"),
        Err(e) => eprintln!("tracing was already initialised for {service_name}: {e}"),
    }
}
