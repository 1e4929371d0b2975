use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default directive when neither `RUST_LOG` nor `--log` / `TRAIN_LOG` is set.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Install the global subscriber. `RUST_LOG` wins over `configured`.
pub fn init(configured: Option<&str>) {
    let fallback = configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_FILTER);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
