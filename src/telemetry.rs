//! Tracing setup for applications embedding the sync core.

/// Install a fmt subscriber with an env-filter. `RUST_LOG` wins; the default
/// keeps this crate at debug and everything else at info.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsdeck=debug,info".parse().expect("valid env filter")),
        )
        .init();
}
