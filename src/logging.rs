use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise warnings only, plus `debug` for
/// this crate when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_directives = if verbose { "warn,mobiflow=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        );

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
