use tracing_subscriber::EnvFilter;

/// Filter used when neither `CLAUDE_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

fn resolve_env_filter() -> EnvFilter {
    if let Ok(level) = std::env::var("CLAUDE_LOG")
        && let Ok(filter) = EnvFilter::try_new(level)
    {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr log subscriber.
///
/// Environment variables:
/// - `CLAUDE_LOG`: level/filter override (`info`, `claude=debug`, etc.).
/// - `RUST_LOG`: consulted when `CLAUDE_LOG` is unset or invalid.
///
/// Logs never go to stdout, which carries the completion. Calling this more
/// than once is a no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
