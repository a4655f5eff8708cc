use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "focuswell_core=info,focuswell=info";
const VERBOSE_FILTER: &str = "focuswell_core=debug,focuswell=debug";

/// Install the stderr subscriber. Stdout is reserved for session output.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
