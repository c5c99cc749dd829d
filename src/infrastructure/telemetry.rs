// Logging setup
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never interleave with the rendered dashboard on stdout
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
