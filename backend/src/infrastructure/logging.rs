use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Level comes from `RUST_LOG` (default `warn`). Logs go to stderr so they
/// never interleave with menu output on stdout.
pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init() {
    tracing::debug!(error = %err, "tracing subscriber already installed");
  }
}
