// src/logging.rs
// =============================================================================
// Sets up `tracing` output.
//
// Log lines go to stderr so stdout stays clean for the summary (and for
// --json output). Verbosity comes from RUST_LOG, e.g.
//   RUST_LOG=debug img-mirror
//   RUST_LOG=img_mirror=debug,reqwest=warn img-mirror
// and defaults to "info".
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
