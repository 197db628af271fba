//! Tracing subscriber setup for the `callgraph` binary.

use std::sync::Once;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
///
/// The filter is read from `CALLGRAPH_LOG` and falls back to `callgraph=info`.
/// Output goes to stderr so it never mixes with piped results.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CALLGRAPH_LOG")
            .unwrap_or_else(|_| EnvFilter::new("callgraph=info"));

        // A host application may already own the global subscriber
        if let Err(e) = install_subscriber(filter) {
            tracing::debug!("Keeping the existing tracing subscriber: {}", e);
        }
    });
}

fn install_subscriber(filter: EnvFilter) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init()
}
