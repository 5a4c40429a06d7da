//! Log output on stderr
//!
//! `RUST_LOG` takes precedence. Without it, `--debug` selects debug output and
//! only warnings are shown otherwise.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default level when `RUST_LOG` is not set
pub fn default_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Installs the global subscriber; later calls are ignored
pub fn init(debug: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(debug).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
