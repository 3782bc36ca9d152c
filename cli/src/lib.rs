pub mod bookmarks;
pub mod render;

pub use bookmarks::Cli;
pub use bookmarks::run;

use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `BOOKMARKY_LOG` (default `warn`).
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("BOOKMARKY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
