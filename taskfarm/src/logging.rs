//! Diagnostic tracing for the farming client.
//!
//! Reports go to stdout through `render`; everything here goes to stderr and
//! is controlled by `RUST_LOG`. What each level shows:
//!
//! - `warn` (default): refused starts and claims, tasks skipped for an
//!   unrecognized status, and duplicate or empty catalog ids.
//! - `info`: session acquired, each claimed task, farming restarts, game
//!   rounds and the end-of-run outcome count.
//! - `debug`: every HTTP response with its status and size, each visited task
//!   with its depth, status and required action, and 4xx refusal bodies.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "warn";

/// Build the filter for a raw `RUST_LOG` value.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the stderr subscriber.
///
/// ```bash
/// RUST_LOG=taskfarm::run=debug,taskfarm::io::http=debug taskfarm claim
/// ```
pub fn init() {
    let raw = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(filter_from(raw.as_deref()))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn unset_filter_shows_refusals_only() {
        assert_eq!(filter_from(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn module_directive_raises_verbosity() {
        let filter = filter_from(Some("taskfarm::run=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn bad_directive_falls_back_to_warn() {
        let filter = filter_from(Some("taskfarm=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
