//! Tracing setup. Logs go to stderr so they never interleave with the
//! status line or JSON on stdout.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: warnings from our crates, or
/// debug with `--verbose`.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "wagedoro=debug,wagedoro_core=debug"
    } else {
        "wagedoro=warn,wagedoro_core=warn"
    }
}

/// `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_our_crates() {
        assert_eq!(default_directives(false), "wagedoro=warn,wagedoro_core=warn");
        assert_eq!(default_directives(true), "wagedoro=debug,wagedoro_core=debug");
        assert!(default_directives(false).parse::<EnvFilter>().is_ok());
    }
}
