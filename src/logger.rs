//! Logging setup.

/// Init logging.
///
/// Logs at `info` level unless `RUST_LOG` says otherwise, `verbose` raises the default to `debug`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    std::env::set_var(
        "RUST_LOG",
        std::env::var("RUST_LOG").unwrap_or_else(|_| String::from(default_level)),
    );
    pretty_env_logger::init();
}
