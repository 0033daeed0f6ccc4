pub mod runner;

pub use runner::GameRunner;

/// Install the `env_logger` backend for the `log` facade.
///
/// Level comes from `RUST_LOG`, falling back to `default_level` when unset.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(default_level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
