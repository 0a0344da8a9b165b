//! Logging setup
//!
//! The library logs through the `log` facade; binaries call [`init`] once at
//! startup to route records to the environment-configured logger.

/// Initialize the logging system
///
/// Reads the usual `RUST_LOG` filter from the environment. Call at most
/// once per process.
pub fn init() {
    env_logger::init();
}
