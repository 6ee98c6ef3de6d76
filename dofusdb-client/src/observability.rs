//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

/// Install a JSON fmt subscriber filtered by `config.log_level`
///
/// An invalid directive falls back to `info`. Does nothing if a global
/// subscriber is already installed.
pub fn init_tracing(config: &ClientConfig) {
    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            environment = ?config.environment,
            "Tracing initialized for dofusdb-client"
        );
    }
}
