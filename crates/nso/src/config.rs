//! CLI configuration: a thin wrapper around `nso_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --port, --username, --password, --timeout).

use clap::ValueEnum;
use secrecy::SecretString;

use nso_config::{Config, Connection, Overrides};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use nso_config::load_config_or_default;

/// Translate global flags into the override layer.
fn overrides(global: &GlobalOpts) -> Overrides {
    Overrides {
        host: global.host.clone(),
        port: global.port,
        username: global.username.clone(),
        password: global.password.clone().map(SecretString::from),
        timeout: global.timeout,
    }
}

/// Resolve the connection for this invocation: flags > env > profile > defaults.
pub fn resolve_connection(global: &GlobalOpts, cfg: &Config) -> Result<Connection, CliError> {
    let profile_name = nso_config::active_profile_name(global.profile.as_deref(), cfg);
    Ok(nso_config::resolve_connection(
        cfg,
        &profile_name,
        global.profile.is_some(),
        &overrides(global),
    )?)
}

/// Output format: `--output` / `NSO_OUTPUT`, else `[defaults] output` from
/// the config file, else table.
pub fn resolve_output(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    if let Some(ref format) = global.output {
        return Ok(format.clone());
    }
    <OutputFormat as ValueEnum>::from_str(&cfg.defaults.output, true).map_err(|reason| {
        CliError::Validation {
            field: "defaults.output".into(),
            reason,
        }
    })
}
