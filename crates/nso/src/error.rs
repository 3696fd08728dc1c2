//! CLI error types with miette diagnostics.
//!
//! Maps `nso_api::Error` and `nso_config::ConfigError` into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use nso_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to NSO at {url}")]
    #[diagnostic(
        code(nso::connection_failed),
        help(
            "Check that NSO is running and its RESTCONF listener is enabled.\n\
             URL: {url}\n\
             Try: nso --host <HOST> --port <PORT> devices list"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to NSO timed out")]
    #[diagnostic(
        code(nso::timeout),
        help("Increase timeout with --timeout or check NSO responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(nso::auth_failed),
        help("Verify the username and password (--username / --password or NSO_PASSWORD).")
    )]
    AuthFailed,

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(nso::no_credentials),
        help(
            "Pass --password, set NSO_PASSWORD, or add `password_env` to the profile.\n\
             Config file: {path}"
        )
    )]
    NoCredentials { profile: String, path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(nso::not_found),
        help("Run: nso {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{action} failed (HTTP {status})")]
    #[diagnostic(code(nso::api_error), help("Response body:\n{body}"))]
    ApiError {
        action: String,
        status: u16,
        body: String,
    },

    #[error("{action} did not succeed: result={result}")]
    #[diagnostic(code(nso::operation_failed), help("{info}"))]
    OperationFailed {
        action: String,
        result: String,
        info: String,
    },

    #[error("Unexpected response schema from {endpoint}: {message}")]
    #[diagnostic(
        code(nso::unexpected_schema),
        help("The NSO version or NED may not match the expected YANG model.")
    )]
    UnexpectedSchema { endpoint: String, message: String },

    #[error("Could not decode response: {message}")]
    #[diagnostic(code(nso::decode))]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nso::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(code(nso::profile_not_found), help("Available profiles: {available}"))]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(nso::config))]
    Config(Box<figment::Error>),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── nso_api::Error → CliError mapping ───────────────────────────────

impl From<nso_api::Error> for CliError {
    fn from(err: nso_api::Error) -> Self {
        if err.is_unauthorized() {
            return CliError::AuthFailed;
        }
        if err.is_timeout() {
            return CliError::Timeout;
        }

        match err {
            nso_api::Error::Transport(e) => CliError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            nso_api::Error::InvalidUrl(e) => CliError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            nso_api::Error::Status { status, body } => CliError::ApiError {
                action: "Request".into(),
                status,
                body,
            },
            nso_api::Error::UnexpectedSchema {
                endpoint, message, ..
            } => CliError::UnexpectedSchema {
                endpoint: endpoint.into(),
                message,
            },
            nso_api::Error::Deserialization { message, .. } => CliError::Decode { message },
            nso_api::Error::Serialization(e) => CliError::Decode {
                message: e.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ──────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials {
                profile,
                path: nso_config::config_path().display().to_string(),
            },
            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Figment(e) => CliError::Config(e),
        }
    }
}
