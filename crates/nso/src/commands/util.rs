//! Shared helpers for command handlers.

use nso_api::{OperationOutput, RestconfResponse};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Turn a non-2xx response into an `ApiError`, or `AuthFailed` for a 401.
pub fn require_success(action: &str, resp: &RestconfResponse) -> Result<(), CliError> {
    if resp.is_success() {
        return Ok(());
    }
    if resp.status().as_u16() == 401 {
        return Err(CliError::AuthFailed);
    }
    Err(CliError::ApiError {
        action: action.into(),
        status: resp.status().as_u16(),
        body: resp.body().trim().to_owned(),
    })
}

/// Like [`require_success`], but a 404 means the named resource is missing.
pub fn require_found(
    action: &str,
    resp: &RestconfResponse,
    resource_type: &str,
    identifier: &str,
    list_command: &str,
) -> Result<(), CliError> {
    if resp.status().as_u16() == 404 {
        return Err(CliError::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        });
    }
    require_success(action, resp)
}

/// Require a successful action response and decode its `result`.
pub fn require_operation(
    action: &str,
    resp: &RestconfResponse,
) -> Result<OperationOutput, CliError> {
    require_success(action, resp)?;
    let out = resp.operation_output()?;
    if !out.succeeded() {
        return Err(CliError::OperationFailed {
            action: action.into(),
            result: out.result.to_string(),
            info: out.info.unwrap_or_default(),
        });
    }
    Ok(out)
}

/// `response: 201` to stderr, unless quiet.
pub fn announce(message: &str, resp: &RestconfResponse, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    let color = output::should_color(&global.color);
    eprintln!(
        "{message} ... response: {}",
        output::status(resp.status().as_u16(), resp.is_success(), color)
    );
}

/// One-line human summary of an action result.
pub fn operation_detail(out: &OperationOutput) -> String {
    match out.info {
        Some(ref info) => format!("result: {}\ninfo:   {info}", out.result),
        None => format!("result: {}", out.result),
    }
}
