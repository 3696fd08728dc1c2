//! Command dispatch: bridges CLI args to RESTCONF calls and output formatting.

pub mod demo;
pub mod devices;
pub mod loopbacks;
pub mod util;

use nso_api::RestconfClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &RestconfClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(client, args, global).await,
        Command::Loopbacks(args) => loopbacks::handle(client, args, global).await,
        Command::Demo(args) => demo::handle(client, args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
