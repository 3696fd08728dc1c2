//! Loopback interface command handlers.

use nso_api::{Loopback, NewLoopback, RestconfClient};
use tabled::Tabled;

use crate::cli::{GlobalOpts, LoopbacksArgs, LoopbacksCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct LoopbackRow {
    #[tabled(rename = "Interface")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Mask")]
    mask: String,
}

impl From<&Loopback> for LoopbackRow {
    fn from(l: &Loopback) -> Self {
        Self {
            name: format!("Loopback{}", l.name),
            address: l.primary_address().unwrap_or("-").to_owned(),
            mask: l.primary_mask().unwrap_or("-").to_owned(),
        }
    }
}

/// Render a loopback list in the chosen format.
pub(crate) fn render(format: &OutputFormat, loopbacks: &[Loopback]) -> String {
    output::render_list(format, loopbacks, |l| LoopbackRow::from(l), |l| l.name.clone())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &RestconfClient,
    args: LoopbacksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LoopbacksCommand::List { device } => {
            let loopbacks = client.list_loopbacks(&device).await?;
            output::print_output(&render(&global.output_format(), &loopbacks), global.quiet);
            Ok(())
        }

        LoopbacksCommand::Create {
            device,
            name,
            ip,
            mask,
        } => {
            let loopback = NewLoopback {
                name,
                address: ip,
                mask,
            };
            let resp = client.create_loopback(&device, &loopback).await?;
            util::announce(
                &format!("Creating Loopback{} on {device}", loopback.name),
                &resp,
                global,
            );
            util::require_success("Create loopback", &resp)
        }

        LoopbacksCommand::SetIp { device, name, ip } => {
            let resp = client.update_loopback_ip(&device, &name, &ip).await?;
            util::announce(
                &format!("Setting Loopback{name} on {device} to {ip}"),
                &resp,
                global,
            );
            util::require_found(
                "Update loopback address",
                &resp,
                "loopback",
                &name,
                &format!("loopbacks list {device}"),
            )
        }

        LoopbacksCommand::Delete { device, name } => {
            let resp = client.delete_loopback(&device, &name).await?;
            util::announce(
                &format!("Deleting Loopback{name} on {device}"),
                &resp,
                global,
            );
            util::require_found(
                "Delete loopback",
                &resp,
                "loopback",
                &name,
                &format!("loopbacks list {device}"),
            )
        }
    }
}
