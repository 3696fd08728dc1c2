//! Device command handlers.

use nso_api::{NewDevice, RestconfClient};
use tabled::Tabled;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &RestconfClient,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let names = client.list_devices().await?;
            let out = output::render_list(
                &global.output_format(),
                &names,
                |n| DeviceRow { name: n.clone() },
                Clone::clone,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Create {
            name,
            address,
            ssh_port,
            authgroup,
            ned,
        } => {
            let device = NewDevice {
                name,
                address,
                port: ssh_port,
                authgroup,
                ned,
            };
            let resp = client.create_device(&device).await?;
            util::announce(&format!("Creating device {}", device.name), &resp, global);
            util::require_success("Create device", &resp)
        }

        DevicesCommand::Delete { name } => {
            let resp = client.delete_device(&name).await?;
            util::announce(&format!("Deleting device {name}"), &resp, global);
            util::require_found("Delete device", &resp, "device", &name, "devices list")
        }

        DevicesCommand::FetchHostKeys { name } => {
            let resp = client.fetch_ssh_host_keys(&name).await?;
            util::announce(&format!("Fetching SSH host keys for {name}"), &resp, global);
            let out = util::require_operation("Fetch SSH host keys", &resp)?;
            let rendered = output::render_single(
                &global.output_format(),
                &out,
                util::operation_detail,
                |o| o.result.to_string(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        DevicesCommand::SyncFrom { name } => {
            let resp = client.sync_from(&name).await?;
            util::announce(&format!("Sync from {name}"), &resp, global);
            let out = util::require_operation("Sync from device", &resp)?;
            let rendered = output::render_single(
                &global.output_format(),
                &out,
                util::operation_detail,
                |o| o.result.to_string(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}
