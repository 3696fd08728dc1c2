//! Provisioning walkthrough.
//!
//! Replays the lab sequence against one device: recreate it, fetch host
//! keys, sync-from, then create / re-address / delete a loopback, listing
//! state after every change. By default a failed step is reported and the
//! run continues; `--strict` stops at the first failure. Losing the
//! connection ends the run either way.

use nso_api::{NewDevice, NewLoopback, RestconfClient, RestconfResponse};
use tracing::{info, warn};

use crate::cli::{DemoArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{loopbacks, util};

struct Walkthrough<'a> {
    client: &'a RestconfClient,
    args: &'a DemoArgs,
    global: &'a GlobalOpts,
    color: bool,
    failed: Vec<&'static str>,
}

impl Walkthrough<'_> {
    fn say(&self, line: &str) {
        output::print_output(line, self.global.quiet);
    }

    fn status(&self, resp: &RestconfResponse) -> String {
        output::status(resp.status().as_u16(), resp.is_success(), self.color)
    }

    /// Print `<label> ... response: <status>` and apply the failure policy.
    fn step(
        &mut self,
        step: &'static str,
        label: &str,
        resp: &RestconfResponse,
    ) -> Result<(), CliError> {
        self.say(&format!("\n{label} ... response: {}", self.status(resp)));
        if resp.is_success() {
            return Ok(());
        }
        warn!(step, status = resp.status().as_u16(), "step failed");
        if self.args.strict {
            return util::require_success(step, resp);
        }
        self.failed.push(step);
        Ok(())
    }

    /// Like [`step`](Self::step) for actions, which report success in the
    /// body even on HTTP 200.
    fn operation(
        &mut self,
        step: &'static str,
        label: &str,
        resp: &RestconfResponse,
    ) -> Result<(), CliError> {
        if !resp.is_success() {
            return self.step(step, label, resp);
        }

        let status = self.status(resp);
        match resp.operation_output() {
            Ok(out) => {
                let mut line =
                    format!("\n{label} ... response: {status} ... result: {}", out.result);
                if let Some(ref info) = out.info {
                    line.push_str(&format!(" ({info})"));
                }
                self.say(&line);
                if out.succeeded() {
                    return Ok(());
                }
                warn!(step, result = %out.result, "operation reported failure");
                if self.args.strict {
                    return Err(CliError::OperationFailed {
                        action: step.into(),
                        result: out.result.to_string(),
                        info: out.info.unwrap_or_default(),
                    });
                }
            }
            Err(e) => {
                self.say(&format!("\n{label} ... response: {status} ... result: <unreadable>"));
                warn!(step, error = %e, "could not read operation result");
                if self.args.strict {
                    return Err(e.into());
                }
            }
        }
        self.failed.push(step);
        Ok(())
    }

    /// A list call that failed for any reason other than reaching NSO at
    /// all counts as a failed step outside `--strict`.
    fn list_failed(&mut self, step: &'static str, err: nso_api::Error) -> Result<(), CliError> {
        if self.args.strict || matches!(err, nso_api::Error::Transport(_)) {
            return Err(err.into());
        }
        self.say(&format!("{step} failed: {err}"));
        warn!(step, error = %err, "list failed");
        self.failed.push(step);
        Ok(())
    }

    /// Print the device names. A failed list reads as no devices.
    async fn show_devices(&mut self, heading: &str) -> Result<Vec<String>, CliError> {
        match self.client.list_devices().await {
            Ok(names) => {
                self.say(&format!("{heading}: {names:?}"));
                Ok(names)
            }
            Err(e) => {
                self.list_failed("list devices", e)?;
                Ok(Vec::new())
            }
        }
    }

    async fn show_loopbacks(&mut self) -> Result<(), CliError> {
        self.say("\nRetrieving device loopbacks ...");
        match self.client.list_loopbacks(&self.args.device).await {
            Ok(list) => {
                self.say(&loopbacks::render(&self.global.output_format(), &list));
                Ok(())
            }
            Err(e) => self.list_failed("list loopbacks", e),
        }
    }

    async fn run(&mut self) -> Result<(), CliError> {
        let client = self.client;
        let args = self.args;
        let device = NewDevice {
            name: args.device.clone(),
            address: args.address.clone(),
            port: args.ssh_port,
            authgroup: args.authgroup.clone(),
            ned: args.ned.clone(),
        };
        let loopback = NewLoopback {
            name: args.loopback.clone(),
            address: args.ip.clone(),
            mask: args.mask.clone(),
        };

        // 1. Start from a clean slate.
        let existing = self.show_devices("Initial device list").await?;
        if existing.contains(&device.name) {
            let resp = client.delete_device(&device.name).await?;
            self.step(
                "delete device",
                &format!("Device {} already exists, deleting device", device.name),
                &resp,
            )?;
            self.show_devices("Updated device list").await?;
        }

        // 2. Register the device.
        let resp = client.create_device(&device).await?;
        self.step(
            "create device",
            &format!("Creating new device {}", device.name),
            &resp,
        )?;
        self.show_devices("Updated device list").await?;

        // 3. Device actions.
        let resp = client.fetch_ssh_host_keys(&device.name).await?;
        self.operation("fetch SSH host keys", "Fetching SSH host keys", &resp)?;

        let resp = client.sync_from(&device.name).await?;
        self.operation("sync from device", "Sync from device", &resp)?;

        self.show_loopbacks().await?;

        // 4. Loopback lifecycle.
        let resp = client.create_loopback(&device.name, &loopback).await?;
        self.step(
            "create loopback",
            &format!("Creating new Loopback{}", loopback.name),
            &resp,
        )?;
        self.show_loopbacks().await?;

        let resp = client
            .update_loopback_ip(&device.name, &loopback.name, &args.new_ip)
            .await?;
        self.step(
            "update loopback address",
            &format!("Updating Loopback{} address to {}", loopback.name, args.new_ip),
            &resp,
        )?;
        self.show_loopbacks().await?;

        let resp = client.delete_loopback(&device.name, &loopback.name).await?;
        self.step(
            "delete loopback",
            &format!("Deleting Loopback{}", loopback.name),
            &resp,
        )?;
        self.show_loopbacks().await?;

        Ok(())
    }
}

pub async fn handle(
    client: &RestconfClient,
    args: DemoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    info!(device = %args.device, strict = args.strict, "starting walkthrough");

    let mut walk = Walkthrough {
        client,
        args: &args,
        global,
        color: output::should_color(&global.color),
        failed: Vec::new(),
    };
    walk.run().await?;

    if walk.failed.is_empty() {
        info!("walkthrough completed");
    } else if !global.quiet {
        eprintln!(
            "\nCompleted with {} failed step(s): {}",
            walk.failed.len(),
            walk.failed.join(", ")
        );
    }
    Ok(())
}
