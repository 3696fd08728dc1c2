// Loopback interface endpoints
//
// Loopbacks live in the device's NED config subtree:
// `/data/tailf-ncs:devices/device={device}/config/tailf-ned-cisco-ios:interface`.

use tracing::debug;

use crate::client::{RestconfClient, RestconfResponse};
use crate::error::Error;
use crate::models::{AddressPatch, IOS_NED_MODULE, Loopback, LoopbackEnvelope, NewLoopback};

/// Device-relative path of the IOS interface container.
fn interface_path(device: &str) -> String {
    format!("tailf-ncs:devices/device={device}/config/{IOS_NED_MODULE}:interface")
}

impl RestconfClient {
    /// List every loopback interface configured on a device.
    ///
    /// `GET .../config/tailf-ned-cisco-ios:interface/Loopback`. A device
    /// with no loopbacks yields an empty list.
    pub async fn list_loopbacks(&self, device: &str) -> Result<Vec<Loopback>, Error> {
        let url = self.data_url(&format!("{}/Loopback", interface_path(device)))?;
        debug!(device, "listing loopbacks");
        let list: Option<LoopbackEnvelope<Vec<Loopback>>> =
            self.fetch("loopback list", url).await?;
        Ok(list.map(|l| l.loopback).unwrap_or_default())
    }

    /// Create a loopback with a primary IPv4 address.
    ///
    /// `POST .../config/tailf-ned-cisco-ios:interface`
    pub async fn create_loopback(
        &self,
        device: &str,
        loopback: &NewLoopback,
    ) -> Result<RestconfResponse, Error> {
        let url = self.data_url(&interface_path(device))?;
        debug!(device, loopback = %loopback.name, address = %loopback.address, "creating loopback");
        let body = LoopbackEnvelope {
            loopback: Loopback::from(loopback),
        };
        self.post(url, &body).await
    }

    /// Replace a loopback's primary address, keeping its mask.
    ///
    /// `PATCH .../interface/Loopback={loopback}/ip/address/primary/address`
    pub async fn update_loopback_ip(
        &self,
        device: &str,
        loopback: &str,
        ip: &str,
    ) -> Result<RestconfResponse, Error> {
        let url = self.data_url(&format!(
            "{}/Loopback={loopback}/ip/address/primary/address",
            interface_path(device)
        ))?;
        debug!(device, loopback, ip, "updating loopback address");
        self.patch(url, &AddressPatch { address: ip }).await
    }

    /// Delete a loopback interface.
    ///
    /// `DELETE .../interface/Loopback={loopback}`
    pub async fn delete_loopback(
        &self,
        device: &str,
        loopback: &str,
    ) -> Result<RestconfResponse, Error> {
        let url = self.data_url(&format!("{}/Loopback={loopback}", interface_path(device)))?;
        debug!(device, loopback, "deleting loopback");
        self.delete(url).await
    }
}
