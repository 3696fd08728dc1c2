// Device endpoints
//
// The `tailf-ncs:devices/device` list (read, create, delete) plus the two
// device actions the provisioning flow needs: SSH host-key fetch and
// sync-from.

use tracing::debug;

use crate::client::{RestconfClient, RestconfResponse};
use crate::error::Error;
use crate::models::{DeviceEnvelope, DeviceList, NewDevice};

impl RestconfClient {
    /// List the names of all managed devices, in the order NSO returns them.
    ///
    /// `GET /data/tailf-ncs:devices/device?depth=1`
    pub async fn list_devices(&self) -> Result<Vec<String>, Error> {
        let url = self.data_url("tailf-ncs:devices/device?depth=1")?;
        debug!("listing devices");
        let list: Option<DeviceList> = self.fetch("device list", url).await?;
        Ok(list
            .map(|l| l.devices.into_iter().map(|d| d.name).collect())
            .unwrap_or_default())
    }

    /// Remove a device from NSO's device tree.
    ///
    /// `DELETE /data/tailf-ncs:devices/device={name}`
    pub async fn delete_device(&self, name: &str) -> Result<RestconfResponse, Error> {
        let url = self.data_url(&format!("tailf-ncs:devices/device={name}"))?;
        debug!(name, "deleting device");
        self.delete(url).await
    }

    /// Register a new device, administratively unlocked.
    ///
    /// `POST /data/tailf-ncs:devices`. NSO answers 409 if the name exists.
    pub async fn create_device(&self, device: &NewDevice) -> Result<RestconfResponse, Error> {
        let url = self.data_url("tailf-ncs:devices")?;
        debug!(name = %device.name, address = %device.address, ned_id = %device.ned_id(), "creating device");
        self.post(url, &DeviceEnvelope::from(device)).await
    }

    /// Ask NSO to fetch the device's SSH host keys.
    ///
    /// `POST /operations/devices/device={name}/ssh/fetch-host-keys`.
    /// HTTP 200 only means the action ran; check
    /// [`RestconfResponse::operation_output`] for the result.
    pub async fn fetch_ssh_host_keys(&self, name: &str) -> Result<RestconfResponse, Error> {
        let url = self.operations_url(&format!("devices/device={name}/ssh/fetch-host-keys"))?;
        debug!(name, "fetching SSH host keys");
        self.invoke(url).await
    }

    /// Pull the device's running config into NSO's CDB.
    ///
    /// `POST /operations/devices/device={name}/sync-from`. Same caveat as
    /// [`fetch_ssh_host_keys`](Self::fetch_ssh_host_keys).
    pub async fn sync_from(&self, name: &str) -> Result<RestconfResponse, Error> {
        let url = self.operations_url(&format!("devices/device={name}/sync-from"))?;
        debug!(name, "syncing config from device");
        self.invoke(url).await
    }
}
