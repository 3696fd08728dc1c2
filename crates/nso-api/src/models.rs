// RESTCONF payload and response schemas
//
// Explicit shapes for every body the client sends or reads, keyed by the
// module-qualified JSON member names NSO uses (`tailf-ncs:...`,
// `tailf-ned-cisco-ios:...`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// YANG module prefix of the Cisco IOS CLI NED.
pub const IOS_NED_MODULE: &str = "tailf-ned-cisco-ios";

// ── Devices ─────────────────────────────────────────────────────────

/// Parameters for registering a new managed device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub address: String,
    /// SSH port of the device.
    pub port: u16,
    pub authgroup: String,
    /// NED package name, e.g. `cisco-ios-cli-3.8`.
    pub ned: String,
}

impl NewDevice {
    /// NSO's ned-id identity: `{ned}:{ned}`.
    pub fn ned_id(&self) -> String {
        format!("{0}:{0}", self.ned)
    }
}

/// `{"tailf-ncs:device": {...}}`
#[derive(Debug, Serialize)]
pub(crate) struct DeviceEnvelope<'a> {
    #[serde(rename = "tailf-ncs:device")]
    pub device: DeviceBody<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeviceBody<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub port: u16,
    pub authgroup: &'a str,
    #[serde(rename = "device-type")]
    pub device_type: DeviceType,
    pub state: DeviceState,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeviceType {
    pub cli: CliNed,
}

#[derive(Debug, Serialize)]
pub(crate) struct CliNed {
    #[serde(rename = "ned-id")]
    pub ned_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeviceState {
    #[serde(rename = "admin-state")]
    pub admin_state: &'static str,
}

impl<'a> From<&'a NewDevice> for DeviceEnvelope<'a> {
    fn from(d: &'a NewDevice) -> Self {
        Self {
            device: DeviceBody {
                name: &d.name,
                address: &d.address,
                port: d.port,
                authgroup: &d.authgroup,
                device_type: DeviceType {
                    cli: CliNed { ned_id: d.ned_id() },
                },
                state: DeviceState {
                    admin_state: "unlocked",
                },
            },
        }
    }
}

/// `GET .../device?depth=1` response.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceList {
    #[serde(rename = "tailf-ncs:device")]
    pub devices: Vec<DeviceSummary>,
}

/// One entry of the depth-limited device listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceSummary {
    pub name: String,
}

// ── Loopback interfaces ─────────────────────────────────────────────

/// Parameters for creating a loopback interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoopback {
    /// Interface number, e.g. `"50"` for `Loopback50`.
    pub name: String,
    pub address: String,
    pub mask: String,
}

/// A `tailf-ned-cisco-ios:Loopback` list entry.
///
/// Only the primary address is modelled; any other configuration on the
/// interface is carried through untouched in `extra`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Loopback {
    #[serde(deserialize_with = "string_or_number")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<InterfaceIp>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InterfaceIp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<IpAddressConfig>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct IpAddressConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<PrimaryAddress>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PrimaryAddress {
    pub address: String,
    pub mask: String,
}

impl Loopback {
    pub fn primary(&self) -> Option<&PrimaryAddress> {
        self.ip.as_ref()?.address.as_ref()?.primary.as_ref()
    }

    pub fn primary_address(&self) -> Option<&str> {
        self.primary().map(|p| p.address.as_str())
    }

    pub fn primary_mask(&self) -> Option<&str> {
        self.primary().map(|p| p.mask.as_str())
    }
}

impl From<&NewLoopback> for Loopback {
    fn from(l: &NewLoopback) -> Self {
        Self {
            name: l.name.clone(),
            ip: Some(InterfaceIp {
                address: Some(IpAddressConfig {
                    primary: Some(PrimaryAddress {
                        address: l.address.clone(),
                        mask: l.mask.clone(),
                    }),
                    extra: serde_json::Map::new(),
                }),
                extra: serde_json::Map::new(),
            }),
            extra: serde_json::Map::new(),
        }
    }
}

/// `{"tailf-ned-cisco-ios:Loopback": ...}`, a single entry on create or
/// the full list on read.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct LoopbackEnvelope<T> {
    #[serde(rename = "tailf-ned-cisco-ios:Loopback")]
    pub loopback: T,
}

/// `{"tailf-ned-cisco-ios:address": "10.0.0.1"}`
#[derive(Debug, Serialize)]
pub(crate) struct AddressPatch<'a> {
    #[serde(rename = "tailf-ned-cisco-ios:address")]
    pub address: &'a str,
}

/// Interface names are keyed as strings but some NED versions emit the
/// loopback number as a JSON integer.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Name {
        Text(String),
        Number(u64),
    }

    Ok(match Name::deserialize(deserializer)? {
        Name::Text(s) => s,
        Name::Number(n) => n.to_string(),
    })
}

// ── Operations ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct OperationEnvelope {
    #[serde(rename = "tailf-ncs:output")]
    pub output: OperationOutput,
}

/// The `tailf-ncs:output` block returned by device actions.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OperationOutput {
    pub result: ActionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl OperationOutput {
    pub fn succeeded(&self) -> bool {
        self.result.succeeded()
    }
}

/// `sync-from` reports a boolean, `fetch-host-keys` an enumeration
/// (`updated`, `unchanged`, `failed`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActionResult {
    Flag(bool),
    Text(String),
}

impl ActionResult {
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Flag(ok) => *ok,
            Self::Text(s) => matches!(s.as_str(), "true" | "updated" | "unchanged"),
        }
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
