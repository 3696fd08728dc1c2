// nso-api: Async Rust client for the Cisco NSO RESTCONF API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod loopbacks;
pub mod models;
pub mod transport;

pub use auth::ConnectionParams;
pub use client::{RestconfClient, RestconfResponse, YANG_JSON};
pub use error::Error;
pub use models::{
    ActionResult, DeviceSummary, Loopback, NewDevice, NewLoopback, OperationOutput,
    PrimaryAddress,
};
pub use reqwest::StatusCode;
pub use transport::TransportConfig;
