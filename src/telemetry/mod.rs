//! # Telemetry Module
//!
//! Host status shown alongside the station reports.
//!
//! This module handles:
//! - CPU temperature, CPU usage and disk usage
//! - VPN and LAN interface addresses
//! - Direwolf service state
//! - Rendering readings (or their absence) as display text
//!
//! Providers return `Result`; fallback text such as `Temp: N/A` is produced
//! only in [`render`].

pub mod host;
pub mod network;
pub mod render;
pub mod service;

use std::net::Ipv4Addr;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TelemetryConfig;
use host::CpuSampler;

/// Why a reading is unavailable
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Source file or command could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source was read but its contents made no sense
    #[error("unparseable reading: {0}")]
    Parse(String),

    /// Interface is absent or has no IPv4 address
    #[error("interface {0} is offline")]
    InterfaceOffline(String),

    /// Reading not available on this platform
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Source of host status readings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostTelemetry: Send {
    /// CPU temperature in degrees Celsius
    async fn temperature(&mut self) -> Result<f32, TelemetryError>;

    /// CPU busy percentage since the previous call
    async fn cpu_usage(&mut self) -> Result<f32, TelemetryError>;

    /// Filesystem usage percentage
    fn disk_usage(&mut self) -> Result<f32, TelemetryError>;

    /// VPN interface address
    fn vpn_address(&mut self) -> Result<Ipv4Addr, TelemetryError>;

    /// First LAN interface with an address, and that address
    fn lan_address(&mut self) -> Result<(String, Ipv4Addr), TelemetryError>;

    /// Whether the Direwolf service is running
    async fn service_active(&mut self) -> Result<bool, TelemetryError>;
}

/// Readings from the running Linux host
#[derive(Debug)]
pub struct SystemTelemetry {
    thermal_path: PathBuf,
    disk_path: PathBuf,
    vpn_interface: String,
    lan_interfaces: Vec<String>,
    service_name: String,
    cpu: CpuSampler,
}

impl SystemTelemetry {
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            thermal_path: PathBuf::from(&config.thermal_path),
            disk_path: PathBuf::from(&config.disk_path),
            vpn_interface: config.vpn_interface.clone(),
            lan_interfaces: config.lan_interfaces.clone(),
            service_name: config.service_name.clone(),
            cpu: CpuSampler::new(),
        }
    }
}

#[async_trait]
impl HostTelemetry for SystemTelemetry {
    async fn temperature(&mut self) -> Result<f32, TelemetryError> {
        host::read_temperature(&self.thermal_path).await
    }

    async fn cpu_usage(&mut self) -> Result<f32, TelemetryError> {
        self.cpu.sample().await
    }

    fn disk_usage(&mut self) -> Result<f32, TelemetryError> {
        host::disk_usage_percent(&self.disk_path)
    }

    fn vpn_address(&mut self) -> Result<Ipv4Addr, TelemetryError> {
        network::interface_ipv4(&self.vpn_interface)
    }

    fn lan_address(&mut self) -> Result<(String, Ipv4Addr), TelemetryError> {
        network::first_lan_ipv4(&self.lan_interfaces)
    }

    async fn service_active(&mut self) -> Result<bool, TelemetryError> {
        service::service_active(&self.service_name).await
    }
}
