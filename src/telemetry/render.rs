//! # Status Text
//!
//! Turns telemetry results into display text. Every fallback string the
//! display shows for a missing reading comes from here.

use std::net::Ipv4Addr;

use chrono::{DateTime, TimeZone};
use tracing::debug;

use super::TelemetryError;

/// Clock format, e.g. `14:05 - 19/10/2026`
pub const CLOCK_FORMAT: &str = "%H:%M - %d/%m/%Y";

/// Shown for an unavailable numeric reading
const UNAVAILABLE: &str = "N/A";

/// Shown for an interface without an address, and a stopped service
const OFFLINE: &str = "offline";

/// Shown for a running service
const ONLINE: &str = "online";

fn log_unavailable(what: &str, err: &TelemetryError) {
    debug!("{} unavailable: {}", what, err);
}

/// `Temp: 48.3'C` or `Temp: N/A`
pub fn temperature(reading: &Result<f32, TelemetryError>) -> String {
    match reading {
        Ok(celsius) => format!("Temp: {:.1}'C", celsius),
        Err(e) => {
            log_unavailable("temperature", e);
            format!("Temp: {}", UNAVAILABLE)
        }
    }
}

/// `CPU: 12.5%` or `CPU: N/A`
pub fn cpu_usage(reading: &Result<f32, TelemetryError>) -> String {
    match reading {
        Ok(percent) => format!("CPU: {:.1}%", percent),
        Err(e) => {
            log_unavailable("CPU usage", e);
            format!("CPU: {}", UNAVAILABLE)
        }
    }
}

/// `HD: 41.2%` or `HD: N/A`
pub fn disk_usage(reading: &Result<f32, TelemetryError>) -> String {
    match reading {
        Ok(percent) => format!("HD: {:.1}%", percent),
        Err(e) => {
            log_unavailable("disk usage", e);
            format!("HD: {}", UNAVAILABLE)
        }
    }
}

/// `tun0: 10.8.0.2` or `tun0: offline`
pub fn interface_address(interface: &str, reading: &Result<Ipv4Addr, TelemetryError>) -> String {
    match reading {
        Ok(ip) => format!("{}: {}", interface, ip),
        Err(e) => {
            log_unavailable(interface, e);
            format!("{}: {}", interface, OFFLINE)
        }
    }
}

/// `wlan0: 192.168.1.20`, or `<fallback>: offline` when no LAN interface is up
pub fn lan_address(
    fallback_interface: &str,
    reading: &Result<(String, Ipv4Addr), TelemetryError>,
) -> String {
    match reading {
        Ok((interface, ip)) => format!("{}: {}", interface, ip),
        Err(e) => {
            log_unavailable("LAN address", e);
            format!("{}: {}", fallback_interface, OFFLINE)
        }
    }
}

/// `online` or `offline`
pub fn service_state(reading: &Result<bool, TelemetryError>) -> String {
    match reading {
        Ok(true) => ONLINE.to_string(),
        Ok(false) => OFFLINE.to_string(),
        Err(e) => {
            log_unavailable("service state", e);
            OFFLINE.to_string()
        }
    }
}

/// Local date and time in [`CLOCK_FORMAT`]
pub fn clock<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(CLOCK_FORMAT).to_string()
}
