//! # Service State
//!
//! Asks systemd whether the Direwolf unit is running.

use tokio::process::Command;

use super::TelemetryError;

/// Whether `systemctl is-active <unit>` reports `active`
///
/// A unit that is inactive or failed is `Ok(false)`; only a failure to run
/// `systemctl` at all is an error.
pub async fn service_active(unit: &str) -> Result<bool, TelemetryError> {
    let output = Command::new("systemctl")
        .arg("is-active")
        .arg(unit)
        .output()
        .await?;

    Ok(is_active(&output.stdout))
}

fn is_active(stdout: &[u8]) -> bool {
    String::from_utf8_lossy(stdout).trim() == "active"
}
