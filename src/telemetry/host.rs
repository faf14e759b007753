//! # Host Readings
//!
//! CPU temperature, CPU usage and filesystem usage from Linux interfaces.

use std::path::Path;

use super::TelemetryError;

/// Kernel CPU accounting file
pub const PROC_STAT_PATH: &str = "/proc/stat";

/// Read a thermal zone temperature in degrees Celsius
///
/// The sysfs file holds millidegrees, e.g. `48312`.
pub async fn read_temperature(path: &Path) -> Result<f32, TelemetryError> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_millidegrees(&raw)
}

fn parse_millidegrees(raw: &str) -> Result<f32, TelemetryError> {
    let millis: i64 = raw
        .trim()
        .parse()
        .map_err(|_| TelemetryError::Parse(format!("temperature {:?}", raw.trim())))?;
    Ok(millis as f32 / 1000.0)
}

/// Aggregate CPU jiffies from the first line of `/proc/stat`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    /// Jiffies spent doing work
    pub busy: u64,
    /// All jiffies
    pub total: u64,
}

impl CpuTimes {
    /// Parse the `cpu` summary line of `/proc/stat`
    ///
    /// Idle and iowait count as not busy; guest time is already included
    /// in user/nice and is skipped.
    pub fn parse(stat: &str) -> Result<Self, TelemetryError> {
        let line = stat
            .lines()
            .find(|line| line.starts_with("cpu "))
            .ok_or_else(|| TelemetryError::Parse("no cpu line in /proc/stat".to_string()))?;

        let values = line
            .split_whitespace()
            .skip(1)
            .take(8)
            .map(|v| v.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TelemetryError::Parse(format!("/proc/stat: {}", e)))?;

        if values.len() < 4 {
            return Err(TelemetryError::Parse("truncated cpu line in /proc/stat".to_string()));
        }

        let total: u64 = values.iter().sum();
        let idle = values[3] + values.get(4).copied().unwrap_or(0);

        Ok(Self {
            busy: total - idle,
            total,
        })
    }
}

/// CPU usage between successive samples
///
/// The first sample reports usage since boot.
#[derive(Debug, Default)]
pub struct CpuSampler {
    previous: CpuTimes,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new sample and return busy percentage since the last one
    pub fn update(&mut self, now: CpuTimes) -> f32 {
        let busy = now.busy.saturating_sub(self.previous.busy);
        let total = now.total.saturating_sub(self.previous.total);
        self.previous = now;

        if total == 0 {
            return 0.0;
        }
        (busy as f64 / total as f64 * 100.0) as f32
    }

    /// Read `/proc/stat` and update
    pub async fn sample(&mut self) -> Result<f32, TelemetryError> {
        let stat = tokio::fs::read_to_string(PROC_STAT_PATH).await?;
        Ok(self.update(CpuTimes::parse(&stat)?))
    }
}

/// Percentage of the filesystem at `path` in use
///
/// Computed as used / (used + available to unprivileged users), so
/// reserved blocks do not count as free.
#[cfg(target_os = "linux")]
pub fn disk_usage_percent(path: &Path) -> Result<f32, TelemetryError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| TelemetryError::Parse(format!("invalid path {}", path.display())))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(TelemetryError::Io(std::io::Error::last_os_error()));
    }

    let block_size = stat.f_frsize as u64;
    let used = (stat.f_blocks as u64).saturating_sub(stat.f_bfree as u64) * block_size;
    let available = stat.f_bavail as u64 * block_size;
    Ok(usage_percent(used, available))
}

#[cfg(not(target_os = "linux"))]
pub fn disk_usage_percent(path: &Path) -> Result<f32, TelemetryError> {
    let _ = path;
    Err(TelemetryError::Unsupported("disk usage".to_string()))
}

fn usage_percent(used: u64, available: u64) -> f32 {
    let total = used + available;
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 100.0) as f32
}
