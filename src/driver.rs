//! # Driver Loop
//!
//! Periodically pushes the recent report window and host status to the
//! display.
//!
//! ## Cycle
//!
//! 1. Re-read the last lines of the Direwolf log
//! 2. Send the report slots that have data
//! 3. Send clock, temperature, CPU, disk, VPN, LAN and callsign
//! 4. Send the Direwolf service state when its slower timer is due
//!
//! Nothing in a cycle is fatal; missing data becomes placeholder text.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::aprs::window::load_window;
use crate::config::Config;
use crate::display::fields::{map_reports, mycall_update, status, FieldUpdate};
use crate::serial::port_trait::DisplayPort;
use crate::serial::DisplaySerial;
use crate::telemetry::{render, HostTelemetry};

/// Tracks when the slow-cadence status check last ran
#[derive(Debug, Clone)]
pub struct StatusTimer {
    interval: Duration,
    last_check: Option<Instant>,
}

impl StatusTimer {
    /// Timer that is due immediately, then every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_check: None,
        }
    }

    /// True on the first call and once `interval` has elapsed since [`mark`](Self::mark)
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_check {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Record that the check ran at `now`
    pub fn mark(&mut self, now: Instant) {
        self.last_check = Some(now);
    }
}

/// Log and timing settings for the driver
#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub log_path: PathBuf,
    pub window_size: usize,
    pub tail_bytes: u64,
    pub vpn_interface: String,
    pub lan_fallback: String,
    pub poll_interval: Duration,
    pub status_check_interval: Duration,
}

impl DriverSettings {
    /// Take log, interface and timing settings from the loaded config
    pub fn from_config(config: &Config) -> Self {
        Self {
            log_path: PathBuf::from(&config.direwolf.log_path),
            window_size: config.direwolf.window_size,
            tail_bytes: config.direwolf.tail_bytes,
            vpn_interface: config.telemetry.vpn_interface.clone(),
            lan_fallback: config.telemetry.lan_interfaces.last().cloned().unwrap_or_default(),
            poll_interval: Duration::from_millis(config.timing.poll_interval_ms),
            status_check_interval: Duration::from_millis(config.timing.status_check_interval_ms),
        }
    }
}

/// What one poll cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// Valid reports in the window
    pub reports: usize,
    /// Field updates written to the display
    pub sent: usize,
    /// Whether the service state was checked this cycle
    pub service_checked: bool,
}

/// Display driver state for the lifetime of the process
pub struct Driver<P: DisplayPort, T: HostTelemetry> {
    display: DisplaySerial<P>,
    telemetry: T,
    mycall: String,
    settings: DriverSettings,
    status_timer: StatusTimer,
}

impl<P: DisplayPort, T: HostTelemetry> Driver<P, T> {
    /// Driver for `mycall`; the service check is due on the first cycle
    pub fn new(
        display: DisplaySerial<P>,
        telemetry: T,
        mycall: String,
        settings: DriverSettings,
    ) -> Self {
        let status_timer = StatusTimer::new(settings.status_check_interval);
        Self {
            display,
            telemetry,
            mycall,
            settings,
            status_timer,
        }
    }

    /// Show the local callsign once at startup
    pub async fn announce(&mut self) -> usize {
        info!("Announcing {} on the display", self.mycall);
        self.display.send_all(&[mycall_update(&self.mycall)]).await
    }

    /// Run one poll cycle
    ///
    /// # Arguments
    ///
    /// * `now` - Monotonic time, used for the service check cadence
    /// * `wall` - Local time shown on the display
    pub async fn poll_once(&mut self, now: Instant, wall: DateTime<Local>) -> CycleSummary {
        let reports = load_window(
            &self.settings.log_path,
            self.settings.window_size,
            self.settings.tail_bytes,
            &self.mycall,
        )
        .await;

        let mut updates = map_reports(&reports);
        updates.extend(self.status_updates(wall).await);

        let service_checked = self.status_timer.is_due(now);
        if service_checked {
            let state = self.telemetry.service_active().await;
            updates.push(FieldUpdate::new(status::SERVICE, render::service_state(&state)));
            self.status_timer.mark(now);
        }

        let sent = self.display.send_all(&updates).await;
        debug!("Cycle: {} reports, {}/{} fields sent", reports.len(), sent, updates.len());

        CycleSummary {
            reports: reports.len(),
            sent,
            service_checked,
        }
    }

    /// Fields refreshed on every cycle
    async fn status_updates(&mut self, wall: DateTime<Local>) -> Vec<FieldUpdate> {
        let temperature = self.telemetry.temperature().await;
        let cpu = self.telemetry.cpu_usage().await;
        let disk = self.telemetry.disk_usage();
        let vpn = self.telemetry.vpn_address();
        let lan = self.telemetry.lan_address();

        vec![
            FieldUpdate::new(status::CLOCK, render::clock(&wall)),
            FieldUpdate::new(status::TEMPERATURE, render::temperature(&temperature)),
            FieldUpdate::new(status::CPU, render::cpu_usage(&cpu)),
            FieldUpdate::new(status::DISK, render::disk_usage(&disk)),
            FieldUpdate::new(
                status::VPN_IP,
                render::interface_address(&self.settings.vpn_interface, &vpn),
            ),
            FieldUpdate::new(
                status::LAN_IP,
                render::lan_address(&self.settings.lan_fallback, &lan),
            ),
            mycall_update(&self.mycall),
        ]
    }

    /// Poll forever at the configured interval until Ctrl+C
    pub async fn run(&mut self) {
        let mut ticker = interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Polling {} every {:?}",
            self.settings.log_path.display(),
            self.settings.poll_interval
        );
        info!("Press Ctrl+C to exit");

        let mut cycles: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once(Instant::now(), Local::now()).await;
                    cycles += 1;
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down...");
                    info!("Total poll cycles: {}", cycles);
                    break;
                }
            }
        }
    }

    /// Callsign read from the Direwolf config at startup
    pub fn mycall(&self) -> &str {
        &self.mycall
    }
}
