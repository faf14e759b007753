//! # Display Field Mapper
//!
//! Maps station reports and status values onto display text fields.
//!
//! ## Report Slots
//!
//! The four most recent reports fill four slots, newest first. Slot 1 also
//! shows position details.
//!
//! | Slot | Comment | Source | Heard by | Origin | Details |
//! |------|---------|--------|----------|--------|---------|
//! | 1 | g0 | t4 | t5 | t25 | t17 lat, t18 lon, t22 speed, t21 grid, t13 signal |
//! | 2 | g1 | t6 | t7 | t26 | - |
//! | 3 | g2 | t8 | t9 | t27 | - |
//! | 4 | g3 | t10 | t11 | t28 | - |
//!
//! ## Status Fields
//!
//! | Field | Value |
//! |-------|-------|
//! | t0 | VPN address |
//! | t1 | LAN address |
//! | t2 | Direwolf service state |
//! | t3 | Local callsign |
//! | t14 | Date and time |
//! | t15 | CPU temperature |
//! | t16 | CPU usage |
//! | t29 | Disk usage |

use crate::aprs::report::StationReport;

/// Status field names
pub mod status {
    /// VPN interface address
    pub const VPN_IP: &str = "t0.txt";
    /// LAN interface address
    pub const LAN_IP: &str = "t1.txt";
    /// Direwolf service online/offline
    pub const SERVICE: &str = "t2.txt";
    /// Local station callsign
    pub const MYCALL: &str = "t3.txt";
    /// Local date and time
    pub const CLOCK: &str = "t14.txt";
    /// CPU temperature
    pub const TEMPERATURE: &str = "t15.txt";
    /// CPU usage
    pub const CPU: &str = "t16.txt";
    /// Root filesystem usage
    pub const DISK: &str = "t29.txt";
}

/// One text field assignment for the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    /// Component attribute, e.g. `t4.txt`
    pub field: &'static str,
    /// Text to show
    pub value: String,
}

impl FieldUpdate {
    /// Update for `field`, e.g. `FieldUpdate::new("t3.txt", "PY2PCR-15")`
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Fields shown for every report slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFields {
    pub comment: &'static str,
    pub source: &'static str,
    pub heard_by: &'static str,
    pub origin: &'static str,
}

/// Position details shown only for the newest report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailFields {
    pub latitude: &'static str,
    pub longitude: &'static str,
    pub speed: &'static str,
    pub grid_locator: &'static str,
    pub signal: &'static str,
}

/// Number of report slots on the display
pub const SLOT_COUNT: usize = 4;

const fn slot(
    comment: &'static str,
    source: &'static str,
    heard_by: &'static str,
    origin: &'static str,
) -> SlotFields {
    SlotFields {
        comment,
        source,
        heard_by,
        origin,
    }
}

/// Slot layout, newest report first: comment, source, heard-by, origin
pub const SLOTS: [SlotFields; SLOT_COUNT] = [
    slot("g0.txt", "t4.txt", "t5.txt", "t25.txt"),
    slot("g1.txt", "t6.txt", "t7.txt", "t26.txt"),
    slot("g2.txt", "t8.txt", "t9.txt", "t27.txt"),
    slot("g3.txt", "t10.txt", "t11.txt", "t28.txt"),
];

/// Details of the newest report (slot 1)
pub const NEWEST_DETAILS: DetailFields = DetailFields {
    latitude: "t17.txt",
    longitude: "t18.txt",
    speed: "t22.txt",
    grid_locator: "t21.txt",
    signal: "t13.txt",
};

/// Map a report window onto display fields
///
/// # Arguments
///
/// * `reports` - Reports in log order (newest last), as produced by
///   [`select_window`](crate::aprs::window::select_window)
///
/// # Returns
///
/// * `Vec<FieldUpdate>` - Slot 1 first; slots without a report emit nothing
///
/// # Examples
///
/// ```
/// use igate_display::display::fields::map_reports;
///
/// assert!(map_reports(&[]).is_empty());
/// ```
pub fn map_reports(reports: &[StationReport]) -> Vec<FieldUpdate> {
    let mut updates = Vec::new();

    for (index, (slot, report)) in SLOTS.iter().zip(reports.iter().rev()).enumerate() {
        updates.push(FieldUpdate::new(slot.comment, report.comment.as_str()));
        updates.push(FieldUpdate::new(slot.source, report.source_callsign.as_str()));
        updates.push(FieldUpdate::new(slot.heard_by, report.heard_by_callsign.as_str()));
        updates.push(FieldUpdate::new(slot.origin, report.origin.as_str()));

        if index == 0 {
            updates.push(FieldUpdate::new(NEWEST_DETAILS.latitude, report.latitude.as_str()));
            updates.push(FieldUpdate::new(NEWEST_DETAILS.longitude, report.longitude.as_str()));
            updates.push(FieldUpdate::new(NEWEST_DETAILS.speed, report.speed.as_str()));
            updates.push(FieldUpdate::new(
                NEWEST_DETAILS.grid_locator,
                report.grid_locator.as_str(),
            ));
            updates.push(FieldUpdate::new(NEWEST_DETAILS.signal, report.signal_strength.as_str()));
        }
    }

    updates
}

/// Local callsign announcement / heartbeat
pub fn mycall_update(mycall: &str) -> FieldUpdate {
    FieldUpdate::new(status::MYCALL, mycall)
}
