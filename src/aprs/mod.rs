//! # APRS Log Module
//!
//! Turns Direwolf's text log into station reports.
//!
//! This module handles:
//! - Maidenhead grid locators from latitude/longitude
//! - Decoding comma-delimited log records
//! - Tailing the log and selecting the recent report window
//! - Reading the local station callsign from `direwolf.conf`

pub mod grid;
pub mod report;
pub mod station;
pub mod window;
