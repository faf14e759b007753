//! # iGate Display Library
//!
//! Show Direwolf APRS station reports and host status on a serial display.
//!
//! This library provides the pieces of the bridge between a Direwolf iGate's
//! text log and a Nextion-style display: record parsing, Maidenhead grid
//! locators, display field layout and framing, host telemetry and the
//! polling driver.

pub mod aprs;
pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod serial;
pub mod telemetry;
