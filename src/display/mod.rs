//! # Display Module
//!
//! Serial text display (Nextion-style) command encoding and field layout.
//!
//! This module handles:
//! - Framing `field="value"` commands with 0xFF terminators
//! - Assigning the recent report window to display slots
//! - Naming the host status fields

pub mod fields;
pub mod protocol;
