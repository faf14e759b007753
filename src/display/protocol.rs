//! # Display Command Protocol
//!
//! Encodes text field updates for the serial display.
//!
//! ## Frame Format
//!
//! ```text
//! FF FF FF | t4.txt="N0CALL" | FF FF FF
//! ```
//!
//! Each command is wrapped in three terminator bytes on both sides so a
//! display that lost sync on garbage resynchronises on the next update.

use bytes::{BufMut, Bytes, BytesMut};

/// Terminator byte surrounding each command
pub const FRAME_TERMINATOR: u8 = 0xFF;

/// Number of terminator bytes on each side of a command
pub const TERMINATOR_COUNT: usize = 3;

const TERMINATOR: [u8; TERMINATOR_COUNT] = [FRAME_TERMINATOR; TERMINATOR_COUNT];

/// Encode a `field="value"` assignment as a complete frame
///
/// # Arguments
///
/// * `field` - Display component attribute, e.g. `t4.txt`
/// * `value` - Text to show
///
/// # Returns
///
/// * `Bytes` - Terminators + command + terminators
///
/// # Examples
///
/// ```
/// use igate_display::display::protocol::encode_text_command;
///
/// let frame = encode_text_command("t3.txt", "PY2PCR-15");
/// assert_eq!(&frame[..3], &[0xFF, 0xFF, 0xFF]);
/// assert_eq!(&frame[3..frame.len() - 3], b"t3.txt=\"PY2PCR-15\"");
/// ```
pub fn encode_text_command(field: &str, value: &str) -> Bytes {
    let mut frame = BytesMut::with_capacity(field.len() + value.len() + 3 + 2 * TERMINATOR_COUNT);
    frame.put_slice(&TERMINATOR);
    frame.put_slice(field.as_bytes());
    frame.put_slice(b"=\"");
    frame.put_slice(value.as_bytes());
    frame.put_u8(b'"');
    frame.put_slice(&TERMINATOR);
    frame.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let frame = encode_text_command("g0.txt", "hello");
        let mut expected = vec![0xFF, 0xFF, 0xFF];
        expected.extend_from_slice(b"g0.txt=\"hello\"");
        expected.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(frame.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_empty_value() {
        let frame = encode_text_command("t2.txt", "");
        assert_eq!(&frame[3..frame.len() - 3], b"t2.txt=\"\"");
    }

    #[test]
    fn test_frame_length() {
        let frame = encode_text_command("t14.txt", "12:00 - 01/01/2026");
        assert_eq!(frame.len(), 2 * TERMINATOR_COUNT + "t14.txt=\"12:00 - 01/01/2026\"".len());
    }

    #[test]
    fn test_utf8_value_is_passed_through() {
        let frame = encode_text_command("g1.txt", "São Paulo");
        let body = &frame[3..frame.len() - 3];
        assert_eq!(body, "g1.txt=\"São Paulo\"".as_bytes());
    }

    #[test]
    fn test_terminators_only_at_edges_for_ascii() {
        let frame = encode_text_command("t0.txt", "tun0: 10.8.0.2");
        let inner = &frame[TERMINATOR_COUNT..frame.len() - TERMINATOR_COUNT];
        assert!(!inner.contains(&FRAME_TERMINATOR));
    }
}
