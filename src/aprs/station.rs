//! # Local Station Identity
//!
//! Reads the iGate's own callsign from the Direwolf configuration file.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::{IgateDisplayError, Result};

/// Directive holding the station callsign in `direwolf.conf`
const MYCALL_DIRECTIVE: &str = "MYCALL";

/// Default number of configuration lines scanned for `MYCALL`
pub const DEFAULT_SCAN_LINES: usize = 40;

/// Find the `MYCALL` callsign in a Direwolf configuration file
///
/// Scans at most `max_lines` lines for the first one starting with
/// `MYCALL` and returns its second whitespace-separated token.
///
/// # Errors
///
/// Returns error if:
/// - The file cannot be opened or read
/// - No `MYCALL` line with a callsign appears within `max_lines` lines
///
/// # Examples
///
/// ```no_run
/// use igate_display::aprs::station::read_mycall;
/// use std::path::Path;
///
/// # async fn demo() -> igate_display::error::Result<()> {
/// let mycall = read_mycall(Path::new("/etc/direwolf/direwolf.conf"), 40).await?;
/// println!("Station: {}", mycall);
/// # Ok(())
/// # }
/// ```
pub async fn read_mycall(path: &Path, max_lines: usize) -> Result<String> {
    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();
    let mut scanned = 0;

    while scanned < max_lines {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        scanned += 1;

        if let Some(call) = mycall_from_line(&line) {
            debug!("Found MYCALL {} on line {}", call, scanned);
            return Ok(call.to_string());
        }
    }

    Err(IgateDisplayError::MycallNotFound(path.display().to_string()))
}

fn mycall_from_line(line: &str) -> Option<&str> {
    if !line.starts_with(MYCALL_DIRECTIVE) {
        return None;
    }
    line.split_whitespace().nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn conf(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_second_token() {
        let file = conf(
            "# Direwolf\nADEVICE plughw:1,0\nMYCALL PY2PCR-15\nIGSERVER brazil.aprs2.net\n",
        );
        let call = read_mycall(file.path(), DEFAULT_SCAN_LINES).await.unwrap();
        assert_eq!(call, "PY2PCR-15");
    }

    #[tokio::test]
    async fn test_first_mycall_wins() {
        let file = conf("MYCALL N0CALL-1\nMYCALL N0CALL-2\n");
        let call = tokio_test::assert_ok!(read_mycall(file.path(), DEFAULT_SCAN_LINES).await);
        assert_eq!(call, "N0CALL-1");
    }

    #[tokio::test]
    async fn test_indented_or_commented_mycall_is_ignored() {
        let file = conf("  MYCALL N0CALL\n#MYCALL N0CALL\n");
        let result = read_mycall(file.path(), DEFAULT_SCAN_LINES).await;
        assert!(matches!(result, Err(IgateDisplayError::MycallNotFound(_))));
    }

    #[tokio::test]
    async fn test_mycall_beyond_scan_limit() {
        let mut contents = "# filler\n".repeat(DEFAULT_SCAN_LINES);
        contents.push_str("MYCALL N0CALL\n");
        let file = conf(&contents);

        let result = read_mycall(file.path(), DEFAULT_SCAN_LINES).await;
        assert!(matches!(result, Err(IgateDisplayError::MycallNotFound(_))));
    }

    #[tokio::test]
    async fn test_mycall_on_last_scanned_line() {
        let mut contents = "# filler\n".repeat(DEFAULT_SCAN_LINES - 1);
        contents.push_str("MYCALL N0CALL-9\n");
        let file = conf(&contents);

        let call = read_mycall(file.path(), DEFAULT_SCAN_LINES).await.unwrap();
        assert_eq!(call, "N0CALL-9");
    }

    #[tokio::test]
    async fn test_mycall_without_callsign_keeps_scanning() {
        let file = conf("MYCALL\nMYCALL N0CALL-3\n");
        let call = read_mycall(file.path(), DEFAULT_SCAN_LINES).await.unwrap();
        assert_eq!(call, "N0CALL-3");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = read_mycall(Path::new("/nonexistent/direwolf.conf"), DEFAULT_SCAN_LINES).await;
        assert!(matches!(result, Err(IgateDisplayError::Io(_))));
    }
}
