//! # Report Window
//!
//! Reads the tail of the Direwolf log and turns the last few lines into
//! station reports.
//!
//! The log is reopened on every call; nothing is cached between polls.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, warn};

use super::report::{StationReport, MIN_RECORD_FIELDS};

/// Number of log lines considered per poll
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// Read the last `lines` lines of a text file
///
/// Only the final `max_bytes` of the file are read. When the read starts
/// mid-file the partial first line is dropped. Invalid UTF-8 is replaced,
/// never rejected.
///
/// # Arguments
///
/// * `path` - Log file
/// * `lines` - Maximum number of lines to return
/// * `max_bytes` - Size of the tail chunk to read
///
/// # Returns
///
/// * `io::Result<Vec<String>>` - Lines in file order (oldest first)
pub async fn read_tail(path: &Path, lines: usize, max_bytes: u64) -> std::io::Result<Vec<String>> {
    let mut file = File::open(path).await?;
    let len = file.metadata().await?.len();
    let start = len.saturating_sub(max_bytes);

    file.seek(SeekFrom::Start(start)).await?;
    let mut buf = Vec::with_capacity((len - start) as usize);
    file.read_to_end(&mut buf).await?;

    let text = String::from_utf8_lossy(&buf);
    let mut all: Vec<&str> = text.lines().collect();
    if start > 0 && !all.is_empty() {
        all.remove(0);
    }

    let skip = all.len().saturating_sub(lines);
    Ok(all[skip..].iter().map(|line| line.to_string()).collect())
}

/// Decode the usable records among raw log lines
///
/// Lines with fewer than [`MIN_RECORD_FIELDS`] fields are dropped silently.
/// Lines with enough fields but a non-numeric coordinate are logged and
/// dropped too, so one bad record never stalls the display.
///
/// # Arguments
///
/// * `lines` - Raw log lines, oldest first
/// * `mycall` - Local station callsign
///
/// # Returns
///
/// * `Vec<StationReport>` - Reports in log order (newest last)
pub fn select_window<S: AsRef<str>>(lines: &[S], mycall: &str) -> Vec<StationReport> {
    lines
        .iter()
        .map(|line| line.as_ref().trim_end_matches(['\r', '\n']))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < MIN_RECORD_FIELDS {
                debug!("Ignoring log line with {} fields", fields.len());
                return None;
            }

            match StationReport::from_fields(&fields, mycall) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!("Skipping log record: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Read the log tail and decode it in one step
///
/// A log that cannot be opened or read yields an empty window.
pub async fn load_window(
    path: &Path,
    lines: usize,
    max_bytes: u64,
    mycall: &str,
) -> Vec<StationReport> {
    match read_tail(path, lines, max_bytes).await {
        Ok(tail) => select_window(&tail, mycall),
        Err(e) => {
            warn!("Failed to read log {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MYCALL: &str = "PY2PCR-15";

    fn valid_line(source: &str) -> String {
        format!("0,1,2,{source},{source},5,6,!,8,9,40.0,-74.0,0,13,14,15,16,from {source}")
    }

    fn log_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_one_valid_among_short_lines() {
        let lines = vec![
            "short,line".to_string(),
            valid_line("N0CALL"),
            "a,b,c,d".to_string(),
            String::new(),
        ];

        let window = select_window(&lines, MYCALL);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].source_callsign, "N0CALL");
    }

    #[test]
    fn test_no_qualifying_lines() {
        let lines = ["x", "y,z", "", "seen,on,the,air"];
        assert!(select_window(&lines, MYCALL).is_empty());
    }

    #[test]
    fn test_keeps_log_order() {
        let lines = vec![valid_line("A1A"), valid_line("B2B"), valid_line("C3C")];
        let window = select_window(&lines, MYCALL);

        let sources: Vec<&str> = window.iter().map(|r| r.source_callsign.as_str()).collect();
        assert_eq!(sources, vec!["A1A", "B2B", "C3C"]);
    }

    #[test]
    fn test_bad_coordinate_skips_only_that_record() {
        let bad = "0,1,2,BAD,BAD,5,6,!,8,9,north,-74.0,0,13,14,15,16,oops".to_string();
        let lines = vec![valid_line("A1A"), bad, valid_line("C3C")];

        let window = select_window(&lines, MYCALL);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].source_callsign, "A1A");
        assert_eq!(window[1].source_callsign, "C3C");
    }

    #[test]
    fn test_huge_or_non_finite_coordinates_skip_record() {
        let lines = vec![
            "0,1,2,N0CALL,N0CALL,5,6,!,8,9,1e300,-74.0,0,13,14,15,16,hi".to_string(),
            "0,1,2,N0CALL,N0CALL,5,6,!,8,9,40.0,inf,0,13,14,15,16,hi".to_string(),
            "0,1,2,N0CALL,N0CALL,5,6,!,8,9,NaN,-74.0,0,13,14,15,16,hi".to_string(),
            valid_line("C3C"),
        ];

        let window = select_window(&lines, MYCALL);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].source_callsign, "C3C");
    }

    #[test]
    fn test_crlf_terminated_lines() {
        let lines = vec![format!("{}\r\n", valid_line("N0CALL"))];
        let window = select_window(&lines, MYCALL);
        assert_eq!(window[0].comment, "from N0CALL");
    }

    #[tokio::test]
    async fn test_read_tail_returns_last_lines() {
        let contents = (1..=10).map(|i| format!("line {i}\n")).collect::<String>();
        let file = log_file(contents.as_bytes());

        let tail = read_tail(file.path(), 4, 16 * 1024).await.unwrap();
        assert_eq!(tail, vec!["line 7", "line 8", "line 9", "line 10"]);
    }

    #[tokio::test]
    async fn test_read_tail_short_file() {
        let file = log_file(b"only one\n");
        let tail = read_tail(file.path(), 4, 16 * 1024).await.unwrap();
        assert_eq!(tail, vec!["only one"]);
    }

    #[tokio::test]
    async fn test_read_tail_empty_file() {
        let file = log_file(b"");
        let tail = read_tail(file.path(), 4, 16 * 1024).await.unwrap();
        assert!(tail.is_empty());
    }

    #[tokio::test]
    async fn test_read_tail_drops_partial_first_line() {
        // 20 bytes from the end starts inside "first line here"
        let file = log_file(b"first line here\nsecond\nthird\n");
        let tail = read_tail(file.path(), 4, 20).await.unwrap();
        assert_eq!(tail, vec!["second", "third"]);
    }

    #[tokio::test]
    async fn test_read_tail_tolerates_invalid_utf8() {
        let file = log_file(b"ok\nbad \xff\xfe bytes\n");
        let tail = read_tail(file.path(), 4, 1024).await.unwrap();
        assert_eq!(tail.len(), 2);
        assert!(tail[1].starts_with("bad "));
        assert!(tail[1].ends_with(" bytes"));
    }

    #[tokio::test]
    async fn test_load_window_from_log() {
        let contents = format!(
            "{}\ngarbage\n{}\n{}\n{}\n",
            valid_line("OLD1"),
            valid_line("A1A"),
            valid_line("B2B"),
            valid_line("C3C")
        );
        let file = log_file(contents.as_bytes());

        let window = load_window(file.path(), DEFAULT_WINDOW_SIZE, 16 * 1024, MYCALL).await;
        let sources: Vec<&str> = window.iter().map(|r| r.source_callsign.as_str()).collect();

        // OLD1 is outside the last four lines, "garbage" is dropped
        assert_eq!(sources, vec!["A1A", "B2B", "C3C"]);
    }

    #[tokio::test]
    async fn test_load_window_missing_log_is_empty() {
        let window = load_window(Path::new("/nonexistent/direwolf.log"), 4, 1024, MYCALL).await;
        assert!(window.is_empty());
    }
}
