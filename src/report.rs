//! Terminal reporting
//!
//! Everything here goes to stderr; stdout carries data only.

use bytesize::ByteSize;
use colored::*;
use std::time::Duration;

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("{} {}", "error:".red().bold(), text.red());
}

/// Print a cause from an error chain
pub fn print_cause(text: &str) {
    eprintln!("  {} {}", "caused by:".yellow(), text);
}

/// Messages of an error and its causes, outermost first.
/// A cause that repeats the message right above it is dropped.
pub fn error_chain(err: &anyhow::Error) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if lines.last() != Some(&text) {
            lines.push(text);
        }
    }
    lines
}

/// Print an error followed by its causes
pub fn print_error_chain(err: &anyhow::Error) {
    let mut lines = error_chain(err).into_iter();
    if let Some(head) = lines.next() {
        print_error(&head);
    }
    for cause in lines {
        print_cause(&cause);
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records produced by the splitter
    pub records_read: u64,
    pub records_written: u64,
    /// Lines without a pattern match
    pub lines_skipped: u64,
    /// Raw input bytes, before transcoding
    pub bytes_read: u64,
    /// Output bytes, quoting and terminators included
    pub bytes_written: u64,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn records_per_second(&self) -> f64 {
        let elapsed = self.elapsed.as_secs_f64();
        if elapsed > 0.0 {
            self.records_read as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        eprintln!();
        eprintln!("  {} {}", "Input read:     ".green(), ByteSize(self.bytes_read));
        eprintln!("  {} {}", "Records read:   ".green(), format_number(self.records_read));
        if self.lines_skipped > 0 {
            eprintln!("  {} {}", "No match:       ".yellow(), format_number(self.lines_skipped));
        }
        eprintln!(
            "  {} {}",
            "Records written:".green().bold(),
            format_number(self.records_written).green().bold()
        );
        eprintln!("  {} {}", "Output written: ".green(), ByteSize(self.bytes_written));
        eprintln!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed));
        eprintln!("  {} {:.2} records/sec", "Throughput:     ".green(), self.records_per_second());
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_error_chain_outermost_first() {
        let err = anyhow::Error::new(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .context("cannot open 'x'")
            .context("failed to read input");
        assert_eq!(error_chain(&err), vec!["failed to read input", "cannot open 'x'", "gone"]);
    }

    #[test]
    fn test_error_chain_drops_repeated_cause() {
        let err = anyhow::anyhow!("cannot open 'x'")
            .context("cannot open 'x'")
            .context("failed to read input");
        assert_eq!(error_chain(&err), vec!["failed to read input", "cannot open 'x'"]);
    }

    #[test]
    fn test_rate_without_elapsed_time() {
        let stats = RunStats {
            records_read: 10,
            ..Default::default()
        };
        assert_eq!(stats.records_per_second(), 0.0);
    }
}
