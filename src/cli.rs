//! Command-line interface definition for shiv
//!
//! Only syntax is handled here; which combinations make sense is decided
//! when the arguments are turned into a [`Config`](crate::config::Config).

use clap::Parser;
use std::path::PathBuf;

/// Extract and re-delimit fields from structured text
///
/// Split every input line by a delimiter, a regex or CSV/TSV quoting,
/// select fields by position, and write them back out.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shiv",
    author = "m0h1nd4",
    version,
    about = "Extract and re-delimit fields from structured text",
    long_about = r#"
Split each input line into fields using exactly one mode, select a subset of
the fields by 1-based inclusive ranges, and write them joined by an output
delimiter.

MODES (exactly one is required):
    -d, --delimiter STR    split on a literal string ("\t" means tab)
    -e, --extract REGEX    use the capture groups of the first match;
                           lines that do not match are dropped
    --csv                  parse and write comma-separated quoted records
    --tsv                  parse and write tab-separated quoted records

FIELD RANGES:
    3        field 3
    -3       fields 1 through 3
    3-       field 3 through the last field
    2-4      fields 2 through 4
    1,4-,2   ranges are applied in order and may repeat fields

EXAMPLES:
    # Second and third column of a colon-separated file
    shiv -d : -f 2-3 /etc/passwd

    # Swap the first two columns of a CSV file
    shiv --csv -f 2,1,3- data.csv

    # Pull numbers out of free text, tab separated
    shiv -e '(\d+)-(\d+)' notes.txt

    # Convert a semicolon-separated file to pipes
    shiv -d ';' -o '|' export.txt
"#
)]
pub struct Args {
    /// Split lines on this literal delimiter
    #[arg(short, long, value_name = "STR", allow_hyphen_values = true)]
    pub delimiter: Option<String>,

    /// Fields to select, e.g. 1,3-5,7- (default: all fields)
    #[arg(short, long, value_name = "SPEC", allow_hyphen_values = true)]
    pub fields: Option<String>,

    /// Extract fields from the capture groups of a regex
    #[arg(short, long, value_name = "REGEX", allow_hyphen_values = true)]
    pub extract: Option<String>,

    /// Read and write CSV records
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Read and write TSV records
    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    /// Output delimiter (default: input delimiter, "," for CSV, tab otherwise)
    #[arg(short, long, value_name = "STR", allow_hyphen_values = true)]
    pub out_delimiter: Option<String>,

    /// Split on tabs when no mode is given instead of failing
    #[arg(long, default_value_t = false)]
    pub tab_fallback: bool,

    /// Input text encoding, e.g. latin1 or utf-16le (default: UTF-8)
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Print a summary to stderr when done
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - errors only
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Input files, read in order (default: stdin)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}
