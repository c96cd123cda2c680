//! # shiv
//!
//! Field extraction filter for structured text.
//!
//! ## Features
//!
//! - **Delimiter mode**: split lines on any literal string
//! - **CSV/TSV mode**: quoted records, including fields spanning lines
//! - **Extraction mode**: fields from the capture groups of a regex
//! - **Field ranges**: `1,3-5,7-`, applied in order, repeats allowed
//! - **Encodings**: optional transcoding of legacy input to UTF-8
//!
//! ## Usage
//!
//! ```bash
//! # Fields 1 and 3 of a colon-separated file
//! shiv -d : -f 1,3 /etc/passwd
//!
//! # Reorder CSV columns
//! shiv --csv -f 3,1-2 data.csv
//!
//! # Capture groups, tab separated
//! shiv -e '(\w+)=(\d+)' settings.txt
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use shiv::{Args, Config, Processor};
//!
//! let args = Args::parse_from(["shiv", "--csv", "-f", "2-"]);
//! let config = Config::from_args(&args).unwrap();
//!
//! let processor = Processor::new(config);
//! processor.process(std::io::stdout().lock()).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processor;
pub mod range;
pub mod report;
pub mod select;
pub mod splitter;

pub use cli::Args;
pub use config::{Config, Mode};
pub use error::{ConfigError, InvalidRange};
pub use processor::Processor;
pub use range::{Bound, FieldList, Range};
