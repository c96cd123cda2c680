use clap::Parser;
use shiv::report::error_chain;
use shiv::{Args, Config, ConfigError, Processor};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config(argv: &[&str], files: &[&NamedTempFile]) -> Result<Config, ConfigError> {
    let mut full: Vec<String> = vec!["shiv".to_string()];
    full.extend(argv.iter().map(|s| s.to_string()));
    full.extend(files.iter().map(|f| f.path().display().to_string()));

    Config::from_args(&Args::try_parse_from(full).unwrap())
}

fn run(argv: &[&str], files: &[&NamedTempFile]) -> String {
    let processor = Processor::new(config(argv, files).unwrap());
    let mut out = Vec::new();
    processor.process(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_files_are_read_in_argument_order() {
    let first = temp_file("1:one\n2:two\n");
    let second = temp_file("3:three\n");

    assert_eq!(run(&["-d", ":", "-f", "2"], &[&second, &first]), "three\none\ntwo\n");
}

#[test]
fn test_unterminated_last_line_is_not_merged() {
    let first = temp_file("a,b");
    let second = temp_file("c,d\n");

    assert_eq!(run(&["-d", ",", "-f", "2"], &[&first, &second]), "b\nd\n");
}

#[test]
fn test_extract_output_count_matches_matching_lines() {
    let file = temp_file("range 3-9 here\nnothing\n7-8\n\nx 1-1 y\n");

    let out = run(&["-e", r"(\d+)-(\d+)", "-o", ","], &[&file]);
    assert_eq!(out, "3,9\n7,8\n1,1\n");
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_csv_multiline_record_survives() {
    let file = temp_file("id,note\n1,\"line one\nline two\"\n2,plain\n");

    assert_eq!(
        run(&["--csv", "-f", "2,1"], &[&file]),
        "note,id\n\"line one\nline two\",1\nplain,2\n"
    );
}

#[test]
fn test_tsv_reorder() {
    let file = temp_file("a\tb\tc\n");

    assert_eq!(run(&["--tsv", "-f", "3-,-1"], &[&file]), "c\ta\n");
}

#[test]
fn test_crlf_input() {
    let file = temp_file("a;b\r\nc;d\r\n");

    assert_eq!(run(&["-d", ";", "-o", "|"], &[&file]), "a|b\nc|d\n");
}

#[test]
fn test_missing_file_fails_with_path() {
    let present = temp_file("a b\n");
    let present_path = present.path().display().to_string();
    let argv = vec!["shiv", "-d", " ", present_path.as_str(), "/no/such/input.txt"];

    let processor = Processor::new(Config::from_args(&Args::try_parse_from(argv).unwrap()).unwrap());
    let mut out = Vec::new();
    let err = processor.process(&mut out).unwrap_err();

    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    assert!(chain.iter().any(|msg| msg.contains("/no/such/input.txt")), "{:?}", chain);
}

#[test]
fn test_config_errors_come_before_input() {
    let file = temp_file("a,b\n");

    assert!(matches!(config(&[], &[&file]), Err(ConfigError::NoMode)));
    assert!(matches!(
        config(&["--csv", "--tsv"], &[&file]),
        Err(ConfigError::ConflictingModes(_))
    ));
    assert!(matches!(
        config(&["--csv", "-f", "a-b"], &[&file]),
        Err(ConfigError::InvalidRange(_))
    ));
}

#[test]
fn test_stats_count_input_bytes() {
    let file = temp_file("x=1\ny\n");
    let processor = Processor::new(config(&["-e", r"(\w)=(\d)"], &[&file]).unwrap());

    let mut out = Vec::new();
    let stats = processor.process(&mut out).unwrap();

    assert_eq!(stats.bytes_read, 6);
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.lines_skipped, 1);
}

#[test]
fn test_csv_blank_lines_are_empty_records() {
    let file = temp_file("a,b\n\nc,d\n");

    assert_eq!(run(&["--csv"], &[&file]), "a,b\n\nc,d\n");
}

#[test]
fn test_csv_missing_file_is_reported_once() {
    let argv = vec!["shiv", "--csv", "/no/such/input.csv"];

    let processor = Processor::new(Config::from_args(&Args::try_parse_from(argv).unwrap()).unwrap());
    let mut out = Vec::new();
    let err = processor.process(&mut out).unwrap_err();

    let lines = error_chain(&err);
    let naming: Vec<&String> = lines.iter().filter(|l| l.contains("/no/such/input.csv")).collect();
    assert_eq!(naming.len(), 1, "{:?}", lines);

    let raw: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    assert_eq!(raw, lines);
}

#[test]
fn test_stats_count_output_bytes() {
    let file = temp_file("id,note\n1,\"a,b\"\n");
    let processor = Processor::new(config(&["--csv", "-f", "2"], &[&file]).unwrap());

    let mut out = Vec::new();
    let stats = processor.process(&mut out).unwrap();

    assert_eq!(out, b"note\n\"a,b\"\n");
    assert_eq!(stats.bytes_written, out.len() as u64);
}
