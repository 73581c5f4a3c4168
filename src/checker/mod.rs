//! Batch DOI checking.
//!
//! [`Checker`] walks input files one at a time and one line at a time. Every
//! line is looked up after a fixed pause, and the resulting [`ResultLine`]s
//! are written to `<stem> result.txt` once the input is exhausted.
//!
//! Failures come in two kinds:
//!
//! - a lookup failure only affects its own line, which becomes
//!   `<identifier> - error`;
//! - a file-system failure ([`CheckError`]) stops the whole run, leaving
//!   later files untouched.

mod discovery;
mod report;

pub use discovery::{discover_input_files, is_input_name, result_path};
pub use report::{write_report, ReportBuffer};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CheckerConfig;
use crate::models::ResultLine;
use crate::sources::Source;
use crate::ui;

/// File-system errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to open input file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create result file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write result file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    /// Path of the file the error is about
    pub fn path(&self) -> &Path {
        match self {
            CheckError::OpenInput { path, .. }
            | CheckError::CreateOutput { path, .. }
            | CheckError::ReadInput { path, .. }
            | CheckError::WriteOutput { path, .. } => path,
        }
    }
}

/// Outcome of one processed input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Lines read (equals lines written)
    pub lines: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl FileSummary {
    fn new(input: &Path, output: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            lines: 0,
            found: 0,
            not_found: 0,
            errors: 0,
        }
    }

    fn record(&mut self, line: &ResultLine) {
        self.lines += 1;
        match line {
            ResultLine::Found { .. } => self.found += 1,
            ResultLine::NotFound { .. } => self.not_found += 1,
            ResultLine::Error { .. } => self.errors += 1,
        }
    }
}

/// Outcome of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: Vec<FileSummary>,
}

impl RunSummary {
    pub fn identifiers(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    pub fn found(&self) -> usize {
        self.files.iter().map(|f| f.found).sum()
    }

    pub fn not_found(&self) -> usize {
        self.files.iter().map(|f| f.not_found).sum()
    }

    pub fn errors(&self) -> usize {
        self.files.iter().map(|f| f.errors).sum()
    }
}

/// Batch checker state: the source to query and how to pace and name things.
#[derive(Debug, Clone)]
pub struct Checker {
    source: Arc<dyn Source>,
    delay: Duration,
    input_extension: String,
    result_suffix: String,
    show_progress: bool,
}

impl Checker {
    /// Create a checker with default settings (2 second delay, `.txt` inputs)
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self::from_config(source, &CheckerConfig::default())
    }

    pub fn from_config(source: Arc<dyn Source>, config: &CheckerConfig) -> Self {
        Self {
            source,
            delay: config.delay(),
            input_extension: config.input_extension.clone(),
            result_suffix: config.result_suffix.clone(),
            show_progress: false,
        }
    }

    /// Override the pause before each lookup
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Show a per-file progress bar on stderr
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    /// Input files in `dir` (see [`discover_input_files`])
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        discover_input_files(dir, &self.input_extension, &self.result_suffix)
    }

    /// Report path for an input file
    pub fn result_path(&self, input: &Path) -> PathBuf {
        result_path(input, &self.input_extension, &self.result_suffix)
    }

    /// Process files in order, stopping at the first file-system error.
    pub async fn process_files(&self, files: &[PathBuf]) -> Result<RunSummary, CheckError> {
        let mut summary = RunSummary::default();
        for path in files {
            let file_summary = self.process_file(path).await?;
            summary.files.push(file_summary);
        }
        Ok(summary)
    }

    /// Check every line of one input file and write its report.
    pub async fn process_file(&self, path: &Path) -> Result<FileSummary, CheckError> {
        let input = File::open(path).map_err(|source| CheckError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        let output_path = self.result_path(path);
        let mut output = File::create(&output_path).map_err(|source| CheckError::CreateOutput {
            path: output_path.clone(),
            source,
        })?;

        tracing::info!(
            input = %path.display(),
            output = %output_path.display(),
            "Checking file"
        );

        let progress = ui::file_progress(&path.display().to_string(), self.show_progress);
        let mut report = ReportBuffer::new();
        let mut summary = FileSummary::new(path, &output_path);

        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| CheckError::ReadInput {
                    path: path.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            let identifier = decode_line(&buf);
            let result = self.check_identifier(&identifier).await;
            summary.record(&result);
            report.push(&result);
            progress.inc(1);
        }

        write_report(&mut output, &report).map_err(|source| CheckError::WriteOutput {
            path: output_path.clone(),
            source,
        })?;
        progress.finish_and_clear();

        tracing::info!(
            input = %path.display(),
            lines = summary.lines,
            found = summary.found,
            errors = summary.errors,
            "Finished file"
        );

        Ok(summary)
    }

    /// Look up one identifier after the configured pause.
    ///
    /// Never fails: a lookup error becomes an error line.
    pub async fn check_identifier(&self, identifier: &str) -> ResultLine {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.source.search(identifier).await {
            Ok(response) => ResultLine::from_response(identifier, &response),
            Err(e) => {
                tracing::warn!(
                    identifier,
                    source = self.source.id(),
                    error = %e,
                    "Lookup failed"
                );
                ResultLine::error(identifier)
            }
        }
    }
}

/// One input line without its terminator. Bytes that are not valid UTF-8
/// are replaced rather than failing the file.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{MockSource, SourceError};
    use tempfile::tempdir;

    fn checker(mock: &Arc<MockSource>) -> Checker {
        Checker::new(mock.clone()).with_delay(Duration::ZERO)
    }

    #[test]
    fn test_default_delay() {
        let checker = Checker::new(Arc::new(MockSource::new()));
        assert_eq!(checker.delay(), Duration::from_secs(2));
        assert_eq!(checker.source().id(), "mock");
    }

    #[tokio::test]
    async fn test_check_identifier_branches() {
        let mock = Arc::new(MockSource::new());
        mock.push_found("T", 3);
        mock.push_error(SourceError::Network("connection reset".into()));

        let checker = checker(&mock);

        assert_eq!(
            checker.check_identifier("10.1/a").await.to_string(),
            "10.1/a&да&3&T"
        );
        assert_eq!(
            checker.check_identifier("10.1/b").await.to_string(),
            "10.1/b - error"
        );
        assert_eq!(
            checker.check_identifier("10.1/c.").await.to_string(),
            "10.1/c&нет"
        );
        assert_eq!(mock.queries(), vec!["10.1/a", "10.1/b", "10.1/c."]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_identifier_waits_for_delay() {
        let mock = Arc::new(MockSource::new());
        let checker = Checker::new(mock.clone()).with_delay(Duration::from_secs(2));

        let start = tokio::time::Instant::now();
        checker.check_identifier("10.1/a").await;
        checker.check_identifier("10.1/b").await;

        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_process_file_keeps_line_count_and_order() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("batch.txt");
        std::fs::write(&input, "10.1/a\n10.1/b\n\n10.1/c.\r\n10.1/d").unwrap();

        let mock = Arc::new(MockSource::new());
        mock.push_found("First", 1);
        mock.push_error(SourceError::Parse("bad json".into()));
        mock.push_response(crate::models::SearchResponse::empty());
        mock.push_found("Fourth", 0);

        let summary = checker(&mock).process_file(&input).await.unwrap();

        let report = std::fs::read_to_string(dir.path().join("batch result.txt")).unwrap();
        assert_eq!(
            report,
            "10.1/a&да&1&First\n10.1/b - error\n&нет\n10.1/c&да&0&Fourth\n10.1/d&нет\n"
        );
        assert_eq!(summary.lines, 5);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.not_found, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(mock.queries(), vec!["10.1/a", "10.1/b", "", "10.1/c.", "10.1/d"]);
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"10.1/a\n"), "10.1/a");
        assert_eq!(decode_line(b"10.1/a\r\n"), "10.1/a");
        assert_eq!(decode_line(b"10.1/a"), "10.1/a");
        assert_eq!(decode_line(b"\n"), "");
        assert_eq!(decode_line(b"10.1/\xff\n"), "10.1/\u{FFFD}");
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_checked_not_fatal() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, b"10.1/ok\n10.1/\xff\xfe\n10.1/after\n").unwrap();
        std::fs::write(&b, "10.1/b\n").unwrap();

        let mock = Arc::new(MockSource::new());
        let summary = checker(&mock).process_files(&[a, b]).await.unwrap();

        let report = std::fs::read_to_string(dir.path().join("a result.txt")).unwrap();
        assert_eq!(report.lines().count(), 3);
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.files[0].lines, 3);
        assert!(dir.path().join("b result.txt").exists());
        assert_eq!(
            mock.queries(),
            vec!["10.1/ok", "10.1/\u{FFFD}\u{FFFD}", "10.1/after", "10.1/b"]
        );
    }

    #[tokio::test]
    async fn test_multi_line_title_keeps_one_report_line_per_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("titles.txt");
        std::fs::write(&input, "10.1/a\n10.1/b\n").unwrap();

        let mock = Arc::new(MockSource::new());
        mock.push_found("Line one\nLine two", 1);

        checker(&mock).process_file(&input).await.unwrap();

        let report = std::fs::read_to_string(dir.path().join("titles result.txt")).unwrap();
        assert_eq!(report, "10.1/a&да&1&Line one Line two\n10.1/b&нет\n");
        assert_eq!(report.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_process_empty_file_writes_empty_report() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        std::fs::write(&input, "").unwrap();

        let mock = Arc::new(MockSource::new());
        let summary = checker(&mock).process_file(&input).await.unwrap();

        assert_eq!(summary.lines, 0);
        let report = std::fs::read_to_string(dir.path().join("empty result.txt")).unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_open_failure_aborts_remaining_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("1.txt");
        let missing = dir.path().join("2.txt");
        let third = dir.path().join("3.txt");
        std::fs::write(&first, "10.1/a\n").unwrap();
        std::fs::write(&third, "10.1/c\n").unwrap();

        let mock = Arc::new(MockSource::new());
        let err = checker(&mock)
            .process_files(&[first, missing.clone(), third])
            .await
            .unwrap_err();

        assert!(matches!(err, CheckError::OpenInput { .. }));
        assert_eq!(err.path(), missing.as_path());
        assert!(dir.path().join("1 result.txt").exists());
        assert!(!dir.path().join("2 result.txt").exists());
        assert!(!dir.path().join("3 result.txt").exists());
        assert_eq!(mock.queries(), vec!["10.1/a"]);
    }

    #[tokio::test]
    async fn test_create_failure_is_fatal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("list.txt");
        std::fs::write(&input, "10.1/a\n").unwrap();
        // A directory squatting on the report path makes File::create fail.
        std::fs::create_dir(dir.path().join("list result.txt")).unwrap();

        let mock = Arc::new(MockSource::new());
        let err = checker(&mock).process_file(&input).await.unwrap_err();

        assert!(matches!(err, CheckError::CreateOutput { .. }));
        assert!(mock.queries().is_empty());
    }

    #[tokio::test]
    async fn test_run_summary_totals() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "10.1/a\n10.1/b\n").unwrap();
        std::fs::write(&b, "10.1/c\n").unwrap();

        let mock = Arc::new(MockSource::new());
        mock.push_found("A", 2);
        mock.push_error(SourceError::Api("status 500".into()));

        let summary = checker(&mock).process_files(&[a, b]).await.unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.identifiers(), 3);
        assert_eq!(summary.found(), 1);
        assert_eq!(summary.not_found(), 1);
        assert_eq!(summary.errors(), 1);
    }
}
