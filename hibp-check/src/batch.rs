//! Checking a hash file line by line.
//!
//! A line that fails, whether it is not UTF-8, not a digest, or its query
//! errors, is reported and counted; the remaining lines are still checked.

use std::path::Path;

use futures_util::stream::{self, StreamExt};
use hibp_range::{BreachChecker, DigestPrefix, PasswordDigest, RangeQuery};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::{info, warn};

use crate::error::Error;
use crate::report::leaked_line;

#[derive(Debug)]
pub enum LineOutcome {
    Leaked { prefix: DigestPrefix, count: u64 },
    NotFound,
    Failed(hibp_range::Error),
}

#[derive(Debug)]
pub struct LineReport {
    /// 1-based line number in the hash file.
    pub line: usize,
    pub outcome: LineOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub leaked: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &LineOutcome) {
        self.total += 1;
        match outcome {
            LineOutcome::Leaked { .. } => self.leaked += 1,
            LineOutcome::NotFound => self.not_found += 1,
            LineOutcome::Failed(_) => self.failed += 1,
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Non-blank lines of a hash file, trimmed, with their 1-based line numbers.
///
/// Lines stay raw bytes so one undecodable line cannot hide the others. A
/// leading byte order mark is dropped.
pub fn hash_lines(contents: &[u8]) -> Vec<(usize, &[u8])> {
    let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);
    contents
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_ascii()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

async fn check_line<Q: RangeQuery>(checker: &BreachChecker<Q>, line: &[u8]) -> LineOutcome {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text,
        Err(e) => {
            return LineOutcome::Failed(hibp_range::Error::InvalidDigest {
                input: String::from_utf8_lossy(line).into_owned(),
                reason: format!("line is not valid UTF-8: {e}"),
            });
        }
    };

    let digest = match text.parse::<PasswordDigest>() {
        Ok(digest) => digest,
        Err(e) => return LineOutcome::Failed(e),
    };

    match checker.check_digest(&digest).await {
        Ok(result) if result.found => {
            LineOutcome::Leaked { prefix: digest.prefix(), count: result.count }
        }
        Ok(_) => LineOutcome::NotFound,
        Err(e) => LineOutcome::Failed(e),
    }
}

/// Checks each line, keeping up to `concurrent_checks` queries in flight.
///
/// `on_report` receives every line exactly once, in input order regardless of
/// concurrency.
pub async fn check_lines<Q, F>(
    checker: &BreachChecker<Q>,
    lines: &[(usize, &[u8])],
    concurrent_checks: usize,
    mut on_report: F,
) -> BatchSummary
where
    Q: RangeQuery,
    F: FnMut(LineReport),
{
    let mut summary = BatchSummary::default();

    let mut reports = stream::iter(lines.iter().copied())
        .map(move |(line, bytes)| async move {
            LineReport { line, outcome: check_line(checker, bytes).await }
        })
        .buffered(concurrent_checks.max(1));

    while let Some(report) = reports.next().await {
        summary.record(&report.outcome);
        on_report(report);
    }

    summary
}

/// Checks every digest in the hash file at `path`, printing leaked prefixes to
/// stdout as they are confirmed.
///
/// Only an unreadable file is an error here; per-line failures are logged and
/// counted in the returned summary.
pub async fn check_hash_file<Q: RangeQuery>(
    checker: &BreachChecker<Q>,
    path: &Path,
    concurrent_checks: usize,
    progress: bool,
) -> Result<BatchSummary, Error> {
    let contents = fs::read(path).await?;
    let lines = hash_lines(&contents);

    info!(path = %path.display(), hashes = lines.len(), concurrent_checks, "checking hash file");

    let progress_bar = if progress {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let summary = check_lines(checker, &lines, concurrent_checks, |report| {
        match &report.outcome {
            LineOutcome::Leaked { prefix, count } => {
                progress_bar.suspend(|| println!("{}", leaked_line(prefix, *count)));
            }
            LineOutcome::NotFound => {}
            LineOutcome::Failed(e) => {
                progress_bar.suspend(|| warn!(line = report.line, error = %e, "could not check hash"));
            }
        }
        progress_bar.inc(1);
    })
    .await;

    progress_bar.finish_and_clear();
    info!(?summary, "hash file checked");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use hibp_range::{CandidateSet, parse_range_body};

    use super::*;

    const PASSWORD: &str = "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8";
    const HUNTER2: &str = "F3BBBD66A63D4BF1747940578EC3D0103530E21D";
    const ULID: &str = "A1A7F2D7DA335FAD794965611EE6A9C458A1AEB6";

    /// Answers from a fixed prefix table; prefixes in `down` fail like an
    /// unavailable service.
    struct FakeRange {
        ranges: HashMap<&'static str, &'static str>,
        down: Vec<&'static str>,
        queried: Mutex<Vec<String>>,
    }

    impl FakeRange {
        fn new() -> Self {
            let ranges = HashMap::from([
                (
                    "5BAA6",
                    "1E4C9B93F3F0682250B6CF8331B7EE68FD8:52256179\r\n\
                     003D68EB55068C33ACE09247EE4C639306B:3",
                ),
                ("F3BBB", "D66A63D4BF1747940578EC3D0103530E21D:29540"),
                (
                    "A1A7F",
                    "0000000000000000000000000000000000A:1\r\n\
                     0000000000000000000000000000000000B:2",
                ),
            ]);
            Self { ranges, down: Vec::new(), queried: Mutex::new(Vec::new()) }
        }

        fn with_down(mut self, prefix: &'static str) -> Self {
            self.down.push(prefix);
            self
        }
    }

    impl RangeQuery for FakeRange {
        async fn query(&self, prefix: &DigestPrefix) -> Result<CandidateSet, hibp_range::Error> {
            self.queried.lock().unwrap().push(prefix.to_string());
            if self.down.iter().any(|down| *down == prefix.as_str()) {
                return Err(hibp_range::Error::HttpStatus {
                    prefix: prefix.to_string(),
                    status: 503,
                });
            }
            let body = self.ranges.get(prefix.as_str()).copied().unwrap_or("");
            parse_range_body(prefix, body)
        }
    }

    async fn run(
        checker: &BreachChecker<FakeRange>,
        contents: &str,
        jobs: usize,
    ) -> (BatchSummary, Vec<LineReport>) {
        let lines = hash_lines(contents.as_bytes());
        let mut reports = Vec::new();
        let summary = check_lines(checker, &lines, jobs, |report| reports.push(report)).await;
        (summary, reports)
    }

    #[test]
    fn test_hash_lines() {
        let lines = hash_lines(b"  AAAA \n\n\r\nBBBB\r\n");
        assert_eq!(lines, [(1, b"AAAA".as_slice()), (4, b"BBBB".as_slice())]);
    }

    #[test]
    fn test_hash_lines_strips_bom() {
        let lines = hash_lines(b"\xEF\xBB\xBFAAAA\r\nBBBB");
        assert_eq!(lines, [(1, b"AAAA".as_slice()), (2, b"BBBB".as_slice())]);
    }

    #[tokio::test]
    async fn test_non_utf8_line_does_not_stop_batch() {
        let checker = BreachChecker::new(FakeRange::new());
        let mut contents = format!("{PASSWORD}\n").into_bytes();
        contents.extend_from_slice(b"\xff\xfe garbage\n");
        contents.extend_from_slice(format!("{HUNTER2}\n").as_bytes());

        let lines = hash_lines(&contents);
        let mut reports = Vec::new();
        let summary = check_lines(&checker, &lines, 1, |report| reports.push(report)).await;

        assert_eq!(summary, BatchSummary { total: 3, leaked: 2, not_found: 0, failed: 1 });
        assert_eq!(reports[1].line, 2);
        match &reports[1].outcome {
            LineOutcome::Failed(hibp_range::Error::InvalidDigest { reason, .. }) => {
                assert!(reason.starts_with("line is not valid UTF-8"));
            }
            other => panic!("expected invalid digest, got {other:?}"),
        }
        assert_eq!(checker_queries(&checker), ["5BAA6", "F3BBB"]);
    }

    #[tokio::test]
    async fn test_bom_on_first_line() {
        let checker = BreachChecker::new(FakeRange::new());
        let contents = format!("\u{feff}{PASSWORD}\r\n");
        let (summary, _) = run(&checker, &contents, 1).await;

        assert_eq!(summary, BatchSummary { total: 1, leaked: 1, not_found: 0, failed: 0 });
    }

    #[tokio::test]
    async fn test_one_leaked_two_clean() {
        let checker = BreachChecker::new(FakeRange::new());
        let contents = format!("{PASSWORD}\n{ULID}\nA1A7F{}\n", "F".repeat(35));
        let (summary, reports) = run(&checker, &contents, 1).await;

        assert_eq!(summary, BatchSummary { total: 3, leaked: 1, not_found: 2, failed: 0 });
        assert!(matches!(reports[0].outcome, LineOutcome::Leaked { count: 52256179, .. }));
        assert!(matches!(reports[1].outcome, LineOutcome::NotFound));
        assert!(matches!(reports[2].outcome, LineOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_failed_query_does_not_stop_batch() {
        let checker = BreachChecker::new(FakeRange::new().with_down("F3BBB"));
        let contents = format!("{PASSWORD}\n{HUNTER2}\n{ULID}\n");
        let (summary, reports) = run(&checker, &contents, 1).await;

        assert_eq!(summary, BatchSummary { total: 3, leaked: 1, not_found: 1, failed: 1 });
        assert_eq!(reports.iter().map(|r| r.line).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(matches!(reports[0].outcome, LineOutcome::Leaked { .. }));
        assert!(matches!(reports[1].outcome, LineOutcome::Failed(_)));
        assert!(matches!(reports[2].outcome, LineOutcome::NotFound));
        assert_eq!(checker_queries(&checker), ["5BAA6", "F3BBB", "A1A7F"]);
    }

    #[tokio::test]
    async fn test_malformed_line_is_skipped() {
        let checker = BreachChecker::new(FakeRange::new());
        let contents = format!("{PASSWORD}\nnot-a-digest\n{}\n", HUNTER2.to_lowercase());
        let (summary, reports) = run(&checker, &contents, 1).await;

        assert_eq!(summary, BatchSummary { total: 3, leaked: 2, not_found: 0, failed: 1 });
        assert!(matches!(reports[1].outcome, LineOutcome::Failed(_)));
        // the malformed line never reaches the service
        assert_eq!(checker_queries(&checker), ["5BAA6", "F3BBB"]);
    }

    #[tokio::test]
    async fn test_concurrent_checks_keep_order() {
        let checker = BreachChecker::new(FakeRange::new().with_down("A1A7F"));
        let contents = format!("{ULID}\n{PASSWORD}\n{HUNTER2}\n{PASSWORD}\n");
        let (summary, reports) = run(&checker, &contents, 3).await;

        assert_eq!(summary, BatchSummary { total: 4, leaked: 3, not_found: 0, failed: 1 });
        assert_eq!(reports.iter().map(|r| r.line).collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert!(matches!(reports[0].outcome, LineOutcome::Failed(_)));
        assert!(matches!(reports[2].outcome, LineOutcome::Leaked { count: 29540, .. }));
    }

    fn checker_queries(checker: &BreachChecker<FakeRange>) -> Vec<String> {
        checker.source().queried.lock().unwrap().clone()
    }
}
