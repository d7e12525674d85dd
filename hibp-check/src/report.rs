use hibp_range::{CheckResult, DigestPrefix};

use crate::batch::BatchSummary;

/// Verdict for a single interactively entered password.
pub fn password_report(result: &CheckResult) -> String {
    if result.found {
        format!(
            "This password has been leaked {} times!\n\
             It is HIGHLY recommended that you change it immediately!",
            result.count
        )
    } else {
        "This password was not found in any leak database.".to_string()
    }
}

/// One hash file line that was found. Only the prefix is echoed.
pub fn leaked_line(prefix: &DigestPrefix, count: u64) -> String {
    format!("{prefix} has been leaked {count} times!")
}

pub fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "Checked {} hashes: {} leaked, {} not found, {} failed.",
        summary.total, summary.leaked, summary.not_found, summary.failed
    )
}
