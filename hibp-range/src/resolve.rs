use crate::range::Candidate;

/// Outcome of checking one digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckResult {
    pub found: bool,
    /// Number of times the password appears in the corpus, 0 when not found.
    pub count: u64,
}

impl CheckResult {
    pub const NOT_FOUND: CheckResult = CheckResult { found: false, count: 0 };
}

/// Finds `suffix` among the candidates, ignoring ASCII case.
///
/// A well behaved service never repeats a suffix; if it does, the first one in
/// response order wins.
pub fn resolve(suffix: &str, candidates: &[Candidate]) -> CheckResult {
    candidates
        .iter()
        .find(|candidate| candidate.suffix.eq_ignore_ascii_case(suffix))
        .map_or(CheckResult::NOT_FOUND, |candidate| CheckResult {
            found: true,
            count: candidate.count,
        })
}
