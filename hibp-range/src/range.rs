use compact_str::CompactString;
use tracing::warn;

use crate::SUFFIX_LEN;
use crate::digest::DigestPrefix;
use crate::error::Error;

/// A suffix returned by the range API together with its breach count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub suffix: CompactString,
    /// Zero when the service sent a count we could not parse, and for padding
    /// records.
    pub count: u64,
}

/// All candidates returned for one prefix, in response order.
pub type CandidateSet = Vec<Candidate>;

/// Parses a range response body of `SUFFIX:COUNT` lines.
///
/// Lines are CRLF separated but bare LF is accepted. A record whose count does
/// not parse is kept with a count of 0; a line that is not a record at all is
/// skipped. Both are logged. The body is only rejected when it has content but
/// not a single usable record.
pub fn parse_range_body(prefix: &DigestPrefix, body: &str) -> Result<CandidateSet, Error> {
    let mut candidates = CandidateSet::new();
    let mut skipped = 0usize;

    for (index, line) in body.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let Some((suffix, count)) = line.split_once(':') else {
            warn!(%prefix, line = index + 1, "range record has no ':' separator, skipping");
            skipped += 1;
            continue;
        };

        if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|c| c.is_ascii_hexdigit()) {
            warn!(%prefix, line = index + 1, "range record has a malformed suffix, skipping");
            skipped += 1;
            continue;
        }

        let count = match count.trim().parse::<u64>() {
            Ok(count) => count,
            Err(e) => {
                warn!(%prefix, line = index + 1, error = %e, "unparsable count, treating as 0");
                0
            }
        };

        candidates.push(Candidate { suffix: CompactString::new(suffix), count });
    }

    if candidates.is_empty() && skipped > 0 {
        return Err(Error::Protocol {
            prefix: prefix.to_string(),
            reason: format!("none of {skipped} lines is a SUFFIX:COUNT record"),
        });
    }

    Ok(candidates)
}
