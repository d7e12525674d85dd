//! Breached password checker using the Have I Been Pwned range API.
//!
//! This library checks passwords against the Pwned Passwords corpus with the
//! k-anonymity range protocol: a password is hashed locally with SHA-1, only the
//! first 5 hex characters of the digest are sent to the service, and the service
//! answers with every known suffix sharing that prefix. The match against the
//! remaining 35 characters happens on this side of the wire.
//!
//! ```no_run
//! use hibp_range::{BreachChecker, ClientConfig};
//!
//! # async fn run() -> Result<(), hibp_range::Error> {
//! let checker = BreachChecker::from_config(&ClientConfig::default())?;
//! let result = checker.check_password(b"password").await?;
//! if result.found {
//!     println!("leaked {} times", result.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod client;
pub mod digest;
pub mod error;
pub mod range;
pub mod resolve;

pub use checker::BreachChecker;
pub use client::{ClientConfig, RangeClient, RangeQuery};
pub use digest::{DigestPrefix, PasswordDigest};
pub use error::Error;
pub use range::{Candidate, CandidateSet, parse_range_body};
pub use resolve::{CheckResult, resolve};

/// Environment variable name for overriding the range API base URL.
pub const HIBP_API_URL_ENV: &str = "HIBP_API_URL";

/// Base URL of the public Pwned Passwords service.
pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com";

/// Returns the API base URL from the HIBP_API_URL environment variable,
/// or falls back to the public service.
pub fn api_url_from_env() -> String {
    std::env::var(HIBP_API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// The length of a SHA-1 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = 40;

/// The length of the digest prefix sent to the service (5 hex characters).
pub const PREFIX_LEN: usize = 5;

/// The length of the digest suffix that never leaves the machine.
pub const SUFFIX_LEN: usize = DIGEST_HEX_LEN - PREFIX_LEN;

/// Hex lookup table for digest rendering.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";
