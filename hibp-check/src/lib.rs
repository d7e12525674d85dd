//! Command line front end for [hibp-range](https://crates.io/crates/hibp-range).
//!
//! Three modes, picked once at startup and carried in a [`Config`]:
//!
//! - check a single password typed at a masked prompt (the default),
//! - build or extend a hash file of SHA-1 password digests (`-g FILE`),
//! - check every digest in a hash file (`-f FILE`).
//!
//! In every mode only the first 5 hex characters of a digest are sent to the
//! range API.
//!
//! # Usage
//!
//! ```sh
//! hibp-check                      # prompt for one password
//! hibp-check -g team.hashes       # add passwords to a hash file
//! hibp-check -f team.hashes -j 8  # check the file, 8 requests in flight
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod hashfile;
pub mod password;
pub mod report;

pub use batch::{BatchSummary, LineOutcome, LineReport, check_hash_file, check_lines};
pub use config::{Args, Config, Mode};
pub use error::Error;
pub use hashfile::{BuildOutcome, HashFileBuilder, run_builder};
pub use password::{PasswordSource, TerminalPassword};
