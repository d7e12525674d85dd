use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Range(#[from] hibp_range::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write hash file '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot use --generate and --file together")]
    InvalidArgs,

    #[error("{failed} of {total} hashes could not be checked")]
    BatchFailures { failed: usize, total: usize },
}
