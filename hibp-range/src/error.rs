#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed for prefix {prefix}: {source}")]
    HttpRequest {
        prefix: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for prefix {prefix}")]
    HttpStatus { prefix: String, status: u16 },

    #[error("malformed range response for prefix {prefix}: {reason}")]
    Protocol { prefix: String, reason: String },

    #[error("invalid digest '{input}': {reason}")]
    InvalidDigest { input: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}
