use crate::client::{ClientConfig, RangeClient, RangeQuery};
use crate::digest::PasswordDigest;
use crate::error::Error;
use crate::resolve::{CheckResult, resolve};

/// Checks passwords and digests against a range source.
///
/// Holds no per-call state, so one checker can serve any number of checks.
pub struct BreachChecker<Q = RangeClient> {
    source: Q,
}

impl BreachChecker<RangeClient> {
    /// Creates a checker backed by the HTTP range API.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self::new(RangeClient::new(config)?))
    }
}

impl<Q: RangeQuery> BreachChecker<Q> {
    pub fn new(source: Q) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Q {
        &self.source
    }

    /// Checks if the given password has been found in a data breach.
    ///
    /// Only the 5 character prefix of the password's SHA-1 digest leaves the
    /// process.
    pub async fn check_password(&self, password: &[u8]) -> Result<CheckResult, Error> {
        self.check_digest(&PasswordDigest::of_password(password)).await
    }

    /// Checks an already computed digest, e.g. a line from a hash file.
    pub async fn check_digest(&self, digest: &PasswordDigest) -> Result<CheckResult, Error> {
        let (prefix, suffix) = digest.split();
        let candidates = self.source.query(&prefix).await?;
        Ok(resolve(suffix, &candidates))
    }
}
