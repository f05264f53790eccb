//! Salted adaptive hashing for stored passwords.
//!
//! Uses bcrypt with a fresh 16-byte salt per hash. Both `hash` and `verify`
//! are CPU-bound and block for tens to hundreds of milliseconds at
//! production cost; callers on latency-sensitive paths should run them on
//! a worker thread.

use crate::encoding::{Algorithm, CredentialHash, MAX_COST, MIN_COST};
use crate::error::{CredentialError, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Default work factor for new hashes.
pub const DEFAULT_COST: u32 = 12;

/// Longest password, in bytes, the hash function reads in full.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hasher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Work factor for new hashes; verification uses the stored cost.
    #[serde(default = "default_cost")]
    pub cost: u32,
}

fn default_cost() -> u32 {
    DEFAULT_COST
}

impl Default for HasherConfig {
    fn default() -> Self {
        HasherConfig { cost: DEFAULT_COST }
    }
}

impl HasherConfig {
    /// Defaults overridden by `PD_HASH_COST`.
    ///
    /// An unparseable value is ignored and the default cost kept.
    pub fn from_env() -> Self {
        let mut config = HasherConfig::default();
        if let Ok(val) = std::env::var("PD_HASH_COST") {
            match val.trim().parse::<u32>() {
                Ok(cost) => config.cost = cost,
                Err(_) => tracing::warn!(value = %val, "ignoring unparseable PD_HASH_COST"),
            }
        }
        config
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }
}

/// Produces and checks credential hashes at a fixed cost.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    /// Create a hasher, rejecting costs the hash function does not support.
    pub fn new(config: &HasherConfig) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&config.cost) {
            return Err(CredentialError::Configuration(format!(
                "cost {} outside {}..={}",
                config.cost, MIN_COST, MAX_COST
            )));
        }
        Ok(CredentialHasher { cost: config.cost })
    }

    /// Create a hasher with an explicit cost.
    pub fn with_cost(cost: u32) -> Result<Self> {
        Self::new(&HasherConfig { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `password` with a fresh random salt.
    ///
    /// Two calls with the same password return different hashes.
    pub fn hash(&self, password: &str) -> Result<CredentialHash> {
        check_encodable(password)?;
        let salt = generate_salt()?;

        let start = Instant::now();
        let parts = bcrypt::hash_with_salt(password, self.cost, salt)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        tracing::debug!(
            cost = self.cost,
            elapsed = ?start.elapsed(),
            "hashed credential"
        );

        CredentialHash::parse(&parts.format_for_version(bcrypt::Version::TwoB))
    }

    /// Check `candidate` against `stored`.
    ///
    /// Uses the cost and salt embedded in `stored`, so hashes made at any
    /// supported cost verify. Returns `Ok(false)` on mismatch; the digest
    /// comparison is constant-time.
    ///
    /// A candidate containing a NUL byte never matches. Only the first
    /// [`MAX_PASSWORD_BYTES`] bytes of a longer candidate are compared, which
    /// is what other bcrypt implementations hashed for such passwords.
    pub fn verify(&self, candidate: &str, stored: &CredentialHash) -> Result<bool> {
        let candidate = candidate.as_bytes();
        if candidate.contains(&0) {
            return Ok(false);
        }
        let candidate = &candidate[..candidate.len().min(MAX_PASSWORD_BYTES)];

        let start = Instant::now();
        let matched = bcrypt::verify(candidate, stored.as_str())
            .map_err(|e| CredentialError::MalformedHash(e.to_string()))?;
        tracing::debug!(
            cost = stored.cost(),
            elapsed = ?start.elapsed(),
            "verified credential"
        );
        Ok(matched)
    }

    /// Parse `stored` and check `candidate` against it.
    ///
    /// A hash that does not parse is an error, never a match.
    pub fn verify_encoded(&self, candidate: &str, stored: &[u8]) -> Result<bool> {
        let stored = CredentialHash::from_bytes(stored)?;
        self.verify(candidate, &stored)
    }

    /// Whether `stored` should be replaced by a hash from this hasher.
    ///
    /// True when its cost differs from the configured cost or it uses an
    /// older algorithm tag.
    pub fn needs_rehash(&self, stored: &CredentialHash) -> bool {
        stored.cost() != self.cost || stored.algorithm() != Algorithm::TwoB
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        CredentialHasher { cost: DEFAULT_COST }
    }
}

/// Reject passwords the hash function would silently alter.
fn check_encodable(password: &str) -> Result<()> {
    if password.as_bytes().contains(&0) {
        return Err(CredentialError::Encoding(
            "password contains a NUL byte".to_string(),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CredentialError::Encoding(format!(
            "password is {} bytes; at most {} are supported",
            password.len(),
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

fn generate_salt() -> Result<[u8; 16]> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt)
        .map_err(|e| CredentialError::Rng(format!("failed to generate salt: {}", e)))?;
    Ok(salt)
}
