//! Self-describing credential hash encoding.
//!
//! Hashes use the modular crypt layout `$<alg>$<cost>$<salt><digest>`:
//! a two-character algorithm tag, a two-digit cost, 22 characters of salt
//! and 31 characters of digest, both in the bcrypt base64 alphabet.

use crate::error::{CredentialError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoded salt length in characters (16 bytes).
pub const SALT_LEN: usize = 22;

/// Encoded digest length in characters (23 bytes).
pub const DIGEST_LEN: usize = 31;

/// Total length of an encoded hash.
pub const ENCODED_LEN: usize = 7 + SALT_LEN + DIGEST_LEN;

/// Lowest and highest cost accepted by the hash function.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt variant named by the algorithm tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    TwoA,
    TwoB,
    TwoX,
    TwoY,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::TwoA => "2a",
            Algorithm::TwoB => "2b",
            Algorithm::TwoX => "2x",
            Algorithm::TwoY => "2y",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "2a" => Some(Algorithm::TwoA),
            "2b" => Some(Algorithm::TwoB),
            "2x" => Some(Algorithm::TwoX),
            "2y" => Some(Algorithm::TwoY),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, persisted credential hash.
///
/// Immutable; a password change produces a new value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CredentialHash {
    encoded: String,
    algorithm: Algorithm,
    cost: u32,
}

impl CredentialHash {
    /// Parse an encoded hash.
    pub fn parse(encoded: &str) -> Result<Self> {
        if encoded.len() != ENCODED_LEN {
            return Err(CredentialError::malformed(format!(
                "expected {} characters, got {}",
                ENCODED_LEN,
                encoded.len()
            )));
        }

        let rest = encoded
            .strip_prefix('$')
            .ok_or_else(|| CredentialError::malformed("missing '$' prefix"))?;
        let (tag, rest) = rest
            .split_once('$')
            .ok_or_else(|| CredentialError::malformed("missing algorithm tag"))?;
        let algorithm = Algorithm::parse_str(tag)
            .ok_or_else(|| CredentialError::malformed(format!("unknown algorithm '{}'", tag)))?;
        let (cost, body) = rest
            .split_once('$')
            .ok_or_else(|| CredentialError::malformed("missing cost field"))?;

        if cost.len() != 2 || !cost.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CredentialError::malformed("cost must be two digits"));
        }
        let cost: u32 = cost
            .parse()
            .map_err(|_| CredentialError::malformed("cost must be two digits"))?;
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CredentialError::malformed(format!(
                "cost {} outside {}..={}",
                cost, MIN_COST, MAX_COST
            )));
        }

        if body.len() != SALT_LEN + DIGEST_LEN || !body.bytes().all(is_bcrypt_base64) {
            return Err(CredentialError::malformed("salt or digest is not bcrypt base64"));
        }

        Ok(CredentialHash {
            encoded: encoded.to_string(),
            algorithm,
            cost,
        })
    }

    /// Parse an encoded hash read as raw bytes from storage.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let s = std::str::from_utf8(bytes)
            .map_err(|_| CredentialError::malformed("hash is not ASCII"))?;
        Self::parse(s)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Work factor; the hash function runs `2^cost` rounds.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Encoded salt.
    pub fn salt(&self) -> &str {
        &self.encoded[7..7 + SALT_LEN]
    }

    /// Encoded digest.
    pub fn digest(&self) -> &str {
        &self.encoded[7 + SALT_LEN..]
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.encoded.as_bytes()
    }
}

fn is_bcrypt_base64(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'/'
}

impl fmt::Display for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

// Keep the digest out of debug logs.
impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHash")
            .field("algorithm", &self.algorithm)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl FromStr for CredentialHash {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CredentialHash {
    type Error = CredentialError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CredentialHash> for String {
    fn from(hash: CredentialHash) -> Self {
        hash.encoded
    }
}

impl AsRef<[u8]> for CredentialHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Structurally valid sample; not checked against any password here.
    const SAMPLE: &str = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";

    #[test]
    fn test_parse_fields() {
        let hash = CredentialHash::parse(SAMPLE).unwrap();
        assert_eq!(hash.algorithm(), Algorithm::TwoB);
        assert_eq!(hash.cost(), 4);
        assert_eq!(hash.salt(), "EGdrhbKUv8Oc9vGiXX0HQO");
        assert_eq!(hash.digest(), "xSg445d458Muh7DAHskb6QbtCvdxcie");
        assert_eq!(hash.as_str(), SAMPLE);
        assert_eq!(hash.to_string(), SAMPLE);
    }

    #[test]
    fn test_parse_from_bytes() {
        let hash = CredentialHash::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(hash.as_bytes(), SAMPLE.as_bytes());
        assert!(CredentialHash::from_bytes(&[0xff; ENCODED_LEN]).is_err());
    }

    #[test]
    fn test_rejects_plaintext() {
        assert!(matches!(
            CredentialHash::parse("hunter2"),
            Err(CredentialError::MalformedHash(_))
        ));
        assert!(CredentialHash::parse("").is_err());
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let bad = SAMPLE.replacen("$2b$", "$3z$", 1);
        assert!(CredentialHash::parse(&bad).is_err());
    }

    #[test]
    fn test_rejects_bad_cost() {
        assert!(CredentialHash::parse(&SAMPLE.replacen("$04$", "$03$", 1)).is_err());
        assert!(CredentialHash::parse(&SAMPLE.replacen("$04$", "$32$", 1)).is_err());
        assert!(CredentialHash::parse(&SAMPLE.replacen("$04$", "$+4$", 1)).is_err());
    }

    #[test]
    fn test_rejects_bad_alphabet() {
        let bad = format!("{}!", &SAMPLE[..ENCODED_LEN - 1]);
        assert!(CredentialHash::parse(&bad).is_err());
    }

    #[test]
    fn test_debug_hides_digest() {
        let hash = CredentialHash::parse(SAMPLE).unwrap();
        let dbg = format!("{:?}", hash);
        assert!(dbg.contains("TwoB"));
        assert!(!dbg.contains(hash.digest()));
    }

    #[test]
    fn test_serde_validates() {
        let hash = CredentialHash::parse(SAMPLE).unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", SAMPLE));

        let back: CredentialHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
        assert!(serde_json::from_str::<CredentialHash>("\"not-a-hash\"").is_err());
    }
}
