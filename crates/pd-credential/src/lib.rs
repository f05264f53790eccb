//! Salted adaptive password hashing and verification.
//!
//! Plaintext passwords only pass through [`CredentialHasher::hash`] and
//! [`CredentialHasher::verify`]; what gets stored is a [`CredentialHash`],
//! a self-describing encoding of algorithm, cost, salt and digest.
//!
//! # Example
//!
//! ```
//! use pd_credential::{CredentialHasher, HasherConfig};
//!
//! // Low cost for the example; production keeps the default.
//! let hasher = CredentialHasher::new(&HasherConfig::default().with_cost(4)).unwrap();
//! let stored = hasher.hash("hunter2").unwrap();
//!
//! assert!(hasher.verify("hunter2", &stored).unwrap());
//! assert!(!hasher.verify("wrong", &stored).unwrap());
//! ```
//!
//! # Guarantees
//!
//! - Every hash gets a fresh salt from the OS random source.
//! - Verification reads the cost from the stored hash, so raising the
//!   configured cost never invalidates existing hashes.
//! - A stored value that does not parse is an error, never a match.

pub mod encoding;
pub mod error;
pub mod hasher;

pub use encoding::{Algorithm, CredentialHash, MAX_COST, MIN_COST};
pub use error::{CredentialError, Result};
pub use hasher::{CredentialHasher, HasherConfig, DEFAULT_COST, MAX_PASSWORD_BYTES};
