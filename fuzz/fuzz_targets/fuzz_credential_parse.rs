//! Fuzz target for stored credential hash parsing.
//!
//! Values read back from storage are untrusted; parsing must return an
//! error rather than panic, and anything accepted must re-encode unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_credential::CredentialHash;

fuzz_target!(|data: &[u8]| {
    if let Ok(hash) = CredentialHash::from_bytes(data) {
        assert_eq!(hash.as_bytes(), data);
        assert_eq!(hash.salt().len() + hash.digest().len(), 53);
    }
});
