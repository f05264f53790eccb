//! Fuzz target for redaction config loading.
//!
//! Tests that JSON config parsing and rule building handle arbitrary input
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_redact::RedactionConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<RedactionConfig>(data) {
        let _ = config.build_rule();
    }
});
