//! Fuzz target for config document parsing.
//!
//! Parsing arbitrary JSON input must never panic, only return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shardex_config::Config;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<Config>(data);
});
