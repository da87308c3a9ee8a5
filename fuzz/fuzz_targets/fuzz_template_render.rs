//! Fuzz target for template rendering.
//!
//! Rendering arbitrary template text must never panic, only return an
//! error for bad placeholder syntax or missing values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shardex_core::template::{render, RenderContext};

fuzz_target!(|data: &str| {
    let ctx = RenderContext::new()
        .with("label", "alice")
        .with("timestamp", "07-Jun-2024 14:32:05")
        .with("fragment", "AAA");
    let _ = render(data, &ctx);
});
