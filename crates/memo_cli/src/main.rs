//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `memo_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from the HTTP host process.
    println!("memo_core ping={}", memo_core::ping());
    println!("memo_core version={}", memo_core::core_version());
}
