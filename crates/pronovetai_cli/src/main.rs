//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pronovetai_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("pronovetai_core ping={}", pronovetai_core::ping());
    println!("pronovetai_core version={}", pronovetai_core::core_version());
}
