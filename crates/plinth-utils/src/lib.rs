//! Shared helpers for Plinth crates.
//!
//! This crate has no dependencies so it can be used both at runtime by
//! `plinth-core` and at compile time by `plinth-macros`. Anything that must
//! produce identical results in both places (like parameter id hashing)
//! lives here.

const FNV_OFFSET_BASIS: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

/// Compute the 32-bit FNV-1a hash of a string.
///
/// Parameter string ids (`"gain"`) are hashed with this function to produce
/// the numeric ids hosts use for automation. The derive macro and runtime
/// lookups must agree, so both call this.
pub const fn fnv1a_32(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}
