//! Scoped denormal flushing for the audio thread.
//!
//! Denormal floats are orders of magnitude slower on most CPUs. While a
//! [`ScopedNoDenormals`] is alive the FPU flushes them to zero (FTZ and DAZ
//! on x86/x86_64, FZ on aarch64). Dropping it restores the previous control
//! word. On other targets the guard does nothing.

#[cfg(target_arch = "x86")]
use core::arch::x86 as arch;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64 as arch;

/// MXCSR flush-to-zero (bit 15) and denormals-are-zero (bit 6).
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const DAZ_FTZ: u32 = 0x8040;

/// FPCR flush-to-zero (bit 24).
#[cfg(target_arch = "aarch64")]
const FPCR_FZ: u64 = 1 << 24;

/// RAII guard enabling denormal flushing on the current thread.
#[derive(Debug)]
pub struct ScopedNoDenormals {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    prev: ControlWord,
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
type ControlWord = u32;
#[cfg(target_arch = "aarch64")]
type ControlWord = u64;

impl ScopedNoDenormals {
    /// Enable flushing until the guard is dropped.
    #[inline]
    #[must_use = "flushing is disabled again when the guard is dropped"]
    pub fn new() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
        {
            let prev = read_control_word();
            write_control_word(prev | FLUSH_BITS);
            Self { prev }
        }
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self {}
        }
    }
}

impl Default for ScopedNoDenormals {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScopedNoDenormals {
    #[inline]
    fn drop(&mut self) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
        write_control_word(self.prev);
    }
}

/// Whether denormal flushing is currently enabled on this thread.
///
/// Always `false` on targets without a supported control register.
pub fn flush_to_zero_enabled() -> bool {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    {
        (read_control_word() & FLUSH_BITS) == FLUSH_BITS
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
        false
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const FLUSH_BITS: ControlWord = DAZ_FTZ;
#[cfg(target_arch = "aarch64")]
const FLUSH_BITS: ControlWord = FPCR_FZ;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline]
#[allow(deprecated)]
fn read_control_word() -> ControlWord {
    // SAFETY: reading MXCSR has no side effects; SSE is baseline on every
    // x86 target Rust ships for audio hosts.
    unsafe { arch::_mm_getcsr() }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline]
#[allow(deprecated)]
fn write_control_word(value: ControlWord) {
    // SAFETY: only the rounding/flush bits differ from a value previously
    // read from MXCSR, which keeps all exceptions masked.
    unsafe { arch::_mm_setcsr(value) }
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn read_control_word() -> ControlWord {
    let value: u64;
    // SAFETY: reading FPCR is side-effect free.
    unsafe {
        std::arch::asm!("mrs {}, fpcr", out(reg) value, options(nomem, nostack, preserves_flags));
    }
    value
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn write_control_word(value: ControlWord) {
    // SAFETY: the value is a previously read FPCR with at most the FZ bit
    // changed.
    unsafe {
        std::arch::asm!("msr fpcr, {}", in(reg) value, options(nomem, nostack, preserves_flags));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    fn test_guard_enables_and_restores() {
        let before = flush_to_zero_enabled();
        {
            let _guard = ScopedNoDenormals::new();
            assert!(flush_to_zero_enabled());
        }
        assert_eq!(flush_to_zero_enabled(), before);
    }

    #[test]
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    fn test_denormal_is_flushed() {
        let _guard = ScopedNoDenormals::new();
        let tiny = std::hint::black_box(f32::MIN_POSITIVE);
        let result = std::hint::black_box(tiny * 0.5);
        assert_eq!(result, 0.0);
    }
}
