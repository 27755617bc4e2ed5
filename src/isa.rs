//! Runtime CPU feature dispatch for the escape scanner.
//!
//! The only vectorizable hot spot is locating the next byte that needs a
//! JSON escape; all emission goes through the scalar path, so every kernel
//! is output-identical to [`crate::escape::clean_prefix_len`].

use once_cell::sync::Lazy;

use crate::escape;

/// Returns the length of the longest escape-free prefix of the input.
pub(crate) type EscapeScan = fn(&[u8]) -> usize;

struct Kernel {
    name: &'static str,
    scan: EscapeScan,
}

static ACTIVE: Lazy<Kernel> = Lazy::new(detect);

/// Name of the instruction set level the transcoder was specialized for at
/// startup: `"AVX2"`, `"SSE2"`, or `"Baseline"`.
pub fn active_isa() -> &'static str {
    ACTIVE.name
}

pub(crate) fn escape_scan() -> EscapeScan {
    ACTIVE.scan
}

fn detect() -> Kernel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return Kernel {
                name: "AVX2",
                scan: x86_64::scan_avx2,
            };
        }
        if is_x86_feature_detected!("sse2") {
            return Kernel {
                name: "SSE2",
                scan: x86_64::scan_sse2,
            };
        }
    }
    Kernel {
        name: "Baseline",
        scan: escape::clean_prefix_len,
    }
}

#[cfg(target_arch = "x86_64")]
mod x86_64 {
    use std::arch::x86_64::*;

    use crate::escape;

    pub(super) fn scan_avx2(bytes: &[u8]) -> usize {
        // Safety: only installed after `is_x86_feature_detected!("avx2")`.
        unsafe { avx2(bytes) }
    }

    pub(super) fn scan_sse2(bytes: &[u8]) -> usize {
        // Safety: only installed after `is_x86_feature_detected!("sse2")`.
        unsafe { sse2(bytes) }
    }

    // Escape if (b < 0x20 || b == 0x22 || b == 0x5c). The sign-bit XOR turns
    // the unsigned < 0x20 test into a signed compare.

    #[target_feature(enable = "avx2")]
    unsafe fn avx2(bytes: &[u8]) -> usize {
        let bias = _mm256_set1_epi8(0x80u8 as i8);
        let space = _mm256_set1_epi8((0x20u8 ^ 0x80) as i8);
        let quote = _mm256_set1_epi8(0x22);
        let backslash = _mm256_set1_epi8(0x5C);

        let mut offset = 0;
        while offset + 32 <= bytes.len() {
            let chars = _mm256_loadu_si256(bytes.as_ptr().add(offset).cast());
            let control = _mm256_cmpgt_epi8(space, _mm256_xor_si256(chars, bias));
            let mut hits = _mm256_or_si256(control, _mm256_cmpeq_epi8(chars, quote));
            hits = _mm256_or_si256(hits, _mm256_cmpeq_epi8(chars, backslash));
            let mask = _mm256_movemask_epi8(hits) as u32;
            if mask != 0 {
                return offset + mask.trailing_zeros() as usize;
            }
            offset += 32;
        }
        offset + escape::clean_prefix_len(&bytes[offset..])
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sse2(bytes: &[u8]) -> usize {
        let bias = _mm_set1_epi8(0x80u8 as i8);
        let space = _mm_set1_epi8((0x20u8 ^ 0x80) as i8);
        let quote = _mm_set1_epi8(0x22);
        let backslash = _mm_set1_epi8(0x5C);

        let mut offset = 0;
        while offset + 16 <= bytes.len() {
            let chars = _mm_loadu_si128(bytes.as_ptr().add(offset).cast());
            let control = _mm_cmpgt_epi8(space, _mm_xor_si128(chars, bias));
            let mut hits = _mm_or_si128(control, _mm_cmpeq_epi8(chars, quote));
            hits = _mm_or_si128(hits, _mm_cmpeq_epi8(chars, backslash));
            let mask = _mm_movemask_epi8(hits) as u32;
            if mask != 0 {
                return offset + mask.trailing_zeros() as usize;
            }
            offset += 16;
        }
        offset + escape::clean_prefix_len(&bytes[offset..])
    }
}
