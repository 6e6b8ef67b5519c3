// Cycle counter and timing loop shared by the benchmarks.

#[cfg(target_arch = "x86_64")]
pub fn core_cycles() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "aarch64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("dsb sy", "mrs {}, pmccntr_el0", out(reg) x);
    }
    x
}

// Elsewhere, nanoseconds stand in for cycles.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn core_cycles() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

/// Runs `f` for `rounds` rounds of `inner` calls each, and returns the
/// median cost of one call.
#[allow(dead_code)]
pub fn median_cost<F: FnMut()>(rounds: usize, inner: usize, mut f: F) -> f64 {
    let mut tt = vec![0u64; rounds];
    for t in tt.iter_mut() {
        let begin = core_cycles();
        for _ in 0..inner {
            f();
        }
        *t = core_cycles().wrapping_sub(begin);
    }
    tt.sort_unstable();
    (tt[rounds >> 1] as f64) / (inner as f64)
}
