// bringup/src/bss.rs
//! Zero-initialization of `.bss`.

use core::fmt;
use core::ptr;

/// Stores are always 32-bit, regardless of the host's pointer width.
pub const WORD: usize = core::mem::size_of::<u32>();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// `start` lies above `end`.
    Inverted,
    /// A bound is not word aligned.
    Misaligned,
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::Inverted => f.write_str("region start is above its end"),
            RegionError::Misaligned => f.write_str("region bound is not word aligned"),
        }
    }
}

/// Word-aligned `[start, end)` with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryRegion {
    start: usize,
    end: usize,
}

impl MemoryRegion {
    pub fn new(start: usize, end: usize) -> Result<Self, RegionError> {
        if start % WORD != 0 || end % WORD != 0 {
            return Err(RegionError::Misaligned);
        }
        if start > end {
            return Err(RegionError::Inverted);
        }
        Ok(MemoryRegion { start, end })
    }

    pub const fn empty() -> Self {
        MemoryRegion { start: 0, end: 0 }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn len_words(&self) -> usize {
        (self.end - self.start) / WORD
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Write zero to every word of `region`.
///
/// Volatile stores: the optimizer must not assume anything about the
/// contents or reason that `start` and `end` cannot alias.
///
/// # Safety
/// `region` must be writable memory that nothing live is using. In the boot
/// path that holds because nothing has read a global yet.
pub unsafe fn zero(region: MemoryRegion) {
    let mut p = region.start as *mut u32;
    let end = region.end as *mut u32;
    while p < end {
        ptr::write_volatile(p, 0);
        p = p.add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARBAGE: u32 = 0xA5A5_A5A5;

    fn region_of(buf: &mut [u32], from: usize, to: usize) -> MemoryRegion {
        let base = buf.as_mut_ptr() as usize;
        MemoryRegion::new(base + from * WORD, base + to * WORD).unwrap()
    }

    #[test]
    fn test_zero_clears_only_region() {
        let mut buf = [GARBAGE; 16];
        let r = region_of(&mut buf, 4, 12);
        unsafe { zero(r) };

        for (i, w) in buf.iter().enumerate() {
            if (4..12).contains(&i) {
                assert_eq!(*w, 0, "word {i} not cleared");
            } else {
                assert_eq!(*w, GARBAGE, "word {i} outside region touched");
            }
        }
    }

    #[test]
    fn test_zero_empty_region_is_noop() {
        let mut buf = [GARBAGE; 4];
        let r = region_of(&mut buf, 2, 2);
        assert!(r.is_empty());
        assert_eq!(r.len_words(), 0);
        unsafe { zero(r) };
        assert_eq!(buf, [GARBAGE; 4]);

        unsafe { zero(MemoryRegion::empty()) };
    }

    #[test]
    fn test_zero_is_idempotent() {
        let mut buf = [GARBAGE; 8];
        let r = region_of(&mut buf, 0, 8);
        unsafe {
            zero(r);
            zero(r);
        }
        assert_eq!(buf, [0; 8]);
    }

    #[test]
    fn test_single_word_region() {
        let mut buf = [GARBAGE; 3];
        let r = region_of(&mut buf, 1, 2);
        assert_eq!(r.len_words(), 1);
        unsafe { zero(r) };
        assert_eq!(buf, [GARBAGE, 0, GARBAGE]);
    }

    #[test]
    fn test_region_validation() {
        assert_eq!(MemoryRegion::new(0x100, 0x80), Err(RegionError::Inverted));
        assert_eq!(MemoryRegion::new(0x102, 0x200), Err(RegionError::Misaligned));
        assert_eq!(MemoryRegion::new(0x100, 0x1FE), Err(RegionError::Misaligned));

        let r = MemoryRegion::new(0x3FCA_0000, 0x3FCA_0040).unwrap();
        assert_eq!(r.start(), 0x3FCA_0000);
        assert_eq!(r.end(), 0x3FCA_0040);
        assert_eq!(r.len_words(), 16);
    }

    #[test]
    fn test_region_error_display() {
        assert_eq!(
            std::format!("{}", RegionError::Inverted),
            "region start is above its end"
        );
    }
}
