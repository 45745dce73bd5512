//! Memory-mapped register access.
//!
//! Everything that touches SoC registers goes through [`Mmio`] so the
//! board code can run against a fake register file in tests. On target,
//! [`VolatileMmio`] performs the raw volatile accesses.

/// 32-bit memory-mapped register access.
///
/// Both methods take `&self`: registers are shared hardware state and the
/// SPL runs on a single core with interrupts masked.
pub trait Mmio {
    fn read32(&self, addr: usize) -> u32;

    fn write32(&self, addr: usize, value: u32);

    /// Read-modify-write: clear `mask`, then OR in `value & mask`.
    fn modify32(&self, addr: usize, mask: u32, value: u32) {
        let old = self.read32(addr);
        self.write32(addr, (old & !mask) | (value & mask));
    }
}

/// Direct volatile access to the physical address space.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatileMmio;

impl Mmio for VolatileMmio {
    #[inline]
    fn read32(&self, addr: usize) -> u32 {
        // Safety: callers only pass addresses from the SoC memory map in
        // `board`, which are valid, aligned device registers.
        unsafe { (addr as *const u32).read_volatile() }
    }

    #[inline]
    fn write32(&self, addr: usize, value: u32) {
        // Safety: see read32.
        unsafe { (addr as *mut u32).write_volatile(value) }
    }
}

impl<M: Mmio + ?Sized> Mmio for &M {
    fn read32(&self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&self, addr: usize, value: u32) {
        (**self).write32(addr, value)
    }
}
