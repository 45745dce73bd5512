//! sunxi PIO (pin controller) function select.
//!
//! Each bank is a 0x24-byte block: four CFG registers holding eight 4-bit
//! function fields each, then DAT, DRV0/1 and PULL0/1. Pins are numbered
//! `bank * 32 + index`, so PB22 is `32 + 22`.

use crate::mmio::Mmio;

const BANK_STRIDE: usize = 0x24;
const CFG_FIELD_BITS: u32 = 4;
const CFG_FIELD_MASK: u32 = 0xF;
const PINS_PER_CFG_REG: u32 = 8;

pub const PINS_PER_BANK: u32 = 32;

/// Bank letter to bank index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Bank {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
}

/// Global pin number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(pub u32);

impl Pin {
    /// `index` must be below 32; larger values would land in the next bank.
    pub const fn new(bank: Bank, index: u32) -> Self {
        debug_assert!(index < PINS_PER_BANK, "pin index out of bank");
        Pin(bank as u32 * PINS_PER_BANK + index)
    }

    pub const fn bank(self) -> u32 {
        self.0 / PINS_PER_BANK
    }

    pub const fn index(self) -> u32 {
        self.0 % PINS_PER_BANK
    }

    // (byte offset of the CFG register within the PIO block, bit shift)
    const fn cfg_location(self) -> (usize, u32) {
        let index = self.index();
        let reg = (index / PINS_PER_CFG_REG) as usize;
        let shift = (index % PINS_PER_CFG_REG) * CFG_FIELD_BITS;
        (self.bank() as usize * BANK_STRIDE + reg * 4, shift)
    }
}

pub struct Pio<M> {
    mmio: M,
    base: usize,
}

impl<M: Mmio> Pio<M> {
    pub const fn new(mmio: M, base: usize) -> Self {
        Self { mmio, base }
    }

    /// Current function code of `pin`.
    pub fn cfg_pin(&self, pin: Pin) -> u32 {
        let (offset, shift) = pin.cfg_location();
        (self.mmio.read32(self.base + offset) >> shift) & CFG_FIELD_MASK
    }

    /// Select function `func` for `pin`, leaving the other seven fields of
    /// the register untouched.
    pub fn set_cfg_pin(&self, pin: Pin, func: u32) {
        let (offset, shift) = pin.cfg_location();
        self.mmio.modify32(
            self.base + offset,
            CFG_FIELD_MASK << shift,
            (func & CFG_FIELD_MASK) << shift,
        );
    }
}
