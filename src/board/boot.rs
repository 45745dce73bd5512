// Boot medium and execution location detection.
//
// The BROM tries MMC0, NAND, then MMC2, and leaves the pins of whichever
// controller it loaded us from muxed to that controller. Reading the pin
// functions back tells us where we came from.

use core::fmt;

use super::pins;
use crate::drivers::gpio::{Pin, Pio};
use crate::mmio::Mmio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootSource {
    /// SD/MMC controller 0 (PF2 muxed to SDC0)
    Mmc0,
    Nand,
    /// SD/MMC controller 2 (PC7 muxed to SDC2)
    Mmc2,
    Unknown,
}

impl BootSource {
    pub fn name(self) -> &'static str {
        match self {
            BootSource::Mmc0 => "MMC0",
            BootSource::Nand => "NAND",
            BootSource::Mmc2 => "MMC2",
            BootSource::Unknown => "unknown",
        }
    }

    pub fn is_mmc(self) -> bool {
        matches!(self, BootSource::Mmc0 | BootSource::Mmc2)
    }
}

impl fmt::Display for BootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// checked in order, first match wins
const STRAPS: [(Pin, u32, BootSource); 3] = [
    (pins::SDC2_CLK, pins::FN_SDC2_CLK, BootSource::Mmc2),
    (pins::NAND_CLE, pins::FN_NAND_CLE, BootSource::Nand),
    (pins::SDC0_CLK, pins::FN_SDC0_CLK, BootSource::Mmc0),
];

pub fn boot_source<M: Mmio>(pio: &Pio<M>) -> BootSource {
    STRAPS
        .iter()
        .find(|&&(pin, func, _)| pio.cfg_pin(pin) == func)
        .map_or(BootSource::Unknown, |&(_, _, src)| src)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionLocation {
    Sram,
    Dram,
}

impl ExecutionLocation {
    /// SRAM sits in the bottom 256 MiB of the address space, DRAM starts
    /// at 0x4000_0000.
    pub fn from_pc(pc: u32) -> Self {
        if pc & 0xF000_0000 == 0 {
            ExecutionLocation::Sram
        } else {
            ExecutionLocation::Dram
        }
    }
}
