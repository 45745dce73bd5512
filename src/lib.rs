// early bring-up for Allwinner sunxi boards (SPL stage) + AXP209 PMIC

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod drivers;
pub mod logger;
pub mod mmio;

#[cfg(test)]
mod testing;
