//! Pin |    Function     |      Notes
//! ----+-----------------+----------------------------------------------
//! PB22| UART0 TX (fn 2) | Console, set up by early_init
//! PB23| UART0 RX (fn 2) | Console, set up by early_init
//! PC2 | NAND CLE (fn 2) | Left muxed by BROM when it booted from NAND
//! PC7 | SDC2 CLK (fn 3) | Left muxed by BROM when it booted from MMC2
//! PF2 | SDC0 CLK (fn 2) | Left muxed by BROM when it booted from MMC0

use crate::drivers::gpio::{Bank, Pin};

// ----- Console -----
pub const UART0_TX: Pin = Pin::new(Bank::B, 22);
pub const UART0_RX: Pin = Pin::new(Bank::B, 23);
pub const FN_UART0_TX: u32 = 2;
pub const FN_UART0_RX: u32 = 2;

// ----- Boot straps -----
pub const SDC2_CLK: Pin = Pin::new(Bank::C, 7);
pub const FN_SDC2_CLK: u32 = 3;

pub const NAND_CLE: Pin = Pin::new(Bank::C, 2);
pub const FN_NAND_CLE: u32 = 2;

pub const SDC0_CLK: Pin = Pin::new(Bank::F, 2);
pub const FN_SDC0_CLK: u32 = 2;
