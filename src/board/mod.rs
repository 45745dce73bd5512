//! sunxi (A10-class) board support for the SPL stage.
//!
//! Maps the SoC's fixed registers and boot straps to named operations so
//! that the rest of the bootloader never needs to know a pin number or a
//! register address. Everything the board code cannot do itself (clock
//! tree, UART block, DRAM training, cache maintenance) comes in through
//! [`BootHooks`].

pub mod boot;
pub mod pins;
pub mod power;

pub use boot::{BootSource, ExecutionLocation};
pub use power::{PowerConfig, power_init};

use log::{debug, info, warn};

use crate::drivers::gpio::Pio;
use crate::drivers::watchdog::Watchdog;
use crate::mmio::Mmio;

// Memory map
pub const PIO_BASE: usize = 0x01C2_0800;
pub const TIMER_BASE: usize = 0x01C2_0C00;

/// Printed on the raw console before DRAM is brought up.
pub const SRAM_BANNER: &[u8] = b"sram\n";

/// Services the board code relies on but does not implement.
pub trait BootHooks {
    /// Configure the board's key/button inputs.
    fn key_init(&mut self);

    /// Bring up PLLs and bus clocks.
    fn clock_init(&mut self);

    /// Program the console UART. Pins are muxed before this is called.
    fn uart_init(&mut self);

    /// Blocking single-byte console output.
    fn putc(&mut self, byte: u8);

    /// Train the DRAM controller; returns the detected size in bytes, 0 on
    /// failure.
    fn dram_init(&mut self) -> usize;

    fn dcache_enable(&mut self);

    /// Address of the instruction being executed.
    fn program_counter(&self) -> u32;
}

pub struct Board<M, H> {
    mmio: M,
    hooks: H,
}

impl<M: Mmio, H: BootHooks> Board<M, H> {
    pub fn new(mmio: M, hooks: H) -> Self {
        Self { mmio, hooks }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn into_parts(self) -> (M, H) {
        (self.mmio, self.hooks)
    }

    fn pio(&self) -> Pio<&M> {
        Pio::new(&self.mmio, PIO_BASE)
    }

    fn watchdog(&self) -> Watchdog<&M> {
        Watchdog::new(&self.mmio, TIMER_BASE)
    }

    /// Which medium the BROM loaded us from.
    pub fn boot_source(&self) -> BootSource {
        let src = boot::boot_source(&self.pio());
        if src == BootSource::Unknown {
            warn!("board: boot source not recognised");
        } else {
            debug!("board: booted from {}", src);
        }
        src
    }

    pub fn disable_watchdog(&self) {
        self.watchdog().disable();
    }

    pub fn configure_console_pins(&self) {
        let pio = self.pio();
        pio.set_cfg_pin(pins::UART0_TX, pins::FN_UART0_TX);
        pio.set_cfg_pin(pins::UART0_RX, pins::FN_UART0_RX);
    }

    pub fn execution_location(&self) -> ExecutionLocation {
        ExecutionLocation::from_pc(self.hooks.program_counter())
    }

    /// First thing run after reset: quiet the watchdog, get clocks and a
    /// console going, and bring up DRAM unless we are already running
    /// from it.
    pub fn early_init(&mut self) {
        let location = self.execution_location();

        self.disable_watchdog();
        self.hooks.key_init();
        self.hooks.clock_init();
        self.configure_console_pins();
        self.hooks.uart_init();

        if location == ExecutionLocation::Sram {
            for &b in SRAM_BANNER {
                self.hooks.putc(b);
            }
            match self.hooks.dram_init() {
                0 => warn!("board: DRAM init reported no memory"),
                size => info!("board: DRAM {} MiB", size >> 20),
            }
        }
    }

    /// Reset the SoC through the watchdog.
    pub fn reset_cpu(&self) -> ! {
        self.watchdog().trigger_reset();
        loop {
            core::hint::spin_loop();
        }
    }

    /// I-cache is already on by the time we get here.
    pub fn enable_caches(&mut self) {
        #[cfg(feature = "dcache")]
        self.hooks.dcache_enable();
    }
}
