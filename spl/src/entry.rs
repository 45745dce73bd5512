// C-linkage glue between the SPL's start code and the board module.
//
// start.S calls s_init() right after reset with a stack in SRAM. The
// clock, UART, key and DRAM routines live in the C side of the SPL and are
// reached through the extern block below.

use core::arch::asm;
use core::panic::PanicInfo;

use log::error;

use sunxi_boot::board::{Board, BootHooks};
use sunxi_boot::logger::{self, ConsoleLogger};
use sunxi_boot::mmio::VolatileMmio;

unsafe extern "C" {
    fn sunxi_key_init();
    fn clock_init();
    fn uart0_init();
    fn uart0_putc(c: u8);
    fn sunxi_dram_init() -> usize;
    fn dcache_enable();
}

fn console_putc(c: u8) {
    // Safety: uart0_putc only touches UART0 registers and is valid once
    // uart0_init has run.
    unsafe { uart0_putc(c) }
}

static LOGGER: ConsoleLogger = ConsoleLogger::new(console_putc);

struct SplHooks;

impl BootHooks for SplHooks {
    fn key_init(&mut self) {
        unsafe { sunxi_key_init() }
    }

    fn clock_init(&mut self) {
        unsafe { clock_init() }
    }

    fn uart_init(&mut self) {
        unsafe { uart0_init() };
        logger::init(&LOGGER);
    }

    fn putc(&mut self, byte: u8) {
        console_putc(byte);
    }

    fn dram_init(&mut self) -> usize {
        unsafe { sunxi_dram_init() }
    }

    fn dcache_enable(&mut self) {
        unsafe { dcache_enable() }
    }

    fn program_counter(&self) -> u32 {
        let pc: u32;
        // Safety: reads PC into a register, no memory or flag effects.
        unsafe { asm!("mov {}, pc", out(reg) pc, options(nomem, nostack, preserves_flags)) };
        pc
    }
}

fn board() -> Board<VolatileMmio, SplHooks> {
    Board::new(VolatileMmio, SplHooks)
}

#[unsafe(no_mangle)]
pub extern "C" fn s_init() {
    board().early_init();
}

#[unsafe(no_mangle)]
pub extern "C" fn reset_cpu(_addr: usize) -> ! {
    board().reset_cpu()
}

#[unsafe(no_mangle)]
pub extern "C" fn enable_caches() {
    board().enable_caches();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("panic: {}", info);
    board().reset_cpu()
}
