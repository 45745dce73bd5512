// sunxi watchdog, part of the timer block.
//
// ctl  (+0x90): bit 0 restart, bits 12:1 must hold key 0xA57 for the
//               restart bit to take effect
// mode (+0x94): bit 0 enable, bit 1 reset on expiry, bits 6:3 interval
//               (0 = 0.5s, the shortest)

use crate::mmio::Mmio;

const WDOG_CTL: usize = 0x90;
const WDOG_MODE: usize = 0x94;

const CTL_RESTART: u32 = 1 << 0;
const CTL_KEY: u32 = 0x0A57 << 1;
const MODE_EN: u32 = 1 << 0;
const MODE_RESET_EN: u32 = 1 << 1;

pub struct Watchdog<M> {
    mmio: M,
    timer_base: usize,
}

impl<M: Mmio> Watchdog<M> {
    pub const fn new(mmio: M, timer_base: usize) -> Self {
        Self { mmio, timer_base }
    }

    pub fn mode_addr(&self) -> usize {
        self.timer_base + WDOG_MODE
    }

    pub fn ctl_addr(&self) -> usize {
        self.timer_base + WDOG_CTL
    }

    pub fn disable(&self) {
        self.mmio.write32(self.mode_addr(), 0);
    }

    /// Arm for reset at the shortest interval and kick the counter. The
    /// SoC resets about half a second later.
    pub fn trigger_reset(&self) {
        self.mmio.write32(self.mode_addr(), MODE_RESET_EN | MODE_EN);
        self.mmio.write32(self.ctl_addr(), CTL_KEY | CTL_RESTART);
    }
}
