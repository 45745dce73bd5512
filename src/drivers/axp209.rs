// X-Powers AXP209 PMIC driver (board-independent)
//
// Single-byte register reads/writes over I2C at 0x34. Each rail setter
// clamps its millivolt input to the rail's range, encodes it and commits
// it; bus errors abort the operation immediately and are returned as-is.
//
// DCDC2 is walked one code at a time even though the chip has a built-in
// slew limiter. LDO2 and LDO4 share register 0x28 (LDO2 high nibble, LDO4
// low nibble), so both are read-modify-write.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, info, warn};

/// 7-bit bus address.
pub const AXP209_ADDR: u8 = 0x34;

/// The only chip version this driver accepts.
pub const AXP209_CHIP_VERSION: u8 = 0x21;

/// Pass to [`Axp209::set_ldo3`] to let the LDO3IN pin set the voltage.
pub const LDO3_FOLLOW_PIN: i32 = -1;

const POWER_OFF_SETTLE_MS: u32 = 10;

mod reg {
    pub const CHIP_VERSION: u8 = 0x03;
    pub const DCDC2_VOLTAGE: u8 = 0x23;
    pub const DCDC3_VOLTAGE: u8 = 0x27;
    pub const LDO24_VOLTAGE: u8 = 0x28;
    pub const LDO3_VOLTAGE: u8 = 0x29;
    pub const SHUTDOWN: u8 = 0x32;
}

const SHUTDOWN_POWER_OFF: u8 = 1 << 7;
const LDO3_PIN_CONTROLLED: u8 = 0x80;

// LDO4 output levels, indexed by register code
const LDO4_MV: [u16; 16] = [
    1250, 1300, 1400, 1500, 1600, 1700, 1800, 1900, 2000, 2500, 2700, 2800, 3000, 3100, 3200,
    3300,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rail {
    Dcdc2,
    Dcdc3,
    Ldo2,
    Ldo3,
    Ldo4,
}

impl Rail {
    pub fn name(self) -> &'static str {
        match self {
            Rail::Dcdc2 => "DCDC2",
            Rail::Dcdc3 => "DCDC3",
            Rail::Ldo2 => "LDO2",
            Rail::Ldo3 => "LDO3",
            Rail::Ldo4 => "LDO4",
        }
    }
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// I2C transaction failed
    Bus(E),
    /// Chip answered with a version other than [`AXP209_CHIP_VERSION`]
    UnexpectedChipVersion(u8),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "i2c transaction failed: {:?}", e),
            Error::UnexpectedChipVersion(v) => write!(
                f,
                "unexpected chip version {:#04x} (want {:#04x})",
                v, AXP209_CHIP_VERSION
            ),
        }
    }
}

// ── Encoders ────────────────────────────────────────────────────────────

// (mv - min) / step, clamped to 0..=max_code
fn linear_code(mv: i32, min_mv: i32, step_mv: i32, max_code: u8) -> u8 {
    (mv.saturating_sub(min_mv) / step_mv).clamp(0, i32::from(max_code)) as u8
}

/// 700..2275 mV in 25 mV steps.
pub fn dcdc2_code(mv: i32) -> u8 {
    linear_code(mv, 700, 25, 63)
}

/// 25 mV steps from 700 mV. The chip is rated to 3575 mV (code 115) but
/// the field is 7 bits wide, so requests up to 3875 mV still encode
/// linearly and only clamp at code 127.
pub fn dcdc3_code(mv: i32) -> u8 {
    linear_code(mv, 700, 25, 127)
}

/// 1800..3300 mV in 100 mV steps.
pub fn ldo2_code(mv: i32) -> u8 {
    linear_code(mv, 1800, 100, 15)
}

/// 700..3875 mV in 25 mV steps, or [`LDO3_FOLLOW_PIN`] for 0x80.
pub fn ldo3_code(mv: i32) -> u8 {
    if mv == LDO3_FOLLOW_PIN {
        return LDO3_PIN_CONTROLLED;
    }
    linear_code(mv, 700, 25, 127)
}

/// Lowest LDO4 level that is at least `mv`; anything above 3300 mV
/// selects 3300 mV.
pub fn ldo4_code(mv: i32) -> u8 {
    LDO4_MV
        .iter()
        .position(|&level| i32::from(level) >= mv)
        .unwrap_or(LDO4_MV.len() - 1) as u8
}

/// Millivolts selected by LDO4 code `code` (low nibble only).
pub fn ldo4_mv(code: u8) -> u16 {
    LDO4_MV[(code & 0x0F) as usize]
}

// ── Driver ──────────────────────────────────────────────────────────────

pub struct Axp209<I2C> {
    i2c: I2C,
}

impl<I2C, E> Axp209<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(AXP209_ADDR, &[reg], &mut buf)
            .map_err(Error::Bus)?;
        Ok(buf[0])
    }

    pub fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), Error<E>> {
        self.i2c.write(AXP209_ADDR, &[reg, val]).map_err(Error::Bus)
    }

    pub fn chip_version(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(reg::CHIP_VERSION)
    }

    /// Check that an AXP209 is answering on the bus.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        let ver = self.chip_version()?;
        if ver != AXP209_CHIP_VERSION {
            warn!("axp209: unexpected chip version {:#04x}", ver);
            return Err(Error::UnexpectedChipVersion(ver));
        }
        info!("axp209: found, version {:#04x}", ver);
        Ok(())
    }

    /// Step DCDC2 one code at a time until it reads back as the target.
    ///
    /// A failure mid-ramp leaves the rail wherever the last successful
    /// write put it.
    pub fn set_dcdc2(&mut self, mv: i32) -> Result<(), Error<E>> {
        let target = dcdc2_code(mv);
        loop {
            let mut current = self.read_reg(reg::DCDC2_VOLTAGE)?;
            if current == target {
                return Ok(());
            }
            if current < target {
                current += 1;
            } else {
                current -= 1;
            }
            self.write_reg(reg::DCDC2_VOLTAGE, current)?;
        }
    }

    pub fn set_dcdc3(&mut self, mv: i32) -> Result<(), Error<E>> {
        self.write_reg(reg::DCDC3_VOLTAGE, dcdc3_code(mv))?;
        // read back so a dead bus shows up here; the value is not checked
        self.read_reg(reg::DCDC3_VOLTAGE)?;
        Ok(())
    }

    pub fn set_ldo2(&mut self, mv: i32) -> Result<(), Error<E>> {
        let target = ldo2_code(mv);
        let cur = self.read_reg(reg::LDO24_VOLTAGE)?;
        self.write_reg(reg::LDO24_VOLTAGE, (cur & 0x0F) | (target << 4))
    }

    /// `mv == LDO3_FOLLOW_PIN` hands LDO3 over to the LDO3IN pin.
    pub fn set_ldo3(&mut self, mv: i32) -> Result<(), Error<E>> {
        self.write_reg(reg::LDO3_VOLTAGE, ldo3_code(mv))
    }

    pub fn set_ldo4(&mut self, mv: i32) -> Result<(), Error<E>> {
        let target = ldo4_code(mv);
        let cur = self.read_reg(reg::LDO24_VOLTAGE)?;
        self.write_reg(reg::LDO24_VOLTAGE, (cur & 0xF0) | target)
    }

    pub fn set_voltage(&mut self, rail: Rail, mv: i32) -> Result<(), Error<E>> {
        debug!("axp209: {} -> {} mV", rail, mv);
        match rail {
            Rail::Dcdc2 => self.set_dcdc2(mv),
            Rail::Dcdc3 => self.set_dcdc3(mv),
            Rail::Ldo2 => self.set_ldo2(mv),
            Rail::Ldo3 => self.set_ldo3(mv),
            Rail::Ldo4 => self.set_ldo4(mv),
        }
    }

    /// Raw voltage code currently programmed for `rail`.
    pub fn read_rail_code(&mut self, rail: Rail) -> Result<u8, Error<E>> {
        Ok(match rail {
            Rail::Dcdc2 => self.read_reg(reg::DCDC2_VOLTAGE)? & 0x3F,
            Rail::Dcdc3 => self.read_reg(reg::DCDC3_VOLTAGE)? & 0x7F,
            Rail::Ldo2 => self.read_reg(reg::LDO24_VOLTAGE)? >> 4,
            Rail::Ldo3 => self.read_reg(reg::LDO3_VOLTAGE)?,
            Rail::Ldo4 => self.read_reg(reg::LDO24_VOLTAGE)? & 0x0F,
        })
    }

    /// Cut all rails. Blocks 10 ms after the shutdown bit is written so the
    /// outputs can drain; if either bus transaction fails the board is
    /// still powered and this returns straight away.
    pub fn power_off<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        let val = self.read_reg(reg::SHUTDOWN)?;
        self.write_reg(reg::SHUTDOWN, val | SHUTDOWN_POWER_OFF)?;
        delay.delay_ms(POWER_OFF_SETTLE_MS);
        Ok(())
    }
}
