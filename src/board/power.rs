// Board power-on: probe the AXP209 and program the default rail voltages.

use embedded_hal::i2c::I2c;
use log::info;

use crate::drivers::axp209::{Axp209, Error, Rail};

/// Rail voltages in millivolts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerConfig {
    /// CPU core
    pub dcdc2_mv: i32,
    /// DRAM controller / internal logic
    pub dcdc3_mv: i32,
    /// Analog + RTC
    pub ldo2_mv: i32,
    pub ldo3_mv: i32,
    pub ldo4_mv: i32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            dcdc2_mv: 1400,
            dcdc3_mv: 1250,
            ldo2_mv: 3000,
            ldo3_mv: 2800,
            ldo4_mv: 2800,
        }
    }
}

impl PowerConfig {
    /// (rail, mV) in the order they are programmed.
    pub fn rails(&self) -> [(Rail, i32); 5] {
        [
            (Rail::Dcdc2, self.dcdc2_mv),
            (Rail::Dcdc3, self.dcdc3_mv),
            (Rail::Ldo2, self.ldo2_mv),
            (Rail::Ldo3, self.ldo3_mv),
            (Rail::Ldo4, self.ldo4_mv),
        ]
    }
}

/// Check the PMIC and bring every rail to its configured voltage.
/// Stops at the first failure.
pub fn power_init<I2C, E>(pmic: &mut Axp209<I2C>, cfg: &PowerConfig) -> Result<(), Error<E>>
where
    I2C: I2c<Error = E>,
{
    pmic.init()?;
    for (rail, mv) in cfg.rails() {
        pmic.set_voltage(rail, mv)?;
    }
    info!("power: rails configured");
    Ok(())
}
