// Hardware drivers: chip-level and SoC-block-level, board-independent.
//
// Register addresses come in through constructors; the board module owns
// the memory map.

pub mod axp209;
pub mod gpio;
pub mod watchdog;
