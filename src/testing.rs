// Test doubles for registers, the I2C bus, delays and board hooks.

use std::cell::RefCell;
use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

use crate::board::BootHooks;
use crate::mmio::Mmio;

// ── MMIO ────────────────────────────────────────────────────────────────

/// Register file: unprogrammed addresses read as zero.
#[derive(Default)]
pub struct FakeMmio {
    regs: RefCell<HashMap<usize, u32>>,
    writes: RefCell<Vec<(usize, u32)>>,
}

impl FakeMmio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program a value without logging it as a write.
    pub fn set(&self, addr: usize, value: u32) {
        self.regs.borrow_mut().insert(addr, value);
    }

    pub fn get(&self, addr: usize) -> u32 {
        self.regs.borrow().get(&addr).copied().unwrap_or(0)
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.writes.borrow().clone()
    }
}

impl Mmio for FakeMmio {
    fn read32(&self, addr: usize) -> u32 {
        self.get(addr)
    }

    fn write32(&self, addr: usize, value: u32) {
        self.writes.borrow_mut().push((addr, value));
        self.regs.borrow_mut().insert(addr, value);
    }
}

// ── I2C ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl i2c::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Single-device bus with a 256-byte register file.
///
/// `fail_reads_after` / `fail_writes_after` let that many operations of
/// the kind succeed and fail every one after.
pub struct FakeI2c {
    pub regs: [u8; 256],
    pub expected_addr: SevenBitAddress,
    pub writes: Vec<(u8, u8)>,
    pub reads: Vec<u8>,
    pub fail_reads_after: Option<usize>,
    pub fail_writes_after: Option<usize>,
}

impl FakeI2c {
    pub fn new(expected_addr: SevenBitAddress) -> Self {
        Self {
            regs: [0; 256],
            expected_addr,
            writes: Vec::new(),
            reads: Vec::new(),
            fail_reads_after: None,
            fail_writes_after: None,
        }
    }

    pub fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    pub fn fail_reads(mut self) -> Self {
        self.fail_reads_after = Some(0);
        self
    }

    pub fn fail_writes(mut self) -> Self {
        self.fail_writes_after = Some(0);
        self
    }

    /// Values written to `reg`, in order.
    pub fn writes_to(&self, reg: u8) -> Vec<u8> {
        self.writes.iter().filter(|(r, _)| *r == reg).map(|(_, v)| *v).collect()
    }
}

impl ErrorType for FakeI2c {
    type Error = BusFault;
}

impl I2c for FakeI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        assert_eq!(address, self.expected_addr, "transaction to wrong device");

        // Register pointer set by the leading write of a write_read.
        let mut pointer: Option<u8> = None;

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => match bytes {
                    [reg] => pointer = Some(*reg),
                    [reg, value] => {
                        if self.fail_writes_after == Some(self.writes.len()) {
                            return Err(BusFault);
                        }
                        self.regs[*reg as usize] = *value;
                        self.writes.push((*reg, *value));
                    }
                    other => panic!("unexpected write payload {:?}", other),
                },
                Operation::Read(buf) => {
                    let reg = pointer.expect("read without register pointer");
                    if self.fail_reads_after == Some(self.reads.len()) {
                        return Err(BusFault);
                    }
                    self.reads.push(reg);
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = self.regs[reg.wrapping_add(i as u8) as usize];
                    }
                }
            }
        }
        Ok(())
    }
}

// ── Delay ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ── Board hooks ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCall {
    KeyInit,
    ClockInit,
    UartInit,
    DramInit,
    DcacheEnable,
}

/// Records each hook call together with the number of register writes
/// the board had issued to `mmio` by then.
pub struct FakeHooks<'a> {
    pub pc: u32,
    pub dram_size: usize,
    pub mmio: Option<&'a FakeMmio>,
    pub calls: Vec<(HookCall, usize)>,
    pub console: Vec<u8>,
}

impl<'a> FakeHooks<'a> {
    pub fn running_at(pc: u32) -> Self {
        Self {
            pc,
            dram_size: 512 << 20,
            mmio: None,
            calls: Vec::new(),
            console: Vec::new(),
        }
    }

    pub fn watching(mut self, mmio: &'a FakeMmio) -> Self {
        self.mmio = Some(mmio);
        self
    }

    pub fn call_order(&self) -> Vec<HookCall> {
        self.calls.iter().map(|(c, _)| *c).collect()
    }

    fn record(&mut self, call: HookCall) {
        let seen = self.mmio.map_or(0, |m| m.writes().len());
        self.calls.push((call, seen));
    }
}

impl BootHooks for FakeHooks<'_> {
    fn key_init(&mut self) {
        self.record(HookCall::KeyInit);
    }

    fn clock_init(&mut self) {
        self.record(HookCall::ClockInit);
    }

    fn uart_init(&mut self) {
        self.record(HookCall::UartInit);
    }

    fn putc(&mut self, byte: u8) {
        self.console.push(byte);
    }

    fn dram_init(&mut self) -> usize {
        self.record(HookCall::DramInit);
        self.dram_size
    }

    fn dcache_enable(&mut self) {
        self.record(HookCall::DcacheEnable);
    }

    fn program_counter(&self) -> u32 {
        self.pc
    }
}
