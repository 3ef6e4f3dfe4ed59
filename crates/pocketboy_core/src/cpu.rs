//! SM83 register file and instruction execution engine.
//!
//! Fetch and decode live outside this crate: a dispatcher reads opcodes
//! at `pc`, advances it and calls the helper matching the instruction's
//! semantics. Pure register/flag operations are free functions in
//! [`alu`] and [`bits`]; anything touching memory is a `Cpu` method that
//! takes the bus.

pub mod alu;
pub mod bits;
mod bus;
mod exec;
pub mod flags;
mod regs;

pub use bus::Bus;
pub use exec::HlStep;
pub use regs::{Flags, Reg16, Reg8, Registers};

use crate::config::PowerOnState;

/// Branch conditions encoded by `JP cc`, `JR cc`, `CALL cc` and `RET cc`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Condition {
    Always,
    Nz,
    Z,
    Nc,
    C,
}

impl Flags {
    #[inline]
    pub fn satisfies(self, cond: Condition) -> bool {
        match cond {
            Condition::Always => true,
            Condition::Nz => !self.z,
            Condition::Z => self.z,
            Condition::Nc => !self.c,
            Condition::C => self.c,
        }
    }
}

/// CPU state: registers plus the interrupt-master-enable and halt flags.
///
/// Interrupt request generation and the one-instruction `EI` delay are
/// handled by the caller; the core only stores the flags it consumes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
}

impl Cpu {
    /// Power-on CPU with every field zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_power_on(state: PowerOnState) -> Self {
        let mut cpu = Self::new();
        cpu.reset(state);
        cpu
    }

    pub fn reset(&mut self, state: PowerOnState) {
        *self = Self::default();
        if state == PowerOnState::DmgPostBoot {
            self.apply_dmg_boot_state();
        }
    }

    /// Registers as the DMG boot ROM leaves them when it hands control to
    /// cartridge code at $0100 (Pan Docs).
    fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.set_f(0xB0);
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
    }
}
