use crate::cpu::{Condition, Cpu};

impl Cpu {
    /// `JP cc,a16`. Returns whether the jump was taken.
    pub fn jp(&mut self, addr: u16, cond: Condition) -> bool {
        if !self.regs.flags.satisfies(cond) {
            return false;
        }
        self.regs.pc = addr;
        true
    }

    /// `JP HL`.
    pub fn jp_hl(&mut self) {
        self.regs.pc = self.regs.hl();
    }

    /// `JR cc,e8`. The displacement is relative to the address following
    /// the operand, which is where `pc` already points.
    pub fn jr(&mut self, offset: i8, cond: Condition) -> bool {
        if !self.regs.flags.satisfies(cond) {
            return false;
        }
        self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
        true
    }
}
