use crate::cpu::{Bus, Condition, Cpu, Reg16};

impl Cpu {
    /// Push a word; the stack grows downward with the high byte written
    /// first, so memory[SP] = low and memory[SP+1] = high afterwards.
    pub fn push<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    pub fn pop<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// `PUSH rr`.
    pub fn push_pair<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        debug_assert!(reg != Reg16::SP, "PUSH has no SP encoding");
        let value = self.regs.read16(reg);
        self.push(bus, value);
    }

    /// `POP rr`. Popping AF drops the low nibble of F.
    pub fn pop_pair<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        debug_assert!(reg != Reg16::SP, "POP has no SP encoding");
        let value = self.pop(bus);
        self.regs.write16(reg, value);
    }

    /// `CALL cc,a16`. Returns whether the call was taken.
    pub fn call<B: Bus>(&mut self, bus: &mut B, addr: u16, cond: Condition) -> bool {
        if !self.regs.flags.satisfies(cond) {
            return false;
        }
        let ret = self.regs.pc;
        self.push(bus, ret);
        self.regs.pc = addr;
        true
    }

    /// `RET cc`. Returns whether the return was taken.
    pub fn ret<B: Bus>(&mut self, bus: &mut B, cond: Condition) -> bool {
        if !self.regs.flags.satisfies(cond) {
            return false;
        }
        self.regs.pc = self.pop(bus);
        true
    }

    /// `RETI`: return and re-enable interrupts immediately.
    pub fn reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop(bus);
        self.ime = true;
    }

    /// `RST n`.
    pub fn rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        debug_assert!(vector & !0x38 == 0, "invalid RST vector {vector:#04x}");
        let ret = self.regs.pc;
        self.push(bus, ret);
        self.regs.pc = (vector & 0x38) as u16;
    }
}
