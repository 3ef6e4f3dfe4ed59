use crate::cpu::{Bus, Cpu, HlStep, Reg8};

impl Cpu {
    fn step_hl(&mut self, step: HlStep) -> u16 {
        let addr = self.regs.hl();
        let next = match step {
            HlStep::Inc => addr.wrapping_add(1),
            HlStep::Dec => addr.wrapping_sub(1),
        };
        self.regs.set_hl(next);
        addr
    }

    /// `LD r,(addr)`.
    pub fn load_from<B: Bus>(&mut self, bus: &mut B, reg: Reg8, addr: u16) {
        let value = bus.read8(addr);
        self.regs.write8(reg, value);
    }

    /// `LD (addr),r`.
    pub fn store_to<B: Bus>(&mut self, bus: &mut B, addr: u16, reg: Reg8) {
        bus.write8(addr, self.regs.read8(reg));
    }

    /// `LD (HL+),A` / `LD (HL-),A`.
    pub fn store_a_hl<B: Bus>(&mut self, bus: &mut B, step: HlStep) {
        let addr = self.step_hl(step);
        bus.write8(addr, self.regs.a);
    }

    /// `LD A,(HL+)` / `LD A,(HL-)`.
    pub fn load_a_hl<B: Bus>(&mut self, bus: &mut B, step: HlStep) {
        let addr = self.step_hl(step);
        self.regs.a = bus.read8(addr);
    }

    /// `LDH (a8),A`; also `LD (C),A` with `offset = C`.
    pub fn store_high<B: Bus>(&mut self, bus: &mut B, offset: u8) {
        let addr = 0xFF00u16.wrapping_add(offset as u16);
        bus.write8(addr, self.regs.a);
    }

    /// `LDH A,(a8)`; also `LD A,(C)` with `offset = C`.
    pub fn load_high<B: Bus>(&mut self, bus: &mut B, offset: u8) {
        let addr = 0xFF00u16.wrapping_add(offset as u16);
        self.regs.a = bus.read8(addr);
    }

    /// `LD (a16),SP`.
    pub fn store_sp<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        bus.write16(addr, self.regs.sp);
    }
}
