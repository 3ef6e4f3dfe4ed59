use crate::cpu::Cpu;

impl Cpu {
    pub fn nop(&mut self) {}

    pub fn di(&mut self) {
        self.ime = false;
    }

    pub fn ei(&mut self) {
        self.ime = true;
    }

    /// Enter the low-power HALT state. The interrupt logic clears
    /// `halted` when a request arrives.
    pub fn halt(&mut self) {
        self.halted = true;
    }
}
