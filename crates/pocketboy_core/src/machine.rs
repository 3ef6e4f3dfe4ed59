//! CPU and memory map bundled into one machine.

use std::path::Path;

use anyhow::Context;

use crate::cartridge::Cartridge;
use crate::config::MachineConfig;
use crate::cpu::Cpu;
use crate::error::Result;
use crate::memory::{MemoryState, Mmu};

/// High-level Game Boy machine.
///
/// Instruction fetch and decode are driven from outside: split-borrow
/// `cpu` and `mmu` and hand the MMU to the CPU helpers as their bus.
#[derive(Clone, Debug)]
pub struct GameBoy {
    pub cpu: Cpu,
    pub mmu: Mmu,
    config: MachineConfig,
}

/// Snapshot of every mutable piece of a [`GameBoy`]. The cartridge image
/// is not included; restore into a machine built from the same ROM.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveState {
    pub cpu: Cpu,
    pub memory: MemoryState,
}

impl GameBoy {
    pub fn new(cartridge: Cartridge, config: MachineConfig) -> Result<Self> {
        let mmu = Mmu::new(cartridge, &config)?;
        let cpu = Cpu::with_power_on(config.power_on);
        Ok(Self { cpu, mmu, config })
    }

    pub fn from_rom(rom: Vec<u8>, config: MachineConfig) -> Result<Self> {
        Self::new(Cartridge::new(rom)?, config)
    }

    pub fn from_file(path: impl AsRef<Path>, config: MachineConfig) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_file(path)?;
        let gb = Self::new(cartridge, config)
            .with_context(|| format!("cannot run cartridge {}", path.display()))?;
        Ok(gb)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Power-cycle: fresh registers and memory map, same cartridge.
    pub fn reset(&mut self) -> Result<()> {
        self.mmu = Mmu::new(self.mmu.cartridge().clone(), &self.config)?;
        self.cpu.reset(self.config.power_on);
        log::info!("machine reset");
        Ok(())
    }

    pub fn save_state(&self) -> SaveState {
        SaveState {
            cpu: self.cpu.clone(),
            memory: self.mmu.save_state(),
        }
    }

    /// Restore `state`. On error nothing is changed.
    pub fn load_state(&mut self, state: &SaveState) -> Result<()> {
        self.mmu.load_state(&state.memory)?;
        self.cpu = state.cpu.clone();
        log::debug!("restored save state at pc={:#06x}", self.cpu.regs.pc);
        Ok(())
    }
}
