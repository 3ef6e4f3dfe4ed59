pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;
pub mod memory;

pub use cartridge::{Cartridge, CartridgeFeatures, CartridgeKind};
pub use config::{MachineConfig, PowerOnState, RamFill};
pub use cpu::{Bus, Cpu};
pub use error::{CoreError, Result};
pub use machine::{GameBoy, SaveState};
pub use memory::{Mmu, Region, RomWindow};

/// Size of one switchable ROM bank (16 KiB).
pub const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one external RAM bank (8 KiB).
pub const RAM_BANK_SIZE: usize = 0x2000;
