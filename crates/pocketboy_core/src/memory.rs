//! Address decoding and the memory map seen by the CPU.
//!
//! The map is a fixed table of [`Region`]s. Every CPU write is offered to
//! the cartridge's bank controller first; only writes it does not consume
//! reach memory.

mod mmu;
mod region;

pub use mmu::{MemoryState, Mmu, RomWindow};
pub use region::{MemoryRegion, Region, OPEN_BUS};
