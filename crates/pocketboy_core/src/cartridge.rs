//! Cartridge image and header classification.

mod mbc;
mod mbc1;
mod mbc3;
mod mbc5;
mod rtc;

use std::path::Path;

use anyhow::Context;
use bitflags::bitflags;

use crate::error::{CoreError, Result};
use crate::{RAM_BANK_SIZE, ROM_BANK_SIZE};

pub use mbc::{InterceptEffects, Mbc, MbcRegisters};
pub use rtc::{Rtc, RtcRegister, RtcRegisters};

/// Header offset of the cartridge-type byte.
pub const HEADER_CART_TYPE: usize = 0x0147;
/// Header offset of the external RAM size code.
pub const HEADER_RAM_SIZE: usize = 0x0149;
/// First byte past the cartridge header.
pub const HEADER_END: usize = 0x0150;

const HEADER_TITLE: std::ops::Range<usize> = 0x0134..0x0144;

/// Bank controller family named by the cartridge-type byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
    Mbc2,
    Mmm01,
    Mbc3,
    Mbc5,
    Mbc6,
    Mbc7,
    PocketCamera,
    BandaiTama5,
    HuC3,
    HuC1,
}

const KIND_CODES: [(CartridgeKind, &[u8]); 12] = [
    (CartridgeKind::RomOnly, &[0x00, 0x08, 0x09]),
    (CartridgeKind::Mbc1, &[0x01, 0x02, 0x03]),
    (CartridgeKind::Mbc2, &[0x05, 0x06]),
    (CartridgeKind::Mmm01, &[0x0C, 0x0D]),
    (CartridgeKind::Mbc3, &[0x0F, 0x10, 0x11, 0x12, 0x13]),
    (CartridgeKind::Mbc5, &[0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E]),
    (CartridgeKind::Mbc6, &[0x20]),
    (CartridgeKind::Mbc7, &[0x22]),
    (CartridgeKind::PocketCamera, &[0xFC]),
    (CartridgeKind::BandaiTama5, &[0xFD]),
    (CartridgeKind::HuC3, &[0xFE]),
    (CartridgeKind::HuC1, &[0xFF]),
];

const CODES_RAM: &[u8] = &[
    0x02, 0x03, 0x08, 0x09, 0x0C, 0x0D, 0x10, 0x12, 0x13, 0x1A, 0x1B, 0x1D, 0x1E, 0x22, 0xFF,
];
const CODES_BATTERY: &[u8] = &[
    0x03, 0x06, 0x09, 0x0D, 0x0F, 0x10, 0x13, 0x1B, 0x1E, 0x22, 0xFF,
];
const CODES_TIMER: &[u8] = &[0x0F, 0x10];
const CODES_RUMBLE: &[u8] = &[0x1C, 0x1D, 0x1E, 0x22];
const CODES_SENSOR: &[u8] = &[0x22];

impl CartridgeKind {
    pub fn classify(code: u8) -> Option<Self> {
        KIND_CODES
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|&(kind, _)| kind)
    }

    /// Controllers with a working intercept. Everything else is recognized
    /// but treated as a no-op controller.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            CartridgeKind::RomOnly | CartridgeKind::Mbc1 | CartridgeKind::Mbc3 | CartridgeKind::Mbc5
        )
    }
}

bitflags! {
    /// Extra hardware a cartridge-type byte advertises.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CartridgeFeatures: u8 {
        const RAM = 1 << 0;
        const BATTERY = 1 << 1;
        const TIMER = 1 << 2;
        const RUMBLE = 1 << 3;
        const SENSOR = 1 << 4;
    }
}

impl CartridgeFeatures {
    pub fn from_code(code: u8) -> Self {
        let table = [
            (Self::RAM, CODES_RAM),
            (Self::BATTERY, CODES_BATTERY),
            (Self::TIMER, CODES_TIMER),
            (Self::RUMBLE, CODES_RUMBLE),
            (Self::SENSOR, CODES_SENSOR),
        ];
        table
            .iter()
            .filter(|(_, codes)| codes.contains(&code))
            .fold(Self::empty(), |acc, &(flag, _)| acc | flag)
    }
}

/// Number of 8 KiB external RAM banks declared by header byte $0149.
///
/// 2 KiB parts are rounded up to a whole bank to keep addressing simple.
fn ram_banks_from_code(code: u8) -> usize {
    match code {
        0x01 | 0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}

/// Raw ROM image plus what the header says about it.
///
/// The image itself is never modified after load; bank switching copies
/// slices of it into the MMU's ROM windows.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    type_code: u8,
    kind: CartridgeKind,
    features: CartridgeFeatures,
    ram_banks: usize,
}

impl Cartridge {
    pub fn new(rom: Vec<u8>) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(CoreError::ImageTooSmall { len: rom.len() });
        }

        let type_code = rom[HEADER_CART_TYPE];
        let kind =
            CartridgeKind::classify(type_code).ok_or(CoreError::UnknownCartridgeType(type_code))?;
        let features = CartridgeFeatures::from_code(type_code);
        let ram_banks = ram_banks_from_code(rom[HEADER_RAM_SIZE]);

        let cart = Self {
            rom,
            type_code,
            kind,
            features,
            ram_banks,
        };
        log::info!(
            "loaded cartridge '{}': type {:#04x} ({:?}), {} ROM banks, {} RAM banks, features {:?}",
            cart.title(),
            type_code,
            kind,
            cart.rom_banks(),
            ram_banks,
            features
        );
        Ok(cart)
    }

    /// Read and classify a cartridge image from disk.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rom = std::fs::read(path)
            .with_context(|| format!("failed to read cartridge image {}", path.display()))?;
        let cart = Self::new(rom)
            .with_context(|| format!("invalid cartridge image {}", path.display()))?;
        Ok(cart)
    }

    pub fn kind(&self) -> CartridgeKind {
        self.kind
    }

    pub fn type_code(&self) -> u8 {
        self.type_code
    }

    pub fn features(&self) -> CartridgeFeatures {
        self.features
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    /// Number of 16 KiB ROM banks; a trailing partial bank counts.
    pub fn rom_banks(&self) -> usize {
        self.rom.len().div_ceil(ROM_BANK_SIZE)
    }

    /// Number of 8 KiB RAM banks the header declares (possibly zero).
    pub fn ram_banks(&self) -> usize {
        self.ram_banks
    }

    pub fn ram_size(&self) -> usize {
        self.ram_banks * RAM_BANK_SIZE
    }

    /// Bytes of ROM bank `bank`, or `None` past the end of the image. The
    /// slice is shorter than a full bank only for a trailing partial bank.
    pub fn rom_bank(&self, bank: u16) -> Option<&[u8]> {
        let start = (bank as usize).checked_mul(ROM_BANK_SIZE)?;
        if start >= self.rom.len() {
            return None;
        }
        let end = (start + ROM_BANK_SIZE).min(self.rom.len());
        Some(&self.rom[start..end])
    }

    /// Header title, NUL padding trimmed.
    pub fn title(&self) -> String {
        let raw = &self.rom[HEADER_TITLE];
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        raw[..len]
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect()
    }
}

#[cfg(test)]
mod tests;
