use super::region::{MemoryRegion, Region, ECHO_OFFSET, OPEN_BUS};
use crate::cartridge::{Cartridge, InterceptEffects, Mbc, MbcRegisters, Rtc, RtcRegister};
use crate::config::{MachineConfig, RamFill};
use crate::cpu::Bus;
use crate::error::{CoreError, Result};

/// The two 16 KiB ROM windows a bank can be mapped into.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RomWindow {
    /// $0000–$3FFF. Bank 0 unless MBC1 mode 1 re-points it.
    Fixed,
    /// $4000–$7FFF.
    Switchable,
}

impl RomWindow {
    pub fn region(self) -> Region {
        match self {
            RomWindow::Fixed => Region::RomFixed,
            RomWindow::Switchable => Region::RomSwitch,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            RomWindow::Fixed => 0,
            RomWindow::Switchable => 1,
        }
    }
}

/// Used when a zero seed is requested; xorshift never leaves state 0.
const FALLBACK_SEED: u32 = 0xC0DE_1234;

/// Memory map, cartridge and bank controller glued together.
#[derive(Clone, Debug)]
pub struct Mmu {
    /// Indexed by [`Region`] discriminant.
    regions: Vec<MemoryRegion>,
    cartridge: Cartridge,
    mbc: Mbc,
    rom_banks: [u16; 2],
    ram_enabled: bool,
    rtc_enabled: bool,
    rtc_select: Option<RtcRegister>,
    rtc: Rtc,
    rumble: bool,
    /// Last write rejected on the [`Bus`] path, until taken.
    bank_error: Option<CoreError>,
}

/// Everything mutable in an [`Mmu`], detached from the cartridge image.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryState {
    /// Backing bytes per region in [`Region::ALL`] order, all banks
    /// included. The echo mirror contributes an empty buffer.
    pub regions: Vec<Vec<u8>>,
    /// Banks currently mapped into the fixed and switchable windows.
    pub rom_banks: [u16; 2],
    pub ram_bank: usize,
    pub ram_enabled: bool,
    pub rtc_enabled: bool,
    pub rtc_select: Option<RtcRegister>,
    pub rtc: Rtc,
    pub rumble: bool,
    pub mbc: MbcRegisters,
}

impl Mmu {
    /// Build the memory map for `cartridge`.
    ///
    /// Bank 0 is mapped into the fixed window and bank 1 (if the image has
    /// one) into the switchable window. External RAM always gets at least
    /// one bank so $A000–$BFFF is addressable even on carts declaring none.
    pub fn new(cartridge: Cartridge, config: &MachineConfig) -> Result<Self> {
        let kind = cartridge.kind();
        if !kind.is_supported() {
            if !config.allow_unsupported_controller {
                return Err(CoreError::UnsupportedController(kind));
            }
            log::warn!("running {kind:?} cartridge with a no-op bank controller");
        }

        let regions = Region::ALL
            .iter()
            .map(|&region| match region {
                Region::EchoRam => MemoryRegion::mirror(region),
                Region::ExternalRam => {
                    MemoryRegion::banked(region, cartridge.ram_banks(), OPEN_BUS)
                }
                Region::RomFixed | Region::RomSwitch => MemoryRegion::owned(region, OPEN_BUS),
                _ => MemoryRegion::owned(region, 0x00),
            })
            .collect();

        let mut mmu = Self {
            regions,
            mbc: Mbc::for_cartridge(&cartridge),
            cartridge,
            rom_banks: [0, 0],
            ram_enabled: false,
            rtc_enabled: false,
            rtc_select: None,
            rtc: Rtc::default(),
            rumble: false,
            bank_error: None,
        };

        if let RamFill::Pseudorandom { seed } = config.ram_fill {
            mmu.randomize_internal_ram(seed);
        }

        mmu.map_rom_bank(RomWindow::Fixed, 0)?;
        if mmu.cartridge.rom_banks() > 1 {
            mmu.map_rom_bank(RomWindow::Switchable, 1)?;
        } else {
            log::debug!("single-bank image; $4000-$7FFF left unmapped");
        }

        Ok(mmu)
    }

    /// Fill WRAM and HRAM from a xorshift32 stream.
    fn randomize_internal_ram(&mut self, seed: u32) {
        let mut x = if seed == 0 { FALLBACK_SEED } else { seed };
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };

        for region in [Region::WorkRam, Region::WorkRamSwitch, Region::HighRam] {
            for byte in self.regions[region.index()].bytes_mut() {
                *byte = next_byte();
            }
        }
    }

    /// CPU read. Never fails; reads nothing answers return $FF.
    pub fn read(&self, addr: u16) -> u8 {
        let Some(region) = Region::decode(addr) else {
            return OPEN_BUS;
        };
        match region {
            Region::EchoRam => self.read(addr - ECHO_OFFSET),
            Region::ExternalRam => self.read_external(addr),
            _ => self.regions[region.index()].read(addr),
        }
    }

    fn read_external(&self, addr: u16) -> u8 {
        if !self.ram_enabled {
            return OPEN_BUS;
        }
        match self.rtc_select {
            Some(reg) if self.rtc_enabled => self.rtc.read(reg),
            Some(_) => OPEN_BUS,
            None => self.regions[Region::ExternalRam.index()].read(addr),
        }
    }

    /// CPU write.
    ///
    /// The bank controller sees the write first. A consumed write only
    /// reconfigures the map; the error case is a bank switch past the end
    /// of the ROM, in which case the previous mapping stays in place.
    pub fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        let effects = self.mbc.intercept(addr, data);
        if effects.consumed {
            return self.apply(effects);
        }
        self.write_memory(addr, data);
        Ok(())
    }

    fn write_memory(&mut self, addr: u16, data: u8) {
        let Some(region) = Region::decode(addr) else {
            return;
        };
        match region {
            Region::RomFixed | Region::RomSwitch => {
                log::trace!("dropped write {data:#04x} to ROM at {addr:#06x}");
            }
            Region::EchoRam => self.write_memory(addr - ECHO_OFFSET, data),
            Region::ExternalRam => self.write_external(addr, data),
            _ => self.regions[region.index()].write(addr, data),
        }
    }

    fn write_external(&mut self, addr: u16, data: u8) {
        if !self.ram_enabled {
            log::trace!("dropped write {data:#04x} to disabled RAM at {addr:#06x}");
            return;
        }
        match self.rtc_select {
            Some(reg) if self.rtc_enabled => self.rtc.write(reg, data),
            Some(_) => {}
            None => self.regions[Region::ExternalRam.index()].write(addr, data),
        }
    }

    /// Apply a consumed write. Bank numbers are checked up front so a
    /// rejected switch leaves both windows and the rest of the map alone.
    fn apply(&mut self, effects: InterceptEffects) -> Result<()> {
        for bank in [effects.fixed_bank, effects.switch_bank].into_iter().flatten() {
            self.check_rom_bank(bank)?;
        }

        if let Some(enabled) = effects.ram_gate {
            if enabled != self.ram_enabled {
                log::debug!("external RAM {}", if enabled { "enabled" } else { "disabled" });
            }
            self.ram_enabled = enabled;
        }
        if let Some(enabled) = effects.timer {
            self.rtc_enabled = enabled;
        }
        if let Some(bank) = effects.ram_bank {
            let selected = self.regions[Region::ExternalRam.index()].select_bank(bank as usize);
            if selected != bank as usize {
                log::debug!("RAM bank {bank} wrapped to {selected}");
            }
            self.rtc_select = None;
        }
        if let Some(reg) = effects.rtc_select {
            self.rtc_select = Some(reg);
        }
        if effects.latch_rtc {
            self.rtc.latch();
            log::debug!("latched clock: {:?}", self.rtc.latched);
        }
        if let Some(on) = effects.rumble {
            if on != self.rumble {
                log::debug!("rumble motor {}", if on { "on" } else { "off" });
            }
            self.rumble = on;
        }

        if let Some(bank) = effects.fixed_bank {
            self.map_rom_bank(RomWindow::Fixed, bank)?;
        }
        if let Some(bank) = effects.switch_bank {
            self.map_rom_bank(RomWindow::Switchable, bank)?;
        }
        Ok(())
    }

    fn check_rom_bank(&self, bank: u16) -> Result<()> {
        let banks = self.cartridge.rom_banks();
        if bank as usize >= banks {
            return Err(CoreError::RomBankOutOfRange { bank, banks });
        }
        Ok(())
    }

    /// Copy ROM bank `bank` into `window`.
    ///
    /// A trailing partial bank is padded with $FF. A bank past the end of
    /// the image is rejected and the window keeps its current contents.
    pub fn map_rom_bank(&mut self, window: RomWindow, bank: u16) -> Result<()> {
        let Some(src) = self.cartridge.rom_bank(bank) else {
            return Err(CoreError::RomBankOutOfRange {
                bank,
                banks: self.cartridge.rom_banks(),
            });
        };
        self.regions[window.region().index()].load(src);
        if self.rom_banks[window.index()] != bank {
            log::trace!("{window:?} window -> ROM bank {bank}");
        }
        self.rom_banks[window.index()] = bank;
        Ok(())
    }

    /// Bank currently visible through `window`.
    pub fn rom_bank(&self, window: RomWindow) -> u16 {
        self.rom_banks[window.index()]
    }

    pub fn ram_bank(&self) -> usize {
        self.regions[Region::ExternalRam.index()].bank()
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub fn rtc_enabled(&self) -> bool {
        self.rtc_enabled
    }

    /// Clock register mapped at $A000–$BFFF, if any.
    pub fn rtc_select(&self) -> Option<RtcRegister> {
        self.rtc_select
    }

    pub fn rumble_active(&self) -> bool {
        self.rumble
    }

    /// Take the error from the most recent CPU store the controller
    /// rejected, if any.
    ///
    /// [`Bus::write8`] cannot return it, so a dispatcher polls this after
    /// each store to decide whether to log or halt.
    pub fn take_bank_error(&mut self) -> Option<CoreError> {
        self.bank_error.take()
    }

    pub fn rtc(&self) -> &Rtc {
        &self.rtc
    }

    /// Front ends advance `live` here; the core never ticks the clock.
    pub fn rtc_mut(&mut self) -> &mut Rtc {
        &mut self.rtc
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn mbc(&self) -> &Mbc {
        &self.mbc
    }

    pub fn region(&self, region: Region) -> &MemoryRegion {
        &self.regions[region.index()]
    }

    /// Every external RAM bank, for battery saves.
    pub fn external_ram(&self) -> &[u8] {
        self.regions[Region::ExternalRam.index()].bytes()
    }

    pub fn load_external_ram(&mut self, data: &[u8]) -> Result<()> {
        let ram = self.regions[Region::ExternalRam.index()].bytes_mut();
        if ram.len() != data.len() {
            return Err(CoreError::StateMismatch {
                what: "external RAM size",
                expected: ram.len(),
                found: data.len(),
            });
        }
        ram.copy_from_slice(data);
        Ok(())
    }

    pub fn save_state(&self) -> MemoryState {
        MemoryState {
            regions: self.regions.iter().map(|r| r.bytes().to_vec()).collect(),
            rom_banks: self.rom_banks,
            ram_bank: self.ram_bank(),
            ram_enabled: self.ram_enabled,
            rtc_enabled: self.rtc_enabled,
            rtc_select: self.rtc_select,
            rtc: self.rtc,
            rumble: self.rumble,
            mbc: *self.mbc.registers(),
        }
    }

    /// Restore a snapshot taken from an MMU built for the same cartridge.
    ///
    /// Sizes are checked before anything is touched, so a mismatched state
    /// leaves `self` unchanged.
    pub fn load_state(&mut self, state: &MemoryState) -> Result<()> {
        if state.regions.len() != self.regions.len() {
            return Err(CoreError::StateMismatch {
                what: "region count",
                expected: self.regions.len(),
                found: state.regions.len(),
            });
        }
        for (region, saved) in self.regions.iter().zip(&state.regions) {
            if region.bytes().len() != saved.len() {
                return Err(CoreError::StateMismatch {
                    what: "region size",
                    expected: region.bytes().len(),
                    found: saved.len(),
                });
            }
        }
        for &bank in &state.rom_banks {
            self.check_rom_bank(bank)?;
        }

        for (region, saved) in self.regions.iter_mut().zip(&state.regions) {
            region.bytes_mut().copy_from_slice(saved);
        }
        self.regions[Region::ExternalRam.index()].select_bank(state.ram_bank);
        self.rom_banks = state.rom_banks;
        self.ram_enabled = state.ram_enabled;
        self.rtc_enabled = state.rtc_enabled;
        self.rtc_select = state.rtc_select;
        self.rtc = state.rtc;
        self.rumble = state.rumble;
        self.mbc.set_registers(state.mbc);
        Ok(())
    }
}

impl Bus for Mmu {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if let Err(err) = self.write(addr, value) {
            log::warn!("write {value:#04x} to {addr:#06x}: {err}");
            self.bank_error = Some(err);
        }
    }
}
