use super::{mbc1, mbc3, mbc5, Cartridge, CartridgeFeatures, CartridgeKind, RtcRegister};

/// Latch detector state meaning "no $00 seen yet".
pub(super) const LATCH_IDLE: u8 = 0xFF;

/// Bank controller registers. Which fields a controller uses depends on
/// its kind; unused ones stay at their reset value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MbcRegisters {
    /// Last raw byte written to the RAM gate.
    pub ramg: u8,
    /// Low ROM bank bits.
    pub bank1: u8,
    /// High ROM bank bits, or the RAM bank on MBC1/MBC3.
    pub bank2: u8,
    /// MBC5 RAM bank.
    pub bank3: u8,
    /// MBC1 banking mode.
    pub mode: u8,
    /// MBC3 selected clock register ($08–$0C), zero when RAM is selected.
    pub rtc_register: u8,
    /// MBC3 latch sequence detector.
    pub latch_clock: u8,
}

impl Default for MbcRegisters {
    fn default() -> Self {
        Self {
            ramg: 0,
            bank1: 1,
            bank2: 0,
            bank3: 0,
            mode: 0,
            rtc_register: 0,
            latch_clock: LATCH_IDLE,
        }
    }
}

/// What a write into controller space asks the MMU to do.
///
/// The controller never touches memory itself; every configuration change
/// comes back through one of these fields.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InterceptEffects {
    /// The write was a controller command and must not reach memory.
    pub consumed: bool,
    pub switch_bank: Option<u16>,
    pub fixed_bank: Option<u16>,
    pub ram_gate: Option<bool>,
    /// Selecting a RAM bank also deselects any clock register.
    pub ram_bank: Option<u8>,
    pub timer: Option<bool>,
    pub rtc_select: Option<RtcRegister>,
    pub latch_rtc: bool,
    pub rumble: Option<bool>,
}

impl InterceptEffects {
    pub(super) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Controller {
    RomOnly,
    Mbc1,
    Mbc3 { timer: bool },
    Mbc5 { rumble: bool },
    /// Recognized but not emulated; behaves like `RomOnly`.
    Unsupported(CartridgeKind),
}

/// Per-cartridge bank controller state machine.
#[derive(Clone, Debug)]
pub struct Mbc {
    controller: Controller,
    regs: MbcRegisters,
}

impl Mbc {
    pub fn new(kind: CartridgeKind, features: CartridgeFeatures) -> Self {
        let controller = match kind {
            CartridgeKind::RomOnly => Controller::RomOnly,
            CartridgeKind::Mbc1 => Controller::Mbc1,
            CartridgeKind::Mbc3 => Controller::Mbc3 {
                timer: features.contains(CartridgeFeatures::TIMER),
            },
            CartridgeKind::Mbc5 => Controller::Mbc5 {
                rumble: features.contains(CartridgeFeatures::RUMBLE),
            },
            other => Controller::Unsupported(other),
        };
        Self {
            controller,
            regs: MbcRegisters::default(),
        }
    }

    pub fn for_cartridge(cart: &Cartridge) -> Self {
        Self::new(cart.kind(), cart.features())
    }

    pub fn kind(&self) -> CartridgeKind {
        match self.controller {
            Controller::RomOnly => CartridgeKind::RomOnly,
            Controller::Mbc1 => CartridgeKind::Mbc1,
            Controller::Mbc3 { .. } => CartridgeKind::Mbc3,
            Controller::Mbc5 { .. } => CartridgeKind::Mbc5,
            Controller::Unsupported(kind) => kind,
        }
    }

    pub fn registers(&self) -> &MbcRegisters {
        &self.regs
    }

    pub fn set_registers(&mut self, regs: MbcRegisters) {
        self.regs = regs;
    }

    /// Offer a CPU write to the controller.
    ///
    /// Returns the effects to apply; if `consumed` is false the write is
    /// ordinary memory traffic.
    pub fn intercept(&mut self, addr: u16, data: u8) -> InterceptEffects {
        let effects = match self.controller {
            Controller::RomOnly | Controller::Unsupported(_) => InterceptEffects::default(),
            Controller::Mbc1 => mbc1::intercept(&mut self.regs, addr, data),
            Controller::Mbc3 { timer } => mbc3::intercept(&mut self.regs, addr, data, timer),
            Controller::Mbc5 { rumble } => mbc5::intercept(&mut self.regs, addr, data, rumble),
        };
        if effects.consumed {
            log::trace!("{:?} write {data:#04x} to {addr:#06x}: {effects:?}", self.kind());
        }
        effects
    }
}
