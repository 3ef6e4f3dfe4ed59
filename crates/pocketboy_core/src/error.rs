use thiserror::Error;

use crate::cartridge::CartridgeKind;

/// Failures surfaced by the core.
///
/// Arithmetic and instruction execution never fail; these only come from
/// constructing a machine, switching banks or restoring a save state.
#[derive(Clone, Debug, Error)]
pub enum CoreError {
    #[error("cartridge image is {len} bytes, too small to hold a header")]
    ImageTooSmall { len: usize },

    #[error("unrecognized cartridge type byte {0:#04x}")]
    UnknownCartridgeType(u8),

    #[error("cartridge controller {0:?} is not supported")]
    UnsupportedController(CartridgeKind),

    #[error("ROM bank {bank} is out of range (cartridge has {banks} banks)")]
    RomBankOutOfRange { bank: u16, banks: usize },

    #[error("save state {what} mismatch: expected {expected}, found {found}")]
    StateMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
