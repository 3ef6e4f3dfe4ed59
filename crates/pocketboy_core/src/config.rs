use typed_builder::TypedBuilder;

/// Register contents at power-on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerOnState {
    /// Every register, SP, PC, IME and HALT cleared.
    #[default]
    Zeroed,
    /// The state the DMG boot ROM leaves behind when it jumps to $0100.
    DmgPostBoot,
}

/// Initial contents of work RAM and high RAM.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RamFill {
    #[default]
    Zeroed,
    /// Deterministic xorshift32 garbage, seeded so runs stay reproducible.
    Pseudorandom { seed: u32 },
}

/// Machine construction options.
///
/// ```
/// use pocketboy_core::{MachineConfig, PowerOnState};
///
/// let config = MachineConfig::builder()
///     .power_on(PowerOnState::DmgPostBoot)
///     .build();
/// assert!(!config.allow_unsupported_controller);
/// ```
#[derive(TypedBuilder, Clone, Debug, Default)]
pub struct MachineConfig {
    #[builder(default)]
    pub power_on: PowerOnState,
    #[builder(default)]
    pub ram_fill: RamFill,
    /// Run MBC2/MMM01/MBC6/MBC7 and peripheral carts with a no-op bank
    /// controller instead of refusing them at construction.
    #[builder(default = false)]
    pub allow_unsupported_controller: bool,
}
