//! Instructions that touch memory or control flow.
//!
//! Operand bytes are already fetched by the dispatcher, so nothing here
//! reads from `pc`.

mod control;
mod ld;
mod stack;
mod system;

/// Post-access adjustment of HL for `LD (HL+),A` / `LD (HL-),A` and the
/// matching loads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HlStep {
    Inc,
    Dec,
}
