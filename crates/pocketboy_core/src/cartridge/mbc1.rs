//! MBC1: 5-bit low ROM bank, 2-bit high bank / RAM bank, banking mode.

use super::mbc::{InterceptEffects, MbcRegisters};

/// Switchable bank, always combined from both stored halves.
#[inline]
fn switch_bank(regs: &MbcRegisters) -> u16 {
    ((regs.bank2 as u16) << 5) | regs.bank1 as u16
}

/// In mode 1 the high bits also re-point the fixed window.
#[inline]
fn fixed_bank(regs: &MbcRegisters) -> u16 {
    (regs.bank2 as u16) << 5
}

pub(super) fn intercept(regs: &mut MbcRegisters, addr: u16, data: u8) -> InterceptEffects {
    if addr > 0x7FFF {
        return InterceptEffects::default();
    }
    let mut effects = InterceptEffects::consumed();

    match addr {
        0x0000..=0x1FFF => {
            // RAM enable: lower 4 bits must be 0x0A.
            regs.ramg = data;
            effects.ram_gate = Some(data & 0x0F == 0x0A);
        }
        0x2000..=0x3FFF => {
            // The bank register never holds 0; hardware reads it as 1.
            regs.bank1 = match data & 0x1F {
                0 => 1,
                bank => bank,
            };
            effects.switch_bank = Some(switch_bank(regs));
        }
        0x4000..=0x5FFF => {
            regs.bank2 = data & 0x03;
            effects.switch_bank = Some(switch_bank(regs));
            if regs.mode == 1 {
                effects.fixed_bank = Some(fixed_bank(regs));
                effects.ram_bank = Some(regs.bank2);
            }
        }
        _ => {
            regs.mode = data & 0x01;
            if regs.mode == 1 {
                effects.fixed_bank = Some(fixed_bank(regs));
                effects.ram_bank = Some(regs.bank2);
            } else {
                effects.fixed_bank = Some(0);
                effects.ram_bank = Some(0);
            }
        }
    }

    effects
}
