//! MBC5: 9-bit ROM bank with no zero remap, 4-bit RAM bank.

use super::mbc::{InterceptEffects, MbcRegisters};

#[inline]
fn switch_bank(regs: &MbcRegisters) -> u16 {
    (((regs.bank2 & 0x01) as u16) << 8) | regs.bank1 as u16
}

pub(super) fn intercept(
    regs: &mut MbcRegisters,
    addr: u16,
    data: u8,
    rumble: bool,
) -> InterceptEffects {
    // $6000–$7FFF is not decoded by MBC5.
    if addr > 0x5FFF {
        return InterceptEffects::default();
    }
    let mut effects = InterceptEffects::consumed();

    match addr {
        0x0000..=0x1FFF => {
            regs.ramg = data;
            effects.ram_gate = Some(data & 0x0F == 0x0A);
        }
        0x2000..=0x2FFF => {
            // Bank 0 is a valid selection here.
            regs.bank1 = data;
            effects.switch_bank = Some(switch_bank(regs));
        }
        0x3000..=0x3FFF => {
            regs.bank2 = data & 0x01;
            effects.switch_bank = Some(switch_bank(regs));
        }
        _ => {
            // Rumble carts wire bit 3 to the motor instead of the RAM bus.
            if rumble {
                effects.rumble = Some(data & 0x08 != 0);
                regs.bank3 = data & 0x07;
            } else {
                regs.bank3 = data & 0x0F;
            }
            effects.ram_bank = Some(regs.bank3);
        }
    }

    effects
}
