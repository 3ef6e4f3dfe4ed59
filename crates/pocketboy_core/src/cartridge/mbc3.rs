//! MBC3: 7-bit ROM bank, RAM bank or clock register select, clock latch.
//!
//! Without a clock chip the register selects still unmap RAM, but the
//! timer never enables, so the window reads open bus and nothing latches.

use super::mbc::{InterceptEffects, MbcRegisters, LATCH_IDLE};
use super::RtcRegister;

pub(super) fn intercept(
    regs: &mut MbcRegisters,
    addr: u16,
    data: u8,
    timer: bool,
) -> InterceptEffects {
    if addr > 0x7FFF {
        return InterceptEffects::default();
    }
    let mut effects = InterceptEffects::consumed();

    match addr {
        0x0000..=0x1FFF => {
            // One gate covers both RAM and the clock.
            regs.ramg = data;
            let enabled = data & 0x0F == 0x0A;
            effects.ram_gate = Some(enabled);
            effects.timer = Some(enabled && timer);
        }
        0x2000..=0x3FFF => {
            // Single 7-bit register; 0 is remapped to 1.
            regs.bank1 = match data & 0x7F {
                0 => 1,
                bank => bank,
            };
            effects.switch_bank = Some(regs.bank1 as u16);
        }
        0x4000..=0x5FFF => match data {
            0x00..=0x07 => {
                regs.bank2 = data;
                regs.rtc_register = 0;
                effects.ram_bank = Some(data);
            }
            0x08..=0x0C => {
                regs.rtc_register = data;
                effects.rtc_select = RtcRegister::from_select(data);
            }
            _ => {}
        },
        _ => {
            // Latch on an exact $00, $01 pair. Anything else re-arms the
            // detector so a stray $01 cannot latch.
            let previous = regs.latch_clock;
            regs.latch_clock = match data {
                0x00 => 0x00,
                0x01 if previous == 0x00 => {
                    effects.latch_rtc = timer;
                    LATCH_IDLE
                }
                _ => LATCH_IDLE,
            };
        }
    }

    effects
}
