//! Arithmetic, logic and flag-manipulation instructions.
//!
//! Every helper takes the flags and the destination explicitly so an
//! opcode dispatcher can point it at any register (or a byte it fetched
//! from memory) without going through `Cpu`. All arithmetic wraps.

use super::flags::{self, Direction};
use super::Flags;

/// `LD r,x`. Sets no flags.
#[inline]
pub fn load(dest: &mut u8, src: u8) {
    *dest = src;
}

/// `LD rr,x`. Sets no flags.
#[inline]
pub fn load16(dest: &mut u16, src: u16) {
    *dest = src;
}

fn add_with_carry_in(flags: &mut Flags, dest: &mut u8, val: u8, carry_in: bool) {
    let prior = *dest;
    let result = prior.wrapping_add(val).wrapping_add(carry_in as u8);

    flags.z = flags::zero(result);
    flags.n = flags::negative(Direction::Add);
    flags.h = flags::half_carry(prior, val, carry_in, Direction::Add);
    flags.c = flags::carry(prior, result, carry_in, Direction::Add);

    *dest = result;
}

fn sub_with_carry_in(flags: &mut Flags, dest: &mut u8, val: u8, carry_in: bool) {
    let prior = *dest;
    let result = prior.wrapping_sub(val).wrapping_sub(carry_in as u8);

    flags.z = flags::zero(result);
    flags.n = flags::negative(Direction::Sub);
    flags.h = flags::half_carry(prior, val, carry_in, Direction::Sub);
    flags.c = flags::carry(prior, result, carry_in, Direction::Sub);

    *dest = result;
}

/// `ADD`, flags Z0HC.
pub fn add(flags: &mut Flags, dest: &mut u8, val: u8) {
    add_with_carry_in(flags, dest, val, false);
}

/// `ADC`, flags Z0HC.
pub fn adc(flags: &mut Flags, dest: &mut u8, val: u8) {
    let carry_in = flags.c;
    add_with_carry_in(flags, dest, val, carry_in);
}

/// `SUB`, flags Z1HC.
pub fn sub(flags: &mut Flags, dest: &mut u8, val: u8) {
    sub_with_carry_in(flags, dest, val, false);
}

/// `SBC`, flags Z1HC.
pub fn sbc(flags: &mut Flags, dest: &mut u8, val: u8) {
    let carry_in = flags.c;
    sub_with_carry_in(flags, dest, val, carry_in);
}

/// `CP`: a subtract whose result is thrown away.
pub fn cp(flags: &mut Flags, dest: u8, val: u8) {
    let mut scratch = dest;
    sub_with_carry_in(flags, &mut scratch, val, false);
}

/// `INC r`, flags Z0H-. Carry is left alone.
pub fn inc(flags: &mut Flags, dest: &mut u8) {
    let prior = *dest;
    let result = prior.wrapping_add(1);

    flags.z = flags::zero(result);
    flags.n = flags::negative(Direction::Add);
    flags.h = flags::half_carry(prior, 1, false, Direction::Add);

    *dest = result;
}

/// `DEC r`, flags Z1H-. Carry is left alone.
pub fn dec(flags: &mut Flags, dest: &mut u8) {
    let prior = *dest;
    let result = prior.wrapping_sub(1);

    flags.z = flags::zero(result);
    flags.n = flags::negative(Direction::Sub);
    flags.h = flags::half_carry(prior, 1, false, Direction::Sub);

    *dest = result;
}

/// `ADD HL,rr`, flags -0HC. Z is unaffected.
pub fn add16(flags: &mut Flags, dest: &mut u16, val: u16) {
    let prior = *dest;
    let result = prior.wrapping_add(val);

    flags.n = false;
    flags.h = flags::half_carry16(prior, val);
    flags.c = flags::carry16(prior, result);

    *dest = result;
}

/// `INC rr`. No flags.
#[inline]
pub fn inc16(dest: &mut u16) {
    *dest = dest.wrapping_add(1);
}

/// `DEC rr`. No flags.
#[inline]
pub fn dec16(dest: &mut u16) {
    *dest = dest.wrapping_sub(1);
}

/// Signed 8-bit offset added to a 16-bit base, as used by `ADD SP,e8` and
/// `LD HL,SP+e8`.
///
/// Flags 00HC, with H and C computed from the low byte as an unsigned add.
pub fn add_signed(flags: &mut Flags, base: u16, offset: i8) -> u16 {
    let operand = offset as u8;
    let low = base as u8;

    flags.z = false;
    flags.n = false;
    flags.h = flags::half_carry(low, operand, false, Direction::Add);
    flags.c = flags::carry(low, low.wrapping_add(operand), false, Direction::Add);

    base.wrapping_add(offset as i16 as u16)
}

/// `AND`, flags Z010.
///
/// The half-carry flag is forced on: that is what the hardware does.
pub fn and(flags: &mut Flags, dest: &mut u8, val: u8) {
    let result = *dest & val;

    flags.clear();
    flags.z = flags::zero(result);
    flags.h = true;

    *dest = result;
}

/// `OR`, flags Z000.
pub fn or(flags: &mut Flags, dest: &mut u8, val: u8) {
    let result = *dest | val;

    flags.clear();
    flags.z = flags::zero(result);

    *dest = result;
}

/// `XOR`, flags Z000.
pub fn xor(flags: &mut Flags, dest: &mut u8, val: u8) {
    let result = *dest ^ val;

    flags.clear();
    flags.z = flags::zero(result);

    *dest = result;
}

/// `CPL`, flags -11-.
pub fn cpl(flags: &mut Flags, a: &mut u8) {
    *a = !*a;
    flags.n = true;
    flags.h = true;
}

/// `CCF`, flags -00C with C toggled.
pub fn ccf(flags: &mut Flags) {
    flags.n = false;
    flags.h = false;
    flags.c = !flags.c;
}

/// `SCF`, flags -001.
pub fn scf(flags: &mut Flags) {
    flags.n = false;
    flags.h = false;
    flags.c = true;
}

/// Decimal adjust accumulator after BCD addition/subtraction.
///
/// Uses C, H, N and A to pick the correction. Updates Z, H, C and leaves
/// N unchanged. H always ends up clear; C is set when the high digit had
/// to be corrected (it can only be kept, never cleared, after a subtract).
pub fn daa(flags: &mut Flags, a: &mut u8) {
    let mut value = *a;
    let mut adjust: u8 = if flags.c { 0x60 } else { 0x00 };
    if flags.h {
        adjust |= 0x06;
    }

    if !flags.n {
        // After an addition.
        if (value & 0x0F) > 0x09 {
            adjust |= 0x06;
        }
        if value > 0x99 {
            adjust |= 0x60;
        }
        value = value.wrapping_add(adjust);
    } else {
        // After a subtraction.
        value = value.wrapping_sub(adjust);
    }

    flags.c = adjust >= 0x60;
    flags.h = false;
    flags.z = flags::zero(value);
    *a = value;
}
