//! Rotates, shifts, nibble swap and single-bit operations.

use super::flags;
use super::Flags;

/// How a rotate treats the zero flag.
///
/// The CB-prefixed register forms (`RLC r`, `RL r`, ...) set Z from the
/// result. The one-byte accumulator forms (`RLCA`, `RLA`, `RRCA`, `RRA`)
/// never report zero: Z is always left clear.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZeroFlag {
    FromResult,
    Cleared,
}

#[inline]
fn finish_rotate(flags: &mut Flags, result: u8, carry_out: bool, zero: ZeroFlag) {
    flags.clear();
    flags.z = match zero {
        ZeroFlag::FromResult => flags::zero(result),
        ZeroFlag::Cleared => false,
    };
    flags.c = carry_out;
}

/// Rotate left circular: bit 7 goes to both bit 0 and C.
pub fn rlc(flags: &mut Flags, dest: &mut u8, zero: ZeroFlag) {
    let carry_out = *dest & 0x80 != 0;
    *dest = dest.rotate_left(1);
    finish_rotate(flags, *dest, carry_out, zero);
}

/// Rotate right circular: bit 0 goes to both bit 7 and C.
pub fn rrc(flags: &mut Flags, dest: &mut u8, zero: ZeroFlag) {
    let carry_out = *dest & 0x01 != 0;
    *dest = dest.rotate_right(1);
    finish_rotate(flags, *dest, carry_out, zero);
}

/// Rotate left through carry: the previous C enters bit 0.
pub fn rl(flags: &mut Flags, dest: &mut u8, zero: ZeroFlag) {
    let carry_out = *dest & 0x80 != 0;
    let carry_in = flags.c as u8;
    *dest = (*dest << 1) | carry_in;
    finish_rotate(flags, *dest, carry_out, zero);
}

/// Rotate right through carry: the previous C enters bit 7.
pub fn rr(flags: &mut Flags, dest: &mut u8, zero: ZeroFlag) {
    let carry_out = *dest & 0x01 != 0;
    let carry_in = if flags.c { 0x80 } else { 0 };
    *dest = (*dest >> 1) | carry_in;
    finish_rotate(flags, *dest, carry_out, zero);
}

/// `SLA`: shift left, bit 0 cleared. Flags Z00C.
pub fn sla(flags: &mut Flags, dest: &mut u8) {
    let carry_out = *dest & 0x80 != 0;
    *dest <<= 1;
    finish_rotate(flags, *dest, carry_out, ZeroFlag::FromResult);
}

/// `SRA`: arithmetic shift right, bit 7 kept. Flags Z00C.
pub fn sra(flags: &mut Flags, dest: &mut u8) {
    let carry_out = *dest & 0x01 != 0;
    *dest = (*dest >> 1) | (*dest & 0x80);
    finish_rotate(flags, *dest, carry_out, ZeroFlag::FromResult);
}

/// `SRL`: logical shift right, bit 7 cleared. Flags Z00C.
pub fn srl(flags: &mut Flags, dest: &mut u8) {
    let carry_out = *dest & 0x01 != 0;
    *dest >>= 1;
    finish_rotate(flags, *dest, carry_out, ZeroFlag::FromResult);
}

/// `SWAP`: exchange nibbles. Flags Z000.
pub fn swap(flags: &mut Flags, dest: &mut u8) {
    *dest = dest.rotate_left(4);
    finish_rotate(flags, *dest, false, ZeroFlag::FromResult);
}

/// `BIT b,r`: Z set when the bit is clear. Flags Z01-.
pub fn bit(flags: &mut Flags, value: u8, bit: u8) {
    debug_assert!(bit < 8, "bit index {bit} out of range");
    flags.z = value & (1 << (bit & 0x07)) == 0;
    flags.n = false;
    flags.h = true;
}

/// `SET b,r`. No flags.
#[inline]
pub fn set(dest: &mut u8, bit: u8) {
    *dest |= 1 << (bit & 0x07);
}

/// `RES b,r`. No flags.
#[inline]
pub fn res(dest: &mut u8, bit: u8) {
    *dest &= !(1 << (bit & 0x07));
}
