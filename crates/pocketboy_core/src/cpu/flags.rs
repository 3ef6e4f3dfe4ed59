//! Flag algebra shared by every arithmetic, logic and rotate helper.
//!
//! Each function looks only at the value held in the destination before
//! the operation, the operand and (for carry) the wrapped result.

/// Whether an operation adds to or subtracts from its destination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Add,
    Sub,
}

#[inline]
pub fn zero(result: u8) -> bool {
    result == 0
}

#[inline]
pub fn negative(direction: Direction) -> bool {
    direction == Direction::Sub
}

/// Carry out of (or borrow into) bit 3.
#[inline]
pub fn half_carry(dest: u8, val: u8, carry_in: bool, direction: Direction) -> bool {
    let cin = carry_in as u8;
    match direction {
        Direction::Add => (dest & 0x0F) + (val & 0x0F) + cin > 0x0F,
        Direction::Sub => (dest & 0x0F) < (val & 0x0F) + cin,
    }
}

/// Carry out of bit 11, used only by `ADD HL,rr`.
#[inline]
pub fn half_carry16(dest: u16, val: u16) -> bool {
    (dest & 0x0FFF) + (val & 0x0FFF) > 0x0FFF
}

/// Carry out of (or borrow into) bit 7, detected from the wrapped result.
///
/// An add wrapped iff the result went below the destination; a subtract
/// borrowed iff it went above. With a carry-in, landing exactly on the
/// destination means the operand was 0xFF and the operation wrapped too.
#[inline]
pub fn carry(dest: u8, result: u8, carry_in: bool, direction: Direction) -> bool {
    match direction {
        Direction::Add => result < dest || (carry_in && result == dest),
        Direction::Sub => result > dest || (carry_in && result == dest),
    }
}

#[inline]
pub fn carry16(dest: u16, result: u16) -> bool {
    result < dest
}
