/// Status flags held in the upper nibble of F.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
///
/// Instructions work on the four booleans; the packed byte only exists at
/// the boundaries that need it (`PUSH AF` / `POP AF`, raw F access).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    pub z: bool,
    pub n: bool,
    pub h: bool,
    pub c: bool,
}

impl Flags {
    pub const Z: u8 = 0x80;
    pub const N: u8 = 0x40;
    pub const H: u8 = 0x20;
    pub const C: u8 = 0x10;

    #[inline]
    pub fn from_byte(value: u8) -> Self {
        Self {
            z: value & Self::Z != 0,
            n: value & Self::N != 0,
            h: value & Self::H != 0,
            c: value & Self::C != 0,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        let mut f = 0;
        if self.z {
            f |= Self::Z;
        }
        if self.n {
            f |= Self::N;
        }
        if self.h {
            f |= Self::H;
        }
        if self.c {
            f |= Self::C;
        }
        f
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// 8-bit general registers addressable as instruction operands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// 16-bit register views.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

/// Registers for the SM83 CPU.
///
/// Pairs (AF, BC, DE, HL) are views over the 8-bit fields; there is no
/// separate 16-bit storage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub flags: Flags,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn f(&self) -> u8 {
        self.flags.to_byte()
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        // Lower 4 bits of F are always zero.
        self.flags = Flags::from_byte(value);
    }

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f()])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.set_f(f);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    pub fn read8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    pub fn write8(&mut self, reg: Reg8, value: u8) {
        *self.operand_mut(reg).0 = value;
    }

    pub fn read16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af(),
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
        }
    }

    pub fn write16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::AF => self.set_af(value),
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
        }
    }

    /// Borrow an 8-bit register together with the flags so a single
    /// instruction helper can update both.
    pub fn operand_mut(&mut self, reg: Reg8) -> (&mut u8, &mut Flags) {
        let Self {
            a,
            b,
            c,
            d,
            e,
            h,
            l,
            flags,
            ..
        } = self;
        let target = match reg {
            Reg8::A => a,
            Reg8::B => b,
            Reg8::C => c,
            Reg8::D => d,
            Reg8::E => e,
            Reg8::H => h,
            Reg8::L => l,
        };
        (target, flags)
    }
}
