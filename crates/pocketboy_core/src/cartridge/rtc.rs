/// MBC3 clock registers, selected by writing $08–$0C to $4000–$5FFF.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RtcRegister {
    Seconds,
    Minutes,
    Hours,
    DayLow,
    /// Bit 0: day counter bit 8, bit 6: halt, bit 7: day counter carry.
    DayHigh,
}

impl RtcRegister {
    pub fn from_select(value: u8) -> Option<Self> {
        match value {
            0x08 => Some(Self::Seconds),
            0x09 => Some(Self::Minutes),
            0x0A => Some(Self::Hours),
            0x0B => Some(Self::DayLow),
            0x0C => Some(Self::DayHigh),
            _ => None,
        }
    }

    /// Bits that physically exist in the register.
    pub fn mask(self) -> u8 {
        match self {
            Self::Seconds | Self::Minutes => 0x3F,
            Self::Hours => 0x1F,
            Self::DayLow => 0xFF,
            Self::DayHigh => 0xC1,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RtcRegisters {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub day_low: u8,
    pub day_high: u8,
}

impl RtcRegisters {
    pub fn get(&self, reg: RtcRegister) -> u8 {
        match reg {
            RtcRegister::Seconds => self.seconds,
            RtcRegister::Minutes => self.minutes,
            RtcRegister::Hours => self.hours,
            RtcRegister::DayLow => self.day_low,
            RtcRegister::DayHigh => self.day_high,
        }
    }

    /// Store `value`, dropping bits the register does not have.
    pub fn set(&mut self, reg: RtcRegister, value: u8) {
        let value = value & reg.mask();
        match reg {
            RtcRegister::Seconds => self.seconds = value,
            RtcRegister::Minutes => self.minutes = value,
            RtcRegister::Hours => self.hours = value,
            RtcRegister::DayLow => self.day_low = value,
            RtcRegister::DayHigh => self.day_high = value,
        }
    }
}

/// Live clock counters plus the snapshot software actually reads.
///
/// Advancing `live` is up to whoever drives wall-clock time; the core
/// only implements the latch and the register window.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rtc {
    pub live: RtcRegisters,
    pub latched: RtcRegisters,
}

impl Rtc {
    pub fn latch(&mut self) {
        self.latched = self.live;
    }

    pub fn read(&self, reg: RtcRegister) -> u8 {
        self.latched.get(reg)
    }

    pub fn write(&mut self, reg: RtcRegister, value: u8) {
        self.live.set(reg, value);
    }
}
