/// Value returned for reads nothing answers.
pub const OPEN_BUS: u8 = 0xFF;

/// Distance from the echo region down to the work RAM it mirrors.
pub(super) const ECHO_OFFSET: u16 = 0x2000;

/// Hardware memory regions, in address order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    RomFixed,
    RomSwitch,
    VideoRam,
    ExternalRam,
    WorkRam,
    WorkRamSwitch,
    EchoRam,
    Oam,
    Unusable,
    IoRegisters,
    HighRam,
    InterruptEnable,
}

struct RegionSpan {
    region: Region,
    start: u16,
    end: u16,
}

const fn span(region: Region, start: u16, end: u16) -> RegionSpan {
    RegionSpan { region, start, end }
}

/// Inclusive bounds of every region. Together they cover $0000–$FFFF.
const REGION_MAP: [RegionSpan; 12] = [
    span(Region::RomFixed, 0x0000, 0x3FFF),
    span(Region::RomSwitch, 0x4000, 0x7FFF),
    span(Region::VideoRam, 0x8000, 0x9FFF),
    span(Region::ExternalRam, 0xA000, 0xBFFF),
    span(Region::WorkRam, 0xC000, 0xCFFF),
    span(Region::WorkRamSwitch, 0xD000, 0xDFFF),
    span(Region::EchoRam, 0xE000, 0xFDFF),
    span(Region::Oam, 0xFE00, 0xFE9F),
    span(Region::Unusable, 0xFEA0, 0xFEFF),
    span(Region::IoRegisters, 0xFF00, 0xFF7F),
    span(Region::HighRam, 0xFF80, 0xFFFE),
    span(Region::InterruptEnable, 0xFFFF, 0xFFFF),
];

impl Region {
    pub const ALL: [Region; 12] = [
        Region::RomFixed,
        Region::RomSwitch,
        Region::VideoRam,
        Region::ExternalRam,
        Region::WorkRam,
        Region::WorkRamSwitch,
        Region::EchoRam,
        Region::Oam,
        Region::Unusable,
        Region::IoRegisters,
        Region::HighRam,
        Region::InterruptEnable,
    ];

    /// Region owning `addr`, found by walking the region table.
    pub fn decode(addr: u16) -> Option<Region> {
        REGION_MAP
            .iter()
            .find(|span| (span.start..=span.end).contains(&addr))
            .map(|span| span.region)
    }

    #[inline]
    pub(super) fn index(self) -> usize {
        self as usize
    }

    pub fn start(self) -> u16 {
        REGION_MAP[self.index()].start
    }

    pub fn end(self) -> u16 {
        REGION_MAP[self.index()].end
    }

    pub fn len(self) -> usize {
        (self.end() - self.start()) as usize + 1
    }
}

#[derive(Clone, Debug)]
enum Backing {
    Owned(Vec<u8>),
    /// Several equally sized banks, one visible at a time.
    Banked { data: Vec<u8>, bank: usize },
    /// No storage of its own; accesses land `ECHO_OFFSET` lower.
    Mirror,
}

/// One address window and the bytes behind it.
#[derive(Clone, Debug)]
pub struct MemoryRegion {
    region: Region,
    start: u16,
    end: u16,
    backing: Backing,
}

impl MemoryRegion {
    pub(super) fn owned(region: Region, fill: u8) -> Self {
        Self::with_backing(region, Backing::Owned(vec![fill; region.len()]))
    }

    pub(super) fn banked(region: Region, banks: usize, fill: u8) -> Self {
        let banks = banks.max(1);
        Self::with_backing(
            region,
            Backing::Banked {
                data: vec![fill; banks * region.len()],
                bank: 0,
            },
        )
    }

    pub(super) fn mirror(region: Region) -> Self {
        Self::with_backing(region, Backing::Mirror)
    }

    fn with_backing(region: Region, backing: Backing) -> Self {
        Self {
            region,
            start: region.start(),
            end: region.end(),
            backing,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Size of the CPU-visible window.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_mirror(&self) -> bool {
        matches!(self.backing, Backing::Mirror)
    }

    /// Everything behind the window, all banks included. Empty for a mirror.
    pub fn bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Owned(buf) => buf,
            Backing::Banked { data, .. } => data,
            Backing::Mirror => &[],
        }
    }

    pub(super) fn bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.backing {
            Backing::Owned(buf) => buf,
            Backing::Banked { data, .. } => data,
            Backing::Mirror => &mut [],
        }
    }

    pub fn bank_count(&self) -> usize {
        match &self.backing {
            Backing::Banked { data, .. } => data.len() / self.len(),
            Backing::Owned(_) => 1,
            Backing::Mirror => 0,
        }
    }

    pub fn bank(&self) -> usize {
        match self.backing {
            Backing::Banked { bank, .. } => bank,
            _ => 0,
        }
    }

    /// Select the visible bank; indices past the last bank wrap around.
    pub(super) fn select_bank(&mut self, index: usize) -> usize {
        let count = self.bank_count();
        if let Backing::Banked { bank, .. } = &mut self.backing {
            *bank = index % count;
            *bank
        } else {
            0
        }
    }

    fn offset(&self, addr: u16) -> Option<usize> {
        if !(self.start..=self.end).contains(&addr) {
            return None;
        }
        let offset = (addr - self.start) as usize;
        match self.backing {
            Backing::Owned(_) => Some(offset),
            Backing::Banked { bank, .. } => Some(bank * self.len() + offset),
            Backing::Mirror => None,
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        self.offset(addr)
            .and_then(|offset| self.bytes().get(offset).copied())
            .unwrap_or(OPEN_BUS)
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        if let Some(offset) = self.offset(addr) {
            if let Some(slot) = self.bytes_mut().get_mut(offset) {
                *slot = value;
            }
        }
    }

    /// Replace the window's contents with `src`, padding with $FF when
    /// `src` is shorter than the window.
    pub(super) fn load(&mut self, src: &[u8]) {
        let buf = self.bytes_mut();
        let len = src.len().min(buf.len());
        buf[..len].copy_from_slice(&src[..len]);
        buf[len..].fill(OPEN_BUS);
    }
}
