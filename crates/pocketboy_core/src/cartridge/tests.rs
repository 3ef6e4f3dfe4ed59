use super::*;

/// Minimal image: `banks` × 16 KiB, header type and RAM size filled in.
fn image(type_code: u8, banks: usize, ram_code: u8) -> Vec<u8> {
    let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
    rom[HEADER_CART_TYPE] = type_code;
    rom[HEADER_RAM_SIZE] = ram_code;
    rom
}

#[test]
fn cartridge_type_table() {
    let cases: &[(u8, CartridgeKind)] = &[
        (0x00, CartridgeKind::RomOnly),
        (0x08, CartridgeKind::RomOnly),
        (0x09, CartridgeKind::RomOnly),
        (0x01, CartridgeKind::Mbc1),
        (0x03, CartridgeKind::Mbc1),
        (0x05, CartridgeKind::Mbc2),
        (0x06, CartridgeKind::Mbc2),
        (0x0C, CartridgeKind::Mmm01),
        (0x0D, CartridgeKind::Mmm01),
        (0x0F, CartridgeKind::Mbc3),
        (0x13, CartridgeKind::Mbc3),
        (0x19, CartridgeKind::Mbc5),
        (0x1E, CartridgeKind::Mbc5),
        (0x20, CartridgeKind::Mbc6),
        (0x22, CartridgeKind::Mbc7),
        (0xFC, CartridgeKind::PocketCamera),
        (0xFD, CartridgeKind::BandaiTama5),
        (0xFE, CartridgeKind::HuC3),
        (0xFF, CartridgeKind::HuC1),
    ];
    for &(code, kind) in cases {
        assert_eq!(CartridgeKind::classify(code), Some(kind), "code {code:#04x}");
    }

    for code in [0x04, 0x07, 0x0A, 0x0B, 0x0E, 0x14, 0x18, 0x1F, 0x21, 0x80] {
        assert_eq!(CartridgeKind::classify(code), None, "code {code:#04x}");
    }
}

#[test]
fn supported_controllers() {
    assert!(CartridgeKind::RomOnly.is_supported());
    assert!(CartridgeKind::Mbc1.is_supported());
    assert!(CartridgeKind::Mbc3.is_supported());
    assert!(CartridgeKind::Mbc5.is_supported());
    assert!(!CartridgeKind::Mbc2.is_supported());
    assert!(!CartridgeKind::HuC1.is_supported());
}

#[test]
fn feature_flags_follow_type_byte() {
    use CartridgeFeatures as F;

    assert_eq!(F::from_code(0x00), F::empty());
    assert_eq!(F::from_code(0x01), F::empty());
    assert_eq!(F::from_code(0x03), F::RAM | F::BATTERY);
    assert_eq!(F::from_code(0x06), F::BATTERY);
    assert_eq!(F::from_code(0x0F), F::TIMER | F::BATTERY);
    assert_eq!(F::from_code(0x10), F::TIMER | F::RAM | F::BATTERY);
    assert_eq!(F::from_code(0x1C), F::RUMBLE);
    assert_eq!(F::from_code(0x1E), F::RAM | F::BATTERY | F::RUMBLE);
    assert_eq!(
        F::from_code(0x22),
        F::RAM | F::BATTERY | F::RUMBLE | F::SENSOR
    );
}

#[test]
fn header_is_parsed() {
    let mut rom = image(0x13, 4, 0x03);
    rom[0x0134..0x0139].copy_from_slice(b"HELLO");
    let cart = Cartridge::new(rom).unwrap();

    assert_eq!(cart.kind(), CartridgeKind::Mbc3);
    assert_eq!(cart.type_code(), 0x13);
    assert_eq!(cart.rom_banks(), 4);
    assert_eq!(cart.ram_banks(), 4);
    assert_eq!(cart.ram_size(), 4 * RAM_BANK_SIZE);
    assert_eq!(cart.title(), "HELLO");
}

#[test]
fn ram_size_codes() {
    for (code, banks) in [(0x00, 0), (0x01, 1), (0x02, 1), (0x03, 4), (0x04, 16), (0x05, 8)] {
        let cart = Cartridge::new(image(0x03, 2, code)).unwrap();
        assert_eq!(cart.ram_banks(), banks, "ram code {code:#04x}");
    }
}

#[test]
fn rejects_short_and_unknown_images() {
    let err = Cartridge::new(vec![0; 0x100]).unwrap_err();
    assert!(matches!(err, CoreError::ImageTooSmall { len: 0x100 }));

    let err = Cartridge::new(image(0x04, 2, 0)).unwrap_err();
    assert!(matches!(err, CoreError::UnknownCartridgeType(0x04)));
}

#[test]
fn rom_bank_slices() {
    let mut rom = image(0x01, 2, 0);
    rom.extend(std::iter::repeat(0xAB).take(0x100));
    let cart = Cartridge::new(rom).unwrap();

    assert_eq!(cart.rom_banks(), 3);
    assert_eq!(cart.rom_bank(1).map(<[u8]>::len), Some(ROM_BANK_SIZE));
    assert_eq!(cart.rom_bank(2).map(<[u8]>::len), Some(0x100));
    assert!(cart.rom_bank(3).is_none());
}

#[test]
fn from_file_reports_missing_path() {
    let err = Cartridge::from_file("/nonexistent/pocketboy/test.gb").unwrap_err();
    assert!(err.to_string().contains("failed to read cartridge image"));
}

#[test]
fn mbc1_bank_zero_reads_as_one() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc1, CartridgeFeatures::empty());
    assert_eq!(mbc.registers().bank1, 1);

    let fx = mbc.intercept(0x2000, 0x00);
    assert!(fx.consumed);
    assert_eq!(fx.switch_bank, Some(1));

    // Only the low five bits are wired.
    let fx = mbc.intercept(0x3FFF, 0x20);
    assert_eq!(fx.switch_bank, Some(1));

    let fx = mbc.intercept(0x2000, 0x1F);
    assert_eq!(fx.switch_bank, Some(0x1F));
}

#[test]
fn mbc1_high_bits_and_mode() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc1, CartridgeFeatures::empty());
    mbc.intercept(0x2000, 0x1F);

    // Mode 0: high bits extend the switchable bank only.
    let fx = mbc.intercept(0x4000, 0x01);
    assert_eq!(fx.switch_bank, Some(0x3F));
    assert_eq!(fx.fixed_bank, None);
    assert_eq!(fx.ram_bank, None);

    // Mode 1: fixed window and RAM bank follow the high bits.
    let fx = mbc.intercept(0x6000, 0x01);
    assert_eq!(fx.fixed_bank, Some(0x20));
    assert_eq!(fx.ram_bank, Some(1));

    let fx = mbc.intercept(0x5FFF, 0x02);
    assert_eq!(fx.switch_bank, Some(0x5F));
    assert_eq!(fx.fixed_bank, Some(0x40));
    assert_eq!(fx.ram_bank, Some(2));

    // Back to mode 0 restores bank 0 / RAM bank 0.
    let fx = mbc.intercept(0x7FFF, 0x00);
    assert_eq!(fx.fixed_bank, Some(0));
    assert_eq!(fx.ram_bank, Some(0));
    assert_eq!(mbc.registers().mode, 0);
}

#[test]
fn ram_gate_checks_low_nibble() {
    for kind in [CartridgeKind::Mbc1, CartridgeKind::Mbc3, CartridgeKind::Mbc5] {
        let mut mbc = Mbc::new(kind, CartridgeFeatures::empty());
        assert_eq!(mbc.intercept(0x0000, 0x0A).ram_gate, Some(true));
        assert_eq!(mbc.intercept(0x1FFF, 0x1A).ram_gate, Some(true));
        assert_eq!(mbc.intercept(0x0000, 0x0B).ram_gate, Some(false));
        assert_eq!(mbc.intercept(0x0000, 0x00).ram_gate, Some(false));
        assert_eq!(mbc.registers().ramg, 0x00);
    }
}

#[test]
fn mbc1_and_mbc3_ignore_ram_space_writes() {
    for kind in [CartridgeKind::Mbc1, CartridgeKind::Mbc3] {
        let mut mbc = Mbc::new(kind, CartridgeFeatures::empty());
        assert_eq!(mbc.intercept(0xA000, 0x0A), InterceptEffects::default());
        assert_eq!(mbc.intercept(0x8000, 0x01), InterceptEffects::default());
    }
}

#[test]
fn mbc3_rom_and_ram_selects() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc3, CartridgeFeatures::TIMER);

    assert_eq!(mbc.intercept(0x2000, 0x00).switch_bank, Some(1));
    assert_eq!(mbc.intercept(0x2000, 0x7F).switch_bank, Some(0x7F));
    assert_eq!(mbc.intercept(0x2000, 0xFF).switch_bank, Some(0x7F));

    let fx = mbc.intercept(0x0000, 0x0A);
    assert_eq!(fx.ram_gate, Some(true));
    assert_eq!(fx.timer, Some(true));

    let fx = mbc.intercept(0x4000, 0x03);
    assert_eq!(fx.ram_bank, Some(3));
    assert_eq!(fx.rtc_select, None);

    let fx = mbc.intercept(0x4000, 0x08);
    assert_eq!(fx.rtc_select, Some(RtcRegister::Seconds));
    assert_eq!(fx.ram_bank, None);
    assert_eq!(mbc.registers().rtc_register, 0x08);

    let fx = mbc.intercept(0x5FFF, 0x0C);
    assert_eq!(fx.rtc_select, Some(RtcRegister::DayHigh));

    // Unmapped selects are swallowed without any effect.
    let fx = mbc.intercept(0x4000, 0x0D);
    assert_eq!(fx, InterceptEffects::consumed());
}

#[test]
fn mbc3_latches_on_zero_then_one() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc3, CartridgeFeatures::TIMER);

    assert!(!mbc.intercept(0x6000, 0x00).latch_rtc);
    assert!(mbc.intercept(0x6000, 0x01).latch_rtc);

    // A second $01 without a fresh $00 does nothing.
    assert!(!mbc.intercept(0x6000, 0x01).latch_rtc);

    // Repeated $00 keeps the detector armed.
    mbc.intercept(0x6000, 0x00);
    mbc.intercept(0x7FFF, 0x00);
    assert!(mbc.intercept(0x6000, 0x01).latch_rtc);

    // Anything else in between disarms it.
    mbc.intercept(0x6000, 0x00);
    mbc.intercept(0x6000, 0x02);
    assert!(!mbc.intercept(0x6000, 0x01).latch_rtc);
}

#[test]
fn mbc3_without_timer_never_enables_or_latches_clock() {
    let features = CartridgeFeatures::RAM | CartridgeFeatures::BATTERY;
    let mut mbc = Mbc::new(CartridgeKind::Mbc3, features);

    let fx = mbc.intercept(0x0000, 0x0A);
    assert_eq!(fx.ram_gate, Some(true));
    assert_eq!(fx.timer, Some(false));

    assert!(!mbc.intercept(0x6000, 0x00).latch_rtc);
    let fx = mbc.intercept(0x6000, 0x01);
    assert!(fx.consumed);
    assert!(!fx.latch_rtc);
}

#[test]
fn mbc3_lone_one_never_latches() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc3, CartridgeFeatures::TIMER);
    assert_eq!(mbc.registers().latch_clock, mbc::LATCH_IDLE);
    let fx = mbc.intercept(0x6000, 0x01);
    assert!(fx.consumed);
    assert!(!fx.latch_rtc);
}

#[test]
fn mbc5_nine_bit_bank_without_remap() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc5, CartridgeFeatures::empty());

    assert_eq!(mbc.intercept(0x2000, 0x00).switch_bank, Some(0));
    assert_eq!(mbc.intercept(0x2FFF, 0xFF).switch_bank, Some(0xFF));
    assert_eq!(mbc.intercept(0x3000, 0x01).switch_bank, Some(0x1FF));
    // Only bit 0 of the high register exists.
    assert_eq!(mbc.intercept(0x3FFF, 0xFE).switch_bank, Some(0x0FF));
}

#[test]
fn mbc5_does_not_decode_upper_half() {
    let mut mbc = Mbc::new(CartridgeKind::Mbc5, CartridgeFeatures::empty());
    let fx = mbc.intercept(0x6000, 0x01);
    assert!(!fx.consumed);
    assert_eq!(fx, InterceptEffects::default());
}

#[test]
fn mbc5_ram_bank_and_rumble() {
    let mut plain = Mbc::new(CartridgeKind::Mbc5, CartridgeFeatures::RAM);
    let fx = plain.intercept(0x4000, 0x0F);
    assert_eq!(fx.ram_bank, Some(0x0F));
    assert_eq!(fx.rumble, None);

    let mut rumble = Mbc::new(
        CartridgeKind::Mbc5,
        CartridgeFeatures::RAM | CartridgeFeatures::RUMBLE,
    );
    let fx = rumble.intercept(0x4000, 0x0B);
    assert_eq!(fx.rumble, Some(true));
    assert_eq!(fx.ram_bank, Some(0x03));

    let fx = rumble.intercept(0x5FFF, 0x01);
    assert_eq!(fx.rumble, Some(false));
    assert_eq!(fx.ram_bank, Some(0x01));
}

#[test]
fn rom_only_and_unsupported_never_consume() {
    let cart = Cartridge::new(image(0x00, 2, 0)).unwrap();
    let mut rom_only = Mbc::for_cartridge(&cart);
    assert_eq!(rom_only.kind(), CartridgeKind::RomOnly);

    let mut mbc2 = Mbc::new(CartridgeKind::Mbc2, CartridgeFeatures::BATTERY);
    assert_eq!(mbc2.kind(), CartridgeKind::Mbc2);

    for addr in [0x0000, 0x2000, 0x4000, 0x6000] {
        assert!(!rom_only.intercept(addr, 0x0A).consumed);
        assert!(!mbc2.intercept(addr, 0x0A).consumed);
    }
}

#[test]
fn rtc_reads_latched_copy() {
    let mut rtc = Rtc::default();
    rtc.write(RtcRegister::Seconds, 0xFF);
    rtc.write(RtcRegister::Hours, 0x37);
    rtc.write(RtcRegister::DayHigh, 0xFF);

    assert_eq!(rtc.live.seconds, 0x3F);
    assert_eq!(rtc.live.hours, 0x17);
    assert_eq!(rtc.live.day_high, 0xC1);
    assert_eq!(rtc.read(RtcRegister::Seconds), 0x00);

    rtc.latch();
    assert_eq!(rtc.read(RtcRegister::Seconds), 0x3F);
    assert_eq!(rtc.read(RtcRegister::DayHigh), 0xC1);

    rtc.write(RtcRegister::Seconds, 0x01);
    assert_eq!(rtc.read(RtcRegister::Seconds), 0x3F);
}

#[test]
fn rtc_register_selects() {
    assert_eq!(RtcRegister::from_select(0x07), None);
    assert_eq!(RtcRegister::from_select(0x0A), Some(RtcRegister::Hours));
    assert_eq!(RtcRegister::from_select(0x0B), Some(RtcRegister::DayLow));
    assert_eq!(RtcRegister::from_select(0x0D), None);
    assert_eq!(RtcRegister::Minutes.mask(), 0x3F);
    assert_eq!(RtcRegister::DayLow.mask(), 0xFF);
}
