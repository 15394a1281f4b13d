//! The fixed cartridge override table (§4.4): a handful of known game IDs
//! whose savedata chip and GPIO peripherals can't be inferred from the ROM
//! header alone and are hardcoded instead.

use crate::gpio::GpioFeatures;
use crate::savedata::SavedataKind;

pub struct Override {
    pub id: &'static [u8; 4],
    pub savedata: SavedataKind,
    pub gpio: GpioFeatures,
}

macro_rules! entry {
    ($id:literal, $savedata:expr, $gpio:expr) => {
        Override {
            id: $id,
            savedata: $savedata,
            gpio: $gpio,
        }
    };
}

pub static OVERRIDES: &[Override] = &[
    // Boktai: The Sun is in Your Hand
    entry!(b"U3IE", SavedataKind::Eeprom, GpioFeatures::from_bits_retain(GpioFeatures::RTC.bits() | GpioFeatures::LIGHT_SENSOR.bits())),
    entry!(b"U3IP", SavedataKind::Eeprom, GpioFeatures::from_bits_retain(GpioFeatures::RTC.bits() | GpioFeatures::LIGHT_SENSOR.bits())),
    // Boktai 2: Solar Boy Django
    entry!(b"U32E", SavedataKind::Eeprom, GpioFeatures::from_bits_retain(GpioFeatures::RTC.bits() | GpioFeatures::LIGHT_SENSOR.bits())),
    entry!(b"U32P", SavedataKind::Eeprom, GpioFeatures::from_bits_retain(GpioFeatures::RTC.bits() | GpioFeatures::LIGHT_SENSOR.bits())),
    // Drill Dozer
    entry!(b"V49J", SavedataKind::Sram, GpioFeatures::RUMBLE),
    entry!(b"V49E", SavedataKind::Sram, GpioFeatures::RUMBLE),
    // Pokemon Ruby
    entry!(b"AXVJ", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXVE", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXVP", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXVI", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXVS", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXVD", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXVF", SavedataKind::Flash1M, GpioFeatures::RTC),
    // Pokemon Sapphire
    entry!(b"AXPJ", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXPE", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXPP", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXPI", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXPS", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXPD", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"AXPF", SavedataKind::Flash1M, GpioFeatures::RTC),
    // Pokemon Emerald
    entry!(b"BPEJ", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"BPEE", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"BPEP", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"BPEI", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"BPES", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"BPED", SavedataKind::Flash1M, GpioFeatures::RTC),
    entry!(b"BPEF", SavedataKind::Flash1M, GpioFeatures::RTC),
    // Pokemon FireRed
    entry!(b"BPRJ", SavedataKind::Flash1M, GpioFeatures::empty()),
    entry!(b"BPRE", SavedataKind::Flash1M, GpioFeatures::empty()),
    entry!(b"BPRP", SavedataKind::Flash1M, GpioFeatures::empty()),
    // Pokemon LeafGreen
    entry!(b"BPGJ", SavedataKind::Flash1M, GpioFeatures::empty()),
    entry!(b"BPGE", SavedataKind::Flash1M, GpioFeatures::empty()),
    entry!(b"BPGP", SavedataKind::Flash1M, GpioFeatures::empty()),
    // RockMan EXE 4.5 - Real Operation
    entry!(b"BR4J", SavedataKind::Flash512, GpioFeatures::RTC),
    // Super Mario Advance 4
    entry!(b"AX4J", SavedataKind::Flash1M, GpioFeatures::empty()),
    entry!(b"AX4E", SavedataKind::Flash1M, GpioFeatures::empty()),
    entry!(b"AX4P", SavedataKind::Flash1M, GpioFeatures::empty()),
    // Wario Ware Twisted
    entry!(b"RWZJ", SavedataKind::Sram, GpioFeatures::from_bits_retain(GpioFeatures::RUMBLE.bits() | GpioFeatures::GYRO.bits())),
    entry!(b"RWZE", SavedataKind::Sram, GpioFeatures::from_bits_retain(GpioFeatures::RUMBLE.bits() | GpioFeatures::GYRO.bits())),
    entry!(b"RWZP", SavedataKind::Sram, GpioFeatures::from_bits_retain(GpioFeatures::RUMBLE.bits() | GpioFeatures::GYRO.bits())),
];

/// Look up `id` in the fixed override table (§4.4 "Apply cartridge override").
pub fn lookup(id: &[u8; 4]) -> Option<&'static Override> {
    OVERRIDES.iter().find(|entry| entry.id == id)
}
