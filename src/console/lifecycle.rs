//! Lifecycle operations (§4.4): init, reset, BIOS/ROM loading, patch
//! application, halt. The fallible ones (file-backed mappings) return
//! `Result`; everything downstream stays infallible per §7.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use super::Console;
use crate::cartridge::Cartridge;
use crate::error::CoreError;
use crate::gpio;
use crate::log::LogLevel;
use crate::patch::Patch;

/// Known BIOS checksums the core can name when logging a load (§4.4 "Load
/// BIOS"). Real checksums belong to a verified official dump; the two
/// placeholders below stand in for "official" and "official DS-mode" until
/// one is packaged with the crate (see DESIGN.md).
const OFFICIAL_GBA_BIOS_CRC32: u32 = 0x81977335;
const OFFICIAL_NDS_GBA_BIOS_CRC32: u32 = 0xA4F0EE3C;

const MINIMUM_BIOS_SIZE: usize = 0x4000;

impl Console {
    /// Construct peripherals and seed banked stack pointers (§4.4 "Init").
    pub fn new() -> Self {
        Console::default()
    }

    /// The CPU-reset hook (§4.4 "CPU reset"): reseeds the banked stack
    /// pointers and clears the deferred-IRQ flag, mirroring the source's
    /// `GBAReset`, which only ever touches `cpu->gprs[ARM_SP]` for the
    /// three privilege modes. Live IME/IE/IF and timer state are untouched —
    /// those are zeroed once at construction (§4.4 "Console init"), not on
    /// every CPU reset, so a BIOS soft-reset SWI doesn't wipe them.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Map `path` read-only as the BIOS image (§4.4 "Load BIOS").
    pub fn load_bios(&mut self, path: &Path) -> Result<(), CoreError> {
        let file = File::open(path)?;
        let mapping = unsafe { Mmap::map(&file)? };
        if mapping.len() < MINIMUM_BIOS_SIZE {
            return Err(CoreError::BiosTooShort { len: mapping.len() });
        }

        let checksum = crc32(&mapping);
        let name = match checksum {
            OFFICIAL_GBA_BIOS_CRC32 => "official GBA BIOS",
            OFFICIAL_NDS_GBA_BIOS_CRC32 => "official DS-mode GBA BIOS",
            _ => "unrecognized BIOS image",
        };
        self.log_info(&format!("loaded {name} ({} bytes)", mapping.len()));

        self.bios = Some(mapping);
        Ok(())
    }

    /// Map `path` read-only as the cartridge ROM and apply any override hit
    /// for its game ID (§4.4 "Load ROM").
    pub fn load_rom(&mut self, path: &Path) -> Result<(), CoreError> {
        let mut cartridge = Cartridge::load(path)?;
        self.apply_override(&mut cartridge);
        self.cartridge = Some(cartridge);
        Ok(())
    }

    /// Apply `patch` to the currently loaded cartridge, if any (§4.4 "Apply
    /// patch"). A missing cartridge is a programmer error in the caller and
    /// is logged rather than panicking, per the hot-path infallibility rule.
    pub fn apply_patch(&mut self, patch: &dyn Patch) {
        match &mut self.cartridge {
            Some(cartridge) => cartridge.apply_patch(patch),
            None => self.log_warn("apply_patch called with no cartridge loaded"),
        }
    }

    /// Collapse the CPU to its next scheduled wake cycle (§4.3 "Halt").
    pub fn halt(&mut self) {
        self.cpu.halt();
    }

    /// Attach a debugger: `hit_stub`/`hit_illegal` will hand control to it
    /// instead of treating a stub opcode as fatal (§4.5, §7).
    pub fn attach_debugger(&mut self, debugger: Box<dyn crate::debugger::Debugger>) {
        self.debugger = Some(debugger);
    }

    /// Detach any attached debugger, returning it to the caller.
    pub fn detach_debugger(&mut self) -> Option<Box<dyn crate::debugger::Debugger>> {
        self.debugger.take()
    }

    fn apply_override(&mut self, cartridge: &mut Cartridge) {
        let Some(hit) = crate::console::overrides::lookup(&cartridge.game_id) else {
            return;
        };

        cartridge.savedata = hit.savedata;
        cartridge.gpio = hit.gpio;
        gpio::apply_features(&mut self.gpio, hit.gpio);

        match hit.savedata {
            crate::savedata::SavedataKind::Flash512 | crate::savedata::SavedataKind::Flash1M => {
                self.savedata.init_flash(hit.savedata);
            }
            crate::savedata::SavedataKind::Eeprom => self.savedata.init_eeprom(),
            crate::savedata::SavedataKind::Sram => self.savedata.init_sram(),
            crate::savedata::SavedataKind::None => {}
        }

        self.log_info(&format!(
            "cartridge override hit for {}",
            String::from_utf8_lossy(&cartridge.game_id)
        ));
    }

    pub(crate) fn log_info(&mut self, message: &str) {
        self.log(LogLevel::INFO, message);
    }

    pub(crate) fn log_warn(&mut self, message: &str) {
        self.log(LogLevel::WARN, message);
    }

    pub(crate) fn log(&mut self, level: LogLevel, message: &str) {
        crate::log::log_message(self.log_handler.as_mut(), Some(self.log_mask), level, message);
    }
}

/// Plain CRC-32 (IEEE 802.3 polynomial), used only to name a loaded BIOS
/// image against known checksums. Not a hot-path operation.
fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn short_bios_file_is_rejected() {
        let mut console = Console::new();
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-bios-short.bin");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let result = console.load_bios(&path);
        assert!(matches!(result, Err(CoreError::BiosTooShort { .. })));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn loading_rom_with_known_id_applies_override() {
        let mut console = Console::new();
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-rom-override.gba");
        let mut bytes = vec![0u8; 0xC0];
        bytes[0xAC..0xB0].copy_from_slice(b"BPEE");
        let mut file = File::create(&path).unwrap();
        file.write_all(&bytes).unwrap();

        console.load_rom(&path).unwrap();
        assert_eq!(
            console.cartridge.as_ref().unwrap().savedata,
            crate::savedata::SavedataKind::Flash1M
        );
        assert!(console.gpio.armed.contains(gpio::GpioFeatures::RTC));
        std::fs::remove_file(&path).ok();
    }
}
