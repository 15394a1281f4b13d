//! Cartridge binding (§4.4): the pristine ROM mapping, an optional patched
//! overlay, the four-byte game ID used for override lookup, and the
//! savedata/GPIO bindings an override hit fills in.

use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapMut};

use crate::error::CoreError;
use crate::gpio::GpioFeatures;
use crate::patch::Patch;
use crate::savedata::SavedataKind;

/// Offset of the four-character game code in a GBA ROM header.
const GAME_ID_OFFSET: usize = 0xAC;
const HEADER_SIZE: usize = 0xC0;

pub struct Cartridge {
    pristine: Mmap,
    overlay: Option<MmapMut>,
    pub game_id: [u8; 4],
    pub savedata: SavedataKind,
    pub gpio: GpioFeatures,
}

impl Cartridge {
    /// Map `path` read-only as the pristine ROM image (§4.4, §5 allocation
    /// discipline). Fails if the image is too short to carry a header.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let file = File::open(path)?;
        let pristine = unsafe { Mmap::map(&file)? };
        if pristine.len() < HEADER_SIZE {
            return Err(CoreError::RomTooShort { len: pristine.len() });
        }

        let mut game_id = [0u8; 4];
        game_id.copy_from_slice(&pristine[GAME_ID_OFFSET..GAME_ID_OFFSET + 4]);

        Ok(Cartridge {
            pristine,
            overlay: None,
            game_id,
            savedata: SavedataKind::None,
            gpio: GpioFeatures::empty(),
        })
    }

    /// The active ROM bytes: the patched overlay if one is installed, else
    /// the pristine mapping (§4.4 "Apply patch").
    pub fn rom(&self) -> &[u8] {
        self.overlay.as_deref().unwrap_or(&self.pristine[..])
    }

    /// The original, unpatched image — always available, even with a patch
    /// installed (§4.4: "preserved for reset and savestate").
    pub fn pristine_rom(&self) -> &[u8] {
        &self.pristine
    }

    /// Apply `patch` (§4.4). A zero `output_size` is a no-op. On patch
    /// failure the overlay is discarded and the pristine ROM stays active.
    pub fn apply_patch(&mut self, patch: &dyn Patch) {
        let output_size = patch.output_size();
        if output_size == 0 {
            return;
        }

        let mut overlay = match MmapMut::map_anon(output_size) {
            Ok(overlay) => overlay,
            Err(_) => return,
        };

        let copy_len = self.pristine.len().min(output_size);
        overlay[..copy_len].copy_from_slice(&self.pristine[..copy_len]);

        if patch.apply(&self.pristine, &mut overlay) {
            self.overlay = Some(overlay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_minimal_rom(path: &Path, game_id: &[u8; 4]) {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[GAME_ID_OFFSET..GAME_ID_OFFSET + 4].copy_from_slice(game_id);
        let mut file = File::create(path).unwrap();
        file.write_all(&bytes).unwrap();
    }

    #[test]
    fn load_reads_the_game_id_out_of_the_header() {
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-rom.gba");
        write_minimal_rom(&path, b"BPEE");

        let cart = Cartridge::load(&path).unwrap();
        assert_eq!(&cart.game_id, b"BPEE");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn short_file_is_rejected_before_mapping_a_header() {
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-rom-short.gba");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let result = Cartridge::load(&path);
        assert!(matches!(result, Err(CoreError::RomTooShort { .. })));
        std::fs::remove_file(&path).ok();
    }

    struct DoublingPatch;
    impl Patch for DoublingPatch {
        fn output_size(&self) -> usize {
            HEADER_SIZE * 2
        }
        fn apply(&self, source: &[u8], dest: &mut [u8]) -> bool {
            dest[..source.len()].copy_from_slice(source);
            true
        }
    }

    struct RejectingPatch;
    impl Patch for RejectingPatch {
        fn output_size(&self) -> usize {
            HEADER_SIZE
        }
        fn apply(&self, _source: &[u8], _dest: &mut [u8]) -> bool {
            false
        }
    }

    struct NoopPatch;
    impl Patch for NoopPatch {
        fn output_size(&self) -> usize {
            0
        }
        fn apply(&self, _source: &[u8], _dest: &mut [u8]) -> bool {
            true
        }
    }

    #[test]
    fn successful_patch_replaces_the_active_rom_and_keeps_pristine() {
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-rom-patch.gba");
        write_minimal_rom(&path, b"AXVE");
        let mut cart = Cartridge::load(&path).unwrap();

        cart.apply_patch(&DoublingPatch);
        assert_eq!(cart.rom().len(), HEADER_SIZE * 2);
        assert_eq!(cart.pristine_rom().len(), HEADER_SIZE);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn failed_patch_leaves_pristine_rom_active() {
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-rom-reject.gba");
        write_minimal_rom(&path, b"AXVE");
        let mut cart = Cartridge::load(&path).unwrap();

        cart.apply_patch(&RejectingPatch);
        assert_eq!(cart.rom().len(), HEADER_SIZE);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn zero_size_patch_is_a_no_op() {
        let dir = std::env::temp_dir();
        let path = dir.join("coordination-kernel-test-rom-noop.gba");
        write_minimal_rom(&path, b"AXVE");
        let mut cart = Cartridge::load(&path).unwrap();

        cart.apply_patch(&NoopPatch);
        assert_eq!(cart.rom().len(), HEADER_SIZE);
        std::fs::remove_file(&path).ok();
    }
}
