//! Save-data backing contract (§4.4 cartridge bring-up, §6 savedata
//! collaborator). The actual flash/EEPROM/SRAM chip emulation is out of
//! scope; this module carries the classification and the minimal
//! collaborator surface the lifecycle manager needs to initialize it.

/// The save-data chip a cartridge is wired to, inferred from its header
/// (scan of the ROM image, out of scope here) or an override hit (§4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SavedataKind {
    #[default]
    None,
    Sram,
    Flash512,
    Flash1M,
    Eeprom,
}

/// What the lifecycle manager needs from the save-data collaborator: being
/// told which chip is present, once, at cartridge load or override time.
pub trait SavedataCollaborator {
    fn init_sram(&mut self);
    fn init_flash(&mut self, kind: SavedataKind);
    fn init_eeprom(&mut self);
}

/// A minimal in-core stand-in recording which initializer fired, without
/// emulating chip protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SavedataStub {
    pub kind: SavedataKind,
}

impl SavedataCollaborator for SavedataStub {
    fn init_sram(&mut self) {
        self.kind = SavedataKind::Sram;
    }

    fn init_flash(&mut self, kind: SavedataKind) {
        debug_assert!(matches!(kind, SavedataKind::Flash512 | SavedataKind::Flash1M));
        self.kind = kind;
    }

    fn init_eeprom(&mut self) {
        self.kind = SavedataKind::Eeprom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_initializer_records_the_requested_size() {
        let mut stub = SavedataStub::default();
        stub.init_flash(SavedataKind::Flash1M);
        assert_eq!(stub.kind, SavedataKind::Flash1M);
    }
}
