//! Errors for the handful of fallible boundary operations (§7.1): loading a
//! BIOS or ROM image and applying a patch. Everything downstream of a
//! successful load is infallible and only logs (§7).

use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    Io(std::io::Error),
    RomTooShort { len: usize },
    BiosTooShort { len: usize },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Io(err) => write!(f, "i/o error: {err}"),
            CoreError::RomTooShort { len } => {
                write!(f, "rom image too short to contain a cartridge header ({len} bytes)")
            }
            CoreError::BiosTooShort { len } => write!(f, "bios image too short ({len} bytes)"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Io(err) => Some(err),
            CoreError::RomTooShort { .. } | CoreError::BiosTooShort { .. } => None,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Io(err)
    }
}
