//! Memory-mapped I/O register file (§4.5 memory collaborator, §5 "shared
//! resources"): storage for `IME`/`IE`/`IF` and the four timer control/count
//! register pairs, which the interrupt controller and timer array reconcile
//! against on writes and overflow. General RAM and the full address map
//! belong to an external memory collaborator; this is only the slice the
//! coordination kernel itself needs to be the source of truth for.

pub const REG_TM0CNT_LO: u32 = 0x0100;
pub const REG_TM0CNT_HI: u32 = 0x0102;
pub const REG_TM1CNT_LO: u32 = 0x0104;
pub const REG_TM1CNT_HI: u32 = 0x0106;
pub const REG_TM2CNT_LO: u32 = 0x0108;
pub const REG_TM2CNT_HI: u32 = 0x010A;
pub const REG_TM3CNT_LO: u32 = 0x010C;
pub const REG_TM3CNT_HI: u32 = 0x010E;
pub const REG_IE: u32 = 0x0200;
pub const REG_IF: u32 = 0x0202;
pub const REG_IME: u32 = 0x0208;

/// `read_io`/`write_io` over the 16-bit I/O register window (§4.6 "Memory").
/// Implementors own the canonical storage for shared registers; Timers and
/// the interrupt controller only see a view reconciled through here.
pub trait MemoryBus {
    fn read_io(&self, addr: u32) -> u16;
    fn write_io(&mut self, addr: u32, value: u16);
}

/// The coordination kernel's slice of I/O register storage: the interrupt
/// trio and the eight timer registers. Addresses outside this set read as
/// zero and ignore writes — they belong to peripherals this crate doesn't
/// own the storage for.
#[derive(Clone, Debug, Default)]
pub struct IoRegisters {
    pub ime: u16,
    pub ie: u16,
    pub if_: u16,
    pub tmcnt_lo: [u16; 4],
    pub tmcnt_hi: [u16; 4],
}

impl MemoryBus for IoRegisters {
    fn read_io(&self, addr: u32) -> u16 {
        match addr {
            REG_IME => self.ime,
            REG_IE => self.ie,
            REG_IF => self.if_,
            REG_TM0CNT_LO => self.tmcnt_lo[0],
            REG_TM1CNT_LO => self.tmcnt_lo[1],
            REG_TM2CNT_LO => self.tmcnt_lo[2],
            REG_TM3CNT_LO => self.tmcnt_lo[3],
            REG_TM0CNT_HI => self.tmcnt_hi[0],
            REG_TM1CNT_HI => self.tmcnt_hi[1],
            REG_TM2CNT_HI => self.tmcnt_hi[2],
            REG_TM3CNT_HI => self.tmcnt_hi[3],
            _ => 0,
        }
    }

    fn write_io(&mut self, addr: u32, value: u16) {
        match addr {
            REG_IME => self.ime = value,
            REG_IE => self.ie = value,
            // IF is write-1-to-clear; callers go through
            // `interrupts::Registers::acknowledge` and mirror the result here.
            REG_IF => self.if_ &= !value,
            REG_TM0CNT_LO => self.tmcnt_lo[0] = value,
            REG_TM1CNT_LO => self.tmcnt_lo[1] = value,
            REG_TM2CNT_LO => self.tmcnt_lo[2] = value,
            REG_TM3CNT_LO => self.tmcnt_lo[3] = value,
            REG_TM0CNT_HI => self.tmcnt_hi[0] = value,
            REG_TM1CNT_HI => self.tmcnt_hi[1] = value,
            REG_TM2CNT_HI => self.tmcnt_hi[2] = value,
            REG_TM3CNT_HI => self.tmcnt_hi[3] = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_write_clears_only_the_selected_bits() {
        let mut io = IoRegisters {
            if_: 0b0110,
            ..Default::default()
        };
        io.write_io(REG_IF, 0b0010);
        assert_eq!(io.if_, 0b0100);
    }

    #[test]
    fn unmapped_address_reads_as_zero() {
        let io = IoRegisters::default();
        assert_eq!(io.read_io(0x4000), 0);
    }
}
