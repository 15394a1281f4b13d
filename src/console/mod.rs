//! The aggregate root (§3 "Console"): owns every peripheral directly and
//! coordinates them through `&mut self` methods instead of the cyclic
//! back-pointers the source uses (§9 "No back-pointers").

pub mod overrides;

mod cpu_hooks;
mod lifecycle;
mod registers;
mod scheduler;

use memmap2::Mmap;

use crate::audio::FifoRouter;
use crate::cartridge::Cartridge;
use crate::cpu::CpuState;
use crate::debugger::Debugger;
use crate::dma::Dma;
use crate::gpio::GpioStub;
use crate::interrupts::Registers as InterruptRegisters;
use crate::log::LogLevel;
use crate::memory::IoRegisters;
use crate::savedata::SavedataStub;
use crate::sio::Sio;
use crate::timers::TimerArray;
use crate::video::Video;

pub struct Console {
    pub cpu: CpuState,
    pub interrupts: InterruptRegisters,
    pub io: IoRegisters,
    pub timers: TimerArray,
    pub video: Video,
    pub audio: FifoRouter,
    pub dma: Dma,
    pub sio: Sio,
    pub gpio: GpioStub,
    pub savedata: SavedataStub,
    pub cartridge: Option<Cartridge>,
    pub bios: Option<Mmap>,
    pub log_mask: LogLevel,
    pub log_handler: Option<crate::log::LogHandler>,
    /// Attached per §4.5: `hit_stub`/`hit_illegal` hand control here instead
    /// of depending on a concrete debugger UI (non-goal, §1).
    pub debugger: Option<Box<dyn Debugger>>,
}

impl Default for Console {
    fn default() -> Self {
        Console {
            cpu: CpuState::new(),
            interrupts: InterruptRegisters::new(),
            io: IoRegisters::default(),
            timers: TimerArray::new(),
            video: Video::new(),
            audio: FifoRouter::default(),
            dma: Dma::new(),
            sio: Sio::new(),
            gpio: GpioStub::default(),
            savedata: SavedataStub::default(),
            cartridge: None,
            bios: None,
            log_mask: LogLevel::default_mask(),
            log_handler: None,
            debugger: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_console_has_no_cartridge_or_bios_loaded() {
        let console = Console::new();
        assert!(console.cartridge.is_none());
        assert!(console.bios.is_none());
        assert!(!console.cpu.halted);
    }
}
