//! Minimal video timing stand-in (§3.1, §4.1 scheduler ordering). Pixel
//! rendering is out of scope; only the hblank/vblank cadence and IRQ-raise
//! points needed to exercise scheduler ordering and count interrupts live
//! here.

use crate::interrupts::{Irq, IrqEffect, Registers};

const CYCLES_PER_SCANLINE: i32 = 1232;
const HBLANK_OFFSET: i32 = 1006;
const VISIBLE_LINES: i32 = 160;
const TOTAL_LINES: i32 = 228;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Visible,
    HBlank,
    VBlank,
}

#[derive(Clone, Copy, Debug)]
pub struct Video {
    pub vcount: i32,
    phase: Phase,
    next_event: i32,
    pub hblank_irq_enable: bool,
    pub vblank_irq_enable: bool,
}

impl Video {
    pub fn new() -> Self {
        Video {
            vcount: 0,
            phase: Phase::Visible,
            next_event: HBLANK_OFFSET,
            hblank_irq_enable: false,
            vblank_irq_enable: false,
        }
    }

    /// Advance by `cycles`, raising hblank/vblank IRQs as their phases are
    /// entered. Returns the merged effect so the caller can clear halt
    /// and/or pulse the CPU line (§4.3: raising clears halt even if masked).
    pub fn process_events_with_interrupts(&mut self, cycles: i32, interrupts: &mut Registers) -> (i32, IrqEffect) {
        self.next_event -= cycles;
        let mut effect = IrqEffect::default();

        if self.next_event <= 0 {
            match self.phase {
                Phase::Visible => {
                    self.phase = Phase::HBlank;
                    self.next_event += CYCLES_PER_SCANLINE - HBLANK_OFFSET;
                    if self.hblank_irq_enable {
                        effect = effect.merge(interrupts.raise(Irq::HBlank));
                    }
                }
                Phase::HBlank => {
                    self.vcount += 1;
                    self.phase = if self.vcount == VISIBLE_LINES {
                        Phase::VBlank
                    } else {
                        Phase::Visible
                    };
                    self.next_event += HBLANK_OFFSET;
                    if self.phase == Phase::VBlank && self.vblank_irq_enable {
                        effect = effect.merge(interrupts.raise(Irq::VBlank));
                    }
                }
                Phase::VBlank => {
                    self.vcount += 1;
                    if self.vcount == TOTAL_LINES {
                        self.vcount = 0;
                        self.phase = Phase::Visible;
                    }
                    self.next_event += CYCLES_PER_SCANLINE;
                }
            }
        }

        (self.next_event, effect)
    }
}

impl Default for Video {
    fn default() -> Self {
        Self::new()
    }
}
