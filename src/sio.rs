//! Serial I/O timing contract (§3.1, §4.1 scheduler ordering). Link-cable
//! protocol is out of scope; this stand-in only tracks a pending transfer's
//! completion cycle and raises the serial IRQ, to exercise ordering against
//! the rest of the scheduler.

use crate::interrupts::{Irq, IrqEffect, Registers};

#[derive(Clone, Copy, Debug, Default)]
pub struct Sio {
    pub transfer_pending: bool,
    pub next_event: i32,
    pub irq_enable: bool,
}

impl Sio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_transfer(&mut self, completes_in: i32) {
        self.transfer_pending = true;
        self.next_event = completes_in;
    }

    pub fn process_events_with_interrupts(&mut self, cycles: i32, interrupts: &mut Registers) -> (i32, IrqEffect) {
        if !self.transfer_pending {
            return (i32::MAX, IrqEffect::default());
        }
        self.next_event -= cycles;
        let mut effect = IrqEffect::default();
        if self.next_event <= 0 {
            self.transfer_pending = false;
            if self.irq_enable {
                effect = interrupts.raise(Irq::Serial);
            }
        }
        (self.next_event, effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_sio_never_wins_the_scheduler_fold() {
        let mut sio = Sio::new();
        let mut interrupts = Registers::new();
        let (next_event, effect) = sio.process_events_with_interrupts(100, &mut interrupts);
        assert_eq!(next_event, i32::MAX);
        assert!(!effect.pulse);
    }

    #[test]
    fn completed_transfer_raises_serial_irq_when_enabled() {
        let mut sio = Sio::new();
        sio.irq_enable = true;
        sio.start_transfer(10);
        let mut interrupts = Registers::new();
        interrupts.ime = 1;
        interrupts.ie = Irq::Serial.bit();
        let (_, effect) = sio.process_events_with_interrupts(10, &mut interrupts);
        assert!(effect.pulse);
        assert!(!sio.transfer_pending);
    }
}
