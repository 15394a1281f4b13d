//! Console-level I/O register dispatch (§4.2, §4.3, §6): the address
//! decode a memory collaborator calls through when software touches a
//! timer or interrupt register. Bridges the logical shadow state
//! (`TimerArray`, `interrupts::Registers`) to the raw storage in `self.io`
//! so the two never drift (§5 "shared resources": peripherals with shadow
//! state reconcile with the register on control-write and overflow).

use super::Console;
use crate::interrupts::Irq;
use crate::log::LogLevel;
use crate::memory::{self, MemoryBus};

impl Console {
    /// Dispatch a write into the I/O register window this crate owns.
    /// Addresses outside it fall through to `self.io`'s plain storage.
    pub fn write_io(&mut self, addr: u32, value: u16) {
        match addr {
            memory::REG_TM0CNT_LO => self.write_timer_reload(0, value),
            memory::REG_TM1CNT_LO => self.write_timer_reload(1, value),
            memory::REG_TM2CNT_LO => self.write_timer_reload(2, value),
            memory::REG_TM3CNT_LO => self.write_timer_reload(3, value),
            memory::REG_TM0CNT_HI => self.write_timer_control(0, value),
            memory::REG_TM1CNT_HI => self.write_timer_control(1, value),
            memory::REG_TM2CNT_HI => self.write_timer_control(2, value),
            memory::REG_TM3CNT_HI => self.write_timer_control(3, value),
            memory::REG_IE => self.write_ie(value),
            memory::REG_IME => self.write_ime(value),
            memory::REG_IF => self.acknowledge_if(value),
            _ => self.io.write_io(addr, value),
        }
    }

    /// Dispatch a read from the I/O register window this crate owns.
    /// `TMxCNT_LO` is materialized on the way out (§4.2 "Polling a count
    /// register"); everything else is a plain shadow-state mirror.
    pub fn read_io(&mut self, addr: u32) -> u16 {
        match addr {
            memory::REG_TM0CNT_LO => self.read_timer_count(0),
            memory::REG_TM1CNT_LO => self.read_timer_count(1),
            memory::REG_TM2CNT_LO => self.read_timer_count(2),
            memory::REG_TM3CNT_LO => self.read_timer_count(3),
            memory::REG_IE => self.interrupts.ie,
            memory::REG_IF => self.interrupts.if_,
            memory::REG_IME => self.interrupts.ime,
            _ => self.io.read_io(addr),
        }
    }

    fn write_timer_reload(&mut self, index: usize, value: u16) {
        self.timers.write_reload(index, value);
        self.io.tmcnt_lo[index] = value;
    }

    fn write_timer_control(&mut self, index: usize, value: u16) {
        let now = self.cpu.cycles;
        if let Some(candidate) = self.timers.write_control(index, now, value) {
            if candidate < self.cpu.next_event {
                self.cpu.next_event = candidate;
            }
        }
        self.io.tmcnt_hi[index] = value;
        self.io.tmcnt_lo[index] = self.timers.timer(index).count_lo;
    }

    fn read_timer_count(&mut self, index: usize) -> u16 {
        let now = self.cpu.cycles;
        let value = self.timers.read_count(index, now);
        self.io.tmcnt_lo[index] = value;
        value
    }

    fn write_ie(&mut self, value: u16) {
        self.log_unsupported_irq_sources(value);
        let effect = self.interrupts.write_ie(value);
        self.io.ie = value;
        self.apply_irq_effect(effect);
    }

    fn write_ime(&mut self, value: u16) {
        let effect = self.interrupts.write_ime(value);
        self.io.ime = value;
        self.apply_irq_effect(effect);
    }

    fn acknowledge_if(&mut self, value: u16) {
        self.interrupts.acknowledge(value);
        self.io.if_ = self.interrupts.if_;
    }

    /// §7 "Unsupported IRQ sources": Keypad/Gamepak are logged as stubs
    /// when written into IE but never actually generated by this core.
    fn log_unsupported_irq_sources(&mut self, value: u16) {
        let unsupported = (Irq::Keypad.bit() | Irq::Gamepak.bit()) & value;
        if unsupported != 0 {
            self.log(LogLevel::STUB, "IE write enables Keypad/Gamepak IRQ: not generated by this core");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_control_mirrors_into_io_and_lowers_cpu_next_event() {
        let mut console = Console::new();
        console.cpu.next_event = 1_000_000;
        console.write_io(memory::REG_TM0CNT_LO, 0xFFF0);
        console.write_io(memory::REG_TM0CNT_HI, 0b1100_0000); // enable + irq, prescale /1

        assert_eq!(console.io.tmcnt_hi[0], 0b1100_0000);
        assert_eq!(console.io.tmcnt_lo[0], 0xFFF0);
        assert_eq!(console.cpu.next_event, 16);
    }

    #[test]
    fn read_timer_count_materializes_and_mirrors_into_io() {
        let mut console = Console::new();
        console.write_io(memory::REG_TM0CNT_LO, 0xFFF0);
        console.write_io(memory::REG_TM0CNT_HI, 0b1000_0000); // enable, prescale /1
        console.cpu.cycles = 4;

        let value = console.read_io(memory::REG_TM0CNT_LO);
        assert_eq!(value, 0xFFF4);
        assert_eq!(console.io.tmcnt_lo[0], 0xFFF4);
    }

    #[test]
    fn ie_write_fires_for_an_already_pending_interrupt() {
        let mut console = Console::new();
        console.write_io(memory::REG_IME, 1);
        console.interrupts.if_ = Irq::Timer0.bit();
        console.write_io(memory::REG_IE, Irq::Timer0.bit());

        assert_eq!(console.cpu.irq_pulses, 1);
        assert_eq!(console.io.ie, Irq::Timer0.bit());
    }

    #[test]
    fn ie_write_enabling_keypad_logs_a_stub_without_raising_anything() {
        let mut console = Console::new();
        let mut seen = Vec::new();
        console.log_handler = Some(Box::new(move |level, msg| seen.push((level, msg.to_string()))));
        console.write_io(memory::REG_IE, Irq::Keypad.bit());
        assert_eq!(console.io.ie, Irq::Keypad.bit());
        assert_eq!(console.interrupts.if_, 0);
    }

    #[test]
    fn if_write_acknowledges_only_the_selected_bits_in_both_stores() {
        let mut console = Console::new();
        console.interrupts.if_ = Irq::Timer0.bit() | Irq::Timer1.bit();
        console.io.if_ = console.interrupts.if_;

        console.write_io(memory::REG_IF, Irq::Timer0.bit());
        assert_eq!(console.interrupts.if_, Irq::Timer1.bit());
        assert_eq!(console.io.if_, Irq::Timer1.bit());
    }
}
