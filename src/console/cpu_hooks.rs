//! `CpuHooks` implementation (§4.6, §6): the six callback entry points an
//! external ARM7TDMI interpreter calls back through. `swi16`/`swi32` have
//! no specified semantics in this spec (BIOS HLE is a non-goal, §1) and are
//! wired as logged stubs.

use super::Console;
use crate::cpu::CpuHooks;
use crate::debugger::BreakReason;
use crate::log::LogLevel;

impl CpuHooks for Console {
    fn reset(&mut self) {
        Console::reset(self);
    }

    fn process_events(&mut self) {
        Console::process_events(self);
    }

    fn swi16(&mut self, comment: u16) {
        self.log(LogLevel::STUB, &format!("swi16 #{comment:#04x}: BIOS HLE not implemented"));
    }

    fn swi32(&mut self, comment: u32) {
        self.log(LogLevel::STUB, &format!("swi32 #{comment:#08x}: BIOS HLE not implemented"));
    }

    /// §4.5 "Stub opcode handler": a well-known no-op/unused opcode slot.
    /// With a debugger attached, log at Stub and hand control to it;
    /// without one, fatal (§7: "without debugger: fatal").
    fn hit_stub(&mut self, opcode: u32) {
        match self.debugger.take() {
            Some(mut debugger) => {
                self.log(LogLevel::STUB, &format!("stub opcode {opcode:#010x}"));
                debugger.break_into(BreakReason::IllegalOp);
                self.debugger = Some(debugger);
            }
            None => self.log(LogLevel::FATAL, &format!("stub opcode {opcode:#010x} with no debugger attached")),
        }
    }

    /// §4.5 "Illegal opcode handler": always warns; breaks into an attached
    /// debugger but never terminates (§7: "without debugger: continue").
    fn hit_illegal(&mut self, opcode: u32) {
        self.log(LogLevel::WARN, &format!("illegal opcode {opcode:#010x}"));
        if let Some(mut debugger) = self.debugger.take() {
            debugger.break_into(BreakReason::IllegalOp);
            self.debugger = Some(debugger);
        }
    }

    /// §4.3 "Reading CPSR": the mid-instruction IRQ test point. Defers the
    /// raise to the next scheduler entry (`springIRQ`) rather than acting
    /// mid-instruction.
    fn read_cpsr(&mut self) {
        let pending = self.interrupts.pending();
        self.cpu.test_irq(pending);
    }
}
