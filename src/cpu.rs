//! CPU-facing state and the callback interface the console implements for
//! an external ARM7TDMI interpreter to drive (§4.6, §6 "CPU↔core hooks").
//!
//! The decoder itself is out of scope: this module only carries what the
//! scheduler, reset path, and interrupt delivery need to reason about the
//! CPU, plus the trait a hypothetical interpreter would call back through.

/// Privilege modes touched by reset (§4.4). The full mode set (User, FIQ,
/// Abort, Undefined, ...) belongs to the decoder and isn't modeled here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    System,
    Irq,
    Supervisor,
}

/// Banked stack pointers seeded at reset, before any BIOS or game code runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankedStackPointers {
    pub irq: u32,
    pub supervisor: u32,
    pub system: u32,
}

const SP_BASE_SYSTEM: u32 = 0x03FF_FF00;
const SP_BASE_IRQ: u32 = 0x03FF_FFA0;
const SP_BASE_SUPERVISOR: u32 = 0x03FF_FFE0;

impl Default for BankedStackPointers {
    fn default() -> Self {
        BankedStackPointers {
            irq: SP_BASE_IRQ,
            supervisor: SP_BASE_SUPERVISOR,
            system: SP_BASE_SYSTEM,
        }
    }
}

/// Scheduler- and interrupt-relevant CPU state (§4.1, §4.3). General
/// registers and CPSR/SPSR contents belong to the external interpreter.
#[derive(Clone, Debug)]
pub struct CpuState {
    pub halted: bool,
    pub spring_irq: bool,
    pub cycles: i32,
    pub next_event: i32,
    pub banked_sp: BankedStackPointers,
    /// Count of IRQ pulses delivered to the (out-of-scope) interpreter.
    /// Exists for observability in tests; a real interpreter would instead
    /// act on each pulse by entering IRQ mode before its next instruction.
    pub irq_pulses: u32,
}

impl CpuState {
    pub fn new() -> Self {
        CpuState {
            halted: false,
            spring_irq: false,
            cycles: 0,
            next_event: i32::MAX,
            banked_sp: BankedStackPointers::default(),
            irq_pulses: 0,
        }
    }

    /// Seed the banked stack pointers for IRQ, Supervisor, and System mode
    /// (§4.4 reset). Order matters only insofar as all three end up set;
    /// modeled here as plain field assignment since mode switching itself
    /// is the interpreter's job.
    pub fn reset(&mut self) {
        self.banked_sp = BankedStackPointers::default();
        self.halted = false;
        self.spring_irq = false;
        self.next_event = i32::MAX;
    }

    /// Halt the CPU (§4.3): collapses to the next scheduled wake cycle.
    pub fn halt(&mut self) {
        self.next_event = 0;
        self.halted = true;
    }

    /// The CPSR-read IRQ test (`readCPSR` hook, §4.3, §9 "Spring IRQ").
    /// If an unmasked interrupt is pending, arms a deferred raise rather
    /// than raising it immediately mid-instruction.
    pub fn test_irq(&mut self, pending: bool) {
        if pending {
            self.spring_irq = true;
            self.next_event = 0;
        }
    }

    /// Drain a pending spring IRQ at the top of a scheduler entry. Returns
    /// true if one was pending (the caller should pulse the CPU IRQ line).
    pub fn take_spring_irq(&mut self) -> bool {
        std::mem::take(&mut self.spring_irq)
    }

    /// Clear halt unconditionally. Every `interrupts::Registers::raise`
    /// call implies this, independent of whether the interrupt is unmasked
    /// (§4.3: "raising an IRQ clears halt unconditionally").
    pub fn clear_halt(&mut self) {
        self.halted = false;
    }

    /// Pulse the CPU's IRQ line: the interrupt was unmasked at raise time,
    /// so an external interpreter would enter IRQ mode before its next
    /// instruction.
    pub fn pulse_irq(&mut self) {
        self.irq_pulses = self.irq_pulses.wrapping_add(1);
    }
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new()
    }
}

/// The six callback entry points an external ARM7TDMI interpreter installs
/// on its interrupt-handler table (§6). The console implements this trait;
/// a hypothetical decoder holds `&mut dyn CpuHooks` (or is generic over it)
/// and calls back into it at the documented points.
pub trait CpuHooks {
    /// Called once at startup and on explicit reset.
    fn reset(&mut self);

    /// Called whenever the interpreter's cycle budget is exhausted; this is
    /// the scheduler entry point (§4.1).
    fn process_events(&mut self);

    /// Software interrupt with a 16-bit comment field (Thumb `SWI`). BIOS
    /// call semantics are out of scope; the default wiring logs and returns.
    fn swi16(&mut self, comment: u16);

    /// Software interrupt with a 32-bit comment field (ARM `SWI`).
    fn swi32(&mut self, comment: u32);

    /// An opcode the interpreter has no decoding for.
    fn hit_illegal(&mut self, opcode: u32);

    /// A recognized-but-unimplemented opcode (debugger stub trap).
    fn hit_stub(&mut self, opcode: u32);

    /// CPSR read, used as the IRQ test point (§4.3, §9).
    fn read_cpsr(&mut self);
}
