mod bus;
mod exec;
mod flags;
mod helpers;
mod interrupts;
mod regs;

pub mod alu;

pub use bus::{Bus8080, CallbackBus};
pub use flags::{Flags, Psw};
pub use regs::{RegPair, Registers};

/// Cycles reported by `step` while the CPU sits in HLT.
///
/// The 8080 keeps running idle machine cycles until an interrupt arrives; we
/// charge one 4 T-state cycle per call so cycle-paced hosts keep advancing.
pub const HALT_IDLE_CYCLES: u32 = 4;

/// Intel 8080 CPU state.
///
/// The CPU owns no memory; every access goes through the [`Bus8080`] passed to
/// [`Cpu::step`] and [`Cpu::interrupt`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
    /// INTE flip-flop, set by EI and cleared by DI or an accepted interrupt.
    pub interrupt_enable: bool,
    /// Set by HLT, cleared only by an accepted interrupt or a reset.
    pub halted: bool,
}

impl Cpu {
    /// Create a new CPU instance in reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the power-on state.
    ///
    /// PC, flags, INTE and the halt latch are cleared. The general purpose
    /// registers and SP are left alone: the real chip does not initialise
    /// them either.
    pub fn reset(&mut self) {
        self.regs.pc = 0;
        self.regs.flags = Flags::default();
        self.interrupt_enable = false;
        self.halted = false;
    }

    /// Set PC, e.g. to start a program at its entry point.
    #[inline]
    pub fn jump(&mut self, addr: u16) {
        self.regs.pc = addr;
    }

    /// Execute a single instruction and return the number of T-states taken.
    ///
    /// While halted no opcode is fetched and PC stays where HLT left it;
    /// only [`Cpu::interrupt`] (or [`Cpu::reset`]) gets the CPU running again.
    pub fn step<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        if self.halted {
            return HALT_IDLE_CYCLES;
        }

        let opcode_addr = self.regs.pc;
        let opcode = self.fetch8(bus);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "8080 {pc:04X}: {op:02X} {insn} (A={a:02X} BC={bc:04X} DE={de:04X} HL={hl:04X} SP={sp:04X} F={f:02X})",
                pc = opcode_addr,
                op = opcode,
                insn = crate::opcodes::decode(opcode),
                a = self.regs.a,
                bc = self.regs.bc.whole(),
                de = self.regs.de.whole(),
                hl = self.regs.hl.whole(),
                sp = self.regs.sp,
                f = self.regs.flags.to_u8(),
            );
        }
        self.exec_opcode(bus, opcode)
    }
}

#[cfg(test)]
mod tests;
