use super::{Bus8080, Cpu};

impl Cpu {
    /// Deliver a maskable interrupt.
    ///
    /// `opcode` is the instruction the interrupting device places on the data
    /// bus during the acknowledge cycle, normally an `RST n`. It runs in place
    /// of a fetch from memory: PC is not advanced first, so an RST pushes the
    /// address of the instruction that would have run next. Any operand bytes
    /// of a multi-byte opcode are still read from PC.
    ///
    /// While INTE is clear the request is ignored and 0 is returned. Otherwise
    /// INTE is cleared, a pending HLT is released, and the number of cycles
    /// spent executing `opcode` is returned.
    pub fn interrupt<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        if !self.interrupt_enable {
            log::debug!(
                "8080 interrupt 0x{opcode:02X} ignored at PC=0x{pc:04X}: INTE clear",
                pc = self.regs.pc,
            );
            return 0;
        }

        log::debug!(
            "8080 interrupt: op=0x{opcode:02X} pc=0x{pc:04X} sp=0x{sp:04X} halted={halted}",
            pc = self.regs.pc,
            sp = self.regs.sp,
            halted = self.halted,
        );

        self.interrupt_enable = false;
        self.halted = false;
        self.exec_opcode(bus, opcode)
    }
}
