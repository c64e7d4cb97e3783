use crate::cpu::{Bus8080, Cpu};

impl Cpu {
    pub(super) fn exec_jmp<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        self.regs.pc = addr;
        10
    }

    /// Jcc a16. The address is always fetched; a jump that is not taken
    /// skips the final PC load and reports 7 cycles instead of 10.
    pub(super) fn exec_jcc<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC2);
        let addr = self.fetch16(bus);
        if self.condition(opcode >> 3) {
            self.regs.pc = addr;
            10
        } else {
            7
        }
    }

    pub(super) fn exec_pchl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl.whole();
        5
    }

    pub(super) fn exec_call<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = addr;
        17
    }

    pub(super) fn exec_ccc<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC4);
        let addr = self.fetch16(bus);
        if self.condition(opcode >> 3) {
            let ret = self.regs.pc;
            self.push16(bus, ret);
            self.regs.pc = addr;
            17
        } else {
            11
        }
    }

    pub(super) fn exec_ret<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop16(bus);
        10
    }

    pub(super) fn exec_rcc<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC0);
        if self.condition(opcode >> 3) {
            self.regs.pc = self.pop16(bus);
            11
        } else {
            5
        }
    }

    /// RST n: call 8 * n. Also the usual instruction supplied on an
    /// interrupt acknowledge.
    pub(super) fn exec_rst<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC7);
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = u16::from(opcode & 0x38);
        11
    }
}
