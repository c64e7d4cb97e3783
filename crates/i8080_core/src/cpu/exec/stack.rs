use crate::cpu::{Bus8080, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = match (opcode >> 4) & 0x03 {
            0 => self.regs.bc.whole(),
            1 => self.regs.de.whole(),
            2 => self.regs.hl.whole(),
            _ => self.regs.af().whole(),
        };

        self.push16(bus, value);
        11
    }

    pub(super) fn exec_pop<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop16(bus);
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc.set_whole(value),
            1 => self.regs.de.set_whole(value),
            2 => self.regs.hl.set_whole(value),
            _ => self.regs.set_af(value),
        }

        10
    }

    /// XTHL: exchange HL with the word at the top of the stack.
    pub(super) fn exec_xthl<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let sp = self.regs.sp;
        let top = self.read16(bus, sp);
        let hl = self.regs.hl.whole();
        self.write16(bus, sp, hl);
        self.regs.hl.set_whole(top);
        18
    }
}
