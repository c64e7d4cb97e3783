use crate::cpu::{alu, Bus8080, Cpu};

impl Cpu {
    pub(super) fn exec_inr<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let index = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, index);
        let (result, flags) = alu::inr(value, self.regs.flags);
        self.regs.flags = flags;
        self.write_reg8(bus, index, result);

        if index == 6 {
            10
        } else {
            5
        }
    }

    pub(super) fn exec_dcr<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let index = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, index);
        let (result, flags) = alu::dcr(value, self.regs.flags);
        self.regs.flags = flags;
        self.write_reg8(bus, index, result);

        if index == 6 {
            10
        } else {
            5
        }
    }

    // INX/DCX do not touch the flags.
    pub(super) fn exec_inx(&mut self, opcode: u8) -> u32 {
        let rp = opcode >> 4;
        let value = self.regs.rp(rp).wrapping_add(1);
        self.regs.set_rp(rp, value);
        5
    }

    pub(super) fn exec_dcx(&mut self, opcode: u8) -> u32 {
        let rp = opcode >> 4;
        let value = self.regs.rp(rp).wrapping_sub(1);
        self.regs.set_rp(rp, value);
        5
    }
}
