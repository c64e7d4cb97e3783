use crate::cpu::{Bus8080, Cpu};

impl Cpu {
    pub(super) fn exec_mov<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;

        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);

        if dst == 6 || src == 6 {
            7
        } else {
            5
        }
    }

    pub(super) fn exec_mvi<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let dst = (opcode >> 3) & 0x07;
        let value = self.fetch8(bus);
        self.write_reg8(bus, dst, value);

        if dst == 6 {
            10
        } else {
            7
        }
    }

    pub(super) fn exec_lxi<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));
        let value = self.fetch16(bus);
        self.regs.set_rp(opcode >> 4, value);
        10
    }

    pub(super) fn exec_stax<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = if opcode == 0x02 {
            self.regs.bc.whole()
        } else {
            self.regs.de.whole()
        };
        bus.mem_write(addr, self.regs.a);
        7
    }

    pub(super) fn exec_ldax<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = if opcode == 0x0A {
            self.regs.bc.whole()
        } else {
            self.regs.de.whole()
        };
        self.regs.a = bus.mem_read(addr);
        7
    }

    pub(super) fn exec_sta<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.mem_write(addr, self.regs.a);
        13
    }

    pub(super) fn exec_lda<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        self.regs.a = bus.mem_read(addr);
        13
    }

    /// SHLD: store L at a16 and H at a16+1.
    pub(super) fn exec_shld<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let hl = self.regs.hl.whole();
        self.write16(bus, addr, hl);
        16
    }

    pub(super) fn exec_lhld<B: Bus8080>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let value = self.read16(bus, addr);
        self.regs.hl.set_whole(value);
        16
    }

    pub(super) fn exec_xchg(&mut self) -> u32 {
        core::mem::swap(&mut self.regs.de, &mut self.regs.hl);
        4
    }

    pub(super) fn exec_sphl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl.whole();
        5
    }
}
