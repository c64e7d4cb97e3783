use crate::cpu::{alu, Bus8080, Cpu};

impl Cpu {
    pub(super) fn exec_alu_reg_group<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let operation = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);

        self.alu_op(operation, value);

        if src == 6 {
            7
        } else {
            4
        }
    }

    pub(super) fn exec_alu_imm<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));
        let value = self.fetch8(bus);
        self.alu_op((opcode >> 3) & 0x07, value);
        7
    }

    /// Apply one of the eight accumulator operations selected by bits 3..5.
    fn alu_op(&mut self, operation: u8, value: u8) {
        let a = self.regs.a;
        let carry = self.regs.flags.carry;
        let (result, flags) = match operation {
            0 => alu::add(a, value, false),
            1 => alu::add(a, value, carry),
            2 => alu::sub(a, value, false),
            3 => alu::sub(a, value, carry),
            4 => alu::and(a, value),
            5 => alu::xor(a, value),
            6 => alu::or(a, value),
            7 => {
                // CMP: flags of the subtraction, A unchanged.
                let (_, flags) = alu::sub(a, value, false);
                (a, flags)
            }
            _ => unreachable!(),
        };
        self.regs.a = result;
        self.regs.flags = flags;
    }

    pub(super) fn exec_dad(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.regs.rp(opcode >> 4);
        let (result, flags) = alu::dad(self.regs.hl.whole(), value, self.regs.flags);
        self.regs.hl.set_whole(result);
        self.regs.flags = flags;
        10
    }

    pub(super) fn exec_rotate(&mut self, opcode: u8) -> u32 {
        let a = self.regs.a;
        let flags = self.regs.flags;
        let (result, flags) = match opcode {
            0x07 => alu::rlc(a, flags),
            0x0F => alu::rrc(a, flags),
            0x17 => alu::ral(a, flags),
            0x1F => alu::rar(a, flags),
            _ => unreachable!("not a rotate opcode {opcode:02X}"),
        };
        self.regs.a = result;
        self.regs.flags = flags;
        4
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        let (result, flags) = alu::daa(self.regs.a, self.regs.flags);
        self.regs.a = result;
        self.regs.flags = flags;
        4
    }

    pub(super) fn exec_cma(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        4
    }

    pub(super) fn exec_stc(&mut self) -> u32 {
        self.regs.flags.carry = true;
        4
    }

    pub(super) fn exec_cmc(&mut self) -> u32 {
        self.regs.flags.carry = !self.regs.flags.carry;
        4
    }
}
