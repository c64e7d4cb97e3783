mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus8080, Cpu};

impl Cpu {
    /// Decode and execute a single opcode and return the number of cycles.
    ///
    /// Operand bytes, if any, are fetched from PC. Every one of the 256
    /// opcodes is handled: the twelve undocumented encodings run the
    /// documented instruction they duplicate on the real chip.
    pub(super) fn exec_opcode<B: Bus8080>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        match opcode {
            // 0x00: NOP
            0x00 => 4,

            // Undocumented: 08/10/18/20/28/30/38 decode as NOP.
            0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => 4,

            // LXI rp, d16
            0x01 | 0x11 | 0x21 | 0x31 => self.exec_lxi(bus, opcode),

            // STAX B / STAX D
            0x02 | 0x12 => self.exec_stax(bus, opcode),

            // LDAX B / LDAX D
            0x0A | 0x1A => self.exec_ldax(bus, opcode),

            // SHLD a16 / LHLD a16
            0x22 => self.exec_shld(bus),
            0x2A => self.exec_lhld(bus),

            // STA a16 / LDA a16
            0x32 => self.exec_sta(bus),
            0x3A => self.exec_lda(bus),

            // INX rp / DCX rp
            0x03 | 0x13 | 0x23 | 0x33 => self.exec_inx(opcode),
            0x0B | 0x1B | 0x2B | 0x3B => self.exec_dcx(opcode),

            // INR r (and INR M)
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => self.exec_inr(bus, opcode),

            // DCR r (and DCR M)
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => self.exec_dcr(bus, opcode),

            // MVI r, d8 (and MVI M, d8)
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => self.exec_mvi(bus, opcode),

            // DAD rp
            0x09 | 0x19 | 0x29 | 0x39 => self.exec_dad(opcode),

            // RLC / RRC / RAL / RAR
            0x07 | 0x0F | 0x17 | 0x1F => self.exec_rotate(opcode),

            0x27 => self.exec_daa(),
            0x2F => self.exec_cma(),
            0x37 => self.exec_stc(),
            0x3F => self.exec_cmc(),

            // HLT sits in the middle of the MOV block (it would be MOV M,M).
            0x76 => self.exec_hlt(),

            // MOV r1, r2
            0x40..=0x7F => self.exec_mov(bus, opcode),

            // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r
            0x80..=0xBF => self.exec_alu_reg_group(bus, opcode),

            // ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => self.exec_alu_imm(bus, opcode),

            // JMP a16
            0xC3 => self.exec_jmp(bus),

            // Undocumented: CB decodes as JMP a16.
            0xCB => self.exec_jmp(bus),

            // Jcc a16
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => self.exec_jcc(bus, opcode),

            // CALL a16
            0xCD => self.exec_call(bus),

            // Undocumented: DD, ED and FD decode as CALL a16.
            0xDD | 0xED | 0xFD => self.exec_call(bus),

            // Ccc a16
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => self.exec_ccc(bus, opcode),

            // RET
            0xC9 => self.exec_ret(bus),

            // Undocumented: D9 decodes as RET.
            0xD9 => self.exec_ret(bus),

            // Rcc
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => self.exec_rcc(bus, opcode),

            // RST n
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => self.exec_rst(bus, opcode),

            // PUSH rp / PUSH PSW
            0xC5 | 0xD5 | 0xE5 | 0xF5 => self.exec_push(bus, opcode),

            // POP rp / POP PSW
            0xC1 | 0xD1 | 0xE1 | 0xF1 => self.exec_pop(bus, opcode),

            0xE3 => self.exec_xthl(bus),
            0xE9 => self.exec_pchl(),
            0xEB => self.exec_xchg(),
            0xF9 => self.exec_sphl(),

            // OUT d8 / IN d8
            0xD3 => self.exec_out(bus),
            0xDB => self.exec_in(bus),

            // DI / EI
            0xF3 => self.exec_di(),
            0xFB => self.exec_ei(),
        }
    }
}
