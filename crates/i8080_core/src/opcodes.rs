//! Static description of the 256 8080 opcodes.
//!
//! The execution engine does not consult this table; it exists so hosts (a
//! debugger, a trace log, a disassembler) can ask what an opcode is, how long
//! it is and what it costs. The engine and the table are checked against each
//! other in the CPU tests.

use std::fmt;

/// Broad instruction group, following the grouping of the Intel 8080
/// programming manual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    DataMove,
    Arithmetic,
    Logic,
    Branch,
    Stack,
    Io,
    Control,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Operands {
    None,
    /// 8-bit register or M.
    Reg(u8),
    /// Destination, source.
    RegReg(u8, u8),
    RegImm8(u8),
    /// Register pair as named by LXI/INX/DCX/DAD/LDAX/STAX.
    Pair(u8),
    PairImm16(u8),
    /// Register pair as named by PUSH/POP.
    StackPair(u8),
    Imm8,
    Addr,
    Vector(u8),
}

/// Descriptor of a single opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: &'static str,
    operands: Operands,
    /// Total length in bytes, opcode included (1..=3).
    pub length: u8,
    pub category: Category,
    /// T-states when executed; for conditional branches, the cost when the
    /// branch is taken.
    pub cycles: u32,
    /// T-states of a conditional branch that is not taken.
    pub cycles_not_taken: Option<u32>,
    /// For undocumented encodings, the documented opcode they duplicate.
    pub alias_of: Option<u8>,
}

const REG_NAMES: [&str; 8] = ["B", "C", "D", "E", "H", "L", "M", "A"];
const PAIR_NAMES: [&str; 4] = ["B", "D", "H", "SP"];
const STACK_PAIR_NAMES: [&str; 4] = ["B", "D", "H", "PSW"];

const ALU_REG: [&str; 8] = ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"];
const ALU_IMM: [&str; 8] = ["ADI", "ACI", "SUI", "SBI", "ANI", "XRI", "ORI", "CPI"];
const JUMPS: [&str; 8] = ["JNZ", "JZ", "JNC", "JC", "JPO", "JPE", "JP", "JM"];
const CALLS: [&str; 8] = ["CNZ", "CZ", "CNC", "CC", "CPO", "CPE", "CP", "CM"];
const RETURNS: [&str; 8] = ["RNZ", "RZ", "RNC", "RC", "RPO", "RPE", "RP", "RM"];
const MISC: [&str; 8] = ["RLC", "RRC", "RAL", "RAR", "DAA", "CMA", "STC", "CMC"];

impl Instruction {
    const fn new(
        opcode: u8,
        mnemonic: &'static str,
        operands: Operands,
        length: u8,
        category: Category,
        cycles: u32,
    ) -> Self {
        Self {
            opcode,
            mnemonic,
            operands,
            length,
            category,
            cycles,
            cycles_not_taken: None,
            alias_of: None,
        }
    }

    const fn not_taken(self, cycles: u32) -> Self {
        Self {
            cycles_not_taken: Some(cycles),
            ..self
        }
    }

    /// Describe `opcode` as the undocumented duplicate of `canonical`.
    const fn alias(opcode: u8, canonical: u8) -> Self {
        Self {
            opcode,
            alias_of: Some(canonical),
            ..describe(canonical)
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.cycles_not_taken.is_some()
    }

    pub fn is_documented(&self) -> bool {
        self.alias_of.is_none()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        match self.operands {
            Operands::None => Ok(()),
            Operands::Reg(r) => write!(f, " {}", REG_NAMES[r as usize]),
            Operands::RegReg(dst, src) => {
                write!(f, " {},{}", REG_NAMES[dst as usize], REG_NAMES[src as usize])
            }
            Operands::RegImm8(r) => write!(f, " {},d8", REG_NAMES[r as usize]),
            Operands::Pair(rp) => write!(f, " {}", PAIR_NAMES[rp as usize]),
            Operands::PairImm16(rp) => write!(f, " {},d16", PAIR_NAMES[rp as usize]),
            Operands::StackPair(rp) => write!(f, " {}", STACK_PAIR_NAMES[rp as usize]),
            Operands::Imm8 => f.write_str(" d8"),
            Operands::Addr => f.write_str(" a16"),
            Operands::Vector(n) => write!(f, " {n}"),
        }
    }
}

const fn describe(opcode: u8) -> Instruction {
    use Category::*;

    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let rp = y >> 1;
    let op = opcode;

    match x {
        0 => match z {
            0 if y == 0 => Instruction::new(op, "NOP", Operands::None, 1, Control, 4),
            0 => Instruction::alias(op, 0x00),
            1 if y & 1 == 0 => Instruction::new(op, "LXI", Operands::PairImm16(rp), 3, DataMove, 10),
            1 => Instruction::new(op, "DAD", Operands::Pair(rp), 1, Arithmetic, 10),
            2 => match y {
                0 | 2 => Instruction::new(op, "STAX", Operands::Pair(rp), 1, DataMove, 7),
                1 | 3 => Instruction::new(op, "LDAX", Operands::Pair(rp), 1, DataMove, 7),
                4 => Instruction::new(op, "SHLD", Operands::Addr, 3, DataMove, 16),
                5 => Instruction::new(op, "LHLD", Operands::Addr, 3, DataMove, 16),
                6 => Instruction::new(op, "STA", Operands::Addr, 3, DataMove, 13),
                _ => Instruction::new(op, "LDA", Operands::Addr, 3, DataMove, 13),
            },
            3 if y & 1 == 0 => Instruction::new(op, "INX", Operands::Pair(rp), 1, Arithmetic, 5),
            3 => Instruction::new(op, "DCX", Operands::Pair(rp), 1, Arithmetic, 5),
            4 => Instruction::new(op, "INR", Operands::Reg(y), 1, Arithmetic, if y == 6 { 10 } else { 5 }),
            5 => Instruction::new(op, "DCR", Operands::Reg(y), 1, Arithmetic, if y == 6 { 10 } else { 5 }),
            6 => Instruction::new(op, "MVI", Operands::RegImm8(y), 2, DataMove, if y == 6 { 10 } else { 7 }),
            _ => {
                let category = if y == 4 { Arithmetic } else { Logic };
                Instruction::new(op, MISC[y as usize], Operands::None, 1, category, 4)
            }
        },
        1 if opcode == 0x76 => Instruction::new(op, "HLT", Operands::None, 1, Control, 7),
        1 => Instruction::new(
            op,
            "MOV",
            Operands::RegReg(y, z),
            1,
            DataMove,
            if y == 6 || z == 6 { 7 } else { 5 },
        ),
        2 => Instruction::new(
            op,
            ALU_REG[y as usize],
            Operands::Reg(z),
            1,
            if y < 4 { Arithmetic } else { Logic },
            if z == 6 { 7 } else { 4 },
        ),
        _ => match z {
            0 => Instruction::new(op, RETURNS[y as usize], Operands::None, 1, Branch, 11).not_taken(5),
            1 => match y {
                0 | 2 | 4 | 6 => Instruction::new(op, "POP", Operands::StackPair(rp), 1, Stack, 10),
                1 => Instruction::new(op, "RET", Operands::None, 1, Branch, 10),
                3 => Instruction::alias(op, 0xC9),
                5 => Instruction::new(op, "PCHL", Operands::None, 1, Branch, 5),
                _ => Instruction::new(op, "SPHL", Operands::None, 1, Stack, 5),
            },
            2 => Instruction::new(op, JUMPS[y as usize], Operands::Addr, 3, Branch, 10).not_taken(7),
            3 => match y {
                0 => Instruction::new(op, "JMP", Operands::Addr, 3, Branch, 10),
                1 => Instruction::alias(op, 0xC3),
                2 => Instruction::new(op, "OUT", Operands::Imm8, 2, Io, 10),
                3 => Instruction::new(op, "IN", Operands::Imm8, 2, Io, 10),
                4 => Instruction::new(op, "XTHL", Operands::None, 1, Stack, 18),
                5 => Instruction::new(op, "XCHG", Operands::None, 1, DataMove, 4),
                6 => Instruction::new(op, "DI", Operands::None, 1, Control, 4),
                _ => Instruction::new(op, "EI", Operands::None, 1, Control, 4),
            },
            4 => Instruction::new(op, CALLS[y as usize], Operands::Addr, 3, Branch, 17).not_taken(11),
            5 => match y {
                0 | 2 | 4 | 6 => Instruction::new(op, "PUSH", Operands::StackPair(rp), 1, Stack, 11),
                1 => Instruction::new(op, "CALL", Operands::Addr, 3, Branch, 17),
                _ => Instruction::alias(op, 0xCD),
            },
            6 => Instruction::new(
                op,
                ALU_IMM[y as usize],
                Operands::Imm8,
                2,
                if y < 4 { Arithmetic } else { Logic },
                7,
            ),
            _ => Instruction::new(op, "RST", Operands::Vector(y), 1, Branch, 11),
        },
    }
}

const fn build_table() -> [Instruction; 256] {
    let mut table = [describe(0x00); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = describe(i as u8);
        i += 1;
    }
    table
}

static OPCODES: [Instruction; 256] = build_table();

/// Look up the descriptor of `opcode`.
#[inline]
pub fn decode(opcode: u8) -> &'static Instruction {
    &OPCODES[opcode as usize]
}
