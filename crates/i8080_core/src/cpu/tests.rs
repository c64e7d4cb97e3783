use super::*;
use crate::opcodes::{decode, Category};

struct TestBus {
    memory: [u8; 0x10000],
    reads: usize,
    outputs: Vec<(u8, u8)>,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            reads: 0,
            outputs: Vec::new(),
        }
    }
}

impl TestBus {
    fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        bus.load(origin, program);
        bus
    }

    fn load(&mut self, origin: u16, bytes: &[u8]) {
        let start = origin as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

impl Bus8080 for TestBus {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.reads += 1;
        self.memory[addr as usize]
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn io_read(&mut self, port: u8) -> u8 {
        !port
    }

    fn io_write(&mut self, port: u8, value: u8) {
        self.outputs.push((port, value));
    }
}

fn run(cpu: &mut Cpu, bus: &mut TestBus, steps: usize) -> u32 {
    (0..steps).map(|_| cpu.step(bus)).sum()
}

#[test]
fn lxi_then_mov_loads_low_half_into_a() {
    let mut bus = TestBus::with_program(0, &[0x21, 0x34, 0x12, 0x7D]);
    let mut cpu = Cpu::new();

    assert_eq!(run(&mut cpu, &mut bus, 2), 15);
    assert_eq!(cpu.regs.a, 0x34);
    assert_eq!(cpu.regs.h(), 0x12);
    assert_eq!(cpu.regs.pc, 4);
}

#[test]
fn adi_ff_plus_one_sets_carry_zero_aux_parity() {
    // MVI A,FFh ; ADI 01h
    let mut bus = TestBus::with_program(0, &[0x3E, 0xFF, 0xC6, 0x01]);
    let mut cpu = Cpu::new();
    run(&mut cpu, &mut bus, 2);

    let f = cpu.regs.flags;
    assert_eq!(cpu.regs.a, 0x00);
    assert!(f.carry && f.zero && f.half_carry && f.parity);
    assert!(!f.sign);
}

#[test]
fn dad_with_carry_leaves_other_flags() {
    // DAD H with HL = 8000h overflows.
    let mut bus = TestBus::with_program(0, &[0x29]);
    let mut cpu = Cpu::new();
    cpu.regs.hl.set_whole(0x8000);
    cpu.regs.flags = Flags {
        carry: false,
        zero: true,
        sign: false,
        parity: true,
        half_carry: true,
    };

    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.regs.hl.whole(), 0x0000);
    assert_eq!(
        cpu.regs.flags,
        Flags {
            carry: true,
            zero: true,
            sign: false,
            parity: true,
            half_carry: true,
        }
    );
}

#[test]
fn call_and_ret_follow_stack_discipline() {
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0xCD, 0x00, 0x03]); // CALL 0300h
    bus.load(0x0300, &[0xC9]); // RET
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0100;
    cpu.regs.sp = 0x2000;

    assert_eq!(cpu.step(&mut bus), 17);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(cpu.regs.sp, 0x1FFE);
    assert_eq!(bus.memory[0x1FFE], 0x03);
    assert_eq!(bus.memory[0x1FFF], 0x01);

    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.regs.sp, 0x2000);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn conditional_jump_not_taken_is_cheaper() {
    let program = [0xC2, 0x00, 0x40]; // JNZ 4000h

    let mut bus = TestBus::with_program(0, &program);
    let mut taken = Cpu::new();
    let taken_cycles = taken.step(&mut bus);
    assert_eq!(taken.regs.pc, 0x4000);

    let mut bus = TestBus::with_program(0, &program);
    let mut not_taken = Cpu::new();
    not_taken.regs.flags.zero = true;
    let not_taken_cycles = not_taken.step(&mut bus);
    assert_eq!(not_taken.regs.pc, 0x0003);

    assert!(not_taken_cycles < taken_cycles);
    assert_eq!((taken_cycles, not_taken_cycles), (10, 7));
}

#[test]
fn conditional_call_and_return_timings() {
    // CC 0010h (not taken), STC, CC 0010h (taken) ... at 0010h: RNC (not taken), RC (taken)
    let mut bus = TestBus::with_program(0, &[0xDC, 0x10, 0x00, 0x37, 0xDC, 0x10, 0x00]);
    bus.load(0x0010, &[0xD0, 0xD8]);
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x1000;

    assert_eq!(cpu.step(&mut bus), 11);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.step(&mut bus), 17);
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.step(&mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x0011);
    assert_eq!(cpu.step(&mut bus), 11);
    assert_eq!(cpu.regs.pc, 0x0007);
    assert_eq!(cpu.regs.sp, 0x1000);
}

#[test]
fn conditions_cover_parity_and_sign() {
    // JPE / JM with the matching flag set jump, the complements fall through.
    let cases: [(u8, fn(&mut Flags), bool); 4] = [
        (0xEA, |f| f.parity = true, true),
        (0xE2, |f| f.parity = true, false),
        (0xFA, |f| f.sign = true, true),
        (0xF2, |f| f.sign = true, false),
    ];
    for (opcode, setup, jumps) in cases {
        let mut bus = TestBus::with_program(0, &[opcode, 0x34, 0x12]);
        let mut cpu = Cpu::new();
        setup(&mut cpu.regs.flags);
        cpu.step(&mut bus);
        let expected = if jumps { 0x1234 } else { 0x0003 };
        assert_eq!(cpu.regs.pc, expected, "opcode {opcode:02X}");
    }
}

#[test]
fn halt_parks_pc_until_interrupt() {
    // EI ; HLT
    let mut bus = TestBus::with_program(0, &[0xFB, 0x76]);
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x1000;

    run(&mut cpu, &mut bus, 2);
    assert!(cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0002);

    let reads = bus.reads;
    for _ in 0..10 {
        assert_eq!(cpu.step(&mut bus), HALT_IDLE_CYCLES);
        assert_eq!(cpu.regs.pc, 0x0002);
    }
    assert_eq!(bus.reads, reads, "halted CPU must not fetch");

    // RST 1 resumes at 0008h and returns to the instruction after HLT.
    assert_eq!(cpu.interrupt(&mut bus, crate::rst(1)), 11);
    assert!(!cpu.halted);
    assert!(!cpu.interrupt_enable);
    assert_eq!(cpu.regs.pc, 0x0008);
    assert_eq!(cpu.regs.sp, 0x0FFE);
    assert_eq!(bus.memory[0x0FFE], 0x02);
    assert_eq!(bus.memory[0x0FFF], 0x00);
}

#[test]
fn masked_interrupt_changes_nothing() {
    let mut bus = TestBus::with_program(0, &[0x76]);
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x1000;
    cpu.regs.a = 0x5A;
    cpu.step(&mut bus);
    assert!(cpu.halted);

    let before = cpu.clone();
    let memory_before = bus.memory;
    assert_eq!(cpu.interrupt(&mut bus, crate::rst(7)), 0);
    assert_eq!(cpu, before);
    assert_eq!(bus.memory, memory_before);
    assert_eq!(cpu.step(&mut bus), HALT_IDLE_CYCLES);
    assert!(cpu.halted);
}

#[test]
fn interrupt_runs_supplied_opcode_without_fetching_it() {
    let mut bus = TestBus::with_program(0x0200, &[0x00]);
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0x1000;
    cpu.interrupt_enable = true;

    // A plain INR A delivered as the interrupt instruction.
    assert_eq!(cpu.interrupt(&mut bus, 0x3C), 5);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert!(!cpu.interrupt_enable);

    // A second request is masked until software re-enables interrupts.
    assert_eq!(cpu.interrupt(&mut bus, 0x3C), 0);
    assert_eq!(cpu.regs.a, 1);
}

#[test]
fn interrupt_call_takes_operands_from_pc() {
    let mut bus = TestBus::with_program(0x0200, &[0x34, 0x12]);
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0x1000;
    cpu.interrupt_enable = true;

    // CALL 1234h on the data bus, address bytes still come from memory.
    assert_eq!(cpu.interrupt(&mut bus, 0xCD), 17);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.sp, 0x0FFE);
    assert_eq!(bus.memory[0x0FFE], 0x02);
    assert_eq!(bus.memory[0x0FFF], 0x02);
    assert!(!cpu.interrupt_enable);
}

#[test]
fn push_psw_writes_fixed_flag_bits() {
    // PUSH PSW ; POP B
    let mut bus = TestBus::with_program(0, &[0xF5, 0xC1]);
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x1000;
    cpu.regs.a = 0xA5;
    cpu.regs.flags = Flags {
        carry: true,
        zero: false,
        sign: true,
        parity: false,
        half_carry: true,
    };

    assert_eq!(cpu.step(&mut bus), 11);
    assert_eq!(bus.memory[0x0FFF], 0xA5);
    assert_eq!(bus.memory[0x0FFE], 0x93);
    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.regs.bc.whole(), 0xA593);
}

#[test]
fn pop_psw_ignores_fixed_bits() {
    let mut bus = TestBus::with_program(0, &[0xF1, 0xF5]);
    bus.load(0x1000, &[0x2A, 0x77]);
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x1000;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.regs.flags, Flags::default());
    assert_eq!(cpu.regs.sp, 0x1002);

    // Pushing it back shows bit 1 set and bits 3/5 clear.
    cpu.step(&mut bus);
    assert_eq!(bus.memory[0x1000], 0x02);
}

#[test]
fn compare_sets_flags_without_storing() {
    // MVI A,10h ; CPI 20h ; CMP A
    let mut bus = TestBus::with_program(0, &[0x3E, 0x10, 0xFE, 0x20, 0xBF]);
    let mut cpu = Cpu::new();
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.flags.carry);
    assert!(!cpu.regs.flags.zero);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.flags.zero);
    assert!(!cpu.regs.flags.carry);
}

#[test]
fn carry_and_accumulator_complements() {
    // MVI A,5Ah ; CMA ; STC ; CMC ; CMC
    let mut bus = TestBus::with_program(0, &[0x3E, 0x5A, 0x2F, 0x37, 0x3F, 0x3F]);
    let mut cpu = Cpu::new();
    cpu.step(&mut bus);
    let flags = cpu.regs.flags;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.a, 0xA5);
    assert_eq!(cpu.regs.flags, flags);

    cpu.step(&mut bus);
    assert!(cpu.regs.flags.carry);
    cpu.step(&mut bus);
    assert!(!cpu.regs.flags.carry);
    cpu.step(&mut bus);
    assert!(cpu.regs.flags.carry);
    assert_eq!(cpu.regs.flags.zero, flags.zero);
    assert_eq!(cpu.regs.flags.half_carry, flags.half_carry);
}

#[test]
fn daa_after_bcd_add() {
    // MVI A,15h ; ADI 27h ; DAA
    let mut bus = TestBus::with_program(0, &[0x3E, 0x15, 0xC6, 0x27, 0x27]);
    let mut cpu = Cpu::new();
    run(&mut cpu, &mut bus, 3);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.regs.flags.carry);
}

#[test]
fn memory_operands_go_through_hl() {
    // LXI H,2000h ; MVI M,7Fh ; INR M ; DCR M ; DCR M ; MOV B,M ; ADD M
    let mut bus = TestBus::with_program(
        0,
        &[0x21, 0x00, 0x20, 0x36, 0x7F, 0x34, 0x35, 0x35, 0x46, 0x86],
    );
    let mut cpu = Cpu::new();

    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(bus.memory[0x2000], 0x80);
    assert!(cpu.regs.flags.sign && cpu.regs.flags.half_carry);
    assert_eq!(run(&mut cpu, &mut bus, 2), 20);
    assert_eq!(bus.memory[0x2000], 0x7E);
    assert_eq!(cpu.step(&mut bus), 7);
    assert_eq!(cpu.regs.b(), 0x7E);
    assert_eq!(cpu.step(&mut bus), 7);
    assert_eq!(cpu.regs.a, 0x7E);
}

#[test]
fn hl_word_transfers_are_little_endian() {
    // LXI H,BEEFh ; SHLD 3000h ; LXI H,0 ; LHLD 3000h
    let mut bus = TestBus::with_program(
        0,
        &[0x21, 0xEF, 0xBE, 0x22, 0x00, 0x30, 0x21, 0x00, 0x00, 0x2A, 0x00, 0x30],
    );
    let mut cpu = Cpu::new();
    run(&mut cpu, &mut bus, 2);
    assert_eq!(bus.memory[0x3000], 0xEF);
    assert_eq!(bus.memory[0x3001], 0xBE);
    assert_eq!(run(&mut cpu, &mut bus, 2), 26);
    assert_eq!(cpu.regs.hl.whole(), 0xBEEF);
}

#[test]
fn exchange_instructions() {
    // XCHG ; XTHL ; SPHL ; PCHL
    let mut bus = TestBus::with_program(0, &[0xEB, 0xE3, 0xF9, 0xE9]);
    bus.load(0x1000, &[0x78, 0x56]);
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x1000;
    cpu.regs.de.set_whole(0x1111);
    cpu.regs.hl.set_whole(0x2222);

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.de.whole(), 0x2222);
    assert_eq!(cpu.regs.hl.whole(), 0x1111);

    assert_eq!(cpu.step(&mut bus), 18);
    assert_eq!(cpu.regs.hl.whole(), 0x5678);
    assert_eq!(bus.memory[0x1000], 0x11);
    assert_eq!(bus.memory[0x1001], 0x11);

    assert_eq!(cpu.step(&mut bus), 5);
    assert_eq!(cpu.regs.sp, 0x5678);
    assert_eq!(cpu.step(&mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x5678);
}

#[test]
fn io_instructions_use_immediate_port() {
    // IN 0Fh ; OUT 10h
    let mut bus = TestBus::with_program(0, &[0xDB, 0x0F, 0xD3, 0x10]);
    let mut cpu = Cpu::new();
    assert_eq!(run(&mut cpu, &mut bus, 2), 20);
    assert_eq!(cpu.regs.a, 0xF0);
    assert_eq!(bus.outputs, vec![(0x10, 0xF0)]);
}

#[test]
fn undocumented_opcodes_behave_like_their_twins() {
    let mut bus = TestBus::default();
    bus.load(0x0000, &[0x08, 0xCB, 0x00, 0x01]); // NOP* ; JMP* 0100h
    bus.load(0x0100, &[0xDD, 0x00, 0x02]); // CALL* 0200h
    bus.load(0x0200, &[0xED, 0x00, 0x03, 0xD9]); // CALL* 0300h ; RET*
    bus.load(0x0300, &[0xFD, 0x00, 0x04, 0xD9]); // CALL* 0400h ; RET*
    bus.load(0x0400, &[0xD9]); // RET*
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0x8000;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(run(&mut cpu, &mut bus, 3), 51);
    assert_eq!(cpu.regs.pc, 0x0400);
    assert_eq!(cpu.regs.sp, 0x8000 - 6);
    assert_eq!(run(&mut cpu, &mut bus, 2), 20);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.step(&mut bus), 10);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0x8000);
}

#[test]
fn pc_wraps_around_address_space() {
    let mut bus = TestBus::default();
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0xFFFF;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0000);

    // PUSH with SP = 0001h wraps below zero.
    bus.load(0, &[0xC5]);
    cpu.regs.sp = 0x0001;
    cpu.regs.bc.set_whole(0xABCD);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.sp, 0xFFFF);
    assert_eq!(bus.memory[0x0000], 0xAB);
    assert_eq!(bus.memory[0xFFFF], 0xCD);
}

#[test]
fn reset_clears_control_state_only() {
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0x4321;
    cpu.regs.bc.set_whole(0xBBCC);
    cpu.regs.flags.carry = true;
    cpu.interrupt_enable = true;
    cpu.halted = true;

    cpu.reset();
    assert_eq!(cpu.regs.pc, 0);
    assert_eq!(cpu.regs.flags, Flags::default());
    assert!(!cpu.interrupt_enable);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.sp, 0x4321);
    assert_eq!(cpu.regs.bc.whole(), 0xBBCC);
}

fn condition_holds(opcode: u8, flags: Flags) -> bool {
    match (opcode >> 3) & 0x07 {
        0 => !flags.zero,
        1 => flags.zero,
        2 => !flags.carry,
        3 => flags.carry,
        4 => !flags.parity,
        5 => flags.parity,
        6 => !flags.sign,
        _ => flags.sign,
    }
}

#[test]
fn every_opcode_matches_its_descriptor() {
    let all_clear = Flags::default();
    let all_set = Flags {
        carry: true,
        zero: true,
        sign: true,
        parity: true,
        half_carry: true,
    };

    for opcode in 0..=u8::MAX {
        for flags in [all_clear, all_set] {
            let insn = decode(opcode);
            let mut bus = TestBus::with_program(0x1000, &[opcode, 0x00, 0x20]);
            let mut cpu = Cpu::new();
            cpu.regs.pc = 0x1000;
            cpu.regs.sp = 0x3000;
            cpu.regs.hl.set_whole(0x4000);
            cpu.regs.flags = flags;

            let cycles = cpu.step(&mut bus);

            let expected = match insn.cycles_not_taken {
                Some(not_taken) if !condition_holds(opcode, flags) => not_taken,
                _ => insn.cycles,
            };
            assert_eq!(cycles, expected, "{opcode:02X} {insn}");

            if insn.category != Category::Branch {
                assert_eq!(
                    cpu.regs.pc,
                    0x1000 + u16::from(insn.length),
                    "{opcode:02X} {insn}"
                );
            }
            assert_eq!(cpu.halted, opcode == crate::HLT, "{opcode:02X} {insn}");
        }
    }
}
