use super::{Bus8080, Cpu};

impl Cpu {
    #[inline]
    pub(super) fn fetch8<B: Bus8080>(&mut self, bus: &mut B) -> u8 {
        let value = bus.mem_read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a little-endian immediate word.
    #[inline]
    pub(super) fn fetch16<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn read16<B: Bus8080>(&mut self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.mem_read(addr);
        let hi = bus.mem_read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn write16<B: Bus8080>(&mut self, bus: &mut B, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        bus.mem_write(addr, lo);
        bus.mem_write(addr.wrapping_add(1), hi);
    }

    /// Push a word: high byte at SP-1, low byte at SP-2.
    pub(super) fn push16<B: Bus8080>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.mem_write(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.mem_write(self.regs.sp, lo);
    }

    pub(super) fn pop16<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let value = self.read16(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Read an 8-bit operand addressed by the 3-bit register field
    /// (B, C, D, E, H, L, M, A). Index 6 reads memory at HL.
    pub(super) fn read_reg8<B: Bus8080>(&mut self, bus: &mut B, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.bc.high(),
            1 => self.regs.bc.low(),
            2 => self.regs.de.high(),
            3 => self.regs.de.low(),
            4 => self.regs.hl.high(),
            5 => self.regs.hl.low(),
            6 => bus.mem_read(self.regs.hl.whole()),
            _ => self.regs.a,
        }
    }

    pub(super) fn write_reg8<B: Bus8080>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.bc.set_high(value),
            1 => self.regs.bc.set_low(value),
            2 => self.regs.de.set_high(value),
            3 => self.regs.de.set_low(value),
            4 => self.regs.hl.set_high(value),
            5 => self.regs.hl.set_low(value),
            6 => bus.mem_write(self.regs.hl.whole(), value),
            _ => self.regs.a = value,
        }
    }

    /// Evaluate the 3-bit condition field of Jcc/Ccc/Rcc:
    /// NZ, Z, NC, C, PO, PE, P, M.
    #[inline]
    pub(super) fn condition(&self, cc: u8) -> bool {
        let flags = self.regs.flags;
        match cc & 0x07 {
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
}
