use super::flags::Flags;

/// A 16-bit register pair that can also be addressed as two 8-bit halves.
///
/// Only the 16-bit value is stored; the halves are derived with shifts so the
/// result does not depend on host byte order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegPair(u16);

impl RegPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn from_halves(high: u8, low: u8) -> Self {
        Self(u16::from_be_bytes([high, low]))
    }

    #[inline]
    pub const fn whole(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_whole(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub fn set_high(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | (u16::from(value) << 8);
    }

    #[inline]
    pub fn set_low(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | u16::from(value);
    }
}

impl From<u16> for RegPair {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<RegPair> for u16 {
    fn from(pair: RegPair) -> Self {
        pair.0
    }
}

/// Programmer-visible 8080 registers.
///
/// B, D and H are the high halves of BC, DE and HL; C, E and L the low
/// halves. The accumulator is kept on its own because its partner F is not a
/// real register: it is packed on demand from [`Flags`] by PUSH PSW.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub flags: Flags,
    pub bc: RegPair,
    pub de: RegPair,
    pub hl: RegPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// The PSW pair: A in the high byte, the packed flags in the low byte.
    #[inline]
    pub fn af(&self) -> RegPair {
        RegPair::from_halves(self.a, self.flags.to_u8())
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let pair = RegPair::new(value);
        self.a = pair.high();
        self.flags = Flags::from_u8(pair.low());
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.bc.high()
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.bc.low()
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.de.high()
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.de.low()
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.hl.high()
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.hl.low()
    }

    /// Read one of the register pairs addressed by the `rp` field of
    /// LXI/INX/DCX/DAD (0 = BC, 1 = DE, 2 = HL, 3 = SP).
    pub(crate) fn rp(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.bc.whole(),
            1 => self.de.whole(),
            2 => self.hl.whole(),
            _ => self.sp,
        }
    }

    pub(crate) fn set_rp(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.bc.set_whole(value),
            1 => self.de.set_whole(value),
            2 => self.hl.set_whole(value),
            _ => self.sp = value,
        }
    }
}
