use bitflags::bitflags;

bitflags! {
    /// Bit layout of the packed flag byte pushed by PUSH PSW.
    ///
    /// ```text
    /// bit  7 6 5 4  3 2 1 0
    ///      S Z 0 AC 0 P 1 CY
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Psw: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const HALF_CARRY = 0x10;
        const PARITY = 0x04;
        /// Reads as one on every 8080.
        const ALWAYS_ONE = 0x02;
        const CARRY = 0x01;
    }
}

/// CPU flags for Intel 8080.
///
/// These five booleans are the only flag state the CPU keeps; the packed
/// byte is produced on demand by [`Flags::to_u8`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub carry: bool,
    pub zero: bool,
    pub sign: bool,
    pub parity: bool,
    /// Auxiliary carry: carry out of bit 3.
    pub half_carry: bool,
}

impl Flags {
    /// Pack the flags into a [`Psw`], including the fixed bit 1.
    pub fn to_psw(self) -> Psw {
        let mut psw = Psw::ALWAYS_ONE;
        psw.set(Psw::SIGN, self.sign);
        psw.set(Psw::ZERO, self.zero);
        psw.set(Psw::HALF_CARRY, self.half_carry);
        psw.set(Psw::PARITY, self.parity);
        psw.set(Psw::CARRY, self.carry);
        psw
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        self.to_psw().bits()
    }

    /// Unpack a flag byte. Bits 1, 3 and 5 are ignored.
    pub fn from_u8(value: u8) -> Self {
        let psw = Psw::from_bits_truncate(value);
        Self {
            carry: psw.contains(Psw::CARRY),
            zero: psw.contains(Psw::ZERO),
            sign: psw.contains(Psw::SIGN),
            parity: psw.contains(Psw::PARITY),
            half_carry: psw.contains(Psw::HALF_CARRY),
        }
    }

    /// Update zero, sign and parity from an 8-bit result.
    #[inline]
    pub(crate) fn set_szp(&mut self, value: u8) {
        self.zero = value == 0;
        self.sign = (value & 0x80) != 0;
        self.parity = value.count_ones() % 2 == 0;
    }
}
