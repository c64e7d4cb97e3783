//! Flag-exact 8080 arithmetic.
//!
//! Every function is pure: it takes the operands (and, where some flags are
//! left untouched, the current [`Flags`]) and returns the result together
//! with the new flags. The execution engine decides where the result goes.

use super::flags::Flags;

/// `a + value + carry_in` (ADD, ADC, ADI, ACI).
pub fn add(a: u8, value: u8, carry_in: bool) -> (u8, Flags) {
    let carry = u8::from(carry_in);
    let wide = u16::from(a) + u16::from(value) + u16::from(carry);
    let result = wide as u8;

    let mut flags = Flags {
        carry: wide > 0xFF,
        half_carry: (a & 0x0F) + (value & 0x0F) + carry > 0x0F,
        ..Flags::default()
    };
    flags.set_szp(result);
    (result, flags)
}

/// `a - value - borrow_in` (SUB, SBB, SUI, SBI, CMP, CPI).
///
/// The 8080 subtracts by adding the one's complement with an inverted carry
/// in, so AC is the carry out of bit 3 of that addition: it is set when the
/// low nibble did *not* borrow.
pub fn sub(a: u8, value: u8, borrow_in: bool) -> (u8, Flags) {
    let borrow = u8::from(borrow_in);
    let result = a.wrapping_sub(value).wrapping_sub(borrow);

    let mut flags = Flags {
        carry: u16::from(a) < u16::from(value) + u16::from(borrow),
        half_carry: (a & 0x0F) + (!value & 0x0F) + (1 - borrow) > 0x0F,
        ..Flags::default()
    };
    flags.set_szp(result);
    (result, flags)
}

/// ANA/ANI. CY is cleared; AC takes bit 3 of `a | value`, which is what the
/// 8080's AND gate array leaves on the auxiliary carry line.
pub fn and(a: u8, value: u8) -> (u8, Flags) {
    let result = a & value;
    let mut flags = Flags {
        half_carry: ((a | value) & 0x08) != 0,
        ..Flags::default()
    };
    flags.set_szp(result);
    (result, flags)
}

/// XRA/XRI. CY and AC are cleared.
pub fn xor(a: u8, value: u8) -> (u8, Flags) {
    let result = a ^ value;
    let mut flags = Flags::default();
    flags.set_szp(result);
    (result, flags)
}

/// ORA/ORI. CY and AC are cleared.
pub fn or(a: u8, value: u8) -> (u8, Flags) {
    let result = a | value;
    let mut flags = Flags::default();
    flags.set_szp(result);
    (result, flags)
}

/// INR. Carry is not affected.
pub fn inr(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    let mut flags = Flags {
        half_carry: (value & 0x0F) == 0x0F,
        ..flags
    };
    flags.set_szp(result);
    (result, flags)
}

/// DCR. Carry is not affected.
///
/// Decrement is an addition of 0xFF, so AC is set unless the low nibble
/// wrapped from 0 to F.
pub fn dcr(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    let mut flags = Flags {
        half_carry: (result & 0x0F) != 0x0F,
        ..flags
    };
    flags.set_szp(result);
    (result, flags)
}

/// DAD: 16-bit add into HL. Only carry changes.
pub fn dad(hl: u16, value: u16, flags: Flags) -> (u16, Flags) {
    let (result, carry) = hl.overflowing_add(value);
    (result, Flags { carry, ..flags })
}

/// DAA: decimal adjust the accumulator after a BCD addition.
pub fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let low = a & 0x0F;
    let high = a >> 4;
    let mut correction = 0u8;
    let mut carry = flags.carry;

    if low > 9 || flags.half_carry {
        correction |= 0x06;
    }
    if high > 9 || flags.carry || (high >= 9 && low > 9) {
        correction |= 0x60;
        carry = true;
    }

    let (result, adjusted) = add(a, correction, false);
    (result, Flags { carry, ..adjusted })
}

/// RLC: rotate left, bit 7 into both bit 0 and CY.
pub fn rlc(a: u8, flags: Flags) -> (u8, Flags) {
    (
        a.rotate_left(1),
        Flags {
            carry: (a & 0x80) != 0,
            ..flags
        },
    )
}

/// RRC: rotate right, bit 0 into both bit 7 and CY.
pub fn rrc(a: u8, flags: Flags) -> (u8, Flags) {
    (
        a.rotate_right(1),
        Flags {
            carry: (a & 0x01) != 0,
            ..flags
        },
    )
}

/// RAL: rotate left through carry.
pub fn ral(a: u8, flags: Flags) -> (u8, Flags) {
    (
        (a << 1) | u8::from(flags.carry),
        Flags {
            carry: (a & 0x80) != 0,
            ..flags
        },
    )
}

/// RAR: rotate right through carry.
pub fn rar(a: u8, flags: Flags) -> (u8, Flags) {
    (
        (a >> 1) | (u8::from(flags.carry) << 7),
        Flags {
            carry: (a & 0x01) != 0,
            ..flags
        },
    )
}
