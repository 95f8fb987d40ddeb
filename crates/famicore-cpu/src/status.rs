//! CPU status register (P).
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! ```
//!
//! B and U are not physical flags: U reads as 1 in every pushed copy, and
//! B distinguishes BRK/PHP pushes (1) from IRQ/NMI pushes (0). The 2A03
//! has no decimal circuitry but D is stored and pushed like any other bit.

use bitflags::bitflags;

bitflags! {
    /// Processor status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Carry.
        const C = 1 << 0;
        /// Zero.
        const Z = 1 << 1;
        /// Interrupt disable (masks IRQ, never NMI).
        const I = 1 << 2;
        /// Decimal mode (stored but ignored by ADC/SBC on the 2A03).
        const D = 1 << 3;
        /// Break (only meaningful in pushed copies).
        const B = 1 << 4;
        /// Unused, reads as 1 in pushed copies.
        const U = 1 << 5;
        /// Overflow.
        const V = 1 << 6;
        /// Negative.
        const N = 1 << 7;
    }
}

impl Status {
    /// Power-on/reset value: I and U set ($24).
    pub const POWER_ON: Self = Self::I.union(Self::U);

    /// Set Z and N from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Byte to push on the stack. U is always set; B is set for BRK/PHP
    /// pushes and clear for interrupt pushes.
    #[inline]
    #[must_use]
    pub const fn to_stack_byte(self, brk: bool) -> u8 {
        let mut bits = self.bits() | Self::U.bits();
        if brk {
            bits |= Self::B.bits();
        } else {
            bits &= !Self::B.bits();
        }
        bits
    }

    /// Restore from a byte pulled off the stack: B cleared, U forced set.
    #[inline]
    #[must_use]
    pub fn from_stack_byte(value: u8) -> Self {
        Self::from_bits_truncate((value & !Self::B.bits()) | Self::U.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_is_0x24() {
        assert_eq!(Status::POWER_ON.bits(), 0x24);
    }

    #[test]
    fn set_zn() {
        let mut p = Status::empty();
        p.set_zn(0);
        assert!(p.contains(Status::Z) && !p.contains(Status::N));
        p.set_zn(0x80);
        assert!(!p.contains(Status::Z) && p.contains(Status::N));
        p.set_zn(0x01);
        assert!(!p.contains(Status::Z) && !p.contains(Status::N));
    }

    #[test]
    fn stack_byte_sets_b_and_u() {
        let p = Status::C | Status::N;
        assert_eq!(p.to_stack_byte(true) & 0x30, 0x30);
        assert_eq!(p.to_stack_byte(false) & 0x30, 0x20);
    }

    #[test]
    fn from_stack_clears_b_keeps_u() {
        let p = Status::from_stack_byte(0xFF);
        assert!(!p.contains(Status::B));
        assert!(p.contains(Status::U));
        assert_eq!(p.bits(), 0xEF);
    }
}
