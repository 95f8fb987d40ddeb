//! 6502 addressing modes.

/// Addressing modes.
///
/// The zero-page indexed modes wrap within the zero page; `Ind` is only
/// used by JMP and carries the page-wrap bug; `Imm` resolves to the PC of
/// the operand byte itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// No operand.
    Imp,
    /// Operates on the accumulator.
    Acc,
    /// 8-bit constant.
    Imm,
    /// Zero-page address.
    Zpg,
    /// Zero page + X, wrapping within the page.
    Zpx,
    /// Zero page + Y, wrapping within the page.
    Zpy,
    /// 16-bit address.
    Abs,
    /// Absolute + X.
    Abx,
    /// Absolute + Y.
    Aby,
    /// JMP (addr), with the $xxFF page-wrap bug.
    Ind,
    /// (zp + X) pointer.
    Izx,
    /// (zp) pointer + Y.
    Izy,
    /// Signed 8-bit branch offset.
    Rel,
}

impl AddrMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_bytes(self) -> u16 {
        match self {
            Self::Imp | Self::Acc => 0,
            Self::Imm | Self::Zpg | Self::Zpx | Self::Zpy | Self::Izx | Self::Izy | Self::Rel => 1,
            Self::Abs | Self::Abx | Self::Aby | Self::Ind => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_bytes() {
        assert_eq!(AddrMode::Imp.operand_bytes(), 0);
        assert_eq!(AddrMode::Acc.operand_bytes(), 0);
        assert_eq!(AddrMode::Imm.operand_bytes(), 1);
        assert_eq!(AddrMode::Izy.operand_bytes(), 1);
        assert_eq!(AddrMode::Abs.operand_bytes(), 2);
        assert_eq!(AddrMode::Ind.operand_bytes(), 2);
    }
}
