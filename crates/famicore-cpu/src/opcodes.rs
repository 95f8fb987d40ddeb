//! The 256-entry opcode table.
//!
//! Cycle counts and page-cross penalty flags follow the 6502 reference as
//! validated by nestest. Illegal opcodes are flagged so the trace writer
//! can emit their `*` prefix.

use crate::addressing::AddrMode;
use crate::addressing::AddrMode::{
    Abs, Abx, Aby, Acc, Imm, Imp, Ind, Izx, Izy, Rel, Zpg, Zpx, Zpy,
};

/// Static decode information for one opcode.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Mnemonic, as it appears in a trace line.
    pub mnemonic: &'static str,
    /// Addressing mode.
    pub mode: AddrMode,
    /// Base cycle count.
    pub cycles: u8,
    /// Whether a page cross during operand resolution costs one cycle.
    pub page_penalty: bool,
    /// Whether this is an illegal opcode (`*` prefix in traces).
    pub illegal: bool,
}

const fn op(mnemonic: &'static str, mode: AddrMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
        illegal: false,
    }
}

/// Official opcode whose read can cross a page (+1 cycle).
const fn opp(mnemonic: &'static str, mode: AddrMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_penalty: true,
        illegal: false,
    }
}

const fn ill(mnemonic: &'static str, mode: AddrMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
        illegal: true,
    }
}

/// Illegal opcode with a page-cross penalty.
const fn illp(mnemonic: &'static str, mode: AddrMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_penalty: true,
        illegal: true,
    }
}

/// Complete decode table, indexed by opcode byte.
#[rustfmt::skip]
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00
    op("BRK", Imp, 7),  op("ORA", Izx, 6),  ill("JAM", Imp, 2), ill("SLO", Izx, 8),
    ill("NOP", Zpg, 3), op("ORA", Zpg, 3),  op("ASL", Zpg, 5),  ill("SLO", Zpg, 5),
    op("PHP", Imp, 3),  op("ORA", Imm, 2),  op("ASL", Acc, 2),  ill("ANC", Imm, 2),
    ill("NOP", Abs, 4), op("ORA", Abs, 4),  op("ASL", Abs, 6),  ill("SLO", Abs, 6),
    // 0x10
    op("BPL", Rel, 2),  opp("ORA", Izy, 5), ill("JAM", Imp, 2), ill("SLO", Izy, 8),
    ill("NOP", Zpx, 4), op("ORA", Zpx, 4),  op("ASL", Zpx, 6),  ill("SLO", Zpx, 6),
    op("CLC", Imp, 2),  opp("ORA", Aby, 4), ill("NOP", Imp, 2), ill("SLO", Aby, 7),
    illp("NOP", Abx, 4),opp("ORA", Abx, 4), op("ASL", Abx, 7),  ill("SLO", Abx, 7),
    // 0x20
    op("JSR", Abs, 6),  op("AND", Izx, 6),  ill("JAM", Imp, 2), ill("RLA", Izx, 8),
    op("BIT", Zpg, 3),  op("AND", Zpg, 3),  op("ROL", Zpg, 5),  ill("RLA", Zpg, 5),
    op("PLP", Imp, 4),  op("AND", Imm, 2),  op("ROL", Acc, 2),  ill("ANC", Imm, 2),
    op("BIT", Abs, 4),  op("AND", Abs, 4),  op("ROL", Abs, 6),  ill("RLA", Abs, 6),
    // 0x30
    op("BMI", Rel, 2),  opp("AND", Izy, 5), ill("JAM", Imp, 2), ill("RLA", Izy, 8),
    ill("NOP", Zpx, 4), op("AND", Zpx, 4),  op("ROL", Zpx, 6),  ill("RLA", Zpx, 6),
    op("SEC", Imp, 2),  opp("AND", Aby, 4), ill("NOP", Imp, 2), ill("RLA", Aby, 7),
    illp("NOP", Abx, 4),opp("AND", Abx, 4), op("ROL", Abx, 7),  ill("RLA", Abx, 7),
    // 0x40
    op("RTI", Imp, 6),  op("EOR", Izx, 6),  ill("JAM", Imp, 2), ill("SRE", Izx, 8),
    ill("NOP", Zpg, 3), op("EOR", Zpg, 3),  op("LSR", Zpg, 5),  ill("SRE", Zpg, 5),
    op("PHA", Imp, 3),  op("EOR", Imm, 2),  op("LSR", Acc, 2),  ill("ALR", Imm, 2),
    op("JMP", Abs, 3),  op("EOR", Abs, 4),  op("LSR", Abs, 6),  ill("SRE", Abs, 6),
    // 0x50
    op("BVC", Rel, 2),  opp("EOR", Izy, 5), ill("JAM", Imp, 2), ill("SRE", Izy, 8),
    ill("NOP", Zpx, 4), op("EOR", Zpx, 4),  op("LSR", Zpx, 6),  ill("SRE", Zpx, 6),
    op("CLI", Imp, 2),  opp("EOR", Aby, 4), ill("NOP", Imp, 2), ill("SRE", Aby, 7),
    illp("NOP", Abx, 4),opp("EOR", Abx, 4), op("LSR", Abx, 7),  ill("SRE", Abx, 7),
    // 0x60
    op("RTS", Imp, 6),  op("ADC", Izx, 6),  ill("JAM", Imp, 2), ill("RRA", Izx, 8),
    ill("NOP", Zpg, 3), op("ADC", Zpg, 3),  op("ROR", Zpg, 5),  ill("RRA", Zpg, 5),
    op("PLA", Imp, 4),  op("ADC", Imm, 2),  op("ROR", Acc, 2),  ill("ARR", Imm, 2),
    op("JMP", Ind, 5),  op("ADC", Abs, 4),  op("ROR", Abs, 6),  ill("RRA", Abs, 6),
    // 0x70
    op("BVS", Rel, 2),  opp("ADC", Izy, 5), ill("JAM", Imp, 2), ill("RRA", Izy, 8),
    ill("NOP", Zpx, 4), op("ADC", Zpx, 4),  op("ROR", Zpx, 6),  ill("RRA", Zpx, 6),
    op("SEI", Imp, 2),  opp("ADC", Aby, 4), ill("NOP", Imp, 2), ill("RRA", Aby, 7),
    illp("NOP", Abx, 4),opp("ADC", Abx, 4), op("ROR", Abx, 7),  ill("RRA", Abx, 7),
    // 0x80
    ill("NOP", Imm, 2), op("STA", Izx, 6),  ill("NOP", Imm, 2), ill("SAX", Izx, 6),
    op("STY", Zpg, 3),  op("STA", Zpg, 3),  op("STX", Zpg, 3),  ill("SAX", Zpg, 3),
    op("DEY", Imp, 2),  ill("NOP", Imm, 2), op("TXA", Imp, 2),  ill("XAA", Imm, 2),
    op("STY", Abs, 4),  op("STA", Abs, 4),  op("STX", Abs, 4),  ill("SAX", Abs, 4),
    // 0x90
    op("BCC", Rel, 2),  op("STA", Izy, 6),  ill("JAM", Imp, 2), ill("SHA", Izy, 6),
    op("STY", Zpx, 4),  op("STA", Zpx, 4),  op("STX", Zpy, 4),  ill("SAX", Zpy, 4),
    op("TYA", Imp, 2),  op("STA", Aby, 5),  op("TXS", Imp, 2),  ill("TAS", Aby, 5),
    ill("SHY", Abx, 5), op("STA", Abx, 5),  ill("SHX", Aby, 5), ill("SHA", Aby, 5),
    // 0xA0
    op("LDY", Imm, 2),  op("LDA", Izx, 6),  op("LDX", Imm, 2),  ill("LAX", Izx, 6),
    op("LDY", Zpg, 3),  op("LDA", Zpg, 3),  op("LDX", Zpg, 3),  ill("LAX", Zpg, 3),
    op("TAY", Imp, 2),  op("LDA", Imm, 2),  op("TAX", Imp, 2),  ill("LXA", Imm, 2),
    op("LDY", Abs, 4),  op("LDA", Abs, 4),  op("LDX", Abs, 4),  ill("LAX", Abs, 4),
    // 0xB0
    op("BCS", Rel, 2),  opp("LDA", Izy, 5), ill("JAM", Imp, 2), illp("LAX", Izy, 5),
    op("LDY", Zpx, 4),  op("LDA", Zpx, 4),  op("LDX", Zpy, 4),  ill("LAX", Zpy, 4),
    op("CLV", Imp, 2),  opp("LDA", Aby, 4), op("TSX", Imp, 2),  illp("LAS", Aby, 4),
    opp("LDY", Abx, 4), opp("LDA", Abx, 4), opp("LDX", Aby, 4), illp("LAX", Aby, 4),
    // 0xC0
    op("CPY", Imm, 2),  op("CMP", Izx, 6),  ill("NOP", Imm, 2), ill("DCP", Izx, 8),
    op("CPY", Zpg, 3),  op("CMP", Zpg, 3),  op("DEC", Zpg, 5),  ill("DCP", Zpg, 5),
    op("INY", Imp, 2),  op("CMP", Imm, 2),  op("DEX", Imp, 2),  ill("AXS", Imm, 2),
    op("CPY", Abs, 4),  op("CMP", Abs, 4),  op("DEC", Abs, 6),  ill("DCP", Abs, 6),
    // 0xD0
    op("BNE", Rel, 2),  opp("CMP", Izy, 5), ill("JAM", Imp, 2), ill("DCP", Izy, 8),
    ill("NOP", Zpx, 4), op("CMP", Zpx, 4),  op("DEC", Zpx, 6),  ill("DCP", Zpx, 6),
    op("CLD", Imp, 2),  opp("CMP", Aby, 4), ill("NOP", Imp, 2), ill("DCP", Aby, 7),
    illp("NOP", Abx, 4),opp("CMP", Abx, 4), op("DEC", Abx, 7),  ill("DCP", Abx, 7),
    // 0xE0
    op("CPX", Imm, 2),  op("SBC", Izx, 6),  ill("NOP", Imm, 2), ill("ISB", Izx, 8),
    op("CPX", Zpg, 3),  op("SBC", Zpg, 3),  op("INC", Zpg, 5),  ill("ISB", Zpg, 5),
    op("INX", Imp, 2),  op("SBC", Imm, 2),  op("NOP", Imp, 2),  ill("SBC", Imm, 2),
    op("CPX", Abs, 4),  op("SBC", Abs, 4),  op("INC", Abs, 6),  ill("ISB", Abs, 6),
    // 0xF0
    op("BEQ", Rel, 2),  opp("SBC", Izy, 5), ill("JAM", Imp, 2), ill("ISB", Izy, 8),
    ill("NOP", Zpx, 4), op("SBC", Zpx, 4),  op("INC", Zpx, 6),  ill("ISB", Zpx, 6),
    op("SED", Imp, 2),  opp("SBC", Aby, 4), ill("NOP", Imp, 2), ill("ISB", Aby, 7),
    illp("NOP", Abx, 4),opp("SBC", Abx, 4), op("INC", Abx, 7),  ill("ISB", Abx, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_spot_checks() {
        assert_eq!(OPCODE_TABLE[0x00].mnemonic, "BRK");
        assert_eq!(OPCODE_TABLE[0x00].cycles, 7);
        assert_eq!(OPCODE_TABLE[0xA9].mnemonic, "LDA");
        assert_eq!(OPCODE_TABLE[0xA9].mode, AddrMode::Imm);
        assert_eq!(OPCODE_TABLE[0x6C].mode, AddrMode::Ind);
        assert_eq!(OPCODE_TABLE[0x6C].cycles, 5);
    }

    #[test]
    fn illegal_flags() {
        assert!(OPCODE_TABLE[0xA3].illegal); // LAX (zp,X)
        assert!(OPCODE_TABLE[0xEB].illegal); // SBC #imm alias
        assert!(!OPCODE_TABLE[0xE9].illegal);
        assert!(OPCODE_TABLE[0x1A].illegal); // NOP implied variant
        assert!(!OPCODE_TABLE[0xEA].illegal);
    }

    #[test]
    fn page_penalty_only_on_reads() {
        assert!(OPCODE_TABLE[0xBD].page_penalty); // LDA abs,X
        assert!(OPCODE_TABLE[0xB1].page_penalty); // LDA (zp),Y
        assert!(!OPCODE_TABLE[0x9D].page_penalty); // STA abs,X
        assert!(!OPCODE_TABLE[0xDE].page_penalty); // DEC abs,X (RMW, fixed 7)
        assert!(!OPCODE_TABLE[0xD3].page_penalty); // DCP (zp),Y (RMW, fixed 8)
    }

    #[test]
    fn rmw_illegal_cycle_counts() {
        assert_eq!(OPCODE_TABLE[0x03].cycles, 8); // SLO (zp,X)
        assert_eq!(OPCODE_TABLE[0x13].cycles, 8); // SLO (zp),Y
        assert_eq!(OPCODE_TABLE[0x1B].cycles, 7); // SLO abs,Y
        assert_eq!(OPCODE_TABLE[0x1F].cycles, 7); // SLO abs,X
    }
}
