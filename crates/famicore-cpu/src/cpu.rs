//! 6502 CPU core: registers, interrupt sequencing, instruction execution.

use crate::addressing::AddrMode;
use crate::bus::CpuBus;
use crate::opcodes::OPCODE_TABLE;
use crate::status::Status;
use crate::vectors;

/// The 2A03's 6502 core.
///
/// Registers are public for trace formatting and test harnesses; all
/// behavior goes through [`Cpu::step`].
#[derive(Debug, Clone)]
pub struct Cpu {
    /// Accumulator.
    pub a: u8,
    /// X index.
    pub x: u8,
    /// Y index.
    pub y: u8,
    /// Stack pointer, next free slot in $0100-$01FF.
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Status flags.
    pub status: Status,
    /// Total cycles executed since reset.
    pub cycles: u64,

    nmi_pending: bool,
    irq_pending: bool,
}

impl Cpu {
    /// Create a CPU in an undefined pre-reset state.
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: Status::POWER_ON,
            cycles: 0,
            nmi_pending: false,
            irq_pending: false,
        }
    }

    /// Reset: PC from the reset vector, S=$FD, P=$24, 7 cycles elapsed.
    pub fn reset(&mut self, bus: &mut impl CpuBus) {
        self.pc = bus.read_u16(vectors::RESET);
        self.sp = 0xFD;
        self.status = Status::POWER_ON;
        self.cycles = 7;
        self.nmi_pending = false;
        self.irq_pending = false;
    }

    /// Latch an NMI; it is taken at the next [`Cpu::step`] boundary.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Latch an IRQ unless the I flag masks it at this moment.
    pub fn irq(&mut self) {
        if !self.status.contains(Status::I) {
            self.irq_pending = true;
        }
    }

    /// Execute one instruction (or take a pending interrupt) and return
    /// the cycles consumed.
    pub fn step(&mut self, bus: &mut impl CpuBus) -> u8 {
        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(bus, vectors::NMI);
            return 7;
        }
        if self.irq_pending {
            self.irq_pending = false;
            self.interrupt(bus, vectors::IRQ);
            return 7;
        }

        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);

        let info = &OPCODE_TABLE[opcode as usize];
        let (addr, crossed) = self.resolve(info.mode, bus);
        let branch_cycles = self.execute(opcode, addr, crossed, bus);

        let mut cycles = info.cycles + branch_cycles;
        if info.page_penalty && crossed {
            cycles += 1;
        }
        self.cycles += u64::from(cycles);
        cycles
    }

    /// Interrupt entry: push PC and status (B clear), set I, load vector.
    fn interrupt(&mut self, bus: &mut impl CpuBus, vector: u16) {
        self.push16(bus, self.pc);
        self.push8(bus, self.status.to_stack_byte(false));
        self.status.insert(Status::I);
        self.pc = bus.read_u16(vector);
        self.cycles += 7;
    }

    // ===== stack =====

    fn push8(&mut self, bus: &mut impl CpuBus, val: u8) {
        bus.write(0x0100 | u16::from(self.sp), val);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop8(&mut self, bus: &mut impl CpuBus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | u16::from(self.sp))
    }

    fn push16(&mut self, bus: &mut impl CpuBus, val: u16) {
        self.push8(bus, (val >> 8) as u8);
        self.push8(bus, (val & 0xFF) as u8);
    }

    fn pop16(&mut self, bus: &mut impl CpuBus) -> u16 {
        let lo = u16::from(self.pop8(bus));
        let hi = u16::from(self.pop8(bus));
        hi << 8 | lo
    }

    // ===== operand resolution =====

    /// Resolve the operand address for a mode, advancing PC past the
    /// operand bytes. Returns the address and a page-crossed flag.
    fn resolve(&mut self, mode: AddrMode, bus: &mut impl CpuBus) -> (u16, bool) {
        match mode {
            AddrMode::Imp | AddrMode::Acc => (0, false),
            AddrMode::Imm => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            AddrMode::Zpg => {
                let addr = u16::from(bus.read(self.pc));
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            AddrMode::Zpx => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (u16::from(base.wrapping_add(self.x)), false)
            }
            AddrMode::Zpy => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (u16::from(base.wrapping_add(self.y)), false)
            }
            AddrMode::Abs => {
                let addr = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                (addr, false)
            }
            AddrMode::Abx => {
                let base = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = base.wrapping_add(u16::from(self.x));
                (addr, (base ^ addr) & 0xFF00 != 0)
            }
            AddrMode::Aby => {
                let base = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, (base ^ addr) & 0xFF00 != 0)
            }
            AddrMode::Ind => {
                let ptr = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                (bus.read_u16_bug(ptr), false)
            }
            AddrMode::Izx => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (bus.read_u16_zp(base.wrapping_add(self.x)), false)
            }
            AddrMode::Izy => {
                let ptr = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let base = bus.read_u16_zp(ptr);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, (base ^ addr) & 0xFF00 != 0)
            }
            AddrMode::Rel => {
                let offset = bus.read(self.pc) as i8;
                self.pc = self.pc.wrapping_add(1);
                let target = self.pc.wrapping_add(offset as u16);
                (target, (self.pc ^ target) & 0xFF00 != 0)
            }
        }
    }

    // ===== execution =====

    /// Dispatch one resolved instruction. Returns extra cycles (branches
    /// only: +1 taken, +1 more on page cross).
    #[allow(clippy::too_many_lines)]
    fn execute(&mut self, opcode: u8, addr: u16, crossed: bool, bus: &mut impl CpuBus) -> u8 {
        match opcode {
            // ===== loads =====
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => {
                self.a = bus.read(addr);
                self.status.set_zn(self.a);
            }
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => {
                self.x = bus.read(addr);
                self.status.set_zn(self.x);
            }
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => {
                self.y = bus.read(addr);
                self.status.set_zn(self.y);
            }
            // LAX: A and X together
            0xA7 | 0xB7 | 0xAF | 0xBF | 0xA3 | 0xB3 => {
                let v = bus.read(addr);
                self.a = v;
                self.x = v;
                self.status.set_zn(v);
            }

            // ===== stores =====
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => bus.write(addr, self.a),
            0x86 | 0x96 | 0x8E => bus.write(addr, self.x),
            0x84 | 0x94 | 0x8C => bus.write(addr, self.y),
            0x87 | 0x97 | 0x8F | 0x83 => bus.write(addr, self.a & self.x),

            // ===== transfers =====
            0xAA => {
                self.x = self.a;
                self.status.set_zn(self.x);
            }
            0xA8 => {
                self.y = self.a;
                self.status.set_zn(self.y);
            }
            0x8A => {
                self.a = self.x;
                self.status.set_zn(self.a);
            }
            0x98 => {
                self.a = self.y;
                self.status.set_zn(self.a);
            }
            0xBA => {
                self.x = self.sp;
                self.status.set_zn(self.x);
            }
            0x9A => self.sp = self.x,

            // ===== arithmetic =====
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => {
                let v = bus.read(addr);
                self.do_adc(v);
            }
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 | 0xEB => {
                let v = bus.read(addr);
                self.do_adc(!v);
            }
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => {
                let v = bus.read(addr);
                self.do_compare(self.a, v);
            }
            0xE0 | 0xE4 | 0xEC => {
                let v = bus.read(addr);
                self.do_compare(self.x, v);
            }
            0xC0 | 0xC4 | 0xCC => {
                let v = bus.read(addr);
                self.do_compare(self.y, v);
            }

            // ===== logic =====
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => {
                self.a &= bus.read(addr);
                self.status.set_zn(self.a);
            }
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => {
                self.a |= bus.read(addr);
                self.status.set_zn(self.a);
            }
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => {
                self.a ^= bus.read(addr);
                self.status.set_zn(self.a);
            }
            0x24 | 0x2C => {
                let v = bus.read(addr);
                self.status.set(Status::Z, self.a & v == 0);
                self.status.set(Status::V, v & 0x40 != 0);
                self.status.set(Status::N, v & 0x80 != 0);
            }

            // ===== shifts/rotates =====
            0x0A => self.a = self.do_asl(self.a),
            0x4A => self.a = self.do_lsr(self.a),
            0x2A => self.a = self.do_rol(self.a),
            0x6A => self.a = self.do_ror(self.a),
            0x06 | 0x16 | 0x0E | 0x1E => self.rmw(bus, addr, Self::do_asl),
            0x46 | 0x56 | 0x4E | 0x5E => self.rmw(bus, addr, Self::do_lsr),
            0x26 | 0x36 | 0x2E | 0x3E => self.rmw(bus, addr, Self::do_rol),
            0x66 | 0x76 | 0x6E | 0x7E => self.rmw(bus, addr, Self::do_ror),

            // ===== increments/decrements =====
            0xE6 | 0xF6 | 0xEE | 0xFE => self.rmw(bus, addr, |cpu, v| {
                let r = v.wrapping_add(1);
                cpu.status.set_zn(r);
                r
            }),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.rmw(bus, addr, |cpu, v| {
                let r = v.wrapping_sub(1);
                cpu.status.set_zn(r);
                r
            }),
            0xE8 => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
            }
            0xC8 => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
            }
            0xCA => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
            }
            0x88 => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
            }

            // ===== illegal read-modify-write combos =====
            // SLO: ASL then ORA
            0x07 | 0x17 | 0x0F | 0x1F | 0x1B | 0x03 | 0x13 => self.rmw(bus, addr, |cpu, v| {
                let r = cpu.do_asl(v);
                cpu.a |= r;
                cpu.status.set_zn(cpu.a);
                r
            }),
            // RLA: ROL then AND
            0x27 | 0x37 | 0x2F | 0x3F | 0x3B | 0x23 | 0x33 => self.rmw(bus, addr, |cpu, v| {
                let r = cpu.do_rol(v);
                cpu.a &= r;
                cpu.status.set_zn(cpu.a);
                r
            }),
            // SRE: LSR then EOR
            0x47 | 0x57 | 0x4F | 0x5F | 0x5B | 0x43 | 0x53 => self.rmw(bus, addr, |cpu, v| {
                let r = cpu.do_lsr(v);
                cpu.a ^= r;
                cpu.status.set_zn(cpu.a);
                r
            }),
            // RRA: ROR then ADC
            0x67 | 0x77 | 0x6F | 0x7F | 0x7B | 0x63 | 0x73 => self.rmw(bus, addr, |cpu, v| {
                let r = cpu.do_ror(v);
                cpu.do_adc(r);
                r
            }),
            // DCP: DEC then CMP
            0xC7 | 0xD7 | 0xCF | 0xDF | 0xDB | 0xC3 | 0xD3 => self.rmw(bus, addr, |cpu, v| {
                let r = v.wrapping_sub(1);
                cpu.do_compare(cpu.a, r);
                r
            }),
            // ISB: INC then SBC
            0xE7 | 0xF7 | 0xEF | 0xFF | 0xFB | 0xE3 | 0xF3 => self.rmw(bus, addr, |cpu, v| {
                let r = v.wrapping_add(1);
                cpu.do_adc(!r);
                r
            }),

            // ===== illegal immediate combos =====
            0x0B | 0x2B => {
                // ANC: AND, then copy N into C
                self.a &= bus.read(addr);
                self.status.set_zn(self.a);
                self.status.set(Status::C, self.a & 0x80 != 0);
            }
            0x4B => {
                // ALR: AND then LSR A
                self.a &= bus.read(addr);
                self.a = self.do_lsr(self.a);
            }
            0x6B => {
                // ARR: AND then ROR A, C from bit 6, V from bit 5 xor bit 6
                self.a &= bus.read(addr);
                let carry_in = u8::from(self.status.contains(Status::C));
                self.a = (self.a >> 1) | (carry_in << 7);
                self.status.set_zn(self.a);
                self.status.set(Status::C, self.a & 0x40 != 0);
                self.status
                    .set(Status::V, ((self.a >> 6) ^ (self.a >> 5)) & 1 != 0);
            }
            0xCB => {
                // AXS: X <- (A & X) - imm, carry like a compare
                let v = bus.read(addr);
                let operand = self.a & self.x;
                self.status.set(Status::C, operand >= v);
                self.x = operand.wrapping_sub(v);
                self.status.set_zn(self.x);
            }

            // ===== stack/status =====
            0x48 => self.push8(bus, self.a),
            0x68 => {
                self.a = self.pop8(bus);
                self.status.set_zn(self.a);
            }
            0x08 => {
                let p = self.status.to_stack_byte(true);
                self.push8(bus, p);
            }
            0x28 => {
                let p = self.pop8(bus);
                self.status = Status::from_stack_byte(p);
            }

            // ===== flow control =====
            0x4C | 0x6C => self.pc = addr,
            0x20 => {
                let ret = self.pc.wrapping_sub(1);
                self.push16(bus, ret);
                self.pc = addr;
            }
            0x60 => {
                self.pc = self.pop16(bus).wrapping_add(1);
            }
            0x40 => {
                let p = self.pop8(bus);
                self.status = Status::from_stack_byte(p);
                self.pc = self.pop16(bus);
            }
            0x00 => {
                // BRK: padding byte, push with B set, take the IRQ vector
                let ret = self.pc.wrapping_add(1);
                self.push16(bus, ret);
                self.push8(bus, self.status.to_stack_byte(true));
                self.status.insert(Status::I);
                self.pc = bus.read_u16(vectors::IRQ);
            }

            // ===== branches =====
            0x10 => return self.branch(!self.status.contains(Status::N), addr, crossed),
            0x30 => return self.branch(self.status.contains(Status::N), addr, crossed),
            0x50 => return self.branch(!self.status.contains(Status::V), addr, crossed),
            0x70 => return self.branch(self.status.contains(Status::V), addr, crossed),
            0x90 => return self.branch(!self.status.contains(Status::C), addr, crossed),
            0xB0 => return self.branch(self.status.contains(Status::C), addr, crossed),
            0xD0 => return self.branch(!self.status.contains(Status::Z), addr, crossed),
            0xF0 => return self.branch(self.status.contains(Status::Z), addr, crossed),

            // ===== flags =====
            0x18 => self.status.remove(Status::C),
            0x38 => self.status.insert(Status::C),
            0x58 => self.status.remove(Status::I),
            0x78 => self.status.insert(Status::I),
            0xB8 => self.status.remove(Status::V),
            0xD8 => self.status.remove(Status::D),
            0xF8 => self.status.insert(Status::D),

            // ===== NOPs with a memory operand =====
            0x04 | 0x44 | 0x64 | 0x0C | 0x14 | 0x34 | 0x54 | 0x74 | 0xD4 | 0xF4 | 0x1C | 0x3C
            | 0x5C | 0x7C | 0xDC | 0xFC | 0x80 | 0x82 | 0x89 | 0xC2 | 0xE2 | 0xBB => {
                let _ = bus.read(addr);
            }

            // NOP (official and implied variants), plus the remaining
            // unstable opcodes which are permitted to behave as NOPs
            _ => {}
        }
        0
    }

    fn branch(&mut self, condition: bool, target: u16, crossed: bool) -> u8 {
        if condition {
            self.pc = target;
            1 + u8::from(crossed)
        } else {
            0
        }
    }

    /// Read-modify-write: write the unchanged value back, then the result.
    fn rmw(&mut self, bus: &mut impl CpuBus, addr: u16, f: impl Fn(&mut Self, u8) -> u8) {
        let old = bus.read(addr);
        bus.write(addr, old);
        let new = f(self, old);
        bus.write(addr, new);
    }

    fn do_adc(&mut self, operand: u8) {
        let carry = u16::from(self.status.contains(Status::C));
        let sum = u16::from(self.a) + u16::from(operand) + carry;
        let result = sum as u8;
        self.status.set(Status::C, sum > 0xFF);
        self.status
            .set(Status::V, (!(self.a ^ operand) & (self.a ^ result)) & 0x80 != 0);
        self.a = result;
        self.status.set_zn(result);
    }

    fn do_compare(&mut self, register: u8, operand: u8) {
        self.status.set(Status::C, register >= operand);
        self.status.set_zn(register.wrapping_sub(operand));
    }

    fn do_asl(&mut self, val: u8) -> u8 {
        self.status.set(Status::C, val & 0x80 != 0);
        let r = val << 1;
        self.status.set_zn(r);
        r
    }

    fn do_lsr(&mut self, val: u8) -> u8 {
        self.status.set(Status::C, val & 0x01 != 0);
        let r = val >> 1;
        self.status.set_zn(r);
        r
    }

    fn do_rol(&mut self, val: u8) -> u8 {
        let carry_in = u8::from(self.status.contains(Status::C));
        self.status.set(Status::C, val & 0x80 != 0);
        let r = (val << 1) | carry_in;
        self.status.set_zn(r);
        r
    }

    fn do_ror(&mut self, val: u8) -> u8 {
        let carry_in = u8::from(self.status.contains(Status::C));
        self.status.set(Status::C, val & 0x01 != 0);
        let r = (val >> 1) | (carry_in << 7);
        self.status.set_zn(r);
        r
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
