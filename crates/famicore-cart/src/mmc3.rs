//! MMC3 (mapper 4) banking and scanline IRQ.
//!
//! Register file:
//!
//! ```text
//! $8000 even  bank select (R0-R7), PRG mode bit 6, CHR mode bit 7
//! $8001 odd   bank data for the selected register
//! $A000 even  mirroring
//! $A001 odd   PRG-RAM protect (stored, not enforced)
//! $C000 even  IRQ latch
//! $C001 odd   IRQ reload (counter cleared, reloads on next clock)
//! $E000 even  IRQ disable + acknowledge
//! $E001 odd   IRQ enable
//! ```
//!
//! The IRQ counter is clocked by filtered A12 rising edges: an edge only
//! counts if A12 has been low for more than 12 PPU cycles. Sprite fetches
//! from $1000 toggle A12 every 8 dots, so the filter admits exactly one
//! clock per scanline while rendering.

use crate::mapper::Mirroring;

/// Minimum number of PPU cycles A12 must stay low before a rising edge
/// clocks the scanline counter.
const A12_FILTER_DELAY: u32 = 12;

/// MMC3 mapper state.
#[derive(Debug, Clone)]
pub struct Mmc3 {
    bank_select: u8,
    bank_data: [u8; 8],
    prg_mode: bool,
    chr_mode: bool,
    mirroring: Mirroring,
    prg_ram_protect: u8,

    irq_latch: u8,
    irq_counter: u8,
    irq_enabled: bool,
    irq_pending: bool,
    irq_reload: bool,

    prev_a12_high: bool,
    last_a12_high_cycle: u32,

    /// Number of 8 KiB PRG banks.
    prg_banks: usize,
    /// Number of 1 KiB CHR banks.
    chr_banks: usize,
}

impl Mmc3 {
    /// Create an MMC3 for a cartridge with the given PRG/CHR sizes.
    pub fn new(prg_len: usize, chr_len: usize, mirroring: Mirroring) -> Self {
        let mut mmc3 = Self {
            bank_select: 0,
            bank_data: [0; 8],
            prg_mode: false,
            chr_mode: false,
            mirroring,
            prg_ram_protect: 0,
            irq_latch: 0,
            irq_counter: 0,
            irq_enabled: false,
            irq_pending: false,
            irq_reload: false,
            prev_a12_high: false,
            last_a12_high_cycle: 0,
            prg_banks: (prg_len / 8192).max(1),
            chr_banks: (chr_len / 1024).max(1),
        };
        mmc3.reset();
        mmc3
    }

    /// Power-on register state.
    pub fn reset(&mut self) {
        self.bank_select = 0;
        self.bank_data = [0, 2, 4, 5, 6, 7, 0, 1];
        self.prg_mode = false;
        self.chr_mode = false;
        self.prg_ram_protect = 0;
        self.irq_latch = 0;
        self.irq_counter = 0;
        self.irq_enabled = false;
        self.irq_pending = false;
        self.irq_reload = false;
        self.prev_a12_high = false;
        self.last_a12_high_cycle = 0;
    }

    /// Current nametable mirroring (runtime-controlled on this board).
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    /// Translate a CPU address in $8000-$FFFF to a PRG-ROM offset.
    ///
    /// Slots at $C000/$E000 (mode 0) or $8000/$E000 (mode 1) are fixed to
    /// the second-to-last and last banks.
    pub fn prg_offset(&self, addr: u16) -> usize {
        let bank = match addr {
            0x8000..=0x9FFF => {
                if self.prg_mode {
                    self.prg_banks.saturating_sub(2)
                } else {
                    self.bank_data[6] as usize
                }
            }
            0xA000..=0xBFFF => self.bank_data[7] as usize,
            0xC000..=0xDFFF => {
                if self.prg_mode {
                    self.bank_data[6] as usize
                } else {
                    self.prg_banks.saturating_sub(2)
                }
            }
            _ => self.prg_banks - 1,
        };
        (bank % self.prg_banks) * 8192 + (addr & 0x1FFF) as usize
    }

    /// Translate a PPU address in $0000-$1FFF to a CHR offset.
    ///
    /// R0/R1 select 2 KiB pairs (low bit forced even), R2-R5 select 1 KiB
    /// banks; the CHR mode bit swaps the two halves of the pattern space.
    pub fn chr_offset(&self, addr: u16) -> usize {
        let addr = addr & 0x1FFF;
        let bank = if self.chr_mode {
            match addr {
                0x0000..=0x03FF => self.bank_data[2] as usize,
                0x0400..=0x07FF => self.bank_data[3] as usize,
                0x0800..=0x0BFF => self.bank_data[4] as usize,
                0x0C00..=0x0FFF => self.bank_data[5] as usize,
                0x1000..=0x17FF => (self.bank_data[0] & 0xFE) as usize + ((addr >> 10) & 1) as usize,
                _ => (self.bank_data[1] & 0xFE) as usize + ((addr >> 10) & 1) as usize,
            }
        } else {
            match addr {
                0x0000..=0x07FF => (self.bank_data[0] & 0xFE) as usize + ((addr >> 10) & 1) as usize,
                0x0800..=0x0FFF => (self.bank_data[1] & 0xFE) as usize + ((addr >> 10) & 1) as usize,
                0x1000..=0x13FF => self.bank_data[2] as usize,
                0x1400..=0x17FF => self.bank_data[3] as usize,
                0x1800..=0x1BFF => self.bank_data[4] as usize,
                _ => self.bank_data[5] as usize,
            }
        };
        (bank % self.chr_banks) * 1024 + (addr & 0x03FF) as usize
    }

    /// Handle a CPU write to $8000-$FFFF.
    pub fn write_register(&mut self, addr: u16, val: u8) {
        match addr & 0xE001 {
            0x8000 => {
                self.bank_select = val & 0x07;
                self.prg_mode = val & 0x40 != 0;
                self.chr_mode = val & 0x80 != 0;
            }
            0x8001 => {
                self.bank_data[self.bank_select as usize] = val;
            }
            0xA000 => {
                // The MMC3 mirroring bit is inverted relative to iNES flag 6.
                self.mirroring = if val & 1 != 0 {
                    Mirroring::Horizontal
                } else {
                    Mirroring::Vertical
                };
            }
            0xA001 => {
                self.prg_ram_protect = val;
            }
            0xC000 => {
                self.irq_latch = val;
            }
            0xC001 => {
                self.irq_counter = 0;
                self.irq_reload = true;
            }
            0xE000 => {
                self.irq_enabled = false;
                self.irq_pending = false;
            }
            _ => {
                self.irq_enabled = true;
            }
        }
    }

    /// Observe PPU address bit 12.
    ///
    /// `cycle` is the frame-relative PPU cycle (`scanline * 341 + dot`);
    /// the subtraction wraps across frame boundaries, which reads as a huge
    /// gap and correctly admits the first edge of the new frame.
    pub fn a12_latch(&mut self, addr: u16, cycle: u32) {
        let a12_high = addr & 0x1000 != 0;
        if a12_high {
            if !self.prev_a12_high
                && cycle.wrapping_sub(self.last_a12_high_cycle) > A12_FILTER_DELAY
            {
                self.clock_scanline();
            }
            self.last_a12_high_cycle = cycle;
        }
        self.prev_a12_high = a12_high;
    }

    /// Clock the scanline counter once.
    fn clock_scanline(&mut self) {
        if self.irq_counter == 0 || self.irq_reload {
            self.irq_counter = self.irq_latch;
            self.irq_reload = false;
        } else {
            self.irq_counter -= 1;
        }
        if self.irq_counter == 0 && self.irq_enabled {
            self.irq_pending = true;
        }
    }

    /// Whether the scanline IRQ is asserted.
    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Deassert the scanline IRQ.
    pub fn irq_clear(&mut self) {
        self.irq_pending = false;
    }
}
