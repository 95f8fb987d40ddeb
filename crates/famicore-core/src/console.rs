//! The console: CPU plus bus, with the frame loop's interrupt ordering.

use crate::bus::Bus;
use famicore_cart::{Cartridge, Rom, RomError};
use famicore_cpu::{Cpu, CpuBus};

/// Errors surfaced when building a console.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NesError {
    /// The ROM image could not be parsed or uses an unsupported mapper.
    #[error("ROM load failed: {0}")]
    Rom(#[from] RomError),
}

/// A complete NES.
///
/// Each [`Nes::step`] executes one CPU instruction (or services a pending
/// OAM DMA), then catches the PPU and APU up and polls interrupt lines:
///
/// 1. pending OAM DMA runs before anything else;
/// 2. a latched PPU NMI is handed to the CPU, which takes it before the
///    next instruction;
/// 3. the CPU runs one instruction for `c` cycles;
/// 4. the APU advances `c` ticks and the PPU `3c` dots;
/// 5. the APU frame IRQ and mapper IRQ lines are polled (masked by the
///    CPU's I flag).
pub struct Nes {
    /// 6502 CPU.
    pub cpu: Cpu,
    /// Everything the CPU talks to.
    pub bus: Bus,
}

impl Nes {
    /// Build a console from an iNES image.
    ///
    /// # Errors
    ///
    /// Returns [`NesError::Rom`] for malformed images or unsupported
    /// mappers.
    pub fn from_ines(data: &[u8]) -> Result<Self, NesError> {
        let rom = Rom::parse(data)?;
        log::debug!("console built with mapper {}", rom.mapper_id);
        Ok(Self::with_cartridge(Cartridge::new(rom)))
    }

    /// Build a console around an existing cartridge.
    pub fn with_cartridge(cart: Cartridge) -> Self {
        let mut nes = Self {
            cpu: Cpu::new(),
            bus: Bus::new(cart),
        };
        nes.cpu.reset(&mut nes.bus);
        nes
    }

    /// Reset the whole machine.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
    }

    /// Run one step of the frame loop. Returns CPU cycles consumed.
    pub fn step(&mut self) -> u32 {
        if let Some(page) = self.bus.take_dma() {
            return self.run_oam_dma(page);
        }

        if self.bus.ppu.take_nmi() {
            self.cpu.nmi();
        }

        let cycles = u32::from(self.cpu.step(&mut self.bus));
        self.bus.tick(cycles);

        if self.bus.apu.frame_irq() || self.bus.cart.irq_pending() {
            self.cpu.irq();
        }

        cycles
    }

    /// Copy a 256-byte page into OAM and stall for the DMA duration.
    ///
    /// The stall is 513 CPU cycles, plus one when the CPU is on an odd
    /// cycle. NMI edges raised while stalled are taken at the next step.
    fn run_oam_dma(&mut self, page: u8) -> u32 {
        let base = u16::from(page) << 8;
        for i in 0..256 {
            let byte = self.bus.read(base + i);
            self.bus.write(0x2004, byte);
        }

        let stall = 513 + u32::from(self.cpu.cycles & 1 != 0);
        self.bus.tick(stall);
        self.cpu.cycles += u64::from(stall);
        stall
    }

    /// Run until the PPU signals end of frame.
    pub fn run_frame(&mut self) {
        loop {
            self.step();
            if self.bus.ppu.take_frame_ready() {
                break;
            }
        }
    }

    /// The 256x240 ARGB framebuffer.
    pub fn framebuffer(&self) -> &[u32] {
        self.bus.ppu.framebuffer()
    }

    /// Drain buffered audio samples into `dst`; returns the count.
    pub fn drain_audio(&mut self, dst: &mut [f32]) -> usize {
        self.bus.apu.drain_samples(dst)
    }

    /// Set the live button mask for a controller port (0 or 1).
    pub fn set_buttons(&mut self, port: usize, mask: u8) {
        self.bus.set_buttons(port, mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famicore_cart::Mirroring;

    /// NROM cartridge running an endless NOP loop.
    fn nop_cartridge() -> Cartridge {
        let mut prg = vec![0xEA; 32 * 1024];
        // JMP $8000 at $8000 would be tighter, but a NOP sled that wraps
        // through the vectors works fine for timing tests
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        Cartridge::new(Rom {
            prg_rom: prg,
            chr_rom: vec![0; 8 * 1024],
            mapper_id: 0,
            mirroring: Mirroring::Horizontal,
            battery: false,
        })
    }

    #[test]
    fn step_keeps_components_in_lockstep() {
        let mut nes = Nes::with_cartridge(nop_cartridge());
        let before = nes.cpu.cycles;
        let mut dots = u64::from(nes.bus.ppu.scanline()) * 341 + u64::from(nes.bus.ppu.dot());
        for _ in 0..100 {
            nes.step();
        }
        let cycles = nes.cpu.cycles - before;
        dots = u64::from(nes.bus.ppu.scanline()) * 341 + u64::from(nes.bus.ppu.dot()) - dots;
        assert_eq!(dots, cycles * 3);
    }

    #[test]
    fn run_frame_terminates() {
        let mut nes = Nes::with_cartridge(nop_cartridge());
        nes.run_frame();
        assert_eq!(nes.bus.ppu.frame(), 1);
    }

    #[test]
    fn rejects_bad_rom() {
        assert!(Nes::from_ines(&[0u8; 4]).is_err());
    }

    #[test]
    fn oam_dma_transfers_and_stalls() {
        let mut nes = Nes::with_cartridge(nop_cartridge());
        for i in 0..256u16 {
            nes.bus.write(0x0200 + i, i as u8);
        }
        nes.bus.write(0x2003, 0x00); // OAMADDR
        nes.bus.write(0x4014, 0x02);
        let cycles = nes.step();
        assert!(cycles == 513 || cycles == 514);
        nes.bus.write(0x2003, 0x05);
        assert_eq!(nes.bus.read(0x2004), 5);
    }

    #[test]
    fn vblank_nmi_reaches_the_cpu() {
        let mut nes = Nes::with_cartridge(nop_cartridge());
        nes.bus.write(0x2000, 0x80); // enable NMI at VBlank
        let sp_before = nes.cpu.sp;
        // Run past VBlank start; the NMI vector lands in the NOP sled
        while nes.bus.ppu.scanline() != 242 {
            nes.step();
        }
        // The interrupt sequence pushed PC and status
        assert_eq!(nes.cpu.sp, sp_before.wrapping_sub(3));
    }
}
