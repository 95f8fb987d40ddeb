//! NES emulation core.
//!
//! Glues the CPU, PPU, APU and cartridge into a console with the
//! hardware's lockstep timing: each CPU instruction is followed by three
//! PPU dots and one APU tick per cycle, NMI edges latch during the
//! catch-up and fire at the next instruction boundary, and IRQs (APU
//! frame counter, MMC3 scanline) are polled once per step.
//!
//! ```no_run
//! use famicore_core::{buttons, Nes};
//!
//! let rom = std::fs::read("game.nes").unwrap();
//! let mut nes = Nes::from_ines(&rom).unwrap();
//! nes.reset();
//! loop {
//!     nes.set_buttons(0, buttons::A | buttons::RIGHT);
//!     nes.run_frame();
//!     let _pixels = nes.framebuffer();
//!     let mut audio = [0.0f32; 1024];
//!     let _n = nes.drain_audio(&mut audio);
//! }
//! ```

#![warn(missing_docs)]

mod bus;
mod console;
pub mod controller;

pub use bus::Bus;
pub use console::{Nes, NesError};
pub use controller::buttons;

// Component types, re-exported for harnesses and debuggers
pub use famicore_apu::Apu;
pub use famicore_cart::{Cartridge, Mapper, Mirroring, Rom, RomError};
pub use famicore_cpu::{trace, Cpu, CpuBus, Status};
pub use famicore_ppu::{Ppu, FRAME_HEIGHT, FRAME_WIDTH, MASTER_PALETTE};
