//! 2C02 PPU emulation.
//!
//! The PPU is a dot machine: [`Ppu::tick`] advances exactly one pixel
//! clock (three per CPU cycle) through the 262x341 NTSC frame, running
//! the background fetch cadence, sprite evaluation and the pixel
//! multiplexer at the positions real hardware does. Pattern-table
//! accesses go to the cartridge, which also observes address bit 12 for
//! the MMC3 scanline counter.
//!
//! Output is a 256x240 ARGB framebuffer, refreshed in place as visible
//! dots are rendered; `frame_ready` latches when the frame wraps.

#![warn(missing_docs)]

mod palette;
mod ppu;
mod registers;
mod scroll;

pub use palette::MASTER_PALETTE;
pub use ppu::{Ppu, FRAME_HEIGHT, FRAME_WIDTH};
pub use registers::{PpuCtrl, PpuMask, PpuStatus};
pub use scroll::Scroll;
