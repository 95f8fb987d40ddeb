//! 2A03 APU emulation.
//!
//! Five channels (two pulses, triangle, noise, DMC) built from shared
//! units - envelope, length counter, sweep - clocked by a frame sequencer
//! that fires every 7457 CPU cycles. [`Apu::tick`] advances one CPU
//! cycle; pulse and noise timers run at half that rate, the triangle and
//! DMC timers at full rate.
//!
//! Output is mono f32 at 44.1 kHz through Nintendo's non-linear mixer,
//! collected in an internal ring drained by [`Apu::drain_samples`].

#![warn(missing_docs)]

mod apu;
mod dmc;
mod envelope;
mod frame_counter;
mod length_counter;
pub mod mixer;
mod noise;
mod pulse;
mod sweep;
mod triangle;

pub use apu::Apu;
pub use dmc::Dmc;
pub use envelope::Envelope;
pub use frame_counter::FrameCounter;
pub use length_counter::LengthCounter;
pub use noise::Noise;
pub use pulse::Pulse;
pub use triangle::Triangle;
