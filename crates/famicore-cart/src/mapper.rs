//! Mapper dispatch.
//!
//! The two supported boards are modeled as enum variants and dispatched
//! with a single match per access. NROM has no state of its own, so all
//! of its address translation lives in [`crate::Cartridge`]; MMC3 keeps
//! its bank registers and IRQ counter in [`crate::Mmc3`].

use crate::mmc3::Mmc3;

/// Nametable mirroring arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// Horizontal mirroring ($2000/$2400 share, $2800/$2C00 share).
    #[default]
    Horizontal,
    /// Vertical mirroring ($2000/$2800 share, $2400/$2C00 share).
    Vertical,
}

/// Cartridge mapper hardware.
#[derive(Debug, Clone)]
pub enum Mapper {
    /// Mapper 0: no banking.
    Nrom,
    /// Mapper 4: MMC3 banking and scanline IRQ.
    Mmc3(Mmc3),
}

impl Mapper {
    /// Build the mapper for an iNES mapper id.
    ///
    /// The id has already been validated by [`crate::Rom::parse`], so this
    /// only needs to distinguish the two supported boards.
    pub fn from_id(mapper_id: u8, prg_len: usize, chr_len: usize, mirroring: Mirroring) -> Self {
        match mapper_id {
            4 => Self::Mmc3(Mmc3::new(prg_len, chr_len, mirroring)),
            _ => Self::Nrom,
        }
    }

    /// iNES mapper id of this variant.
    pub fn id(&self) -> u8 {
        match self {
            Self::Nrom => 0,
            Self::Mmc3(_) => 4,
        }
    }

    /// Whether the mapper has an unserviced IRQ.
    pub fn irq_pending(&self) -> bool {
        match self {
            Self::Nrom => false,
            Self::Mmc3(m) => m.irq_pending(),
        }
    }

    /// Acknowledge the mapper IRQ.
    pub fn irq_clear(&mut self) {
        if let Self::Mmc3(m) = self {
            m.irq_clear();
        }
    }

    /// Report a PPU address-bus transition (A12 edge detection).
    ///
    /// `cycle` is the position within the frame, `scanline * 341 + dot`.
    pub fn a12_latch(&mut self, addr: u16, cycle: u32) {
        if let Self::Mmc3(m) = self {
            m.a12_latch(addr, cycle);
        }
    }

    /// Return the mapper to its power-on register state.
    pub fn reset(&mut self) {
        if let Self::Mmc3(m) = self {
            m.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_variants() {
        assert_eq!(Mapper::Nrom.id(), 0);
        assert_eq!(
            Mapper::from_id(4, 32 * 1024, 8 * 1024, Mirroring::Vertical).id(),
            4
        );
    }

    #[test]
    fn nrom_never_raises_irq() {
        let mut m = Mapper::Nrom;
        m.a12_latch(0x1000, 0);
        m.a12_latch(0x0000, 100);
        m.a12_latch(0x1000, 200);
        assert!(!m.irq_pending());
    }
}
