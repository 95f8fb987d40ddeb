//! iNES ROM image parsing.
//!
//! Only the legacy 16-byte iNES header is supported. A 512-byte trainer,
//! when flagged, is skipped; the mapper id is assembled from the two
//! header nibbles and anything other than NROM (0) or MMC3 (4) is a load
//! failure.

use crate::mapper::Mirroring;

/// Errors that can occur when parsing an iNES image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RomError {
    /// File is shorter than the 16-byte header.
    #[error("ROM too short: expected at least 16 bytes, got {0}")]
    TooShort(usize),

    /// Header does not start with "NES\x1A".
    #[error("invalid iNES magic: expected [4E 45 53 1A], got {0:02X?}")]
    BadMagic([u8; 4]),

    /// Mapper is neither NROM nor MMC3.
    #[error("unsupported mapper id {0}")]
    UnsupportedMapper(u8),

    /// Header declares no PRG-ROM at all.
    #[error("PRG-ROM size of zero")]
    EmptyPrg,

    /// PRG/CHR data extends past the end of the file.
    #[error("ROM truncated: header promises {expected} bytes, file has {actual}")]
    Truncated {
        /// Bytes the header claims are present.
        expected: usize,
        /// Bytes actually in the file.
        actual: usize,
    },
}

/// A parsed iNES image.
///
/// Owns copies of the PRG and CHR data; the [`crate::Cartridge`] takes
/// ownership of these when it is built.
#[derive(Debug, Clone)]
pub struct Rom {
    /// PRG-ROM data (multiple of 16 KiB).
    pub prg_rom: Vec<u8>,
    /// CHR-ROM data (multiple of 8 KiB), empty when the board uses CHR-RAM.
    pub chr_rom: Vec<u8>,
    /// iNES mapper id (0 or 4).
    pub mapper_id: u8,
    /// Nametable mirroring from header flags.
    pub mirroring: Mirroring,
    /// Battery-backed PRG-RAM flag.
    pub battery: bool,
}

impl Rom {
    /// "NES" followed by MS-DOS EOF.
    const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

    /// Parse a complete iNES file from memory.
    ///
    /// # Errors
    ///
    /// Returns [`RomError`] when the header is malformed, the mapper is
    /// unsupported, or the file is shorter than the header promises.
    pub fn parse(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < 16 {
            return Err(RomError::TooShort(data.len()));
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != Self::MAGIC {
            return Err(RomError::BadMagic(magic));
        }

        let prg_size = data[4] as usize * 16 * 1024;
        let chr_size = data[5] as usize * 8 * 1024;
        if prg_size == 0 {
            return Err(RomError::EmptyPrg);
        }
        let flags6 = data[6];
        let flags7 = data[7];

        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);
        if mapper_id != 0 && mapper_id != 4 {
            return Err(RomError::UnsupportedMapper(mapper_id));
        }

        let mirroring = if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = flags6 & 0x02 != 0;
        let has_trainer = flags6 & 0x04 != 0;

        let mut offset = 16;
        if has_trainer {
            offset += 512;
        }

        let expected = offset + prg_size + chr_size;
        if data.len() < expected {
            return Err(RomError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg_rom = data[offset..offset + prg_size].to_vec();
        offset += prg_size;
        let chr_rom = data[offset..offset + chr_size].to_vec();

        log::debug!(
            "iNES: mapper {mapper_id}, {} KiB PRG, {} KiB CHR, {mirroring:?} mirroring",
            prg_size / 1024,
            chr_size / 1024,
        );

        Ok(Self {
            prg_rom,
            chr_rom,
            mapper_id,
            mirroring,
            battery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_image(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flags6, flags7];
        data.extend_from_slice(&[0; 8]);
        data.extend(std::iter::repeat(0xAB).take(prg_banks as usize * 16384));
        data.extend(std::iter::repeat(0xCD).take(chr_banks as usize * 8192));
        data
    }

    #[test]
    fn parses_nrom_header() {
        let rom = Rom::parse(&build_image(2, 1, 0x01, 0x00)).unwrap();
        assert_eq!(rom.mapper_id, 0);
        assert_eq!(rom.prg_rom.len(), 32768);
        assert_eq!(rom.chr_rom.len(), 8192);
        assert_eq!(rom.mirroring, Mirroring::Vertical);
        assert!(!rom.battery);
    }

    #[test]
    fn parses_mmc3_mapper_nibbles() {
        let rom = Rom::parse(&build_image(2, 1, 0x40, 0x00)).unwrap();
        assert_eq!(rom.mapper_id, 4);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = build_image(1, 1, 0, 0);
        data[0] = 0x4D;
        assert!(matches!(Rom::parse(&data), Err(RomError::BadMagic(_))));
    }

    #[test]
    fn rejects_short_file() {
        assert!(matches!(
            Rom::parse(&[0x4E, 0x45, 0x53]),
            Err(RomError::TooShort(3))
        ));
    }

    #[test]
    fn rejects_unsupported_mapper() {
        // Mapper 1 (MMC1) in the low nibble of flags 6.
        let data = build_image(1, 1, 0x10, 0x00);
        assert!(matches!(
            Rom::parse(&data),
            Err(RomError::UnsupportedMapper(1))
        ));
    }

    #[test]
    fn rejects_truncated_prg() {
        let mut data = build_image(2, 1, 0, 0);
        data.truncate(16 + 1024);
        assert!(matches!(Rom::parse(&data), Err(RomError::Truncated { .. })));
    }

    #[test]
    fn skips_trainer() {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, 1, 0, 0x04, 0x00];
        data.extend_from_slice(&[0; 8]);
        data.extend(std::iter::repeat(0xFF).take(512)); // trainer
        data.extend(std::iter::repeat(0x42).take(16384));
        let rom = Rom::parse(&data).unwrap();
        assert_eq!(rom.prg_rom[0], 0x42);
        assert!(rom.chr_rom.is_empty());
    }

    #[test]
    fn battery_flag() {
        let rom = Rom::parse(&build_image(1, 1, 0x02, 0x00)).unwrap();
        assert!(rom.battery);
    }
}
