//! The 2C02 master palette.

/// 64-entry NTSC palette as 0x00RRGGBB. Framebuffer writes OR in an
/// opaque alpha byte.
#[rustfmt::skip]
pub const MASTER_PALETTE: [u32; 64] = [
    0x66_6666, 0x00_2A88, 0x14_12A7, 0x3B_00A4, 0x5C_007E, 0x6E_0040, 0x6C_0600, 0x56_1D00,
    0x33_3500, 0x0B_4800, 0x00_5200, 0x00_4F08, 0x00_404D, 0x00_0000, 0x00_0000, 0x00_0000,
    0xAD_ADAD, 0x15_5FD9, 0x42_40FF, 0x75_27FE, 0xA0_1ACC, 0xB7_1E7B, 0xB5_3120, 0x99_4E00,
    0x6B_6D00, 0x38_8700, 0x0C_9300, 0x00_8F32, 0x00_7C8D, 0x00_0000, 0x00_0000, 0x00_0000,
    0xFF_FEFF, 0x64_B0FF, 0x92_90FF, 0xC6_76FF, 0xF3_6AFF, 0xFE_6ECC, 0xFE_8170, 0xEA_9E22,
    0xBC_BE00, 0x88_D800, 0x5C_E430, 0x45_E082, 0x48_CDDE, 0x4F_4F4F, 0x00_0000, 0x00_0000,
    0xFF_FEFF, 0xC0_DFFF, 0xD3_D2FF, 0xE8_C8FF, 0xFB_C2FF, 0xFE_C4EA, 0xFE_CCC5, 0xF7_D8A5,
    0xE4_E594, 0xCF_EF96, 0xBD_F4AB, 0xB3_F3CC, 0xB5_EBF2, 0xB8_B8B8, 0x00_0000, 0x00_0000,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_entries() {
        assert_eq!(MASTER_PALETTE[0x00], 0x66_6666);
        assert_eq!(MASTER_PALETTE[0x0D], 0x00_0000);
        assert_eq!(MASTER_PALETTE[0x20], 0xFF_FEFF);
        assert_eq!(MASTER_PALETTE[0x3D], 0xB8_B8B8);
    }
}
