//! The 128 built-in colors of the Launchpad MK2.
//!
//! Palette colors are addressed on the wire by their index (see
//! [`PaletteColor`](crate::mk2::PaletteColor)). This table maps every index to the color the
//! device actually shows, which is what you want when mirroring the grid on a screen.

/// An 8-bit-per-channel color, as displayed by the device for a given palette index
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as a lowercase `#rrggbb` string
    ///
    /// ```
    /// # use launchpad_mk2::palette::DisplayColor;
    /// assert_eq!(DisplayColor::new(255, 10, 0).to_hex(), "#ff0a00");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Number of entries in the device palette
pub const PALETTE_SIZE: usize = 128;

/// Look up the display color of a palette index.
///
/// Indices above 127 don't exist on the device and yield [`MidiError::UnknownColorIndex`].
///
/// [`MidiError::UnknownColorIndex`]: crate::MidiError::UnknownColorIndex
pub fn lookup(index: u8) -> Result<DisplayColor, crate::MidiError> {
    PALETTE
        .get(index as usize)
        .copied()
        .ok_or(crate::MidiError::UnknownColorIndex(index))
}

pub static PALETTE: [DisplayColor; PALETTE_SIZE] = [
    // 0..=7
    DisplayColor::new(0x00, 0x00, 0x00),
    DisplayColor::new(0x1c, 0x1c, 0x1c),
    DisplayColor::new(0x7c, 0x7c, 0x7c),
    DisplayColor::new(0xfc, 0xfc, 0xfc),
    DisplayColor::new(0xff, 0x4d, 0x47),
    DisplayColor::new(0xff, 0x0a, 0x00),
    DisplayColor::new(0x5a, 0x01, 0x00),
    DisplayColor::new(0x19, 0x00, 0x00),
    // 8..=15
    DisplayColor::new(0xff, 0xbd, 0x62),
    DisplayColor::new(0xff, 0x56, 0x00),
    DisplayColor::new(0x5a, 0x1d, 0x00),
    DisplayColor::new(0x24, 0x18, 0x00),
    DisplayColor::new(0xfd, 0xfd, 0x21),
    DisplayColor::new(0xfd, 0xfd, 0x00),
    DisplayColor::new(0x58, 0x58, 0x00),
    DisplayColor::new(0x18, 0x18, 0x00),
    // 16..=23
    DisplayColor::new(0x80, 0xfd, 0x2a),
    DisplayColor::new(0x40, 0xfd, 0x00),
    DisplayColor::new(0x16, 0x58, 0x00),
    DisplayColor::new(0x13, 0x28, 0x00),
    DisplayColor::new(0x34, 0xfd, 0x2b),
    DisplayColor::new(0x00, 0xfd, 0x00),
    DisplayColor::new(0x00, 0x58, 0x00),
    DisplayColor::new(0x00, 0x18, 0x00),
    // 24..=31
    DisplayColor::new(0x33, 0xfd, 0x46),
    DisplayColor::new(0x00, 0xfd, 0x00),
    DisplayColor::new(0x00, 0x58, 0x00),
    DisplayColor::new(0x00, 0x18, 0x00),
    DisplayColor::new(0x32, 0xfd, 0x7e),
    DisplayColor::new(0x00, 0xfd, 0x3a),
    DisplayColor::new(0x00, 0x58, 0x14),
    DisplayColor::new(0x00, 0x1c, 0x0f),
    // 32..=39
    DisplayColor::new(0x2f, 0xfc, 0xb0),
    DisplayColor::new(0x00, 0xfc, 0x91),
    DisplayColor::new(0x00, 0x58, 0x31),
    DisplayColor::new(0x00, 0x18, 0x0f),
    DisplayColor::new(0x39, 0xbf, 0xff),
    DisplayColor::new(0x00, 0xa7, 0xff),
    DisplayColor::new(0x00, 0x40, 0x51),
    DisplayColor::new(0x00, 0x10, 0x18),
    // 40..=47
    DisplayColor::new(0x41, 0x86, 0xff),
    DisplayColor::new(0x00, 0x50, 0xff),
    DisplayColor::new(0x00, 0x1a, 0x5a),
    DisplayColor::new(0x00, 0x07, 0x19),
    DisplayColor::new(0x46, 0x47, 0xff),
    DisplayColor::new(0x00, 0x00, 0xff),
    DisplayColor::new(0x00, 0x00, 0x5b),
    DisplayColor::new(0x00, 0x00, 0x19),
    // 48..=55
    DisplayColor::new(0x83, 0x47, 0xff),
    DisplayColor::new(0x50, 0x00, 0xff),
    DisplayColor::new(0x16, 0x00, 0x67),
    DisplayColor::new(0x0b, 0x00, 0x32),
    DisplayColor::new(0xff, 0x49, 0xff),
    DisplayColor::new(0xff, 0x00, 0xff),
    DisplayColor::new(0x5a, 0x00, 0x5a),
    DisplayColor::new(0x19, 0x00, 0x19),
    // 56..=63
    DisplayColor::new(0xff, 0x4d, 0x84),
    DisplayColor::new(0xff, 0x07, 0x52),
    DisplayColor::new(0x5a, 0x01, 0x1b),
    DisplayColor::new(0x21, 0x00, 0x10),
    DisplayColor::new(0xff, 0x19, 0x00),
    DisplayColor::new(0x9b, 0x35, 0x00),
    DisplayColor::new(0x7a, 0x51, 0x00),
    DisplayColor::new(0x3e, 0x64, 0x00),
    // 64..=71
    DisplayColor::new(0x2d, 0x5b, 0x2d),
    DisplayColor::new(0x00, 0x54, 0x32),
    DisplayColor::new(0x00, 0x53, 0x7e),
    DisplayColor::new(0x00, 0x00, 0xff),
    DisplayColor::new(0x00, 0x44, 0x4d),
    DisplayColor::new(0x1b, 0x00, 0xd2),
    DisplayColor::new(0x7c, 0x7c, 0x7c),
    DisplayColor::new(0x20, 0x20, 0x20),
    // 72..=79
    DisplayColor::new(0xff, 0x0a, 0x00),
    DisplayColor::new(0xba, 0xfd, 0x00),
    DisplayColor::new(0xaa, 0xed, 0x00),
    DisplayColor::new(0x56, 0xfd, 0x00),
    DisplayColor::new(0x00, 0x88, 0x00),
    DisplayColor::new(0x00, 0xfc, 0x7a),
    DisplayColor::new(0x00, 0xa7, 0xff),
    DisplayColor::new(0x00, 0x1b, 0xff),
    // 80..=87
    DisplayColor::new(0x35, 0x00, 0xff),
    DisplayColor::new(0x77, 0x00, 0xff),
    DisplayColor::new(0xb4, 0x17, 0x7e),
    DisplayColor::new(0x41, 0x20, 0x00),
    DisplayColor::new(0xff, 0x4a, 0x00),
    DisplayColor::new(0x83, 0xe1, 0x00),
    DisplayColor::new(0x65, 0xfd, 0x00),
    DisplayColor::new(0x00, 0xfd, 0x00),
    // 88..=95
    DisplayColor::new(0x00, 0xfd, 0x00),
    DisplayColor::new(0x45, 0xfd, 0x61),
    DisplayColor::new(0x00, 0xfc, 0xca),
    DisplayColor::new(0x50, 0x86, 0xff),
    DisplayColor::new(0x27, 0x4d, 0xc9),
    DisplayColor::new(0x82, 0x7a, 0xed),
    DisplayColor::new(0xd3, 0x0c, 0xff),
    DisplayColor::new(0xff, 0x06, 0x5a),
    // 96..=103
    DisplayColor::new(0xff, 0x7d, 0x00),
    DisplayColor::new(0xb9, 0xb1, 0x00),
    DisplayColor::new(0x8a, 0xfd, 0x00),
    DisplayColor::new(0x82, 0x5d, 0x00),
    DisplayColor::new(0x39, 0x28, 0x00),
    DisplayColor::new(0x0d, 0x4c, 0x05),
    DisplayColor::new(0x00, 0x50, 0x37),
    DisplayColor::new(0x13, 0x13, 0x29),
    // 104..=111
    DisplayColor::new(0x10, 0x1f, 0x5a),
    DisplayColor::new(0x6a, 0x3c, 0x17),
    DisplayColor::new(0xac, 0x04, 0x00),
    DisplayColor::new(0xe1, 0x51, 0x35),
    DisplayColor::new(0xdc, 0x69, 0x00),
    DisplayColor::new(0xff, 0xe1, 0x00),
    DisplayColor::new(0x99, 0xe1, 0x00),
    DisplayColor::new(0x5f, 0xb5, 0x00),
    // 112..=119
    DisplayColor::new(0x1b, 0x1b, 0x31),
    DisplayColor::new(0xdc, 0xfd, 0x54),
    DisplayColor::new(0x76, 0xfc, 0xb8),
    DisplayColor::new(0x96, 0x97, 0xff),
    DisplayColor::new(0x8b, 0x61, 0xff),
    DisplayColor::new(0x40, 0x40, 0x40),
    DisplayColor::new(0x74, 0x74, 0x74),
    DisplayColor::new(0xde, 0xfc, 0xfc),
    // 120..=127
    DisplayColor::new(0xa4, 0x04, 0x00),
    DisplayColor::new(0x35, 0x00, 0x00),
    DisplayColor::new(0x00, 0xd1, 0x00),
    DisplayColor::new(0x00, 0x40, 0x00),
    DisplayColor::new(0xb9, 0xb1, 0x00),
    DisplayColor::new(0x3d, 0x30, 0x00),
    DisplayColor::new(0xb4, 0x5d, 0x00),
    DisplayColor::new(0x4a, 0x14, 0x00),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_covers_the_whole_palette() {
        assert_eq!(lookup(0).unwrap(), DisplayColor::new(0, 0, 0));
        assert_eq!(lookup(3).unwrap().to_hex(), "#fcfcfc");
        assert_eq!(lookup(45).unwrap().to_hex(), "#0000ff");
        assert_eq!(lookup(127).unwrap().to_hex(), "#4a1400");
    }

    #[test]
    fn lookup_rejects_indices_outside_the_palette() {
        assert!(matches!(
            lookup(128),
            Err(crate::MidiError::UnknownColorIndex(128))
        ));
        assert!(lookup(255).is_err());
    }
}
