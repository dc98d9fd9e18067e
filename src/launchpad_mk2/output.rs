use std::str::FromStr;

use crate::palette::DisplayColor;
use crate::MidiError;

/// Header shared by every SysEx message the MK2 understands
const SYSEX_HEADER: [u8; 5] = [240, 0, 32, 41, 2];
const SYSEX_END: u8 = 247;

/// The stored color index of a button that was lit with a direct RGB color
pub const RGB_SENTINEL: i16 = -1;

/// A color from the Mk2 color palette. See the "Launchpad MK2 Programmers Reference Manual"
/// to see the palette, or [`crate::palette`] for what each entry looks like.
///
/// Build one from a palette index with [`PaletteColor::new`], or with `try_from` if the index
/// comes from outside and may be out of range.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct PaletteColor {
    id: u8,
}

impl PaletteColor {
    // These are some commonly used colors as palette colors. I don't have Rgb colors as constants
    // because you can just make your required colors yourself when using Rgb colors

    /// Pure black #000000
    pub const BLACK: PaletteColor = Self { id: 0 };
    /// #fcfcfc, the default text scroll color
    pub const WHITE: PaletteColor = Self { id: 3 };
    /// #ff0a00 (almost pure red #ff0000)
    pub const RED: PaletteColor = Self { id: 5 };
    /// #fdfd00 (almost pure yellow #ffff00)
    pub const YELLOW: PaletteColor = Self { id: 13 };
    /// #00fd00 (almost pure green #00ff00)
    pub const GREEN: PaletteColor = Self { id: 21 };
    /// Pure blue #0000ff
    pub const BLUE: PaletteColor = Self { id: 45 };
    /// Pure magenta #ff00ff
    pub const MAGENTA: PaletteColor = Self { id: 53 };
    /// #00fcca (almost cyan #00ffff)
    pub const CYAN: PaletteColor = Self { id: 90 };

    /// Panics if `id` is above 127
    pub fn new(id: u8) -> Self {
        Self::try_new(id).unwrap_or_else(|| panic!("palette color {} out of range", id))
    }

    /// Returns `None` if `id` is above 127
    pub fn try_new(id: u8) -> Option<Self> {
        if id as usize >= crate::palette::PALETTE_SIZE {
            return None;
        }
        Some(Self { id })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    /// The color the device shows for this palette entry
    pub fn display(&self) -> DisplayColor {
        crate::palette::PALETTE[self.id as usize]
    }
}

impl From<PaletteColor> for u8 {
    fn from(color: PaletteColor) -> Self {
        color.id
    }
}

impl TryFrom<u8> for PaletteColor {
    type Error = MidiError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::try_new(id).ok_or(MidiError::UnknownColorIndex(id))
    }
}

/// An RGB color as understood by the MK2: each component goes from 0 to 63.
///
/// Components aren't checked. What the device makes of larger values is up to the device.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What a button was last told to show
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ButtonColor {
    Palette(PaletteColor),
    Rgb(RgbColor),
}

impl ButtonColor {
    /// The palette index, or [`RGB_SENTINEL`] if the color was set directly via RGB
    pub fn index(&self) -> i16 {
        match self {
            Self::Palette(color) => color.id() as i16,
            Self::Rgb(_) => RGB_SENTINEL,
        }
    }

    pub fn palette(&self) -> Option<PaletteColor> {
        match *self {
            Self::Palette(color) => Some(color),
            Self::Rgb(_) => None,
        }
    }
}

impl Default for ButtonColor {
    fn default() -> Self {
        Self::Palette(PaletteColor::BLACK)
    }
}

/// How the MK2 lights a palette color. The discriminant is the status byte of the note message
/// that selects the mode.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Mode {
    /// A straight consistent light
    #[default]
    Static = 144,
    /// On->Off->On->Off->... between the previous color and the new one
    Flash = 145,
    /// A smooth pulse
    Pulse = 146,
}

impl Mode {
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STATIC" => Ok(Self::Static),
            "FLASH" => Ok(Self::Flash),
            "PULSE" => Ok(Self::Pulse),
            _ => Err(()),
        }
    }
}

/// The layouts the MK2 can switch to
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Layout {
    Session = 0,
    User1 = 1,
    User2 = 2,
    Fader = 4,
    Pan = 5,
}

impl Layout {
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

impl FromStr for Layout {
    type Err = MidiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SESSION" => Ok(Self::Session),
            "USER1" => Ok(Self::User1),
            "USER2" => Ok(Self::User2),
            "FADER" => Ok(Self::Fader),
            "PAN" => Ok(Self::Pan),
            other => Err(MidiError::UnknownLayout(other.to_owned())),
        }
    }
}

/// Parameters of a text scroll
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct ScrollOptions {
    pub color: PaletteColor,
    /// Keep scrolling until another scroll message arrives
    pub should_loop: bool,
    /// 1-7
    pub speed: u8,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            color: PaletteColor::WHITE,
            should_loop: false,
            speed: 4,
        }
    }
}

pub(crate) fn encode_palette(note: u8, color: PaletteColor, mode: Mode) -> [u8; 3] {
    [mode.opcode(), note, color.id()]
}

pub(crate) fn encode_rgb(note: u8, color: RgbColor) -> [u8; 12] {
    let [a, b, c, d, e] = SYSEX_HEADER;
    [a, b, c, d, e, 24, 11, note, color.r, color.g, color.b, SYSEX_END]
}

pub(crate) fn encode_light_all(color: PaletteColor) -> [u8; 9] {
    let [a, b, c, d, e] = SYSEX_HEADER;
    [a, b, c, d, e, 24, 14, color.id(), SYSEX_END]
}

pub(crate) fn encode_layout(layout: Layout) -> [u8; 9] {
    let [a, b, c, d, e] = SYSEX_HEADER;
    [a, b, c, d, e, 16, 44, layout.opcode(), SYSEX_END]
}

/// Characters outside of ASCII can't be carried in a SysEx payload and are replaced by `?`
pub(crate) fn encode_scroll_text(text: &str, options: ScrollOptions) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(SYSEX_HEADER.len() + 6 + text.len());
    bytes.extend(SYSEX_HEADER);
    bytes.extend([
        24,
        20,
        options.color.id(),
        options.should_loop as u8,
        options.speed,
    ]);
    bytes.extend(text.chars().map(|c| if c.is_ascii() { c as u8 } else { b'?' }));
    bytes.push(SYSEX_END);
    bytes
}
