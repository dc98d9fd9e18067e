use std::ops::Deref;

use log::debug;

use super::output::{encode_palette, encode_rgb};
use super::{ButtonColor, ButtonEvent, Mode, PaletteColor, RgbColor};
use crate::{MidiError, Transport};

type ButtonListener = Box<dyn FnMut(ButtonEvent)>;

/// One pad or round button of the MK2, addressed by its note number.
///
/// A button remembers what it was last told to show. Only the controller owns buttons; to
/// change one, borrow it mutably via [`Controller::button_mut`](super::Controller::button_mut).
pub struct Button {
    note: u8,
    color: ButtonColor,
    mode: Mode,
    listeners: Vec<ButtonListener>,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("note", &self.note)
            .field("color", &self.color)
            .field("mode", &self.mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Button {
    pub(crate) fn new(note: u8) -> Self {
        Self {
            note,
            color: ButtonColor::default(),
            mode: Mode::Static,
            listeners: Vec::new(),
        }
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn color(&self) -> ButtonColor {
        self.color
    }

    /// Only meaningful while [`color`](Self::color) is a palette color
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn emit(&mut self, event: ButtonEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub(crate) fn remember_palette(&mut self, color: PaletteColor, mode: Mode) {
        self.color = ButtonColor::Palette(color);
        self.mode = mode;
    }
}

/// A button borrowed together with the transport it talks through.
///
/// Every lighting method changes the stored state and sends exactly one message right away.
pub struct ButtonMut<'a, T: Transport> {
    pub(crate) button: &'a mut Button,
    pub(crate) transport: &'a mut T,
}

impl<T: Transport> Deref for ButtonMut<'_, T> {
    type Target = Button;

    fn deref(&self) -> &Button {
        self.button
    }
}

impl<T: Transport> ButtonMut<'_, T> {
    /// Get notified whenever this button is pressed or released
    pub fn subscribe(&mut self, listener: impl FnMut(ButtonEvent) + 'static) {
        self.button.listeners.push(Box::new(listener));
    }

    /// Set a `color` with a certain `mode`.
    ///
    /// For example to start a yellow pulse:
    /// ```no_run
    /// # use launchpad_mk2::mk2::{Controller, Mode, PaletteColor};
    /// # let mut controller: Controller<launchpad_mk2::VirtualTransport> = unimplemented!();
    /// if let Some(mut button) = controller.button_mut(11) {
    ///     button.set_color_and_mode(PaletteColor::YELLOW, Mode::Pulse)?;
    /// }
    /// # Ok::<(), launchpad_mk2::MidiError>(())
    /// ```
    pub fn set_color_and_mode(&mut self, color: PaletteColor, mode: Mode) -> Result<(), MidiError> {
        self.button.remember_palette(color, mode);
        self.transport
            .send(&encode_palette(self.button.note, color, mode))
    }

    /// Like [`set_color_and_mode`](Self::set_color_and_mode), with the mode given by name
    /// (`"STATIC"`, `"FLASH"` or `"PULSE"`).
    ///
    /// An unknown mode name leaves the button alone: nothing is stored and nothing is sent.
    pub fn set_color_and_mode_named(
        &mut self,
        color: PaletteColor,
        mode: &str,
    ) -> Result<(), MidiError> {
        match mode.parse::<Mode>() {
            Ok(mode) => self.set_color_and_mode(color, mode),
            Err(()) => {
                debug!("button {}: ignoring unknown mode {:?}", self.button.note, mode);
                Ok(())
            }
        }
    }

    /// Plain, steady light. Also puts the stored mode back to [`Mode::Static`].
    pub fn set_color(&mut self, color: PaletteColor) -> Result<(), MidiError> {
        self.set_color_and_mode(color, Mode::Static)
    }

    /// Shorthand for `set_color_and_mode(color, Mode::Flash)`
    pub fn flash_color(&mut self, color: PaletteColor) -> Result<(), MidiError> {
        self.set_color_and_mode(color, Mode::Flash)
    }

    /// Shorthand for `set_color_and_mode(color, Mode::Pulse)`
    pub fn pulse_color(&mut self, color: PaletteColor) -> Result<(), MidiError> {
        self.set_color_and_mode(color, Mode::Pulse)
    }

    /// Light the button with an arbitrary color. Each component goes up to 63.
    ///
    /// This uses a SysEx message. The stored mode is left as it was.
    pub fn set_rgb_color(&mut self, color: RgbColor) -> Result<(), MidiError> {
        self.button.color = ButtonColor::Rgb(color);
        self.transport.send(&encode_rgb(self.button.note, color))
    }

    /// Turn the light off, whatever mode it was in
    pub fn darken(&mut self) -> Result<(), MidiError> {
        self.set_color(PaletteColor::BLACK)
    }
}
