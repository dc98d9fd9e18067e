//! Mapping buttons to application notifications and colors.

use log::warn;

use crate::mk2::{Controller, Mode, PaletteColor};
use crate::{MidiError, Transport};

/// Sent (deferred) for every press of any button
pub const BUTTON_PRESSED: &str = "LAUNCHPAD_BUTTON_PRESSED";
/// Sent (deferred) for every release of any button
pub const BUTTON_RELEASED: &str = "LAUNCHPAD_BUTTON_RELEASED";
/// Bindings with this notification also flip their button between steady and pulsing
pub const TOGGLE_MODE: &str = "LAUNCHPAD_TOGGLE_MODE";

/// Ties a button to a notification, and optionally to a color
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Binding {
    pub button: u8,
    pub notification: String,
    /// Passed along with the notification untouched
    pub payload: Option<String>,
    /// Palette index the button is lit with
    pub color: Option<u8>,
    /// `"STATIC"`, `"FLASH"` or `"PULSE"`; steady if missing. Unknown names leave the button dark.
    pub mode: Option<String>,
}

/// A message for the application, produced by a button press or release
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Notification {
    pub name: String,
    pub button: u8,
    pub payload: Option<String>,
}

impl Notification {
    pub fn pressed(button: u8) -> Self {
        Self {
            name: BUTTON_PRESSED.to_owned(),
            button,
            payload: None,
        }
    }

    pub fn released(button: u8) -> Self {
        Self {
            name: BUTTON_RELEASED.to_owned(),
            button,
            payload: None,
        }
    }
}

/// Applies a list of [`Binding`]s to a controller
#[derive(Debug, Clone, Default)]
pub struct BindingResolver {
    bindings: Vec<Binding>,
}

impl BindingResolver {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Light every bound button that has a color, in its configured mode
    pub fn apply_colors<T: Transport>(
        &self,
        controller: &mut Controller<T>,
    ) -> Result<(), MidiError> {
        for binding in &self.bindings {
            set_color(controller, binding, binding.mode.as_deref().unwrap_or("STATIC"))?;
        }
        Ok(())
    }

    /// Light every bound button that has a color again, steady whatever its configured mode
    pub fn restore_colors<T: Transport>(
        &self,
        controller: &mut Controller<T>,
    ) -> Result<(), MidiError> {
        for binding in &self.bindings {
            set_color(controller, binding, "STATIC")?;
        }
        Ok(())
    }

    /// React to a press of `note`: returns one notification per binding of that button.
    ///
    /// Toggle bindings first switch their button from steady to pulsing, or back.
    pub fn handle_press<T: Transport>(
        &self,
        note: u8,
        controller: &mut Controller<T>,
    ) -> Result<Vec<Notification>, MidiError> {
        let mut notifications = Vec::new();

        for binding in self.bindings.iter().filter(|b| b.button == note) {
            if binding.notification == TOGGLE_MODE {
                let current = match controller.get_button(note) {
                    Some(button) => button.mode(),
                    None => continue,
                };
                let next = if current == Mode::Static { "PULSE" } else { "STATIC" };
                set_color(controller, binding, next)?;
            }

            notifications.push(Notification {
                name: binding.notification.clone(),
                button: binding.button,
                payload: binding.payload.clone(),
            });
        }

        Ok(notifications)
    }
}

fn set_color<T: Transport>(
    controller: &mut Controller<T>,
    binding: &Binding,
    mode: &str,
) -> Result<(), MidiError> {
    let id = match binding.color {
        Some(id) => id,
        None => return Ok(()),
    };
    let color = match PaletteColor::try_new(id) {
        Some(color) => color,
        None => {
            warn!("binding for button {}: no palette color {}", binding.button, id);
            return Ok(());
        }
    };

    match controller.button_mut(binding.button) {
        Some(mut button) => button.set_color_and_mode_named(color, mode),
        None => Ok(()),
    }
}
