/*!
Drive a Novation Launchpad MK2: decode its button presses, light its buttons, and bind buttons
to application notifications.

# Low-level access

The [`mk2::Controller`] owns all 150 addressable buttons of the device and the [`Transport`]
to it. Every lighting method corresponds to exactly one MIDI message (unless noted otherwise in
the documentation), sent right away. There's no acknowledgement from the device and nothing is
retried.

```no_run
use launchpad_mk2::{mk2::{Controller, Layout, PaletteColor, RgbColor}, MidiTransport};

let mut controller = Controller::new(MidiTransport::open(0, 1)?)?;
controller.set_layout(Layout::Session)?;

if let Some(mut button) = controller.button_mut(11) {
    button.flash_color(PaletteColor::RED)?;
}
controller.up().set_rgb_color(RgbColor::new(0, 63, 20))?;
# Ok::<(), launchpad_mk2::MidiError>(())
```

Incoming messages are decoded when you call [`mk2::Controller::poll`]. Listeners can be
subscribed for the whole controller or for a single button; both are notified from the same
decoded message.

# Bindings

A [`Session`] wraps a controller with a list of [`Binding`]s and reports presses to the
application as [`Notification`]s through a channel. Without hardware, set
[`DeviceConfig::is_virtual`] and outgoing messages are logged instead of sent.
*/

mod errors;
pub use errors::*;

mod midi_io;
pub use midi_io::*;

pub mod palette;

pub mod launchpad_mk2;
pub use launchpad_mk2 as mk2;

mod config;
pub use config::*;

mod bindings;
pub use bindings::*;

mod scheduler;
pub use scheduler::*;

mod session;
pub use session::*;

pub mod prelude {
    pub use crate::midi_io::Transport;
    pub use crate::mk2::{Controller, Mode, PaletteColor, RgbColor};
}

/// Identifier used for e.g. the midi port names etc.
const APPLICATION_NAME: &str = "Launchpad MK2";
