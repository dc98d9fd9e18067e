/*!
# Launchpad MK2 API

The Launchpad MK2 has an 8x8 grid of pads, a column of 8 round scene buttons on the right and a
row of 8 round control buttons at the top. Every button is addressed by a note number: the grid
goes from 11 (bottom left) to 88 (top right), the scene buttons are 19, 29, ..., 89 and the top
row is 104..=111.

The [`Controller`] keeps one [`Button`] for every note from 0 to 149, whether or not there's a
physical button behind it, so looking a button up never fails for a note inside that range.
*/

use std::time::Duration;

use log::{debug, error};

mod input;
pub use input::*;

mod output;
pub use output::*;
use output::{encode_layout, encode_light_all, encode_scroll_text};

mod button;
pub use button::*;

use crate::{DeviceConfig, MidiError, MidiTransport, Transport, VirtualTransport};

/// Number of addressable buttons
pub const BUTTON_COUNT: usize = 150;

impl Button {
    pub const UP: u8 = 104;
    pub const DOWN: u8 = 105;
    pub const LEFT: u8 = 106;
    pub const RIGHT: u8 = 107;
    pub const SESSION: u8 = 108;
    pub const USER_1: u8 = 109;
    pub const USER_2: u8 = 110;
    pub const MIXER: u8 = 111;
}

/// A press or release, as seen by the controller-wide listeners
#[derive(Debug, Copy, Clone)]
pub enum ControllerEvent<'a> {
    Press { button: &'a Button, velocity: u8 },
    Release { button: &'a Button },
}

impl<'a> ControllerEvent<'a> {
    pub fn button(&self) -> &'a Button {
        match *self {
            Self::Press { button, .. } | Self::Release { button } => button,
        }
    }
}

type ControllerListener = Box<dyn FnMut(&ControllerEvent<'_>)>;

/// Owns the buttons of one Launchpad MK2 and the transport to it.
///
/// Incoming messages are decoded on the thread that owns the controller, whenever
/// [`poll`](Self::poll) or [`poll_timeout`](Self::poll_timeout) is called. Each press or release
/// is handed to the controller-wide listeners first and then to the listeners of the button
/// itself, from the same decoded [`Message`].
///
/// ```no_run
/// use launchpad_mk2::{mk2::{Controller, ControllerEvent, PaletteColor}, VirtualTransport};
///
/// let mut controller = Controller::new(VirtualTransport::new())?;
/// controller.subscribe(|event| {
///     if let ControllerEvent::Press { button, velocity } = event {
///         println!("{} pressed with velocity {}", button.note(), velocity);
///     }
/// });
/// controller.scroll_text("Hello!", Default::default())?;
/// if let Some(mut button) = controller.button_mut(11) {
///     button.pulse_color(PaletteColor::MAGENTA)?;
/// }
/// # Ok::<(), launchpad_mk2::MidiError>(())
/// ```
pub struct Controller<T: Transport> {
    transport: T,
    buttons: Vec<Button>,
    listeners: Vec<ControllerListener>,
}

impl Controller<Box<dyn Transport>> {
    /// Open the transport described by `config`: either the numbered hardware ports, or a virtual
    /// device that logs instead of sending.
    pub fn open(config: &DeviceConfig) -> Result<Self, MidiError> {
        let transport: Box<dyn Transport> = if config.is_virtual {
            Box::new(VirtualTransport::new())
        } else {
            Box::new(MidiTransport::open(config.in_port, config.out_port)?)
        };
        Self::new(transport)
    }
}

impl<T: Transport> Controller<T> {
    /// Take over `transport` and blank the whole device, so it starts out in a known state
    /// whatever it showed before.
    pub fn new(transport: T) -> Result<Self, MidiError> {
        let mut self_ = Self {
            transport,
            buttons: (0..BUTTON_COUNT as u8).map(Button::new).collect(),
            listeners: Vec::new(),
        };
        self_.light_all(PaletteColor::BLACK)?;
        Ok(self_)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Get notified whenever any button is pressed or released
    pub fn subscribe(&mut self, listener: impl FnMut(&ControllerEvent<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// All buttons in ascending note order
    pub fn buttons(&self) -> impl Iterator<Item = &Button> + '_ {
        self.buttons.iter()
    }

    /// Returns `None` (and logs) if there is no button with that note
    pub fn get_button(&self, note: u8) -> Option<&Button> {
        let button = self.buttons.get(note as usize);
        if button.is_none() {
            error!("Cannot find button at position {}", note);
        }
        button
    }

    /// Returns `None` (and logs) if there is no button with that note
    pub fn button_mut(&mut self, note: u8) -> Option<ButtonMut<'_, T>> {
        let transport = &mut self.transport;
        match self.buttons.get_mut(note as usize) {
            Some(button) => Some(ButtonMut { button, transport }),
            None => {
                error!("Cannot find button at position {}", note);
                None
            }
        }
    }

    fn control_button(&mut self, note: u8) -> ButtonMut<'_, T> {
        ButtonMut {
            button: &mut self.buttons[note as usize],
            transport: &mut self.transport,
        }
    }

    pub fn up(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::UP)
    }

    pub fn down(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::DOWN)
    }

    pub fn left(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::LEFT)
    }

    pub fn right(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::RIGHT)
    }

    pub fn session(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::SESSION)
    }

    pub fn user1(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::USER_1)
    }

    pub fn user2(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::USER_2)
    }

    pub fn mixer(&mut self) -> ButtonMut<'_, T> {
        self.control_button(Button::MIXER)
    }

    /// Light every button with the same palette color, using a single message
    pub fn light_all(&mut self, color: PaletteColor) -> Result<(), MidiError> {
        for button in &mut self.buttons {
            button.remember_palette(color, Mode::Static);
        }
        self.transport.send(&encode_light_all(color))
    }

    /// Light every button with the same RGB color.
    ///
    /// This sends one message per button, in ascending note order. The device shows the change
    /// button by button.
    pub fn light_all_rgb(&mut self, color: RgbColor) -> Result<(), MidiError> {
        for button in &mut self.buttons {
            ButtonMut {
                button,
                transport: &mut self.transport,
            }
            .set_rgb_color(color)?;
        }
        Ok(())
    }

    /// Darken every button, one message per button in ascending note order
    pub fn dark_all(&mut self) -> Result<(), MidiError> {
        for button in &mut self.buttons {
            ButtonMut {
                button,
                transport: &mut self.transport,
            }
            .darken()?;
        }
        Ok(())
    }

    pub fn set_layout(&mut self, layout: Layout) -> Result<(), MidiError> {
        self.transport.send(&encode_layout(layout))
    }

    /// Switch to a layout given by name (`"SESSION"`, `"USER1"`, `"USER2"`, `"FADER"` or
    /// `"PAN"`). Unknown names are rejected and nothing is sent.
    pub fn set_layout_named(&mut self, layout: &str) -> Result<(), MidiError> {
        self.set_layout(layout.parse()?)
    }

    /// Scroll `text` across the grid. Non-ASCII characters show up as `?`.
    ///
    /// ```no_run
    /// # use launchpad_mk2::mk2::{ScrollOptions, PaletteColor};
    /// # let mut controller: launchpad_mk2::mk2::Controller<launchpad_mk2::VirtualTransport> = unimplemented!();
    /// controller.scroll_text("Hello!", ScrollOptions {
    ///     color: PaletteColor::new(23),
    ///     should_loop: true,
    ///     speed: 5,
    /// })?;
    /// # Ok::<(), launchpad_mk2::MidiError>(())
    /// ```
    pub fn scroll_text(&mut self, text: &str, options: ScrollOptions) -> Result<(), MidiError> {
        self.transport.send(&encode_scroll_text(text, options))
    }

    /// Notify the controller-wide listeners and then the button's own listeners of `message`.
    ///
    /// Returns `false` if there's no button for the message's note, in which case nobody is
    /// notified.
    pub fn dispatch(&mut self, message: Message) -> bool {
        let button = match self.buttons.get_mut(message.note() as usize) {
            Some(button) => button,
            None => {
                debug!("ignoring {:?}, no such button", message);
                return false;
            }
        };

        let event = match message {
            Message::Press { velocity, .. } => ControllerEvent::Press {
                button: &*button,
                velocity,
            },
            Message::Release { .. } => ControllerEvent::Release { button: &*button },
        };
        for listener in &mut self.listeners {
            listener(&event);
        }

        button.emit(message.button_event());
        true
    }

    /// Decode and dispatch one raw incoming message. Returns the message if it was dispatched.
    pub fn handle_raw(&mut self, data: &[u8]) -> Option<Message> {
        let message = decode_message(data)?;
        if self.dispatch(message) {
            Some(message)
        } else {
            None
        }
    }

    /// Handle every incoming message that's currently pending. This function does not block.
    ///
    /// Returns the messages that were dispatched, in the order they arrived.
    pub fn poll(&mut self) -> Vec<Message> {
        let mut messages = Vec::new();
        while let Some(data) = self.transport.try_recv() {
            messages.extend(self.handle_raw(&data));
        }
        messages
    }

    /// Like [`poll`](Self::poll), but waits up to `timeout` for the first message to arrive
    pub fn poll_timeout(&mut self, timeout: Duration) -> Vec<Message> {
        let mut messages = Vec::new();
        if let Some(data) = self.transport.recv_timeout(timeout) {
            messages.extend(self.handle_raw(&data));
            messages.extend(self.poll());
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::MockTransport;

    fn controller() -> Controller<MockTransport> {
        let mut controller = Controller::new(MockTransport::new()).unwrap();
        controller.transport_mut().take_sent();
        controller
    }

    #[test]
    fn starts_with_a_blackout() {
        let controller = Controller::new(MockTransport::new()).unwrap();
        assert_eq!(
            controller.transport().sent(),
            [vec![240, 0, 32, 41, 2, 24, 14, 0, 247]]
        );
        assert_eq!(controller.buttons().count(), BUTTON_COUNT);
        assert!(controller
            .buttons()
            .enumerate()
            .all(|(i, button)| button.note() as usize == i));
    }

    #[test]
    fn set_color_stores_and_sends_static() {
        let mut controller = controller();
        for c in 0..=127 {
            let mut button = controller.button_mut(11).unwrap();
            button.set_color(PaletteColor::new(c)).unwrap();
            assert_eq!(button.color().index(), c as i16);
            assert_eq!(button.mode(), Mode::Static);
            assert_eq!(controller.transport_mut().take_sent(), [vec![144, 11, c]]);
        }
    }

    #[test]
    fn set_color_and_mode_follows_the_mode() {
        let mut controller = controller();
        let mut button = controller.button_mut(42).unwrap();
        button.set_color_and_mode(PaletteColor::new(5), Mode::Pulse).unwrap();
        button.set_color_and_mode(PaletteColor::new(7), Mode::Flash).unwrap();
        assert_eq!(button.color(), ButtonColor::Palette(PaletteColor::new(7)));
        assert_eq!(button.mode(), Mode::Flash);
        assert_eq!(
            controller.transport().sent(),
            [vec![146, 42, 5], vec![145, 42, 7]]
        );
    }

    #[test]
    fn unknown_mode_name_is_a_silent_no_op() {
        let mut controller = controller();
        let mut button = controller.button_mut(42).unwrap();
        button.pulse_color(PaletteColor::RED).unwrap();
        button
            .set_color_and_mode_named(PaletteColor::GREEN, "BOGUS")
            .unwrap();
        assert_eq!(button.color(), ButtonColor::Palette(PaletteColor::RED));
        assert_eq!(button.mode(), Mode::Pulse);

        button
            .set_color_and_mode_named(PaletteColor::GREEN, "FLASH")
            .unwrap();
        assert_eq!(button.mode(), Mode::Flash);
        assert_eq!(
            controller.transport().sent(),
            [vec![146, 42, 5], vec![145, 42, 21]]
        );
    }

    #[test]
    fn rgb_and_darken() {
        let mut controller = controller();
        let mut button = controller.button_mut(81).unwrap();
        button.flash_color(PaletteColor::BLUE).unwrap();
        button.set_rgb_color(RgbColor::new(63, 0, 10)).unwrap();
        assert_eq!(button.color().index(), RGB_SENTINEL);
        assert_eq!(button.mode(), Mode::Flash);

        button.darken().unwrap();
        assert_eq!(button.color().index(), 0);
        assert_eq!(
            controller.transport().sent(),
            [
                vec![145, 81, 45],
                vec![240, 0, 32, 41, 2, 24, 11, 81, 63, 0, 10, 247],
                vec![144, 81, 0],
            ]
        );
    }

    #[test]
    fn light_all_rgb_fans_out_in_note_order() {
        let mut controller = controller();
        controller.light_all_rgb(RgbColor::new(10, 20, 30)).unwrap();
        let sent = controller.transport_mut().take_sent();
        assert_eq!(sent.len(), BUTTON_COUNT);
        for (note, msg) in sent.iter().enumerate() {
            assert_eq!(
                msg,
                &vec![240, 0, 32, 41, 2, 24, 11, note as u8, 10, 20, 30, 247]
            );
        }
        assert!(controller
            .buttons()
            .all(|button| button.color().index() == RGB_SENTINEL));
    }

    #[test]
    fn failed_blackout_fails_construction() {
        let mut transport = MockTransport::new();
        transport.fail_after(0);
        assert!(matches!(
            Controller::new(transport),
            Err(MidiError::SendError(_))
        ));
    }

    #[test]
    fn fan_out_stops_at_the_first_failed_send() {
        let mut controller = controller();
        controller.transport_mut().fail_after(10);

        assert!(matches!(
            controller.light_all_rgb(RgbColor::new(1, 2, 3)),
            Err(MidiError::SendError(_))
        ));
        let sent = controller.transport_mut().take_sent();
        assert_eq!(sent.len(), 10);
        assert_eq!(sent[9], [240, 0, 32, 41, 2, 24, 11, 9, 1, 2, 3, 247]);
        // the button whose send failed already holds the new color, later ones don't
        assert_eq!(controller.get_button(10).unwrap().color().index(), RGB_SENTINEL);
        assert_eq!(controller.get_button(11).unwrap().color().index(), 0);

        assert!(controller.dark_all().is_err());
        assert!(controller.transport().sent().is_empty());
    }

    #[test]
    fn dark_all_fans_out_in_note_order() {
        let mut controller = controller();
        controller.dark_all().unwrap();
        let sent = controller.transport_mut().take_sent();
        let expected: Vec<Vec<u8>> = (0..BUTTON_COUNT as u8).map(|n| vec![144, n, 0]).collect();
        assert_eq!(sent, expected);
    }

    #[test]
    fn light_all_is_one_message() {
        let mut controller = controller();
        controller.button_mut(11).unwrap().pulse_color(PaletteColor::new(9)).unwrap();
        controller.light_all(PaletteColor::new(23)).unwrap();
        assert_eq!(
            controller.transport_mut().take_sent()[1..],
            [vec![240, 0, 32, 41, 2, 24, 14, 23, 247]]
        );
        let button = controller.get_button(11).unwrap();
        assert_eq!(button.color().index(), 23);
        assert_eq!(button.mode(), Mode::Static);
    }

    #[test]
    fn layouts() {
        let mut controller = controller();
        controller.set_layout(Layout::User2).unwrap();
        controller.set_layout_named("PAN").unwrap();
        assert!(matches!(
            controller.set_layout_named("NOTE"),
            Err(MidiError::UnknownLayout(_))
        ));
        assert_eq!(
            controller.transport().sent(),
            [
                vec![240, 0, 32, 41, 2, 16, 44, 2, 247],
                vec![240, 0, 32, 41, 2, 16, 44, 5, 247],
            ]
        );
    }

    #[test]
    fn scroll_text_with_defaults() {
        let mut controller = controller();
        controller.scroll_text("Hi", ScrollOptions::default()).unwrap();
        assert_eq!(
            controller.transport().sent(),
            [vec![240, 0, 32, 41, 2, 24, 20, 3, 0, 4, 72, 105, 247]]
        );
    }

    #[test]
    fn out_of_range_lookups_are_absent() {
        let mut controller = controller();
        assert!(controller.get_button(200).is_none());
        assert!(controller.get_button(150).is_none());
        assert!(controller.button_mut(149).is_some());
        assert!(controller.button_mut(150).is_none());
        assert!(controller.transport().sent().is_empty());
    }

    #[test]
    fn control_row_accessors() {
        let mut controller = controller();
        assert_eq!(controller.up().note(), 104);
        assert_eq!(controller.down().note(), 105);
        assert_eq!(controller.left().note(), 106);
        assert_eq!(controller.right().note(), 107);
        assert_eq!(controller.session().note(), 108);
        assert_eq!(controller.user1().note(), 109);
        assert_eq!(controller.user2().note(), 110);
        assert_eq!(controller.mixer().note(), 111);
        controller.mixer().set_color(PaletteColor::CYAN).unwrap();
        assert_eq!(controller.transport().sent(), [vec![144, 111, 90]]);
    }

    #[test]
    fn press_and_release_reach_both_listener_lists() {
        let mut controller = controller();
        let log = Rc::new(RefCell::new(Vec::new()));

        let controller_log = log.clone();
        controller.subscribe(move |event| {
            let entry = match event {
                ControllerEvent::Press { button, velocity } => {
                    format!("controller press {} {}", button.note(), velocity)
                }
                ControllerEvent::Release { button } => {
                    format!("controller release {}", button.note())
                }
            };
            controller_log.borrow_mut().push(entry);
        });
        let button_log = log.clone();
        controller.button_mut(11).unwrap().subscribe(move |event| {
            button_log.borrow_mut().push(format!("button {:?}", event));
        });

        controller.transport_mut().push_incoming(&[144, 11, 64]);
        controller.transport_mut().push_incoming(&[144, 11, 0]);
        let messages = controller.poll();

        assert_eq!(
            messages,
            [
                Message::Press {
                    note: 11,
                    velocity: 64
                },
                Message::Release { note: 11 },
            ]
        );
        assert_eq!(
            *log.borrow(),
            [
                "controller press 11 64",
                "button Press { velocity: 64 }",
                "controller release 11",
                "button Release",
            ]
        );
    }

    #[test]
    fn control_change_only_reaches_its_own_button() {
        let mut controller = controller();
        let hits = Rc::new(RefCell::new(Vec::new()));
        for note in [11, 104] {
            let hits = hits.clone();
            controller
                .button_mut(note)
                .unwrap()
                .subscribe(move |_| hits.borrow_mut().push(note));
        }

        assert!(controller.handle_raw(&[176, 104, 127]).is_some());
        assert_eq!(*hits.borrow(), [104]);
    }

    #[test]
    fn unrecognized_messages_are_ignored() {
        let mut controller = controller();
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        controller.subscribe(move |_| *counter.borrow_mut() += 1);

        assert_eq!(controller.handle_raw(&[128, 11, 64]), None);
        assert_eq!(controller.handle_raw(&[144, 200, 64]), None);
        assert_eq!(controller.handle_raw(&[240, 0, 32, 41, 2, 24, 21, 247]), None);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn poll_timeout_drains_everything_pending() {
        let mut controller = controller();
        assert!(controller.poll_timeout(Duration::from_millis(1)).is_empty());

        controller.transport_mut().push_incoming(&[144, 11, 1]);
        controller.transport_mut().push_incoming(&[1, 2, 3]);
        controller.transport_mut().push_incoming(&[176, 108, 0]);
        assert_eq!(
            controller.poll_timeout(Duration::from_millis(1)),
            [
                Message::Press {
                    note: 11,
                    velocity: 1
                },
                Message::Release { note: 108 },
            ]
        );
    }
}
