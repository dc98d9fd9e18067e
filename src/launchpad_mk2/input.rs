use log::debug;

/// Note-on, used by the grid buttons
const NOTE_ON: u8 = 0x90;
/// Controller change, used by the top control row
const CONTROL_CHANGE: u8 = 0xB0;

/// A decoded press or release, as sent by the MK2.
///
/// This is the one canonical value both the controller-wide and the per-button listeners are
/// notified from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Message {
    Press { note: u8, velocity: u8 },
    Release { note: u8 },
}

impl Message {
    pub fn note(&self) -> u8 {
        match *self {
            Self::Press { note, .. } | Self::Release { note } => note,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, Self::Press { .. })
    }

    /// What the button itself gets to see of this message
    pub fn button_event(&self) -> ButtonEvent {
        match *self {
            Self::Press { velocity, .. } => ButtonEvent::Press { velocity },
            Self::Release { .. } => ButtonEvent::Release,
        }
    }
}

/// A press or release, as seen by the listeners of a single button
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ButtonEvent {
    Press { velocity: u8 },
    Release,
}

/// Decode a raw incoming message.
///
/// Only three-byte note-on and controller change messages mean anything to the controller: a
/// non-zero velocity is a press, zero is a release. Everything else is ignored and yields `None`.
pub fn decode_message(data: &[u8]) -> Option<Message> {
    match *data {
        [status, note, velocity] if status == NOTE_ON || status == CONTROL_CHANGE => {
            Some(match velocity {
                0 => Message::Release { note },
                velocity => Message::Press { note, velocity },
            })
        }
        _ => {
            debug!("ignoring incoming message {:?}", data);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_and_control_change_decode_to_presses() {
        assert_eq!(
            decode_message(&[144, 11, 64]),
            Some(Message::Press {
                note: 11,
                velocity: 64
            })
        );
        assert_eq!(
            decode_message(&[176, 104, 127]),
            Some(Message::Press {
                note: 104,
                velocity: 127
            })
        );
    }

    #[test]
    fn zero_velocity_is_a_release() {
        assert_eq!(
            decode_message(&[144, 11, 0]),
            Some(Message::Release { note: 11 })
        );
        assert_eq!(
            decode_message(&[176, 111, 0]),
            Some(Message::Release { note: 111 })
        );
    }

    #[test]
    fn everything_else_is_ignored() {
        assert_eq!(decode_message(&[128, 11, 64]), None);
        assert_eq!(decode_message(&[145, 11, 64]), None);
        assert_eq!(decode_message(&[144, 11]), None);
        assert_eq!(decode_message(&[240, 0, 32, 41, 2, 24, 21, 247]), None);
        assert_eq!(decode_message(&[]), None);
    }

    #[test]
    fn button_event_keeps_velocity() {
        let press = Message::Press {
            note: 55,
            velocity: 9,
        };
        assert_eq!(press.note(), 55);
        assert!(press.is_press());
        assert_eq!(press.button_event(), ButtonEvent::Press { velocity: 9 });
        assert_eq!(
            Message::Release { note: 55 }.button_event(),
            ButtonEvent::Release
        );
    }
}
