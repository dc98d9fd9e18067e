use std::time::Duration;

use log::info;

use super::Transport;
use crate::MidiError;

/// A stand-in for the device when there's no hardware attached.
///
/// Nothing ever arrives on the input side, and outgoing messages are logged instead of sent.
#[derive(Debug, Default)]
pub struct VirtualTransport;

impl VirtualTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for VirtualTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        info!("[virtual] {:?}", bytes);
        Ok(())
    }

    fn try_recv(&mut self) -> Option<Vec<u8>> {
        None
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<u8>> {
        // behave like an idle device instead of returning immediately
        std::thread::sleep(timeout);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_receives_and_accepts_everything() {
        let mut transport = VirtualTransport::new();
        assert!(transport.send(&[144, 11, 5]).is_ok());
        assert!(transport.send(&[240, 0, 32, 41, 2, 24, 14, 0, 247]).is_ok());
        assert_eq!(transport.try_recv(), None);
        assert_eq!(transport.recv_timeout(Duration::from_millis(1)), None);
    }
}
