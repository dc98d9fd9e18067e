use std::collections::VecDeque;
use std::time::Duration;

use super::Transport;
use crate::MidiError;

/// A transport that records every outgoing message and replays injected incoming ones.
///
/// Useful for testing code built on top of the controller without a device:
/// ```
/// # use launchpad_mk2::{MockTransport, mk2::Controller};
/// let mut controller = Controller::new(MockTransport::new())?;
/// controller.transport_mut().push_incoming(&[144, 11, 64]);
/// controller.poll();
/// # Ok::<(), launchpad_mk2::MidiError>(())
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Vec<Vec<u8>>,
    incoming: VecDeque<Vec<u8>>,
    /// Sends left before every further send fails; `None` never fails
    sends_left: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw message as if the device had sent it
    pub fn push_incoming(&mut self, bytes: &[u8]) {
        self.incoming.push_back(bytes.to_vec());
    }

    /// Let the next `n` sends through, then fail every send after them, like a device that
    /// was unplugged
    pub fn fail_after(&mut self, n: usize) {
        self.sends_left = Some(n);
    }

    /// All messages sent so far, oldest first
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Returns the messages sent so far and forgets them
    pub fn take_sent(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for MockTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        match &mut self.sends_left {
            Some(0) => return Err(midir::SendError::Other("mock transport disconnected").into()),
            Some(n) => *n -= 1,
            None => {}
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.incoming.pop_front()
    }

    fn recv_timeout(&mut self, _timeout: Duration) -> Option<Vec<u8>> {
        self.incoming.pop_front()
    }
}
