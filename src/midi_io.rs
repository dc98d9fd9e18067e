use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use log::{info, trace, warn};
use midir::{MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

use crate::errors::PortDirection;
use crate::MidiError;

mod mock;
pub use mock::*;

mod virtual_device;
pub use virtual_device::*;

/// A bidirectional channel of raw MIDI messages.
///
/// Outgoing messages are fire-and-forget: `send` either hands the bytes to the device or fails,
/// there's no acknowledgement. Incoming messages are buffered until the owner picks them up with
/// `try_recv` or `recv_timeout`, so they are always decoded on the owner's thread.
pub trait Transport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError>;

    /// If there is a pending incoming message, return that. Otherwise, return `None`.
    ///
    /// This function does not block.
    fn try_recv(&mut self) -> Option<Vec<u8>>;

    /// Receives a single incoming message. If no message arrives within `timeout`, `None` is
    /// returned.
    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        (**self).send(bytes)
    }

    fn try_recv(&mut self) -> Option<Vec<u8>> {
        (**self).try_recv()
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<u8>> {
        (**self).recv_timeout(timeout)
    }
}

fn port_by_index<T: midir::MidiIO>(
    midi_io: &T,
    index: usize,
    direction: PortDirection,
) -> Result<T::Port, MidiError> {
    let port = midi_io
        .ports()
        .into_iter()
        .nth(index)
        .ok_or(MidiError::NoPortFound { index, direction })?;

    info!(
        "opening MIDI {:?} port {}: {}",
        direction,
        index,
        midi_io.port_name(&port)?
    );

    Ok(port)
}

/// The transport to a real device, bound to a numbered pair of MIDI ports.
///
/// The connection to the device gets closed when this object goes out of scope.
pub struct MidiTransport {
    // never used explicitly, but dropping it would close the input port
    _input: MidiInputConnection<()>,
    output: MidiOutputConnection,
    receiver: Receiver<Vec<u8>>,
}

impl MidiTransport {
    const MIDI_CONNECTION_NAME: &'static str = "Launchpad MK2 controller";

    /// Open input port number `in_port` and output port number `out_port`.
    ///
    /// Port numbers are positions in the list the MIDI backend reports. Any failure here is
    /// final; nothing is retried.
    pub fn open(in_port: usize, out_port: usize) -> Result<Self, MidiError> {
        let midi_input = MidiInput::new(crate::APPLICATION_NAME)?;
        let port = port_by_index(&midi_input, in_port, PortDirection::Input)?;

        let (sender, receiver) = std::sync::mpsc::channel();
        let midir_callback = move |_timestamp: u64, data: &[u8], _: &mut ()| {
            if sender.send(data.to_vec()).is_err() {
                warn!("dropping incoming message {:?}, receiver has hung up", data);
            }
        };
        let input = midi_input.connect(&port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

        let midi_output = MidiOutput::new(crate::APPLICATION_NAME)?;
        let port = port_by_index(&midi_output, out_port, PortDirection::Output)?;
        let output = midi_output.connect(&port, Self::MIDI_CONNECTION_NAME)?;

        Ok(Self {
            _input: input,
            output,
            receiver,
        })
    }
}

impl Transport for MidiTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        trace!("-> {:?}", bytes);
        self.output.send(bytes)?;
        Ok(())
    }

    fn try_recv(&mut self) -> Option<Vec<u8>> {
        match self.receiver.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("MIDI input has hung up");
                None
            }
        }
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Option<Vec<u8>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("MIDI input has hung up");
                None
            }
        }
    }
}
