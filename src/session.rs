//! Glue between a controller, its bindings and the application.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::mk2::{ButtonEvent, Controller, Message, BUTTON_COUNT};
use crate::{Binding, BindingResolver, Config, MidiError, Notification, Scheduler, Transport};

/// How long a simulated click holds the button down
pub const CLICK_RELEASE_DELAY: Duration = Duration::from_millis(300);

/// Requests from the application
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Command {
    /// Turn every light off
    DarkenAll,
    /// Light the bound buttons again, all of them steady
    SetColors,
    /// Press a button without hardware, releasing it again after [`CLICK_RELEASE_DELAY`]
    Click(u8),
}

/// Runs a controller on behalf of an application.
///
/// Every press and release is reported to the application as a [`Notification`] on the next
/// turn. Bound buttons additionally report their binding's notification straight away.
///
/// ```no_run
/// use std::time::Duration;
/// use launchpad_mk2::{Config, Session};
///
/// let (sender, receiver) = std::sync::mpsc::channel();
/// let mut session = Session::open(&Config::default(), sender)?;
/// loop {
///     session.run_once(Duration::from_millis(50))?;
///     for notification in receiver.try_iter() {
///         println!("{:?}", notification);
///     }
/// }
/// # Ok::<(), launchpad_mk2::MidiError>(())
/// ```
pub struct Session<T: Transport + 'static> {
    controller: Controller<T>,
    resolver: BindingResolver,
    scheduler: Scheduler<Controller<T>>,
    outbox: Sender<Notification>,
}

impl Session<Box<dyn Transport>> {
    /// Open the device described by `config` and bind its buttons
    pub fn open(config: &Config, outbox: Sender<Notification>) -> Result<Self, MidiError> {
        let controller = Controller::open(&config.device)?;
        Self::new(controller, config.bindings.clone(), outbox)
    }
}

impl<T: Transport + 'static> Session<T> {
    pub fn new(
        mut controller: Controller<T>,
        bindings: Vec<Binding>,
        outbox: Sender<Notification>,
    ) -> Result<Self, MidiError> {
        let scheduler = Scheduler::new();

        for note in 0..BUTTON_COUNT as u8 {
            let scheduler = scheduler.clone();
            let outbox = outbox.clone();
            if let Some(mut button) = controller.button_mut(note) {
                button.subscribe(move |event| {
                    let notification = match event {
                        ButtonEvent::Press { .. } => Notification::pressed(note),
                        ButtonEvent::Release => Notification::released(note),
                    };
                    let outbox = outbox.clone();
                    scheduler.defer(move |_| deliver(&outbox, notification));
                });
            }
        }

        let resolver = BindingResolver::new(bindings);
        resolver.apply_colors(&mut controller)?;
        info!("session started with {} binding(s)", resolver.bindings().len());

        Ok(Self {
            controller,
            resolver,
            scheduler,
            outbox,
        })
    }

    pub fn controller(&self) -> &Controller<T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<T> {
        &mut self.controller
    }

    /// Handle to the task queue, e.g. to schedule work of your own
    pub fn scheduler(&self) -> &Scheduler<Controller<T>> {
        &self.scheduler
    }

    /// One turn of the event loop: run the tasks that are due, then wait up to `timeout` (less
    /// if a task becomes due earlier) for incoming messages and handle them.
    pub fn run_once(&mut self, timeout: Duration) -> Result<(), MidiError> {
        self.scheduler.run_due(&mut self.controller, Instant::now());

        let wait = match self.scheduler.next_deadline() {
            Some(deadline) => timeout.min(deadline.saturating_duration_since(Instant::now())),
            None => timeout,
        };
        for message in self.controller.poll_timeout(wait) {
            if let Message::Press { note, .. } = message {
                self.react_to_press(note)?;
            }
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: Command) -> Result<(), MidiError> {
        match command {
            Command::DarkenAll => self.controller.dark_all(),
            Command::SetColors => self.resolver.restore_colors(&mut self.controller),
            Command::Click(note) => self.click(note),
        }
    }

    fn click(&mut self, note: u8) -> Result<(), MidiError> {
        if !self.controller.dispatch(Message::Press {
            note,
            velocity: 127,
        }) {
            warn!("can't click button {}, no such button", note);
            return Ok(());
        }

        self.scheduler.schedule(CLICK_RELEASE_DELAY, move |controller| {
            controller.dispatch(Message::Release { note });
        });
        self.react_to_press(note)
    }

    fn react_to_press(&mut self, note: u8) -> Result<(), MidiError> {
        for notification in self.resolver.handle_press(note, &mut self.controller)? {
            deliver(&self.outbox, notification);
        }
        Ok(())
    }
}

fn deliver(outbox: &Sender<Notification>, notification: Notification) {
    if let Err(e) = outbox.send(notification) {
        warn!("application has hung up, dropping {:?}", e.0);
    }
}
