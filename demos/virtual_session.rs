//! Runs a session against a virtual device: every message that would go to the Launchpad is
//! logged instead. Try `RUST_LOG=info cargo run --example virtual-session`.

use std::time::{Duration, Instant};

use launchpad_mk2::mk2::{PaletteColor, ScrollOptions};
use launchpad_mk2::{Binding, Command, Config, DeviceConfig, Session, TOGGLE_MODE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config {
        device: DeviceConfig {
            is_virtual: true,
            ..Default::default()
        },
        bindings: vec![
            Binding {
                button: 11,
                notification: "SHOW_ALERT".into(),
                payload: Some("Hello from the Launchpad".into()),
                color: Some(PaletteColor::GREEN.id()),
                mode: Some("FLASH".into()),
            },
            Binding {
                button: 104,
                notification: TOGGLE_MODE.into(),
                color: Some(PaletteColor::MAGENTA.id()),
                ..Default::default()
            },
        ],
    };

    let (sender, receiver) = std::sync::mpsc::channel();
    let mut session = Session::open(&config, sender)?;
    session
        .controller_mut()
        .scroll_text("Hi", ScrollOptions::default())?;

    session.handle_command(Command::Click(11))?;
    session.handle_command(Command::Click(104))?;

    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(1) {
        session.run_once(Duration::from_millis(50))?;
        for notification in receiver.try_iter() {
            println!("{:?}", notification);
        }
    }

    session.handle_command(Command::DarkenAll)?;
    Ok(())
}
