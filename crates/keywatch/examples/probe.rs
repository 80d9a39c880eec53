//! Live keyboard probe: prints the tracked snapshot as keys change.
//!
//! Run in a terminal that supports the keyboard enhancement protocol to see
//! releases and bare modifier keys. Press Escape to exit.

use std::io::{self, Write};

use keywatch::backend::crossterm::watch;

fn main() -> keywatch::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let (mut session, mut watcher, updates) = watch()?;
    print!("hold keys to see tracked state; press Escape to exit\r\n");
    io::stdout().flush()?;

    for snap in updates {
        let keys: Vec<&str> = snap.pressed().iter().map(|t| t.as_str()).collect();
        let mods = snap.modifiers();
        print!(
            "keys: {:?}  control: {}  shift: {}  alt: {}  meta: {}\r\n",
            keys, mods.control, mods.shift, mods.alt, mods.meta
        );
        io::stdout().flush()?;
        if snap.is_pressed("escape") {
            break;
        }
    }

    watcher.stop();
    session.stop()?;
    Ok(())
}
