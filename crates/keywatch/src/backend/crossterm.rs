//! Crossterm-backed terminal input surface.
//!
//! Terminals only report key releases and bare modifier keys when the
//! keyboard enhancement protocol is active, so [`Session`] pushes the
//! relevant flags alongside raw mode and focus-change reporting.

use std::{io, sync::mpsc, thread};

use crossterm::{
    event as cevent,
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use scopeguard::{ScopeGuard, guard};

use crate::{
    error::Result,
    event::{Event, KeyAction, KeyEvent},
    snapshot::Snapshot,
    watch::Watcher,
};

/// Guard that pairs acquisition and release of the terminal input surface.
#[derive(Debug)]
pub struct Session {
    /// Whether the session still holds the terminal.
    active: bool,
}

impl Session {
    /// Acquire the terminal: raw mode, keyboard enhancement flags, and
    /// focus-change reporting. Steps already taken are unwound if a later
    /// one fails.
    pub fn start() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let raw = guard((), |()| {
            drop(terminal::disable_raw_mode());
        });
        execute!(
            io::stderr(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            ),
            EnableFocusChange
        )?;
        ScopeGuard::into_inner(raw);
        Ok(Self { active: true })
    }

    /// Release the terminal if the session is still active. Stopping an
    /// already-stopped session is a no-op.
    pub fn stop(&mut self) -> Result<()> {
        if self.active {
            execute!(io::stderr(), PopKeyboardEnhancementFlags, DisableFocusChange)?;
            terminal::disable_raw_mode()?;
            self.active = false;
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        drop(self.stop());
    }
}

/// Map a crossterm key code to the raw key name fed to the tracker. Codes
/// the tracker has no name for yield None.
fn key_name(code: cevent::KeyCode) -> Option<String> {
    use cevent::{KeyCode, ModifierKeyCode};
    Some(match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Left => "ArrowLeft".into(),
        KeyCode::Right => "ArrowRight".into(),
        KeyCode::Up => "ArrowUp".into(),
        KeyCode::Down => "ArrowDown".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Insert => "Insert".into(),
        KeyCode::Esc => "Escape".into(),
        KeyCode::CapsLock => "CapsLock".into(),
        KeyCode::ScrollLock => "ScrollLock".into(),
        KeyCode::NumLock => "NumLock".into(),
        KeyCode::PrintScreen => "PrintScreen".into(),
        KeyCode::Pause => "Pause".into(),
        KeyCode::Menu => "Menu".into(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control".into(),
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift".into(),
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt".into(),
            ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta
            | ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper => "Meta".into(),
            _ => return None,
        },
        _ => return None,
    })
}

/// Translate a crossterm event into a tracker event. Events the tracker has
/// no use for yield None.
fn translate(event: cevent::Event) -> Option<Event> {
    match event {
        cevent::Event::Key(k) => {
            let action = match k.kind {
                cevent::KeyEventKind::Press => KeyAction::Press,
                cevent::KeyEventKind::Repeat => KeyAction::Repeat,
                cevent::KeyEventKind::Release => KeyAction::Release,
            };
            let Some(name) = key_name(k.code) else {
                tracing::trace!("no key name for {:?}", k.code);
                return None;
            };
            Some(Event::Key(KeyEvent::new(name, action)))
        }
        cevent::Event::FocusGained => Some(Event::FocusGained),
        cevent::Event::FocusLost => Some(Event::FocusLost),
        _ => None,
    }
}

/// Thread entry that forwards terminal events into the channel. The thread
/// exits when the receiver is dropped or the terminal read fails.
pub fn spawn_emitter(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        loop {
            match cevent::read() {
                Ok(evt) => {
                    let Some(evt) = translate(evt) else { continue };
                    if tx.send(evt).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::error!("terminal event read error: {}", e);
                    return;
                }
            }
        }
    });
}

/// Acquire the terminal and wire a watcher to its key events. Returns the
/// session guard, the watcher, and the snapshot updates channel.
pub fn watch() -> Result<(Session, Watcher, mpsc::Receiver<Snapshot>)> {
    let session = Session::start()?;
    let (event_tx, event_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    spawn_emitter(event_tx);
    let watcher = Watcher::spawn(event_rx, update_tx);
    Ok((session, watcher, update_rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_cover_common_keys() {
        use cevent::KeyCode;
        assert_eq!(key_name(KeyCode::Char('A')).unwrap(), "A");
        assert_eq!(key_name(KeyCode::Char(' ')).unwrap(), "Space");
        assert_eq!(key_name(KeyCode::Esc).unwrap(), "Escape");
        assert_eq!(key_name(KeyCode::F(5)).unwrap(), "F5");
        assert_eq!(key_name(KeyCode::Media(cevent::MediaKeyCode::Play)), None);
    }

    #[test]
    fn modifier_keys_collapse_left_and_right() {
        use cevent::{KeyCode, ModifierKeyCode};
        for side in [ModifierKeyCode::LeftControl, ModifierKeyCode::RightControl] {
            assert_eq!(key_name(KeyCode::Modifier(side)).unwrap(), "Control");
        }
        assert_eq!(
            key_name(KeyCode::Modifier(ModifierKeyCode::LeftSuper)).unwrap(),
            "Meta"
        );
    }

    #[test]
    fn translate_forwards_the_event_kind() {
        use cevent::{KeyCode, KeyEventKind, KeyModifiers};
        let raw = cevent::Event::Key(cevent::KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        let Some(Event::Key(ev)) = translate(raw) else {
            panic!("expected a key event");
        };
        assert_eq!(ev.key, "a");
        assert_eq!(ev.action, KeyAction::Release);
    }

    #[test]
    fn translate_maps_focus_changes() {
        assert_eq!(translate(cevent::Event::FocusLost), Some(Event::FocusLost));
        assert_eq!(
            translate(cevent::Event::FocusGained),
            Some(Event::FocusGained)
        );
    }

    #[test]
    fn translate_drops_events_without_a_key_name() {
        use cevent::{KeyCode, KeyModifiers};
        let raw = cevent::Event::Key(cevent::KeyEvent::new(KeyCode::Null, KeyModifiers::NONE));
        assert_eq!(translate(raw), None);
        assert_eq!(translate(cevent::Event::Resize(80, 24)), None);
    }
}
