/// The kinds of key state change a host surface reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// The key went down.
    Press,
    /// Auto-repeat notification for a key that is already down.
    Repeat,
    /// The key came up.
    Release,
}

/// A raw key event: the host's key name plus the reported action. The name
/// is carried verbatim; canonicalization happens when the event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name as reported by the host, in any case.
    pub key: String,
    /// Reported state change.
    pub action: KeyAction,
}

impl KeyEvent {
    /// Construct a key event.
    pub fn new(key: impl Into<String>, action: KeyAction) -> Self {
        Self {
            key: key.into(),
            action,
        }
    }
}

/// This enum represents the event types that drive the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key state change.
    Key(KeyEvent),
    /// The host surface gained input focus.
    FocusGained,
    /// The host surface lost input focus. Releases are not delivered while
    /// unfocused, so held state cannot be trusted past this point.
    FocusLost,
}
