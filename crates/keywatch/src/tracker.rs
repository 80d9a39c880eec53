use crate::{
    event::{Event, KeyEvent},
    key::KeyToken,
    set::KeySet,
    snapshot::Snapshot,
};

/// Tracks held keys across a stream of input events.
///
/// One tracker corresponds to one subscription to a host surface: it starts
/// with nothing held, evolves with each event, and is discarded with the
/// subscription. Consumers only ever see the projected [`Snapshot`], never
/// the internal set.
#[derive(Debug, Default)]
pub struct Tracker {
    /// Currently held keys.
    keys: KeySet,
    /// Projection of `keys`, recomputed whenever membership changes.
    snapshot: Snapshot,
}

impl Tracker {
    /// Create a tracker with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Feed one event through the tracker, returning true if the snapshot
    /// changed. Malformed key events are logged and skipped, leaving the
    /// prior state intact.
    pub fn handle(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(k) => self.handle_key(k),
            Event::FocusGained => false,
            Event::FocusLost => self.reset(),
        }
    }

    /// Apply a single key event.
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let Ok(token) = KeyToken::normalize(&event.key) else {
            tracing::debug!("dropping key event with unusable name");
            return false;
        };
        let next = self.keys.apply(&token, event.action);
        if next.ptr_eq(&self.keys) {
            return false;
        }
        self.keys = next;
        self.snapshot = Snapshot::project(&self.keys);
        true
    }

    /// Release every held key, returning true if any was held. Used when the
    /// host surface can no longer deliver matching releases.
    pub fn reset(&mut self) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        self.keys = KeySet::new();
        self.snapshot = Snapshot::project(&self.keys);
        true
    }
}
