use std::{borrow::Borrow, collections::HashSet, hash::Hash, sync::Arc};

use crate::{event::KeyAction, key::KeyToken};

/// The set of keys currently considered down.
///
/// A token is a member iff the most recent event observed for it was a press
/// not yet followed by a release. Transitions never mutate in place: they
/// return either a new set, or a set sharing the input's backing storage when
/// membership is unchanged, so change detection is a pointer comparison.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    /// Shared membership storage.
    keys: Arc<HashSet<KeyToken>>,
}

impl KeySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key is down. Accepts a token or a lower-case spelling.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        KeyToken: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keys.contains(key)
    }

    /// Number of held keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are held.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the held tokens, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyToken> {
        self.keys.iter()
    }

    /// Whether two sets share the same backing storage. Transitions that
    /// leave membership unchanged return a set that is `ptr_eq` to their
    /// input.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.keys, &other.keys)
    }

    /// Record a press. Pressing a key that is already down is a no-op; hosts
    /// re-send presses while a key is held.
    pub fn press(&self, token: &KeyToken) -> Self {
        if self.keys.contains(token) {
            return self.clone();
        }
        let mut next = HashSet::clone(&self.keys);
        next.insert(token.clone());
        Self {
            keys: Arc::new(next),
        }
    }

    /// Record a release. Releasing a key that is not down is a no-op.
    pub fn release(&self, token: &KeyToken) -> Self {
        if !self.keys.contains(token) {
            return self.clone();
        }
        let mut next = HashSet::clone(&self.keys);
        next.remove(token);
        Self {
            keys: Arc::new(next),
        }
    }

    /// Apply a reported action to the set. Actions other than press and
    /// release never transition the set.
    pub fn apply(&self, token: &KeyToken, action: KeyAction) -> Self {
        match action {
            KeyAction::Press => self.press(token),
            KeyAction::Release => self.release(token),
            other => {
                tracing::debug!("unhandled key action {:?} for {}", other, token);
                self.clone()
            }
        }
    }
}
