use crate::{key::KeyToken, set::KeySet};

/// Spellings that name modifier keys. "control" and "ctrl" are common names
/// for the same key; no other modifier has a second spelling.
const MODIFIER_SPELLINGS: &[&str] = &["control", "ctrl", "shift", "alt", "meta"];

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Modifiers {
    /// Control is active.
    pub control: bool,
    /// Shift is active.
    pub shift: bool,
    /// Alt is active.
    pub alt: bool,
    /// Meta is active.
    pub meta: bool,
}

/// An immutable view of the keys held at a point in time.
///
/// Modifier keys are surfaced only through [`Modifiers`]; `pressed` carries
/// everything else. Snapshots are recomputed whole from the key set whenever
/// membership changes, never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Held non-modifier keys, sorted.
    pressed: Vec<KeyToken>,
    /// Modifier flags derived from the same set.
    modifiers: Modifiers,
}

impl Snapshot {
    /// Project a snapshot from a key set. Equal membership always projects
    /// to an equal snapshot, regardless of set iteration order.
    pub fn project(keys: &KeySet) -> Self {
        let modifiers = Modifiers {
            // The key's reported name is not standardized across hosts, so
            // both spellings count.
            control: keys.contains("control") || keys.contains("ctrl"),
            shift: keys.contains("shift"),
            alt: keys.contains("alt"),
            meta: keys.contains("meta"),
        };
        let mut pressed: Vec<KeyToken> = keys
            .iter()
            .filter(|t| !MODIFIER_SPELLINGS.contains(&t.as_str()))
            .cloned()
            .collect();
        pressed.sort();
        Self { pressed, modifiers }
    }

    /// Held non-modifier keys, sorted.
    pub fn pressed(&self) -> &[KeyToken] {
        &self.pressed
    }

    /// Modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether a key is currently held. Modifier spellings consult the
    /// modifier flags, with "control" and "ctrl" both reading the control
    /// flag; any other name is matched against the held keys. Matching is
    /// case-insensitive.
    pub fn is_pressed(&self, key: &str) -> bool {
        match key.to_lowercase().as_str() {
            "control" | "ctrl" => self.modifiers.control,
            "shift" => self.modifiers.shift,
            "alt" => self.modifiers.alt,
            "meta" => self.modifiers.meta,
            name => self.pressed.iter().any(|t| t.as_str() == name),
        }
    }
}
