//! Host input surfaces that feed the tracker.

/// Crossterm-backed terminal input.
pub mod crossterm;
