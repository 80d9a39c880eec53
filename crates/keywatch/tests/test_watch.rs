//! Subscription lifecycle tests driving a watcher over channels.

use std::{sync::mpsc, time::Duration};

use keywatch::{Event, KeyAction, KeyEvent, Snapshot, Watcher};

/// Generous bound for cross-thread delivery.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn key(name: &str, action: KeyAction) -> Event {
    Event::Key(KeyEvent::new(name, action))
}

#[test]
fn publishes_snapshots_in_event_order() {
    let (event_tx, event_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let _watcher = Watcher::spawn(event_rx, update_tx);

    event_tx.send(key("Shift", KeyAction::Press)).unwrap();
    event_tx.send(key("A", KeyAction::Press)).unwrap();
    event_tx.send(key("A", KeyAction::Release)).unwrap();

    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snap.modifiers().shift);
    assert!(snap.pressed().is_empty());

    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snap.is_pressed("a"));
    assert!(snap.is_pressed("shift"));

    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(!snap.is_pressed("a"));
    assert!(snap.is_pressed("shift"));
}

#[test]
fn unchanged_state_publishes_nothing() {
    let (event_tx, event_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let _watcher = Watcher::spawn(event_rx, update_tx);

    event_tx.send(key("a", KeyAction::Press)).unwrap();
    // A held-key repeat and a redundant release, neither of which changes
    // membership.
    event_tx.send(key("a", KeyAction::Repeat)).unwrap();
    event_tx.send(key("b", KeyAction::Release)).unwrap();
    event_tx.send(key("b", KeyAction::Press)).unwrap();

    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snap.is_pressed("a"));
    assert!(!snap.is_pressed("b"));

    // The next update must come from the final press, with nothing
    // published in between.
    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snap.is_pressed("a"));
    assert!(snap.is_pressed("b"));
}

#[test]
fn latest_snapshot_is_readable_without_consuming_updates() {
    let (event_tx, event_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let watcher = Watcher::spawn(event_rx, update_tx);

    assert_eq!(watcher.snapshot(), Snapshot::default());

    event_tx.send(key("x", KeyAction::Press)).unwrap();
    let published = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert_eq!(watcher.snapshot(), published);
}

#[test]
fn focus_loss_clears_held_keys() {
    let (event_tx, event_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let _watcher = Watcher::spawn(event_rx, update_tx);

    event_tx.send(key("a", KeyAction::Press)).unwrap();
    event_tx.send(Event::FocusLost).unwrap();

    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snap.is_pressed("a"));
    let snap = update_rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(snap.pressed().is_empty());
    assert_eq!(snap.modifiers(), keywatch::Modifiers::default());
}

#[test]
fn updates_channel_closes_with_the_stream() {
    let (event_tx, event_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let _watcher = Watcher::spawn(event_rx, update_tx);

    event_tx.send(key("x", KeyAction::Press)).unwrap();
    assert!(update_rx.recv_timeout(RECV_TIMEOUT).is_ok());

    drop(event_tx);
    assert!(update_rx.recv_timeout(RECV_TIMEOUT).is_err());
}

#[test]
fn stop_twice_is_a_noop() {
    let (_event_tx, event_rx) = mpsc::channel();
    let (update_tx, _update_rx) = mpsc::channel();
    let mut watcher = Watcher::spawn(event_rx, update_tx);

    watcher.stop();
    watcher.stop();
}

#[test]
fn independent_watchers_do_not_share_state() {
    let (event_tx_a, event_rx_a) = mpsc::channel();
    let (update_tx_a, update_rx_a) = mpsc::channel();
    let _watcher_a = Watcher::spawn(event_rx_a, update_tx_a);

    let (_event_tx_b, event_rx_b) = mpsc::channel();
    let (update_tx_b, _update_rx_b) = mpsc::channel();
    let watcher_b = Watcher::spawn(event_rx_b, update_tx_b);

    event_tx_a.send(key("a", KeyAction::Press)).unwrap();
    assert!(update_rx_a.recv_timeout(RECV_TIMEOUT).is_ok());
    assert_eq!(watcher_b.snapshot(), Snapshot::default());
}
