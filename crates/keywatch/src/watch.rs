use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
};

use crate::{event::Event, snapshot::Snapshot, tracker::Tracker};

/// A running keyboard subscription.
///
/// A watcher owns a worker thread that drains an event stream into a
/// [`Tracker`], publishing a fresh [`Snapshot`] whenever the state changes.
/// Each watcher has its own tracker; independent watchers never share state.
#[derive(Debug)]
pub struct Watcher {
    /// Worker join handle, present while the subscription is active.
    handle: Option<thread::JoinHandle<()>>,
    /// Stop mark observed by the worker.
    stopped: Arc<AtomicBool>,
    /// Latest published snapshot, shared with the worker.
    latest: Arc<Mutex<Snapshot>>,
}

impl Watcher {
    /// Subscribe to an event stream. A snapshot is sent on `updates` each
    /// time the state changes, and the most recent one is also readable
    /// through [`snapshot`](Self::snapshot). The worker exits when the
    /// stream closes, when `updates` loses its receiver, or after
    /// [`stop`](Self::stop).
    pub fn spawn(events: mpsc::Receiver<Event>, updates: mpsc::Sender<Snapshot>) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let latest = Arc::new(Mutex::new(Snapshot::default()));
        let worker_stopped = stopped.clone();
        let worker_latest = latest.clone();
        let handle = thread::spawn(move || {
            let mut tracker = Tracker::new();
            loop {
                let Ok(event) = events.recv() else {
                    // Stream closed; the subscription is over.
                    break;
                };
                if worker_stopped.load(Ordering::Relaxed) {
                    break;
                }
                if tracker.handle(&event) {
                    let snap = tracker.snapshot().clone();
                    *worker_latest.lock().unwrap() = snap.clone();
                    if updates.send(snap).is_err() {
                        break;
                    }
                }
            }
        });
        Self {
            handle: Some(handle),
            stopped,
            latest,
        }
    }

    /// The latest published snapshot; empty until the first change.
    pub fn snapshot(&self) -> Snapshot {
        self.latest.lock().unwrap().clone()
    }

    /// End the subscription. The worker observes the mark at its next
    /// wakeup; no state transition happens from then on. Stopping an
    /// already-stopped watcher is a no-op.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
        // Detach rather than join: the worker may stay parked in recv until
        // the next event arrives or the stream closes.
        drop(self.handle.take());
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.stop();
    }
}
