//! Single-threaded execution context for UI-bound state.
//!
//! All property mutations and route changes are funneled through one
//! dedicated thread so that subscribers observe them in issue order and
//! never see a torn update.

use std::sync::mpsc::{self, Sender};
use std::thread::{self, ThreadId};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Handle to the UI execution context.
///
/// Cheap to clone; the underlying thread exits once the last handle is
/// dropped. Jobs dispatched from the scheduler thread itself run inline,
/// which keeps nested mutations (a subscriber writing another property)
/// in program order.
#[derive(Clone)]
pub struct UiScheduler {
    tx: Sender<Job>,
    thread_id: ThreadId,
}

impl UiScheduler {
    /// Spawn the scheduler thread and return a handle to it.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let (id_tx, id_rx) = mpsc::channel();

        thread::Builder::new()
            .name("nimbus-ui".to_string())
            .spawn(move || {
                let _ = id_tx.send(thread::current().id());
                while let Ok(job) = rx.recv() {
                    job();
                }
            })
            .expect("failed to spawn ui scheduler thread");

        let thread_id = id_rx
            .recv()
            .expect("ui scheduler thread died before reporting its id");

        Self { tx, thread_id }
    }

    /// True when the caller is already on the scheduler thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Run `job` on the scheduler thread.
    ///
    /// Inline when already there, otherwise enqueued FIFO behind every
    /// previously dispatched job.
    pub fn dispatch<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_current() {
            job();
        } else {
            let _ = self.tx.send(Box::new(job));
        }
    }

    /// Block until every job dispatched before this call has run.
    ///
    /// No-op when called from the scheduler thread (everything ahead of us
    /// already ran).
    pub fn flush(&self) {
        if self.is_current() {
            return;
        }
        let (done_tx, done_rx) = mpsc::channel();
        let _ = self.tx.send(Box::new(move || {
            let _ = done_tx.send(());
        }));
        let _ = done_rx.recv();
    }
}

impl Default for UiScheduler {
    fn default() -> Self {
        Self::new()
    }
}
