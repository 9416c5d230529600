// PlaceBoard - app/loader.rs
//
// Background collection fetches. A Record Store fetch is the one
// asynchronous boundary in the board: it runs on a worker thread and the
// result is delivered over an mpsc channel that the owner polls.
//
// Architecture:
//   - `LoadManager` lives with the controller; `run_load` runs on a worker thread.
//   - Every request gets a generation number, strictly increasing per manager.
//   - Several fetches may be in flight. The consumer applies a result only
//     if its generation is newer than the last one applied (see
//     `BoardState::apply_progress`), so a slow stale fetch cannot overwrite
//     a newer collection.
//   - Fetches are not cancelled; late results are simply discarded.

use crate::app::store::RecordStore;
use crate::core::model::ListingRecord;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

/// Messages sent from a fetch thread to the owner.
#[derive(Debug, Clone)]
pub enum LoadProgress {
    /// The fetch for `generation` has begun.
    Started { generation: u64, collection: String },

    /// The fetch completed.
    Loaded {
        generation: u64,
        collection: String,
        records: Vec<ListingRecord>,
    },

    /// The fetch failed with a transport error.
    Failed {
        generation: u64,
        collection: String,
        error: String,
    },
}

impl LoadProgress {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation, .. }
            | Self::Loaded { generation, .. }
            | Self::Failed { generation, .. } => *generation,
        }
    }

    /// True for `Loaded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started { .. })
    }
}

/// Spawns fetches and collects their progress messages.
pub struct LoadManager {
    progress_tx: mpsc::Sender<LoadProgress>,
    progress_rx: mpsc::Receiver<LoadProgress>,
    next_generation: u64,
}

impl LoadManager {
    pub fn new() -> Self {
        let (progress_tx, progress_rx) = mpsc::channel();
        Self {
            progress_tx,
            progress_rx,
            next_generation: 1,
        }
    }

    /// Fetch every record of `collection` on a background thread.
    ///
    /// Returns the generation assigned to this request.
    pub fn start_load(&mut self, store: Arc<dyn RecordStore>, collection: &str) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;

        let tx = self.progress_tx.clone();
        let collection = collection.to_string();

        tracing::info!(generation, collection = %collection, "Load started");

        std::thread::spawn(move || run_load(store, collection, generation, tx));

        generation
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.progress_rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Block until the terminal message for `generation` arrives or
    /// `timeout` elapses. Returns every message received meanwhile, in
    /// arrival order, including those of other generations.
    pub fn wait_for(&self, generation: u64, timeout: Duration) -> Vec<LoadProgress> {
        let deadline = Instant::now() + timeout;
        let mut messages = Vec::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(generation, "Timed out waiting for load");
                return messages;
            }
            match self.progress_rx.recv_timeout(remaining) {
                Ok(msg) => {
                    let done = msg.generation() == generation && msg.is_terminal();
                    messages.push(msg);
                    if done {
                        return messages;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    tracing::warn!(generation, "Timed out waiting for load");
                    return messages;
                }
                // `self` holds a sender, so this cannot happen while borrowed.
                Err(mpsc::RecvTimeoutError::Disconnected) => return messages,
            }
        }
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker body: fetch and report. Never panics on store errors.
fn run_load(
    store: Arc<dyn RecordStore>,
    collection: String,
    generation: u64,
    tx: mpsc::Sender<LoadProgress>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped; nobody is waiting.
            }
        };
    }

    send!(LoadProgress::Started {
        generation,
        collection: collection.clone(),
    });

    let started = Instant::now();
    match store.get_all(&collection) {
        Ok(records) => {
            tracing::debug!(
                generation,
                collection = %collection,
                records = records.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Load completed"
            );
            send!(LoadProgress::Loaded {
                generation,
                collection,
                records,
            });
        }
        Err(e) => {
            tracing::error!(generation, collection = %collection, error = %e, "Load failed");
            send!(LoadProgress::Failed {
                generation,
                collection,
                error: e.to_string(),
            });
        }
    }
}
