//! Session state: navigation position, fetch lifecycle and favorites.
//!
//! **Architecture**: the session lives on the UI thread and is the only
//! writer of its own fields. Fetches run on [`Workers`]; completions come back
//! through a crossbeam channel and are applied in [`Session::poll`].
//!
//! # Fetch lifecycle
//!
//! `Idle -> Pending -> {Success, Failure}`. Every `load_id` bumps a monotonic
//! epoch and tags the fetch with it. A completion is applied only if its
//! epoch is still the latest one issued; anything older is discarded. A slow
//! early request can therefore never overwrite a newer record or clear the
//! loading flag of the request that is actually on screen.
//!
//! # Identifier range
//!
//! `current_id` is always within `[MIN_ID, MAX_ID]`. Out-of-range requests
//! clamp to the nearer bound; `next`/`previous` wrap around.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, trace};

use super::fetcher::{FetchError, RecordFetcher};
use super::record::Record;
use super::workers::Workers;

/// Lowest valid Pokédex number
pub const MIN_ID: u32 = 1;
/// Highest valid Pokédex number
pub const MAX_ID: u32 = 1025;

/// Default number of fetch worker threads
pub const DEFAULT_WORKERS: usize = 2;

/// Clamp any integer into `[MIN_ID, MAX_ID]`
pub fn clamp_id(id: i64) -> u32 {
    id.clamp(MIN_ID as i64, MAX_ID as i64) as u32
}

/// Repaint hook called from worker threads after each completion
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// State of the most recently issued fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Pending { id: u32 },
    Success(Record),
    Failure(FetchError),
}

/// Result of one fetch, tagged with the epoch it was issued under
struct Completion {
    epoch: u64,
    result: Result<Record, FetchError>,
}

/// In-memory session: one per application window
pub struct Session {
    current_id: u32,
    state: FetchState,
    favorites: HashSet<u32>,
    epoch: Arc<AtomicU64>,
    fetcher: Arc<dyn RecordFetcher>,
    workers: Workers,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    waker: Option<Waker>,
}

impl Session {
    /// Create an idle session positioned at `MIN_ID`.
    pub fn new(fetcher: Arc<dyn RecordFetcher>, num_workers: usize) -> Self {
        let epoch = Arc::new(AtomicU64::new(0));
        let workers = Workers::new(num_workers, Arc::clone(&epoch));
        let (completion_tx, completion_rx) = unbounded();

        info!("Session created ({} fetch workers)", workers.len());

        Self {
            current_id: MIN_ID,
            state: FetchState::Idle,
            favorites: HashSet::new(),
            epoch,
            fetcher,
            workers,
            completion_tx,
            completion_rx,
            waker: None,
        }
    }

    /// Position the session before `initialize()` (clamped, no fetch).
    pub fn with_start_id(mut self, id: i64) -> Self {
        self.current_id = clamp_id(id);
        self
    }

    /// Install a callback invoked after every completion (e.g. egui repaint).
    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    /// Issue the first fetch for the current position.
    pub fn initialize(&mut self) {
        self.load_id(self.current_id as i64);
    }

    // === Accessors ===

    pub fn current_id(&self) -> u32 {
        self.current_id
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// True exactly while the latest fetch is pending
    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Pending { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match &self.state {
            FetchState::Success(rec) => Some(rec),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            FetchState::Failure(err) => Some(err),
            _ => None,
        }
    }

    /// Latest issued epoch (0 before the first fetch)
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    // === Navigation ===

    /// Clamp `id`, make it current and fetch it. Returns the clamped id.
    pub fn load_id(&mut self, id: i64) -> u32 {
        let id = clamp_id(id);
        self.current_id = id;

        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.state = FetchState::Pending { id };
        debug!("load_id({}) epoch={}", id, epoch);

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        let waker = self.waker.clone();
        self.workers.execute_with_epoch(epoch, move || {
            let result = fetcher.fetch(id);
            // Receiver gone means the session was dropped; nothing to do
            if tx.send(Completion { epoch, result }).is_ok() {
                if let Some(wake) = waker {
                    wake();
                }
            }
        });

        id
    }

    /// Advance one id, wrapping `MAX_ID -> MIN_ID`.
    pub fn next(&mut self) -> u32 {
        let next = if self.current_id >= MAX_ID {
            MIN_ID
        } else {
            self.current_id + 1
        };
        self.load_id(next as i64)
    }

    /// Step back one id, wrapping `MIN_ID -> MAX_ID`.
    pub fn previous(&mut self) -> u32 {
        let prev = if self.current_id <= MIN_ID {
            MAX_ID
        } else {
            self.current_id - 1
        };
        self.load_id(prev as i64)
    }

    /// Re-fetch the current id (manual retry after a failure).
    pub fn retry(&mut self) -> u32 {
        self.load_id(self.current_id as i64)
    }

    /// Parse free-text jump input. Non-numeric text is ignored silently.
    pub fn jump_text(&mut self, text: &str) -> Option<u32> {
        match text.trim().parse::<i64>() {
            Ok(id) => Some(self.load_id(id)),
            Err(_) => {
                debug!("Ignoring non-numeric jump input {:?}", text);
                None
            }
        }
    }

    // === Favorites ===

    /// Flip membership of `id`; returns true if it is now a favorite.
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        };
        debug!("toggle_favorite({}) -> {}", id, now_favorite);
        now_favorite
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Sorted snapshot of favorites for display
    pub fn favorites(&self) -> BTreeSet<u32> {
        self.favorites.iter().copied().collect()
    }

    // === Completion handling ===

    /// Apply finished fetches. Returns how many changed the state.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the latest fetch completes or `timeout` elapses.
    ///
    /// Returns true if the session is no longer loading.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll();
        while self.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.completion_rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(_) => return false,
            }
        }
        true
    }

    fn apply(&mut self, completion: Completion) -> bool {
        let latest = self.epoch();
        if completion.epoch != latest {
            debug!(
                "Discarding stale completion (epoch {} < {})",
                completion.epoch, latest
            );
            return false;
        }

        self.state = match completion.result {
            Ok(record) => {
                trace!("Loaded {}", record);
                FetchState::Success(record)
            }
            Err(err) => {
                info!("Fetch failed: {}", err);
                FetchState::Failure(err)
            }
        };
        true
    }
}
