//! Background thread pool for blocking fetches.
//!
//! Jobs go into a shared crossbeam `Injector`; idle workers steal from it.
//! Every job is tagged with the session epoch it was issued under. When a
//! worker picks a job up and the shared epoch has moved on, the job is
//! skipped: fast Next/Next/Next clicks only hit the network for requests that
//! were already running plus the latest one.

use crossbeam::deque::{Injector, Steal};
use log::trace;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Idle sleep between queue polls
const IDLE_SLEEP: Duration = Duration::from_millis(2);

/// How long `Drop` waits for running jobs before detaching threads
const SHUTDOWN_DEADLINE: Duration = Duration::from_millis(500);

/// Fixed-size worker pool with epoch-gated jobs.
pub struct Workers {
    injector: Arc<Injector<Job>>,
    handles: Vec<thread::JoinHandle<()>>,
    current_epoch: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
}

impl Workers {
    /// Spawn `num_threads` workers (at least one) sharing `epoch`.
    pub fn new(num_threads: usize, epoch: Arc<AtomicU64>) -> Self {
        let num_threads = num_threads.max(1);
        let injector: Arc<Injector<Job>> = Arc::new(Injector::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(num_threads);
        for worker_id in 0..num_threads {
            let injector = Arc::clone(&injector);
            let shutdown = Arc::clone(&shutdown);

            let handle = thread::Builder::new()
                .name(format!("dexview-fetch-{}", worker_id))
                .spawn(move || {
                    trace!("Fetch worker {} started", worker_id);
                    loop {
                        match injector.steal() {
                            Steal::Success(job) => job(),
                            Steal::Retry => continue,
                            Steal::Empty => {
                                if shutdown.load(Ordering::Relaxed) {
                                    break;
                                }
                                thread::sleep(IDLE_SLEEP);
                            }
                        }
                    }
                    trace!("Fetch worker {} stopped", worker_id);
                });

            match handle {
                Ok(h) => handles.push(h),
                Err(e) => log::error!("Failed to spawn fetch worker {}: {}", worker_id, e),
            }
        }

        trace!("Workers initialized: {} threads", handles.len());

        Self {
            injector,
            handles,
            current_epoch: epoch,
            shutdown,
        }
    }

    /// Number of live worker threads
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Run `f` on a worker only if `epoch` is still current when picked up.
    ///
    /// The check happens at execution time, so a job queued under epoch N is
    /// dropped if the session issued N+1 before any worker got to it.
    pub fn execute_with_epoch<F>(&self, epoch: u64, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let current_epoch = Arc::clone(&self.current_epoch);
        self.injector.push(Box::new(move || {
            if current_epoch.load(Ordering::Acquire) == epoch {
                f();
            } else {
                trace!("Skipping stale job (epoch {})", epoch);
            }
        }));
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        let num_threads = self.handles.len();
        trace!("Workers shutting down ({} threads)...", num_threads);

        self.shutdown.store(true, Ordering::SeqCst);

        // A worker may be blocked inside an HTTP request; don't hold the UI
        // hostage for the full request timeout.
        let deadline = Instant::now() + SHUTDOWN_DEADLINE;
        for handle in std::mem::take(&mut self.handles) {
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    trace!("Shutdown deadline reached, detaching remaining workers");
                    return;
                }
                thread::sleep(Duration::from_millis(1));
            }
            let _ = handle.join();
        }

        trace!("All {} workers stopped", num_threads);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_current_epoch_job_runs() {
        let workers = Workers::new(2, Arc::new(AtomicU64::new(0)));
        assert_eq!(workers.len(), 2);

        let (tx, rx) = unbounded();
        workers.execute_with_epoch(0, move || {
            tx.send(42).unwrap();
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), 42);
    }

    #[test]
    fn test_zero_threads_clamped_to_one() {
        let workers = Workers::new(0, Arc::new(AtomicU64::new(0)));
        assert_eq!(workers.len(), 1);
        assert!(!workers.is_empty());
    }

    #[test]
    fn test_stale_epoch_skipped() {
        let epoch = Arc::new(AtomicU64::new(1));
        let workers = Workers::new(1, Arc::clone(&epoch));

        // Occupy the only worker so the next jobs stay queued
        let (gate_tx, gate_rx) = unbounded::<()>();
        workers.execute_with_epoch(1, move || {
            let _ = gate_rx.recv_timeout(Duration::from_secs(2));
        });

        let (tx, rx) = unbounded();
        let tx_stale = tx.clone();
        workers.execute_with_epoch(1, move || {
            tx_stale.send("stale").unwrap();
        });

        epoch.store(2, Ordering::Release);
        workers.execute_with_epoch(2, move || {
            tx.send("fresh").unwrap();
        });

        gate_tx.send(()).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "fresh");
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }
}
