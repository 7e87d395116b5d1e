use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::data::example_set::TrainingExampleSet;
use crate::error::{DetectorError, Result};
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{self, TrainedResult};

/// Owns one network and runs at most one training job on it at a time.
///
/// Readers call [`network`](BackgroundTrainer::network) and get the last
/// published version; a job trains a private copy and publishes it when it
/// stops, so a reader never sees a half-updated network. A job that is
/// cancelled still publishes the weights of its last completed iteration.
pub struct BackgroundTrainer {
    current: Arc<RwLock<Arc<Network>>>,
    busy: Arc<AtomicBool>,
}

/// Clears the "training in progress" flag when the job ends, panics included.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BackgroundTrainer {
    pub fn new(network: Network) -> Self {
        BackgroundTrainer {
            current: Arc::new(RwLock::new(Arc::new(network))),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The most recently published network.
    pub fn network(&self) -> Arc<Network> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_training(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Starts training the current network on a background thread.
    ///
    /// Returns `Ok(None)` without doing anything when a job is already
    /// running. Configuration and dimension problems are reported here,
    /// before any thread is spawned.
    pub fn start(
        &self,
        set: Arc<TrainingExampleSet>,
        mut config: TrainConfig,
    ) -> Result<Option<TrainingHandle>> {
        config.validate()?;
        trainer::check_compatible(&self.network(), &set)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("training already in progress, ignoring start request");
            return Ok(None);
        }

        let stop_flag = config
            .stop_flag
            .get_or_insert_with(|| Arc::new(AtomicBool::new(false)))
            .clone();
        let (result_tx, result_rx) = mpsc::channel();
        let current = Arc::clone(&self.current);
        let busy = Arc::clone(&self.busy);

        let spawned = thread::Builder::new()
            .name("trainer".into())
            .spawn(move || {
                let guard = BusyGuard(busy);
                let mut network =
                    Network::clone(&current.read().unwrap_or_else(PoisonError::into_inner));

                let outcome = trainer::train(&mut network, &set, &config);
                if outcome.is_ok() {
                    *current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(network);
                }

                // Publish and clear the flag before anyone can observe the result.
                drop(guard);
                let _ = result_tx.send(outcome);
            });

        match spawned {
            Ok(thread) => Ok(Some(TrainingHandle {
                stop_flag,
                result_rx,
                thread: Some(thread),
            })),
            Err(e) => {
                self.busy.store(false, Ordering::Release);
                Err(e.into())
            }
        }
    }
}

/// Caller-side view of a running training job.
///
/// Dropping the handle detaches the job: it keeps running and still
/// publishes its network when it finishes.
pub struct TrainingHandle {
    stop_flag: Arc<AtomicBool>,
    result_rx: mpsc::Receiver<Result<TrainedResult>>,
    thread: Option<JoinHandle<()>>,
}

impl TrainingHandle {
    /// Asks the job to stop after its current iteration.
    pub fn cancel(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Non-blocking check for the job's result. Yields the result once;
    /// later calls return `None`.
    pub fn try_result(&mut self) -> Option<Result<TrainedResult>> {
        match self.result_rx.try_recv() {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                // Either already taken or the thread died before sending.
                if self.join() {
                    Some(Err(DetectorError::TrainingPanicked))
                } else {
                    None
                }
            }
        }
    }

    /// Blocks until the job stops and returns its result.
    pub fn wait(mut self) -> Result<TrainedResult> {
        let outcome = self
            .result_rx
            .recv()
            .unwrap_or(Err(DetectorError::TrainingPanicked));
        self.join();
        outcome
    }

    /// Joins the worker thread if it has not been joined yet. Returns `true`
    /// when the thread panicked.
    fn join(&mut self) -> bool {
        match self.thread.take() {
            Some(thread) => thread.join().is_err(),
            None => false,
        }
    }
}
