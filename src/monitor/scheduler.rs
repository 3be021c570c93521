// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/monitor/scheduler.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the fixed-rate poll scheduler, located in the monitor
// subdirectory. It owns the repeating task and the published snapshot.
//
// Tree Location:
// - src/monitor/scheduler.rs (poll timing and publication)
// - Depends on: tokio, monitor::dispatcher, monitor::snapshot

use super::dispatcher::Dispatcher;
use super::snapshot::Snapshot;
use crate::core::config::MonitorConfig;
use log::{debug, info};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const LOG_TARGET: &str = "bfgmon::monitor::scheduler";

/// What to do when a tick fires while an earlier cycle is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Start the cycle anyway; the last cycle to finish wins publication
    #[default]
    Allow,
    /// Skip the tick until the running cycle has published
    SkipWhileBusy,
}

/// Counters shared between the ticker and its cycle tasks
#[derive(Debug, Default)]
struct CycleState {
    started: AtomicU64,
    /// Bumped by every start/stop while the publisher is locked; cycles from an
    /// older epoch do not publish
    epoch: AtomicU64,
}

/// Polls on a fixed-rate timer and publishes each cycle's snapshot.
///
/// Cycles run as independent tasks. Under [`OverlapPolicy::Allow`] a slow cycle
/// can finish after a newer one and overwrite it; each publication is still a
/// whole snapshot swapped in atomically.
pub struct PollScheduler {
    dispatcher: Arc<Dispatcher>,
    interval: Duration,
    overlap: OverlapPolicy,
    publisher: Arc<watch::Sender<Arc<Snapshot>>>,
    state: Arc<CycleState>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl PollScheduler {
    /// `interval` is clamped to at least 1ms
    pub fn new(dispatcher: Dispatcher, interval: Duration, overlap: OverlapPolicy) -> Self {
        let (publisher, _) = watch::channel(Arc::new(Snapshot::pending()));
        Self {
            dispatcher: Arc::new(dispatcher),
            interval: interval.max(Duration::from_millis(1)),
            overlap,
            publisher: Arc::new(publisher),
            state: Arc::new(CycleState::default()),
            ticker: Mutex::new(None),
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(
            Dispatcher::new(config.target()),
            config.poll_interval(),
            config.overlap_policy(),
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.publisher.subscribe()
    }

    /// The live snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        self.publisher.borrow().clone()
    }

    /// Number of poll cycles started since construction
    pub fn cycles_started(&self) -> u64 {
        self.state.started.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Poll immediately, then on every tick. Must be called inside a Tokio
    /// runtime. Calling it while already running does nothing.
    pub fn start(&self) {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if ticker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let epoch = self.advance_epoch();
        // counts only this run's cycles
        let in_flight = Arc::new(AtomicUsize::new(0));
        let dispatcher = Arc::clone(&self.dispatcher);
        let publisher = Arc::clone(&self.publisher);
        let state = Arc::clone(&self.state);
        let interval = self.interval;
        let overlap = self.overlap;

        info!(target: LOG_TARGET,
            "Polling {} every {}ms ({:?})",
            dispatcher.client().target().address(),
            interval.as_millis(),
            overlap
        );

        *ticker = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                timer.tick().await;

                if overlap == OverlapPolicy::SkipWhileBusy
                    && in_flight.load(Ordering::SeqCst) > 0
                {
                    debug!(target: LOG_TARGET, "Previous cycle still running, skipping tick");
                    continue;
                }

                Self::spawn_cycle(
                    Arc::clone(&dispatcher),
                    Arc::clone(&publisher),
                    Arc::clone(&state),
                    Arc::clone(&in_flight),
                    epoch,
                );
            }
        }));
    }

    /// Cancel the repeating task. Cycles already in flight finish on their own
    /// but their results are dropped.
    pub fn stop(&self) {
        let handle = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            self.advance_epoch();
            handle.abort();
            info!(target: LOG_TARGET, "Polling stopped");
        }
    }

    /// Bump the epoch under the publisher's lock. A cycle compares the epoch
    /// under the same lock before publishing, so once this returns no cycle
    /// from the previous epoch can publish.
    fn advance_epoch(&self) -> u64 {
        let mut epoch = 0;
        self.publisher.send_if_modified(|_| {
            epoch = self.state.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            false
        });
        epoch
    }

    fn spawn_cycle(
        dispatcher: Arc<Dispatcher>,
        publisher: Arc<watch::Sender<Arc<Snapshot>>>,
        state: Arc<CycleState>,
        in_flight: Arc<AtomicUsize>,
        epoch: u64,
    ) {
        in_flight.fetch_add(1, Ordering::SeqCst);
        let cycle = state.started.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::spawn(async move {
            let snapshot = dispatcher.poll_once().await;

            let published = publisher.send_if_modified(|current| {
                if state.epoch.load(Ordering::SeqCst) != epoch {
                    return false;
                }
                *current = Arc::new(snapshot);
                true
            });
            if published {
                debug!(target: LOG_TARGET, "Cycle {} published", cycle);
            } else {
                debug!(target: LOG_TARGET, "Cycle {} finished after stop, discarded", cycle);
            }

            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial poll scheduler.
//   - Purpose: Runs poll cycles at a fixed rate and publishes snapshots through
//     a watch channel.
//   - Features: Explicit start/stop, optional single-flight guard.
//   - Note: No per-cycle timeout beyond what the client target sets.
// - v1.0.1 (2026-10-16): Single-flight guard is scoped to one start/stop run;
//   the epoch check and publication happen under the watch lock.
