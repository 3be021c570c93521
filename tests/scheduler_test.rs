// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/scheduler_test.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains tests for the poll scheduler: immediate first cycle,
// fixed-rate repetition, stop, failure recovery and the overlap policies.

mod common;

#[cfg(test)]
mod tests {
    use super::common::{DEVS_REPLY, MockDaemon, Reply, SUMMARY_REPLY, closed_port};
    use bfgminer_monitor::{ConnectionTarget, Dispatcher, MonitorConfig, OverlapPolicy, PollScheduler, Snapshot};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;
    use tokio::time::timeout;

    fn scheduler(port: u16, interval_ms: u64, overlap: OverlapPolicy) -> PollScheduler {
        PollScheduler::new(
            Dispatcher::new(ConnectionTarget::new("127.0.0.1", port)),
            Duration::from_millis(interval_ms),
            overlap,
        )
    }

    /// Wait for the next publication, failing the test after `limit`
    async fn next_snapshot(rx: &mut watch::Receiver<Arc<Snapshot>>, limit: Duration) -> Arc<Snapshot> {
        timeout(limit, rx.changed())
            .await
            .expect("no snapshot published in time")
            .expect("scheduler dropped");
        rx.borrow_and_update().clone()
    }

    async fn wait_for_cycles(scheduler: &PollScheduler, count: u64, limit: Duration) {
        timeout(limit, async {
            while scheduler.cycles_started() < count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("scheduler did not reach cycle count");
    }

    #[tokio::test]
    async fn test_initial_snapshot_is_pending() {
        let scheduler = scheduler(4028, 1000, OverlapPolicy::Allow);
        let current = scheduler.current();
        assert!(!current.is_connected());
        assert_eq!(current.error(), None);
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn test_first_cycle_runs_immediately() {
        let daemon = MockDaemon::healthy().await;
        // interval far longer than the wait below
        let scheduler = scheduler(daemon.port(), 60_000, OverlapPolicy::Allow);
        let mut rx = scheduler.subscribe();

        scheduler.start();
        let snapshot = next_snapshot(&mut rx, Duration::from_secs(5)).await;

        assert!(snapshot.is_connected());
        assert_eq!(scheduler.cycles_started(), 1);
        assert!(scheduler.current().is_connected());
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_polls_repeat_at_interval() {
        let daemon = MockDaemon::healthy().await;
        let scheduler = scheduler(daemon.port(), 50, OverlapPolicy::Allow);

        scheduler.start();
        wait_for_cycles(&scheduler, 4, Duration::from_secs(5)).await;
        scheduler.stop();

        assert!(daemon.requests().len() >= 6, "each cycle sends two commands");
    }

    #[tokio::test]
    async fn test_start_twice_keeps_single_ticker() {
        let daemon = MockDaemon::healthy().await;
        let scheduler = scheduler(daemon.port(), 60_000, OverlapPolicy::Allow);

        scheduler.start();
        scheduler.start();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(scheduler.cycles_started(), 1);
        assert!(scheduler.is_running());
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_stop_halts_publication() {
        let daemon = MockDaemon::healthy().await;
        let scheduler = scheduler(daemon.port(), 30, OverlapPolicy::Allow);
        let mut rx = scheduler.subscribe();

        scheduler.start();
        next_snapshot(&mut rx, Duration::from_secs(5)).await;
        scheduler.stop();
        assert!(!scheduler.is_running());

        let started = scheduler.cycles_started();
        // let any in-flight cycle finish and be discarded
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = rx.borrow_and_update();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(scheduler.cycles_started(), started);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_polling() {
        let port = closed_port().await;
        let scheduler = scheduler(port, 50, OverlapPolicy::Allow);
        let mut rx = scheduler.subscribe();

        scheduler.start();
        let first = next_snapshot(&mut rx, Duration::from_secs(5)).await;
        assert!(!first.is_connected());
        assert!(first.error().is_some());

        // the daemon comes up on the same port and the next ticks pick it up
        let addr: SocketAddr = format!("127.0.0.1:{}", port).parse().unwrap();
        let _daemon = MockDaemon::start_on(addr, |command| match command {
            "summary" => Reply::Framed(SUMMARY_REPLY.to_string()),
            _ => Reply::Framed(DEVS_REPLY.to_string()),
        })
        .await;

        let recovered = timeout(Duration::from_secs(5), async {
            loop {
                let snapshot = next_snapshot(&mut rx, Duration::from_secs(5)).await;
                if snapshot.is_connected() {
                    break snapshot;
                }
            }
        })
        .await
        .expect("scheduler never recovered");

        assert_eq!(recovered.as_miner().unwrap().devices.len(), 1);
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_overlapping_cycles_allowed_by_default() {
        let daemon = MockDaemon::start(|command| match command {
            "summary" => Reply::Delayed(Duration::from_millis(400), SUMMARY_REPLY.to_string()),
            _ => Reply::Delayed(Duration::from_millis(400), DEVS_REPLY.to_string()),
        })
        .await;
        let scheduler = scheduler(daemon.port(), 50, OverlapPolicy::Allow);

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(300)).await;
        scheduler.stop();

        // ticks kept firing while the first cycle was still waiting on replies
        assert!(scheduler.cycles_started() >= 3);
    }

    #[tokio::test]
    async fn test_skip_while_busy_is_single_flight() {
        let daemon = MockDaemon::start(|command| match command {
            "summary" => Reply::Delayed(Duration::from_millis(400), SUMMARY_REPLY.to_string()),
            _ => Reply::Delayed(Duration::from_millis(400), DEVS_REPLY.to_string()),
        })
        .await;
        let scheduler = scheduler(daemon.port(), 50, OverlapPolicy::SkipWhileBusy);

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(scheduler.cycles_started(), 1);
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_restart_polls_immediately_while_old_cycle_runs() {
        let daemon = MockDaemon::start(|command| match command {
            "summary" => Reply::Delayed(Duration::from_millis(800), SUMMARY_REPLY.to_string()),
            _ => Reply::Delayed(Duration::from_millis(800), DEVS_REPLY.to_string()),
        })
        .await;
        let scheduler = scheduler(daemon.port(), 60_000, OverlapPolicy::SkipWhileBusy);
        let mut rx = scheduler.subscribe();

        scheduler.start();
        wait_for_cycles(&scheduler, 1, Duration::from_secs(1)).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.stop();

        // the first cycle is still waiting on the daemon here
        scheduler.start();
        wait_for_cycles(&scheduler, 2, Duration::from_millis(500)).await;

        let snapshot = next_snapshot(&mut rx, Duration::from_secs(5)).await;
        assert!(snapshot.is_connected());
        scheduler.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_nothing_publishes_after_stop_on_worker_threads() {
        let daemon = MockDaemon::healthy().await;
        let scheduler = scheduler(daemon.port(), 1, OverlapPolicy::Allow);
        let mut rx = scheduler.subscribe();

        for _ in 0..5 {
            scheduler.start();
            next_snapshot(&mut rx, Duration::from_secs(5)).await;
            scheduler.stop();

            // anything published before stop() returned is already visible
            let _ = rx.borrow_and_update();
            tokio::time::sleep(Duration::from_millis(200)).await;
            assert!(!rx.has_changed().unwrap(), "a cycle published after stop");
        }
    }

    #[tokio::test]
    async fn test_published_snapshots_are_whole() {
        let daemon = MockDaemon::healthy().await;
        let scheduler = scheduler(daemon.port(), 20, OverlapPolicy::Allow);
        let mut rx = scheduler.subscribe();

        scheduler.start();
        for _ in 0..5 {
            let snapshot = next_snapshot(&mut rx, Duration::from_secs(5)).await;
            let miner = snapshot.as_miner().expect("healthy daemon yields connected snapshots");
            assert_eq!(miner.summary.description, "BFGMiner");
            assert_eq!(miner.devices.len(), 1);
        }
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = MonitorConfig {
            interval: 250,
            skip_overlapping: true,
            ..MonitorConfig::default()
        };
        let scheduler = PollScheduler::from_config(&config);
        assert_eq!(scheduler.interval(), Duration::from_millis(250));
        assert_eq!(scheduler.overlap_policy(), OverlapPolicy::SkipWhileBusy);
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Poll scheduler tests.
// - v1.0.1 (2026-10-16): Restart under single-flight and stop on a
//   multi-threaded runtime.
