// BFGMiner Monitor - Free and Open Source Software Statement
//
// File: src/main.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Entry point for bfgmon: continuous polling, one-shot checks, and the
// optional web view.

use bfgminer_monitor::{
    Args, Dispatcher, MinerView, MonitorConfig, PollScheduler, Result,
    logging::{DEFAULT_LOG_CONFIG, initialize_logging},
};
use clap::Parser;
use log::{info, warn};
use std::time::{Duration, Instant};

// Web server module for the live view
mod web_server;

const LOG_TARGET: &str = "bfgmon::main";

/// How often the full panel is logged while nothing changes
const PANEL_EVERY: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(err) = initialize_logging(&args.log_config, DEFAULT_LOG_CONFIG) {
        eprintln!("❌ Could not set up logging: {:#}", err);
        std::process::exit(1);
    }

    let config = match MonitorConfig::from_args(&args).await {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ Error: {}", err);
            std::process::exit(1);
        }
    };

    if args.once {
        return handle_once(&config).await;
    }

    handle_monitor(&args, &config).await
}

async fn handle_once(config: &MonitorConfig) -> Result<()> {
    let dispatcher = Dispatcher::new(config.target());
    let snapshot = dispatcher.poll_once().await;
    let view = MinerView::render(&config.id, config.title(), &snapshot);

    println!("{}", view);
    if !snapshot.is_connected() {
        std::process::exit(1);
    }
    Ok(())
}

async fn handle_monitor(args: &Args, config: &MonitorConfig) -> Result<()> {
    info!(target: LOG_TARGET, "🚀 Starting bfgmon");
    info!(target: LOG_TARGET, "📍 Daemon: {}", config.target().address());
    info!(target: LOG_TARGET, "🏷️ Title: {} ({})", config.title(), config.id);
    info!(target: LOG_TARGET, "⏱️ Interval: {}ms", config.interval);
    match config.timeout {
        Some(ms) => info!(target: LOG_TARGET, "⌛ Command timeout: {}ms", ms),
        None => info!(target: LOG_TARGET, "⌛ Command timeout: none (transport default)"),
    }

    let scheduler = PollScheduler::from_config(config);
    let mut snapshots = scheduler.subscribe();

    if args.web {
        let state = web_server::WebState {
            id: config.id.clone(),
            title: config.title().to_string(),
            snapshots: scheduler.subscribe(),
        };
        let port = args.web_port;
        tokio::spawn(async move {
            web_server::start_web_server(state, port).await;
        });
    } else {
        info!(target: LOG_TARGET, "💡 Add --web flag to enable the live web view");
    }

    scheduler.start();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_connected: Option<bool> = None;
    let mut last_panel = Instant::now();

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                let connected = snapshot.is_connected();

                if last_connected != Some(connected) || last_panel.elapsed() >= PANEL_EVERY {
                    let view = MinerView::render(&config.id, config.title(), &snapshot);
                    if connected {
                        info!(target: LOG_TARGET, "\n{}", view);
                    } else {
                        warn!(target: LOG_TARGET, "\n{}", view);
                    }
                    last_connected = Some(connected);
                    last_panel = Instant::now();
                }
            }
            _ = &mut shutdown => {
                info!(target: LOG_TARGET, "🛑 Shutting down");
                break;
            }
        }
    }

    scheduler.stop();
    Ok(())
}
