// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/common/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Shared helpers for integration tests: a scripted stand-in for the BFGMiner
// API daemon and canned replies.

#![allow(dead_code)]

use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const SUMMARY_REPLY: &str = r#"{"STATUS":[{"STATUS":"S","Description":"BFGMiner"}],"SUMMARY":[{"MHS av":500.123,"Hardware Errors":2,"Accepted":1000,"Rejected":3,"Best Share":99999,"Stale":0,"Discarded":1,"Difficulty Accepted":1000.5,"Difficulty Rejected":3,"Difficulty Stale":0}]}"#;

pub const DEVS_REPLY: &str = r#"{"DEVS":[{"ID":"GPU0","Status":"Alive","Name":"GPU0","MHS 300s":500.0,"Hardware Errors":2,"Accepted":1000}]}"#;

/// How the daemon answers one connection
#[derive(Debug, Clone)]
pub enum Reply {
    /// Write these bytes followed by a NUL, then close
    Framed(String),
    /// Write these exact bytes, then close
    Raw(Vec<u8>),
    /// Write these bytes followed by a NUL and keep the socket open
    FramedKeepOpen(String),
    /// Wait, then reply framed
    Delayed(Duration, String),
    /// Write this many non-NUL bytes and keep the socket open
    Flood(usize),
    /// Accept and never answer
    Silent,
    /// Close without writing
    Close,
}

pub struct MockDaemon {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

impl MockDaemon {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock daemon");
        Self::serve(listener, handler)
    }

    pub async fn start_on<F>(addr: SocketAddr, handler: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(addr).await.expect("bind mock daemon");
        Self::serve(listener, handler)
    }

    /// Daemon answering `summary` and `devs` with the canned replies
    pub async fn healthy() -> Self {
        Self::start(|command| match command {
            "summary" => Reply::Framed(SUMMARY_REPLY.to_string()),
            "devs" => Reply::Framed(DEVS_REPLY.to_string()),
            _ => Reply::Close,
        })
        .await
    }

    fn serve<F>(listener: TcpListener, handler: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let addr = listener.local_addr().expect("mock daemon address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler = Arc::new(handler);
        let recorded = Arc::clone(&requests);

        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);

                tokio::spawn(async move {
                    let mut buffer = Vec::new();
                    let mut chunk = [0u8; 1024];
                    let request: Value = loop {
                        let n = match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        buffer.extend_from_slice(&chunk[..n]);
                        if let Ok(value) = serde_json::from_slice(&buffer) {
                            break value;
                        }
                    };

                    let command = request["command"].as_str().unwrap_or_default().to_string();
                    recorded.lock().unwrap().push(request);

                    match handler(&command) {
                        Reply::Framed(body) => {
                            let _ = socket.write_all(body.as_bytes()).await;
                            let _ = socket.write_all(&[0]).await;
                        }
                        Reply::Raw(bytes) => {
                            let _ = socket.write_all(&bytes).await;
                        }
                        Reply::FramedKeepOpen(body) => {
                            let _ = socket.write_all(body.as_bytes()).await;
                            let _ = socket.write_all(&[0]).await;
                            tokio::time::sleep(Duration::from_secs(30)).await;
                        }
                        Reply::Delayed(delay, body) => {
                            tokio::time::sleep(delay).await;
                            let _ = socket.write_all(body.as_bytes()).await;
                            let _ = socket.write_all(&[0]).await;
                        }
                        Reply::Flood(len) => {
                            let block = [b' '; 8192];
                            let mut remaining = len;
                            while remaining > 0 {
                                let n = remaining.min(block.len());
                                if socket.write_all(&block[..n]).await.is_err() {
                                    return;
                                }
                                remaining -= n;
                            }
                            tokio::time::sleep(Duration::from_secs(30)).await;
                        }
                        Reply::Silent => {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                        }
                        Reply::Close => {}
                    }
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A local port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind unused port");
    let port = listener.local_addr().expect("unused port address").port();
    drop(listener);
    port
}
