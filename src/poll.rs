use std::time::Duration;

use log::{info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::endpoint::Endpoint;
use crate::error::QueryError;
use crate::info::ServerInfo;
use crate::query;
use crate::transport::TransportConfig;

/// Handle that stops every worker spawned from the paired
/// [`ShutdownSignal`]. Idempotent.
pub struct Shutdown {
    sender: watch::Sender<bool>,
}

impl Shutdown {
    pub fn shutdown(&self) {
        let _ = self.sender.send(true);
    }
}

/// Group-wide shutdown signal shared by every poll worker.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Check if shutdown has been signaled.
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait for the shutdown signal.
    pub async fn wait(&mut self) {
        // if already shut down, return immediately
        if *self.receiver.borrow() {
            return;
        }
        let _ = self.receiver.changed().await;
    }
}

/// Creates a connected handle/signal pair.
pub fn shutdown_channel() -> (Shutdown, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (Shutdown { sender }, ShutdownSignal { receiver })
}

/// Outcome of one query attempt against one endpoint.
#[derive(Debug)]
pub struct PollEvent {
    pub endpoint: Endpoint,
    pub result: Result<ServerInfo, QueryError>,
}

/// Fans independent query workers out over a set of endpoints.
///
/// Each endpoint gets its own task and its own transport rounds; workers
/// share nothing, and a failing endpoint never disturbs the others.
pub struct Poller {
    endpoints: Vec<Endpoint>,
    config: TransportConfig,
    interval: Duration,
}

impl Poller {
    pub fn new(endpoints: Vec<Endpoint>, config: TransportConfig, interval: Duration) -> Self {
        Poller {
            endpoints,
            config,
            interval,
        }
    }

    /// Runs one worker per endpoint until `signal` fires, reporting every
    /// attempt on `events`. Resolves once all workers have exited.
    pub async fn run(self, signal: ShutdownSignal, events: mpsc::Sender<PollEvent>) {
        let mut workers = JoinSet::new();
        for endpoint in self.endpoints {
            workers.spawn(poll_endpoint(
                endpoint,
                self.config,
                self.interval,
                signal.clone(),
                events.clone(),
            ));
        }
        while workers.join_next().await.is_some() {}
    }
}

async fn poll_endpoint(
    endpoint: Endpoint,
    config: TransportConfig,
    interval: Duration,
    mut signal: ShutdownSignal,
    events: mpsc::Sender<PollEvent>,
) {
    let mut ticker = tokio::time::interval(interval);
    // a query that outlasts the interval delays the next tick instead of
    // letting ticks pile up
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = signal.wait() => break,
            _ = ticker.tick() => {}
        }

        // racing the query against shutdown drops the in-flight receive,
        // so a cancelled cycle never reports a result
        let result = tokio::select! {
            _ = signal.wait() => break,
            result = query::query(&endpoint, config) => result,
        };

        if let Err(err) = &result {
            warn!("{endpoint}: {err}");
        }
        if events
            .send(PollEvent {
                endpoint: endpoint.clone(),
                result,
            })
            .await
            .is_err()
        {
            // receiver dropped, nobody is listening anymore
            break;
        }
    }
    info!("worker for {endpoint} stopped");
}
