use std::process::ExitCode;

use log::{error, info};
use tokio::signal;
use tokio::sync::mpsc;

use sourcewatch::config::Config;
use sourcewatch::poll::{shutdown_channel, PollEvent, Poller};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (shutdown, shutdown_signal) = shutdown_channel();
    let (events_tx, mut events_rx) = mpsc::channel(16);

    let poller = Poller::new(config.servers, config.transport, config.interval);
    let runner = tokio::spawn(poller.run(shutdown_signal, events_tx));

    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("signal received, shutting down");
        shutdown.shutdown();
    });

    // the channel closes once every worker has stopped
    while let Some(event) = events_rx.recv().await {
        report(event);
    }

    if runner.await.is_err() {
        error!("poller task panicked");
        return ExitCode::FAILURE;
    }
    info!("all workers stopped");
    ExitCode::SUCCESS
}

fn report(event: PollEvent) {
    // failures are already logged by the poll workers
    if let PollEvent {
        endpoint,
        result: Ok(server),
    } = event
    {
        info!(
            "{endpoint}: {} | map {} | {}/{} players ({} bots) | version {}",
            server.server_name,
            server.map_name,
            server.players,
            server.max_players,
            server.bots,
            server.version,
        );
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
