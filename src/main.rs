use anyhow::Result;
use bytes::Bytes;
use procsnap::models::{MemInfo, stringify};
use procsnap::provider::FileProvider;
use procsnap::worker::{WorkerConfig, WorkerDeps};
use procsnap::*;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = version::VERSION,
        path = %app_config.sampler.path,
        interval_ms = app_config.sampler.interval_ms,
        "{} starting",
        version::NAME
    );

    let provider = FileProvider::new(&app_config.sampler.path);
    let first: MemInfo =
        get_current(provider.clone()).map_err(|e| anyhow::anyhow!("initial sample: {}", e))?;
    tracing::info!("initial sample\n{}", first);

    let (out_tx, out_rx) = mpsc::channel::<Bytes>(app_config.channels.output_capacity);
    let (err_tx, err_rx) = mpsc::channel::<SampleError>(app_config.channels.error_capacity);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let mut worker_handle = worker::spawn(
        WorkerDeps {
            session: Session::<MemInfo, _>::with_line_limit(
                provider,
                app_config.sampler.line_limit,
            ),
            out_tx,
            err_tx,
            shutdown_rx,
        },
        WorkerConfig {
            interval_ms: app_config.sampler.interval_ms,
        },
    );
    let consumer_handle = tokio::spawn(consume(
        out_rx,
        err_rx,
        Duration::from_secs(app_config.monitoring.stats_log_interval_secs),
    ));

    let stopped_early = tokio::select! {
        _ = shutdown_signal() => false,
        _ = &mut worker_handle => true,
    };
    if stopped_early {
        tracing::warn!("Sampler worker exited before shutdown was requested");
    } else {
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
        let _ = worker_handle.await;
    }
    let _ = consumer_handle.await;

    Ok(())
}

/// Drains both channels until the worker closes the output channel.
async fn consume(
    mut out_rx: mpsc::Receiver<Bytes>,
    mut err_rx: mpsc::Receiver<SampleError>,
    stats_log_interval: Duration,
) {
    let mut stats_log_tick = interval(stats_log_interval);
    stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames_received: u64 = 0;
    let mut errors_received: u64 = 0;
    let mut errors_closed = false;

    loop {
        tokio::select! {
            frame = out_rx.recv() => {
                let Some(frame) = frame else { break };
                frames_received += 1;
                match codec::decode::<MemInfo>(&frame) {
                    Ok(info) => tracing::debug!(bytes = frame.len(), "frame\n{}", stringify(&info)),
                    Err(e) => tracing::warn!(error = %e, operation = "decode", "undecodable frame"),
                }
            }
            err = err_rx.recv(), if !errors_closed => match err {
                Some(e) => {
                    errors_received += 1;
                    tracing::debug!(error = %e, "sampler error received");
                }
                None => errors_closed = true,
            },
            _ = stats_log_tick.tick() => {
                tracing::info!(frames_received, errors_received, "sampler stats");
            }
        }
    }
    tracing::info!(frames_received, errors_received, "Output channel closed");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
