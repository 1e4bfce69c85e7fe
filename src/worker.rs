// Background sampler loop: one task per session, ticking on a fixed schedule.
// Frames go to the output channel, every problem goes to the error channel.

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tracing::Instrument;

use crate::error::SampleError;
use crate::models::Record;
use crate::provider::Provider;
use crate::session::Session;

/// Session, channels, and shutdown for the worker.
///
/// Both channels are bounded by the caller. A full output channel makes the
/// worker wait, but that wait is raced against shutdown, so cancellation is
/// never blocked by a slow consumer.
pub struct WorkerDeps<R, P> {
    pub session: Session<R, P>,
    pub out_tx: mpsc::Sender<Bytes>,
    pub err_tx: mpsc::Sender<SampleError>,
    /// Sending `()` or dropping the sender stops the worker.
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub interval_ms: u64,
}

enum SendOutcome {
    Sent,
    Closed,
    Shutdown,
}

async fn send_or_shutdown<T>(
    tx: &mpsc::Sender<T>,
    item: T,
    shutdown_rx: &mut oneshot::Receiver<()>,
) -> SendOutcome {
    tokio::select! {
        biased;
        _ = shutdown_rx => SendOutcome::Shutdown,
        result = tx.send(item) => match result {
            Ok(()) => SendOutcome::Sent,
            Err(_) => SendOutcome::Closed,
        },
    }
}

/// Spawns the sampler loop.
///
/// The first sample is taken one interval after spawn. A failed tick only
/// costs that tick's frame; the schedule is unaffected. The output sender is
/// dropped when the task ends, which closes the channel for the consumer.
/// The worker also stops when the output receiver is dropped.
pub fn spawn<R, P>(deps: WorkerDeps<R, P>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    R: Record,
    P: Provider + Send + 'static,
{
    let WorkerDeps {
        session,
        out_tx,
        err_tx,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig { interval_ms } = config;
    let period = Duration::from_millis(interval_ms.max(1));
    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        kind = R::KIND,
        target = session.provider().target(),
        interval_ms
    );

    tokio::spawn(
        async move {
            let mut tick = interval_at(Instant::now() + period, period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut session = session;
            let mut pending: Vec<SampleError> = Vec::new();
            let mut err_rx_dropped = false;

            'ticks: loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = tick.tick() => {}
                }

                let joined = tokio::task::spawn_blocking(move || {
                    let result = session.sample_encoded();
                    (session, result)
                })
                .await;
                let result = match joined {
                    Ok((s, result)) => {
                        session = s;
                        result
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            operation = "sample",
                            "sampler task failed, stopping worker"
                        );
                        break;
                    }
                };

                pending.extend(session.drain_faults());
                let frame = match result {
                    Ok(frame) => Some(frame),
                    Err(e) => {
                        pending.push(e);
                        None
                    }
                };

                for e in pending.drain(..) {
                    tracing::warn!(error = %e, operation = "sample", "sample failed");
                    if err_rx_dropped {
                        continue;
                    }
                    match send_or_shutdown(&err_tx, e, &mut shutdown_rx).await {
                        SendOutcome::Sent => {}
                        SendOutcome::Closed => {
                            tracing::debug!("Error channel closed; errors are only logged");
                            err_rx_dropped = true;
                        }
                        SendOutcome::Shutdown => break 'ticks,
                    }
                }

                if let Some(frame) = frame {
                    match send_or_shutdown(&out_tx, frame, &mut shutdown_rx).await {
                        SendOutcome::Sent => {}
                        SendOutcome::Closed => {
                            tracing::debug!("Output channel closed");
                            break;
                        }
                        SendOutcome::Shutdown => break,
                    }
                }
            }
            tracing::debug!("Worker shutting down");
            drop(out_tx);
        }
        .instrument(worker_span),
    )
}
