//! Fixed-size worker pools joined by a completion barrier.
//!
//! [`spawn_pool`] starts `size` workers that compete for items on a shared
//! input stream and feed a shared output stream. A supervisor task waits on
//! every worker through a [`JoinSet`] and closes the output exactly once,
//! after the last worker has returned. Downstream consumers therefore never
//! see the output close while an upstream item is still in flight.

use crate::stream::{StreamReceiver, StreamSender, stream};
use std::future::Future;
use tokio::task::JoinSet;

/// Spawn a pool of `size` workers and return its output stream.
///
/// Each worker loops pulling items from `input` and awaiting
/// `handler(item, output)` until `input` is closed and drained. Failure
/// handling is the handler's concern: it must log and swallow per-item
/// errors so that one bad item never ends a worker.
///
/// A worker that panics is reported by the supervisor; the remaining
/// workers keep draining and the output still closes.
///
/// `size` is clamped to at least one worker so the input always drains.
pub fn spawn_pool<I, O, H, Fut>(
    name: &'static str,
    size: usize,
    input: StreamReceiver<I>,
    handler: H,
) -> StreamReceiver<O>
where
    I: Send + 'static,
    O: Send + 'static,
    H: Fn(I, StreamSender<O>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (output, output_rx) = stream();
    let size = size.max(1);

    let mut workers = JoinSet::new();
    for worker in 1..=size {
        let input = input.clone();
        let output = output.clone();
        let handler = handler.clone();
        workers.spawn(async move {
            let mut handled = 0u64;
            while let Some(item) = input.recv().await {
                handler(item, output.clone()).await;
                handled += 1;
            }
            tracing::info!(pool = name, worker, handled, "worker finished");
        });
    }
    drop(input);

    tokio::spawn(async move {
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(pool = name, error = %e, "worker task ended abnormally");
            }
        }
        tracing::debug!(pool = name, "all workers exited, closing output");
        output.close();
    });

    output_rx
}
