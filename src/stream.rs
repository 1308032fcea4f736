//! Unbounded multi-producer/multi-consumer queues connecting pipeline stages.
//!
//! A stream closes once every [`StreamSender`] clone has been dropped or
//! closed. Receivers then drain what is left and observe exhaustion as
//! `None`. Sends never block, so a slow stage cannot stall its producers.

use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Create a new unbounded stream.
pub fn stream<T>() -> (StreamSender<T>, StreamReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        StreamSender { inner: tx },
        StreamReceiver {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer half of a stream (cloneable, one clone per producer)
#[derive(Debug)]
pub struct StreamSender<T> {
    inner: mpsc::UnboundedSender<T>,
}

impl<T> Clone for StreamSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> StreamSender<T> {
    /// Enqueue an item.
    ///
    /// Returns `false` if every receiver is gone and the item was dropped.
    pub fn send(&self, item: T) -> bool {
        self.inner.send(item).is_ok()
    }

    /// Give up this producer's handle on the stream.
    ///
    /// The stream itself closes when the last producer closes.
    pub fn close(self) {
        drop(self);
    }

    /// Whether all receivers have been dropped.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// Consumer half of a stream (cloneable, clones compete for items)
#[derive(Debug)]
pub struct StreamReceiver<T> {
    inner: Arc<Mutex<mpsc::UnboundedReceiver<T>>>,
}

impl<T> Clone for StreamReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> StreamReceiver<T> {
    /// Take the next item, waiting while the stream is empty but open.
    ///
    /// Returns `None` once the stream is closed and drained.
    pub async fn recv(&self) -> Option<T> {
        self.inner.lock().await.recv().await
    }

    /// Drain the stream to completion.
    pub async fn collect(self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.recv().await {
            items.push(item);
        }
        items
    }
}
