//! Run counters shared by all stages.

use crate::types::RunSummary;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free tallies updated by workers as items complete
#[derive(Debug, Default)]
pub(crate) struct RunStats {
    periods: AtomicU64,
    albums_failed: AtomicU64,
    photos_discovered: AtomicU64,
    photos_saved: AtomicU64,
    photos_failed: AtomicU64,
}

impl RunStats {
    pub(crate) fn period_emitted(&self) {
        self.periods.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn album_failed(&self) {
        self.albums_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn photo_discovered(&self) {
        self.photos_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn photo_saved(&self) {
        self.photos_saved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn photo_failed(&self) {
        self.photos_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters; exact once the pipeline has drained.
    pub(crate) fn snapshot(&self) -> RunSummary {
        RunSummary {
            periods: self.periods.load(Ordering::Relaxed),
            albums_failed: self.albums_failed.load(Ordering::Relaxed),
            photos_discovered: self.photos_discovered.load(Ordering::Relaxed),
            photos_saved: self.photos_saved.load(Ordering::Relaxed),
            photos_failed: self.photos_failed.load(Ordering::Relaxed),
        }
    }
}
