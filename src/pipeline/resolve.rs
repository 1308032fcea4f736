//! Album resolver pool: each period becomes one photo reference per listed id.

use super::StageContext;
use crate::pool::spawn_pool;
use crate::stream::{StreamReceiver, StreamSender};
use crate::types::{PeriodKey, PhotoRef};
use std::sync::Arc;

const POOL_NAME: &str = "album-resolver";

/// Start `album_workers` resolvers on `periods` and return the photo stream.
pub(crate) fn start_album_resolvers(
    ctx: Arc<StageContext>,
    periods: StreamReceiver<PeriodKey>,
) -> StreamReceiver<PhotoRef> {
    let size = ctx.config.album_workers;
    spawn_pool(POOL_NAME, size, periods, move |period, out| {
        let ctx = Arc::clone(&ctx);
        async move { resolve_album(&ctx, period, &out).await }
    })
}

/// Look up the album of one period and emit its photos.
///
/// Failures skip the period; the worker moves on to the next one.
async fn resolve_album(ctx: &StageContext, period: PeriodKey, out: &StreamSender<PhotoRef>) {
    let body = match ctx.portal.album_listing(&ctx.session, period).await {
        Ok(body) => body,
        Err(e) if e.is_request_build() => {
            tracing::error!(period = %period, error = %e, "Error creating request for albums");
            ctx.stats.album_failed();
            return;
        }
        Err(e) => {
            tracing::warn!(period = %period, error = %e, "Error retrieving the album");
            ctx.stats.album_failed();
            return;
        }
    };

    let ids = ctx.photo_ids.extract(&body);
    tracing::debug!(period = %period, photos = ids.len(), "album resolved");

    for photo_id in ids {
        if !out.send(PhotoRef::new(period, photo_id)) {
            tracing::warn!(period = %period, photo_id, "photo fetchers are gone, dropping album");
            return;
        }
        ctx.stats.photo_discovered();
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::stream;
    use crate::test_helpers::{
        Failure, MockPortal, PortalCall, stage_context, stage_context_with, test_config,
    };
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_emits_one_ref_per_id_with_the_same_period() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = stage_context(
            MockPortal::new().with_default_album(r#""11" "12" "11""#),
            temp_dir.path(),
        );

        let (tx, rx) = stream();
        tx.send(PeriodKey::new(2021, 5));
        tx.close();

        let photos = start_album_resolvers(ctx, rx).collect().await;
        let period = PeriodKey::new(2021, 5);
        // duplicates in the listing are passed through
        assert_eq!(
            photos,
            vec![
                PhotoRef::new(period, 11),
                PhotoRef::new(period, 12),
                PhotoRef::new(period, 11),
            ]
        );
    }

    #[tokio::test]
    async fn test_each_period_queried_exactly_once() {
        let temp_dir = TempDir::new().unwrap();
        let portal = Arc::new(MockPortal::new().with_default_album(r#""1""#));
        let ctx = stage_context_with(Arc::clone(&portal), test_config(temp_dir.path()));

        let (tx, rx) = stream();
        for month in 1..=12 {
            tx.send(PeriodKey::new(2020, month));
        }
        tx.close();

        let photos = start_album_resolvers(ctx, rx).collect().await;
        assert_eq!(photos.len(), 12);

        let mut albums: Vec<_> = portal
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                PortalCall::Album(p) => Some(p),
                _ => None,
            })
            .collect();
        albums.sort();
        assert_eq!(
            albums,
            (1..=12).map(|m| PeriodKey::new(2020, m)).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_failures_skip_only_their_period() {
        let temp_dir = TempDir::new().unwrap();
        let portal = MockPortal::new()
            .with_default_album(r#""9""#)
            .fail_album(PeriodKey::new(2020, 1), Failure::RequestBuild)
            .fail_album(PeriodKey::new(2020, 2), Failure::Transport);
        // one worker has to live through both failures
        let mut config = test_config(temp_dir.path());
        config.album_workers = 1;
        let ctx = stage_context_with(Arc::new(portal), config);

        let (tx, rx) = stream();
        for month in 1..=3 {
            tx.send(PeriodKey::new(2020, month));
        }
        tx.close();

        let photos = start_album_resolvers(Arc::clone(&ctx), rx).collect().await;
        assert_eq!(photos, vec![PhotoRef::new(PeriodKey::new(2020, 3), 9)]);
        assert_eq!(ctx.stats.snapshot().albums_failed, 2);
    }
}
