//! Photo fetcher pool: downloads each photo and writes it below its period.

use super::StageContext;
use crate::pool::spawn_pool;
use crate::stream::{StreamReceiver, StreamSender};
use crate::types::PhotoRef;
use std::sync::Arc;

const POOL_NAME: &str = "photo-fetcher";

/// Start `photo_workers` fetchers on `photos`.
///
/// The returned stream never yields an item; it closes once every fetcher
/// has exited, which marks the end of the whole pipeline.
pub(crate) fn start_photo_fetchers(
    ctx: Arc<StageContext>,
    photos: StreamReceiver<PhotoRef>,
) -> StreamReceiver<()> {
    let size = ctx.config.photo_workers;
    spawn_pool(POOL_NAME, size, photos, move |photo, _done: StreamSender<()>| {
        let ctx = Arc::clone(&ctx);
        async move { fetch_photo(&ctx, photo).await }
    })
}

async fn fetch_photo(ctx: &StageContext, photo: PhotoRef) {
    let content = match ctx.portal.photo(&ctx.session, photo.photo_id).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(photo = %photo, error = %e, "Error calling photo");
            ctx.stats.photo_failed();
            return;
        }
    };

    tracing::info!(
        period = %photo.period,
        photo_id = photo.photo_id,
        bytes = content.len(),
        "Downloading photo"
    );

    match ctx.storage.write_photo(&photo, &content).await {
        Ok(_) => ctx.stats.photo_saved(),
        Err(e) => {
            tracing::error!(photo = ?photo, error = %e, "error while downloading");
            ctx.stats.photo_failed();
        }
    }
}
