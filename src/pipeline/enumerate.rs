//! Period enumerator: one listing request, one item per listed period.

use super::StageContext;
use crate::stream::{StreamReceiver, StreamSender, stream};
use crate::types::PeriodKey;
use std::sync::Arc;

/// Spawn the enumerator task and return its period stream.
///
/// The stream closes when the task ends. A failed listing request closes it
/// empty, which lets the rest of the pipeline drain with zero work.
pub(crate) fn start_enumerator(ctx: Arc<StageContext>) -> StreamReceiver<PeriodKey> {
    let (tx, rx) = stream();
    tokio::spawn(async move {
        enumerate_periods(&ctx, &tx).await;
        tx.close();
    });
    rx
}

async fn enumerate_periods(ctx: &StageContext, out: &StreamSender<PeriodKey>) {
    let body = match ctx.portal.period_listing(&ctx.session).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Error calling months, no periods to harvest");
            return;
        }
    };

    let periods = ctx.periods.extract(&body);
    if periods.is_empty() {
        tracing::warn!("album overview lists no periods");
    }

    for period in periods {
        // a missing directory only costs this period its photos, so keep going
        if let Err(e) = ctx.storage.ensure_period_dir(&period).await {
            tracing::warn!(period = %period, error = %e, "Could not create directory");
        }

        if !out.send(period) {
            tracing::warn!(period = %period, "album resolvers are gone, stopping enumeration");
            return;
        }
        ctx.stats.period_emitted();
        tracing::debug!(period = %period, "period discovered");
    }
}
