//! The harvest pipeline, split into one submodule per stage.
//!
//! - [`enumerate`] - lists the periods and lays out their directories
//! - [`resolve`] - album resolver pool, period to photo references
//! - [`fetch`] - photo fetcher pool, writes photos and signals completion
//!
//! Stages are connected by unbounded [`crate::stream`] queues. Each pool
//! closes its output only after all of its workers have exited, so the
//! fetcher's completion stream closes exactly when every stage is done.

mod enumerate;
mod fetch;
mod resolve;
mod stats;

use crate::config::Config;
use crate::error::Result;
use crate::extract::{
    PeriodExtractor, PhotoIdExtractor, RegexPeriodExtractor, RegexPhotoIdExtractor,
};
use crate::portal::{HttpPortal, Portal};
use crate::session;
use crate::storage::Storage;
use crate::types::{PipelineState, RunSummary, SessionCredential};
use stats::RunStats;
use std::sync::Arc;

/// Shared read-only state handed to every stage task
pub(crate) struct StageContext {
    pub(crate) session: SessionCredential,
    pub(crate) config: Arc<Config>,
    pub(crate) portal: Arc<dyn Portal>,
    pub(crate) storage: Storage,
    pub(crate) periods: Arc<dyn PeriodExtractor>,
    pub(crate) photo_ids: Arc<dyn PhotoIdExtractor>,
    pub(crate) stats: RunStats,
}

/// Runs the whole login, enumerate, resolve and fetch sequence
#[derive(Clone)]
pub struct Harvester {
    config: Arc<Config>,
    portal: Arc<dyn Portal>,
    periods: Arc<dyn PeriodExtractor>,
    photo_ids: Arc<dyn PhotoIdExtractor>,
}

impl Harvester {
    /// Create a harvester talking to the configured portal over HTTP
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let portal = Arc::new(HttpPortal::new(Arc::clone(&config))?);
        Self::build(config, portal)
    }

    /// Create a harvester around a custom [`Portal`]
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn with_portal(config: Config, portal: Arc<dyn Portal>) -> Result<Self> {
        config.validate()?;
        Self::build(Arc::new(config), portal)
    }

    fn build(config: Arc<Config>, portal: Arc<dyn Portal>) -> Result<Self> {
        Ok(Self {
            config,
            portal,
            periods: Arc::new(RegexPeriodExtractor::new()?),
            photo_ids: Arc::new(RegexPhotoIdExtractor::new()?),
        })
    }

    /// Replace the page extractors
    pub fn with_extractors(
        mut self,
        periods: Arc<dyn PeriodExtractor>,
        photo_ids: Arc<dyn PhotoIdExtractor>,
    ) -> Self {
        self.periods = periods;
        self.photo_ids = photo_ids;
        self
    }

    /// The configuration this harvester runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Log in, then harvest every photo until the pipeline drains.
    ///
    /// Per-item failures are logged and counted in the summary; they never
    /// fail the run.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Auth`] if no session could be acquired, in
    /// which case no further request is made.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!(state = %PipelineState::Authenticating, "pipeline state");
        let session = session::acquire(self.portal.as_ref(), &self.config).await?;
        Ok(self.harvest(session).await)
    }

    /// Run the pipeline with an already acquired session.
    pub async fn harvest(&self, session: SessionCredential) -> RunSummary {
        let ctx = Arc::new(StageContext {
            session,
            config: Arc::clone(&self.config),
            portal: Arc::clone(&self.portal),
            storage: Storage::new(self.config.output_dir.clone()),
            periods: Arc::clone(&self.periods),
            photo_ids: Arc::clone(&self.photo_ids),
            stats: RunStats::default(),
        });

        tracing::info!(state = %PipelineState::Enumerating, "pipeline state");
        let periods = enumerate::start_enumerator(Arc::clone(&ctx));
        let photos = resolve::start_album_resolvers(Arc::clone(&ctx), periods);
        let done = fetch::start_photo_fetchers(Arc::clone(&ctx), photos);

        tracing::info!(
            state = %PipelineState::Harvesting,
            album_workers = self.config.album_workers,
            photo_workers = self.config.photo_workers,
            "pipeline state"
        );

        // the completion stream carries no items, it only closes
        while done.recv().await.is_some() {}

        let summary = ctx.stats.snapshot();
        tracing::info!(state = %PipelineState::Drained, %summary, "Downloaded all photos");
        summary
    }
}
