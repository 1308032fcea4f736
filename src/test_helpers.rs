//! Shared test helpers: an in-memory portal that records every call.

use crate::config::Config;
use crate::error::{AuthError, Error, Result};
use crate::extract::{RegexPeriodExtractor, RegexPhotoIdExtractor};
use crate::pipeline::StageContext;
use crate::portal::Portal;
use crate::storage::Storage;
use crate::types::{PeriodKey, SessionCredential};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One request as seen by [`MockPortal`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PortalCall {
    Login,
    PeriodListing,
    Album(PeriodKey),
    Photo(u64),
}

/// How a scripted request fails
#[derive(Clone, Copy, Debug)]
pub(crate) enum Failure {
    RequestBuild,
    Transport,
}

impl Failure {
    fn into_error(self, url: &str) -> Error {
        match self {
            Failure::RequestBuild => Error::RequestBuild {
                url: url.to_string(),
                reason: "scripted request build failure".to_string(),
            },
            Failure::Transport => Error::Status {
                url: url.to_string(),
                status: 503,
            },
        }
    }
}

/// Scripted [`Portal`] double
pub(crate) struct MockPortal {
    cookies: Vec<SessionCredential>,
    login_status: Option<u16>,
    listing: Option<String>,
    default_album: String,
    albums: HashMap<PeriodKey, String>,
    album_failures: HashMap<PeriodKey, Failure>,
    photo_failures: HashSet<u64>,
    calls: Mutex<Vec<PortalCall>>,
}

impl MockPortal {
    /// One session cookie, an empty overview page and empty albums
    pub(crate) fn new() -> Self {
        Self {
            cookies: vec![SessionCredential::new("PHPSESSID", "test-session")],
            login_status: None,
            listing: Some(String::new()),
            default_album: String::new(),
            albums: HashMap::new(),
            album_failures: HashMap::new(),
            photo_failures: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_cookies(mut self, cookies: Vec<SessionCredential>) -> Self {
        self.cookies = cookies;
        self
    }

    pub(crate) fn reject_login(mut self, status: u16) -> Self {
        self.login_status = Some(status);
        self
    }

    pub(crate) fn with_listing(mut self, body: &str) -> Self {
        self.listing = Some(body.to_string());
        self
    }

    pub(crate) fn fail_listing(mut self) -> Self {
        self.listing = None;
        self
    }

    pub(crate) fn with_default_album(mut self, body: &str) -> Self {
        self.default_album = body.to_string();
        self
    }

    pub(crate) fn with_album(mut self, period: PeriodKey, body: &str) -> Self {
        self.albums.insert(period, body.to_string());
        self
    }

    pub(crate) fn fail_album(mut self, period: PeriodKey, failure: Failure) -> Self {
        self.album_failures.insert(period, failure);
        self
    }

    pub(crate) fn fail_photo(mut self, photo_id: u64) -> Self {
        self.photo_failures.insert(photo_id);
        self
    }

    /// Bytes served for `photo_id`
    pub(crate) fn photo_bytes(photo_id: u64) -> Vec<u8> {
        format!("photo-{photo_id}").into_bytes()
    }

    /// Every call so far, in arrival order
    pub(crate) fn calls(&self) -> Vec<PortalCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: PortalCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl Portal for MockPortal {
    async fn login(
        &self,
        _username: &str,
        _password: &str,
    ) -> std::result::Result<Vec<SessionCredential>, AuthError> {
        self.record(PortalCall::Login);
        if let Some(status) = self.login_status {
            return Err(AuthError::Rejected { status });
        }
        Ok(self.cookies.clone())
    }

    async fn period_listing(&self, _session: &SessionCredential) -> Result<String> {
        self.record(PortalCall::PeriodListing);
        self.listing
            .clone()
            .ok_or_else(|| Failure::Transport.into_error("/ouder/fotoalbum"))
    }

    async fn album_listing(
        &self,
        _session: &SessionCredential,
        period: PeriodKey,
    ) -> Result<String> {
        self.record(PortalCall::Album(period));
        // let other workers interleave
        tokio::task::yield_now().await;
        if let Some(failure) = self.album_failures.get(&period) {
            return Err(failure.into_error("/ouder/fotoalbum/standaardalbum"));
        }
        Ok(self
            .albums
            .get(&period)
            .cloned()
            .unwrap_or_else(|| self.default_album.clone()))
    }

    async fn photo(&self, _session: &SessionCredential, photo_id: u64) -> Result<Vec<u8>> {
        self.record(PortalCall::Photo(photo_id));
        tokio::task::yield_now().await;
        if self.photo_failures.contains(&photo_id) {
            return Err(Failure::Transport.into_error("/ouder/media/download/media/"));
        }
        Ok(Self::photo_bytes(photo_id))
    }
}

/// Valid configuration writing below `output_dir`
pub(crate) fn test_config(output_dir: &Path) -> Config {
    Config {
        base_url: "http://127.0.0.1:1".to_string(),
        output_dir: output_dir.to_path_buf(),
        username: "parent".to_string(),
        password: "secret".to_string(),
        album_workers: 4,
        photo_workers: 2,
        ..Default::default()
    }
}

/// Stage context over `portal` with the default regex extractors
pub(crate) fn stage_context(portal: MockPortal, output_dir: &Path) -> Arc<StageContext> {
    stage_context_with(Arc::new(portal), test_config(output_dir))
}

/// Stage context over a shared `portal` and a custom configuration
pub(crate) fn stage_context_with(portal: Arc<MockPortal>, config: Config) -> Arc<StageContext> {
    Arc::new(StageContext {
        session: SessionCredential::new("PHPSESSID", "test-session"),
        storage: Storage::new(config.output_dir.clone()),
        config: Arc::new(config),
        portal,
        periods: Arc::new(RegexPeriodExtractor::new().unwrap()),
        photo_ids: Arc::new(RegexPhotoIdExtractor::new().unwrap()),
        stats: Default::default(),
    })
}
