//! HTTP access to the Flexkids parent portal.
//!
//! [`Portal`] is the seam between the pipeline and the network: the stages
//! ask for page bodies and media bytes, [`HttpPortal`] turns those asks into
//! the four fixed requests the portal understands.

use crate::config::Config;
use crate::error::{AuthError, Error, Result};
use crate::types::{PeriodKey, SessionCredential};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use std::sync::Arc;
use url::Url;

/// Login form endpoint
pub const LOGIN_PATH: &str = "/login/login";
/// Album overview page listing the available months
pub const PHOTO_ALBUM_PATH: &str = "/ouder/fotoalbum";
/// Standard album of one month
pub const STANDARD_ALBUM_PATH: &str = "/ouder/fotoalbum/standaardalbum";
/// Media download prefix, followed by the photo id
pub const MEDIA_PATH: &str = "/ouder/media/download/media/";

/// Role parameter the portal expects for parent accounts
pub const PARENT_ROLE: &str = "7";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Abstraction over the portal's endpoints, enabling testability.
///
/// Implementations must be safe to call from many workers at once.
#[async_trait::async_trait]
pub trait Portal: Send + Sync {
    /// Post the login form and return every cookie the response set, in order.
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<Vec<SessionCredential>, AuthError>;

    /// Body of the album overview page.
    async fn period_listing(&self, session: &SessionCredential) -> Result<String>;

    /// Body of the standard album for one period.
    async fn album_listing(&self, session: &SessionCredential, period: PeriodKey)
    -> Result<String>;

    /// Raw bytes of one photo.
    async fn photo(&self, session: &SessionCredential, photo_id: u64) -> Result<Vec<u8>>;
}

/// Production [`Portal`] backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpPortal {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl HttpPortal {
    /// Create a portal client for the configured base URL
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::RequestBuild {
                url: config.base_url.clone(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> Result<Url> {
        let raw = self.config.endpoint(path);
        Url::parse(&raw).map_err(|e| Error::RequestBuild {
            url: raw,
            reason: e.to_string(),
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::from_reqwest(url.as_str(), e))?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl Portal for HttpPortal {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<Vec<SessionCredential>, AuthError> {
        let url = self
            .url(LOGIN_PATH)
            .map_err(|e| AuthError::RequestBuild(e.to_string()))?;

        let form = [
            ("username", username),
            ("password", password),
            ("role", PARENT_ROLE),
        ];

        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    AuthError::RequestBuild(e.to_string())
                } else {
                    AuthError::Transport(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response
            .cookies()
            .map(|c| SessionCredential::new(c.name(), c.value()))
            .collect())
    }

    async fn period_listing(&self, session: &SessionCredential) -> Result<String> {
        let url = self.url(PHOTO_ALBUM_PATH)?;
        let request = self
            .client
            .get(url.clone())
            .header(COOKIE, session.header_value());

        let response = self.send(request, &url).await?;
        response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(url.as_str(), e))
    }

    async fn album_listing(
        &self,
        session: &SessionCredential,
        period: PeriodKey,
    ) -> Result<String> {
        let url = self.url(STANDARD_ALBUM_PATH)?;
        // encoded by hand: .form() would set a content type without the charset
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("month", &period.month.to_string())
            .append_pair("year", &period.year.to_string())
            .finish();

        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(COOKIE, session.header_value())
            .body(body);

        let response = self.send(request, &url).await?;
        response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(url.as_str(), e))
    }

    async fn photo(&self, session: &SessionCredential, photo_id: u64) -> Result<Vec<u8>> {
        let url = self.url(&format!("{}{}", MEDIA_PATH, photo_id))?;
        let request = self
            .client
            .get(url.clone())
            .header(COOKIE, session.header_value());

        let response = self.send(request, &url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::from_reqwest(url.as_str(), e))?;
        Ok(bytes.to_vec())
    }
}
