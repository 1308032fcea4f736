//! Session acquisition: the one-shot login that precedes every run.

use crate::config::Config;
use crate::error::AuthError;
use crate::portal::Portal;
use crate::types::SessionCredential;

/// Log in and pick the session cookie.
///
/// The first cookie set by the login response becomes the session
/// credential for the whole run. A response without cookies is an
/// [`AuthError::NoSessionCookie`].
///
/// # Errors
///
/// Any [`AuthError`] is fatal: the caller must not start the pipeline.
pub async fn acquire(
    portal: &dyn Portal,
    config: &Config,
) -> Result<SessionCredential, AuthError> {
    let cookies = match portal.login(&config.username, &config.password).await {
        Ok(cookies) => cookies,
        Err(e) => {
            tracing::error!(base_url = %config.base_url, error = %e, "Cannot login to flexkids");
            return Err(e);
        }
    };

    let count = cookies.len();
    let session = cookies
        .into_iter()
        .next()
        .ok_or(AuthError::NoSessionCookie)?;

    tracing::info!(cookie = session.name(), cookies = count, "Login successful");
    Ok(session)
}
