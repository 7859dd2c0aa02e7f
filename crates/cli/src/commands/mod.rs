//! CLI command implementations.

pub mod seed;
pub mod tenant;

use url::Url;

use kostpanel_portal::backend::BackendClient;

/// Build the backend client from the flag or the `KOST_BACKEND_URL`
/// environment variable.
pub fn connect(flag: Option<&str>) -> Result<BackendClient, Box<dyn std::error::Error>> {
    let raw = match flag {
        Some(raw) => raw.to_owned(),
        None => std::env::var("KOST_BACKEND_URL")
            .map_err(|_| "missing backend URL (use --backend-url or KOST_BACKEND_URL)")?,
    };
    let url = Url::parse(&raw)?;
    Ok(BackendClient::new(url))
}
