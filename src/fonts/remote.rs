use super::{validate, LoadedFace};
use crate::error::FontError;
use std::time::Duration;
use tracing::debug;

/// Downloads one font file. The whole exchange, body included, must finish
/// within `timeout`.
pub(super) async fn fetch_font(
    client: &reqwest::Client,
    family: &str,
    url: &str,
    timeout: Duration,
) -> Result<LoadedFace, FontError> {
    debug!("Fetching font {} from {}", family, url);

    let network = |e: reqwest::Error| FontError::Network {
        family: family.to_string(),
        reason: e.to_string(),
    };

    let request = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?;
        response.bytes().await.map_err(network)
    };

    let bytes = tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| FontError::Timeout {
            family: family.to_string(),
            millis: timeout.as_millis(),
        })??;

    validate(family, bytes.to_vec())
}
