use std::sync::Arc;

use crate::config::DatasetSettings;
use crate::http_client;

use super::{IrisTable, LoadError, parse_table};

/// Download and parse the dataset with a single GET. No retry.
pub fn fetch_table(settings: &DatasetSettings) -> Result<IrisTable, LoadError> {
    let url = settings.url.as_str();
    tracing::info!(url, "Fetching dataset");
    let response = http_client::agent().get(url).call().map_err(|err| match err {
        ureq::Error::Status(status, _) => LoadError::Status {
            url: url.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => LoadError::Fetch {
            url: url.to_string(),
            message: transport.to_string(),
        },
    })?;
    let bytes = http_client::read_response_bytes(response, settings.max_bytes).map_err(|source| {
        LoadError::Read {
            url: url.to_string(),
            source: Arc::new(source),
        }
    })?;
    tracing::debug!(bytes = bytes.len(), "Dataset downloaded");
    parse_table(&bytes)
}
