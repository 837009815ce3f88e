use thiserror::Error;

/// Failures the map pipeline distinguishes.
///
/// `NetworkFailure` and `MalformedFeed` are shown to the user inside the map
/// area; `MissingCredential` stops the process before anything is served.
#[derive(Debug, Error)]
pub enum QuakeMapError {
    #[error("network failure fetching {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    #[error("missing map tile access token (set API_KEY or access_token in {config})")]
    MissingCredential { config: String },
}

impl QuakeMapError {
    /// Stable machine-readable name, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            QuakeMapError::NetworkFailure { .. } => "network_failure",
            QuakeMapError::MalformedFeed(_) => "malformed_feed",
            QuakeMapError::MissingCredential { .. } => "missing_credential",
        }
    }

    pub fn network(url: &str, reason: impl ToString) -> Self {
        QuakeMapError::NetworkFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
