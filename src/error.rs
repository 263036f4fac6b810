use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Routing(#[from] saferoute_core::Error),
    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// `true` when the caller sent unusable data, as opposed to an internal failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Json(_) | Error::Routing(saferoute_core::Error::InvalidInput(_))
        )
    }
}
