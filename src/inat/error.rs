use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Failed to decode observation page: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for SourceError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => SourceError::Status(code),
            ureq::Error::Transport(transport) => SourceError::Transport(transport.to_string()),
        }
    }
}
