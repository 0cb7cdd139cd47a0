use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short text meant for the list screen's error banner.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidUrl(_) => "Invalid request URL".to_string(),
            Error::Transport(msg) => format!("Network request failed: {}", msg),
            Error::Http(e) if e.is_timeout() => "The news service did not respond in time".to_string(),
            Error::Http(_) => "Network request failed".to_string(),
            Error::MalformedResponse(msg) => {
                format!("Could not load articles or an error occurred: {}", msg)
            }
            Error::Serialization(_) => "The news service returned an unreadable response".to_string(),
            Error::Config(msg) => format!("Configuration problem: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
