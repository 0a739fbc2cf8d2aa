use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unauthorized: invalid username or password")]
    Unauthorized,

    #[error("Request to '{resource}' failed with status {status}: {body}")]
    Status {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Response is missing the '{0}' collection")]
    MissingCollection(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True only for a 401 answer, the one failure the login form recovers from
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
