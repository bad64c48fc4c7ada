use thiserror::Error;

/// Everything that can go wrong talking to a Jenkins server.
///
/// `NotFound` covers any 404 — the façade decides whether that means
/// "job missing", "view missing", or "never built".  The other variants
/// are genuine transport or protocol faults.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("jenkins returned {code}: {body}")]
    Status { code: u16, body: String },

    #[error("not found")]
    NotFound,

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound)
    }
}
