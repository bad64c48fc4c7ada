use std::fmt;

use jenq_client::ClientError;
use thiserror::Error;

pub type FacadeResult<T> = Result<T, FacadeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Job,
    View,
    Build,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotFoundKind::Job => "job",
            NotFoundKind::View => "view",
            NotFoundKind::Build => "build",
        })
    }
}

/// Failure of a façade operation.
///
/// `NotFound` is the domain-level absence ("no such job"); `Remote` wraps a
/// genuine transport or server fault.  Callers that only care about
/// "did I get a usable value" can treat both the same way, which is exactly
/// what the tool layer does.
#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("{kind} {name} not found")]
    NotFound { kind: NotFoundKind, name: String },

    #[error("remote call failed: {0}")]
    Remote(ClientError),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FacadeError {
    pub fn not_found(kind: NotFoundKind, name: impl Into<String>) -> Self {
        FacadeError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FacadeError::NotFound { .. })
    }

    /// Map a client error to the façade taxonomy: a 404 becomes the given
    /// kind of absence, anything else stays a remote fault.
    pub(crate) fn classify(e: ClientError, kind: NotFoundKind, name: impl Into<String>) -> Self {
        if e.is_not_found() {
            FacadeError::not_found(kind, name)
        } else {
            FacadeError::Remote(e)
        }
    }
}
