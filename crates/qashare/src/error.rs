use std::io;

/// App related errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid origin '{0}': {1}")]
    InvalidOrigin(String, String),
}

/// Reasons a set of share props cannot describe a question or answer
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TargetError {
    #[error("question id is empty")]
    MissingQuestionId,

    #[error("answer target without an answer id")]
    MissingAnswerId,

    #[error("unknown share kind '{0}'")]
    UnknownKind(String),

    #[error("unknown share mode '{0}'")]
    UnknownMode(String),
}

impl Error {
    pub fn invalid_origin(origin: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidOrigin(origin.into(), reason.to_string())
    }
}
