use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Structural damage found while building the box tree. Aborts the
    /// whole parse; nothing partial is handed back.
    #[error("malformed box at offset {offset:#x}: {reason}")]
    MalformedBox { offset: u64, reason: String },

    /// A length-prefixed sample could not be decomposed exactly into NAL
    /// units. Aborts only that sample's decomposition.
    #[error("truncated NAL unit at sample offset {offset}: need {needed} bytes, {remaining} left")]
    TruncatedNalUnit {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

impl Error {
    pub(crate) fn malformed(offset: u64, reason: impl Into<String>) -> Error {
        Error::MalformedBox {
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
