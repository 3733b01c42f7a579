use crate::ItemId;
use std::fmt;

/// Library error.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub(crate) fn invalid_release(id: ItemId) -> Self {
        Self::new(
            ErrorKind::InvalidState,
            format!("releasing item {} with an invalid id, or the map is corrupted", id.get()),
        )
    }

    pub(crate) fn owner_gone() -> Self {
        Self::new(ErrorKind::OwnerClosed, String::from("owner thread is gone"))
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message of the error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id map error: {} ({})", self.kind(), self.message())
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.to_string(),
        }
    }
}

/// Library error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A release named a slot that is out of range, vacant, or occupied by a
    /// different node. This is a caller bug (double release, a foreign id, or
    /// a corrupted owning tree), not a recoverable condition.
    InvalidState,

    /// The owner thread behind a [`MapHandle`](crate::MapHandle) has exited.
    OwnerClosed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState => f.write_str("invalid state"),
            Self::OwnerClosed => f.write_str("owner was closed"),
        }
    }
}
