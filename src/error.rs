use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The fatal error kinds a dynamic CSP instance can fail with.
///
/// `RetractInactive`, re-adding an already-active pair, and a search step
/// finding no assignment are *not* represented here: per the error-handling
/// design those are non-fatal outcomes reported as warnings or as a normal
/// report line, never as `Err(...)`.
#[derive(Debug, thiserror::Error)]
pub enum DyCspError {
    #[error("{path}:{line}: {message}")]
    InputParse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("{path}:{line}: variable {variable} has no domain line")]
    UnknownVariable {
        path: String,
        line: usize,
        variable: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<DyCspError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<DyCspError> for Error {
    fn from(inner: DyCspError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(Backtrace::capture()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(inner: std::io::Error) -> Self {
        DyCspError::Io(inner).into()
    }
}
