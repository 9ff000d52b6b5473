/// Closed set of status codes returned by every boundary entry point.
///
/// The discriminants are part of the C ABI and never change.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorCode {
    #[error("success")]
    Success = 0,
    #[error("invalid argument")]
    InvalidArgument = 1,
    #[error("backend not found")]
    BackendNotFound = 2,
    #[error("allocation failure")]
    AllocationFailure = 3,
    #[error("uninitialized domain")]
    UninitializedDomain = 4,
    #[error("internal backend error")]
    Internal = 5,
}

impl ErrorCode {
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }

    /// Turns the code into a `Result`, mapping [`ErrorCode::Success`] to `Ok(())`.
    pub fn wrap(self) -> Result<(), ErrorCode> {
        self.wrap_value(())
    }

    pub fn wrap_value<T>(self, value: T) -> Result<T, ErrorCode> {
        match self {
            ErrorCode::Success => Ok(value),
            err => Err(err),
        }
    }
}

impl<T> From<Result<T, NttError>> for ErrorCode {
    fn from(res: Result<T, NttError>) -> Self {
        match res {
            Ok(_) => ErrorCode::Success,
            Err(err) => err.code(),
        }
    }
}

/// Error produced inside the dispatch layer and by backends.
///
/// Each variant corresponds to exactly one non-success [`ErrorCode`]; the
/// payload carries the diagnostic context of the point of detection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NttError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no backend registered for device {0:?}")]
    BackendNotFound(String),
    #[error("failed to allocate {elements} field elements")]
    AllocationFailure { elements: usize },
    #[error("no NTT domain initialized for field {field} on backend {backend}")]
    UninitializedDomain { field: &'static str, backend: &'static str },
    #[error("backend failure: {0}")]
    Internal(String),
}

impl NttError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NttError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            NttError::BackendNotFound(_) => ErrorCode::BackendNotFound,
            NttError::AllocationFailure { .. } => ErrorCode::AllocationFailure,
            NttError::UninitializedDomain { .. } => ErrorCode::UninitializedDomain,
            NttError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Builds an [`NttError::InvalidArgument`] and logs it once, at the point of detection.
    pub fn invalid(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        tracing::warn!(target: "nttkit", "{msg}");
        NttError::InvalidArgument(msg)
    }
}

pub type NttResult<T> = Result<T, NttError>;
