// ── Request outcome ──
//
// The single result shape every gateway call resolves to. Loaders branch on
// it; nothing above the gateway sees a `torbox_api::Error`.

/// Result of one gateway call. Only `Success` carries data.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    Success(T),
    /// The server answered with a failure: a non-2xx status, or a 2xx
    /// envelope with `success: false`.
    HttpError { status: u16, message: String },
    /// The server could not be reached, or its answer could not be parsed.
    TransportError(String),
    /// Refused locally before any I/O.
    PreconditionFailed(String),
}

impl<T> RequestOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable failure text, `None` on success.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::HttpError { message, .. }
            | Self::TransportError(message)
            | Self::PreconditionFailed(message) => Some(message),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> RequestOutcome<&T> {
        match self {
            Self::Success(value) => RequestOutcome::Success(value),
            Self::HttpError { status, message } => RequestOutcome::HttpError {
                status: *status,
                message: message.clone(),
            },
            Self::TransportError(message) => RequestOutcome::TransportError(message.clone()),
            Self::PreconditionFailed(reason) => RequestOutcome::PreconditionFailed(reason.clone()),
        }
    }
}

impl<T> From<Result<T, torbox_api::Error>> for RequestOutcome<T> {
    fn from(result: Result<T, torbox_api::Error>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) if err.is_precondition() => Self::PreconditionFailed(err.to_string()),
            Err(err) if err.is_transport() => Self::TransportError(err.to_string()),
            // Remote failures display as the server's own message.
            Err(err) => Self::HttpError {
                status: err.status().unwrap_or_default(),
                message: err.to_string(),
            },
        }
    }
}
