#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionErrorKind {
    Timeout,
    Closed,
    NotFound,
    InvalidArgument,
    Unsupported,
    Device,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn timeout() -> Self {
        Self {
            kind: SessionErrorKind::Timeout,
            message: "timeout".to_string(),
        }
    }

    pub fn closed() -> Self {
        Self {
            kind: SessionErrorKind::Closed,
            message: "session is closed".to_string(),
        }
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        Self {
            kind: SessionErrorKind::NotFound,
            message: format!("{entity} not found: {id}"),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: SessionErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: SessionErrorKind::Unsupported,
            message: message.into(),
        }
    }

    pub fn device(message: impl Into<String>) -> Self {
        Self {
            kind: SessionErrorKind::Device,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SessionError {}
