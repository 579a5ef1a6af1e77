/// Electrode geometry error type.
#[derive(Debug)]
pub enum ElecsError {
    /// IO error.
    IoError(crate::io::IoError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for ElecsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElecsError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            ElecsError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::io::IoError> for ElecsError {
    fn from(error: crate::io::IoError) -> Self {
        ElecsError::IoError(error)
    }
}
impl From<String> for ElecsError {
    fn from(error: String) -> Self {
        ElecsError::StringOnly(error)
    }
}

/// Result type for the `elecs` module.
pub type ProcResult<T> = std::result::Result<T, ElecsError>;

/// Create a `ElecsError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(ElecsError::StringOnly(error_str.to_string()))
}
