/// Scheme writing error type.
#[derive(Debug)]
pub enum SchemeError {
    /// IO error.
    IoError(crate::io::IoError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for SchemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemeError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            SchemeError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::io::IoError> for SchemeError {
    fn from(error: crate::io::IoError) -> Self {
        SchemeError::IoError(error)
    }
}
impl From<String> for SchemeError {
    fn from(error: String) -> Self {
        SchemeError::StringOnly(error)
    }
}

/// Result type for the `scheme` module.
pub type ProcResult<T> = std::result::Result<T, SchemeError>;

/// Create a `SchemeError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(SchemeError::StringOnly(error_str.to_string()))
}
