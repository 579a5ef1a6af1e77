/// Survey loading error type.
#[derive(Debug)]
pub enum SurveyError {
    /// IO error (includes spreadsheet errors).
    IoError(crate::io::IoError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            SurveyError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::io::IoError> for SurveyError {
    fn from(error: crate::io::IoError) -> Self {
        SurveyError::IoError(error)
    }
}
impl From<String> for SurveyError {
    fn from(error: String) -> Self {
        SurveyError::StringOnly(error)
    }
}

/// Result type for the `survey` module.
pub type ProcResult<T> = std::result::Result<T, SurveyError>;

/// Create a `SurveyError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(SurveyError::StringOnly(error_str.to_string()))
}
