use crate::{
    args,
    survey,
    elecs,
    mesh,
    scheme,
    sim,
};

/// Error-type enum for the `dikert` crate.
/// Wraps the errors of each stage.
#[derive(Debug)]
pub enum DikertError {
    ArgError(args::ArgError),
    SurveyError(survey::SurveyError),
    ElecsError(elecs::ElecsError),
    MeshError(mesh::MeshError),
    SchemeError(scheme::SchemeError),
    SimError(sim::SimError),
    IoError(crate::io::IoError),
    StringOnly(String),
}
impl std::fmt::Display for DikertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DikertError::ArgError(error) => write!(f, "! ARGUMENT ERROR:\n{}", error),
            DikertError::SurveyError(error) => write!(f, "! SURVEY ERROR:\n{}", error),
            DikertError::ElecsError(error) => write!(f, "! ELECTRODE GEOMETRY ERROR:\n{}", error),
            DikertError::MeshError(error) => write!(f, "! MESHING ERROR:\n{}", error),
            DikertError::SchemeError(error) => write!(f, "! SCHEME ERROR:\n{}", error),
            DikertError::SimError(error) => write!(f, "! SIMULATION ERROR:\n{}", error),
            DikertError::IoError(error) => write!(f, "! IO ERROR:\n{}", error),
            DikertError::StringOnly(error) => write!(f, "! DIKERT ERROR:\n- {}", error),
        }
    }
}
impl From<String> for DikertError {
    fn from(error: String) -> Self {
        DikertError::StringOnly(error)
    }
}
impl From<args::ArgError> for DikertError {
    fn from(error: args::ArgError) -> Self {
        DikertError::ArgError(error)
    }
}
impl From<survey::SurveyError> for DikertError {
    fn from(error: survey::SurveyError) -> Self {
        DikertError::SurveyError(error)
    }
}
impl From<elecs::ElecsError> for DikertError {
    fn from(error: elecs::ElecsError) -> Self {
        DikertError::ElecsError(error)
    }
}
impl From<mesh::MeshError> for DikertError {
    fn from(error: mesh::MeshError) -> Self {
        DikertError::MeshError(error)
    }
}
impl From<scheme::SchemeError> for DikertError {
    fn from(error: scheme::SchemeError) -> Self {
        DikertError::SchemeError(error)
    }
}
impl From<sim::SimError> for DikertError {
    fn from(error: sim::SimError) -> Self {
        DikertError::SimError(error)
    }
}
impl From<crate::io::IoError> for DikertError {
    fn from(error: crate::io::IoError) -> Self {
        DikertError::IoError(error)
    }
}

/// Result type for the `dikert` crate.
pub type DikertResult<T> = std::result::Result<T, DikertError>;

/// Create a `DikertResult` with an `Err` from a string.
/// Shorthand to avoid writing `Err(crate::DikertError::StringOnly(error_str))`.
pub fn err_str<T>(error_str: &str) -> DikertResult<T> {
    Err(DikertError::StringOnly(error_str.to_string()))
}
