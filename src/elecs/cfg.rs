use serde::{Serialize, Deserialize};

use crate::args;

/// Electrode geometry stage target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElecsTarget {
    /// Output path for the Gmsh point declarations (must be .geo).
    #[serde(default = "ElecsTarget::default_output_path", alias = "output", alias = "out", alias = "o")]
    pub output_path: String,

    /// Name of the Gmsh variable holding the electrode characteristic length.
    #[serde(default = "ElecsTarget::default_size_symbol")]
    pub size_symbol: String,
}
impl ElecsTarget {
    pub fn default_output_path() -> String {
        "gmsh_elec_pos.geo".to_string()
    }
    pub fn default_size_symbol() -> String {
        "cl_elec".to_string()
    }

    /// Construct an electrode geometry target from a config file, or use the defaults.
    pub fn from_cfg_file(cfg_file: Option<&str>) -> args::ProcResult<Self> {
        let target: ElecsTarget = match cfg_file {
            Some(cfg_file) => crate::io::read_cfg_file(cfg_file)?,
            None => ElecsTarget::default(),
        };

        if !target.output_path.ends_with(".geo") {
            args::err_str("Electrode geometry output path must end with .geo")?;
        }
        let valid_symbol = target.size_symbol.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && target.size_symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_symbol {
            args::err_str(&format!("Size symbol \"{}\" is not a valid Gmsh variable name", target.size_symbol))?;
        }

        Ok(target)
    }
}
impl Default for ElecsTarget {
    fn default() -> Self {
        ElecsTarget{
            output_path: Self::default_output_path(),
            size_symbol: Self::default_size_symbol(),
        }
    }
}
