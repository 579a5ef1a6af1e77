use serde::{Serialize, Deserialize};

use crate::args;

/// Scheme stage target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeTarget {
    /// Output path for the unified-data-format scheme file.
    #[serde(default = "SchemeTarget::default_output_path", alias = "output", alias = "out", alias = "o")]
    pub output_path: String,
}
impl SchemeTarget {
    pub fn default_output_path() -> String {
        "ert.dat".to_string()
    }

    /// Construct a scheme target from a config file, or use the defaults.
    pub fn from_cfg_file(cfg_file: Option<&str>) -> args::ProcResult<Self> {
        let target: SchemeTarget = match cfg_file {
            Some(cfg_file) => crate::io::read_cfg_file(cfg_file)?,
            None => SchemeTarget::default(),
        };
        if target.output_path.is_empty() {
            args::err_str("Scheme output path is empty")?;
        }
        Ok(target)
    }
}
impl Default for SchemeTarget {
    fn default() -> Self {
        SchemeTarget{output_path: Self::default_output_path()}
    }
}
