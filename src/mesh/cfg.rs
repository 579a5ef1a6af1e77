use serde::{Serialize, Deserialize};

use crate::args;
use crate::mesh::{
    MeshMethod,
    MethodEnum,
};

/// Mesh stage target.
/// Contains the meshing method and its output.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshTarget {
    /// Meshing method, with its method-specific config.
    #[serde(default)]
    pub method: MethodEnum,

    /// Output path for the mesh file (must match meshing method).
    #[serde(default = "MeshTarget::default_output_path", alias = "output", alias = "out", alias = "o")]
    pub output_path: String,
}
impl MeshTarget {
    pub fn default_output_path() -> String {
        "dike_mod.msh".to_string()
    }

    /// Construct a mesh target from a config file, or use the defaults.
    pub fn from_cfg_file(cfg_file: Option<&str>) -> args::ProcResult<Self> {
        let target: MeshTarget = match cfg_file {
            Some(cfg_file) => crate::io::read_cfg_file(cfg_file)?,
            None => MeshTarget::default(),
        };

        let extension = target.method.get_output_extension();
        if !target.output_path.ends_with(&format!(".{}", extension)) {
            args::err_str(&format!(
                "Mesh output path must end with .{} for method {}", extension, target.method.get_method_name()
            ))?;
        }

        // Method-specific checks
        target.method.check_cfg()?;

        Ok(target)
    }
}
impl Default for MeshTarget {
    fn default() -> Self {
        MeshTarget{
            method: MethodEnum::default(),
            output_path: Self::default_output_path(),
        }
    }
}
