use serde::{Serialize, Deserialize};

use crate::args;
use crate::sim::{
    MethodEnum,
    SimMethod,
};

/// Simulation target struct.
/// Contains the simulation method and the files it reads and writes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimTarget {
    /// Simulation method, with its method-specific config.
    #[serde(default)]
    pub method: MethodEnum,

    /// Mesh to simulate on. Replaced by the mesh stage output when both stages run.
    #[serde(default = "SimTarget::default_mesh_path", alias = "mesh")]
    pub mesh_path: String,

    /// Scheme file. Replaced by the scheme stage output when both stages run.
    #[serde(default = "SimTarget::default_scheme_path", alias = "scheme")]
    pub scheme_path: String,

    /// Output path for the simulated dataset.
    #[serde(default = "SimTarget::default_output_path", alias = "output", alias = "out", alias = "o")]
    pub output_path: String,
}
impl SimTarget {
    pub fn default_mesh_path() -> String {
        "dike_mod.msh".to_string()
    }
    pub fn default_scheme_path() -> String {
        "ert.dat".to_string()
    }
    pub fn default_output_path() -> String {
        "ert_mod.dat".to_string()
    }

    /// Construct a simulation target from a config file, or use the defaults.
    pub fn from_cfg_file(cfg_file: Option<&str>) -> args::ProcResult<Self> {
        let target: SimTarget = match cfg_file {
            Some(cfg_file) => crate::io::read_cfg_file(cfg_file)?,
            None => SimTarget::default(),
        };

        if !target.mesh_path.ends_with(".msh") {
            args::err_str("Simulation mesh path must end with .msh")?;
        }
        if target.output_path == target.scheme_path {
            args::err_str("Simulation output path would overwrite the scheme file")?;
        }

        // Method-specific checks
        target.method.check_cfg()?;

        Ok(target)
    }
}
impl Default for SimTarget {
    fn default() -> Self {
        SimTarget{
            method: MethodEnum::default(),
            mesh_path: Self::default_mesh_path(),
            scheme_path: Self::default_scheme_path(),
            output_path: Self::default_output_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_file_names() {
        let target = SimTarget::from_cfg_file(None).unwrap();
        assert_eq!(target.mesh_path, "dike_mod.msh");
        assert_eq!(target.scheme_path, "ert.dat");
        assert_eq!(target.output_path, "ert_mod.dat");
    }

    #[test]
    fn output_must_not_clobber_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("sim.yaml");
        std::fs::write(&cfg_path, "output: ert.dat\n").unwrap();
        assert!(SimTarget::from_cfg_file(cfg_path.to_str()).is_err());
    }

    #[test]
    fn rhomap_is_read_from_method_cfg() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("sim.toml");
        std::fs::write(&cfg_path, concat!(
            "output_path = \"sim.dat\"\n",
            "[method]\n",
            "name = \"pygimli\"\n",
            "python = \"python3.11\"\n",
            "[[method.rhomap]]\n",
            "region = 2\n",
            "resistivity = 50.0\n",
        )).unwrap();
        let target = SimTarget::from_cfg_file(cfg_path.to_str()).unwrap();
        assert_eq!(target.output_path, "sim.dat");
        assert_eq!(target.method.get_method_name(), "pyGIMLi ERT");
    }
}
