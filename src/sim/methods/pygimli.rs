use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use crate::{
    args,
    sim,
};
use sim::methods;

/// Method struct for the pyGIMLi ERT forward simulation.
/// pyGIMLi is a Python library, so the simulation runs as a generated script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Python interpreter with pyGIMLi installed.
    #[serde(default = "Method::default_python_path", alias = "python")]
    python_path: String,
    /// Where the generated driver script is written.
    #[serde(default = "Method::default_script_path", alias = "script")]
    script_path: String,
    /// Resistivity per region (physical volume id of the mesh).
    #[serde(default = "Method::default_rhomap")]
    rhomap: Vec<RegionResistivity>,
}

/// Resistivity of one mesh region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionResistivity {
    /// Region marker (physical volume id).
    pub region: u32,
    /// Resistivity [Ohm m].
    pub resistivity: f64,
}

impl Method {
    pub fn default_python_path() -> String {
        "python3".to_string()
    }
    pub fn default_script_path() -> String {
        "ert_sim.py".to_string()
    }
    /// Outer region and dike at 10 Ohm m, channel at 300 Ohm m.
    pub fn default_rhomap() -> Vec<RegionResistivity> {
        vec![
            RegionResistivity{region: 1, resistivity: 10.0},
            RegionResistivity{region: 2, resistivity: 10.0},
            RegionResistivity{region: 3, resistivity: 300.0},
        ]
    }
}
impl Default for Method {
    fn default() -> Self {
        Method{
            python_path: Self::default_python_path(),
            script_path: Self::default_script_path(),
            rhomap: Self::default_rhomap(),
        }
    }
}

impl methods::SimMethod for Method {
    /// Get the name of the simulation method.
    fn get_method_name(&self) -> &'static str {
        "pyGIMLi ERT"
    }

    /// Check the method config after loading.
    fn check_cfg(&self) -> args::ProcResult<()> {
        if !self.script_path.ends_with(".py") {
            args::err_str("pyGIMLi script path must end with .py")?;
        }
        if self.rhomap.is_empty() {
            args::err_str("Resistivity map is empty")?;
        }
        let mut regions = BTreeSet::<u32>::new();
        for entry in self.rhomap.iter() {
            if !regions.insert(entry.region) {
                args::err_str(&format!("Region {} appears twice in the resistivity map", entry.region))?;
            }
            if !(entry.resistivity.is_finite() && entry.resistivity > 0.0) {
                args::err_str(&format!("Resistivity of region {} must be positive, got {}", entry.region, entry.resistivity))?;
            }
        }
        Ok(())
    }

    /// Write the driver script and run it.
    fn do_simulation(&self, io_paths: &sim::SimPaths, dry_run: bool) -> sim::ProcResult<()> {
        log::info!("Writing pyGIMLi script to {}...", self.script_path);
        crate::io::write_to_file(&self.script_path, &self.driver_script(io_paths))?;

        if dry_run {
            log::info!("Dry run: skipping simulation (run `{} {}` to simulate)", self.python_path, self.script_path);
            return Ok(());
        }

        log::info!("Running {} {}...", self.python_path, self.script_path);
        let status = std::process::Command::new(&self.python_path)
            .arg(&self.script_path)
            .status();

        match status {
            Ok(status) if status.success() => {
                log::info!("Simulated data written to {}", io_paths.output);
                Ok(())
            },
            Ok(status) => Err(sim::SimError::EngineError(format!(
                "{} {} exited with {}", self.python_path, self.script_path, status
            ))),
            Err(error) => Err(sim::SimError::EngineError(format!(
                "Failed to launch {}: {}", self.python_path, error
            ))),
        }
    }
}

impl Method {
    /// Python driver: read mesh and scheme, simulate with the resistivity map, save the data.
    fn driver_script(&self, io_paths: &sim::SimPaths) -> String {
        let rhomap = self.rhomap.iter()
            .map(|entry| format!("[{}, {:?}]", entry.region, entry.resistivity))
            .join(", ");

        let mut script = String::new();
        script.push_str("# ERT forward simulation of the dike model\n");
        script.push_str("import pygimli as pg\n");
        script.push_str("import pygimli.meshtools as mt\n");
        script.push_str("from pygimli.physics.ert import ERTManager\n");
        script.push('\n');
        script.push_str(&format!("mesh = mt.readGmsh({})\n", py_string(&io_paths.mesh)));
        script.push_str(&format!("scheme = pg.importData({})\n", py_string(&io_paths.scheme)));
        script.push_str("ert = ERTManager()\n");
        script.push_str(&format!("rhomap = [{}]\n", rhomap));
        script.push_str("data = ert.simulate(mesh, res=rhomap, scheme=scheme)\n");
        script.push_str(&format!("data.save({})\n", py_string(&io_paths.output)));
        script
    }
}

/// Quote a string as a Python literal.
fn py_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
