mod proc_errors;
mod cfg;
mod methods;

// Re-export errors
pub use proc_errors::{
    SimError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::SimTarget;
// Re-export simulation methods
pub use methods::{
    MethodEnum,
    SimMethod,
};

/// Files read and written by a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimPaths {
    pub mesh: String,
    pub scheme: String,
    pub output: String,
}

/// Run the simulation process.
/// Inputs produced earlier in the same run replace the configured input paths.
pub fn do_simulation(sim_target: &SimTarget, mesh_path: Option<&str>, scheme_path: Option<&str>, dry_run: bool) -> ProcResult<()> {
    let io_paths = SimPaths{
        mesh: mesh_path.unwrap_or(&sim_target.mesh_path).to_string(),
        scheme: scheme_path.unwrap_or(&sim_target.scheme_path).to_string(),
        output: sim_target.output_path.clone(),
    };

    // The scheme may come from this run's scheme stage, so check again after resolving
    if io_paths.output == io_paths.scheme {
        err_str(&format!("Simulation output path would overwrite the scheme file {}", io_paths.scheme))?;
    }

    // Upstream outputs don't exist yet on a dry run
    if !dry_run {
        for input_path in [&io_paths.mesh, &io_paths.scheme] {
            if !std::path::Path::new(input_path).exists() {
                err_str(&format!("Simulation input not found: {}", input_path))?;
            }
        }
    }

    log::info!("Running simulation method: {}...", sim_target.method.get_method_name());
    log::info!("Mesh: {}, scheme: {}", io_paths.mesh, io_paths.scheme);
    sim_target.method.do_simulation(&io_paths, dry_run)
}
