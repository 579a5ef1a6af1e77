mod proc_errors;
mod cfg;
mod methods;
mod tags;
mod inventory;

use crate::survey::Electrode;

// Re-export errors
pub use proc_errors::{
    MeshError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::MeshTarget;
// Re-export meshing methods
pub use methods::{
    MethodEnum,
    MeshMethod,
};
// Re-export region tags and the mesh inventory check
pub use tags::{
    EntityDim,
    PhysicalGroup,
    RegionTags,
    check_inventory,
};
pub use inventory::MeshInventory;

/// Run the mesh process.
/// Returns a `ProcResult` with the path of the written mesh or an `Err`.
pub fn do_mesh(mesh_target: &MeshTarget, electrodes: &[Electrode], tag_offset: u32, dry_run: bool) -> ProcResult<String> {
    let mesh_method = &mesh_target.method;

    if electrodes.is_empty() {
        err_str("No electrodes to embed in the mesh")?;
    }
    if let Err(error) = crate::survey::check_point_tags(electrodes, tag_offset) {
        err_str(&error.to_string())?;
    }

    log::info!("Running meshing method: {}...", mesh_method.get_method_name());
    mesh_method.do_mesh(electrodes, tag_offset, &mesh_target.output_path, dry_run)?;

    Ok(mesh_target.output_path.clone())
}
