/*!
 * This is the meshing methods module.
 * Adding new methods should be done here.
 *
 * New methods need:
 * - A struct implementing `MeshMethod` (and `Default`, `Serialize`, `Deserialize`)
 * - An enum variant containing that struct in `MethodEnum`
 *
 * The variant name (snake_case) is the `name` used in config files.
 */

use enum_dispatch::enum_dispatch;
use serde::{Serialize, Deserialize};
use strum::{
    AsRefStr,
    EnumIter,
};

use crate::{
    args,
    mesh,
    survey::Electrode,
};

//
// ------------------------------------------------------------
// Code that requires modification to add a new meshing method
//      |
//      V
//

// Source files for the meshing methods
pub mod gmsh;

/// Meshing methods enum.
/// To add a new method:
/// include it here,
/// and implement the `MeshMethod` trait for it.
#[derive(Debug, Serialize, Deserialize, EnumIter, AsRefStr)]
#[serde(tag = "name", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[enum_dispatch(MeshMethod)]
pub enum MethodEnum {
    /// Gmsh run on a generated .geo script: OCC geometry import, embedded electrodes, refinement field.
    Gmsh(gmsh::Method),
}
impl Default for MethodEnum {
    fn default() -> Self {
        MethodEnum::Gmsh(gmsh::Method::default())
    }
}

//
// ------------------------------------------------------------
// Traits and structs that don't need modification,
// but are references for adding a new meshing method
//      |
//      V
//

/// Meshing method trait.
/// This trait must be implemented for all meshing methods.
#[enum_dispatch] // This is a macro that allows the enum to be used in a trait object-like way
pub trait MeshMethod {
    /// Get the name of the meshing method.
    fn get_method_name(&self) -> &'static str;

    /// Get the output file extension for the meshing method.
    fn get_output_extension(&self) -> &'static str;

    /// Check the method config after loading.
    fn check_cfg(&self) -> args::ProcResult<()>;

    /// Build the mesh around the electrodes and write it to the output path.
    /// With `dry_run`, only the inputs for the mesher are written.
    fn do_mesh(&self, electrodes: &[Electrode], tag_offset: u32, output_path: &str, dry_run: bool) -> mesh::ProcResult<()>;
}
