/*!
 * This is the simulation methods module.
 * Adding new methods should be done here.
 *
 * New methods need:
 * - A struct implementing `SimMethod` (and `Default`, `Serialize`, `Deserialize`)
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
    sim,
};

//
// ------------------------------------------------------------
// Code that requires modification to add a new simulation method
//      |
//      V
//

// Source files for the simulation methods
pub mod pygimli;

/// Simulation methods enum.
/// To add a new method:
/// include it here,
/// and implement the `SimMethod` trait for it.
#[derive(Debug, Serialize, Deserialize, EnumIter, AsRefStr)]
#[serde(tag = "name", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[enum_dispatch(SimMethod)]
pub enum MethodEnum {
    /// ERT forward simulation with pyGIMLi's `ERTManager`, driven through a generated Python script.
    Pygimli(pygimli::Method),
}
impl Default for MethodEnum {
    fn default() -> Self {
        MethodEnum::Pygimli(pygimli::Method::default())
    }
}

//
// ------------------------------------------------------------
// Traits and structs that don't need modification,
// but are references for adding a new simulation method
//      |
//      V
//

/// Sim method trait.
/// This trait defines the functions that all simulation methods must implement.
#[enum_dispatch] // This is a macro that allows the enum to be used in a trait object-like way
pub trait SimMethod {
    /// Get the name of the simulation method.
    fn get_method_name(&self) -> &'static str;

    /// Check the method config after loading.
    fn check_cfg(&self) -> args::ProcResult<()>;

    /// Run the forward simulation on the mesh and scheme, and save the simulated data.
    /// With `dry_run`, only the inputs for the engine are written.
    fn do_simulation(&self, io_paths: &sim::SimPaths, dry_run: bool) -> sim::ProcResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn method_names_are_snake_case() {
        let names: Vec<String> = MethodEnum::iter().map(|method| method.as_ref().to_string()).collect();
        assert_eq!(names, vec!["pygimli"]);
    }
}
