use serde::{Serialize, Deserialize};
use itertools::Itertools;

use crate::{
    args,
    elecs,
    mesh,
    survey::Electrode,
};
use mesh::methods;
use mesh::{
    MeshInventory,
    RegionTags,
};

/// GMSH Method struct.
/// Contains all the parameters for meshing the dike with Gmsh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Gmsh executable.
    #[serde(default = "Method::default_gmsh_path", alias = "gmsh")]
    gmsh_path: String,
    /// Where the generated .geo script is written.
    #[serde(default = "Method::default_script_path", alias = "script")]
    script_path: String,
    /// Solid geometry to import, with its region tags.
    #[serde(default)]
    geometry: Geometry,
    /// Characteristic lengths.
    #[serde(default)]
    sizes: Sizes,
    /// Distance-based refinement around the electrodes.
    #[serde(default)]
    refinement: Refinement,
    /// .msh format version to write (pyGIMLi reads 2.2).
    #[serde(default = "Method::default_msh_version")]
    msh_version: f64,
    /// Check the physical groups of the written mesh against the region tags.
    #[serde(default = "Method::default_validate")]
    validate: bool,
}
impl Method {
    pub fn default_gmsh_path() -> String {
        "gmsh".to_string()
    }
    pub fn default_script_path() -> String {
        "dike_mod.geo".to_string()
    }
    pub fn default_msh_version() -> f64 {
        2.2
    }
    pub fn default_validate() -> bool {
        true
    }
}
impl Default for Method {
    fn default() -> Self {
        Method{
            gmsh_path: Self::default_gmsh_path(),
            script_path: Self::default_script_path(),
            geometry: Geometry::default(),
            sizes: Sizes::default(),
            refinement: Refinement::default(),
            msh_version: Self::default_msh_version(),
            validate: Self::default_validate(),
        }
    }
}

/// Geometry file and the tags of its regions.
/// The tags belong to this file: change them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Geometry {
    /// BREP or STEP file.
    #[serde(default = "Geometry::default_path")]
    path: String,
    /// OCC import scaling (0.001 for geometry drawn in mm).
    #[serde(default = "Geometry::default_occ_scaling")]
    occ_scaling: f64,
    #[serde(default)]
    region_tags: RegionTags,
}
impl Geometry {
    fn default_path() -> String {
        "dike_mod.brep".to_string()
    }
    fn default_occ_scaling() -> f64 {
        0.001
    }
}
impl Default for Geometry {
    fn default() -> Self {
        Geometry{
            path: Self::default_path(),
            occ_scaling: Self::default_occ_scaling(),
            region_tags: RegionTags::default(),
        }
    }
}

/// Characteristic lengths [m].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Sizes {
    #[serde(default = "Sizes::default_electrode", alias = "cl_elec")]
    electrode: f64,
    #[serde(default = "Sizes::default_dike", alias = "cl_dike")]
    dike: f64,
    #[serde(default = "Sizes::default_outer", alias = "cl_outer")]
    outer: f64,
}
impl Sizes {
    fn default_electrode() -> f64 {
        0.1
    }
    fn default_dike() -> f64 {
        0.6
    }
    fn default_outer() -> f64 {
        30.0
    }
}
impl Default for Sizes {
    fn default() -> Self {
        Sizes{
            electrode: Self::default_electrode(),
            dike: Self::default_dike(),
            outer: Self::default_outer(),
        }
    }
}

/// Threshold field on the distance to the electrodes.
/// Size is `cl_elec` up to `dist_min`, grows linearly to `cl_dike` at `dist_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Refinement {
    #[serde(default = "Refinement::default_dist_min")]
    dist_min: f64,
    #[serde(default = "Refinement::default_dist_max")]
    dist_max: f64,
    /// Don't apply the field beyond `dist_max`.
    #[serde(default = "Refinement::default_stop_at_dist_max")]
    stop_at_dist_max: bool,
}
impl Refinement {
    fn default_dist_min() -> f64 {
        0.2
    }
    fn default_dist_max() -> f64 {
        1.5
    }
    fn default_stop_at_dist_max() -> bool {
        true
    }
}
impl Default for Refinement {
    fn default() -> Self {
        Refinement{
            dist_min: Self::default_dist_min(),
            dist_max: Self::default_dist_max(),
            stop_at_dist_max: Self::default_stop_at_dist_max(),
        }
    }
}

impl methods::MeshMethod for Method {
    /// Get the name of the meshing method.
    fn get_method_name(&self) -> &'static str {
        "Gmsh"
    }

    /// Get the output file extension for the meshing method.
    fn get_output_extension(&self) -> &'static str {
        "msh"
    }

    /// Check the method config after loading.
    fn check_cfg(&self) -> args::ProcResult<()> {
        if !self.script_path.ends_with(".geo") {
            args::err_str("Gmsh script path must end with .geo")?;
        }
        let sizes = [self.sizes.electrode, self.sizes.dike, self.sizes.outer];
        if sizes.iter().any(|size| !(size.is_finite() && *size > 0.0)) {
            args::err_str(&format!("Characteristic lengths must be positive, got {:?}", sizes))?;
        }
        if !(self.refinement.dist_min >= 0.0 && self.refinement.dist_min < self.refinement.dist_max) {
            args::err_str(&format!(
                "Refinement distances must satisfy 0 <= dist_min < dist_max, got {} and {}",
                self.refinement.dist_min, self.refinement.dist_max
            ))?;
        }
        if !(self.geometry.occ_scaling.is_finite() && self.geometry.occ_scaling > 0.0) {
            args::err_str("OCC scaling must be positive")?;
        }
        if ![2.2, 4.1].contains(&self.msh_version) {
            args::err_str(&format!("Unsupported .msh version {} (use 2.2 or 4.1)", self.msh_version))?;
        }
        Ok(())
    }

    /// Write the .geo script, run Gmsh on it, and check the resulting mesh.
    fn do_mesh(&self, electrodes: &[Electrode], tag_offset: u32, output_path: &str, dry_run: bool) -> mesh::ProcResult<()> {
        let electrode_tags: Vec<u32> = electrodes.iter().map(|electrode| electrode.point_tag(tag_offset)).collect();
        self.geometry.region_tags.validate(&electrode_tags)?;

        log::info!("Writing Gmsh script to {}...", self.script_path);
        let script = self.geo_script(electrodes, tag_offset)?;
        crate::io::write_to_file(&self.script_path, &script)?;

        if dry_run {
            log::info!("Dry run: skipping Gmsh (run `{} {} -3 -o {}` to mesh)", self.gmsh_path, self.script_path, output_path);
            return Ok(());
        }

        self.run_gmsh(output_path)?;

        if self.validate {
            log::info!("Checking physical groups in {}...", output_path);
            let inventory = MeshInventory::load(output_path)?;
            let groups = self.geometry.region_tags.physical_groups(&electrode_tags);
            mesh::check_inventory(&groups, &inventory)?;
        }
        Ok(())
    }
}

impl Method {
    /// Build the .geo script.
    /// Size assignments go from coarse to fine, since later assignments override earlier ones on shared points.
    fn geo_script(&self, electrodes: &[Electrode], tag_offset: u32) -> mesh::ProcResult<String> {
        let tags = &self.geometry.region_tags;
        let geometry_path = crate::io::absolute(&self.geometry.path)?;
        let tag_list: Vec<u32> = electrodes.iter().map(|electrode| electrode.point_tag(tag_offset)).collect();
        let electrode_tags = tag_list.iter().join(", ");

        let mut lines = Vec::<String>::new();

        lines.push("// Dike model for ERT forward modeling".to_string());
        lines.push("General.Terminal = 1;".to_string());
        lines.push("Geometry.OCCTargetUnit = \"M\";".to_string());
        lines.push(format!("Geometry.OCCScaling = {:?};", self.geometry.occ_scaling));
        lines.push(format!("Mesh.MshFileVersion = {:?};", self.msh_version));
        lines.push(String::new());

        lines.push("SetFactory(\"OpenCASCADE\");".to_string());
        lines.push(format!("ShapeFromFile(\"{}\");", geo_string(&geometry_path)));
        lines.push(String::new());

        lines.push("// Characteristic lengths".to_string());
        lines.push(format!("cl_elec = {:?};", self.sizes.electrode));
        lines.push(format!("cl_dike = {:?};", self.sizes.dike));
        lines.push(format!("cl_outer = {:?};", self.sizes.outer));
        lines.push(String::new());

        lines.push("// Electrodes".to_string());
        for electrode in electrodes.iter() {
            lines.push(elecs::geo_point(electrode, tag_offset, "cl_elec", None));
        }
        lines.push(String::new());

        lines.push("// Mesh sizes: outer region first, then the dike".to_string());
        lines.push(format!("MeshSize{{ PointsOf{{ Volume{{{}}}; }} }} = cl_outer;", tags.outer_region));
        lines.push(format!("MeshSize{{ PointsOf{{ Volume{{{}}}; }} }} = cl_dike;", tags.dike));
        lines.push(String::new());

        // Embedding in a surface is unreliable, hence the electrode depth
        lines.push("// Embed the electrodes in the dike volume".to_string());
        lines.push(format!("Point{{{}}} In Volume{{{}}};", electrode_tags, tags.dike));
        lines.push(String::new());

        lines.push("// Refinement around the electrodes".to_string());
        lines.push("Field[1] = Distance;".to_string());
        lines.push(format!("Field[1].PointsList = {{{}}};", electrode_tags));
        lines.push("Field[2] = Threshold;".to_string());
        lines.push("Field[2].InField = 1;".to_string());
        lines.push("Field[2].SizeMin = cl_elec;".to_string());
        lines.push("Field[2].SizeMax = cl_dike;".to_string());
        lines.push(format!("Field[2].DistMin = {:?};", self.refinement.dist_min));
        lines.push(format!("Field[2].DistMax = {:?};", self.refinement.dist_max));
        lines.push(format!("Field[2].StopAtDistMax = {};", self.refinement.stop_at_dist_max as u8));
        lines.push("Background Field = 2;".to_string());
        lines.push(String::new());

        lines.push("// Physical groups (regions, boundaries and sensors in pyGIMLi)".to_string());
        for group in tags.physical_groups(&tag_list) {
            lines.push(group.geo_line());
        }

        let mut script = lines.join("\n");
        script.push('\n');
        Ok(script)
    }

    /// Run Gmsh on the script, meshing in 3D.
    fn run_gmsh(&self, output_path: &str) -> mesh::ProcResult<()> {
        log::info!("Running {} on {}...", self.gmsh_path, self.script_path);
        let status = std::process::Command::new(&self.gmsh_path)
            .arg(&self.script_path)
            .arg("-3")
            .arg("-o")
            .arg(output_path)
            .arg("-nopopup")
            .status();

        match status {
            Ok(status) if status.success() => {
                log::info!("Mesh written to {}", output_path);
                Ok(())
            },
            Ok(status) => Err(mesh::MeshError::GmshError(format!(
                "{} exited with {} while meshing {}", self.gmsh_path, status, self.script_path
            ))),
            Err(error) => Err(mesh::MeshError::GmshError(format!(
                "Failed to launch {}: {}", self.gmsh_path, error
            ))),
        }
    }
}

/// Escape a string for a .geo string literal.
fn geo_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
