use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use crate::mesh::{
    MeshError,
    MeshInventory,
    ProcResult,
};

// Physical group ids, read by pyGIMLi as region and boundary markers.
// Surface 1 is the free surface, boundaries > 1 get mixed boundary conditions.
pub const OUTER_REGION_GROUP: u32 = 1;
pub const DIKE_GROUP: u32 = 2;
pub const CHANNEL_GROUP: u32 = 3;
pub const SURFACE_GROUP: u32 = 1;
pub const BOUNDARY_GROUP: u32 = 2;
pub const ELECTRODE_GROUP: u32 = 99;

/// Dimension of a Gmsh entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityDim {
    Point,
    Curve,
    Surface,
    Volume,
}
impl EntityDim {
    /// Gmsh dimension number.
    pub fn dim(&self) -> u8 {
        match self {
            EntityDim::Point => 0,
            EntityDim::Curve => 1,
            EntityDim::Surface => 2,
            EntityDim::Volume => 3,
        }
    }

    /// Keyword used in .geo scripts.
    pub fn geo_keyword(&self) -> &'static str {
        match self {
            EntityDim::Point => "Point",
            EntityDim::Curve => "Curve",
            EntityDim::Surface => "Surface",
            EntityDim::Volume => "Volume",
        }
    }
}

/// Gmsh geometry tags of the dike model regions.
/// Must match the geometry file they are configured with; look them up in the Gmsh GUI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionTags {
    /// Volume around the dike.
    pub outer_region: u32,
    /// Dike body, where the electrodes are embedded.
    pub dike: u32,
    /// Channel volume.
    pub channel: u32,
    /// Free-surface faces.
    pub surface: Vec<u32>,
    /// Underground boundary faces.
    pub boundary: Vec<u32>,
}
impl Default for RegionTags {
    fn default() -> Self {
        RegionTags{
            outer_region: 2,
            dike: 3,
            channel: 1,
            surface: vec![7, 11, 12, 13, 21, 23, 24, 25, 27, 29, 30, 31],
            boundary: vec![8, 14, 15, 16, 20],
        }
    }
}
impl RegionTags {
    /// Check the tags for internal consistency.
    /// Also checks the electrode point tags, which are derived from the survey.
    pub fn validate(&self, electrode_tags: &[u32]) -> ProcResult<()> {
        let mut problems = Vec::<String>::new();

        let volumes = [
            ("outer region", self.outer_region),
            ("dike", self.dike),
            ("channel", self.channel),
        ];
        for (name, tag) in volumes.iter() {
            if *tag == 0 {
                problems.push(format!("Volume tag for {} must be positive", name));
            }
        }
        for (i, (name, tag)) in volumes.iter().enumerate() {
            for (other_name, other_tag) in volumes.iter().skip(i + 1) {
                if tag == other_tag {
                    problems.push(format!("Volumes {} and {} share tag {}", name, other_name, tag));
                }
            }
        }

        for (name, tags) in [("surface", &self.surface), ("boundary", &self.boundary), ("electrode", &electrode_tags.to_vec())] {
            if tags.is_empty() {
                problems.push(format!("No {} tags given", name));
            }
            if tags.contains(&0) {
                problems.push(format!("{} tags must be positive", name));
            }
            let duplicates: Vec<&u32> = tags.iter().duplicates().collect();
            if !duplicates.is_empty() {
                problems.push(format!("Duplicate {} tags: {}", name, duplicates.iter().join(", ")));
            }
        }

        let surface: BTreeSet<&u32> = self.surface.iter().collect();
        let overlap: Vec<&u32> = self.boundary.iter().filter(|tag| surface.contains(tag)).collect();
        if !overlap.is_empty() {
            problems.push(format!("Tags in both surface and boundary: {}", overlap.iter().join(", ")));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(MeshError::TagError(problems))
        }
    }

    /// Physical groups for the dike model, with the electrode points as their own group.
    pub fn physical_groups(&self, electrode_tags: &[u32]) -> Vec<PhysicalGroup> {
        vec![
            PhysicalGroup::new(EntityDim::Volume, OUTER_REGION_GROUP, "Outer Region", vec![self.outer_region]),
            PhysicalGroup::new(EntityDim::Volume, DIKE_GROUP, "Dike", vec![self.dike]),
            PhysicalGroup::new(EntityDim::Volume, CHANNEL_GROUP, "Channel", vec![self.channel]),
            PhysicalGroup::new(EntityDim::Surface, SURFACE_GROUP, "Surface", self.surface.clone()),
            PhysicalGroup::new(EntityDim::Surface, BOUNDARY_GROUP, "Underground Boundary", self.boundary.clone()),
            PhysicalGroup::new(EntityDim::Point, ELECTRODE_GROUP, "Electrodes", electrode_tags.to_vec()),
        ]
    }
}

/// A named, numbered collection of Gmsh entities of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalGroup {
    pub dim: EntityDim,
    pub id: u32,
    pub name: &'static str,
    pub entities: Vec<u32>,
}
impl PhysicalGroup {
    pub fn new(dim: EntityDim, id: u32, name: &'static str, entities: Vec<u32>) -> Self {
        PhysicalGroup{dim, id, name, entities}
    }

    /// .geo declaration, e.g. `Physical Volume("Dike", 2) = {3};`
    pub fn geo_line(&self) -> String {
        format!(
            "Physical {}(\"{}\", {}) = {{{}}};",
            self.dim.geo_keyword(), self.name, self.id, self.entities.iter().join(", ")
        )
    }
}

/// Check that every physical group made it into the mesh with its name and all of its entities.
/// Gmsh skips entities that don't exist in the geometry, so a wrong tag shows up here as a missing entity.
pub fn check_inventory(groups: &[PhysicalGroup], inventory: &MeshInventory) -> ProcResult<()> {
    let mut problems = Vec::<String>::new();

    for group in groups.iter() {
        let key = (group.dim.dim(), group.id);
        match inventory.physical_names.get(&key) {
            Some(name) if name == group.name => (),
            Some(name) => problems.push(format!(
                "Physical {} {} is named \"{}\" in the mesh, expected \"{}\"",
                group.dim.geo_keyword(), group.id, name, group.name
            )),
            None => problems.push(format!(
                "Physical {} {} (\"{}\") is missing from the mesh",
                group.dim.geo_keyword(), group.id, group.name
            )),
        }

        let meshed = inventory.groups.get(&key);
        let missing: Vec<&u32> = group.entities.iter()
            .filter(|tag| !meshed.is_some_and(|entities| entities.contains(*tag)))
            .collect();
        if !missing.is_empty() {
            problems.push(format!(
                "{} tags of \"{}\" not found in the mesh: {}",
                group.dim.geo_keyword(), group.name, missing.iter().join(", ")
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(MeshError::TagError(problems))
    }
}
