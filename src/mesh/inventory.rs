use std::collections::{
    BTreeMap,
    BTreeSet,
};

use crate::mesh::{
    self,
    EntityDim,
    ProcResult,
};

/// Physical groups found in a Gmsh .msh file.
/// Keys are `(dimension, physical id)`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshInventory {
    /// Format version from `$MeshFormat`, e.g. "2.2" or "4.1".
    pub version: String,
    /// Names from `$PhysicalNames`.
    pub physical_names: BTreeMap<(u8, u32), String>,
    /// Entity tags belonging to each physical group.
    pub groups: BTreeMap<(u8, u32), BTreeSet<u32>>,
}

/// Section of the .msh file being parsed.
enum MshParseState {
    Limbo,
    MeshFormat,
    PhysicalNames,
    Entities,
    Elements,
    Skipped,
}

/// Progress through the `$Entities` section (format 4).
struct EntitiesProgress {
    /// Entities left to read per dimension, points first.
    remaining: [usize; 4],
    /// Whether the count line was read.
    counted: bool,
}

impl MeshInventory {
    /// Read the inventory of a .msh file on disk.
    pub fn load(path: &str) -> ProcResult<Self> {
        let contents = crate::io::read_to_string(path)?;
        MeshInventory::parse(&contents)
    }

    /// Parse an ASCII .msh file (format 2.x or 4.x).
    /// Format 2 stores the physical and elementary tags on every element;
    /// format 4 lists them per entity in `$Entities`.
    pub fn parse(contents: &str) -> ProcResult<Self> {
        let mut inventory = MeshInventory::default();
        let mut parser_state = MshParseState::Limbo;
        let mut section_counted = false;
        let mut entities = EntitiesProgress{remaining: [0; 4], counted: false};

        for (line_n, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let line_err = |what: &str| -> mesh::MeshError {
                mesh::MeshError::StringOnly(format!("Malformed .msh file, line {}: {} ({})", line_n + 1, what, line))
            };

            if line.starts_with("$End") {
                parser_state = MshParseState::Limbo;
                continue;
            }

            match parser_state {
                MshParseState::Limbo => {
                    section_counted = false;
                    parser_state = match line {
                        "$MeshFormat" => MshParseState::MeshFormat,
                        "$PhysicalNames" => MshParseState::PhysicalNames,
                        "$Entities" => {
                            entities.counted = false;
                            MshParseState::Entities
                        },
                        "$Elements" => MshParseState::Elements,
                        _ if line.starts_with('$') => MshParseState::Skipped,
                        _ => return Err(line_err("unexpected line outside of a section")),
                    };
                },
                MshParseState::MeshFormat => {
                    let fields: Vec<&str> = line.split_whitespace().collect();
                    if fields.len() < 2 {
                        return Err(line_err("expected version and file type"));
                    }
                    if fields[1] != "0" {
                        return Err(line_err("binary .msh files are not supported"));
                    }
                    inventory.version = fields[0].to_string();
                },
                MshParseState::PhysicalNames => {
                    if !section_counted {
                        section_counted = true;
                        continue;
                    }
                    let mut fields = line.splitn(3, char::is_whitespace);
                    let dim = parse_field::<u8>(fields.next()).ok_or_else(|| line_err("bad physical dimension"))?;
                    let id = parse_field::<u32>(fields.next()).ok_or_else(|| line_err("bad physical tag"))?;
                    let name = fields.next().unwrap_or("").trim().trim_matches('"').to_string();
                    inventory.physical_names.insert((dim, id), name);
                },
                MshParseState::Entities => {
                    if !inventory.version.starts_with('4') {
                        return Err(line_err("$Entities section in a format 2 file"));
                    }
                    let numbers = parse_numbers(line).ok_or_else(|| line_err("non-numeric entity data"))?;
                    if !entities.counted {
                        if numbers.len() < 4 {
                            return Err(line_err("expected four entity counts"));
                        }
                        for dim in 0..4 {
                            entities.remaining[dim] = numbers[dim] as usize;
                        }
                        entities.counted = true;
                        continue;
                    }
                    let dim = match entities.remaining.iter().position(|&count| count > 0) {
                        Some(dim) => dim,
                        None => return Err(line_err("more entities than announced")),
                    };
                    entities.remaining[dim] -= 1;

                    // Points carry X Y Z (4.0: a bounding box), the others a bounding box.
                    let coord_count = if dim == 0 && !inventory.version.starts_with("4.0") { 3 } else { 6 };
                    let physical_count = numbers.get(1 + coord_count).ok_or_else(|| line_err("missing physical tag count"))?;
                    let physicals_end = (2 + coord_count).checked_add(*physical_count as usize)
                        .ok_or_else(|| line_err("bad physical tag count"))?;
                    let physicals = numbers.get(2 + coord_count..physicals_end)
                        .ok_or_else(|| line_err("missing physical tags"))?;
                    let tag = numbers[0];
                    for physical in physicals.iter() {
                        inventory.add(dim as u8, tag_from(*physical).ok_or_else(|| line_err("bad physical tag"))?, tag_from(tag).ok_or_else(|| line_err("bad entity tag"))?);
                    }
                },
                MshParseState::Elements => {
                    if inventory.version.starts_with('4') {
                        // Format 4 elements are grouped by entity; $Entities already has everything.
                        continue;
                    }
                    if !section_counted {
                        section_counted = true;
                        continue;
                    }
                    let numbers = parse_numbers(line).ok_or_else(|| line_err("non-numeric element data"))?;
                    if numbers.len() < 5 {
                        return Err(line_err("element line too short"));
                    }
                    // elm-number elm-type number-of-tags physical elementary ...
                    let dim = match element_dim(numbers[1]) {
                        Some(dim) => dim,
                        None => return Err(line_err("unknown element type")),
                    };
                    if numbers[2] < 2.0 {
                        continue;
                    }
                    let physical = tag_from(numbers[3]).ok_or_else(|| line_err("bad physical tag"))?;
                    let elementary = tag_from(numbers[4]).ok_or_else(|| line_err("bad elementary tag"))?;
                    if physical > 0 {
                        inventory.add(dim.dim(), physical, elementary);
                    }
                },
                MshParseState::Skipped => (),
            }
        }

        if inventory.version.is_empty() {
            return mesh::err_str("Missing $MeshFormat section in .msh file");
        }
        Ok(inventory)
    }

    fn add(&mut self, dim: u8, physical: u32, entity: u32) {
        self.groups.entry((dim, physical)).or_default().insert(entity);
    }
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>) -> Option<T> {
    field.and_then(|field| field.trim().parse::<T>().ok())
}

/// Parse a whitespace-separated line of numbers.
/// Bounding boxes are floats, so everything is read as f64 and tags are converted afterwards.
fn parse_numbers(line: &str) -> Option<Vec<f64>> {
    line.split_whitespace().map(|field| field.parse::<f64>().ok()).collect()
}

/// Tags are stored as floats by `parse_numbers`; physical tags may be negative in format 4 (orientation).
fn tag_from(value: f64) -> Option<u32> {
    let value = value.abs();
    if value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Dimension of a Gmsh element type (first and second order types).
fn element_dim(element_type: f64) -> Option<EntityDim> {
    match element_type as u32 {
        15 => Some(EntityDim::Point),
        1 | 8 | 26 | 27 | 28 => Some(EntityDim::Curve),
        2 | 3 | 9 | 10 | 16 | 20 | 21 => Some(EntityDim::Surface),
        4 | 5 | 6 | 7 | 11 | 12 | 13 | 14 | 17 | 18 | 19 | 29 => Some(EntityDim::Volume),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSH_22: &str = "$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
3
0 99 \"Electrodes\"
2 1 \"Surface\"
3 2 \"Dike\"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 0 1 0
4 0 0 1
$EndNodes
$Elements
6
1 15 2 99 201 1
2 15 2 99 202 2
3 2 2 1 7 1 2 3
4 2 2 1 11 1 2 4
5 4 2 2 3 1 2 3 4
6 15 1 0 1
$EndElements
";

    const MSH_41: &str = "$MeshFormat
4.1 0 8
$EndMeshFormat
$PhysicalNames
2
0 99 \"Electrodes\"
3 2 \"Dike\"
$EndPhysicalNames
$Entities
2 0 1 1
201 1.0 2.0 3.0 1 99
202 1.5 2.0 3.0 1 99
7 0 0 0 1 1 0 0 0
3 0 0 0 1 1 1 1 2 1 7
$EndEntities
$Nodes
0 0 0 0
$EndNodes
";

    #[test]
    fn format_2_groups_come_from_element_tags() {
        let inventory = MeshInventory::parse(MSH_22).unwrap();
        assert_eq!(inventory.version, "2.2");
        assert_eq!(inventory.physical_names.get(&(2, 1)).map(String::as_str), Some("Surface"));
        assert_eq!(inventory.groups[&(0, 99)], BTreeSet::from([201, 202]));
        assert_eq!(inventory.groups[&(2, 1)], BTreeSet::from([7, 11]));
        assert_eq!(inventory.groups[&(3, 2)], BTreeSet::from([3]));
        // Element 6 has a single tag and no physical group
        assert_eq!(inventory.groups.len(), 3);
    }

    #[test]
    fn format_4_groups_come_from_entities() {
        let inventory = MeshInventory::parse(MSH_41).unwrap();
        assert_eq!(inventory.version, "4.1");
        assert_eq!(inventory.groups[&(0, 99)], BTreeSet::from([201, 202]));
        assert_eq!(inventory.groups[&(3, 2)], BTreeSet::from([3]));
        // Surface 7 has no physical group
        assert!(!inventory.groups.keys().any(|(dim, _)| *dim == 2));
    }

    #[test]
    fn binary_files_are_rejected() {
        let err = MeshInventory::parse("$MeshFormat\n4.1 1 8\n$EndMeshFormat\n").unwrap_err();
        assert!(err.to_string().contains("binary"));
    }

    #[test]
    fn missing_format_is_rejected() {
        assert!(MeshInventory::parse("$PhysicalNames\n0\n$EndPhysicalNames\n").is_err());
    }

    #[test]
    fn huge_physical_count_is_an_error() {
        let msh = concat!(
            "$MeshFormat\n4.1 0 8\n$EndMeshFormat\n",
            "$Entities\n0 0 0 1\n3 0 0 0 1 1 1 1e300 2\n$EndEntities\n",
        );
        let err = MeshInventory::parse(msh).unwrap_err().to_string();
        assert!(err.contains("line 6"), "{}", err);
    }

    #[test]
    fn malformed_element_reports_line() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Elements\n1\n1 15 x 99 201 1\n$EndElements\n";
        let err = MeshInventory::parse(msh).unwrap_err().to_string();
        assert!(err.contains("line 6"), "{}", err);
    }
}
