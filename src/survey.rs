mod proc_errors;
mod cfg;

use serde::{Serialize, Deserialize};

use crate::io::xlsx::{
    self,
    SheetTable,
};

// Re-export errors
pub use proc_errors::{
    SurveyError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::SurveyCfg;

/// An ERT electrode.
/// `z` already has the survey depth subtracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Electrode {
    /// Electrode number, 1-based, as given in the spreadsheet.
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Electrode {
    /// Gmsh point tag of the electrode.
    /// Only meaningful for electrodes that passed `check_point_tags`.
    pub fn point_tag(&self, tag_offset: u32) -> u32 {
        tag_offset.saturating_add(self.id)
    }

    /// Gmsh point tag, or `None` when it doesn't fit a Gmsh tag (i32).
    pub fn checked_point_tag(&self, tag_offset: u32) -> Option<u32> {
        tag_offset.checked_add(self.id).filter(|tag| *tag <= MAX_POINT_TAG)
    }
}

/// Largest tag Gmsh accepts.
pub const MAX_POINT_TAG: u32 = i32::MAX as u32;

/// Check that every electrode gets a valid Gmsh point tag with the given offset.
pub fn check_point_tags(electrodes: &[Electrode], tag_offset: u32) -> ProcResult<()> {
    for electrode in electrodes.iter() {
        if electrode.checked_point_tag(tag_offset).is_none() {
            err_str(&format!(
                "Electrode {} with point tag offset {} exceeds the largest Gmsh tag ({})",
                electrode.id, tag_offset, MAX_POINT_TAG
            ))?;
        }
    }
    Ok(())
}

/// A four-point resistivity measurement.
/// A and B inject current, M and N measure the voltage.
/// The numbers refer to `Electrode::id`; they are not checked against the electrode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub a: u32,
    pub b: u32,
    pub m: u32,
    pub n: u32,
}

/// Load the electrode table from the survey spreadsheet.
pub fn load_electrodes(cfg: &SurveyCfg) -> ProcResult<Vec<Electrode>> {
    log::info!("Loading electrode positions from {} (sheet {})...", cfg.input_path, cfg.electrode_sheet);
    let table = xlsx::load_sheet(&cfg.input_path, &cfg.electrode_sheet)?;
    let electrodes = electrodes_from_table(&table, cfg.depth)?;
    check_point_tags(&electrodes, cfg.point_tag_offset)?;
    log::info!("Loaded {} electrodes", electrodes.len());
    Ok(electrodes)
}

/// Load the measurement scheme from the survey spreadsheet.
pub fn load_scheme(cfg: &SurveyCfg) -> ProcResult<Vec<Measurement>> {
    log::info!("Loading ERT scheme from {} (sheet {})...", cfg.input_path, cfg.scheme_sheet);
    let table = xlsx::load_sheet(&cfg.input_path, &cfg.scheme_sheet)?;
    let scheme = scheme_from_table(&table)?;
    log::info!("Loaded {} measurements", scheme.len());
    Ok(scheme)
}

/// Read electrodes from a table with the columns `elec #`, `x`, `y`, `z`.
/// The depth is subtracted from z.
pub fn electrodes_from_table(table: &SheetTable, depth: f64) -> ProcResult<Vec<Electrode>> {
    let id_col = table.column("elec #")?;
    let x_col = table.column("x")?;
    let y_col = table.column("y")?;
    let z_col = table.column("z")?;

    let mut electrodes = Vec::<Electrode>::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        electrodes.push(Electrode{
            id: table.integer(row, id_col)?,
            x: table.float(row, x_col)?,
            y: table.float(row, y_col)?,
            z: table.float(row, z_col)? - depth,
        });
    }
    Ok(electrodes)
}

/// Read measurements from a table with the columns `A`, `B`, `M`, `N`.
pub fn scheme_from_table(table: &SheetTable) -> ProcResult<Vec<Measurement>> {
    let cols = [
        table.column("A")?,
        table.column("B")?,
        table.column("M")?,
        table.column("N")?,
    ];

    let mut scheme = Vec::<Measurement>::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        scheme.push(Measurement{
            a: table.integer(row, cols[0])?,
            b: table.integer(row, cols[1])?,
            m: table.integer(row, cols[2])?,
            n: table.integer(row, cols[3])?,
        });
    }
    Ok(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use crate::io::xlsx::tests::range_from;

    fn electrode_table() -> SheetTable {
        let range = range_from(&["elec #", "x", "y", "z"], &[
            vec![Data::Int(1), Data::Float(0.0), Data::Float(1.5), Data::Float(3.0)],
            vec![Data::Int(2), Data::Float(0.5), Data::Float(1.5), Data::Float(2.98)],
            vec![Data::Float(3.0), Data::Float(1.0), Data::Float(1.5), Data::Float(-0.1)],
        ]);
        SheetTable::from_range("ERT_pos_and_scheme.xlsx", "elec_pos", &range).unwrap()
    }

    #[test]
    fn depth_is_subtracted_from_every_z() {
        let table = electrode_table();
        let electrodes = electrodes_from_table(&table, 0.02).unwrap();
        let sheet_z = [3.0, 2.98, -0.1];
        assert_eq!(electrodes.len(), 3);
        for (electrode, z) in electrodes.iter().zip(sheet_z) {
            assert_eq!(electrode.z, z - 0.02);
        }
        assert_eq!(electrodes[2].id, 3);
        assert_eq!(electrodes[1].x, 0.5);
    }

    #[test]
    fn point_tags_are_offset_electrode_numbers() {
        let electrodes = electrodes_from_table(&electrode_table(), 0.02).unwrap();
        let tags: Vec<u32> = electrodes.iter().map(|electrode| electrode.point_tag(200)).collect();
        assert_eq!(tags, vec![201, 202, 203]);
    }

    #[test]
    fn oversized_point_tags_are_rejected() {
        let range = range_from(&["elec #", "x", "y", "z"], &[
            vec![Data::Int(1), Data::Float(0.0), Data::Float(0.0), Data::Float(1.0)],
            vec![Data::Int(u32::MAX as i64), Data::Float(0.5), Data::Float(0.0), Data::Float(1.0)],
        ]);
        let table = SheetTable::from_range("f.xlsx", "elec_pos", &range).unwrap();
        let electrodes = electrodes_from_table(&table, 0.02).unwrap();

        let err = check_point_tags(&electrodes, 200).unwrap_err();
        assert!(err.to_string().contains("Electrode 4294967295"), "{}", err);
        assert_eq!(electrodes[1].checked_point_tag(200), None);
        assert_eq!(electrodes[1].point_tag(200), u32::MAX);

        // Fits u32 but not a Gmsh tag
        let electrode = Electrode{id: MAX_POINT_TAG, x: 0.0, y: 0.0, z: 0.0};
        assert_eq!(electrode.checked_point_tag(0), Some(MAX_POINT_TAG));
        assert!(check_point_tags(&[electrode], 1).is_err());

        check_point_tags(&electrodes[..1], 200).unwrap();
    }

    #[test]
    fn missing_column_fails() {
        let range = range_from(&["elec #", "x", "y"], &[
            vec![Data::Int(1), Data::Float(0.0), Data::Float(1.5)],
        ]);
        let table = SheetTable::from_range("f.xlsx", "elec_pos", &range).unwrap();
        let err = electrodes_from_table(&table, 0.02).unwrap_err();
        assert!(err.to_string().contains("no column \"z\""), "{}", err);
    }

    #[test]
    fn scheme_columns_follow_header_names() {
        let range = range_from(&["N", "M", "B", "A"], &[
            vec![Data::Int(4), Data::Int(3), Data::Int(2), Data::Int(1)],
            vec![Data::Float(5.0), Data::Float(4.0), Data::Float(3.0), Data::Float(2.0)],
        ]);
        let table = SheetTable::from_range("f.xlsx", "ERT_scheme", &range).unwrap();
        let scheme = scheme_from_table(&table).unwrap();
        assert_eq!(scheme, vec![
            Measurement{a: 1, b: 2, m: 3, n: 4},
            Measurement{a: 2, b: 3, m: 4, n: 5},
        ]);
    }

    #[test]
    fn fractional_electrode_number_fails() {
        let range = range_from(&["A", "B", "M", "N"], &[
            vec![Data::Int(1), Data::Float(2.5), Data::Int(3), Data::Int(4)],
        ]);
        let table = SheetTable::from_range("f.xlsx", "ERT_scheme", &range).unwrap();
        assert!(scheme_from_table(&table).is_err());
    }
}
