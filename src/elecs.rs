mod proc_errors;
mod cfg;

use crate::survey::Electrode;

// Re-export errors
pub use proc_errors::{
    ElecsError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::ElecsTarget;

/// Format one Gmsh point declaration for an electrode.
/// `decimals` fixes the number of decimals; `None` writes the shortest exact representation.
pub fn geo_point(electrode: &Electrode, tag_offset: u32, size_symbol: &str, decimals: Option<usize>) -> String {
    let tag = electrode.point_tag(tag_offset);
    match decimals {
        Some(decimals) => format!(
            "Point({}) = {{{:.*}, {:.*}, {:.*}, {}}};",
            tag, decimals, electrode.x, decimals, electrode.y, decimals, electrode.z, size_symbol
        ),
        None => format!(
            "Point({}) = {{{:?}, {:?}, {:?}, {}}};",
            tag, electrode.x, electrode.y, electrode.z, size_symbol
        ),
    }
}

/// Format the electrode point declarations, one line per electrode, coordinates to 3 decimals.
pub fn format_geo_points(electrodes: &[Electrode], tag_offset: u32, size_symbol: &str) -> String {
    let mut buffer = String::new();
    for electrode in electrodes.iter() {
        buffer.push_str(&geo_point(electrode, tag_offset, size_symbol, Some(3)));
        buffer.push('\n');
    }
    buffer
}

/// Run the electrode geometry stage: write the electrode positions as Gmsh points.
pub fn do_elecs(target: &ElecsTarget, electrodes: &[Electrode], tag_offset: u32) -> ProcResult<()> {
    if let Err(error) = crate::survey::check_point_tags(electrodes, tag_offset) {
        err_str(&error.to_string())?;
    }
    log::info!("Writing {} electrode points to {}...", electrodes.len(), target.output_path);
    let buffer = format_geo_points(electrodes, tag_offset, &target.size_symbol);
    crate::io::write_to_file(&target.output_path, &buffer)?;
    Ok(())
}
