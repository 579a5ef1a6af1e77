mod proc_errors;
mod cfg;

use crate::survey::{
    Electrode,
    Measurement,
};

// Re-export errors
pub use proc_errors::{
    SchemeError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::SchemeTarget;

/// Format the electrodes and measurements in the BERT/pyGIMLi unified data format.
/// The file ends with the `0` sentinel and no trailing newline.
pub fn format_scheme(electrodes: &[Electrode], scheme: &[Measurement]) -> String {
    let mut buffer = String::new();

    buffer.push_str(&format!("{}\n", electrodes.len()));
    buffer.push_str("# x y z\n");
    for electrode in electrodes.iter() {
        buffer.push_str(&format!("{:.3} {:.3} {:.3}\n", electrode.x, electrode.y, electrode.z));
    }

    buffer.push_str(&format!("{}\n", scheme.len()));
    buffer.push_str("# a b m n\n");
    for measurement in scheme.iter() {
        buffer.push_str(&format!("{} {} {} {}\n", measurement.a, measurement.b, measurement.m, measurement.n));
    }

    buffer.push('0');
    buffer
}

/// Run the scheme stage: write the scheme file for the simulation.
pub fn do_scheme(target: &SchemeTarget, electrodes: &[Electrode], scheme: &[Measurement]) -> ProcResult<()> {
    log::info!("Writing {} electrodes and {} measurements to {}...", electrodes.len(), scheme.len(), target.output_path);
    if scheme.is_empty() {
        log::warn!("ERT scheme is empty: the simulation will have no data");
    }
    crate::io::write_to_file(&target.output_path, &format_scheme(electrodes, scheme))?;
    Ok(())
}
