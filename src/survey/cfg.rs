use serde::{Serialize, Deserialize};

use crate::args;

/// Survey config: where the electrode table and measurement scheme live, and how to place the electrodes.
/// Shared by every stage that reads the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyCfg {
    /// Spreadsheet with the electrode positions and the ERT scheme.
    #[serde(default = "SurveyCfg::default_input_path", alias = "input", alias = "in", alias = "i")]
    pub input_path: String,

    /// Sheet with the columns `elec #`, `x`, `y`, `z`.
    #[serde(default = "SurveyCfg::default_electrode_sheet")]
    pub electrode_sheet: String,

    /// Sheet with the columns `A`, `B`, `M`, `N`.
    #[serde(default = "SurveyCfg::default_scheme_sheet")]
    pub scheme_sheet: String,

    /// Depth below the sheet z at which the electrodes are placed [m].
    /// Electrodes on the dike surface can't be embedded reliably, so they are pushed into the volume.
    #[serde(default = "SurveyCfg::default_depth", alias = "elec_depth")]
    pub depth: f64,

    /// Offset added to the electrode number to get its Gmsh point tag.
    #[serde(default = "SurveyCfg::default_point_tag_offset")]
    pub point_tag_offset: u32,
}
impl SurveyCfg {
    pub fn default_input_path() -> String {
        "ERT_pos_and_scheme.xlsx".to_string()
    }
    pub fn default_electrode_sheet() -> String {
        "elec_pos".to_string()
    }
    pub fn default_scheme_sheet() -> String {
        "ERT_scheme".to_string()
    }
    pub fn default_depth() -> f64 {
        0.02
    }
    pub fn default_point_tag_offset() -> u32 {
        200
    }

    /// Load the survey config from a file, or use the defaults.
    pub fn from_cfg_file(cfg_file: Option<&str>) -> args::ProcResult<Self> {
        let cfg: SurveyCfg = match cfg_file {
            Some(cfg_file) => crate::io::read_cfg_file(cfg_file)?,
            None => SurveyCfg::default(),
        };

        if !cfg.depth.is_finite() {
            args::err_str(&format!("Electrode depth must be finite, got {}", cfg.depth))?;
        }
        if cfg.point_tag_offset == 0 {
            log::warn!("Electrode point tag offset is 0: electrode tags may collide with geometry points");
        }

        Ok(cfg)
    }
}
impl Default for SurveyCfg {
    fn default() -> Self {
        SurveyCfg{
            input_path: Self::default_input_path(),
            electrode_sheet: Self::default_electrode_sheet(),
            scheme_sheet: Self::default_scheme_sheet(),
            depth: Self::default_depth(),
            point_tag_offset: Self::default_point_tag_offset(),
        }
    }
}
