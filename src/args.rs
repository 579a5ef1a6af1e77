mod proc_errors;

use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};
use strum::EnumIter;

pub use proc_errors::{
    ArgError,
    ProcResult,
    err_str,
};

/// Dike ERT modeling pipeline: electrode geometry, Gmsh meshing and pyGIMLi forward simulation.
#[derive(Debug, Parser)]
#[command(name = "dikert", version)]
pub struct DikertCli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands of the dikert binary.
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the pipeline from a start stage through an end stage (all stages if none are given).
    #[command(name = "run")]
    Run(RunArgs),

    /// Print an example config file for a stage.
    #[command(name = "example")]
    Example(ExampleArgs),
}

/// Pipeline stages, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, EnumIter, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RunStage {
    /// Write electrode positions as Gmsh geometry points.
    Elecs,
    /// Build the dike mesh with Gmsh.
    Mesh,
    /// Write the ERT scheme (unified data format).
    Scheme,
    /// Run the pyGIMLi forward simulation.
    Sim,
}
impl RunStage {
    /// Position of the stage in the pipeline.
    pub fn stage_num(&self) -> u32 {
        match self {
            RunStage::Elecs => 0,
            RunStage::Mesh => 1,
            RunStage::Scheme => 2,
            RunStage::Sim => 3,
        }
    }
}

/// Arguments for the `run` command. Compiled with clap.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// First stage to run. Runs every stage when omitted.
    #[arg(value_enum)]
    pub start_stage: Option<RunStage>,

    /// Last stage to run. Defaults to the start stage.
    #[arg(value_enum)]
    pub end_stage: Option<RunStage>,

    /// Survey config file (spreadsheet path, sheet names, electrode depth).
    #[arg(long = "survey-cfg")]
    pub survey_cfg: Option<String>,

    /// Electrode geometry stage config file.
    #[arg(long = "elecs-cfg")]
    pub elecs_cfg: Option<String>,

    /// Mesh stage config file.
    #[arg(long = "mesh-cfg")]
    pub mesh_cfg: Option<String>,

    /// Scheme stage config file.
    #[arg(long = "scheme-cfg")]
    pub scheme_cfg: Option<String>,

    /// Simulation stage config file.
    #[arg(long = "sim-cfg")]
    pub sim_cfg: Option<String>,

    /// Write every script and text file, but do not launch Gmsh or Python.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Config sections that can be printed as examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CfgSection {
    Survey,
    Elecs,
    Mesh,
    Scheme,
    Sim,
}

/// Arguments for the `example` command. Compiled with clap.
#[derive(Debug, Args)]
pub struct ExampleArgs {
    /// Config section to print.
    #[arg(value_enum)]
    pub stage: CfgSection,

    /// Method to use for stages with methods. Lists the available methods when omitted.
    #[arg(short, long)]
    pub method: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

/// Parse the command line arguments for the dikert binary.
pub fn parse_cli_args() -> DikertCli {
    DikertCli::parse()
}
