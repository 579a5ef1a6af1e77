pub mod args;
pub mod io;
pub mod survey;
pub mod elecs;
pub mod mesh;
pub mod scheme;
pub mod sim;
pub mod example;
mod crate_errors;

use strum::IntoEnumIterator;

pub use crate_errors::{
    DikertError,
    DikertResult,
    err_str,
};

/// Targets struct.
/// Holds the survey config and the target of every stage to run.
#[derive(Debug)]
pub struct Targets{
    pub survey: survey::SurveyCfg,
    pub elecs_target: Option<elecs::ElecsTarget>,
    pub mesh_target: Option<mesh::MeshTarget>,
    pub scheme_target: Option<scheme::SchemeTarget>,
    pub sim_target: Option<sim::SimTarget>,
    pub dry_run: bool,
}

/// Print a stage banner.
fn stage_banner(title: &str) {
    let rule = "#".repeat(title.len());
    println!();
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
    println!();
}

/// [Stage 1.]
/// Build the stage targets from the `run` arguments.
/// Without a start stage every stage runs. Without an end stage only the start stage runs.
/// Stage config files are optional: missing ones fall back to the defaults.
/// Returns a `DikertResult` with the `Targets` or an `Err`.
pub fn build_targets(cli_args: args::RunArgs) -> DikertResult<Targets>{
    let (start_stage, end_stage) = match (cli_args.start_stage, cli_args.end_stage) {
        (None, None) => (args::RunStage::Elecs, args::RunStage::Sim),
        (None, Some(end_stage)) => (args::RunStage::Elecs, end_stage),
        (Some(start_stage), None) => (start_stage, start_stage),
        (Some(start_stage), Some(end_stage)) => (start_stage, end_stage),
    };

    if start_stage.stage_num() > end_stage.stage_num() {
        args::err_str(&format!("Start stage ({}) is after end stage ({})", start_stage, end_stage))?;
    }
    if start_stage == end_stage {
        println!("Stage to run: {}...", start_stage);
    }
    else {
        println!("Stages to run: {} through {} ...", start_stage, end_stage);
    }

    if let Some(survey_cfg_file) = &cli_args.survey_cfg {
        println!("Loading survey config file: {}...", survey_cfg_file);
    }
    let mut targets = Targets{
        survey: survey::SurveyCfg::from_cfg_file(cli_args.survey_cfg.as_deref())?,
        elecs_target: None,
        mesh_target: None,
        scheme_target: None,
        sim_target: None,
        dry_run: cli_args.dry_run,
    };

    for stage in args::RunStage::iter() {
        if stage.stage_num() < start_stage.stage_num() {
            continue;
        }
        if stage.stage_num() > end_stage.stage_num() {
            break;
        }

        match stage {
            args::RunStage::Elecs => {
                if let Some(elecs_cfg_file) = &cli_args.elecs_cfg {
                    println!("Loading electrode geometry config file: {}...", elecs_cfg_file);
                }
                targets.elecs_target = Some(elecs::ElecsTarget::from_cfg_file(cli_args.elecs_cfg.as_deref())?);
            },
            args::RunStage::Mesh => {
                if let Some(mesh_cfg_file) = &cli_args.mesh_cfg {
                    println!("Loading mesh config file: {}...", mesh_cfg_file);
                }
                targets.mesh_target = Some(mesh::MeshTarget::from_cfg_file(cli_args.mesh_cfg.as_deref())?);
            },
            args::RunStage::Scheme => {
                if let Some(scheme_cfg_file) = &cli_args.scheme_cfg {
                    println!("Loading scheme config file: {}...", scheme_cfg_file);
                }
                targets.scheme_target = Some(scheme::SchemeTarget::from_cfg_file(cli_args.scheme_cfg.as_deref())?);
            },
            args::RunStage::Sim => {
                if let Some(sim_cfg_file) = &cli_args.sim_cfg {
                    println!("Loading simulation config file: {}...", sim_cfg_file);
                }
                targets.sim_target = Some(sim::SimTarget::from_cfg_file(cli_args.sim_cfg.as_deref())?);
            },
        }
    }

    Ok(targets)
}

/// [Stage 2.]
/// Run the process on the targets, in pipeline order.
/// The survey spreadsheet is read once and shared by the stages that need it.
/// Returns a `DikertResult` with `()` or an `Err`.
pub fn run_process(targets: Targets) -> DikertResult<()> {
    let needs_electrodes = targets.elecs_target.is_some()
        || targets.mesh_target.is_some()
        || targets.scheme_target.is_some();

    let electrodes = if needs_electrodes {
        survey::load_electrodes(&targets.survey)?
    } else {
        Vec::new()
    };
    let tag_offset = targets.survey.point_tag_offset;

    // 2.1 Electrode geometry
    if let Some(elecs_target) = &targets.elecs_target {
        stage_banner("Writing electrode geometry...");
        elecs::do_elecs(elecs_target, &electrodes, tag_offset)?;
    }

    // 2.2 Mesh
    let mesh_out = match &targets.mesh_target {
        Some(mesh_target) => {
            stage_banner("Running mesh...");
            Some(mesh::do_mesh(mesh_target, &electrodes, tag_offset, targets.dry_run)?)
        },
        None => None,
    };

    // 2.3 Scheme
    let scheme_out = match &targets.scheme_target {
        Some(scheme_target) => {
            stage_banner("Writing scheme...");
            let scheme = survey::load_scheme(&targets.survey)?;
            scheme::do_scheme(scheme_target, &electrodes, &scheme)?;
            Some(scheme_target.output_path.clone())
        },
        None => None,
    };

    // 2.4 Simulation, on the outputs of this run when they exist
    if let Some(sim_target) = &targets.sim_target {
        stage_banner("Running simulation...");
        sim::do_simulation(sim_target, mesh_out.as_deref(), scheme_out.as_deref(), targets.dry_run)?;
    }

    Ok(())
}

/// Top-level tests
#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(start_stage: Option<args::RunStage>, end_stage: Option<args::RunStage>) -> args::RunArgs {
        args::RunArgs{
            start_stage,
            end_stage,
            survey_cfg: None,
            elecs_cfg: None,
            mesh_cfg: None,
            scheme_cfg: None,
            sim_cfg: None,
            dry_run: false,
        }
    }

    #[test]
    fn no_stages_runs_everything() {
        let targets = build_targets(run_args(None, None)).unwrap();
        assert!(targets.elecs_target.is_some());
        assert!(targets.mesh_target.is_some());
        assert!(targets.scheme_target.is_some());
        assert!(targets.sim_target.is_some());
    }

    #[test]
    fn start_stage_alone_runs_one_stage() {
        let targets = build_targets(run_args(Some(args::RunStage::Scheme), None)).unwrap();
        assert!(targets.elecs_target.is_none());
        assert!(targets.mesh_target.is_none());
        assert!(targets.scheme_target.is_some());
        assert!(targets.sim_target.is_none());
    }

    #[test]
    fn stage_range_is_inclusive() {
        let targets = build_targets(run_args(Some(args::RunStage::Mesh), Some(args::RunStage::Scheme))).unwrap();
        assert!(targets.elecs_target.is_none());
        assert!(targets.mesh_target.is_some());
        assert!(targets.scheme_target.is_some());
        assert!(targets.sim_target.is_none());
    }

    #[test]
    fn reversed_stages_are_rejected() {
        let err = build_targets(run_args(Some(args::RunStage::Sim), Some(args::RunStage::Elecs))).unwrap_err();
        assert!(err.to_string().contains("Start stage (sim) is after end stage (elecs)"), "{}", err);
    }

    #[test]
    fn missing_survey_file_fails_the_run() {
        let mut targets = build_targets(run_args(Some(args::RunStage::Elecs), None)).unwrap();
        targets.survey.input_path = "no_such_survey.xlsx".to_string();
        let err = run_process(targets).unwrap_err();
        assert!(err.to_string().contains("no_such_survey.xlsx"), "{}", err);
    }

    #[test]
    fn workbook_flows_through_elecs_scheme_and_sim() {
        let dir = tempfile::tempdir().unwrap();
        let out = |name: &str| dir.path().join(name).to_str().unwrap().to_string();

        let mut targets = build_targets(run_args(Some(args::RunStage::Elecs), Some(args::RunStage::Sim))).unwrap();
        targets.dry_run = true;
        targets.survey.input_path = crate::io::xlsx::tests::SURVEY_WORKBOOK.to_string();
        targets.elecs_target = Some(elecs::ElecsTarget{
            output_path: out("gmsh_elec_pos.geo"),
            size_symbol: "cl_elec".to_string(),
        });
        // Mesh scripts go to fixed paths; the mesh stage is covered by its own tests
        targets.mesh_target = None;
        targets.scheme_target = Some(scheme::SchemeTarget{output_path: out("chained.dat")});
        let mut sim_target: sim::SimTarget = serde_yaml::from_str(&format!(
            "method:\n  name: pygimli\n  script_path: {}\n", out("ert_sim.py")
        )).unwrap();
        sim_target.mesh_path = out("given.msh");
        sim_target.output_path = out("ert_mod.dat");
        targets.sim_target = Some(sim_target);

        run_process(targets).unwrap();

        assert_eq!(std::fs::read_to_string(out("gmsh_elec_pos.geo")).unwrap(), concat!(
            "Point(201) = {0.000, 0.000, 4.980, cl_elec};\n",
            "Point(202) = {0.500, 0.000, 4.980, cl_elec};\n",
            "Point(203) = {1.000, 0.000, 5.080, cl_elec};\n",
            "Point(204) = {1.500, 0.000, 5.105, cl_elec};\n",
        ));
        assert_eq!(std::fs::read_to_string(out("chained.dat")).unwrap(), concat!(
            "4\n# x y z\n",
            "0.000 0.000 4.980\n0.500 0.000 4.980\n1.000 0.000 5.080\n1.500 0.000 5.105\n",
            "2\n# a b m n\n",
            "1 2 3 4\n2 3 4 1\n",
            "0",
        ));
        let script = std::fs::read_to_string(out("ert_sim.py")).unwrap();
        assert!(script.contains(&format!("pg.importData('{}')", out("chained.dat"))), "{}", script);
        assert!(script.contains(&format!("mt.readGmsh('{}')", out("given.msh"))), "{}", script);
    }
}
