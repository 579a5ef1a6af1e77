use assert_cmd::Command;

fn dikert() -> Command {
    Command::cargo_bin("dikert").unwrap()
}

#[test]
fn no_command_prints_usage() {
    let output = dikert().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage: dikert <COMMAND>"), "{}", stderr);
    assert!(stderr.contains("run"));
    assert!(stderr.contains("example"));
}

#[test]
fn example_lists_mesh_methods() {
    let output = dikert().args(["example", "mesh"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Available methods:"));
    assert!(stdout.contains("gmsh"));
}

#[test]
fn example_mesh_cfg_is_json() {
    let output = dikert().args(["example", "mesh", "--method", "gmsh", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let cfg: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["method"]["name"], "gmsh");
    assert_eq!(cfg["output_path"], "dike_mod.msh");
}

#[test]
fn example_unknown_method_fails() {
    dikert().args(["example", "sim", "--method", "comsol"]).assert().failure().code(1);
}

#[test]
fn reversed_stage_range_fails() {
    let output = dikert().args(["run", "sim", "elecs"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Start stage (sim) is after end stage (elecs)"), "{}", stderr);
}

#[test]
fn missing_spreadsheet_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dikert().current_dir(dir.path()).args(["run", "elecs"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("PROCESS ERROR!"));
    assert!(stderr.contains("ERT_pos_and_scheme.xlsx"), "{}", stderr);
    assert!(!dir.path().join("gmsh_elec_pos.geo").exists());
}

#[test]
fn dry_run_sim_needs_no_inputs() {
    let dir = tempfile::tempdir().unwrap();
    dikert().current_dir(dir.path()).args(["run", "sim", "--dry-run"]).assert().success();
    let script = std::fs::read_to_string(dir.path().join("ert_sim.py")).unwrap();
    assert!(script.contains("mt.readGmsh('dike_mod.msh')"));
    assert!(script.contains("data.save('ert_mod.dat')"));
}

/// Scratch directory holding a copy of the survey workbook under its default name.
fn survey_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/ERT_pos_and_scheme.xlsx"),
        dir.path().join("ERT_pos_and_scheme.xlsx"),
    ).unwrap();
    dir
}

#[test]
fn dry_run_pipeline_writes_every_stage() {
    let dir = survey_dir();
    std::fs::write(dir.path().join("mesh.yaml"), "output: levee.msh\n").unwrap();
    std::fs::write(dir.path().join("scheme.toml"), "output_path = \"levee.dat\"\n").unwrap();

    dikert()
        .current_dir(dir.path())
        .args(["run", "--dry-run", "--mesh-cfg", "mesh.yaml", "--scheme-cfg", "scheme.toml"])
        .assert()
        .success();

    let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(read("gmsh_elec_pos.geo"), concat!(
        "Point(201) = {0.000, 0.000, 4.980, cl_elec};\n",
        "Point(202) = {0.500, 0.000, 4.980, cl_elec};\n",
        "Point(203) = {1.000, 0.000, 5.080, cl_elec};\n",
        "Point(204) = {1.500, 0.000, 5.105, cl_elec};\n",
    ));
    assert_eq!(read("levee.dat"), concat!(
        "4\n# x y z\n",
        "0.000 0.000 4.980\n0.500 0.000 4.980\n1.000 0.000 5.080\n1.500 0.000 5.105\n",
        "2\n# a b m n\n",
        "1 2 3 4\n2 3 4 1\n",
        "0",
    ));
    assert!(read("dike_mod.geo").contains("Point{201, 202, 203, 204} In Volume{3};"));
    assert!(!dir.path().join("levee.msh").exists());

    // The simulation reads this run's mesh and scheme, not the configured defaults
    let script = read("ert_sim.py");
    assert!(script.contains("mt.readGmsh('levee.msh')"), "{}", script);
    assert!(script.contains("pg.importData('levee.dat')"), "{}", script);
    assert!(script.contains("data.save('ert_mod.dat')"), "{}", script);
}

#[test]
fn missing_sheet_fails() {
    let dir = survey_dir();
    std::fs::write(dir.path().join("survey.yaml"), "electrode_sheet: positions\n").unwrap();

    let output = dikert()
        .current_dir(dir.path())
        .args(["run", "elecs", "--survey-cfg", "survey.yaml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Sheet \"positions\" not found"), "{}", stderr);
    assert!(!dir.path().join("gmsh_elec_pos.geo").exists());
}

#[test]
fn scheme_output_clobbering_sim_output_fails() {
    let dir = survey_dir();
    std::fs::write(dir.path().join("scheme.yaml"), "output_path: ert_mod.dat\n").unwrap();

    let output = dikert()
        .current_dir(dir.path())
        .args(["run", "scheme", "sim", "--dry-run", "--scheme-cfg", "scheme.yaml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("would overwrite the scheme file ert_mod.dat"), "{}", stderr);
}
