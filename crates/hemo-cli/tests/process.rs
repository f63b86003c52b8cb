use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::Path;

fn read_report(path: &Path) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[test]
fn empty_tree_leaves_header_only_report() -> Result<(), Box<dyn Error>> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    fs::create_dir_all(input.path().join("P01"))?;
    let out_dir = output.path().join("results");

    let mut cmd = cargo_bin_cmd!("hemo");
    cmd.args([
        "process",
        "--input",
        input.path().to_str().expect("utf8 path"),
        "--output",
        out_dir.to_str().expect("utf8 path"),
    ]);
    let stdout = cmd.assert().success().get_output().stdout.clone();
    let summary: Value = serde_json::from_slice(&stdout)?;
    assert_eq!(summary["processed"], 0);

    let rows = read_report(&out_dir.join("results.csv"))?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "patient_id");
    assert_eq!(rows[0][9], "pdpa_mean_dobu");
    Ok(())
}

#[test]
fn bad_recording_aborts_before_reporting() -> Result<(), Box<dyn Error>> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    let patient = input.path().join("P03");
    fs::create_dir_all(&patient)?;
    fs::write(
        patient.join("P03_rest.csv"),
        "time,p_aortic_smooth,p_distal_smooth,pd/pa,iFR,peaks\n0,90,80,0.9,0.9,2\n",
    )?;

    let mut cmd = cargo_bin_cmd!("hemo");
    cmd.args([
        "process",
        "--input",
        input.path().to_str().expect("utf8 path"),
        "--output",
        output.path().to_str().expect("utf8 path"),
    ]);
    let stderr = cmd.assert().failure().get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&stderr).contains("mid_systolic_ratio"));

    let rows = read_report(&output.path().join("results.csv"))?;
    assert_eq!(rows.len(), 1);
    assert!(!patient.join("P03_rest_average_curve_all.png").exists());
    Ok(())
}
