use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CALC_PY: &str = "def area(w, h):\n    return w * h\n\n\nprint(area(2, 3))\n";

#[allow(deprecated)]
fn fim_eval(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fim-eval").expect("binary");
    cmd.current_dir(workdir).env("RUST_LOG", "warn");
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).expect("valid json")
}

fn sample_and_run(root: &Path) {
    fs::write(root.join("calc.py"), CALC_PY).unwrap();
    fim_eval(root)
        .args(["sample", "--files", "calc.py", "--num-samples", "4", "--seed", "7"])
        .assert()
        .success();
    fim_eval(root)
        .args(["run", "--backend", "stub"])
        .assert()
        .success();
}

#[test]
fn sample_writes_reproducible_dataset() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("calc.py"), CALC_PY).unwrap();

    for output in ["a.json", "b.json"] {
        fim_eval(root)
            .args(["sample", "--files", "calc.py", "--num-samples", "6", "--output", output])
            .assert()
            .success();
    }

    let first = read_json(&root.join("a.json"));
    assert_eq!(first, read_json(&root.join("b.json")));
    assert_eq!(first[0]["filename"], "calc.py");
    assert_eq!(first[0]["text"], CALC_PY);
    assert_eq!(first[0]["samples"].as_array().unwrap().len(), 6);
    assert!(first[0]["samples"][0].get("generation_result").is_none());
}

#[test]
fn stub_run_scores_every_sample() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    sample_and_run(root);

    let output = read_json(&root.join("output.json"));
    let samples = output[0]["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 4);
    for sample in samples {
        assert_eq!(sample["generation_result"], "");
        let metrics = &sample["metrics"];
        assert_eq!(metrics["chrf"]["char_order"], 6);
        assert_eq!(metrics["chrf++"]["word_order"], 2);
        let expected_match = if sample["middle"] == "" { 1.0 } else { 0.0 };
        assert_eq!(metrics["exact_match"]["exact_match"], expected_match);
    }
}

#[test]
fn evaluate_rescores_in_place() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    sample_and_run(root);

    let mut output = read_json(&root.join("output.json"));
    let sample = &mut output[0]["samples"][0];
    let middle = sample["middle"].clone();
    sample["generation_result"] = middle;
    fs::write(root.join("output.json"), output.to_string()).unwrap();

    fim_eval(root).arg("evaluate").assert().success();

    let rescored = read_json(&root.join("output.json"));
    let metrics = &rescored[0]["samples"][0]["metrics"];
    assert_eq!(metrics["exact_match"]["exact_match"], 1.0);
    assert_eq!(metrics["levenshtein"], 1.0);
}

#[test]
fn annotate_reads_piped_answers_then_correlate_reports() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    sample_and_run(root);

    fim_eval(root)
        .arg("annotate")
        .write_stdin("ok\n1\nmeh\n2\n\n4\nbad\nnope\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect value type, enter again"));

    let annotated = read_json(&root.join("annotated.json"));
    let labels: Vec<f64> = annotated[0]["samples"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_f64().unwrap())
        .collect();
    assert_eq!(labels, vec![1.0, 2.0, 4.0, 3.0]);
    assert_eq!(annotated[0]["samples"][2]["annotations"], "");

    fim_eval(root)
        .arg("correlate")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Pearson\nexact_match"))
        .stdout(predicate::str::contains("\nSpearman\n"))
        .stdout(predicate::str::contains("lcs_normalized           \tstatistic="));

    let out = fim_eval(root)
        .args(["correlate", "--json", "--out-md", "reports/corr.md"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["samples"], 4);
    assert_eq!(report["pearson"].as_array().unwrap().len(), 7);
    assert_eq!(report["spearman"][2]["metric"], "chrf++");

    let md = fs::read_to_string(root.join("reports/corr.md")).unwrap();
    assert!(md.contains("# FIM metric correlation report"));
}

#[test]
fn annotate_fails_when_input_runs_out() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    sample_and_run(root);

    fim_eval(root)
        .arg("annotate")
        .write_stdin("only one answer\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended before annotation finished"));
    assert!(!root.join("annotated.json").exists());
}

#[test]
fn correlate_requires_labels() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    sample_and_run(root);

    fim_eval(root)
        .args(["correlate", "--dataset", "output.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing `label`"));
}
