use fim_dataset::{load_dataset, save_dataset, DatasetError, Sample, SourceFile};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn sample_file() -> SourceFile {
    let mut annotated = Sample::new("bar", 4, 7);
    annotated.generation_result = Some("bar".to_string());
    annotated.annotations = Some("fine".to_string());
    annotated.label = Some(1.0);
    SourceFile::new("demo.py", "foo(bar)\n", vec![Sample::new("", 8, 8), annotated])
}

#[test]
fn save_then_load_preserves_records() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nested/out/dataset.json");

    save_dataset(&path, &[sample_file()]).unwrap();
    let loaded = load_dataset(&path).unwrap();

    assert_eq!(loaded, vec![sample_file()]);
}

#[test]
fn loads_dataset_written_by_other_tools() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("output.json");
    fs::write(
        &path,
        r#"[{"filename": "a.py", "text": "x = (1)\n", "samples": [
            {"middle": "1", "middle_start": 5, "middle_end": 6,
             "generation_result": "2",
             "metrics": {
                "chrf": {"score": 0.0, "char_order": 6, "word_order": 0, "beta": 2},
                "exact_match": {"exact_match": 0.0},
                "syntactic_correctness": 1,
                "levenshtein": 0.0,
                "lcs": 0,
                "lcs_normalized": 0.0,
                "chrf++": {"score": 0.0, "char_order": 6, "word_order": 2, "beta": 2}
             }}
        ]}]"#,
    )
    .unwrap();

    let loaded = load_dataset(&path).unwrap();
    let metrics = loaded[0].samples[0].metrics.as_ref().unwrap();
    assert_eq!(metrics.chrf_plus_plus.word_order, 2);
    assert_eq!(loaded[0].samples[0].label, None);
}

#[test]
fn missing_required_field_fails_fast() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(
        &path,
        r#"[{"filename": "a.py", "text": "x\n", "samples": [{"middle": "x", "middle_start": 0}]}]"#,
    )
    .unwrap();

    assert!(matches!(load_dataset(&path), Err(DatasetError::Json(_))));
}

#[test]
fn missing_file_reports_path() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("absent.json");
    let err = load_dataset(&path).unwrap_err();
    assert!(err.to_string().contains("absent.json"), "{err}");
}
