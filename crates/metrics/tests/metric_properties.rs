use fim_dataset::{Sample, SourceFile};
use fim_metrics::{
    chrf, chrf_plus_plus, evaluate_dataset, levenshtein_ratio, longest_common_substring,
    TreeSitterFactory,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn scored(middle: &str, start: usize, end: usize, result: Option<&str>) -> Sample {
    let mut sample = Sample::new(middle, start, end);
    sample.generation_result = result.map(str::to_string);
    sample
}

#[test]
fn dataset_scoring_skips_ungenerated_samples() {
    let text = "items = [1, 2]\nprint(len(items))\n";
    let mut files = vec![SourceFile::new(
        "demo.py",
        text,
        vec![
            scored("1, 2", 9, 13, Some("1, 2")),
            scored("items", 25, 30, None),
            scored("items", 25, 30, Some("items))")),
        ],
    )];

    let count = evaluate_dataset(&mut files, &TreeSitterFactory).unwrap();
    assert_eq!(count, 2);

    let samples = &files[0].samples;
    let exact = samples[0].metrics.as_ref().unwrap();
    assert_eq!(exact.exact_match.exact_match, 1.0);
    assert_eq!(exact.syntactic_correctness, 1);
    assert!(samples[1].metrics.is_none());

    let overshoot = samples[2].metrics.as_ref().unwrap();
    assert_eq!(overshoot.syntactic_correctness, 0);
    assert_eq!(overshoot.lcs, 5);
    assert_eq!(overshoot.lcs_normalized, 1.0);
}

#[test]
fn unsupported_language_fails_only_when_scoring_is_needed() {
    let mut idle = vec![SourceFile::new(
        "notes.txt",
        "hello\n",
        vec![scored("hello", 0, 5, None)],
    )];
    assert_eq!(evaluate_dataset(&mut idle, &TreeSitterFactory).unwrap(), 0);

    let mut busy = vec![SourceFile::new(
        "notes.txt",
        "hello\n",
        vec![scored("hello", 0, 5, Some("hello"))],
    )];
    assert!(evaluate_dataset(&mut busy, &TreeSitterFactory).is_err());
}

proptest! {
    #[test]
    fn ratio_is_bounded_and_symmetric(a in "\\PC{0,24}", b in "\\PC{0,24}") {
        let ab = levenshtein_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - levenshtein_ratio(&b, &a)).abs() < 1e-12);
        prop_assert_eq!(ab == 1.0, a == b);
    }

    #[test]
    fn longest_match_is_a_real_substring(a in "[a-c]{0,16}", b in "[a-c]{0,16}") {
        let m = longest_common_substring(&a, &b);
        prop_assert!(m.size <= a.len().min(b.len()));
        prop_assert_eq!(&a[m.a_start..m.a_start + m.size], &b[m.b_start..m.b_start + m.size]);
    }

    #[test]
    fn chrf_scores_stay_in_range(a in "[a-z (),]{0,30}", b in "[a-z (),]{0,30}") {
        for score in [chrf(&a, &b).score, chrf_plus_plus(&a, &b).score] {
            prop_assert!((0.0..=100.0 + 1e-9).contains(&score));
        }
    }
}
