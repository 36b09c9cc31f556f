//! Property tests for held-out evaluation
//!
//! - Metrics bounded to [0, 1], never NaN
//! - Confusion matrix counts every sample exactly once
//! - Micro-averaged F1 equals accuracy for single-label classification

use matheal::eval::{Average, ClassificationReport, ConfusionMatrix, MultiClassMetrics};
use proptest::collection::vec;
use proptest::prelude::*;

/// Pair of prediction/true labels with the same length
fn label_pair(n_classes: usize, len: std::ops::Range<usize>) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    len.prop_flat_map(move |l| (vec(0..n_classes, l), vec(0..n_classes, l)))
}

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("class {i}")).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_confusion_counts_every_sample((y_pred, y_true) in label_pair(3, 0..80)) {
        let cm = ConfusionMatrix::from_predictions(&y_pred, &y_true, 3).unwrap();
        prop_assert_eq!(cm.total(), y_true.len());
        let support: usize = (0..3).map(|c| cm.support(c)).sum();
        prop_assert_eq!(support, y_true.len());
    }

    #[test]
    fn prop_accuracy_bounded((y_pred, y_true) in label_pair(4, 1..100)) {
        let acc = ConfusionMatrix::from_predictions(&y_pred, &y_true, 4).unwrap().accuracy();
        prop_assert!((0.0..=1.0).contains(&acc));
    }

    #[test]
    fn prop_per_class_metrics_bounded((y_pred, y_true) in label_pair(3, 1..100)) {
        let cm = ConfusionMatrix::from_predictions(&y_pred, &y_true, 3).unwrap();
        let metrics = MultiClassMetrics::from_confusion_matrix(&cm);
        for value in metrics.precision.iter().chain(&metrics.recall).chain(&metrics.f1) {
            prop_assert!(value.is_finite());
            prop_assert!((0.0..=1.0).contains(value));
        }
        for avg in [Average::Macro, Average::Micro, Average::Weighted] {
            let f1 = metrics.f1_avg(avg);
            prop_assert!((0.0..=1.0).contains(&f1));
        }
    }

    #[test]
    fn prop_micro_f1_equals_accuracy((y_pred, y_true) in label_pair(3, 1..100)) {
        let cm = ConfusionMatrix::from_predictions(&y_pred, &y_true, 3).unwrap();
        let metrics = MultiClassMetrics::from_confusion_matrix(&cm);
        prop_assert!((metrics.f1_avg(Average::Micro) - cm.accuracy()).abs() < 1e-9);
    }

    #[test]
    fn prop_perfect_predictions(y in vec(0usize..3, 1..60)) {
        let report = ClassificationReport::new(&y, &y, &labels(3)).unwrap();
        prop_assert!((report.accuracy - 1.0).abs() < 1e-12);
        prop_assert_eq!(report.samples(), y.len());
    }
}

#[test]
fn test_out_of_range_label_rejected() {
    assert!(ConfusionMatrix::from_predictions(&[0, 3], &[0, 1], 3).is_err());
}

#[test]
fn test_absent_class_keeps_row() {
    let report = ClassificationReport::new(&[0, 0, 1], &[0, 0, 1], &labels(3)).unwrap();
    assert_eq!(report.classes.len(), 3);
    assert_eq!(report.classes[2].support, 0);
    assert_eq!(report.confusion.n_classes(), 3);
}
