//! Multi-class classification metrics

use super::average::Average;
use super::confusion::ConfusionMatrix;
use serde::{Deserialize, Serialize};

/// Per-class precision, recall, F1 and support
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiClassMetrics {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub f1: Vec<f64>,
    pub support: Vec<usize>,
    pub n_classes: usize,
    tp: usize,
    fp: usize,
    fn_: usize,
}

impl MultiClassMetrics {
    /// Compute metrics from confusion matrix
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let n_classes = cm.n_classes();
        let mut precision = Vec::with_capacity(n_classes);
        let mut recall = Vec::with_capacity(n_classes);
        let mut f1 = Vec::with_capacity(n_classes);
        let mut support = Vec::with_capacity(n_classes);
        let (mut tp_sum, mut fp_sum, mut fn_sum) = (0, 0, 0);

        for class in 0..n_classes {
            let (tp, fp, fn_) = (cm.true_positives(class), cm.false_positives(class), cm.false_negatives(class));
            tp_sum += tp;
            fp_sum += fp;
            fn_sum += fn_;

            let p = ratio(tp, tp + fp);
            let r = ratio(tp, tp + fn_);
            precision.push(p);
            recall.push(r);
            f1.push(harmonic(p, r));
            support.push(cm.support(class));
        }

        Self { precision, recall, f1, support, n_classes, tp: tp_sum, fp: fp_sum, fn_: fn_sum }
    }

    pub fn precision_avg(&self, average: Average) -> f64 {
        match average {
            Average::Micro => ratio(self.tp, self.tp + self.fp),
            _ => self.average_metric(&self.precision, average),
        }
    }

    pub fn recall_avg(&self, average: Average) -> f64 {
        match average {
            Average::Micro => ratio(self.tp, self.tp + self.fn_),
            _ => self.average_metric(&self.recall, average),
        }
    }

    pub fn f1_avg(&self, average: Average) -> f64 {
        match average {
            Average::Micro => harmonic(self.precision_avg(Average::Micro), self.recall_avg(Average::Micro)),
            _ => self.average_metric(&self.f1, average),
        }
    }

    fn average_metric(&self, values: &[f64], average: Average) -> f64 {
        match average {
            Average::Weighted => {
                let total_support: usize = self.support.iter().sum();
                if total_support == 0 {
                    return 0.0;
                }
                values.iter().zip(&self.support).map(|(&v, &s)| v * s as f64).sum::<f64>()
                    / total_support as f64
            }
            _ => {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn harmonic(p: f64, r: f64) -> f64 {
    if p + r > 0.0 {
        2.0 * p * r / (p + r)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn metrics() -> MultiClassMetrics {
        // sklearn: y_true=[0,1,0,2,1], y_pred=[0,1,1,2,0]
        let cm = ConfusionMatrix::from_predictions(&[0, 1, 1, 2, 0], &[0, 1, 0, 2, 1], 3).unwrap();
        MultiClassMetrics::from_confusion_matrix(&cm)
    }

    #[test]
    fn test_per_class() {
        let m = metrics();
        assert_relative_eq!(m.precision[0], 0.5);
        assert_relative_eq!(m.recall[1], 0.5);
        assert_relative_eq!(m.f1[2], 1.0);
        assert_eq!(m.support, vec![2, 2, 1]);
    }

    #[test]
    fn test_averages() {
        let m = metrics();
        assert_relative_eq!(m.precision_avg(Average::Macro), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.f1_avg(Average::Weighted), (0.5 * 2.0 + 0.5 * 2.0 + 1.0) / 5.0, epsilon = 1e-12);
        // micro precision == micro recall == accuracy for single-label problems
        assert_relative_eq!(m.precision_avg(Average::Micro), 0.6, epsilon = 1e-12);
        assert_relative_eq!(m.recall_avg(Average::Micro), 0.6, epsilon = 1e-12);
        assert_relative_eq!(m.f1_avg(Average::Micro), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_class_never_predicted_has_zero_precision() {
        let cm = ConfusionMatrix::from_predictions(&[0, 0], &[0, 1], 2).unwrap();
        let m = MultiClassMetrics::from_confusion_matrix(&cm);
        assert_eq!(m.precision[1], 0.0);
        assert_eq!(m.f1[1], 0.0);
    }
}
