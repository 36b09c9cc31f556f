//! Classification report with class names

use super::average::Average;
use super::confusion::ConfusionMatrix;
use super::metrics::MultiClassMetrics;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metrics of one class
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Held-out evaluation result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_f1: f64,
    pub weighted_f1: f64,
    /// Mean categorical cross-entropy, when computed by the caller
    pub loss: Option<f32>,
    pub confusion: ConfusionMatrix,
    labels: Vec<String>,
}

impl ClassificationReport {
    /// Build from predicted and true class codes; `labels[i]` names code `i`
    pub fn new(y_pred: &[usize], y_true: &[usize], labels: &[String]) -> Result<Self> {
        let confusion = ConfusionMatrix::from_predictions(y_pred, y_true, labels.len())?;
        let metrics = MultiClassMetrics::from_confusion_matrix(&confusion);

        let classes = labels
            .iter()
            .enumerate()
            .map(|(i, label)| ClassMetrics {
                label: label.clone(),
                precision: metrics.precision[i],
                recall: metrics.recall[i],
                f1: metrics.f1[i],
                support: metrics.support[i],
            })
            .collect();

        Ok(Self {
            classes,
            accuracy: confusion.accuracy(),
            macro_f1: metrics.f1_avg(Average::Macro),
            weighted_f1: metrics.f1_avg(Average::Weighted),
            loss: None,
            confusion,
            labels: labels.to_vec(),
        })
    }

    /// Attach the mean loss on the same samples
    pub fn with_loss(mut self, loss: f32) -> Self {
        self.loss = Some(loss);
        self
    }

    /// Number of evaluated samples
    pub fn samples(&self) -> usize {
        self.confusion.total()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.classes.iter().map(|c| c.label.len()).max().unwrap_or(0).max(12);

        writeln!(f, "{:>width$} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f, "{}", "-".repeat(width + 44))?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f, "{}", "-".repeat(width + 44))?;
        writeln!(f, "{:>width$} {:>10} {:>10} {:>10.2} {:>10}", "macro f1", "", "", self.macro_f1, self.samples())?;
        writeln!(f, "{:>width$} {:>10} {:>10} {:>10.2} {:>10}", "weighted f1", "", "", self.weighted_f1, self.samples())?;
        writeln!(f)?;
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        if let Some(loss) = self.loss {
            writeln!(f, "Loss: {loss:.4}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.confusion.render(&self.labels))
    }
}
