//! Confusion matrix

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confusion matrix for multi-class classification
///
/// Element `[i][j]` counts samples with true class `i` predicted as `j`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Empty matrix over `n_classes` classes
    pub fn new(n_classes: usize) -> Self {
        Self { matrix: vec![vec![0; n_classes]; n_classes], n_classes }
    }

    /// Tally predictions against ground truth
    ///
    /// The class count is fixed up front so classes absent from a small test
    /// partition still get a row and column.
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Result<Self> {
        if y_pred.len() != y_true.len() {
            return Err(Error::ShapeMismatch { expected: vec![y_true.len()], actual: vec![y_pred.len()] });
        }

        let mut cm = Self::new(n_classes);
        for (&pred, &truth) in y_pred.iter().zip(y_true) {
            if pred >= n_classes || truth >= n_classes {
                return Err(Error::ShapeMismatch { expected: vec![n_classes], actual: vec![pred.max(truth) + 1] });
            }
            cm.matrix[truth][pred] += 1;
        }
        Ok(cm)
    }

    pub fn matrix(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count at `[true_class][predicted_class]`
    pub fn get(&self, true_class: usize, predicted_class: usize) -> usize {
        self.matrix[true_class][predicted_class]
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Predicted as `class` but wasn't
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes).filter(|&i| i != class).map(|i| self.matrix[i][class]).sum()
    }

    /// Was `class` but predicted otherwise
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes).filter(|&j| j != class).map(|j| self.matrix[class][j]).sum()
    }

    /// Total true instances of `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }

    /// Render with class names as row and column headers
    pub fn render(&self, labels: &[String]) -> String {
        let name = |i: usize| labels.get(i).cloned().unwrap_or_else(|| format!("class {i}"));
        let width = (0..self.n_classes).map(|i| name(i).len()).max().unwrap_or(0).max(6);

        let mut out = format!("{:>width$}", "true \\ pred");
        for j in 0..self.n_classes {
            out.push_str(&format!(" {:>width$}", name(j)));
        }
        out.push('\n');
        for i in 0..self.n_classes {
            out.push_str(&format!("{:>width$}", name(i)));
            for j in 0..self.n_classes {
                out.push_str(&format!(" {:>width$}", self.matrix[i][j]));
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = (0..self.n_classes).map(|i| i.to_string()).collect();
        f.write_str(&self.render(&labels))
    }
}
