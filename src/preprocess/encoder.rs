//! Label encoding

use crate::{Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bijection between label strings and class codes `0..k`
///
/// Classes are ordered lexicographically, so with the standard risk labels
/// `high risk = 0`, `low risk = 1`, `mid risk = 2`. The encoder is persisted
/// with every exported model so predictions can be mapped back to strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct labels
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let classes: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
        Self { classes: classes.into_iter().map(str::to_string).collect() }
    }

    /// Rebuild an encoder from a class list, sorted and deduplicated so
    /// codes match what [`LabelEncoder::fit`] would assign
    pub fn from_classes(mut classes: Vec<String>) -> Self {
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Known classes in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Code of a single label, if known
    pub fn code_of(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    /// Encode labels to class codes
    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.code_of(label).ok_or_else(|| Error::config_value(
                    "labels",
                    format!("unknown label '{label}'"),
                    format!("Known labels: {}", self.classes.join(", ")),
                ))
            })
            .collect()
    }

    /// Label string for a class code
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

/// Expand class codes into a rows × `n_classes` one-hot matrix
pub fn one_hot(codes: &[usize], n_classes: usize) -> Array2<f32> {
    let mut out = Array2::zeros((codes.len(), n_classes));
    for (row, &code) in codes.iter().enumerate() {
        if code < n_classes {
            out[[row, code]] = 1.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_risk_labels_sorted() {
        let labels = ["low risk", "mid risk", "high risk", "low risk"];
        let enc = LabelEncoder::fit(&labels);
        assert_eq!(enc.classes(), &["high risk", "low risk", "mid risk"]);
        assert_eq!(enc.n_classes(), 3);
        assert_eq!(enc.transform(&labels).unwrap(), vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_decode_roundtrip() {
        let enc = LabelEncoder::fit(&["b", "a", "c"]);
        for code in 0..3 {
            let label = enc.decode(code).unwrap();
            assert_eq!(enc.code_of(label), Some(code));
        }
        assert_eq!(enc.decode(3), None);
    }

    #[test]
    fn test_from_classes_matches_fit() {
        let enc = LabelEncoder::from_classes(vec!["mid risk".into(), "high risk".into(), "low risk".into(), "mid risk".into()]);
        assert_eq!(enc, LabelEncoder::fit(&["low risk", "mid risk", "high risk"]));
        assert_eq!(enc.code_of("high risk"), Some(0));
        assert_eq!(enc.code_of("mid risk"), Some(2));
    }

    #[test]
    fn test_unknown_label() {
        let enc = LabelEncoder::fit(&["low risk", "high risk"]);
        let err = enc.transform(&["mid risk"]).unwrap_err();
        assert!(err.to_string().contains("mid risk"));
    }

    #[test]
    fn test_one_hot_layout() {
        let oh = one_hot(&[2, 0, 1], 3);
        assert_eq!(oh.row(0).to_vec(), vec![0.0, 0.0, 1.0]);
        assert_eq!(oh.row(1).to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(oh.row(2).to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let enc = LabelEncoder::fit(&["low risk", "high risk"]);
        let json = serde_json::to_string(&enc).unwrap();
        let back: LabelEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, enc);
    }

    proptest! {
        #[test]
        fn prop_class_count_equals_distinct(labels in proptest::collection::vec("[a-e]{1,2}", 1..60)) {
            let enc = LabelEncoder::fit(&labels);
            let distinct: BTreeSet<&String> = labels.iter().collect();
            prop_assert_eq!(enc.n_classes(), distinct.len());

            let codes = enc.transform(&labels).unwrap();
            let oh = one_hot(&codes, enc.n_classes());
            for row in oh.rows() {
                prop_assert_eq!(row.sum(), 1.0);
            }
        }
    }
}
