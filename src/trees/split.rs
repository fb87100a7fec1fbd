//! Split search
//!
//! Scores `(attribute, threshold)` pairs by weighted Gini impurity and picks
//! the best one, per attribute and across all attributes.
use super::heap::MinHeap;
use crate::data::dataset::{Dataset, Label, RealNumber};
use crate::error::TreeError;
use log::trace;
use rayon::prelude::*;
use std::cmp::Ordering;

/// A scored `(attribute, threshold)` pair.
///
/// Candidates order by impurity, then threshold, then attribute column, so
/// the smallest candidate is the lowest impurity split and ties go to the
/// lowest threshold.
#[derive(Clone, Debug)]
pub struct SplitCandidate<XT: RealNumber> {
    pub attribute: String,
    pub attribute_index: usize,
    pub threshold: XT,
    pub impurity: f64,
    pub majority_below: Label,
    pub majority_above: Label,
}

impl<XT: RealNumber> Ord for SplitCandidate<XT> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.impurity
            .total_cmp(&other.impurity)
            .then_with(|| self.threshold.total_cmp(&other.threshold))
            .then_with(|| self.attribute_index.cmp(&other.attribute_index))
    }
}

impl<XT: RealNumber> PartialOrd for SplitCandidate<XT> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<XT: RealNumber> PartialEq for SplitCandidate<XT> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<XT: RealNumber> Eq for SplitCandidate<XT> {}

/// Gini impurity of a side holding `yes` positive and `no` negative labels.
/// An empty side has impurity 0.
pub fn gini_impurity(yes: usize, no: usize) -> f64 {
    let total = yes + no;
    if total == 0 {
        return 0.0;
    }
    let p_yes = yes as f64 / total as f64;
    let p_no = no as f64 / total as f64;
    1.0 - p_yes * p_yes - p_no * p_no
}

/// Label 1 only when positives strictly outnumber negatives.
pub fn majority_label(yes: usize, no: usize) -> Label {
    if yes > no {
        1
    } else {
        0
    }
}

/// Midpoints between adjacent distinct values of an ascending sequence.
///
/// A sequence with a single distinct value yields that value as the only
/// threshold.
pub fn candidate_thresholds<XT: RealNumber>(sorted: &[XT]) -> Vec<XT> {
    let mut distinct = sorted.to_vec();
    distinct.dedup();

    if distinct.len() == 1 {
        return distinct;
    }

    let two = XT::one() + XT::one();
    distinct
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) / two)
        .collect()
}

/// Finds the lowest impurity threshold of one attribute over the instances
/// in `rows`.
///
/// The dataset is only read: `rows` is copied and the copy is sorted by the
/// attribute's values.
///
/// # Errors
///
/// Returns `TreeError::EmptyDataset` if `rows` is empty.
pub fn evaluate_split<XT: RealNumber>(
    dataset: &Dataset<XT>,
    rows: &[usize],
    attribute_index: usize,
) -> Result<SplitCandidate<XT>, TreeError> {
    if rows.is_empty() {
        return Err(TreeError::EmptyDataset);
    }
    let column = dataset.x.column(attribute_index);

    let mut sorted_rows = rows.to_vec();
    sorted_rows.sort_by(|&a, &b| column[a].total_cmp(&column[b]));
    let values = sorted_rows.iter().map(|&row| column[row]).collect::<Vec<_>>();

    // positives[i] counts label 1 among the first i sorted instances
    let mut positives = Vec::with_capacity(sorted_rows.len() + 1);
    positives.push(0);
    for &row in &sorted_rows {
        let previous = positives[positives.len() - 1];
        positives.push(previous + usize::from(dataset.y[row] == 1));
    }

    let total = sorted_rows.len();
    let total_yes = positives[total];
    let thresholds = candidate_thresholds(&values);

    let mut heap = MinHeap::with_capacity(thresholds.len());
    for threshold in thresholds {
        let below = values.partition_point(|&value| value < threshold);
        let above = total - below;

        let yes_below = positives[below];
        let no_below = below - yes_below;
        let yes_above = total_yes - yes_below;
        let no_above = above - yes_above;

        let impurity = (below as f64 / total as f64) * gini_impurity(yes_below, no_below)
            + (above as f64 / total as f64) * gini_impurity(yes_above, no_above);

        heap.insert(SplitCandidate {
            attribute: dataset.attributes[attribute_index].clone(),
            attribute_index,
            threshold,
            impurity,
            majority_below: majority_label(yes_below, no_below),
            majority_above: majority_label(yes_above, no_above),
        });
    }

    heap.remove_min()
}

/// Evaluates every attribute of `dataset` over `rows` and returns the
/// globally best candidate.
///
/// # Errors
///
/// Returns `TreeError::NoAttributes` if the dataset has no columns and
/// `TreeError::EmptyDataset` if `rows` is empty.
pub fn choose_best_split<XT: RealNumber>(
    dataset: &Dataset<XT>,
    rows: &[usize],
) -> Result<SplitCandidate<XT>, TreeError> {
    if dataset.nfeatures() == 0 {
        return Err(TreeError::NoAttributes);
    }

    let candidates = (0..dataset.nfeatures())
        .into_par_iter()
        .map(|attribute_index| evaluate_split(dataset, rows, attribute_index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut heap = MinHeap::with_capacity(candidates.len());
    for candidate in candidates {
        trace!(
            "Best threshold for {}: {} (impurity {:.6})",
            candidate.attribute,
            candidate.threshold,
            candidate.impurity
        );
        heap.insert(candidate);
    }
    heap.remove_min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};
    use std::collections::HashMap;

    fn sample_dataset() -> Dataset<f64> {
        let mut columns = HashMap::new();
        columns.insert("f1".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 1.0, 7.0]);
        columns.insert("f2".to_string(), vec![0.2, 0.1, 0.3, 0.5, 0.0, 0.6, 0.1]);
        Dataset::from_columns(
            vec!["f1".to_string(), "f2".to_string()],
            columns,
            vec![0, 1, 0, 0, 1, 1, 0],
        )
        .unwrap()
    }

    fn all_rows(dataset: &Dataset<f64>) -> Vec<usize> {
        (0..dataset.nrows()).collect()
    }

    #[test]
    fn test_gini_impurity() {
        assert_eq!(gini_impurity(0, 0), 0.0);
        assert_eq!(gini_impurity(4, 0), 0.0);
        assert_eq!(gini_impurity(0, 3), 0.0);
        assert_relative_eq!(gini_impurity(2, 2), 0.5);
        assert_relative_eq!(gini_impurity(3, 4), 24.0 / 49.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_impurity_bounds() {
        for yes in 0..20 {
            for no in 0..20 {
                let impurity = gini_impurity(yes, no);
                assert!((0.0..=0.5).contains(&impurity), "{} {}", yes, no);
            }
        }
    }

    #[test]
    fn test_majority_label_ties_favor_zero() {
        assert_eq!(majority_label(3, 1), 1);
        assert_eq!(majority_label(1, 3), 0);
        assert_eq!(majority_label(2, 2), 0);
        assert_eq!(majority_label(0, 0), 0);
    }

    #[test]
    fn test_candidate_thresholds() {
        let thresholds = candidate_thresholds(&[1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 7.0]);
        assert_eq!(thresholds, vec![1.5, 2.5, 3.5, 4.5, 6.0]);
    }

    #[test]
    fn test_candidate_thresholds_single_value() {
        assert_eq!(candidate_thresholds(&[3.0, 3.0, 3.0]), vec![3.0]);
        assert!(candidate_thresholds::<f64>(&[]).is_empty());
    }

    #[test]
    fn test_evaluate_split_reduces_impurity() {
        let dataset = sample_dataset();
        let rows = all_rows(&dataset);
        let best = evaluate_split(&dataset, &rows, 0).unwrap();

        let root_impurity = 1.0 - (3.0_f64 / 7.0).powi(2) - (4.0_f64 / 7.0).powi(2);
        assert!(best.impurity < root_impurity);
        assert_eq!(best.attribute, "f1");
        assert_relative_eq!(best.threshold, 2.5);
        assert_relative_eq!(best.impurity, 17.0 / 42.0, epsilon = 1e-12);
        assert_eq!(best.majority_below, 1);
        assert_eq!(best.majority_above, 0);
    }

    #[test]
    fn test_evaluate_split_tie_goes_to_lowest_threshold() {
        // thresholds 0.05 and 0.55 both score 8/21
        let dataset = sample_dataset();
        let rows = all_rows(&dataset);
        let best = evaluate_split(&dataset, &rows, 1).unwrap();

        assert_relative_eq!(best.threshold, 0.05, epsilon = 1e-12);
        assert_relative_eq!(best.impurity, 8.0 / 21.0, epsilon = 1e-12);
        assert_eq!(best.majority_below, 1);
        assert_eq!(best.majority_above, 0);
    }

    #[test]
    fn test_evaluate_split_single_value_feature() {
        let x = DMatrix::from_row_slice(4, 1, &[2.0, 2.0, 2.0, 2.0]);
        let y = DVector::from_vec(vec![0, 1, 1, 0]);
        let dataset = Dataset::from_matrix(x, y).unwrap();
        let best = evaluate_split(&dataset, &[0, 1, 2, 3], 0).unwrap();

        assert_eq!(best.threshold, 2.0);
        assert_relative_eq!(best.impurity, gini_impurity(2, 2));
        assert_eq!(best.majority_above, 0);
    }

    #[test]
    fn test_evaluate_split_on_subset() {
        let dataset = sample_dataset();
        let best = evaluate_split(&dataset, &[0, 5, 1], 0).unwrap();

        assert_relative_eq!(best.threshold, 1.5);
        assert_relative_eq!(best.impurity, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_split_leaves_dataset_untouched() {
        let dataset = sample_dataset();
        let before = dataset.x.clone();
        let rows = vec![6, 0, 3, 1];
        evaluate_split(&dataset, &rows, 0).unwrap();

        assert_eq!(dataset.x, before);
        assert_eq!(rows, vec![6, 0, 3, 1]);
    }

    #[test]
    fn test_evaluate_split_empty_rows() {
        let dataset = sample_dataset();
        assert!(matches!(
            evaluate_split(&dataset, &[], 0),
            Err(TreeError::EmptyDataset)
        ));
    }

    #[test]
    fn test_choose_best_split() {
        let dataset = sample_dataset();
        let rows = all_rows(&dataset);
        let best = choose_best_split(&dataset, &rows).unwrap();

        assert_eq!(best.attribute, "f2");
        assert_eq!(best.attribute_index, 1);
        assert_relative_eq!(best.threshold, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_choose_best_split_without_attributes() {
        let x = DMatrix::<f64>::zeros(3, 0);
        let y = DVector::from_vec(vec![0, 1, 0]);
        let dataset = Dataset::from_matrix(x, y).unwrap();

        assert!(matches!(
            choose_best_split(&dataset, &[0, 1, 2]),
            Err(TreeError::NoAttributes)
        ));
    }

    #[test]
    fn test_candidate_ordering() {
        let candidate = |impurity: f64, threshold: f64, attribute_index: usize| SplitCandidate {
            attribute: format!("x{}", attribute_index),
            attribute_index,
            threshold,
            impurity,
            majority_below: 0,
            majority_above: 1,
        };

        assert!(candidate(0.1, 9.0, 3) < candidate(0.2, 1.0, 0));
        assert!(candidate(0.2, 1.0, 3) < candidate(0.2, 2.0, 0));
        assert!(candidate(0.2, 1.0, 0) < candidate(0.2, 1.0, 1));
        assert_eq!(candidate(0.2, 1.0, 1), candidate(0.2, 1.0, 1));
    }
}
