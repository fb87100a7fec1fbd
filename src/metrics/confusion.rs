use crate::data::dataset::Label;
use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};

type ConfusionMatrix = DMatrix<usize>;

pub trait ClassificationMetrics {
    /// Computes the 2x2 confusion matrix of binary labels.
    ///
    /// Rows are indexed by the true label, columns by the predicted label.
    ///
    /// # Errors
    ///
    /// Fails if the vectors have different lengths or contain a label other than 0 or 1.
    fn confusion_matrix(
        &self,
        y_true: &DVector<Label>,
        y_pred: &DVector<Label>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::DimensionMismatch {
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }

        let mut matrix = DMatrix::zeros(2, 2);
        for (&y_t, &y_p) in y_true.iter().zip(y_pred.iter()) {
            if let Some(&label) = [y_t, y_p].iter().find(|&&label| label > 1) {
                return Err(TreeError::InvalidLabel(label.to_string()));
            }
            matrix[(usize::from(y_t), usize::from(y_p))] += 1;
        }

        Ok(matrix)
    }

    /// Fraction of predictions equal to the true label.
    fn accuracy(&self, y_true: &DVector<Label>, y_pred: &DVector<Label>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        if y_true.is_empty() {
            return Ok(0.0);
        }

        let correct = matrix.diagonal().sum();
        Ok(correct as f64 / y_true.len() as f64)
    }

    /// Precision of the positive label, 0 when nothing is predicted positive.
    fn precision(&self, y_true: &DVector<Label>, y_pred: &DVector<Label>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let tp = matrix[(1, 1)];
        let fp = matrix[(0, 1)];

        if tp + fp == 0 {
            return Ok(0.0);
        }
        Ok(tp as f64 / (tp + fp) as f64)
    }

    /// Recall of the positive label, 0 when there are no positives.
    fn recall(&self, y_true: &DVector<Label>, y_pred: &DVector<Label>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let tp = matrix[(1, 1)];
        let fn_ = matrix[(1, 0)];

        if tp + fn_ == 0 {
            return Ok(0.0);
        }
        Ok(tp as f64 / (tp + fn_) as f64)
    }

    fn f1_score(&self, y_true: &DVector<Label>, y_pred: &DVector<Label>) -> Result<f64, TreeError> {
        let precision = self.precision(y_true, y_pred)?;
        let recall = self.recall(y_true, y_pred)?;

        if precision + recall == 0.0 {
            return Ok(0.0);
        }
        Ok(2.0 * precision * recall / (precision + recall))
    }
}
