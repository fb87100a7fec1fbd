use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};
use num_traits::{Float, FromPrimitive, Num, ToPrimitive};
use num_traits::float::TotalOrder;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display, Formatter};

pub trait DataValue:
    Debug + Clone + Copy + Num + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

impl<T> DataValue for T where
    T: Debug + Clone + Copy + Num + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait RealNumber: Number + Float + TotalOrder {}
impl<T> RealNumber for T where T: Number + Float + TotalOrder {}

/// Outcome label of a training instance. Only `0` and `1` are valid.
pub type Label = u8;

/// Labeled training data stored as parallel feature columns.
///
/// `x` is column-major, so every attribute is one dense column and row `i`
/// of every column refers to the same instance as `y[i]`.
pub struct Dataset<XT: RealNumber> {
    pub attributes: Vec<String>,
    pub x: DMatrix<XT>,
    pub y: DVector<Label>,
}

impl<XT: RealNumber> Debug for Dataset<XT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    attributes: {:?},\n    x: [\n", self.attributes)?;

        for i in 0..self.x.nrows() {
            write!(f, "        [")?;
            for j in 0..self.x.ncols() {
                write!(f, "{:?}, ", self.x[(i, j)])?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ],\n    y: [")?;
        for i in 0..self.y.len() {
            write!(f, "{:?}, ", self.y[i])?;
        }
        write!(f, "]\n}}")
    }
}

impl<XT: RealNumber> Dataset<XT> {
    /// Creates a dataset from named feature columns and binary outcomes.
    ///
    /// # Errors
    ///
    /// Fails if the names don't match the number of columns, if `x` and `y`
    /// have a different number of rows, if a name repeats, if a feature
    /// value is NaN or infinite or if an outcome is neither 0 nor 1.
    pub fn new(attributes: Vec<String>, x: DMatrix<XT>, y: DVector<Label>) -> Result<Self, TreeError> {
        if attributes.len() != x.ncols() {
            return Err(TreeError::DimensionMismatch {
                expected: x.ncols(),
                found: attributes.len(),
            });
        }
        if x.nrows() != y.len() {
            return Err(TreeError::DimensionMismatch {
                expected: y.len(),
                found: x.nrows(),
            });
        }

        let duplicate = {
            let mut seen = HashSet::with_capacity(attributes.len());
            attributes.iter().find(|name| !seen.insert(*name)).cloned()
        };
        if let Some(duplicate) = duplicate {
            return Err(TreeError::DuplicateAttribute(duplicate));
        }

        // x is column-major
        if let Some(index) = x.iter().position(|value| !value.is_finite()) {
            return Err(TreeError::NonFiniteValue {
                row: index % x.nrows(),
                column: index / x.nrows(),
            });
        }

        if let Some(&label) = y.iter().find(|&&label| label > 1) {
            return Err(TreeError::InvalidLabel(label.to_string()));
        }

        Ok(Self { attributes, x, y })
    }

    /// Creates a dataset with generated attribute names `x0`, `x1`, ...
    pub fn from_matrix(x: DMatrix<XT>, y: DVector<Label>) -> Result<Self, TreeError> {
        let attributes = (0..x.ncols()).map(|j| format!("x{}", j)).collect();
        Self::new(attributes, x, y)
    }

    /// Creates a dataset from an ordered list of attribute names and a map
    /// from each name to its value sequence. Columns not listed in
    /// `attributes` are ignored.
    pub fn from_columns(
        attributes: Vec<String>,
        mut columns: HashMap<String, Vec<XT>>,
        outcomes: Vec<Label>,
    ) -> Result<Self, TreeError> {
        let nrows = outcomes.len();
        let mut values = Vec::with_capacity(nrows * attributes.len());

        let mut seen = HashSet::with_capacity(attributes.len());
        for name in &attributes {
            if !seen.insert(name.clone()) {
                return Err(TreeError::DuplicateAttribute(name.clone()));
            }
            let column = columns
                .remove(name)
                .ok_or_else(|| TreeError::UnknownAttribute(name.clone()))?;
            if column.len() != nrows {
                return Err(TreeError::DimensionMismatch {
                    expected: nrows,
                    found: column.len(),
                });
            }
            values.extend(column);
        }

        let x = DMatrix::from_vec(nrows, attributes.len(), values);
        Self::new(attributes, x, DVector::from_vec(outcomes))
    }

    pub fn is_not_empty(&self) -> bool {
        !(self.x.nrows() == 0 || self.y.is_empty())
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.x.ncols()
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attribute| attribute == name)
    }

    /// Feature vector of instance `index`, aligned with `attributes`.
    pub fn instance(&self, index: usize) -> Vec<XT> {
        self.x.row(index).iter().copied().collect()
    }

    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self), TreeError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter {
                name: "train_size".to_string(),
                expected: "a value between 0.0 and 1.0".to_string(),
                found: train_size.to_string(),
            });
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        let train_dataset = Self {
            attributes: self.attributes.clone(),
            x: self.x.select_rows(train_indices),
            y: self.y.select_rows(train_indices),
        };
        let test_dataset = Self {
            attributes: self.attributes.clone(),
            x: self.x.select_rows(test_indices),
            y: self.y.select_rows(test_indices),
        };

        Ok((train_dataset, test_dataset))
    }
}
