//! # Rusty-dtree
//!
//! `rusty-dtree` fits a binary decision tree classifier to numeric features
//! and 0/1 outcomes by recursively picking the split with the lowest weighted
//! Gini impurity, then uses the fitted tree to classify new instances.
//!
//! ## Getting Started
//!
//! To use `rusty-dtree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-dtree = "*"
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use rusty_dtree::data::dataset::Dataset;
//! use rusty_dtree::trees::classifier::DecisionTreeClassifier;
//! use nalgebra::{DMatrix, DVector};
//!
//! let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.5, 2.0, 0.1, 3.0, 0.7, 4.0, 0.2]);
//! let y = DVector::from_vec(vec![0, 0, 1, 1]);
//! let dataset = Dataset::from_matrix(x, y).unwrap();
//!
//! let mut tree = DecisionTreeClassifier::new();
//! tree.fit(&dataset).unwrap();
//!
//! assert_eq!(tree.classify(&[3.5, 0.4]).unwrap(), 1);
//! print!("{}", tree.render_level_order());
//! ```

/// Dataset and CSV ingestion
pub mod data;
/// Error type
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;
