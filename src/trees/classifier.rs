//! Decision Tree Classifier
use super::node::{NodeSummary, Step, TreeNode};
use super::params::TreeParams;
use super::split::choose_best_split;
use crate::data::dataset::{Dataset, Label, RealNumber};
use crate::error::TreeError;
use crate::metrics::confusion::ClassificationMetrics;
use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use std::collections::VecDeque;

/// Binary decision tree classifier grown greedily on Gini impurity.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: RealNumber> {
    root: Option<Box<TreeNode<XT>>>,
    attributes: Vec<String>,
    tree_params: TreeParams,
}

impl<XT: RealNumber> Default for DecisionTreeClassifier<XT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: RealNumber> ClassificationMetrics for DecisionTreeClassifier<XT> {}

impl<XT: RealNumber> DecisionTreeClassifier<XT> {
    /// Creates a new instance of the decision tree classifier with default parameters.
    pub fn new() -> Self {
        Self {
            root: None,
            attributes: Vec::new(),
            tree_params: TreeParams::new(),
        }
    }

    /// Creates a new instance of the decision tree classifier with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `min_samples_split` - The minimum number of instances required to split a node.
    /// * `max_depth` - The maximum number of decision levels.
    ///
    /// # Errors
    ///
    /// This method will return an error if the minimum number of samples to split is less than 2 or if the maximum depth is less than 1.
    pub fn with_params(min_samples_split: Option<u16>, max_depth: Option<u16>) -> Result<Self, TreeError> {
        let mut tree = Self::new();

        tree.set_min_samples_split(min_samples_split.unwrap_or(2))?;
        tree.set_max_depth(max_depth)?;
        Ok(tree)
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        self.tree_params.set_min_samples_split(min_samples_split)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<(), TreeError> {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn min_samples_split(&self) -> u16 {
        self.tree_params.min_samples_split()
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.tree_params.max_depth()
    }

    pub fn root(&self) -> Option<&TreeNode<XT>> {
        self.root.as_deref()
    }

    /// Attribute names in the order feature vectors must follow.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Builds the decision tree from a dataset, replacing any previous tree.
    ///
    /// If the training outcomes are already pure, or there are no
    /// attributes, no node is created and the tree stays untrained.
    ///
    /// # Errors
    ///
    /// This method will return an error if the dataset has no instances.
    pub fn fit(&mut self, dataset: &Dataset<XT>) -> Result<String, TreeError> {
        if !dataset.is_not_empty() {
            return Err(TreeError::EmptyDataset);
        }
        info!(
            "Building a decision tree on {} instances with {} attributes.",
            dataset.nrows(),
            dataset.nfeatures()
        );

        let rows = (0..dataset.nrows()).collect::<Vec<_>>();
        let mut next_id = 0;
        let root = self.build_tree(dataset, rows, None, 0, &mut next_id)?;

        self.root = root;
        self.attributes = dataset.attributes.clone();

        info!(
            "Finished building the tree: {} nodes, depth {}.",
            self.node_count(),
            self.depth()
        );
        Ok("Finished building the tree.".into())
    }

    /// Predicts the label of one feature vector, aligned with `attributes()`.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::NotTrained` while the tree has no root and
    /// `TreeError::DimensionMismatch` if the vector has the wrong length.
    pub fn classify(&self, features: &[XT]) -> Result<Label, TreeError> {
        let mut node = self.root.as_deref().ok_or(TreeError::NotTrained)?;
        if features.len() != self.attributes.len() {
            return Err(TreeError::DimensionMismatch {
                expected: self.attributes.len(),
                found: features.len(),
            });
        }

        loop {
            match node.step(features[node.attribute_index]) {
                Step::Descend(child) => node = child,
                Step::Decide(label) => return Ok(label),
            }
        }
    }

    /// Predicts the labels of every row of `prediction_features`.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet or the
    /// number of columns doesn't match the training attributes.
    pub fn predict(&self, prediction_features: &DMatrix<XT>) -> Result<DVector<Label>, TreeError> {
        if !self.is_fitted() {
            return Err(TreeError::NotTrained);
        }
        if prediction_features.ncols() != self.attributes.len() {
            return Err(TreeError::DimensionMismatch {
                expected: self.attributes.len(),
                found: prediction_features.ncols(),
            });
        }

        let predictions = (0..prediction_features.nrows())
            .into_par_iter()
            .map(|i| {
                let features = prediction_features.row(i).iter().copied().collect::<Vec<_>>();
                self.classify(&features)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DVector::from_vec(predictions))
    }

    /// Breadth-first list of every node.
    pub fn level_order(&self) -> Vec<NodeSummary<XT>> {
        let mut summaries = Vec::new();
        let mut queue = VecDeque::new();
        queue.extend(self.root.as_deref());

        while let Some(node) = queue.pop_front() {
            summaries.push(node.summary());
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        summaries
    }

    /// One line per node in level order, indented by depth.
    pub fn render_level_order(&self) -> String {
        self.level_order()
            .iter()
            .map(|summary| format!("{}\n", summary))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.level_order().len()
    }

    /// Number of decision levels, 0 for a tree without nodes.
    pub fn depth(&self) -> usize {
        self.level_order()
            .iter()
            .map(|summary| summary.depth + 1)
            .max()
            .unwrap_or(0)
    }

    fn build_tree(
        &self,
        dataset: &Dataset<XT>,
        mut rows: Vec<usize>,
        parent: Option<usize>,
        depth: usize,
        next_id: &mut usize,
    ) -> Result<Option<Box<TreeNode<XT>>>, TreeError> {
        if rows.windows(2).all(|pair| dataset.y[pair[0]] == dataset.y[pair[1]]) {
            return Ok(None);
        }
        if dataset.nfeatures() == 0 {
            return Ok(None);
        }
        if self.max_depth().is_some_and(|max_depth| depth >= usize::from(max_depth)) {
            debug!("Reached the maximum depth {} with {} instances.", depth, rows.len());
            return Ok(None);
        }
        if rows.len() < usize::from(self.min_samples_split()) {
            debug!("Only {} instances left at depth {}, not splitting.", rows.len(), depth);
            return Ok(None);
        }

        let best = choose_best_split(dataset, &rows)?;
        let id = *next_id;
        *next_id += 1;
        let mut node = Box::new(TreeNode::new(id, parent, depth, best));

        let column = dataset.x.column(node.attribute_index);
        rows.sort_by(|&a, &b| column[a].total_cmp(&column[b]));
        let split_index = rows.partition_point(|&row| column[row] < node.threshold);
        let above = rows.split_off(split_index);
        let below = rows;

        debug!(
            "Node {} at depth {}: {} < {} (impurity {:.6}), {} below, {} above.",
            id,
            depth,
            node.attribute,
            node.threshold,
            node.impurity,
            below.len(),
            above.len()
        );

        // One empty side means the other holds every instance again.
        if below.is_empty() || above.is_empty() {
            debug!("Split on {} doesn't separate any instances, stopping.", node.attribute);
            return Ok(Some(node));
        }

        node.left = self.build_tree(dataset, below, Some(id), depth + 1, next_id)?;
        node.right = self.build_tree(dataset, above, Some(id), depth + 1, next_id)?;
        Ok(Some(node))
    }
}
