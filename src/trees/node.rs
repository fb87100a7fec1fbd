use super::split::SplitCandidate;
use crate::data::dataset::{Label, RealNumber};
use std::fmt::{self, Display, Formatter};

/// Decision tree node
///
/// A node owns its children. `parent` is the `id` of the node that created
/// it and is only kept for diagnostics.
#[derive(Clone, Debug)]
pub struct TreeNode<XT: RealNumber> {
    pub id: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    pub attribute: String,
    pub attribute_index: usize,
    pub threshold: XT,
    pub impurity: f64,
    pub majority_below: Label,
    pub majority_above: Label,
    pub left: Option<Box<TreeNode<XT>>>,
    pub right: Option<Box<TreeNode<XT>>>,
}

/// What a node does with one feature value during classification.
pub enum Step<'a, XT: RealNumber> {
    Descend(&'a TreeNode<XT>),
    Decide(Label),
}

impl<XT: RealNumber> TreeNode<XT> {
    pub fn new(id: usize, parent: Option<usize>, depth: usize, split: SplitCandidate<XT>) -> Self {
        Self {
            id,
            parent,
            depth,
            attribute: split.attribute,
            attribute_index: split.attribute_index,
            threshold: split.threshold,
            impurity: split.impurity,
            majority_below: split.majority_below,
            majority_above: split.majority_above,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Values below the threshold go left, the rest go right. A missing
    /// child on the chosen side means the node's majority label for that
    /// side is the answer.
    pub fn step(&self, value: XT) -> Step<'_, XT> {
        if value < self.threshold {
            match self.left.as_deref() {
                Some(left) => Step::Descend(left),
                None => Step::Decide(self.majority_below),
            }
        } else {
            match self.right.as_deref() {
                Some(right) => Step::Descend(right),
                None => Step::Decide(self.majority_above),
            }
        }
    }

    pub fn summary(&self) -> NodeSummary<XT> {
        NodeSummary {
            id: self.id,
            parent: self.parent,
            depth: self.depth,
            attribute: self.attribute.clone(),
            threshold: self.threshold,
            impurity: self.impurity,
            majority_below: self.majority_below,
            majority_above: self.majority_above,
            has_left: self.left.is_some(),
            has_right: self.right.is_some(),
        }
    }
}

/// Flat description of a node, as produced by a level-order traversal.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary<XT: RealNumber> {
    pub id: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    pub attribute: String,
    pub threshold: XT,
    pub impurity: f64,
    pub majority_below: Label,
    pub majority_above: Label,
    pub has_left: bool,
    pub has_right: bool,
}

impl<XT: RealNumber> Display for NodeSummary<XT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{},{}",
            " ".repeat(self.depth),
            self.attribute,
            self.threshold
        )
    }
}
