use crate::error::TreeError;

/// Guards against unbounded tree growth.
///
/// The defaults (`min_samples_split = 2`, no `max_depth`) never stop a split
/// that the purity rule would allow.
#[derive(Clone, Debug)]
pub struct TreeParams {
    pub min_samples_split: u16,
    pub max_depth: Option<u16>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            min_samples_split: 2,
            max_depth: None,
        }
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: u16) -> Result<(), TreeError> {
        if min_samples_split < 2 {
            return Err(TreeError::InvalidParameter {
                name: "min_samples_split".to_string(),
                expected: "a value greater than 1".to_string(),
                found: min_samples_split.to_string(),
            });
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    /// A node at depth `d` is only created when `d < max_depth`, so a
    /// maximum depth of 1 grows a single decision node.
    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<(), TreeError> {
        if let Some(depth) = max_depth.filter(|&depth| depth < 1) {
            return Err(TreeError::InvalidParameter {
                name: "max_depth".to_string(),
                expected: "a value greater than 0".to_string(),
                found: depth.to_string(),
            });
        }
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn min_samples_split(&self) -> u16 {
        self.min_samples_split
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.max_depth
    }
}
