//! Array-backed binary min-heap used to rank split candidates.
use crate::error::TreeError;

/// Min-priority queue over any totally ordered element.
#[derive(Clone, Debug)]
pub struct MinHeap<T: Ord> {
    items: Vec<T>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap from arbitrary items in O(n).
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut heap = Self { items };
        for index in (0..heap.items.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::EmptyQueue` if the heap has no elements.
    pub fn remove_min(&mut self) -> Result<T, TreeError> {
        if self.items.is_empty() {
            return Err(TreeError::EmptyQueue);
        }
        let min = self.items.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    /// Drains the heap in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Ok(item) = self.remove_min() {
            sorted.push(item);
        }
        sorted
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] >= self.items[parent] {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let mut smallest = left;
            if right < len && self.items[right] < self.items[left] {
                smallest = right;
            }
            if self.items[index] <= self.items[smallest] {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_min_order() {
        let mut heap = MinHeap::new();
        for value in [5, 3, 8, 1, 9, 2, 7] {
            heap.insert(value);
        }
        assert_eq!(heap.len(), 7);

        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.remove_min().unwrap());
        }
        assert_eq!(drained, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_remove_min_empty() {
        let mut heap: MinHeap<i32> = MinHeap::new();
        assert!(matches!(heap.remove_min(), Err(TreeError::EmptyQueue)));

        heap.insert(4);
        assert_eq!(heap.remove_min().unwrap(), 4);
        assert!(matches!(heap.remove_min(), Err(TreeError::EmptyQueue)));
    }

    #[test]
    fn test_from_vec_heapify() {
        let heap = MinHeap::from_vec(vec![9, 4, 6, 1, 1, 0, 12, 3]);
        assert_eq!(heap.peek(), Some(&0));
        assert_eq!(heap.into_sorted_vec(), vec![0, 1, 1, 3, 4, 6, 9, 12]);
    }

    #[test]
    fn test_ties_follow_ord() {
        let mut heap = MinHeap::with_capacity(3);
        heap.insert((1, 'b'));
        heap.insert((0, 'z'));
        heap.insert((1, 'a'));
        assert_eq!(heap.into_sorted_vec(), vec![(0, 'z'), (1, 'a'), (1, 'b')]);
    }
}
