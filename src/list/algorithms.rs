use crate::list::cursor::CursorMut;
use crate::list::{List, Node};
use std::ptr::NonNull;

mod reorder;
mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Finds the middle node with a slow/fast walk from the front.
    ///
    /// `fast` only advances while both of its next two nodes are elements, so
    /// in a list with length *n* `slow` stops at index ⌊(*n* - 1) / 2⌋. The
    /// ghost node is returned for an empty list.
    pub(crate) fn mid_node(&self) -> NonNull<Node<T>> {
        let ghost = self.ghost_node();
        let (mut slow, mut fast) = (self.front_node(), self.front_node());
        // SAFETY: every link of the list is valid, and the ghost node's links
        // are read through raw places.
        unsafe {
            loop {
                let next = Node::next_of(fast);
                if next == ghost || Node::next_of(next) == ghost {
                    break;
                }
                slow = Node::next_of(slow);
                fast = Node::next_of(next);
            }
        }
        slow
    }

    /// Removes the element at index ⌊(*n* - 1) / 2⌋ of a list with length
    /// *n*, that is the lower of the two middle elements when *n* is even.
    /// *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    /// assert_eq!(list.remove_mid(), Some(2));
    /// assert_eq!(list.remove_mid(), Some(3));
    /// assert_eq!(list.remove_mid(), Some(1));
    /// assert_eq!(list.remove_mid(), Some(4));
    /// assert_eq!(list.remove_mid(), None);
    /// ```
    pub fn remove_mid(&mut self) -> Option<T> {
        let mid = self.mid_node();
        CursorMut::new(self, mid).remove()
    }

    /// Removes every maximal run of two or more adjacent elements that are
    /// `same`, the whole run included. Returns the number of removed elements.
    ///
    /// On a sorted list this removes every value that occurs more than once.
    pub fn dedup_runs_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_start_mut();
        loop {
            let starts_run = match (cursor.current(), cursor.peek_next()) {
                (Some(current), Some(next)) => same(current, next),
                (Some(_), None) => false,
                (None, _) => break,
            };
            if !starts_run {
                cursor.move_next();
                continue;
            }
            let Some(first) = cursor.remove() else { break };
            removed += 1;
            while cursor.current().map_or(false, |elt| same(elt, &first)) {
                cursor.remove();
                removed += 1;
            }
        }
        removed
    }

    /// [`List::dedup_runs_by`] with `==`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 1, 2, 3, 3, 3]);
    /// assert_eq!(list.dedup_runs(), 5);
    /// assert_eq!(Vec::from_iter(list), vec![2]);
    /// ```
    pub fn dedup_runs(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.dedup_runs_by(|a, b| a == b)
    }

    /// Removes every element `elt` that has some element `right` after it with
    /// `dominates(right, elt)`. Returns the number of removed elements.
    ///
    /// The list is walked once from the back. The survivors after the cursor
    /// are monotonic, so with a transitive `dominates` only the node right
    /// after the cursor has to be compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([5, 2, 13, 3, 8]);
    /// assert_eq!(list.remove_if_followed_by(|right, elt| right > elt), 3);
    /// assert_eq!(Vec::from_iter(list), vec![13, 8]);
    /// ```
    pub fn remove_if_followed_by<F>(&mut self, mut dominates: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_end_mut();
        while cursor.move_prev() {
            let dominated = match (cursor.current(), cursor.peek_next()) {
                (Some(elt), Some(right)) => dominates(right, elt),
                _ => false,
            };
            if dominated {
                cursor.remove();
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::list::tests::{list_eq, DropChecker};
    use crate::list::Node;
    use crate::List;
    use std::cell::RefCell;

    #[test]
    fn mid_node_picks_lower_middle() {
        for (len, expected) in [(1, 0), (2, 0), (3, 1), (4, 1), (5, 2), (6, 2), (7, 3)] {
            let list = List::from_iter(0..len);
            let mid = list.mid_node();
            assert_eq!(unsafe { *Node::element(mid) }, expected, "len = {}", len);
        }
        let empty: List<i32> = List::new();
        assert_eq!(empty.mid_node(), empty.ghost_node());
    }

    #[test]
    fn remove_mid_releases_only_the_middle() {
        let dropped = RefCell::new(Vec::new());
        let mut list = List::from_iter((0..5).map(|i| DropChecker::new(i, &dropped)));
        let mid = list.remove_mid().map(|checker| checker.value);
        assert_eq!(mid, Some(2));
        assert_eq!(dropped.borrow().as_slice(), &[2]);
        assert!(list.is_well_formed());
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn dedup_runs_removes_whole_runs() {
        let mut list = List::from_iter(["a", "a", "b", "c", "c", "c"]);
        assert_eq!(list.dedup_runs(), 5);
        list_eq(&list, ["b"]);

        let mut list = List::from_iter([1, 2, 2, 3, 4, 4]);
        assert_eq!(list.dedup_runs(), 4);
        list_eq(&list, [1, 3]);

        let mut list = List::from_iter([7, 7, 7]);
        assert_eq!(list.dedup_runs(), 3);
        assert!(list.is_empty());

        let mut list = List::from_iter(0..4);
        assert_eq!(list.dedup_runs(), 0);
        list_eq(&list, 0..4);

        let mut list: List<i32> = List::new();
        assert_eq!(list.dedup_runs(), 0);
    }

    #[test]
    fn dedup_runs_on_unsorted_input_keeps_links() {
        let mut list = List::from_iter([2, 1, 2, 2, 1, 1, 2]);
        assert_eq!(list.dedup_runs(), 4);
        list_eq(&list, [2, 1, 2]);
    }

    #[test]
    fn dedup_runs_drops_removed_elements() {
        let dropped = RefCell::new(Vec::new());
        let mut list =
            List::from_iter([1, 1, 2, 3, 3].iter().map(|&i| DropChecker::new(i, &dropped)));
        assert_eq!(list.dedup_runs_by(|a, b| a.value == b.value), 4);
        assert_eq!(dropped.borrow().as_slice(), &[1, 1, 3, 3]);
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 1, 3, 3, 2]);
    }

    #[test]
    fn remove_if_followed_by_smaller() {
        let mut list = List::from_iter([1, 5, 2, 2, 3, 1, 4]);
        assert_eq!(list.remove_if_followed_by(|right, elt| right < elt), 4);
        list_eq(&list, [1, 1, 4]);

        let mut list = List::from_iter([5, 4, 3, 2, 1]);
        assert_eq!(list.remove_if_followed_by(|right, elt| right < elt), 4);
        list_eq(&list, [1]);

        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.remove_if_followed_by(|right, elt| right < elt), 0);
        list_eq(&list, [1, 2, 3]);
    }

    #[test]
    fn remove_if_followed_by_greater() {
        let mut list = List::from_iter([5, 2, 13, 3, 8]);
        assert_eq!(list.remove_if_followed_by(|right, elt| right > elt), 3);
        list_eq(&list, [13, 8]);

        let mut list = List::from_iter([1, 1, 1]);
        assert_eq!(list.remove_if_followed_by(|right, elt| right > elt), 0);
        list_eq(&list, [1, 1, 1]);

        let mut list: List<i32> = List::new();
        assert_eq!(list.remove_if_followed_by(|right, elt| right > elt), 0);
    }

    #[test]
    fn clone_copies_every_element() {
        let list = List::from_iter(["x".to_string(), "y".to_string()]);
        let cloned = list.clone();
        assert_eq!(list, cloned);
        assert_ne!(list.ghost_node(), cloned.ghost_node());
        assert_ne!(cloned, List::from_iter(["x".to_string()]));
        assert!(cloned.is_well_formed());
    }
}
