use crate::list::{move_node, List, Node};

impl<T> List<T> {
    /// Reverses the list by moving every node to the front in turn.
    /// *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list), vec![4, 3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        if self.has_at_most_one() {
            return;
        }
        let ghost = self.ghost_node();
        // SAFETY: `node` walks the original chain after the first node, and is
        // always moved to the front, so it is never the front node itself.
        unsafe {
            let mut node = Node::next_of(self.front_node());
            while node != ghost {
                let next = Node::next_of(node);
                move_node(node, self.front_node());
                node = next;
            }
        }
    }

    /// Swaps the nodes at index `2i` and `2i + 1` for every `i`. An odd last
    /// node stays where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.swap_pairs();
    /// assert_eq!(Vec::from_iter(list), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        // SAFETY: `node` and `next` are distinct non-ghost nodes of the list.
        unsafe {
            while node != ghost {
                let next = Node::next_of(node);
                if next == ghost {
                    break;
                }
                move_node(next, node);
                node = Node::next_of(node);
            }
        }
    }

    /// Reverses each full group of `k` nodes, counted from the front. The last
    /// `len % k` nodes keep their order, and `k < 2` changes nothing.
    /// *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter(1..=8);
    /// list.reverse_groups(3);
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1, 6, 5, 4, 7, 8]);
    /// ```
    pub fn reverse_groups(&mut self, k: usize) {
        if k < 2 {
            return;
        }
        let groups = self.len() / k;
        // `anchor` is the node right before the group being reversed.
        let mut anchor = self.ghost_node();
        // SAFETY: there are at least `k` nodes after `anchor` in each round, and
        // a moved node always comes after `anchor.next`, so they are distinct.
        // `anchor` starts as the ghost node, so its link is read through a raw
        // place.
        unsafe {
            for _ in 0..groups {
                let first = Node::next_of(anchor);
                for _ in 1..k {
                    move_node(Node::next_of(first), Node::next_of(anchor));
                }
                anchor = first;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::list::tests::list_eq;
    use crate::List;

    #[test]
    fn reverse_twice_restores_order() {
        fn check(len: i32) {
            let mut list = List::from_iter(0..len);
            list.reverse();
            list_eq(&list, (0..len).rev());
            list.reverse();
            list_eq(&list, 0..len);
        }
        for len in 0..6 {
            check(len);
        }
    }

    #[test]
    fn swap_pairs_keeps_unpaired_tail() {
        let mut list: List<i32> = List::new();
        list.swap_pairs();
        assert!(list.is_empty() && list.is_well_formed());

        let mut list = List::from_iter([1]);
        list.swap_pairs();
        list_eq(&list, [1]);

        let mut list = List::from_iter([1, 2, 3, 4]);
        list.swap_pairs();
        list_eq(&list, [2, 1, 4, 3]);

        let mut list = List::from_iter(["a", "b", "c"]);
        list.swap_pairs();
        list_eq(&list, ["b", "a", "c"]);
    }

    #[test]
    fn reverse_groups_leaves_remainder() {
        let mut list = List::from_iter(1..=5);
        list.reverse_groups(2);
        list_eq(&list, [2, 1, 4, 3, 5]);

        let mut list = List::from_iter(1..=6);
        list.reverse_groups(3);
        list_eq(&list, [3, 2, 1, 6, 5, 4]);

        let mut list = List::from_iter(1..=4);
        list.reverse_groups(4);
        list_eq(&list, [4, 3, 2, 1]);

        let mut list = List::from_iter(1..=3);
        list.reverse_groups(5);
        list_eq(&list, [1, 2, 3]);

        for k in [0, 1] {
            let mut list = List::from_iter(1..=3);
            list.reverse_groups(k);
            list_eq(&list, [1, 2, 3]);
        }

        let mut list: List<i32> = List::new();
        list.reverse_groups(2);
        assert!(list.is_empty() && list.is_well_formed());
    }

    #[test]
    fn reverse_groups_matches_chunks() {
        for len in 0..12 {
            for k in 2..6 {
                let mut expected = Vec::from_iter(0..len);
                expected
                    .chunks_exact_mut(k)
                    .for_each(|chunk| chunk.reverse());
                let mut list = List::from_iter(0..len);
                list.reverse_groups(k);
                list_eq(&list, expected);
            }
        }
    }
}
