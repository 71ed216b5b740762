use crate::list::cursor::CursorMut;
use crate::list::{List, Node};

impl<T: Ord> List<T> {
    /// Sorts the list in ascending order. The sort is stable.
    ///
    /// A top-down merge sort: the list is split after its middle node, both
    /// halves are sorted recursively and then merged back. Nodes are relinked,
    /// elements never move. *O*(*n* log *n*) time and *O*(log *n*) stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    /// list.sort();
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self) {
        merge_sort(self, &mut |a: &T, b: &T| a < b);
    }

    /// Merges the ascending list `other` into this ascending list, leaving
    /// `other` empty. Equal elements of `self` come first. *O*(*n* + *m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 3, 5]);
    /// let mut other = List::from_iter([2, 4]);
    /// list.merge(&mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn merge(&mut self, other: &mut List<T>) {
        merge_lists(self, other, &mut |a: &T, b: &T| a < b);
    }
}

impl<T> List<T> {
    /// [`List::merge`] for two lists ordered by `less`. The front of `other`
    /// is taken only when it is strictly `less` than the front of `self`.
    pub fn merge_by<F>(&mut self, other: &mut List<T>, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        merge_lists(self, other, &mut less);
    }
}

fn merge_sort<T, F>(list: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.has_at_most_one() {
        return;
    }
    // With two or more elements the middle node is never the back node.
    let mid = list.mid_node();
    // SAFETY: `mid` is an element node of the list.
    let second_front = unsafe { Node::next_of(mid) };
    let mut second = CursorMut::new(list, second_front)
        .split()
        .unwrap_or_default();

    merge_sort(list, less);
    merge_sort(&mut second, less);
    merge_lists(list, &mut second, less);
}

fn merge_lists<T, F>(list: &mut List<T>, other: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut merged = List::new();
    loop {
        let from_other = match (list.front(), other.front()) {
            (Some(a), Some(b)) => less(b, a),
            _ => break,
        };
        if from_other {
            other.move_front_to(&mut merged);
        } else {
            list.move_front_to(&mut merged);
        }
    }
    // One of the two is empty by now.
    merged.append(list);
    merged.append(other);
    list.append(&mut merged);
}

#[cfg(test)]
mod tests {
    use super::merge_sort;
    use crate::list::tests::{list_eq, DropChecker};
    use crate::List;
    use std::cell::RefCell;

    #[test]
    fn sort_matches_slice_sort() {
        fn check(input: Vec<i32>) {
            let mut expected = input.clone();
            expected.sort();
            let mut list = List::from_iter(input);
            list.sort();
            list_eq(&list, expected);
        }
        check(vec![]);
        check(vec![1]);
        check(vec![2, 1]);
        check(vec![1, 2]);
        check(vec![3, 1, 2]);
        check(vec![5, 5, 5, 5]);
        check(vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        check(vec![4, 1, 9, 1, 0, -3, 7, 7, 2, 8, 5, -1, 6]);
        check((0..100).map(|i| (i * 37) % 23).collect());
    }

    #[test]
    fn sort_is_stable() {
        let mut list = List::from_iter([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')]);
        merge_sort(&mut list, &mut |a: &(i32, char), b: &(i32, char)| a.0 < b.0);
        list_eq(&list, [(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn sort_relinks_without_dropping() {
        let dropped = RefCell::new(Vec::new());
        let mut list = List::from_iter([3, 1, 2].iter().map(|&i| DropChecker::new(i, &dropped)));
        merge_sort(&mut list, &mut |a: &DropChecker<i32>, b: &DropChecker<i32>| {
            a.value < b.value
        });
        assert!(dropped.borrow().is_empty());
        assert!(list.is_well_formed());
        assert_eq!(Vec::from_iter(list.iter().map(|c| c.value)), vec![1, 2, 3]);
    }

    #[test]
    fn merge_sorted_lists() {
        let mut list = List::from_iter([1, 3, 5]);
        let mut other = List::from_iter([2, 4]);
        list.merge(&mut other);
        list_eq(&list, 1..6);
        assert!(other.is_empty() && other.is_well_formed());

        let mut list = List::new();
        let mut other = List::from_iter([1, 2]);
        list.merge(&mut other);
        list_eq(&list, [1, 2]);
        assert!(other.is_empty());

        let mut list = List::from_iter([1, 2]);
        list.merge(&mut List::new());
        list_eq(&list, [1, 2]);
    }

    #[test]
    fn merge_takes_self_on_ties() {
        let mut list = List::from_iter([(1, 'a'), (2, 'a')]);
        let mut other = List::from_iter([(1, 'b'), (2, 'b')]);
        list.merge_by(&mut other, |x, y| x.0 < y.0);
        list_eq(&list, [(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }
}
