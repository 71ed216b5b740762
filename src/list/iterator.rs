use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Borrowing iterator over a [`List`], front to back.
///
/// The remaining range is `head..tail`: `head` is the next node to yield from
/// the front, and `tail` is the node after the next one to yield from the
/// back (initially the ghost node). The range is empty once they meet.
///
/// The list stays borrowed while the iterator lives:
///
/// ```compile_fail
/// use cyclic_queue::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.ghost_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        let node = self.head;
        // SAFETY: a non-empty range only holds element nodes of the borrowed
        // list.
        unsafe {
            self.head = Node::next_of(node);
            Some(Node::element(node))
        }
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: `tail` may be the ghost node, so its link is read through a
        // raw place. The node before it is in the range.
        unsafe {
            self.tail = Node::prev_of(self.tail);
            Some(Node::element(self.tail))
        }
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// Mutably borrowing iterator over a [`List`]. The elements can be changed,
/// the links cannot.
///
/// ```compile_fail
/// use cyclic_queue::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.ghost_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.head == self.tail {
            return None;
        }
        let node = self.head;
        // SAFETY: as in `Iter`. Every node leaves the range once, so the
        // yielded references never alias.
        unsafe {
            self.head = Node::next_of(node);
            Some(Node::element_mut(node))
        }
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: see `Iter::next_back` and `IterMut::next`.
        unsafe {
            self.tail = Node::prev_of(self.tail);
            Some(Node::element_mut(self.tail))
        }
    }
}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// Owning iterator over a [`List`], created by `List::into_iter`. Elements
/// are popped from either end.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;

    #[test]
    fn iter_meets_in_the_middle() {
        let list = List::from_iter(0..6);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(format!("{:?}", iter), "[2, 3]");
        assert_eq!(iter.clone().count(), 2);
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_over_empty_list() {
        let list: List<String> = List::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().next_back(), None);
    }

    #[test]
    fn iter_mut_changes_elements_only() {
        let mut list = List::from_iter(0..4);
        list.iter_mut().rev().for_each(|x| *x *= 10);
        for x in &mut list {
            *x += 1;
        }
        assert!(list.is_well_formed());
        assert_eq!(Vec::from_iter(&list), vec![&1, &11, &21, &31]);
    }

    #[test]
    fn into_iter_pops_both_ends() {
        let mut list = List::from_iter(0..3);
        list.extend(3..5);
        let mut iter = list.into_iter();
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.next(), Some(0));
        assert_eq!(format!("{:?}", iter), "IntoIter([1, 2, 3])");
        assert_eq!(Vec::from_iter(iter), vec![1, 2, 3]);
    }
}
