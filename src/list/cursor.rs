//! The editing cursor behind the deletion and split passes of the list
//! algorithms.

use crate::list::{List, Node};
use std::ptr::NonNull;

/// A cursor over a `List` that can remove the element under it, or split the
/// list at it.
///
/// The cursor may rest on the ghost node, where it reads no element. Moving
/// never wraps around through the ghost node.
pub(crate) struct CursorMut<'a, T> {
    current: NonNull<Node<T>>,
    list: &'a mut List<T>,
}

impl<T> List<T> {
    /// A cursor on the front node, or on the ghost node if the list is empty.
    pub(crate) fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// A cursor on the ghost node, right after the back node.
    pub(crate) fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let ghost = self.ghost_node();
        CursorMut::new(self, ghost)
    }
}

impl<'a, T> CursorMut<'a, T> {
    /// `current` must be a node of `list`, the ghost node included.
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }

    #[inline]
    fn is_ghost(&self) -> bool {
        self.current == self.list.ghost_node()
    }

    pub(crate) fn current(&self) -> Option<&T> {
        if self.is_ghost() {
            return None;
        }
        // SAFETY: `current` is an element node of the borrowed list.
        Some(unsafe { Node::element(self.current) })
    }

    /// The element right after the cursor, or `None` if the cursor is on the
    /// back node or on the ghost node.
    pub(crate) fn peek_next(&self) -> Option<&T> {
        if self.is_ghost() {
            return None;
        }
        // SAFETY: `current` is a node of the borrowed list.
        let next = unsafe { Node::next_of(self.current) };
        if next == self.list.ghost_node() {
            return None;
        }
        // SAFETY: `next` is an element node.
        Some(unsafe { Node::element(next) })
    }

    /// Steps to the next node. Returns `false`, without moving, on the ghost
    /// node.
    pub(crate) fn move_next(&mut self) -> bool {
        if self.is_ghost() {
            return false;
        }
        // SAFETY: `current` is a node of the borrowed list.
        self.current = unsafe { Node::next_of(self.current) };
        true
    }

    /// Steps to the previous node. Returns `false`, without moving, on the
    /// front node.
    pub(crate) fn move_prev(&mut self) -> bool {
        if self.current == self.list.front_node() {
            return false;
        }
        // SAFETY: `current` is a node of the borrowed list.
        self.current = unsafe { Node::prev_of(self.current) };
        true
    }

    /// Unlinks the element under the cursor and returns it. The cursor then
    /// rests on the successor of the removed node.
    ///
    /// Returns `None` on the ghost node.
    pub(crate) fn remove(&mut self) -> Option<T> {
        if self.is_ghost() {
            return None;
        }
        let node = self.current;
        // SAFETY: `node` is an element node of the borrowed list.
        unsafe {
            self.current = Node::next_of(node);
            Some(self.list.detach_node(node).into_element())
        }
    }

    /// Moves the nodes from the cursor to the back into a new list. The cursor
    /// then rests on the ghost node.
    ///
    /// Returns `None` on the ghost node.
    pub(crate) fn split(&mut self) -> Option<List<T>> {
        if self.is_ghost() {
            return None;
        }
        let back = self.list.back_node();
        // SAFETY: `current..=back` is a chain of element nodes of the list.
        let detached = unsafe { self.list.detach_nodes(self.current, back) };
        self.current = self.list.ghost_node();
        Some(List::from_detached(detached))
    }
}

#[cfg(test)]
mod tests {
    use crate::list::tests::list_eq;
    use crate::List;

    #[test]
    fn moves_stop_at_the_ends() {
        let mut list = List::from_iter([1, 2]);
        let mut cursor = list.cursor_start_mut();
        assert!(!cursor.move_prev());
        assert_eq!(cursor.current(), Some(&1));
        assert_eq!(cursor.peek_next(), Some(&2));

        assert!(cursor.move_next());
        assert_eq!(cursor.peek_next(), None);
        assert!(cursor.move_next());
        assert_eq!(cursor.current(), None);
        assert!(!cursor.move_next());
        assert_eq!(cursor.current(), None);

        assert!(cursor.move_prev());
        assert_eq!(cursor.current(), Some(&2));
    }

    #[test]
    fn empty_list_has_nothing_under_the_cursor() {
        let mut list: List<i32> = List::new();
        let mut cursor = list.cursor_end_mut();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_next(), None);
        assert!(!cursor.move_prev());
        assert!(!cursor.move_next());
        assert_eq!(cursor.remove(), None);
        assert!(cursor.split().is_none());
        assert!(list.is_well_formed());
    }

    #[test]
    fn remove_leaves_the_cursor_on_the_successor() {
        let mut list = List::from_iter(0..6);
        let mut cursor = list.cursor_start_mut();
        while let Some(&value) = cursor.current() {
            if value % 2 == 0 {
                assert_eq!(cursor.remove(), Some(value));
            } else {
                cursor.move_next();
            }
        }
        list_eq(&list, [1, 3, 5]);

        let mut cursor = list.cursor_end_mut();
        assert!(cursor.move_prev());
        assert_eq!(cursor.remove(), Some(5));
        assert_eq!(cursor.current(), None);
        list_eq(&list, [1, 3]);
    }

    #[test]
    fn split_takes_the_tail() {
        let mut list = List::from_iter(0..5);
        let mut cursor = list.cursor_start_mut();
        cursor.move_next();
        cursor.move_next();
        let tail = cursor.split();
        assert_eq!(cursor.current(), None);
        assert!(cursor.split().is_none());

        list_eq(&list, 0..2);
        list_eq(&tail.unwrap_or_default(), 2..5);

        let mut cursor = list.cursor_start_mut();
        let all = cursor.split().unwrap_or_default();
        assert!(list.is_empty() && list.is_well_formed());
        list_eq(&all, 0..2);
    }
}
